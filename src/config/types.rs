use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Flat key-value settings persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Keys this version does not know about, kept as-is on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    /// Stored token, ignoring blank values
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Where the config file lives
#[derive(Debug, Clone)]
pub struct ConfigLocation {
    pub path: PathBuf,
}

impl ConfigLocation {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `config.json` next to the running executable
    pub fn beside_executable() -> Option<Self> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(Self::in_dir)
    }

    /// Per-user config directory, used when the executable path is unknown
    pub fn for_user() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::in_dir(&dir.join(env!("CARGO_PKG_NAME"))))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(CONFIG_FILE_NAME))
    }

    /// Resolve the default location, falling back to the working directory
    pub fn default_location() -> Self {
        Self::beside_executable()
            .or_else(Self::for_user)
            .unwrap_or_else(|| Self::at(CONFIG_FILE_NAME))
    }
}

/// Errors that can occur while reading or writing the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file is not a JSON object")]
    NotAnObject,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
