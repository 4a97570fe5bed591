use super::types::{Config, ConfigError, ConfigLocation};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// The session's config value, loaded once and saved explicitly
pub struct ConfigStore {
    location: ConfigLocation,
    config: Config,
    dirty: bool,
}

impl ConfigStore {
    /// Load config from disk, or start empty if it is missing or unreadable
    pub fn load(location: ConfigLocation) -> Self {
        let config = match Self::read_config_file(&location.path) {
            Ok(config) => {
                debug!("Loaded config from {:?}", location.path);
                config
            }
            Err(e) => {
                match &e {
                    ConfigError::IoError(io_err)
                        if io_err.kind() == std::io::ErrorKind::NotFound =>
                    {
                        debug!("No config file found, starting fresh");
                    }
                    _ => {
                        warn!(
                            "Failed to read config {:?}: {}, starting fresh",
                            location.path, e
                        );
                    }
                }
                Config::default()
            }
        };

        Self {
            location,
            config,
            dirty: false,
        }
    }

    fn read_config_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;

        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn access_token(&self) -> Option<&str> {
        self.config.access_token()
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.config.access_token = Some(token.into());
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn path(&self) -> &Path {
        &self.location.path
    }

    /// Save config to disk if modified
    pub fn save(&mut self) -> Result<(), ConfigError> {
        if !self.dirty {
            debug!("Config not modified, skipping save");
            return Ok(());
        }

        if let Some(parent) = self.location.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.location.path.with_extension("json.tmp");

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &self.config)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.location.path)?;

        self.dirty = false;
        info!("Saved config to {:?}", self.location.path);
        Ok(())
    }
}
