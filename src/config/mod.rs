mod store;
mod types;

pub use store::ConfigStore;
pub use types::{Config, ConfigError, ConfigLocation, CONFIG_FILE_NAME};

use std::env;

/// Environment variable that overrides the stored access token for one session
pub const ENV_ACCESS_TOKEN: &str = "BANGUMI_ACCESS_TOKEN";

// Serializes tests that touch the token environment variable
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Token to use for this session: environment first, then the config file.
/// The environment value is never written back.
pub fn resolve_access_token(store: &ConfigStore) -> Option<String> {
    env::var(ENV_ACCESS_TOKEN)
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .or_else(|| store.access_token().map(str::to_string))
}
