mod client;
mod types;

pub use client::BangumiClient;
pub use types::{
    total_pages, ApiConfig, ApiError, EpisodeTitleMap, Rating, SearchPage, SearchResult,
    SeasonData, SubjectMetadata, DEFAULT_API_URL, SEARCH_PAGE_SIZE,
};

use std::env;

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "BANGUMI_API_URL";

/// Anything that can supply subject metadata and episode titles to the shell
pub trait MetadataSource {
    /// Fetch subject metadata and main story episode titles.
    /// Failures are recorded in the returned value, never raised.
    fn fetch_season(&self, subject_id: u32) -> SeasonData;

    fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError>;
}

/// Build API configuration from a token and the environment
///
/// `BANGUMI_API_URL` replaces the default `https://api.bgm.tv` base URL.
pub fn config_from_env(access_token: Option<String>) -> ApiConfig {
    let config = ApiConfig::new(access_token);

    match env::var(ENV_API_URL) {
        Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
        _ => config,
    }
}
