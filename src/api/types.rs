use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.bgm.tv";
pub const SEARCH_PAGE_SIZE: u32 = 10;

/// Episode type discriminator for main story episodes
pub const EPISODE_TYPE_MAIN: u32 = 0;

/// Subject information fetched from Bangumi
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMetadata {
    pub id: u32,
    pub name: String,
    pub name_cn: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub rating: Option<Rating>,
    pub air_date: Option<NaiveDate>,
    pub total_episodes: Option<u32>,
}

impl SubjectMetadata {
    /// Localized title if present, otherwise the native one
    pub fn display_title(&self) -> &str {
        if !self.name_cn.is_empty() {
            &self.name_cn
        } else if !self.name.is_empty() {
            &self.name
        } else {
            "Unknown"
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub score: f64,
    pub total: u32,
    pub rank: Option<u32>,
}

/// Episode number → display title, ordered by episode number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EpisodeTitleMap(BTreeMap<u32, String>);

impl EpisodeTitleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, episode: u32, title: impl Into<String>) {
        self.0.insert(episode, title.into());
    }

    pub fn get(&self, episode: u32) -> Option<&str> {
        self.0.get(&episode).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(n, t)| (*n, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Into<String>> FromIterator<(u32, T)> for EpisodeTitleMap {
    fn from_iter<I: IntoIterator<Item = (u32, T)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(n, t)| (n, t.into())).collect())
    }
}

/// Everything fetched for one subject. Never carries an error past the
/// client; a failed fetch is recorded in `failure`.
#[derive(Debug, Default)]
pub struct SeasonData {
    pub subject: Option<SubjectMetadata>,
    pub episodes: EpisodeTitleMap,
    pub failure: Option<ApiError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: u32,
    pub name: String,
    pub name_cn: String,
    pub air_date: Option<String>,
}

impl SearchResult {
    pub fn display_title(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name
        } else {
            &self.name_cn
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub page: u32,
    pub total_results: u32,
    pub total_pages: u32,
    pub results: Vec<SearchResult>,
}

/// Pages needed to show `total` results, `SEARCH_PAGE_SIZE` per page
pub fn total_pages(total: u32) -> u32 {
    total.div_ceil(SEARCH_PAGE_SIZE)
}

/// API client configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.trim().is_empty()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Errors that can occur when interacting with the Bangumi API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Subject not found: {0}")]
    NotFound(u32),

    #[error("Access token rejected (HTTP {0})")]
    Unauthorized(u16),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("API returned HTTP {status}: {url}")]
    HttpStatus { status: u16, url: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::ParseError(err.to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ParseError(err.to_string())
    }
}

// ============ Wire payloads ============

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectPayload {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_cn: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub tags: Vec<TagPayload>,
    #[serde(default)]
    pub rating: Option<RatingPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagPayload {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RatingPayload {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub rank: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodePayload {
    #[serde(rename = "type", default)]
    pub kind: u32,
    pub sort: f64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_cn: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodePagePayload {
    pub data: Vec<EpisodePayload>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacyEpisodesPayload {
    #[serde(default)]
    pub eps: Vec<EpisodePayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacySearchPayload {
    #[serde(default)]
    pub results: u32,
    #[serde(default)]
    pub list: Vec<LegacySearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LegacySearchItem {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_cn: String,
    #[serde(default)]
    pub air_date: Option<String>,
}

impl From<SubjectPayload> for SubjectMetadata {
    fn from(p: SubjectPayload) -> Self {
        let air_date = p
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        Self {
            id: p.id,
            name: p.name,
            name_cn: p.name_cn,
            summary: p.summary,
            tags: p.tags.into_iter().map(|t| t.name).collect(),
            rating: p.rating.map(|r| Rating {
                score: r.score,
                total: r.total,
                rank: r.rank.filter(|rank| *rank > 0),
            }),
            air_date,
            total_episodes: p.total_episodes,
        }
    }
}

impl From<LegacySearchItem> for SearchResult {
    fn from(item: LegacySearchItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            name_cn: item.name_cn,
            air_date: item.air_date.filter(|d| !d.is_empty() && d != "0000-00-00"),
        }
    }
}
