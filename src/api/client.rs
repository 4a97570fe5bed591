use super::types::{
    total_pages, ApiConfig, ApiError, EpisodePagePayload, EpisodePayload, EpisodeTitleMap,
    LegacyEpisodesPayload, LegacySearchPayload, SearchPage, SeasonData, SubjectMetadata,
    SubjectPayload, EPISODE_TYPE_MAIN, SEARCH_PAGE_SIZE,
};
use super::MetadataSource;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

const EPISODE_PAGE_LIMIT: u32 = 100;

/// Bangumi HTTP API client
pub struct BangumiClient {
    client: Client,
    config: ApiConfig,
}

impl BangumiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| ApiError::NetworkError(format!("Invalid access token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Fetch subject metadata by Bangumi subject ID
    pub fn fetch_subject(&self, subject_id: u32) -> Result<SubjectMetadata, ApiError> {
        let url = format!("{}/v0/subjects/{}", self.config.base_url, subject_id);

        let payload: SubjectPayload = self.get_json(&url).map_err(|e| match e {
            ApiError::HttpStatus { status: 404, .. } => ApiError::NotFound(subject_id),
            other => other,
        })?;

        let subject = SubjectMetadata::from(payload);
        info!(
            "Fetched subject {}: {}",
            subject_id,
            subject.display_title()
        );
        Ok(subject)
    }

    /// Fetch main story episode titles, falling back to the legacy endpoint
    pub fn fetch_episode_titles(&self, subject_id: u32) -> Result<EpisodeTitleMap, ApiError> {
        match self.fetch_episodes_v0(subject_id) {
            Ok(episodes) => Ok(episode_titles_from(episodes)),
            Err(e) => {
                warn!(
                    "Episode listing failed for {}: {}, trying legacy endpoint",
                    subject_id, e
                );
                let episodes = self.fetch_episodes_legacy(subject_id)?;
                Ok(episode_titles_from(episodes))
            }
        }
    }

    fn fetch_episodes_v0(&self, subject_id: u32) -> Result<Vec<EpisodePayload>, ApiError> {
        let mut episodes = Vec::new();
        let mut offset = 0;

        loop {
            let url = format!(
                "{}/v0/episodes?subject_id={}&type={}&limit={}&offset={}",
                self.config.base_url, subject_id, EPISODE_TYPE_MAIN, EPISODE_PAGE_LIMIT, offset
            );
            let page: EpisodePagePayload = self.get_json(&url)?;
            let received = page.data.len() as u32;

            debug!(
                "Episode page at offset {}: {} of {} episodes",
                offset, received, page.total
            );

            episodes.extend(page.data);
            offset += received;

            if received == 0 || offset >= page.total {
                break;
            }
        }

        Ok(episodes)
    }

    fn fetch_episodes_legacy(&self, subject_id: u32) -> Result<Vec<EpisodePayload>, ApiError> {
        let url = format!("{}/subject/{}/ep", self.config.base_url, subject_id);
        let payload: LegacyEpisodesPayload = self.get_json(&url)?;
        Ok(payload.eps)
    }

    /// Search anime subjects by free text, `SEARCH_PAGE_SIZE` results per page
    pub fn search_subjects(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        let page = page.max(1);
        let url = format!(
            "{}/search/subject/{}?type=2&responseGroup=small&start={}&max_results={}",
            self.config.base_url,
            urlencoding::encode(query.trim()),
            (page - 1) * SEARCH_PAGE_SIZE,
            SEARCH_PAGE_SIZE
        );

        let payload: LegacySearchPayload = self.get_json(&url)?;
        Ok(search_page_from(payload, page))
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("Requesting: {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();

        debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized(status.as_u16()));
        }

        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl MetadataSource for BangumiClient {
    fn fetch_season(&self, subject_id: u32) -> SeasonData {
        let subject = match self.fetch_subject(subject_id) {
            Ok(subject) => subject,
            Err(e) => {
                warn!("Failed to fetch subject {}: {}", subject_id, e);
                return SeasonData {
                    failure: Some(e),
                    ..Default::default()
                };
            }
        };

        match self.fetch_episode_titles(subject_id) {
            Ok(episodes) => {
                info!(
                    "Fetched {} main episodes for subject {}",
                    episodes.len(),
                    subject_id
                );
                SeasonData {
                    subject: Some(subject),
                    episodes,
                    failure: None,
                }
            }
            Err(e) => {
                warn!("Failed to fetch episodes for {}: {}", subject_id, e);
                SeasonData {
                    subject: Some(subject),
                    episodes: EpisodeTitleMap::new(),
                    failure: Some(e),
                }
            }
        }
    }

    fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        self.search_subjects(query, page)
    }
}

/// Keep main story episodes with an integral sort number.
/// Title: localized name, else original name, else "Episode <N>".
pub(crate) fn episode_titles_from(episodes: Vec<EpisodePayload>) -> EpisodeTitleMap {
    let mut titles = EpisodeTitleMap::new();

    for ep in episodes {
        if ep.kind != EPISODE_TYPE_MAIN {
            continue;
        }

        if ep.sort < 0.0 || ep.sort.fract() != 0.0 || ep.sort > u32::MAX as f64 {
            debug!("Skipping episode with non-integral sort {}", ep.sort);
            continue;
        }
        let number = ep.sort as u32;

        let title = if !ep.name_cn.is_empty() {
            ep.name_cn
        } else if !ep.name.is_empty() {
            ep.name
        } else {
            format!("Episode {}", number)
        };

        titles.insert(number, title);
    }

    titles
}

pub(crate) fn search_page_from(payload: LegacySearchPayload, page: u32) -> SearchPage {
    let results = payload
        .list
        .into_iter()
        .take(SEARCH_PAGE_SIZE as usize)
        .map(Into::into)
        .collect();

    SearchPage {
        page,
        total_results: payload.results,
        total_pages: total_pages(payload.results),
        results,
    }
}
