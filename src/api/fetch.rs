//! Episode API client.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use super::RawEpisode;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
    #[error("malformed episode payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api base url cannot carry a path: {0}")]
    InvalidUrl(String),
}

/// Anything that can produce a raw episode for a slug.
///
/// One call is one attempt. Retrying is left to whoever schedules the
/// next regeneration.
pub trait EpisodeSource: Send + Sync {
    fn fetch(&self, slug: &str) -> Result<RawEpisode, FetchError>;
}

/// HTTP implementation of [`EpisodeSource`] over the episode API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("podcastr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/episodes/{slug}` with the slug encoded as one path segment.
    pub fn episode_url(&self, slug: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| FetchError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("episodes")
            .push(slug);
        Ok(url)
    }
}

impl EpisodeSource for ApiClient {
    fn fetch(&self, slug: &str) -> Result<RawEpisode, FetchError> {
        let url = self.episode_url(slug)?;
        crate::debug!("fetch"; "GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}
