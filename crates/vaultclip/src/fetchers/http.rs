//! HTTP fetcher
//!
//! Sends a browser-like User-Agent so article hosts that block bots still
//! serve the page. No retries and no custom redirect policy.

use crate::error::ClipError;
use crate::fetchers::{validate_url, Fetcher};
use crate::types::FetchResult;
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, warn};

/// reqwest-backed page fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    user_agent: String,
}

impl HttpFetcher {
    /// Create a fetcher with the default browser User-Agent
    pub fn new() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Create a fetcher with a custom User-Agent
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        headers
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<FetchResult, ClipError> {
        validate_url(url)?;

        let client = reqwest::Client::builder()
            .default_headers(self.headers())
            .build()
            .map_err(ClipError::ClientBuildError)?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(ClipError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Page request returned error status");
            return Err(ClipError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // reqwest picks the charset from Content-Type, falling back to UTF-8
        let body = response.text().await.map_err(ClipError::from_reqwest)?;
        debug!(url = %url, bytes = body.len(), "Fetched page");

        Ok(FetchResult {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
