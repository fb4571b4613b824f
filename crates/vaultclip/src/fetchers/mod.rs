//! Page fetchers
//!
//! Design: the pipeline only depends on the [`Fetcher`] trait, so tests can
//! swap the network for a fake. [`HttpFetcher`] is the reqwest-backed default.

mod http;

pub use http::HttpFetcher;

use crate::error::ClipError;
use crate::types::FetchResult;
use async_trait::async_trait;

/// Retrieves raw page markup for a URL
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch the page
    ///
    /// Fails on connection errors and on any non-2xx status.
    async fn fetch(&self, url: &str) -> Result<FetchResult, ClipError>;
}

/// Validate a URL before any I/O happens
pub(crate) fn validate_url(url: &str) -> Result<(), ClipError> {
    if url.is_empty() {
        return Err(ClipError::MissingUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClipError::InvalidUrlScheme);
    }
    url::Url::parse(url).map_err(|_| ClipError::InvalidUrlScheme)?;
    Ok(())
}
