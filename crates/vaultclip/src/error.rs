//! Error types for VaultClip

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a clipping run
///
/// Only fatal failures live here. Degradations that let the run finish
/// (empty extraction, failed classification, failed conversion) are
/// reported as [`Warning`](crate::Warning)s on the outcome instead.
#[derive(Debug, Error)]
pub enum ClipError {
    /// URL is missing
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// Output folder is missing
    #[error("Missing required parameter: output folder")]
    MissingFolder,

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Writing the note failed
    #[error("Failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClipError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClipError::Timeout
        } else if err.is_connect() {
            ClipError::ConnectError(err)
        } else {
            ClipError::RequestError(err.to_string())
        }
    }

    /// True for failures that happened talking to a remote server
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ClipError::Timeout
                | ClipError::ConnectError(_)
                | ClipError::HttpStatus { .. }
                | ClipError::RequestError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClipError::MissingUrl.to_string(),
            "Missing required parameter: url"
        );
        assert_eq!(
            ClipError::MissingFolder.to_string(),
            "Missing required parameter: output folder"
        );
        assert_eq!(
            ClipError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(
            ClipError::HttpStatus {
                status: 404,
                url: "https://example.com/missing".to_string()
            }
            .to_string(),
            "Request failed with status 404: https://example.com/missing"
        );
    }

    #[test]
    fn test_filesystem_error_names_path() {
        let err = ClipError::Filesystem {
            path: PathBuf::from("/nope/note.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let message = err.to_string();
        assert!(message.contains("/nope/note.md"));
        assert!(message.contains("no such directory"));
        assert!(!err.is_network());
    }

    #[test]
    fn test_is_network() {
        assert!(ClipError::Timeout.is_network());
        assert!(ClipError::RequestError("reset".to_string()).is_network());
        assert!(!ClipError::MissingUrl.is_network());
    }
}
