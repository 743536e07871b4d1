//! Error types for spamset-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("request timed out: {url}")]
    Timeout { url: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("destination path is a directory: {0}")]
    DestinationIsDirectory(PathBuf),

    #[error("failed to create staging file: {0}")]
    TempFileError(#[source] io::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Fs(#[from] spamset_fs::Error),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let url = e
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        if e.is_timeout() {
            FetchError::Timeout { url }
        } else if let Some(status) = e.status() {
            FetchError::HttpStatus {
                status: status.as_u16(),
                url,
            }
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
