//! Error types for mixport.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for Spotify client and migration operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No usable token is cached; an interactive authorization was started.
    #[error("authorization required")]
    AuthRequired,

    /// The user closed or denied the authorization flow.
    #[error("authorization cancelled")]
    AuthCancelled,

    /// A provider call returned a non-2xx status. The message carries the
    /// intent of the endpoint, e.g. "Failed to search track".
    #[error("{intent} (status {status})")]
    RequestFailed {
        intent: &'static str,
        status: StatusCode,
    },

    /// Neither the playlist nor the album endpoint resolved the id.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn request_failed(intent: &'static str, status: StatusCode) -> Self {
        ApiError::RequestFailed { intent, status }
    }
}
