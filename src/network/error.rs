//! Error type for API calls.
//!
//! The UI collapses every variant into a single error flag; the variants
//! exist so the log says what actually happened.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, reset).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("Server responded with status {0}")]
    Status(u16),

    /// The body was not the JSON shape we asked for.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Transport(format!("timed out: {}", e))
        } else if e.is_connect() {
            ApiError::Transport(format!("connection failed: {}", e))
        } else if let Some(status) = e.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
