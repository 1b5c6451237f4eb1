// src/error.rs
// Standardized error types for the report service

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum SeoError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("webhook returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("could not parse webhook response: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Result using SeoError
pub type Result<T> = std::result::Result<T, SeoError>;

impl SeoError {
    /// True for errors caused by the caller rather than by the service or upstream
    pub fn is_client_error(&self) -> bool {
        matches!(self, SeoError::InvalidInput(_))
    }

    /// True when the failure happened talking to (or decoding) the webhook
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SeoError::Upstream { .. } | SeoError::Parse(_) | SeoError::Http(_)
        )
    }
}
