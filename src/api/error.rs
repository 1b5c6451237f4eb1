// src/api/error.rs
// Centralized error handling for HTTP API responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::error::SeoError;

/// Standard API error response: `{"error": ..., "details": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub details: Option<String>,
    pub status_code: StatusCode,
}

impl ApiError {
    /// Create a new internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Create a new bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status_code: StatusCode::BAD_REQUEST,
        }
    }

    /// Error with an arbitrary status
    pub fn custom(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
            status_code,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });

        if let Some(details) = self.details {
            body["details"] = json!(details);
        }

        (self.status_code, Json(body)).into_response()
    }
}

impl From<SeoError> for ApiError {
    fn from(err: SeoError) -> Self {
        match err {
            SeoError::InvalidInput(msg) => ApiError::bad_request(msg),
            e if e.is_upstream() => {
                error!(error = %e, "Analysis webhook failed");
                ApiError::internal("Failed to analyze website").with_details(e.to_string())
            }
            e => {
                error!(error = %e, "Analysis failed");
                ApiError::internal("Internal server error").with_details(e.to_string())
            }
        }
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Helper function for validation errors
pub fn validation_error(field: &str, reason: &str) -> ApiError {
    ApiError::bad_request(format!("Invalid {field}: {reason}"))
}
