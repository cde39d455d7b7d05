//! Error types for the locality cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the locality cache.
///
/// `Clone` because a single upstream outcome is handed to every caller
/// coalesced onto the same in-flight lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// Upstream unreachable or returned a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream returned a body that could not be understood
    #[error("Parse error: {0}")]
    Parse(String),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Returns true for failures caused by the upstream service.
    pub fn is_upstream(&self) -> bool {
        matches!(self, CacheError::Network(_) | CacheError::Parse(_))
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CacheError::Parse(err.to_string())
        } else {
            CacheError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Parse(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidCoordinates(_) => StatusCode::BAD_REQUEST,
            CacheError::Network(_) | CacheError::Parse(_) => StatusCode::BAD_GATEWAY,
            CacheError::InvalidConfig(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the locality cache.
pub type Result<T> = std::result::Result<T, CacheError>;
