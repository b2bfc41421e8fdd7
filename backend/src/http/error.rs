//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// Message returned whenever an identifier does not resolve to a person.
pub const PERSON_NOT_FOUND: &str = "Cannot find user";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Repository error, mapped by kind
    Repository(RepositoryError),
}

impl AppError {
    /// Mapping for failed writes (create and update).
    ///
    /// An unknown identifier is still a 404; every other failure, store
    /// outages included, is reported as a rejected request.
    pub fn write_failure(err: RepositoryError) -> Self {
        if err.is_not_found() {
            return AppError::NotFound(PERSON_NOT_FOUND.to_string());
        }
        if err.is_store_unavailable() {
            tracing::warn!(error = %err, "write rejected by store");
        }
        AppError::BadRequest(err.message().to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Repository(e) => {
                if e.is_not_found() {
                    (
                        StatusCode::NOT_FOUND,
                        ApiError::new("NOT_FOUND", PERSON_NOT_FOUND),
                    )
                } else if e.is_validation() {
                    (
                        StatusCode::BAD_REQUEST,
                        ApiError::new("BAD_REQUEST", e.message()),
                    )
                } else {
                    tracing::error!(error = %e, "repository failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("INTERNAL_ERROR", e.message()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}
