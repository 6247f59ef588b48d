//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;
use crate::store::StoreError;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Domain errors
    #[error(transparent)]
    Domain(#[from] DomainError),

    // Server errors (5xx)
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// HTTP status, stable error code and optional details
    fn parts(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::Domain(domain_err) => match domain_err {
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error", None),
                DomainError::UsernameTaken => (StatusCode::BAD_REQUEST, "username_taken", None),
                DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
                }
                DomainError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
                DomainError::BlogNotFound(id) => {
                    (StatusCode::NOT_FOUND, "blog_not_found", Some(id.clone()))
                }
                DomainError::UserNotFound(id) => {
                    (StatusCode::NOT_FOUND, "user_not_found", Some(id.clone()))
                }
                DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden", None),
            },

            // Unique violations that slip past domain checks are still the client's fault
            AppError::Store(StoreError::UniqueViolation(field)) => (
                StatusCode::BAD_REQUEST,
                "unique_violation",
                Some(field.to_string()),
            ),
            AppError::Store(e) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = self.parts();

        // Never leak storage internals to clients
        let error = if status.is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
