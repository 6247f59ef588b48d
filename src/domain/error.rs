//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Validation and business rule failures for blogs, users and sessions.
///
/// These are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or missing input field
    #[error("{0}")]
    Validation(String),

    /// Username already registered
    #[error("expected username to be unique")]
    UsernameTaken,

    /// Wrong username or password
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, unknown or expired bearer token
    #[error("token missing or invalid")]
    InvalidToken,

    /// Blog not found
    #[error("blog not found")]
    BlogNotFound(String),

    /// User not found
    #[error("user not found")]
    UserNotFound(String),

    /// Authenticated user does not own the resource
    #[error("{0}")]
    Forbidden(String),
}

impl DomainError {
    /// Check if this is a client error (user's fault)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::UsernameTaken
                | Self::InvalidCredentials
                | Self::InvalidToken
                | Self::Forbidden(_)
        )
    }

    /// Check if this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BlogNotFound(_) | Self::UserNotFound(_))
    }
}
