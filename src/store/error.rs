//! Store Errors
//!
//! Error types for store operations.

/// Errors that can occur in the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique constraint violated on the named field
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(&'static str),

    /// Referenced record does not exist
    #[error("Referenced record not found: {0}")]
    MissingReference(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a sqlx error, turning unique violations into [`StoreError::UniqueViolation`]
    pub(crate) fn from_insert(err: sqlx::Error, field: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Self::UniqueViolation(field),
            _ => Self::Database(err),
        }
    }

    /// Check if this error is a unique constraint violation
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, StoreError::UniqueViolation(_))
    }
}
