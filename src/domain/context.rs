//! Request Context
//!
//! Identity and tracing metadata for an authenticated request. Passed
//! explicitly to handlers instead of living in process-wide state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Context for a request, used for authorization and tracing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Authenticated user, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,

    /// Correlation ID for request tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl RequestContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self {
            user: None,
            correlation_id: None,
        }
    }

    /// Create context with an authenticated user
    pub fn with_user(mut self, user: AuthUser) -> Self {
        self.user = Some(user);
        self
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Generate a new correlation ID if not present
    pub fn ensure_correlation_id(&mut self) -> Uuid {
        *self.correlation_id.get_or_insert_with(Uuid::new_v4)
    }

    /// ID of the authenticated user, if any
    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
