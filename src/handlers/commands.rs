//! Command definitions
//!
//! Commands represent intentions to change the system state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// CreateBlogCommand
// =========================================================================

/// Command to create a blog. Fields are unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogCommand {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

impl CreateBlogCommand {
    pub fn new(title: String, author: String, url: String) -> Self {
        Self {
            title: Some(title),
            author: Some(author),
            url: Some(url),
            likes: None,
        }
    }

    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = Some(likes);
        self
    }
}

// =========================================================================
// CreateUserCommand
// =========================================================================

/// Command to register a user. Fields are unvalidated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserCommand {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl CreateUserCommand {
    pub fn new(username: String, password: String) -> Self {
        Self {
            username: Some(username),
            name: None,
            password: Some(password),
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }
}

// =========================================================================
// LoginCommand
// =========================================================================

/// Command to exchange credentials for a token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
    pub id: Uuid,
}
