//! User Types
//!
//! Registered users, their blog summaries and the sign-up input.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::credentials::{validate_password, validate_username};
use super::error::DomainError;

/// Blog as listed under its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
}

/// A registered user. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    #[serde(skip)]
    pub password_hash: String,
    #[serde(default)]
    pub blogs: Vec<BlogSummary>,
}

/// Validated sign-up input. Holds the plaintext password until hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

impl NewUser {
    /// Validate raw sign-up fields.
    ///
    /// Password presence is checked before username presence, and the
    /// password policy before the username rules.
    pub fn new(
        username: Option<String>,
        name: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DomainError> {
        let password = password
            .filter(|p| !p.is_empty())
            .ok_or_else(|| DomainError::Validation("Password is required".to_string()))?;

        let username = username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or_else(|| DomainError::Validation("Username is required".to_string()))?;

        validate_password(&password)?;
        validate_username(&username)?;

        Ok(Self {
            username,
            name: name.filter(|n| !n.trim().is_empty()),
            password,
        })
    }
}
