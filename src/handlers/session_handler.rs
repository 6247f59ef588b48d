//! Session Handler
//!
//! Login and bearer token resolution.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::domain::credentials::{generate_token, hash_token, verify_password};
use crate::domain::{AuthUser, DomainError};
use crate::error::AppError;
use crate::store::BlogStore;

use super::{LoginCommand, LoginResult};

/// Handler for issuing and resolving session tokens
pub struct SessionHandler {
    store: Arc<dyn BlogStore>,
    token_ttl: Duration,
}

impl SessionHandler {
    pub fn new(store: Arc<dyn BlogStore>, token_ttl: Duration) -> Self {
        Self { store, token_ttl }
    }

    /// Check credentials and issue a token
    pub async fn login(&self, command: LoginCommand) -> Result<LoginResult, AppError> {
        let user = self.store.find_user_by_username(&command.username).await?;

        let user = match user {
            Some(user) if verify_password(&command.password, &user.password_hash) => user,
            _ => {
                tracing::info!(username = %command.username, "Failed login attempt");
                return Err(DomainError::InvalidCredentials.into());
            }
        };

        let ttl = chrono::Duration::from_std(self.token_ttl)
            .map_err(|e| AppError::Internal(format!("token ttl out of range: {}", e)))?;
        let token = generate_token();

        self.store
            .create_session(&hash_token(&token), user.id, Utc::now() + ttl)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(LoginResult {
            token,
            username: user.username,
            name: user.name,
            id: user.id,
        })
    }

    /// Resolve a bearer token to its user, if the session is still valid
    pub async fn authenticate(&self, token: &str) -> Result<AuthUser, AppError> {
        self.store
            .find_session_user(&hash_token(token), Utc::now())
            .await?
            .ok_or_else(|| DomainError::InvalidToken.into())
    }
}
