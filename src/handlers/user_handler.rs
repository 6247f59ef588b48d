//! User Registration Handler
//!
//! Validates sign-up input, hashes the password and stores the user.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::credentials::hash_password;
use crate::domain::{DomainError, NewUser, User};
use crate::error::AppError;
use crate::store::{BlogStore, NewUserRecord, StoreError};

use super::CreateUserCommand;

/// Handler for user registration and lookup
pub struct UserHandler {
    store: Arc<dyn BlogStore>,
    password_cost: u32,
}

impl UserHandler {
    /// `password_cost` is the bcrypt work factor for new hashes
    pub fn new(store: Arc<dyn BlogStore>, password_cost: u32) -> Self {
        Self {
            store,
            password_cost,
        }
    }

    /// Execute the create user command
    pub async fn register(&self, command: CreateUserCommand) -> Result<User, AppError> {
        let new_user = NewUser::new(command.username, command.name, command.password)?;

        let password_hash = hash_password(&new_user.password, self.password_cost)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))?;

        let record = NewUserRecord {
            username: new_user.username,
            name: new_user.name,
            password_hash,
        };

        let user = self.store.insert_user(record).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => AppError::from(DomainError::UsernameTaken),
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()).into())
    }
}
