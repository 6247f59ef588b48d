//! Store module
//!
//! Persistence for users, blogs and sessions behind the [`BlogStore`] trait.
//! `PgStore` backs the running service; `MemoryStore` backs tests and demos.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{AuthUser, Blog, BlogChanges, NewBlog, User};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User row to insert; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

/// Storage operations needed by the API.
///
/// Listing operations return records in creation order.
#[async_trait]
pub trait BlogStore: Send + Sync {
    // Blogs
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;
    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError>;
    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError>;
    async fn update_blog(&self, id: Uuid, changes: &BlogChanges) -> Result<Option<Blog>, StoreError>;
    /// Returns whether a blog was removed
    async fn delete_blog(&self, id: Uuid) -> Result<bool, StoreError>;
    async fn add_comment(&self, id: Uuid, comment: String) -> Result<Option<Blog>, StoreError>;

    // Users
    /// Fails with [`StoreError::UniqueViolation`] when the username is taken
    async fn insert_user(&self, user: NewUserRecord) -> Result<User, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    // Sessions
    async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
    /// Resolve an unexpired session to its user
    async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthUser>, StoreError>;
    /// Returns the number of sessions removed
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Remove all users, blogs and sessions
    async fn reset(&self) -> Result<(), StoreError>;
}
