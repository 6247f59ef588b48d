//! In-memory store
//!
//! Keeps everything in insertion-ordered vectors behind a single lock.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{AuthUser, Blog, BlogChanges, BlogSummary, NewBlog, User, UserSummary};

use super::{BlogStore, NewUserRecord, StoreError};

#[derive(Debug, Clone)]
struct BlogRow {
    id: Uuid,
    title: String,
    author: String,
    url: String,
    likes: i64,
    comments: Vec<String>,
    user_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
struct UserRow {
    id: Uuid,
    username: String,
    name: Option<String>,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct SessionRow {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<UserRow>,
    blogs: Vec<BlogRow>,
    sessions: HashMap<String, SessionRow>,
}

impl State {
    fn user(&self, id: Uuid) -> Option<&UserRow> {
        self.users.iter().find(|u| u.id == id)
    }

    fn blog(&self, row: &BlogRow) -> Blog {
        let user = row.user_id.and_then(|id| self.user(id)).map(|u| UserSummary {
            id: u.id,
            username: u.username.clone(),
            name: u.name.clone(),
        });

        Blog {
            id: row.id,
            title: row.title.clone(),
            author: row.author.clone(),
            url: row.url.clone(),
            likes: row.likes,
            comments: row.comments.clone(),
            user,
        }
    }

    fn user_with_blogs(&self, row: &UserRow) -> User {
        let blogs = self
            .blogs
            .iter()
            .filter(|b| b.user_id == Some(row.id))
            .map(|b| BlogSummary {
                id: b.id,
                title: b.title.clone(),
                author: b.author.clone(),
                url: b.url.clone(),
            })
            .collect();

        User {
            id: row.id,
            username: row.username.clone(),
            name: row.name.clone(),
            password_hash: row.password_hash.clone(),
            blogs,
        }
    }
}

/// Store holding all data in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let state = self.state.read().await;
        Ok(state.blogs.iter().map(|b| state.blog(b)).collect())
    }

    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let state = self.state.read().await;
        Ok(state.blogs.iter().find(|b| b.id == id).map(|b| state.blog(b)))
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let mut state = self.state.write().await;

        if let Some(user_id) = blog.user_id {
            if state.user(user_id).is_none() {
                return Err(StoreError::MissingReference(format!("user {}", user_id)));
            }
        }

        let row = BlogRow {
            id: Uuid::new_v4(),
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            comments: Vec::new(),
            user_id: blog.user_id,
        };
        let created = state.blog(&row);
        state.blogs.push(row);
        Ok(created)
    }

    async fn update_blog(&self, id: Uuid, changes: &BlogChanges) -> Result<Option<Blog>, StoreError> {
        let mut state = self.state.write().await;

        let Some(row) = state.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            row.title = title.clone();
        }
        if let Some(author) = &changes.author {
            row.author = author.clone();
        }
        if let Some(url) = &changes.url {
            row.url = url.clone();
        }
        if let Some(likes) = changes.likes {
            row.likes = likes;
        }

        let row = row.clone();
        Ok(Some(state.blog(&row)))
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        Ok(state.blogs.len() != before)
    }

    async fn add_comment(&self, id: Uuid, comment: String) -> Result<Option<Blog>, StoreError> {
        let mut state = self.state.write().await;

        let Some(row) = state.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        row.comments.push(comment);

        let row = row.clone();
        Ok(Some(state.blog(&row)))
    }

    async fn insert_user(&self, user: NewUserRecord) -> Result<User, StoreError> {
        let mut state = self.state.write().await;

        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation("username"));
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            username: user.username,
            name: user.name,
            password_hash: user.password_hash,
        };
        let created = state.user_with_blogs(&row);
        state.users.push(row);
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.iter().map(|u| state.user_with_blogs(u)).collect())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.user(id).map(|u| state.user_with_blogs(u)))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| state.user_with_blogs(u)))
    }

    async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        if state.user(user_id).is_none() {
            return Err(StoreError::MissingReference(format!("user {}", user_id)));
        }
        if state.sessions.contains_key(token_hash) {
            return Err(StoreError::UniqueViolation("token_hash"));
        }

        state
            .sessions
            .insert(token_hash.to_string(), SessionRow { user_id, expires_at });
        Ok(())
    }

    async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthUser>, StoreError> {
        let state = self.state.read().await;

        let user = state
            .sessions
            .get(token_hash)
            .filter(|s| s.expires_at > now)
            .and_then(|s| state.user(s.user_id))
            .map(|u| AuthUser {
                id: u.id,
                username: u.username.clone(),
            });
        Ok(user)
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| s.expires_at > now);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        *state = State::default();
        Ok(())
    }
}
