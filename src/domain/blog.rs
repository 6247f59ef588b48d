//! Blog Types
//!
//! Blog records as served by the API, plus the input types for creating
//! and updating them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;
use super::stats::BlogRecord;

/// Largest like count accepted on create or update
pub const MAX_LIKES: i64 = i32::MAX as i64;

/// Owner of a blog, as embedded in blog responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    #[serde(default)]
    pub comments: Vec<String>,
    /// Seeded blogs may have no owner
    pub user: Option<UserSummary>,
}

impl Blog {
    /// Whether `user_id` owns this blog
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user.as_ref().is_some_and(|owner| owner.id == user_id)
    }
}

impl BlogRecord for Blog {
    fn author(&self) -> &str {
        &self.author
    }

    fn likes(&self) -> i64 {
        self.likes
    }
}

/// Validated input for a new blog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user_id: Option<Uuid>,
}

impl NewBlog {
    /// Validate raw fields. Missing likes default to zero.
    pub fn new(
        title: Option<String>,
        author: Option<String>,
        url: Option<String>,
        likes: Option<i64>,
    ) -> Result<Self, DomainError> {
        let (title, author, url) = match (non_empty(title), non_empty(author), non_empty(url)) {
            (Some(title), Some(author), Some(url)) => (title, author, url),
            _ => {
                return Err(DomainError::Validation(
                    "Title, Url and Author are required fields".to_string(),
                ))
            }
        };

        let likes = likes.unwrap_or(0);
        check_likes(likes)?;

        Ok(Self {
            title,
            author,
            url,
            likes,
            user_id: None,
        })
    }

    pub fn with_owner(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Partial update of a blog; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogChanges {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<i64>,
}

impl BlogChanges {
    /// Reject out-of-range likes and blanked-out text fields
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(likes) = self.likes {
            check_likes(likes)?;
        }

        let blanked = [&self.title, &self.author, &self.url]
            .into_iter()
            .any(|field| field.as_deref().is_some_and(|v| v.trim().is_empty()));
        if blanked {
            return Err(DomainError::Validation(
                "Title, Url and Author cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Validate a comment body
pub fn validate_comment(comment: Option<String>) -> Result<String, DomainError> {
    non_empty(comment)
        .ok_or_else(|| DomainError::Validation("Comment is a required field".to_string()))
}

fn check_likes(likes: i64) -> Result<(), DomainError> {
    if !(0..=MAX_LIKES).contains(&likes) {
        return Err(DomainError::Validation(format!(
            "likes must be between 0 and {}, got {}",
            MAX_LIKES, likes
        )));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
