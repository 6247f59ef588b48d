//! Blog Handler
//!
//! Blog reads and writes, ownership checks and statistics.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::blog::validate_comment;
use crate::domain::{AuthUser, Blog, BlogChanges, BlogStats, DomainError, NewBlog, RequestContext};
use crate::error::AppError;
use crate::store::{BlogStore, StoreError};

use super::CreateBlogCommand;

/// Handler for blog operations
pub struct BlogHandler {
    store: Arc<dyn BlogStore>,
}

impl BlogHandler {
    pub fn new(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    /// All blogs in creation order
    pub async fn list(&self) -> Result<Vec<Blog>, AppError> {
        Ok(self.store.list_blogs().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, AppError> {
        self.store
            .get_blog(id)
            .await?
            .ok_or_else(|| DomainError::BlogNotFound(id.to_string()).into())
    }

    /// Create a blog owned by the authenticated user
    pub async fn create(
        &self,
        command: CreateBlogCommand,
        context: &RequestContext,
    ) -> Result<Blog, AppError> {
        let user = require_user(context)?;

        let new_blog = NewBlog::new(command.title, command.author, command.url, command.likes)?
            .with_owner(user.id);

        let blog = self.store.insert_blog(new_blog).await.map_err(|e| match e {
            // Session outlived its user
            StoreError::MissingReference(_) => AppError::from(DomainError::UserNotFound(user.id.to_string())),
            other => other.into(),
        })?;

        tracing::info!(
            blog_id = %blog.id,
            user_id = %user.id,
            correlation_id = ?context.correlation_id,
            "Blog created"
        );

        Ok(blog)
    }

    /// Apply a partial update
    pub async fn update(
        &self,
        id: Uuid,
        changes: BlogChanges,
        context: &RequestContext,
    ) -> Result<Blog, AppError> {
        require_user(context)?;
        changes.validate()?;

        let blog = self
            .store
            .update_blog(id, &changes)
            .await?
            .ok_or_else(|| DomainError::BlogNotFound(id.to_string()))?;

        tracing::debug!(blog_id = %id, likes = blog.likes, "Blog updated");
        Ok(blog)
    }

    /// Delete a blog. Only its creator may do so.
    pub async fn delete(&self, id: Uuid, context: &RequestContext) -> Result<(), AppError> {
        let user = require_user(context)?;

        let blog = self
            .store
            .get_blog(id)
            .await?
            .ok_or_else(|| DomainError::BlogNotFound(id.to_string()))?;

        if !blog.is_owned_by(user.id) {
            tracing::warn!(blog_id = %id, user_id = %user.id, "Rejected delete by non-owner");
            return Err(DomainError::Forbidden("only creator can delete post".to_string()).into());
        }

        self.store.delete_blog(id).await?;

        tracing::info!(
            blog_id = %id,
            user_id = %user.id,
            correlation_id = ?context.correlation_id,
            "Blog deleted"
        );
        Ok(())
    }

    /// Append a comment
    pub async fn comment(&self, id: Uuid, comment: Option<String>) -> Result<Blog, AppError> {
        // Unknown blog is reported before an empty comment
        if self.store.get_blog(id).await?.is_none() {
            return Err(DomainError::BlogNotFound(id.to_string()).into());
        }
        let comment = validate_comment(comment)?;

        self.store
            .add_comment(id, comment)
            .await?
            .ok_or_else(|| DomainError::BlogNotFound(id.to_string()).into())
    }

    /// Aggregate statistics over every stored blog
    pub async fn stats(&self) -> Result<BlogStats<Blog>, AppError> {
        let blogs = self.store.list_blogs().await?;
        Ok(BlogStats::compute(&blogs))
    }
}

fn require_user(context: &RequestContext) -> Result<&AuthUser, AppError> {
    context
        .user
        .as_ref()
        .ok_or_else(|| DomainError::InvalidToken.into())
}
