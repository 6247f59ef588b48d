//! PostgreSQL store
//!
//! Schema lives in `migrations/0001_init.sql`. Creation order is tracked by
//! the `seq` column, not timestamps.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{AuthUser, Blog, BlogChanges, BlogSummary, NewBlog, User, UserSummary};

use super::{BlogStore, NewUserRecord, StoreError};

type BlogRow = (
    Uuid,
    String,
    String,
    String,
    i64,
    Vec<String>,
    Option<Uuid>,
    Option<String>,
    Option<String>,
);

type UserRow = (Uuid, String, Option<String>, String);

const SELECT_BLOGS: &str = r#"
    SELECT b.id, b.title, b.author, b.url, b.likes, b.comments, u.id, u.username, u.name
    FROM blogs b
    LEFT JOIN users u ON u.id = b.user_id
"#;

fn blog_from_row(row: BlogRow) -> Blog {
    let (id, title, author, url, likes, comments, user_id, username, name) = row;

    let user = match (user_id, username) {
        (Some(id), Some(username)) => Some(UserSummary {
            id,
            username,
            name,
        }),
        _ => None,
    };

    Blog {
        id,
        title,
        author,
        url,
        likes,
        comments,
        user,
    }
}

fn user_from_row(row: UserRow, blogs: Vec<BlogSummary>) -> User {
    let (id, username, name, password_hash) = row;
    User {
        id,
        username,
        name,
        password_hash,
        blogs,
    }
}

/// Store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new PgStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Blog summaries grouped by owner, optionally limited to one owner
    async fn blog_summaries(
        &self,
        owner: Option<Uuid>,
    ) -> Result<HashMap<Uuid, Vec<BlogSummary>>, StoreError> {
        let rows: Vec<(Uuid, String, String, String, Uuid)> = sqlx::query_as(
            r#"
            SELECT id, title, author, url, user_id
            FROM blogs
            WHERE user_id IS NOT NULL AND ($1::uuid IS NULL OR user_id = $1)
            ORDER BY seq
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<BlogSummary>> = HashMap::new();
        for (id, title, author, url, user_id) in rows {
            grouped.entry(user_id).or_default().push(BlogSummary {
                id,
                title,
                author,
                url,
            });
        }
        Ok(grouped)
    }

    async fn user_with_blogs(&self, row: UserRow) -> Result<User, StoreError> {
        let mut blogs = self.blog_summaries(Some(row.0)).await?;
        let owned = blogs.remove(&row.0).unwrap_or_default();
        Ok(user_from_row(row, owned))
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let rows: Vec<BlogRow> = sqlx::query_as(&format!("{} ORDER BY b.seq", SELECT_BLOGS))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(blog_from_row).collect())
    }

    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let row: Option<BlogRow> = sqlx::query_as(&format!("{} WHERE b.id = $1", SELECT_BLOGS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(blog_from_row))
    }

    async fn insert_blog(&self, blog: NewBlog) -> Result<Blog, StoreError> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO blogs (id, title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id)
        .bind(&blog.title)
        .bind(&blog.author)
        .bind(&blog.url)
        .bind(blog.likes)
        .bind(blog.user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                StoreError::MissingReference(format!("user {:?}", blog.user_id))
            }
            _ => StoreError::Database(e),
        })?;

        self.get_blog(id)
            .await?
            .ok_or_else(|| StoreError::MissingReference(format!("blog {}", id)))
    }

    async fn update_blog(&self, id: Uuid, changes: &BlogChanges) -> Result<Option<Blog>, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE blogs
            SET
                title = COALESCE($2, title),
                author = COALESCE($3, author),
                url = COALESCE($4, url),
                likes = COALESCE($5, likes),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.author.as_deref())
        .bind(changes.url.as_deref())
        .bind(changes.likes)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.get_blog(id).await
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, StoreError> {
        let deleted = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn add_comment(&self, id: Uuid, comment: String) -> Result<Option<Blog>, StoreError> {
        let updated = sqlx::query(
            r#"
            UPDATE blogs
            SET comments = array_append(comments, $2), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(comment)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Ok(None);
        }
        self.get_blog(id).await
    }

    async fn insert_user(&self, user: NewUserRecord) -> Result<User, StoreError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, name, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, name, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, "username"))?;

        Ok(user_from_row(row, Vec::new()))
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut blogs = self.blog_summaries(None).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let owned = blogs.remove(&row.0).unwrap_or_default();
                user_from_row(row, owned)
            })
            .collect())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.user_with_blogs(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(self.user_with_blogs(row).await?)),
            None => Ok(None),
        }
    }

    async fn create_session(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token_hash, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token_hash)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, "token_hash"))?;

        Ok(())
    }

    async fn find_session_user(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AuthUser>, StoreError> {
        let row: Option<(Uuid, String)> = sqlx::query_as(
            r#"
            SELECT u.id, u.username
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token_hash = $1 AND s.expires_at > $2
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, username)| AuthUser { id, username }))
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        sqlx::query("TRUNCATE TABLE sessions, blogs, users CASCADE")
            .execute(&self.pool)
            .await?;

        tracing::warn!("All users, blogs and sessions removed");
        Ok(())
    }
}
