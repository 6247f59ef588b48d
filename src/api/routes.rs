//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Blog, BlogChanges, BlogStats, RequestContext, User};
use crate::error::AppError;
use crate::handlers::{CreateBlogCommand, CreateUserCommand, LoginCommand, LoginResult};

use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub type LoginResponse = LoginResult;

pub type StatsResponse = BlogStats<Blog>;

// =========================================================================
// API Router
// =========================================================================

/// Create the API router. `testing` mounts the reset endpoint.
pub fn create_router(testing: bool) -> Router<AppState> {
    let router = Router::new()
        // Blogs
        .route("/blogs", get(list_blogs).post(create_blog))
        .route(
            "/blogs/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
        .route("/blogs/:id/comments", post(add_comment))
        // Statistics
        .route("/stats", get(get_stats))
        // Users
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user))
        // Authentication
        .route("/login", post(login));

    if testing {
        router.route("/testing/reset", post(reset))
    } else {
        router
    }
}

// =========================================================================
// Blogs
// =========================================================================

/// GET /blogs
async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>, AppError> {
    Ok(Json(state.blogs().list().await?))
}

/// GET /blogs/:id
async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs().get(id).await?))
}

/// POST /blogs
async fn create_blog(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    Json(request): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    let command = CreateBlogCommand {
        title: request.title,
        author: request.author,
        url: request.url,
        likes: request.likes,
    };

    let blog = state.blogs().create(command, &context).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /blogs/:id
async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(context): Extension<RequestContext>,
    Json(changes): Json<BlogChanges>,
) -> Result<Json<Blog>, AppError> {
    Ok(Json(state.blogs().update(id, changes, &context).await?))
}

/// DELETE /blogs/:id
async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(context): Extension<RequestContext>,
) -> Result<StatusCode, AppError> {
    state.blogs().delete(id, &context).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /blogs/:id/comments
async fn add_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<Blog>), AppError> {
    let blog = state.blogs().comment(id, request.comment).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// GET /stats
async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(state.blogs().stats().await?))
}

// =========================================================================
// Users
// =========================================================================

/// POST /users
async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let command = CreateUserCommand {
        username: request.username,
        name: request.name,
        password: request.password,
    };

    let user = state.users().register(command).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users().list().await?))
}

/// GET /users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users().get(id).await?))
}

// =========================================================================
// Authentication
// =========================================================================

/// POST /login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let command = LoginCommand::new(request.username, request.password);
    Ok(Json(state.sessions().login(command).await?))
}

// =========================================================================
// Testing
// =========================================================================

/// POST /testing/reset
async fn reset(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}
