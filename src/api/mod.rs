//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::domain::credentials::DEFAULT_PASSWORD_COST;
use crate::handlers::{BlogHandler, SessionHandler, UserHandler};
use crate::store::BlogStore;

pub use routes::create_router;

/// Shared state for every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub token_ttl: Duration,
    /// bcrypt work factor for newly registered users
    pub password_cost: u32,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>, token_ttl: Duration) -> Self {
        Self {
            store,
            token_ttl,
            password_cost: DEFAULT_PASSWORD_COST,
        }
    }

    pub fn with_password_cost(mut self, password_cost: u32) -> Self {
        self.password_cost = password_cost;
        self
    }

    pub fn blogs(&self) -> BlogHandler {
        BlogHandler::new(self.store.clone())
    }

    pub fn users(&self) -> UserHandler {
        UserHandler::new(self.store.clone(), self.password_cost)
    }

    pub fn sessions(&self) -> SessionHandler {
        SessionHandler::new(self.store.clone(), self.token_ttl)
    }
}

/// Build the application router.
///
/// `testing` mounts `POST /api/testing/reset`.
pub fn build_router(state: AppState, testing: bool) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: logging -> auth -> handler
    let api_routes = create_router(testing)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
