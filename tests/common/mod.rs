//! Common test utilities

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use bloglist::api::{build_router, AppState};
use bloglist::domain::credentials::MIN_PASSWORD_COST;
use bloglist::store::{BlogStore, MemoryStore};
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub const PASSWORD: &str = "Testing1";

/// (title, author, url, likes)
pub const INITIAL_BLOGS: &[(&str, &str, &str, i64)] = &[
    ("Go To Statement Considered Harmful", "Edsger W. Dijkstra", "https://homepages.cwi.nl/~storm/teaching/reader/Dijkstra68.pdf", 5),
    ("Canonical string reduction", "Edsger W. Dijkstra", "http://www.cs.utexas.edu/~EWD/transcriptions/EWD08xx/EWD808.html", 7),
    ("First class tests", "Robert C. Martin", "http://blog.cleancoder.com/uncle-bob/2017/05/05/TestDefinitions.htmll", 12),
    ("TDD harms architecture", "Robert C. Martin", "http://blog.cleancoder.com/uncle-bob/2017/03/03/TDD-Harms-Architecture.html", 0),
    ("Type wars", "Robert C. Martin", "http://blog.cleancoder.com/uncle-bob/2016/05/01/TypeWars.html", 0),
    ("React patterns", "Michael Chan", "https://reactpatterns.com/", 12),
];

/// Router over a fresh in-memory store, with the reset endpoint mounted
pub fn setup_app() -> (Router, Arc<dyn BlogStore>) {
    let store: Arc<dyn BlogStore> = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), Duration::from_secs(3600))
        .with_password_cost(MIN_PASSWORD_COST);
    (build_router(state, true), store)
}

/// Send a JSON request and return status plus parsed body (`Null` when empty)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Register a user and log in, returning the token
pub async fn create_user_and_login(app: &Router, username: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(json!({ "username": username, "name": "Test User", "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "user creation failed");

    let (status, body) = send(
        app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed");

    body["token"].as_str().unwrap().to_string()
}

/// Create the initial blog set through the API
pub async fn seed_blogs(app: &Router, token: &str) {
    for (title, author, url, likes) in INITIAL_BLOGS {
        let (status, _) = send(
            app,
            "POST",
            "/api/blogs",
            Some(token),
            Some(json!({ "title": title, "author": author, "url": url, "likes": likes })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
}
