//! API Integration Tests

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use bloglist::api::{build_router, AppState};
use bloglist::domain::blog::MAX_LIKES;
use bloglist::store::{BlogStore, MemoryStore};
use serde_json::{json, Value};

mod common;

use common::{create_user_and_login, seed_blogs, send, setup_app, INITIAL_BLOGS};

// =========================================================================
// Read: existing blogs
// =========================================================================

#[tokio::test]
async fn test_blogs_are_returned_as_json_with_id_field() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (status, body) = send(&app, "GET", "/api/blogs", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let blogs = body.as_array().unwrap();
    assert_eq!(blogs.len(), INITIAL_BLOGS.len());
    for blog in blogs {
        assert!(blog["id"].is_string());
        assert!(blog.get("_id").is_none());
        assert_eq!(blog["user"]["username"], "root");
    }
}

#[tokio::test]
async fn test_get_single_blog_and_unknown_id() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (_, blogs) = send(&app, "GET", "/api/blogs", None, None).await;
    let id = blogs[0]["id"].as_str().unwrap();

    let (status, blog) = send(&app, "GET", &format!("/api/blogs/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blog["title"], "Go To Statement Considered Harmful");

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/blogs/{}", uuid::Uuid::new_v4()),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "blog not found");
}

// =========================================================================
// Create: new blogs
// =========================================================================

#[tokio::test]
async fn test_create_blog() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;

    let new_blog = json!({
        "title": "Dancing in the rain",
        "author": "Chimpi T. Chompa",
        "url": "https://chimpichompa.com/",
    });
    let (status, created) = send(&app, "POST", "/api/blogs", Some(&token), Some(new_blog)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["likes"], 0);
    assert_eq!(created["comments"], json!([]));

    let (_, blogs) = send(&app, "GET", "/api/blogs", None, None).await;
    let titles: Vec<&str> = blogs
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Dancing in the rain"]);

    // Blog shows up under its owner
    let (_, users) = send(&app, "GET", "/api/users", None, None).await;
    assert_eq!(users[0]["blogs"][0]["title"], "Dancing in the rain");
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_blog_missing_fields() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({ "author": "Chimpi T. Chompa", "likes": 13 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title, Url and Author are required fields");

    let (_, blogs) = send(&app, "GET", "/api/blogs", None, None).await;
    assert!(blogs.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_blog_requires_valid_token() {
    let (app, _) = setup_app();
    let body = json!({ "title": "t", "author": "a", "url": "u" });

    let (status, body_without) = send(&app, "POST", "/api/blogs", None, Some(body.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body_without["error"], "token missing or invalid");

    let (status, _) = send(&app, "POST", "/api/blogs", Some("bogus"), Some(body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =========================================================================
// Update & comments
// =========================================================================

#[tokio::test]
async fn test_update_likes() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (_, blogs) = send(&app, "GET", "/api/blogs", None, None).await;
    let id = blogs[0]["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/blogs/{}", id),
        Some(&token),
        Some(json!({ "likes": 38 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["likes"], 38);
    assert_eq!(updated["title"], "Go To Statement Considered Harmful");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/blogs/{}", id),
        Some(&token),
        Some(json!({ "likes": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_add_comment() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (_, blogs) = send(&app, "GET", "/api/blogs", None, None).await;
    let id = blogs[1]["id"].as_str().unwrap();
    let uri = format!("/api/blogs/{}/comments", id);

    let (status, blog) = send(&app, "POST", &uri, None, Some(json!({ "comment": "classic" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(blog["comments"], json!(["classic"]));

    let (status, body) = send(&app, "POST", &uri, None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Comment is a required field");
}

// =========================================================================
// Delete
// =========================================================================

#[tokio::test]
async fn test_delete_blog_by_creator() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "Dancing in the rain", "author": "Chimpi T. Chompa", "url": "https://chimpichompa.com/" })),
    )
    .await;
    let uri = format!("/api/blogs/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_blog_by_other_user_is_forbidden() {
    let (app, _) = setup_app();
    let owner = create_user_and_login(&app, "itesting").await;
    let other = create_user_and_login(&app, "secondtesting").await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/blogs",
        Some(&owner),
        Some(json!({ "title": "t", "author": "a", "url": "u" })),
    )
    .await;
    let uri = format!("/api/blogs/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "only creator can delete post");

    let (status, _) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
}

// =========================================================================
// Users
// =========================================================================

async fn create_user(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    send(app, "POST", "/api/users", None, Some(body)).await
}

#[tokio::test]
async fn test_create_user_validation_messages() {
    let (app, _) = setup_app();

    let cases = [
        (json!({ "username": "", "name": "testing", "password": "Chimichurri1" }), "Username is required"),
        (json!({ "username": "testing ", "name": "x", "password": "" }), "Password is required"),
        (json!({ "username": "valid", "password": "Short1" }), "Password must be at least 8 characters long"),
        (json!({ "username": "valid", "password": "lowercase1" }), "Password must contain at least one uppercase letter"),
        (json!({ "username": "valid", "password": "NoNumbersHere" }), "Password must contain at least one number"),
        (json!({ "username": "{\"test\"}", "password": "Testing1" }), "Username contains invalid characters"),
    ];

    for (body, expected) in cases {
        let (status, response) = create_user(&app, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], expected);
    }

    let (status, response) = create_user(&app, json!({ "username": "tes", "password": "Testing1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("is shorter than the minimum allowed length"));

    let (_, users) = send(&app, "GET", "/api/users", None, None).await;
    assert!(users.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_user_and_duplicate() {
    let (app, _) = setup_app();
    let body = json!({ "username": "ivanpo1", "name": "Ivan Poppino", "password": "Chimichurri1" });

    let (status, user) = create_user(&app, body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "ivanpo1");

    let (status, response) = create_user(&app, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "expected username to be unique");

    let uri = format!("/api/users/{}", user["id"].as_str().unwrap());
    let (status, fetched) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Ivan Poppino");
}

#[tokio::test]
async fn test_login_with_wrong_credentials() {
    let (app, _) = setup_app();
    create_user_and_login(&app, "itesting").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/login",
        None,
        Some(json!({ "username": "itesting", "password": "WrongPassword" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid username or password");
}

// =========================================================================
// Stats
// =========================================================================

#[tokio::test]
async fn test_stats_empty() {
    let (app, _) = setup_app();

    let (status, stats) = send(&app, "GET", "/api/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_likes"], 0);
    assert!(stats["favorite_blog"].is_null());
    assert!(stats["most_blogs"].is_null());
    assert!(stats["most_likes"].is_null());
}

#[tokio::test]
async fn test_stats_over_initial_blogs() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (status, stats) = send(&app, "GET", "/api/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_likes"], 36);
    assert_eq!(stats["favorite_blog"]["title"], "First class tests");
    assert_eq!(stats["most_blogs"], json!({ "author": "Robert C. Martin", "blogs": 3 }));
    assert_eq!(stats["most_likes"], json!({ "author": "Edsger W. Dijkstra", "likes": 12 }));
}

#[tokio::test]
async fn test_like_counts_are_bounded_and_stats_stay_available() {
    let (app, _) = setup_app();
    let token = create_user_and_login(&app, "root").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "t", "author": "a", "url": "u", "likes": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut ids = Vec::new();
    for title in ["first", "second"] {
        let (status, blog) = send(
            &app,
            "POST",
            "/api/blogs",
            Some(&token),
            Some(json!({ "title": title, "author": "Prolific", "url": "u", "likes": MAX_LIKES })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(blog["id"].as_str().unwrap().to_string());
    }

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/blogs/{}", ids[0]),
        Some(&token),
        Some(json!({ "likes": i64::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, stats) = send(&app, "GET", "/api/stats", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_likes"], 2 * MAX_LIKES);
    assert_eq!(stats["most_likes"], json!({ "author": "Prolific", "likes": 2 * MAX_LIKES }));
    assert_eq!(stats["favorite_blog"]["title"], "first");
}

// =========================================================================
// Testing reset & health
// =========================================================================

#[tokio::test]
async fn test_reset_endpoint() {
    let (app, store) = setup_app();
    let token = create_user_and_login(&app, "root").await;
    seed_blogs(&app, &token).await;

    let (status, _) = send(&app, "POST", "/api/testing/reset", None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(store.list_blogs().await.unwrap().is_empty());
    assert!(store.list_users().await.unwrap().is_empty());

    // Old token no longer resolves
    let (status, _) = send(
        &app,
        "POST",
        "/api/blogs",
        Some(&token),
        Some(json!({ "title": "t", "author": "a", "url": "u" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reset_not_mounted_outside_test_environment() {
    let store: Arc<dyn BlogStore> = Arc::new(MemoryStore::new());
    let app = build_router(AppState::new(store, Duration::from_secs(60)), false);

    let (status, _) = send(&app, "POST", "/api/testing/reset", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::util::ServiceExt;

    let (app, _) = setup_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"OK");
}
