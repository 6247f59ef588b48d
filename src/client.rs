//! Blog API Client
//!
//! Typed HTTP client for the blog list API. Authentication is carried by an
//! explicit [`Session`] value returned from [`BlogClient::login`]; the client
//! itself holds no token.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::routes::{
    CommentRequest, CreateBlogRequest, LoginRequest, LoginResponse, StatsResponse,
};
use crate::domain::{Blog, BlogChanges};

/// Client errors
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Transport or decoding failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Status code of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
        }
    }
}

/// A logged-in user's credentials for authenticated calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            token: response.token,
            user_id: response.id,
            username: response.username,
            name: response.name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for `/api`
#[derive(Debug, Clone)]
pub struct BlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlogClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3003`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    fn authorized(builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(&session.token)
    }

    /// Exchange credentials for a session
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.url("/login")).json(&request).send().await?;
        let login: LoginResponse = json(response).await?;
        Ok(login.into())
    }

    pub async fn get_all(&self) -> Result<Vec<Blog>, ClientError> {
        let response = self.http.get(self.url("/blogs")).send().await?;
        json(response).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Blog, ClientError> {
        let response = self.http.get(self.url(&format!("/blogs/{}", id))).send().await?;
        json(response).await
    }

    pub async fn create(
        &self,
        session: &Session,
        blog: &CreateBlogRequest,
    ) -> Result<Blog, ClientError> {
        let builder = self.http.post(self.url("/blogs")).json(blog);
        let response = Self::authorized(builder, session).send().await?;
        json(response).await
    }

    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        changes: &BlogChanges,
    ) -> Result<Blog, ClientError> {
        let builder = self.http.put(self.url(&format!("/blogs/{}", id))).json(changes);
        let response = Self::authorized(builder, session).send().await?;
        json(response).await
    }

    /// Increment a blog's likes by one
    pub async fn like(&self, session: &Session, blog: &Blog) -> Result<Blog, ClientError> {
        let changes = BlogChanges {
            likes: Some(blog.likes + 1),
            ..Default::default()
        };
        self.update(session, blog.id, &changes).await
    }

    pub async fn delete(&self, session: &Session, id: Uuid) -> Result<(), ClientError> {
        let builder = self.http.delete(self.url(&format!("/blogs/{}", id)));
        let response = Self::authorized(builder, session).send().await?;
        check(response).await.map(|_| ())
    }

    pub async fn comment(&self, id: Uuid, comment: &str) -> Result<Blog, ClientError> {
        let request = CommentRequest {
            comment: Some(comment.to_string()),
        };
        let response = self
            .http
            .post(self.url(&format!("/blogs/{}/comments", id)))
            .json(&request)
            .send()
            .await?;
        json(response).await
    }

    pub async fn stats(&self) -> Result<StatsResponse, ClientError> {
        let response = self.http.get(self.url("/stats")).send().await?;
        json(response).await
    }
}

/// Turn non-success responses into [`ClientError::Api`]
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    tracing::debug!(status = %status, message = %message, "API request failed");
    Err(ClientError::Api { status, message })
}

async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json().await?)
}
