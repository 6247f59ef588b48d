//! bloglist Library
//!
//! Blog list backend: REST API, storage, authentication, blog statistics
//! and a typed client. Re-exports modules for integration testing and
//! external use.

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod jobs;
pub mod store;

mod error;

pub use config::Config;
pub use domain::stats::{favorite_blog, most_blogs, most_likes, total_likes};
pub use domain::{AuthorBlogs, AuthorLikes, Blog, BlogRecord, BlogStats, DomainError};
pub use error::AppError;
