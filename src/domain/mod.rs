//! Domain module
//!
//! Core domain types and business logic.

pub mod blog;
pub mod context;
pub mod credentials;
pub mod error;
pub mod stats;
pub mod user;

pub use blog::{Blog, BlogChanges, NewBlog, UserSummary};
pub use context::{AuthUser, RequestContext};
pub use error::DomainError;
pub use stats::{AuthorBlogs, AuthorLikes, BlogRecord, BlogStats};
pub use user::{BlogSummary, NewUser, User};
