//! Command Handlers module
//!
//! Handlers that orchestrate business operations.
//! Each handler coordinates domain validation and the store.

mod blog_handler;
mod commands;
mod session_handler;
mod user_handler;

pub use blog_handler::BlogHandler;
pub use commands::*;
pub use session_handler::SessionHandler;
pub use user_handler::UserHandler;
