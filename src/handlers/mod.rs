// handlers/mod.rs
//
// blogs  - /api/blogs, public reads, authenticated and owner-checked writes
// users  - /api/users, account registration and listing
// login  - /api/login, credential exchange for a bearer token
// health - /health
pub mod blogs;
pub mod health;
pub mod login;
pub mod users;

use crate::error::ApiError;

/// Fallback for routes that match nothing
pub async fn unknown_endpoint() -> ApiError {
    ApiError::not_found("unknown endpoint")
}
