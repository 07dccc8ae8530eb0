pub mod auth;
pub mod response;

pub use auth::{ensure_owner, extract_bearer_token, AuthUser, BearerToken};
pub use response::{ApiResponse, ApiResult};
