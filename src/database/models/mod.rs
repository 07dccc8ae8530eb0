pub mod blog;
pub mod user;

use std::collections::HashMap;
use thiserror::Error;

pub use blog::{Blog, BlogFields, BlogInput, BlogSummary, PopulatedBlog};
pub use user::{LoginRequest, LoginResponse, NewUser, User, UserInput, UserRecord, UserSummary, UserView};

/// Field name -> human readable problem
pub type FieldErrors = HashMap<String, String>;

/// Errors raised while turning request bodies into model values
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{message}")]
    Invalid {
        message: String,
        field_errors: FieldErrors,
    },
}

impl ModelError {
    pub fn invalid(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ModelError::Invalid {
            message: message.into(),
            field_errors,
        }
    }
}
