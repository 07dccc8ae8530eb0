use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::blog::BlogSummary;
use super::{FieldErrors, ModelError};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 3;

/// A stored user account. Deliberately not `Serialize`: the password hash
/// must never leave the server, use [`UserView`] or [`UserSummary`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Identifying fields of a blog owner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
}

/// Outward representation of a user together with the blogs they own
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<BlogSummary>,
}

impl UserView {
    pub fn new(user: &User, blogs: Vec<BlogSummary>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            blogs,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInput {
    pub username: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Validated account request; the password is still plain text here
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub name: Option<String>,
    pub password: String,
}

/// Account ready for insertion
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
}

impl UserInput {
    pub fn validate(self) -> Result<NewUser, ModelError> {
        let mut field_errors = FieldErrors::new();

        let username = self.username.map(|u| u.trim().to_string()).unwrap_or_default();
        if username.chars().count() < MIN_USERNAME_LEN {
            field_errors.insert(
                "username".to_string(),
                format!("must be at least {} characters", MIN_USERNAME_LEN),
            );
        }

        let password = self.password.unwrap_or_default();
        if password.chars().count() < MIN_PASSWORD_LEN {
            field_errors.insert(
                "password".to_string(),
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }

        if !field_errors.is_empty() {
            return Err(ModelError::invalid("Invalid user", field_errors));
        }

        Ok(NewUser {
            username,
            name: self.name,
            password,
        })
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}
