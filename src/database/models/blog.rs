use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{FieldErrors, ModelError};
use crate::database::models::user::UserSummary;

/// A stored blog as it lives in the `blogs` collection.
///
/// Serializes with the owner reference under `user`; the storage timestamp
/// stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Blog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    #[serde(rename = "user")]
    pub owner_id: Uuid,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

/// Blog with its owner's identifying fields inlined, as returned by list and get
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulatedBlog {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    pub user: UserSummary,
}

impl PopulatedBlog {
    pub fn new(blog: Blog, user: UserSummary) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user,
        }
    }
}

/// Blog without owner, as nested under a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogSummary {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl From<Blog> for BlogSummary {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// Raw request body for creating or replacing a blog
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub url: Option<String>,
    pub likes: Option<i64>,
}

/// The four mutable fields of a blog, validated
#[derive(Debug, Clone, PartialEq)]
pub struct BlogFields {
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
}

impl BlogInput {
    /// Check required fields and apply defaults. `likes` falls back to 0.
    pub fn validate(self) -> Result<BlogFields, ModelError> {
        let mut field_errors = FieldErrors::new();

        let title = required(self.title, "title", &mut field_errors);
        let url = required(self.url, "url", &mut field_errors);

        let likes = self.likes.unwrap_or(0);
        if likes < 0 {
            field_errors.insert("likes".to_string(), "must not be negative".to_string());
        }

        match (title, url) {
            (Some(title), Some(url)) if field_errors.is_empty() => Ok(BlogFields {
                title,
                author: self.author,
                url,
                likes,
            }),
            _ => Err(ModelError::invalid("Invalid blog", field_errors)),
        }
    }
}

fn required(value: Option<String>, field: &str, field_errors: &mut FieldErrors) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            field_errors.insert(field.to_string(), "This field is required".to_string());
            None
        }
    }
}
