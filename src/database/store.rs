use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Blog, BlogFields, PopulatedBlog, User, UserRecord, UserView};

/// Errors from a [`Store`] implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    /// A unique field already holds this value
    #[error("Duplicate value for {0}")]
    Duplicate(String),

    /// A write referenced a record that does not exist
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// The document store holding blogs and users.
///
/// Every method is a single independent operation. A user's blog list is
/// never stored: it is derived from the blogs' owner references whenever it
/// is read, so creating or deleting a blog is always one write.
#[async_trait]
pub trait Store: Send + Sync {
    /// All blogs in creation order with their owner inlined
    async fn list_blogs(&self) -> Result<Vec<PopulatedBlog>, StoreError>;

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError>;

    /// Insert a blog owned by `owner`. Fails with `MissingReference` if the owner is gone.
    async fn insert_blog(&self, owner: Uuid, fields: BlogFields) -> Result<Blog, StoreError>;

    /// Replace the mutable fields wholesale. `None` when the blog does not exist.
    async fn replace_blog(&self, id: Uuid, fields: BlogFields) -> Result<Option<Blog>, StoreError>;

    /// Returns whether a blog was removed
    async fn delete_blog(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Insert a user. Fails with `Duplicate("username")` on a taken username.
    async fn insert_user(&self, record: UserRecord) -> Result<User, StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// All users in creation order, each with the blogs they own
    async fn list_users(&self) -> Result<Vec<UserView>, StoreError>;

    /// Blogs owned by `owner` in creation order
    async fn blogs_by_owner(&self, owner: Uuid) -> Result<Vec<Blog>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Release connections; the store must not be used afterwards
    async fn close(&self) {}
}
