use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{
    Blog, BlogFields, BlogSummary, PopulatedBlog, User, UserRecord, UserView,
};
use crate::database::store::{Store, StoreError};

/// In-process store used by `--in-memory` runs and the test suite.
/// Vectors keep insertion order, which is the listing order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    blogs: Vec<Blog>,
}

impl Collections {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_blogs(&self) -> Result<Vec<PopulatedBlog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .blogs
            .iter()
            .filter_map(|blog| {
                let owner = inner.user(blog.owner_id)?;
                Some(PopulatedBlog::new(blog.clone(), owner.summary()))
            })
            .collect())
    }

    async fn find_blog(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn insert_blog(&self, owner: Uuid, fields: BlogFields) -> Result<Blog, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.user(owner).is_none() {
            return Err(StoreError::MissingReference("user".to_string()));
        }

        let blog = Blog {
            id: Uuid::new_v4(),
            title: fields.title,
            author: fields.author,
            url: fields.url,
            likes: fields.likes,
            owner_id: owner,
            created_at: Utc::now(),
        };
        inner.blogs.push(blog.clone());
        Ok(blog)
    }

    async fn replace_blog(&self, id: Uuid, fields: BlogFields) -> Result<Option<Blog>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(blog) = inner.blogs.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        blog.title = fields.title;
        blog.author = fields.author;
        blog.url = fields.url;
        blog.likes = fields.likes;
        Ok(Some(blog.clone()))
    }

    async fn delete_blog(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.blogs.len();
        inner.blogs.retain(|b| b.id != id);
        Ok(inner.blogs.len() < before)
    }

    async fn insert_user(&self, record: UserRecord) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.username == record.username) {
            return Err(StoreError::Duplicate("username".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: record.username,
            name: record.name,
            password_hash: record.password_hash,
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.user(id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserView>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .iter()
            .map(|user| {
                let blogs = inner
                    .blogs
                    .iter()
                    .filter(|b| b.owner_id == user.id)
                    .cloned()
                    .map(BlogSummary::from)
                    .collect();
                UserView::new(user, blogs)
            })
            .collect())
    }

    async fn blogs_by_owner(&self, owner: Uuid) -> Result<Vec<Blog>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .blogs
            .iter()
            .filter(|b| b.owner_id == owner)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
