// handlers/blogs.rs - /api/blogs resource
//
// List and get are public. Create, update and delete need an `AuthUser`,
// and update/delete also pass the ownership guard before touching the store.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::database::models::{Blog, BlogInput, PopulatedBlog};
use crate::error::ApiError;
use crate::middleware::{ensure_owner, ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /api/blogs - every blog with its owner inlined
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<PopulatedBlog>> {
    let blogs = state.store.list_blogs().await?;
    Ok(ApiResponse::success(blogs))
}

/// GET /api/blogs/:id
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<PopulatedBlog> {
    let Path(id) = path?;
    let blog = find_or_404(&state, id).await?;

    let owner = state
        .store
        .find_user(blog.owner_id)
        .await?
        .ok_or_else(|| {
            tracing::error!("Blog {} references missing owner {}", blog.id, blog.owner_id);
            ApiError::internal_server_error("blog owner is missing")
        })?;

    Ok(ApiResponse::success(PopulatedBlog::new(blog, owner.summary())))
}

/// POST /api/blogs - create a blog owned by the caller
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    payload: Result<Json<BlogInput>, JsonRejection>,
) -> ApiResult<Blog> {
    let Json(input) = payload?;
    let fields = input.validate()?;

    // The owner's blog list is derived from this row's owner reference,
    // so this single insert is the whole operation.
    let blog = state.store.insert_blog(user.id, fields).await?;

    info!("User {} created blog {}", user.username, blog.id);
    Ok(ApiResponse::created(blog))
}

/// PUT /api/blogs/:id - replace title, author, url and likes
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BlogInput>, JsonRejection>,
) -> ApiResult<Blog> {
    let Path(id) = path?;
    let Json(input) = payload?;
    let fields = input.validate()?;

    let blog = find_or_404(&state, id).await?;
    ensure_owner(&user, &blog)?;

    let updated = state
        .store
        .replace_blog(id, fields)
        .await?
        .ok_or_else(|| blog_not_found(id))?;

    info!("User {} updated blog {}", user.username, id);
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/blogs/:id - owner only
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = path?;

    let blog = find_or_404(&state, id).await?;
    ensure_owner(&user, &blog)?;

    if !state.store.delete_blog(id).await? {
        // Removed by a concurrent request between lookup and delete
        return Err(blog_not_found(id));
    }

    info!("User {} deleted blog {}", user.username, id);
    Ok(ApiResponse::no_content())
}

async fn find_or_404(state: &AppState, id: Uuid) -> Result<Blog, ApiError> {
    state
        .store
        .find_blog(id)
        .await?
        .ok_or_else(|| blog_not_found(id))
}

fn blog_not_found(id: Uuid) -> ApiError {
    ApiError::not_found(format!("blog {} not found", id))
}
