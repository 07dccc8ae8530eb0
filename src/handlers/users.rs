// handlers/users.rs - /api/users resource

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::info;

use crate::auth::password::hash_password;
use crate::database::models::{UserInput, UserRecord, UserView};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /api/users - register an account
///
/// ```json
/// { "username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen" }
/// ```
///
/// Username and password need at least 3 characters and the username must
/// be unused. Responds 201 with the new user and an empty `blogs` list.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> ApiResult<UserView> {
    let Json(input) = payload?;
    let new_user = input.validate()?;

    // Hashing is CPU bound; keep it off the async workers
    let password = new_user.password;
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal_server_error("Failed to create user")
        })??;

    let user = state
        .store
        .insert_user(UserRecord {
            username: new_user.username,
            name: new_user.name,
            password_hash,
        })
        .await?;

    info!("Created user {}", user.username);
    Ok(ApiResponse::created(UserView::new(&user, Vec::new())))
}

/// GET /api/users - every user with the blogs they own
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<UserView>> {
    let users = state.store.list_users().await?;
    Ok(ApiResponse::success(users))
}
