// handlers/login.rs - POST /api/login

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

use crate::auth::password::verify_password;
use crate::database::models::{LoginRequest, LoginResponse};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Exchange a username and password for a bearer token.
///
/// Unknown users and wrong passwords get the same 401 so the response does
/// not reveal which usernames exist.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;

    let user = state.store.find_user_by_username(&request.username).await?;

    let authenticated = match &user {
        Some(user) => {
            let password = request.password;
            let password_hash = user.password_hash.clone();
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await
                .map_err(|e| {
                    tracing::error!("Password verification task failed: {}", e);
                    ApiError::internal_server_error("Failed to log in")
                })??
        }
        None => false,
    };

    let user = match user {
        Some(user) if authenticated => user,
        _ => {
            warn!("Failed login for {}", request.username);
            return Err(ApiError::unauthorized("invalid username or password"));
        }
    };

    let token = state.tokens.issue(&user)?;

    info!("User {} logged in", user.username);
    Ok(ApiResponse::success(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
