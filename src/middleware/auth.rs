use axum::{
    async_trait,
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::database::models::{Blog, User};
use crate::error::ApiError;
use crate::state::AppState;

/// Raw bearer credential found on the request, not yet verified
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BearerToken(pub String);

/// Middleware that attaches the bearer credential, if any, to the request.
/// Never rejects: handlers that need an identity ask for [`AuthUser`].
pub async fn extract_bearer_token(mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token_from_headers(request.headers()) {
        request.extensions_mut().insert(token);
    }
    next.run(request).await
}

/// `Authorization: Bearer <token>` -> `<token>`; anything else is ignored
pub fn bearer_token_from_headers(headers: &HeaderMap) -> Option<BearerToken> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(BearerToken(token.to_string()))
}

/// The user behind a verified bearer token.
///
/// Declaring this as a handler argument makes the route require
/// authentication: the token attached by [`extract_bearer_token`] is
/// verified and resolved against the store, or the request fails with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .extensions
            .get::<BearerToken>()
            .ok_or_else(|| ApiError::unauthorized("token missing"))?;

        let claims = state.tokens.verify(&token.0).map_err(|e| {
            warn!("Rejected bearer token: {}", e);
            ApiError::from(e)
        })?;

        let user = state.store.find_user(claims.sub).await?.ok_or_else(|| {
            warn!("Token subject {} no longer exists", claims.sub);
            ApiError::unauthorized("token invalid")
        })?;

        debug!("Authenticated request as {}", user.username);
        Ok(AuthUser(user))
    }
}

/// Only the owner may change or remove a blog
pub fn ensure_owner(user: &User, blog: &Blog) -> Result<(), ApiError> {
    if blog.owner_id == user.id {
        Ok(())
    } else {
        warn!("User {} is not the owner of blog {}", user.username, blog.id);
        Err(ApiError::forbidden("only the owner can modify this blog"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::Utc;
    use uuid::Uuid;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token_from_headers(&headers("Bearer abc.def.ghi")),
            Some(BearerToken("abc.def.ghi".to_string()))
        );
    }

    #[test]
    fn ignores_other_schemes_and_empty_tokens() {
        assert_eq!(bearer_token_from_headers(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(bearer_token_from_headers(&headers("Bearer   ")), None);
        assert_eq!(bearer_token_from_headers(&headers("bearer abc")), None);
        assert_eq!(bearer_token_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn ownership_guard() {
        let owner = User {
            id: Uuid::new_v4(),
            username: "owner".to_string(),
            name: None,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let stranger = User {
            id: Uuid::new_v4(),
            username: "stranger".to_string(),
            ..owner.clone()
        };
        let blog = Blog {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            author: None,
            url: "u".to_string(),
            likes: 0,
            owner_id: owner.id,
            created_at: Utc::now(),
        };

        assert!(ensure_owner(&owner, &blog).is_ok());
        let err = ensure_owner(&stranger, &blog).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
