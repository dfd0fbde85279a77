//! Authentication extractor.
//!
//! Authenticated endpoints take `Authorization: Bearer <token>`. The token's
//! email is resolved to a stored account, whose user id scopes every score
//! key the request touches.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use recall_core::UserId;

use crate::error::ApiError;
use crate::state::AppState;

/// An authenticated user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user ID.
    pub user_id: UserId,
    /// The account email from the token.
    pub email: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?;
        let claims = state.tokens.verify(token)?;

        let user = state
            .users
            .get_by_email(&claims.email)
            .await?
            .ok_or_else(|| {
                tracing::debug!(email = %claims.email, "Token for unknown account");
                ApiError::Unauthorized
            })?;

        Ok(AuthUser {
            user_id: user.user_id,
            email: user.email,
        })
    }
}

/// Extract the token from an `Authorization: Bearer` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
