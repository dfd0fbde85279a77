//! Account handlers: registration, login and token verification.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use recall_core::{normalize_email, validate_email, validate_password, User};

use crate::crypto::{hash_password, verify_password};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::state::AppState;

/// Register/login request body.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    /// Account email.
    #[serde(default)]
    pub email: Option<String>,
    /// Plain-text password.
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Both fields present and non-empty, email normalized.
    fn into_parts(self) -> Result<(String, String), ApiError> {
        match (self.email, self.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                Ok((normalize_email(&email), password))
            }
            _ => Err(ApiError::BadRequest(
                "Email and password are required".into(),
            )),
        }
    }
}

/// Public account fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBody {
    /// User ID.
    pub user_id: String,
    /// Account email.
    pub email: String,
}

impl From<&User> for AccountBody {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.to_string(),
            email: user.email.clone(),
        }
    }
}

/// Register/login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Session token.
    pub token: String,
    /// The account.
    pub user: AccountBody,
}

/// Create an account and sign the caller in.
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (email, password) = body.into_parts()?;
    validate_email(&email)?;
    validate_password(&password)?;

    if state.users.get_by_email(&email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))??;

    let user = User::new(&email, password_hash);
    state.users.put(&user).await?;

    let token = state.tokens.issue(&user.email)?;

    tracing::info!(user_id = %user.user_id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: AccountBody::from(&user),
        }),
    ))
}

/// Exchange email and password for a session token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<CredentialsRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (email, password) = body.into_parts()?;
    validate_email(&email)?;

    let user = state
        .users
        .get_by_email(&email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let stored_hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?;

    if !valid {
        tracing::info!(user_id = %user.user_id, "Login rejected");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.email)?;

    tracing::debug!(user_id = %user.user_id, "Login succeeded");

    Ok(Json(AuthResponse {
        token,
        user: AccountBody::from(&user),
    }))
}

/// Verify request body.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    /// Token to check.
    #[serde(default)]
    pub token: Option<String>,
}

/// Verified token owner.
#[derive(Debug, Serialize)]
pub struct VerifiedUser {
    /// Account email.
    pub email: String,
}

/// Verify response, also used for the 401 body.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    /// Whether the token is valid.
    pub valid: bool,
    /// The token owner, when valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<VerifiedUser>,
    /// Why the token was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check whether a session token is still valid.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody<VerifyRequest>,
) -> Result<(StatusCode, Json<VerifyResponse>), ApiError> {
    let token = body
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Token is required".into()))?;

    let response = match state.tokens.verify(&token) {
        Ok(claims) => (
            StatusCode::OK,
            VerifyResponse {
                valid: true,
                user: Some(VerifiedUser {
                    email: claims.email,
                }),
                error: None,
            },
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            VerifyResponse {
                valid: false,
                user: None,
                error: Some("Invalid or expired token".into()),
            },
        ),
    };

    Ok((response.0, Json(response.1)))
}
