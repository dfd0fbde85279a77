//! Request and response bodies of the recall API.

use serde::{Deserialize, Serialize};

use recall_core::{PracticeDate, RecentDay};

/// Email and password, for register and login.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    /// Account email.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
}

/// Account fields returned with a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// User ID, when the server includes it.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Account email.
    pub email: String,
}

/// A signed-in session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Bearer token for score requests.
    pub token: String,
    /// The account.
    pub user: Account,
}

/// Result of checking a token.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenStatus {
    /// Whether the token is valid.
    pub valid: bool,
    /// The token owner, when valid.
    #[serde(default)]
    pub user: Option<Account>,
    /// Rejection reason, when invalid.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecordScoreRequest {
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PracticeDate>,
}

/// Result of recording a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ScoreUpdate {
    /// Always `true` for an accepted request.
    pub success: bool,
    /// Whether the daily best changed.
    pub updated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecentResponse {
    pub days: Vec<RecentDay>,
}

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
}
