//! Recall HTTP client implementation.

use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;

use recall_core::{DailyScore, Heatmap, Month, MonthlySummary, PracticeDate, RecentDay};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, Credentials, RecentResponse, RecordScoreRequest, ScoreUpdate, Session,
    TokenStatus, VerifyRequest,
};

/// Recall API client.
///
/// Account calls work without a token. Score calls need one, either from
/// [`RecallClient::with_token`] or from a session returned by `register` or
/// `login`.
#[derive(Debug, Clone)]
pub struct RecallClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RecallClient {
    /// Create a new recall client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the recall service (e.g., `"http://localhost:8001"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new recall client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Use `token` for score requests.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use the token from `session` for score requests.
    #[must_use]
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error
    /// (e.g. `409` when the email is taken).
    pub async fn register(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(&Credentials { email, password })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` for wrong credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&Credentials { email, password })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Check whether `token` is still valid.
    ///
    /// A rejected token is a normal answer (`valid == false`), not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error
    /// other than a token rejection.
    pub async fn verify(&self, token: &str) -> Result<TokenStatus, ClientError> {
        let response = self
            .client
            .post(self.url("/api/verify"))
            .json(&VerifyRequest { token })
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        self.handle_response(response).await
    }

    /// Record one practice session for `date` (the server's today when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the request fails or the server
    /// returns an error.
    pub async fn record_score(
        &self,
        score: f64,
        date: Option<PracticeDate>,
    ) -> Result<ScoreUpdate, ClientError> {
        let response = self
            .authorized(self.client.post(self.url("/api/scores")))?
            .json(&RecordScoreRequest { score, date })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// The record for one date, `None` if the user did not practice.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the request fails or the server
    /// returns an error.
    pub async fn daily(&self, date: PracticeDate) -> Result<Option<DailyScore>, ClientError> {
        let url = self.url(&format!("/api/scores/daily/{date}"));
        let response = self.authorized(self.client.get(url))?.send().await?;

        self.handle_response(response).await
    }

    /// The summary for one month.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the request fails or the server
    /// returns an error.
    pub async fn monthly(&self, month: Month) -> Result<MonthlySummary, ClientError> {
        let url = self.url(&format!("/api/scores/monthly/{month}"));
        let response = self.authorized(self.client.get(url))?.send().await?;

        self.handle_response(response).await
    }

    /// Best score per practiced day within `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the request fails or the server
    /// returns an error (`400` when `from > to`).
    pub async fn heatmap(
        &self,
        from: PracticeDate,
        to: PracticeDate,
    ) -> Result<Heatmap, ClientError> {
        let response = self
            .authorized(self.client.get(self.url("/api/scores/heatmap")))?
            .query(&[("from", from.to_string()), ("to", to.to_string())])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// One row per day ending at `end`, newest first. Server defaults apply
    /// to omitted arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if no token is set, the request fails or the server
    /// returns an error.
    pub async fn recent(
        &self,
        days: Option<u32>,
        end: Option<PracticeDate>,
    ) -> Result<Vec<RecentDay>, ClientError> {
        let mut query = Vec::new();
        if let Some(days) = days {
            query.push(("days", days.to_string()));
        }
        if let Some(end) = end {
            query.push(("end", end.to_string()));
        }

        let response = self
            .authorized(self.client.get(self.url("/api/scores/recent")))?
            .query(&query)
            .send()
            .await?;

        self.handle_response::<RecentResponse>(response)
            .await
            .map(|r| r.days)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| ClientError::Configuration("no session token set".into()))?;
        Ok(request.bearer_auth(token))
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(serde_json::from_slice(&body)?);
        }

        let error_body: Result<ApiErrorResponse, _> = serde_json::from_slice(&body);

        match error_body {
            Ok(api_error) if status == StatusCode::UNAUTHORIZED => {
                Err(ClientError::Unauthorized(api_error.error))
            }
            Ok(api_error) => {
                tracing::debug!(status = %status, error = %api_error.error, "Recall API error");
                Err(ClientError::Api {
                    code: api_error.code.unwrap_or_else(|| "unknown".to_string()),
                    message: api_error.error,
                    status: status.as_u16(),
                })
            }
            Err(_) if status == StatusCode::UNAUTHORIZED => {
                Err(ClientError::Unauthorized(format!("HTTP {status}")))
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
