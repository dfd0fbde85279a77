//! Hosted key-value backend speaking the Redis-over-REST protocol.
//!
//! Each operation is one `POST` to the base URL with a bearer token and a
//! JSON array holding the Redis command, e.g. `["GET", "key"]`. The reply is
//! `{"result": ...}` on success or `{"error": "..."}` on failure. Values are
//! stored as JSON text, so a `GET` result is a string that is parsed back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::KvStore;

/// Request timeout for a single command.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Reply envelope.
#[derive(Debug, Deserialize)]
struct CommandResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// REST key-value client.
#[derive(Debug, Clone)]
pub struct RestKv {
    client: Client,
    base_url: String,
    token: String,
}

impl RestKv {
    /// Create a client for the store at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(COMMAND_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Backend(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Run one command and return its `result`.
    async fn command(&self, args: &[&str]) -> Result<Value> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.token)
            .json(args)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, command = %args[0], "KV request failed");
                StoreError::Backend(e.to_string())
            })?;

        let status = response.status();
        let body: CommandResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, %status, "KV response was not valid JSON");
            StoreError::Backend(format!("unreadable response (HTTP {status})"))
        })?;

        if let Some(error) = body.error {
            tracing::error!(error = %error, %status, command = %args[0], "KV command rejected");
            return Err(StoreError::Backend(error));
        }
        if !status.is_success() {
            return Err(StoreError::Backend(format!("HTTP {status}")));
        }

        Ok(body.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl KvStore for RestKv {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.command(&["GET", key]).await? {
            Value::Null => Ok(None),
            // Values written by other clients may be plain strings, not JSON text.
            Value::String(raw) => Ok(Some(
                serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
            )),
            other => Ok(Some(other)),
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let encoded = serde_json::to_string(&value)?;
        self.command(&["SET", key, &encoded]).await?;
        tracing::trace!(key = %key, "KV value written");
        Ok(())
    }
}
