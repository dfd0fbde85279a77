//! Service configuration.

use serde::Deserialize;
use std::path::Path;

/// Fallback signing secret for local development.
const DEV_JWT_SECRET: &str = "recall-dev-secret-change-me";

/// Which key-value backend the service stores data in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvBackendKind {
    /// In-process map; data is lost on restart.
    Memory,
    /// Hosted Redis-over-REST store.
    Rest,
    /// Local `RocksDB` directory (needs the `rocksdb-backend` feature).
    RocksDb,
}

impl KvBackendKind {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Some(Self::Memory),
            "rest" => Some(Self::Rest),
            "rocksdb" | "rocks" => Some(Self::RocksDb),
            _ => None,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8001").
    pub listen_addr: String,

    /// Storage backend (default: `Rest` when REST credentials are present,
    /// otherwise `Memory`).
    pub kv_backend: KvBackendKind,

    /// REST store URL.
    pub kv_rest_api_url: Option<String>,

    /// REST store bearer token.
    pub kv_rest_api_token: Option<String>,

    /// Path to the `RocksDB` data directory (default: "/data/recall").
    pub data_dir: String,

    /// HMAC secret for signing session tokens.
    pub jwt_secret: String,

    /// Session token lifetime in days (default: 7).
    pub token_ttl_days: i64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// REST store secrets file structure.
#[derive(Debug, Deserialize)]
struct KvSecrets {
    api_url: String,
    api_token: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let (kv_rest_api_url, kv_rest_api_token) = load_kv_secrets();

        let kv_backend = std::env::var("KV_BACKEND")
            .ok()
            .and_then(|v| {
                let kind = KvBackendKind::parse(&v);
                if kind.is_none() {
                    tracing::warn!(value = %v, "Unknown KV_BACKEND, falling back to default");
                }
                kind
            })
            .unwrap_or(if kv_rest_api_url.is_some() && kv_rest_api_token.is_some() {
                KvBackendKind::Rest
            } else {
                KvBackendKind::Memory
            });

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set - using development secret");
            DEV_JWT_SECRET.into()
        });

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8001".into()),
            kv_backend,
            kv_rest_api_url,
            kv_rest_api_token,
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/recall".into()),
            jwt_secret,
            token_ttl_days: std::env::var("JWT_EXPIRY_DAYS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(7),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64 * 1024),
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

/// Load REST store credentials from file or environment.
fn load_kv_secrets() -> (Option<String>, Option<String>) {
    let secret_paths = [".secrets/kv.json", "../.secrets/kv.json"];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<KvSecrets>(path) {
            tracing::info!(path = %path, "Loaded KV secrets from file");
            return (Some(secrets.api_url), Some(secrets.api_token));
        }
    }

    tracing::debug!("KV secrets file not found, using environment variables");
    (
        std::env::var("KV_REST_API_URL").ok(),
        std::env::var("KV_REST_API_TOKEN").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8001".into(),
            kv_backend: KvBackendKind::Memory,
            kv_rest_api_url: None,
            kv_rest_api_token: None,
            data_dir: "/data/recall".into(),
            jwt_secret: DEV_JWT_SECRET.into(),
            token_ttl_days: 7,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(KvBackendKind::parse("memory"), Some(KvBackendKind::Memory));
        assert_eq!(KvBackendKind::parse(" REST "), Some(KvBackendKind::Rest));
        assert_eq!(KvBackendKind::parse("rocksdb"), Some(KvBackendKind::RocksDb));
        assert_eq!(KvBackendKind::parse("redis"), None);
    }

    #[test]
    fn default_config_is_local() {
        let config = ServiceConfig::default();
        assert_eq!(config.kv_backend, KvBackendKind::Memory);
        assert_eq!(config.token_ttl_days, 7);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }
}
