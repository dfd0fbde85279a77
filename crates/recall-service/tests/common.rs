//! Common test utilities for recall integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

use recall_core::FixedClock;
use recall_service::{create_router, AppState, KvBackendKind, ServiceConfig};
use recall_store::{KvStore, MemoryKv};

/// The harness clock reads 2024-03-15 12:00 UTC.
pub const TODAY: &str = "2024-03-15";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The backing store, for inspecting raw keys.
    pub kv: Arc<MemoryKv>,
}

impl TestHarness {
    /// Create a new test harness with an empty in-memory store.
    pub fn new() -> Self {
        Self::wrapping(|kv| kv as Arc<dyn KvStore>)
    }

    /// Create a harness whose service talks to `wrap(kv)` instead of the
    /// in-memory store itself.
    pub fn wrapping(wrap: impl FnOnce(Arc<MemoryKv>) -> Arc<dyn KvStore>) -> Self {
        let kv = Arc::new(MemoryKv::new());

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            kv_backend: KvBackendKind::Memory,
            kv_rest_api_url: None,
            kv_rest_api_token: None,
            data_dir: String::new(),
            jwt_secret: "test-secret".into(),
            token_ttl_days: 7,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        };

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap());
        let state = AppState::with_clock(wrap(kv.clone()), config, Arc::new(clock));
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server, kv }
    }

    /// Register an account and return its register response body.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/register")
            .json(&json!({ "email": email, "password": password }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    /// Register a fresh account and return an `Authorization` header value.
    pub async fn signed_in(&self, email: &str) -> HeaderValue {
        let body = self.register(email, "secret-pass").await;
        let token = body["token"].as_str().expect("token in register response");
        bearer(token)
    }

    /// Post a score for `date` (today when `None`) and return the body.
    pub async fn record(&self, auth: &HeaderValue, score: f64, date: Option<&str>) -> Value {
        let mut body = json!({ "score": score });
        if let Some(date) = date {
            body["date"] = json!(date);
        }
        let response = self
            .server
            .post("/api/scores")
            .add_header(AUTHORIZATION, auth.clone())
            .json(&body)
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// All score-related keys currently stored.
    pub async fn score_keys(&self) -> Vec<String> {
        self.kv
            .keys()
            .await
            .into_iter()
            .filter(|k| k.starts_with("memory:score"))
            .collect()
    }
}

/// `Authorization` header value for a bearer token.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("valid header value")
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
