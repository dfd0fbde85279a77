//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, health, scores};
use crate::state::AppState;

/// Maximum concurrent requests for `/api` endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /` - Greeting
/// - `GET /health` - Health check
/// - `POST /api/register` - Create an account
/// - `POST /api/login` - Exchange credentials for a token
/// - `POST /api/verify` - Check a token
///
/// ## Scores (Bearer token auth)
/// - `POST /api/scores` - Record a practice session
/// - `GET /api/scores/daily/:date` - One day's record
/// - `GET /api/scores/monthly/:month` - Monthly summary
/// - `GET /api/scores/heatmap?from&to` - Best score per day in a range
/// - `GET /api/scores/recent?days&end` - Last few days, newest first
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let score_routes = Router::new()
        .route("/", post(scores::record_score))
        .route("/daily/:date", get(scores::get_daily))
        .route("/monthly/:month", get(scores::get_monthly))
        .route("/heatmap", get(scores::get_heatmap))
        .route("/recent", get(scores::get_recent));

    let api_routes = Router::new()
        .route("/register", post(accounts::register))
        .route("/login", post(accounts::login))
        .route("/verify", post(accounts::verify))
        .nest("/scores", score_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}
