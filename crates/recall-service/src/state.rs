//! Application state.

use std::sync::Arc;

use recall_core::{Clock, SystemClock};
use recall_store::{KvStore, ScoreAggregator, ScoreStore, SessionRecorder, UserStore};

use crate::config::ServiceConfig;
use crate::crypto::TokenIssuer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account records.
    pub users: UserStore,

    /// Writes session results.
    pub recorder: SessionRecorder,

    /// Builds score views.
    pub aggregator: ScoreAggregator,

    /// Signs and verifies session tokens.
    pub tokens: TokenIssuer,

    /// Resolves "today" for requests that omit a date.
    pub clock: Arc<dyn Clock>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create application state over `kv` using the system clock.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>, config: ServiceConfig) -> Self {
        Self::with_clock(kv, config, Arc::new(SystemClock))
    }

    /// Create application state with an explicit clock.
    #[must_use]
    pub fn with_clock(kv: Arc<dyn KvStore>, config: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let scores = ScoreStore::new(kv.clone());
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl_days);

        tracing::debug!(token_ttl_days = config.token_ttl_days, "Application state created");

        Self {
            users: UserStore::new(kv),
            recorder: SessionRecorder::new(scores.clone(), clock.clone()),
            aggregator: ScoreAggregator::new(scores),
            tokens,
            clock,
            config,
        }
    }
}
