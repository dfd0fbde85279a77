//! Storage layer for recall scores.
//!
//! Everything persisted lives in a flat key-value store holding JSON values.
//! This crate provides:
//!
//! - the `KvStore` trait and its backends (`MemoryKv`, `RestKv`, and
//!   `RocksKv` behind the `rocksdb-backend` feature),
//! - the key scheme shared with previously written data (`keys`),
//! - `ScoreStore`, typed access to daily scores and month indexes,
//! - `SessionRecorder`, which applies the best-score-of-the-day policy,
//! - `ScoreAggregator`, which builds monthly summaries, heatmaps and the
//!   recent-days view,
//! - `UserStore`, account records keyed by email.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use recall_core::{SystemClock, UserId};
//! use recall_store::{MemoryKv, ScoreAggregator, ScoreStore, SessionRecorder};
//!
//! # async fn example() -> recall_store::Result<()> {
//! let scores = ScoreStore::new(Arc::new(MemoryKv::new()));
//! let recorder = SessionRecorder::new(scores.clone(), Arc::new(SystemClock));
//! let aggregator = ScoreAggregator::new(scores);
//!
//! let user = UserId::generate();
//! recorder.record_session(&user, 12.0, None).await?;
//! let summary = aggregator.monthly_summary(&user, "2024-03".parse()?).await?;
//! # let _ = summary;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod aggregator;
pub mod error;
pub mod keys;
pub mod memory;
pub mod records;
pub mod recorder;
pub mod rest;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;
pub mod users;

pub use aggregator::{
    ScoreAggregator, MAX_CONCURRENT_READS, MAX_HEATMAP_MONTHS, MAX_RECENT_DAYS,
};
pub use error::{Result, StoreError};
pub use memory::MemoryKv;
pub use records::ScoreStore;
pub use recorder::{SessionOutcome, SessionRecorder};
pub use rest::RestKv;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksKv;
pub use users::UserStore;

use async_trait::async_trait;

/// A flat asynchronous key-value store holding JSON values.
///
/// Reads and writes are individually atomic per key; nothing else is
/// guaranteed. Read-modify-write sequences built on top of this trait are
/// not atomic.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or the stored
    /// value cannot be decoded.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;
}
