//! Recall Client SDK.
//!
//! This crate provides a typed client for the recall score service.
//!
//! # Example
//!
//! ```no_run
//! use recall_client::RecallClient;
//!
//! # async fn example() -> Result<(), recall_client::ClientError> {
//! let client = RecallClient::new("http://localhost:8001")?;
//!
//! let session = client.login("ada@example.com", "secret-pass").await?;
//! let client = client.with_session(&session);
//!
//! let words = [vec!["apple", "river"], vec!["stone", "cloud"]];
//! let answers = [vec!["Apple", "river"], vec!["stone", ""]];
//! let grade = recall_client::grade_recall(&words, &answers);
//!
//! let update = client.record_score(f64::from(grade.percentage), None).await?;
//! println!("Daily best changed: {}", update.updated);
//!
//! for day in client.recent(Some(7), None).await? {
//!     println!("{}: {:?}", day.date, day.score);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, RecallClient};
pub use error::ClientError;
pub use recall_core::{grade_recall, Mistake, RecallGrade};
pub use types::{Account, Credentials, ScoreUpdate, Session, TokenStatus};
