//! Core types and utilities for the recall score service.
//!
//! This crate provides the foundational types shared by the store, the HTTP
//! service and the client SDK:
//!
//! - **Identifiers**: `UserId`
//! - **Calendar**: `PracticeDate` (`YYYY-MM-DD`), `Month` (`YYYY-MM`)
//! - **Scores**: `DailyScore`, `MonthlySummary`, `Heatmap`, `RecentDay`
//! - **Accounts**: `User`, email and password rules
//! - **Grading**: `grade_recall` for a memorized word grid
//! - **Time**: the `Clock` seam used to decide what "today" is
//!
//! # Date strings
//!
//! Dates and months are always ASCII and zero-padded, so ordering the typed
//! values is the same as ordering their string forms.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod clock;
pub mod date;
pub mod error;
pub mod grading;
pub mod ids;
pub mod score;
pub mod user;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{Month, PracticeDate};
pub use error::{Result, ValidationError};
pub use grading::{grade_recall, Mistake, RecallGrade};
pub use ids::{IdError, UserId};
pub use score::{
    check_score, round_to_hundredths, DailyScore, Heatmap, MonthlySummary, RecentDay,
};
pub use user::{normalize_email, validate_email, validate_password, User, MIN_PASSWORD_LEN};
