//! Score records and the views derived from them.
//!
//! `DailyScore` is the only persisted score record. Its JSON field names
//! (`date`, `highestScore`, `updatedAt`) are shared with records written by
//! earlier clients and must not change.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::{Month, PracticeDate};
use crate::error::ValidationError;

/// The best session score a user recorded on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyScore {
    /// The practice day.
    pub date: PracticeDate,

    /// Best score recorded that day. Never decreases.
    pub highest_score: f64,

    /// Last update, in milliseconds since the Unix epoch.
    pub updated_at: i64,
}

impl DailyScore {
    /// Create a record stamped at `at`.
    #[must_use]
    pub fn new(date: PracticeDate, highest_score: f64, at: DateTime<Utc>) -> Self {
        Self {
            date,
            highest_score,
            updated_at: at.timestamp_millis(),
        }
    }

    /// Whether `score` would raise this record.
    #[must_use]
    pub fn is_beaten_by(&self, score: f64) -> bool {
        score > self.highest_score
    }
}

/// Reject scores that cannot be stored or compared.
///
/// # Errors
///
/// Returns `ValidationError::InvalidScore` for NaN and infinities.
pub fn check_score(score: f64) -> Result<f64, ValidationError> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(ValidationError::InvalidScore)
    }
}

/// Round to two decimal places, halves toward positive infinity
/// (`-0.125` becomes `-0.12`, `0.125` becomes `0.13`).
#[must_use]
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Aggregate of one month of daily scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// The summarized month.
    pub month: Month,
    /// Number of days with a score.
    pub practice_days: usize,
    /// Highest daily score, 0 when there are none.
    pub best_score: f64,
    /// Mean daily score rounded to two decimals, 0 when there are none.
    pub average_score: f64,
    /// The records the figures were computed from.
    pub daily_scores: Vec<DailyScore>,
}

impl MonthlySummary {
    /// The summary of a month without practice.
    #[must_use]
    pub fn empty(month: Month) -> Self {
        Self {
            month,
            practice_days: 0,
            best_score: 0.0,
            average_score: 0.0,
            daily_scores: Vec::new(),
        }
    }

    /// Reduce a month's records into a summary.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_scores(month: Month, daily_scores: Vec<DailyScore>) -> Self {
        if daily_scores.is_empty() {
            return Self::empty(month);
        }

        let best_score = daily_scores
            .iter()
            .map(|s| s.highest_score)
            .fold(0.0, f64::max);
        let total: f64 = daily_scores.iter().map(|s| s.highest_score).sum();
        let average_score = round_to_hundredths(total / daily_scores.len() as f64);

        Self {
            month,
            practice_days: daily_scores.len(),
            best_score,
            average_score,
            daily_scores,
        }
    }
}

/// Date to score mapping over an inclusive range, for calendar heatmaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Best score per practiced day inside the range.
    pub scores: BTreeMap<PracticeDate, f64>,
    /// Lower bound, inclusive.
    pub from: PracticeDate,
    /// Upper bound, inclusive.
    pub to: PracticeDate,
}

impl Heatmap {
    /// A heatmap with no practiced days.
    #[must_use]
    pub fn empty(from: PracticeDate, to: PracticeDate) -> Self {
        Self {
            scores: BTreeMap::new(),
            from,
            to,
        }
    }
}

/// One row of the recent-days view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDay {
    /// The day.
    pub date: PracticeDate,
    /// Best score that day, `None` if the user did not practice.
    pub score: Option<f64>,
}
