//! Recording practice sessions under the best-score-of-the-day policy.

use std::sync::Arc;

use recall_core::{check_score, Clock, DailyScore, PracticeDate, UserId};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::records::ScoreStore;

/// What `record_session` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Whether the daily record was created or raised.
    pub updated: bool,
}

/// Applies session results to the daily records and month indexes.
#[derive(Clone)]
pub struct SessionRecorder {
    scores: ScoreStore,
    clock: Arc<dyn Clock>,
}

impl SessionRecorder {
    /// Create a recorder writing through `scores`.
    #[must_use]
    pub fn new(scores: ScoreStore, clock: Arc<dyn Clock>) -> Self {
        Self { scores, clock }
    }

    /// Record one session's score for `date` (today when `None`).
    ///
    /// The daily record only ever goes up: a score that does not beat the
    /// stored one leaves everything untouched. The first score of a day also
    /// adds the day to its month index, after the daily record is written.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if `score` is not finite; nothing is read
    ///   or written.
    /// - Backend errors from either write. There is no rollback: a failed
    ///   index append leaves the daily record in place.
    pub async fn record_session(
        &self,
        user_id: &UserId,
        score: f64,
        date: Option<PracticeDate>,
    ) -> Result<SessionOutcome> {
        let score = check_score(score)?;
        let date = date.unwrap_or_else(|| self.clock.today());

        let existing = self.scores.get_daily(user_id, date).await?;
        if let Some(existing) = &existing {
            if !existing.is_beaten_by(score) {
                tracing::debug!(
                    user_id = %user_id,
                    %date,
                    score,
                    best = existing.highest_score,
                    "Score does not beat daily best"
                );
                return Ok(SessionOutcome { updated: false });
            }
        }

        let record = DailyScore::new(date, score, self.clock.now());
        self.scores.set_daily(user_id, &record).await?;

        if existing.is_none() {
            self.scores.append_month_index(user_id, date).await?;
        }

        tracing::info!(
            user_id = %user_id,
            %date,
            score,
            first_of_day = existing.is_none(),
            "Daily score recorded"
        );

        Ok(SessionOutcome { updated: true })
    }
}
