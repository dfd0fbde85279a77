//! Read-only views over the persisted score records.
//!
//! Every view fans out independent reads, at most `MAX_CONCURRENT_READS` in
//! flight, and joins them before reducing. Each read yields its originating
//! date or month alongside the value, so the result never depends on
//! completion order.
//!
//! Index entries whose daily record is missing are skipped. This can happen
//! when a recorder is interrupted between its two writes, and the filter
//! stays in place regardless of how the index is maintained.

use std::collections::{BTreeMap, BTreeSet};

use futures::stream::{self, StreamExt, TryStreamExt};
use recall_core::{
    DailyScore, Heatmap, Month, MonthlySummary, PracticeDate, RecentDay, UserId, ValidationError,
};

use crate::error::Result;
use crate::records::ScoreStore;

/// Longest window accepted by `recent_days`.
pub const MAX_RECENT_DAYS: u32 = 366;

/// Most calendar months one heatmap may touch.
pub const MAX_HEATMAP_MONTHS: usize = 24;

/// Store reads in flight at once for a single view.
pub const MAX_CONCURRENT_READS: usize = 8;

/// Builds summaries, heatmaps and recent-day tables.
#[derive(Clone)]
pub struct ScoreAggregator {
    scores: ScoreStore,
}

impl ScoreAggregator {
    /// Create an aggregator reading through `scores`.
    #[must_use]
    pub fn new(scores: ScoreStore) -> Self {
        Self { scores }
    }

    /// The user's record for one date. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn daily(&self, user_id: &UserId, date: PracticeDate) -> Result<Option<DailyScore>> {
        self.scores.get_daily(user_id, date).await
    }

    /// Practice days, best and average score for one month.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn monthly_summary(&self, user_id: &UserId, month: Month) -> Result<MonthlySummary> {
        let dates: BTreeSet<PracticeDate> = self
            .scores
            .get_month_index(user_id, month)
            .await?
            .into_iter()
            .collect();

        if dates.is_empty() {
            return Ok(MonthlySummary::empty(month));
        }

        let daily_scores: Vec<DailyScore> = self
            .fetch_daily(user_id, dates)
            .await?
            .into_iter()
            .filter_map(|(_, record)| record)
            .collect();

        tracing::debug!(user_id = %user_id, %month, days = daily_scores.len(), "Monthly summary built");

        Ok(MonthlySummary::from_scores(month, daily_scores))
    }

    /// Best score per practiced day within `[from, to]`.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if `from > to` or the range touches more
    ///   than `MAX_HEATMAP_MONTHS` months; nothing is read.
    /// - Backend errors.
    pub async fn heatmap(
        &self,
        user_id: &UserId,
        from: PracticeDate,
        to: PracticeDate,
    ) -> Result<Heatmap> {
        if from > to {
            return Err(ValidationError::InvertedRange {
                from: from.to_string(),
                to: to.to_string(),
            }
            .into());
        }

        let months = Month::count(from.month(), to.month());
        if months > MAX_HEATMAP_MONTHS {
            return Err(ValidationError::RangeTooLong {
                months,
                max: MAX_HEATMAP_MONTHS,
            }
            .into());
        }

        let indexes: Vec<(Month, Vec<PracticeDate>)> =
            stream::iter(Month::span(from.month(), to.month()))
                .map(|month| async move {
                    self.scores
                        .get_month_index(user_id, month)
                        .await
                        .map(|dates| (month, dates))
                })
                .buffered(MAX_CONCURRENT_READS)
                .try_collect()
                .await?;

        let dates: BTreeSet<PracticeDate> = indexes
            .into_iter()
            .flat_map(|(_, dates)| dates)
            .filter(|date| (from..=to).contains(date))
            .collect();

        if dates.is_empty() {
            return Ok(Heatmap::empty(from, to));
        }

        let scores: BTreeMap<PracticeDate, f64> = self
            .fetch_daily(user_id, dates)
            .await?
            .into_iter()
            .filter_map(|(date, record)| record.map(|r| (date, r.highest_score)))
            .collect();

        Ok(Heatmap { scores, from, to })
    }

    /// One row per day for the `days` days ending at `end`, newest first.
    ///
    /// # Errors
    ///
    /// - `StoreError::Validation` if `days` is 0 or above `MAX_RECENT_DAYS`.
    /// - Backend errors.
    pub async fn recent_days(
        &self,
        user_id: &UserId,
        end: PracticeDate,
        days: u32,
    ) -> Result<Vec<RecentDay>> {
        if days == 0 || days > MAX_RECENT_DAYS {
            return Err(ValidationError::InvalidDayCount {
                got: days,
                max: MAX_RECENT_DAYS,
            }
            .into());
        }

        let dates: Vec<PracticeDate> = std::iter::successors(Some(end), PracticeDate::previous)
            .take(days as usize)
            .collect();

        let rows = self
            .fetch_daily(user_id, dates)
            .await?
            .into_iter()
            .map(|(date, record)| RecentDay {
                date,
                score: record.map(|r| r.highest_score),
            })
            .collect();

        Ok(rows)
    }

    /// Fetch the records for `dates`, paired with their date, in input order.
    async fn fetch_daily(
        &self,
        user_id: &UserId,
        dates: impl IntoIterator<Item = PracticeDate>,
    ) -> Result<Vec<(PracticeDate, Option<DailyScore>)>> {
        stream::iter(dates)
            .map(|date| async move {
                self.scores
                    .get_daily(user_id, date)
                    .await
                    .map(|record| (date, record))
            })
            .buffered(MAX_CONCURRENT_READS)
            .try_collect()
            .await
    }
}
