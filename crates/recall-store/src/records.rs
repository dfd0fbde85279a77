//! Typed access to daily scores and month indexes.

use std::sync::Arc;

use recall_core::{DailyScore, Month, PracticeDate, UserId};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::keys;
use crate::KvStore;

/// Reads and writes score records for any user.
#[derive(Clone)]
pub struct ScoreStore {
    kv: Arc<dyn KvStore>,
}

impl ScoreStore {
    /// Wrap a key-value backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// The user's record for `date`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the record is malformed.
    pub async fn get_daily(
        &self,
        user_id: &UserId,
        date: PracticeDate,
    ) -> Result<Option<DailyScore>> {
        get_json(self.kv.as_ref(), &keys::daily_score_key(user_id, date)).await
    }

    /// Insert or replace the user's record for `record.date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    pub async fn set_daily(&self, user_id: &UserId, record: &DailyScore) -> Result<()> {
        set_json(
            self.kv.as_ref(),
            &keys::daily_score_key(user_id, record.date),
            record,
        )
        .await
    }

    /// Dates indexed for `month`, in insertion order. Absent → empty.
    ///
    /// Entries that are not valid dates are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the index is not an array
    /// of strings.
    pub async fn get_month_index(
        &self,
        user_id: &UserId,
        month: Month,
    ) -> Result<Vec<PracticeDate>> {
        let raw: Vec<String> = get_json(self.kv.as_ref(), &keys::month_index_key(user_id, month))
            .await?
            .unwrap_or_default();

        Ok(raw
            .into_iter()
            .filter_map(|entry| match entry.parse() {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(user_id = %user_id, %month, entry = %entry, "Skipping malformed month index entry");
                    None
                }
            })
            .collect())
    }

    /// Add `date` to the index of the month it falls in.
    ///
    /// Reads the index, appends, and writes it back; not atomic against
    /// concurrent writers. A date already present is not appended again.
    /// Returns whether the index changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub async fn append_month_index(&self, user_id: &UserId, date: PracticeDate) -> Result<bool> {
        let month = date.month();
        let key = keys::month_index_key(user_id, month);
        let mut raw: Vec<String> = get_json(self.kv.as_ref(), &key).await?.unwrap_or_default();

        let entry = date.to_string();
        if raw.contains(&entry) {
            tracing::debug!(user_id = %user_id, %date, "Date already indexed");
            return Ok(false);
        }

        raw.push(entry);
        set_json(self.kv.as_ref(), &key, &raw).await?;
        Ok(true)
    }
}

/// Fetch and decode a JSON value.
pub(crate) async fn get_json<T: DeserializeOwned>(
    kv: &dyn KvStore,
    key: &str,
) -> Result<Option<T>> {
    kv.get(key)
        .await?
        .map(|value| serde_json::from_value(value).map_err(Into::into))
        .transpose()
}

/// Encode and store a JSON value.
pub(crate) async fn set_json<T: Serialize + ?Sized>(
    kv: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<()> {
    kv.set(key, serde_json::to_value(value)?).await
}
