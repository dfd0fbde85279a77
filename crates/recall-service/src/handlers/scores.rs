//! Score handlers: record a session and read the score views.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use recall_core::{DailyScore, Heatmap, Month, MonthlySummary, PracticeDate, RecentDay};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{JsonBody, QueryParams};
use crate::state::AppState;

/// Days shown by the recent view when `days` is omitted.
pub const DEFAULT_RECENT_DAYS: u32 = 7;

/// Session result posted by the client.
///
/// `score` is taken as raw JSON so a non-numeric value gets the same 400 as
/// a missing one instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RecordScoreRequest {
    /// Session score.
    #[serde(default)]
    pub score: Option<Value>,
    /// Practice date, today when absent or empty.
    #[serde(default)]
    pub date: Option<String>,
}

/// Record score response.
#[derive(Debug, Serialize)]
pub struct RecordScoreResponse {
    /// Always `true` on a 200.
    pub success: bool,
    /// Whether the daily best changed.
    pub updated: bool,
}

/// Record one practice session.
pub async fn record_score(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    JsonBody(body): JsonBody<RecordScoreRequest>,
) -> Result<Json<RecordScoreResponse>, ApiError> {
    let score = body
        .score
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or_else(|| ApiError::BadRequest("Score is required".into()))?;

    let date = body
        .date
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(str::parse::<PracticeDate>)
        .transpose()?;

    let outcome = state
        .recorder
        .record_session(&user.user_id, score, date)
        .await?;

    Ok(Json(RecordScoreResponse {
        success: true,
        updated: outcome.updated,
    }))
}

/// The caller's record for one date, `null` if none.
pub async fn get_daily(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(date): Path<String>,
) -> Result<Json<Option<DailyScore>>, ApiError> {
    let date: PracticeDate = date.parse()?;
    let record = state.aggregator.daily(&user.user_id, date).await?;
    Ok(Json(record))
}

/// The caller's summary for one month.
pub async fn get_monthly(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(month): Path<String>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let month: Month = month.parse()?;
    let summary = state
        .aggregator
        .monthly_summary(&user.user_id, month)
        .await?;
    Ok(Json(summary))
}

/// Heatmap query parameters.
#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    /// First day, inclusive.
    pub from: Option<String>,
    /// Last day, inclusive.
    pub to: Option<String>,
}

/// The caller's best score per practiced day in a range.
pub async fn get_heatmap(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    QueryParams(query): QueryParams<HeatmapQuery>,
) -> Result<Json<Heatmap>, ApiError> {
    let (Some(from), Some(to)) = (query.from, query.to) else {
        return Err(ApiError::BadRequest(
            "\"from\" and \"to\" query params are required".into(),
        ));
    };
    let from: PracticeDate = from.parse()?;
    let to: PracticeDate = to.parse()?;

    let heatmap = state.aggregator.heatmap(&user.user_id, from, to).await?;
    Ok(Json(heatmap))
}

/// Recent view query parameters.
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Number of days, default 7.
    pub days: Option<u32>,
    /// Newest day, default today.
    pub end: Option<String>,
}

/// Recent view response.
#[derive(Debug, Serialize)]
pub struct RecentResponse {
    /// One row per day, newest first.
    pub days: Vec<RecentDay>,
}

/// The caller's score for each of the last few days.
pub async fn get_recent(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    QueryParams(query): QueryParams<RecentQuery>,
) -> Result<Json<RecentResponse>, ApiError> {
    let end = match query.end.as_deref().filter(|e| !e.is_empty()) {
        Some(end) => end.parse::<PracticeDate>()?,
        None => state.clock.today(),
    };
    let days = query.days.unwrap_or(DEFAULT_RECENT_DAYS);

    let days = state
        .aggregator
        .recent_days(&user.user_id, end, days)
        .await?;
    Ok(Json(RecentResponse { days }))
}
