//! Temperature statistics over a date range.
//!
//! The same computation is reachable through query parameters
//! (`/api/v1.0/start-end?start=..&end=..`) and through path segments
//! (`/api/v1.0/temperature/{start}[/{end}]`).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::AppState;
use crate::dates::{self, DateRange};
use crate::error::AppError;
use crate::models::TemperatureStatsResponse;

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/v1.0/start-end?start=YYYY-MM-DD[&end=YYYY-MM-DD]
pub async fn stats_by_query(
    State(state): State<AppState>,
    Query(params): Query<RangeParams>,
) -> Result<Json<TemperatureStatsResponse>, AppError> {
    let range = DateRange::from_params(params.start.as_deref(), params.end.as_deref())?;
    temperature_stats(&state, range).await
}

/// GET /api/v1.0/temperature/{start}
pub async fn stats_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStatsResponse>, AppError> {
    let range = DateRange::from_params(Some(&start), None)?;
    temperature_stats(&state, range).await
}

/// GET /api/v1.0/temperature/{start}/{end}
pub async fn stats_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStatsResponse>, AppError> {
    let range = DateRange::from_params(Some(&start), Some(&end))?;
    temperature_stats(&state, range).await
}

async fn temperature_stats(
    state: &AppState,
    range: DateRange,
) -> Result<Json<TemperatureStatsResponse>, AppError> {
    let aggregate = state.store.temperature_stats(&range).await?;

    if aggregate.tmin.is_none() {
        tracing::debug!(start = %range.start, end = ?range.end, "No measurements in range");
    }

    Ok(Json(TemperatureStatsResponse {
        start_date: dates::format_date(range.start),
        end_date: range.end.map(dates::format_date),
        tmin: aggregate.tmin,
        tavg: aggregate.tavg,
        tmax: aggregate.tmax,
    }))
}
