use axum::{extract::State, Json};

use super::AppState;
use crate::error::AppError;
use crate::models::PrecipitationByDate;

/// GET /api/v1.0/precipitation - last 12 months of precipitation
///
/// Rows arrive ordered by date then station and are folded into one value
/// per date, so when several stations report on the same day the reading of
/// the station with the greatest identifier wins.
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<PrecipitationByDate>, AppError> {
    let cutoff = state
        .store
        .cutoff_date()
        .await?
        .ok_or_else(|| AppError::NotFound("No measurements recorded".to_string()))?;

    let rows = state.store.precipitation_since(cutoff).await?;
    Ok(Json(collapse_by_date(rows)))
}

fn collapse_by_date(rows: Vec<(String, Option<f64>)>) -> PrecipitationByDate {
    let mut by_date = PrecipitationByDate::new();
    for (date, prcp) in rows {
        by_date.insert(date, prcp);
    }
    by_date
}
