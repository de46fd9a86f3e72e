use axum::{extract::State, Json};

use super::AppState;
use crate::error::AppError;
use crate::models::StationsResponse;

/// GET /api/v1.0/stations - every station identifier, unfiltered
pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.store.station_ids().await?;
    Ok(Json(StationsResponse { stations }))
}
