use axum::{extract::State, Json};

use super::AppState;
use crate::error::AppError;
use crate::models::TemperatureObservation;

/// GET /api/v1.0/tobs - last 12 months of temperatures at the most-active station
pub async fn most_active_temperatures(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservation>>, AppError> {
    let no_data = || AppError::NotFound("No measurements recorded".to_string());

    let cutoff = state.store.cutoff_date().await?.ok_or_else(no_data)?;
    let active = state.store.most_active_station().await?.ok_or_else(no_data)?;

    tracing::debug!(
        station = %active.station,
        observations = active.observations,
        cutoff = %cutoff,
        "Selected most-active station"
    );

    let observations = state
        .store
        .station_measurements_since(&active.station, cutoff)
        .await?
        .into_iter()
        .map(|m| TemperatureObservation {
            date: m.date,
            temp: m.tobs,
        })
        .collect();

    Ok(Json(observations))
}
