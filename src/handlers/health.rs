use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use super::AppState;
use crate::error::AppError;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK once the observation store answers queries
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    state.store.ping().await.map_err(|e| {
        tracing::warn!(error = %e, "Observation store is not reachable");
        AppError::StoreUnavailable(format!("Observation store is not reachable: {}", e))
    })?;

    Ok((StatusCode::OK, Json(json!({
        "status": "ready",
        "service": env!("CARGO_PKG_NAME"),
    }))))
}
