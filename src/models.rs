//! Record types for the observation store and the JSON shapes served over HTTP.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

// ============================================================================
// Store records
// ============================================================================

/// One row of the `station` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Station {
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// One row of the `measurement` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Measurement {
    pub station: String,
    pub date: String,
    pub prcp: Option<f64>,
    pub tobs: f64,
}

/// A station together with its number of measurement rows
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StationActivity {
    pub station: String,
    pub observations: i64,
}

/// MIN/AVG/MAX of `tobs` over a date window; all `None` when no rows match
#[derive(Debug, Clone, Copy, Default, FromRow, PartialEq)]
pub struct TemperatureAggregate {
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub tmax: Option<f64>,
}

// ============================================================================
// Response bodies
// ============================================================================

/// Date -> precipitation. Ordered so repeated responses serialize identically.
pub type PrecipitationByDate = BTreeMap<String, Option<f64>>;

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub temp: f64,
}

#[derive(Debug, Serialize)]
pub struct TemperatureStatsResponse {
    pub start_date: String,
    pub end_date: Option<String>,
    #[serde(rename = "TMIN")]
    pub tmin: Option<f64>,
    #[serde(rename = "TAVG")]
    pub tavg: Option<f64>,
    #[serde(rename = "TMAX")]
    pub tmax: Option<f64>,
}
