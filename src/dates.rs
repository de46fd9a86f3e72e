//! Observation date handling.
//!
//! Dates are stored as zero-padded `YYYY-MM-DD` text, so string order equals
//! calendar order and every comparison can be pushed down to SQL as text.

use chrono::{Duration, NaiveDate};

use crate::error::AppError;

/// Storage and wire format of observation dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last 12 months" window
pub const LOOKBACK_DAYS: i64 = 365;

/// Parse date string in YYYY-MM-DD format
pub fn parse_date(date_str: &str) -> Result<NaiveDate, AppError> {
    // chrono accepts unpadded fields ("2017-4-1"); stored dates never are
    if date_str.len() != 10 {
        return Err(invalid_date(date_str));
    }
    NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| invalid_date(date_str))
}

fn invalid_date(date_str: &str) -> AppError {
    AppError::InvalidInput(format!(
        "Invalid date format: {}, expected YYYY-MM-DD",
        date_str
    ))
}

/// Start of the 365-day window that ends at `latest`
pub fn cutoff_date(latest: NaiveDate) -> Option<NaiveDate> {
    latest.checked_sub_signed(Duration::days(LOOKBACK_DAYS))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Validated `start`/`end` pair for the temperature statistics routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from raw request parameters.
    ///
    /// `start` is required; `end`, when present, must not precede it.
    pub fn from_params(start: Option<&str>, end: Option<&str>) -> Result<Self, AppError> {
        let start = match start.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_date(raw)?,
            None => {
                return Err(AppError::InvalidInput(
                    "Missing required parameter: start (YYYY-MM-DD)".to_string(),
                ))
            }
        };

        let end = end
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_date)
            .transpose()?;

        if let Some(end) = end {
            if end < start {
                return Err(AppError::InvalidInput(format!(
                    "End date {} is before start date {}",
                    format_date(end),
                    format_date(start)
                )));
            }
        }

        Ok(Self { start, end })
    }
}
