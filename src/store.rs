//! Read-only access to the observation store.
//!
//! All queries go through a shared [`SqlitePool`]; each call checks a
//! connection out for the duration of one statement and hands it back when the
//! future completes or is dropped.

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::dates::{self, DateRange};
use crate::models::{Measurement, Station, StationActivity, TemperatureAggregate};

#[derive(Clone)]
pub struct ClimateStore {
    pool: SqlitePool,
}

impl ClimateStore {
    /// Build a lazily connecting, read-only pool over the configured file.
    ///
    /// Nothing is opened here, so a missing store surfaces per request as
    /// `StoreUnavailable` instead of preventing startup.
    pub fn connect_lazy(cfg: &DatabaseConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&cfg.path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_seconds))
            .connect_lazy_with(options);

        Self { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Round-trip a trivial statement to prove the store is reachable
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Most recent observation date, `None` when the table is empty
    pub async fn latest_date(&self) -> Result<Option<NaiveDate>, sqlx::Error> {
        let row = sqlx::query_as::<_, (Option<String>,)>("SELECT MAX(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        row.0.map(|raw| parse_stored_date(&raw)).transpose()
    }

    /// Earliest observation date, `None` when the table is empty
    pub async fn earliest_date(&self) -> Result<Option<NaiveDate>, sqlx::Error> {
        let row = sqlx::query_as::<_, (Option<String>,)>("SELECT MIN(date) FROM measurement")
            .fetch_one(&self.pool)
            .await?;

        row.0.map(|raw| parse_stored_date(&raw)).transpose()
    }

    /// Cutoff of the last-12-months window, `None` when the table is empty
    pub async fn cutoff_date(&self) -> Result<Option<NaiveDate>, sqlx::Error> {
        Ok(self.latest_date().await?.and_then(dates::cutoff_date))
    }

    /// `(date, prcp)` pairs on or after `since`, by date then station
    pub async fn precipitation_since(
        &self,
        since: NaiveDate,
    ) -> Result<Vec<(String, Option<f64>)>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, Option<f64>)>(
            "SELECT date, prcp
             FROM measurement
             WHERE date >= ?1
             ORDER BY date ASC, station ASC",
        )
        .bind(dates::format_date(since))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(since = %since, rows = rows.len(), "Loaded precipitation rows");
        Ok(rows)
    }

    /// Every station identifier in table order, duplicates included
    pub async fn station_ids(&self) -> Result<Vec<String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT station FROM station ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(station,)| station).collect())
    }

    /// Metadata row of one station (first match when the id is duplicated)
    pub async fn station(&self, id: &str) -> Result<Option<Station>, sqlx::Error> {
        sqlx::query_as::<_, Station>(
            "SELECT station, name, latitude, longitude, elevation
             FROM station
             WHERE station = ?1
             ORDER BY rowid
             LIMIT 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn station_count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM station")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn measurement_count(&self) -> Result<i64, sqlx::Error> {
        let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM measurement")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Station with the most measurement rows; ties go to the lowest identifier
    pub async fn most_active_station(&self) -> Result<Option<StationActivity>, sqlx::Error> {
        let row = sqlx::query_as::<_, StationActivity>(
            "SELECT station, COUNT(*) AS observations
             FROM measurement
             GROUP BY station
             ORDER BY observations DESC, station ASC
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// One station's measurements on or after `since`, by date
    pub async fn station_measurements_since(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<Measurement>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Measurement>(
            "SELECT station, date, prcp, tobs
             FROM measurement
             WHERE station = ?1 AND date >= ?2
             ORDER BY date ASC",
        )
        .bind(station)
        .bind(dates::format_date(since))
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(station, since = %since, rows = rows.len(), "Loaded station measurements");
        Ok(rows)
    }

    /// MIN/AVG/MAX temperature over `range`, both bounds inclusive
    pub async fn temperature_stats(
        &self,
        range: &DateRange,
    ) -> Result<TemperatureAggregate, sqlx::Error> {
        let start = dates::format_date(range.start);

        let aggregate = match range.end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureAggregate>(
                    "SELECT CAST(MIN(tobs) AS REAL) AS tmin, AVG(tobs) AS tavg, CAST(MAX(tobs) AS REAL) AS tmax
                     FROM measurement
                     WHERE date >= ?1 AND date <= ?2",
                )
                .bind(&start)
                .bind(dates::format_date(end))
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureAggregate>(
                    "SELECT CAST(MIN(tobs) AS REAL) AS tmin, AVG(tobs) AS tavg, CAST(MAX(tobs) AS REAL) AS tmax
                     FROM measurement
                     WHERE date >= ?1",
                )
                .bind(&start)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(aggregate)
    }
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate, sqlx::Error> {
    NaiveDate::parse_from_str(raw, dates::DATE_FORMAT).map_err(|e| sqlx::Error::ColumnDecode {
        index: "date".to_string(),
        source: Box::new(e),
    })
}


#[cfg(test)]
mod tests {
    use super::test_support::seeded_store;
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, dates::DATE_FORMAT).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_has_no_dates() {
        let (_dir, store) = seeded_store(&["A"], &[]).await;

        assert_eq!(store.latest_date().await.unwrap(), None);
        assert_eq!(store.cutoff_date().await.unwrap(), None);
        assert!(store.most_active_station().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_latest_and_cutoff() {
        let (_dir, store) = seeded_store(
            &["A"],
            &[
                ("A", "2016-01-01", Some(0.1), 70.0),
                ("A", "2017-08-23", None, 80.0),
            ],
        )
        .await;

        assert_eq!(store.earliest_date().await.unwrap(), Some(date("2016-01-01")));
        assert_eq!(store.latest_date().await.unwrap(), Some(date("2017-08-23")));
        assert_eq!(store.cutoff_date().await.unwrap(), Some(date("2016-08-23")));
    }

    #[tokio::test]
    async fn test_most_active_station_tie_breaks_on_lowest_id() {
        let (_dir, store) = seeded_store(
            &["B", "A"],
            &[
                ("B", "2017-01-01", None, 70.0),
                ("B", "2017-01-02", None, 71.0),
                ("A", "2017-01-01", None, 72.0),
                ("A", "2017-01-02", None, 73.0),
            ],
        )
        .await;

        let active = store.most_active_station().await.unwrap().unwrap();
        assert_eq!(active.station, "A");
        assert_eq!(active.observations, 2);
    }

    #[tokio::test]
    async fn test_station_ids_keep_duplicates_in_table_order() {
        let (_dir, store) = seeded_store(&["C", "A", "C"], &[]).await;

        assert_eq!(store.station_ids().await.unwrap(), vec!["C", "A", "C"]);
        assert_eq!(store.station_count().await.unwrap(), 3);

        let station = store.station("A").await.unwrap().unwrap();
        assert_eq!(station.name.as_deref(), Some("A"));
        assert!(store.station("Z").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_temperature_stats_with_no_rows_is_all_null() {
        let (_dir, store) = seeded_store(&["A"], &[("A", "2010-01-01", None, 65.0)]).await;
        let range = DateRange::from_params(Some("2017-01-01"), None).unwrap();

        let stats = store.temperature_stats(&range).await.unwrap();
        assert_eq!(stats, TemperatureAggregate::default());
    }

    #[tokio::test]
    async fn test_missing_file_is_reported_on_first_query() {
        let dir = tempfile::tempdir().unwrap();
        let store = ClimateStore::connect_lazy(&DatabaseConfig {
            path: dir.path().join("absent.sqlite").to_string_lossy().into_owned(),
            max_connections: 1,
            acquire_timeout_seconds: 1,
        });

        assert!(store.ping().await.is_err());
        // create_if_missing(false) keeps the file absent
        assert!(!dir.path().join("absent.sqlite").exists());
    }
}
