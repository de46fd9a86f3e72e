//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use climate_api::config::DatabaseConfig;
use climate_api::handlers::AppState;
use climate_api::server::create_router;
use climate_api::store::ClimateStore;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

pub const MOST_ACTIVE: &str = "USC00519281";

pub const STATIONS: &[&str] = &["USC00519397", "USC00513117", "USC00519281"];

/// (station, date, prcp, tobs); latest date 2017-08-23, so the cutoff is 2016-08-23
pub const MEASUREMENTS: &[(&str, &str, Option<f64>, f64)] = &[
    ("USC00519397", "2016-08-20", Some(0.1), 70.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519281", "2017-04-20", None, 60.0),
    ("USC00519281", "2017-04-21", Some(0.0), 62.0),
    ("USC00519397", "2017-04-21", Some(0.02), 68.0),
    ("USC00519281", "2017-05-15", None, 75.0),
    ("USC00513117", "2017-05-15", Some(0.2), 71.0),
    ("USC00519281", "2017-06-23", Some(0.08), 79.0),
    ("USC00519397", "2017-06-23", Some(0.0), 80.0),
    ("USC00519281", "2017-06-24", None, 81.0),
    ("USC00519281", "2017-08-18", Some(0.06), 79.0),
    ("USC00519397", "2017-08-23", Some(0.0), 81.0),
    ("USC00513117", "2017-08-23", Some(0.45), 76.0),
];

pub struct TestApp {
    pub dir: TempDir,
    pub db_path: PathBuf,
    pub router: Router,
}

impl TestApp {
    /// Seeded store with the standard fixture
    pub async fn seeded() -> Self {
        Self::with_data(STATIONS, MEASUREMENTS).await
    }

    pub async fn with_data(
        stations: &[&str],
        measurements: &[(&str, &str, Option<f64>, f64)],
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("hawaii.sqlite");
        seed(&db_path, stations, measurements).await;

        let router = router_for(&db_path);
        Self { dir, db_path, router }
    }

    /// Router whose store file does not exist
    pub fn without_store() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("missing.sqlite");
        let router = router_for(&db_path);
        Self { dir, db_path, router }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    /// Independent writable connection for cross-checking queries
    pub async fn inspect(&self) -> SqlitePool {
        SqlitePool::connect_with(SqliteConnectOptions::new().filename(&self.db_path))
            .await
            .unwrap()
    }
}

fn router_for(db_path: &Path) -> Router {
    let store = ClimateStore::connect_lazy(&DatabaseConfig {
        path: db_path.to_string_lossy().into_owned(),
        max_connections: 2,
        acquire_timeout_seconds: 2,
    });
    create_router(AppState::new(store), Duration::from_secs(5))
}

async fn seed(
    path: &Path,
    stations: &[&str],
    measurements: &[(&str, &str, Option<f64>, f64)],
) {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await.unwrap();

    sqlx::raw_sql(
        r#"
        CREATE TABLE station (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            name TEXT,
            latitude REAL,
            longitude REAL,
            elevation REAL
        );
        CREATE TABLE measurement (
            id INTEGER PRIMARY KEY,
            station TEXT NOT NULL,
            date TEXT NOT NULL,
            prcp REAL,
            tobs REAL NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    for station in stations {
        sqlx::query("INSERT INTO station (station, name) VALUES (?1, ?2)")
            .bind(*station)
            .bind(format!("{} station", station))
            .execute(&pool)
            .await
            .unwrap();
    }

    for (station, date, prcp, tobs) in measurements {
        sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
            .bind(*station)
            .bind(*date)
            .bind(*prcp)
            .bind(*tobs)
            .execute(&pool)
            .await
            .unwrap();
    }

    pool.close().await;
}
