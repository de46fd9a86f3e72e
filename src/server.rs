use anyhow::Result;
use axum::{routing::get, Router};
use std::{net::SocketAddr, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, AppState},
    signals::setup_signal_handlers,
    store::ClimateStore,
};

/// Start the climate API server
///
/// This function:
/// 1. Opens the read-only observation store pool
/// 2. Sets up signal handlers for graceful shutdown
/// 3. Binds to the configured address
/// 4. Serves requests until a shutdown signal arrives, then closes the pool
pub async fn start_server(config: Config) -> Result<()> {
    crate::init_tracing(&config.server.log_level, &config.server.log_format);
    info!("Climate API starting...");

    info!(
        database = %config.database.path,
        max_connections = config.database.max_connections,
        "Opening observation store"
    );
    let store = ClimateStore::connect_lazy(&config.database);

    // Startup continues without the store; /ready and data routes report 503
    match store.ping().await {
        Ok(()) => info!("Observation store reachable"),
        Err(e) => tracing::warn!(error = %e, "Observation store not reachable at startup"),
    }

    let (shutdown_tx, signal_handle) = setup_signal_handlers();
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app = create_router(
        AppState::new(store.clone()),
        Duration::from_secs(config.server.request_timeout_seconds),
    );

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting Climate API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    store.close().await;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/v1.0/precipitation",
            get(handlers::precipitation::precipitation),
        )
        .route("/api/v1.0/stations", get(handlers::stations::list_stations))
        .route(
            "/api/v1.0/tobs",
            get(handlers::tobs::most_active_temperatures),
        )
        .route(
            "/api/v1.0/start-end",
            get(handlers::temperature::stats_by_query),
        )
        .route(
            "/api/v1.0/temperature/:start",
            get(handlers::temperature::stats_from),
        )
        .route(
            "/api/v1.0/temperature/:start/:end",
            get(handlers::temperature::stats_between),
        )
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state);

    Router::new()
        .route("/", get(handlers::index::index))
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
