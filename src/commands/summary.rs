use anyhow::{Context, Result};
use climate_api::{config, store::ClimateStore};
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::path::Path;
use tracing::info;

/// Execute the summary command
///
/// Prints row counts, the observation period and the most-active station,
/// using the same queries the HTTP endpoints rely on
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("Climate Dataset Summary");
    println!("=======================\n");

    info!("Loading configuration");
    let cfg = config::load_config(config_path)?;
    let store = ClimateStore::connect_lazy(&cfg.database);

    let result = build_table(&store).await;
    store.close().await;

    let table = result.with_context(|| format!("Failed to summarize {}", cfg.database.path))?;
    println!("{table}");

    Ok(())
}

async fn build_table(store: &ClimateStore) -> Result<Table> {
    let stations = store.station_count().await?;
    let measurements = store.measurement_count().await?;
    let earliest = store.earliest_date().await?;
    let latest = store.latest_date().await?;
    let cutoff = store.cutoff_date().await?;
    let active = store.most_active_station().await?;

    let active_label = match &active {
        Some(activity) => {
            let name = store
                .station(&activity.station)
                .await?
                .and_then(|s| s.name)
                .unwrap_or_default();
            format!("{} {} ({} rows)", activity.station, name, activity.observations)
        }
        None => "-".to_string(),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Metric"), Cell::new("Value")]);

    let or_dash = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());

    table.add_row(vec![Cell::new("Stations"), Cell::new(stations)]);
    table.add_row(vec![Cell::new("Measurements"), Cell::new(measurements)]);
    table.add_row(vec![Cell::new("First observation"), Cell::new(or_dash(earliest))]);
    table.add_row(vec![Cell::new("Last observation"), Cell::new(or_dash(latest))]);
    table.add_row(vec![Cell::new("12-month cutoff"), Cell::new(or_dash(cutoff))]);
    table.add_row(vec![Cell::new("Most-active station"), Cell::new(active_label)]);

    Ok(table)
}
