use anyhow::Result;
use climate_api::{config, server};
use std::path::Path;

/// Execute the start command
///
/// Loads configuration and runs the server until a shutdown signal arrives
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("Starting climate API...");

    let cfg = config::load_config(config_path)?;

    // Start the server (blocks until shutdown)
    server::start_server(cfg).await?;

    Ok(())
}
