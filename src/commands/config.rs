use anyhow::Result;

use climate_api::config;
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the effective configuration after defaults, file and environment
/// overrides are merged
pub fn show(config_path: &Path) -> Result<()> {
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("# Effective configuration ({})", config_path.display());
    println!();
    println!("{}", toml::to_string_pretty(&cfg)?);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("Validating configuration...");
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("✓ Configuration is valid");
    println!();
    println!("Summary:");
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Database: {}", cfg.database.path);

    Ok(())
}
