use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,

    /// Upper bound on handling a single request (default: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

/// Observation store settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// SQLite file holding the `station` and `measurement` tables
    pub path: String,

    /// Pool size, i.e. how many requests may query concurrently (default: 4)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a request waits for a free connection (default: 5)
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_connections() -> u32 {
    4
}

fn default_acquire_timeout() -> u64 {
    5
}

/// Load configuration from defaults, the given TOML file (if present) and
/// `CLIMATE_API__*` environment variables, in that order of precedence.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)?
        .set_default("server.log_level", "info")?
        .set_default("server.log_format", "pretty")?
        .set_default("database.path", "Resources/hawaii.sqlite")?
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("CLIMATE_API").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    match cfg.server.log_format.as_str() {
        "pretty" | "json" => {}
        other => anyhow::bail!("Invalid log format: {} (expected 'pretty' or 'json')", other),
    }

    if cfg.server.request_timeout_seconds == 0 {
        anyhow::bail!("request_timeout_seconds must be >= 1");
    }

    if cfg.database.path.trim().is_empty() {
        anyhow::bail!("Database path cannot be empty");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("max_connections must be >= 1");
    }

    if cfg.database.acquire_timeout_seconds == 0 {
        anyhow::bail!("acquire_timeout_seconds must be >= 1");
    }

    Ok(())
}
