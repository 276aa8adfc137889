use crate::db::repositories::incidents::DEFAULT_RECENT_LIMIT;
use crate::error::Error;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the configuration file path
pub const CONFIG_ENV_VAR: &str = "GUARDIAN_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API server address
    #[serde(default = "default_address")]
    pub address: String,
    /// API server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory with the built dashboard, served for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
    /// How long browsers may cache CORS preflight responses
    #[serde(default = "default_cors_max_age")]
    pub cors_max_age_secs: u64,
}

fn default_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_max_age() -> u64 {
    3600
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
            log_level: default_log_level(),
            static_dir: None,
            cors_max_age_secs: default_cors_max_age(),
        }
    }
}

/// In-memory storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Populate the store with the demo data set on startup
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    /// Number of incidents returned by the recent incidents endpoint
    #[serde(default = "default_recent_incidents_limit")]
    pub recent_incidents_limit: usize,
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_recent_incidents_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
            recent_incidents_limit: default_recent_incidents_limit(),
        }
    }
}

/// Load configuration from a file or use default
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    match config_path {
        Some(path) => {
            let config_str = std::fs::read_to_string(path)
                .context(format!("Failed to read config file: {:?}", path))?;

            parse_config(path, &config_str)
        }
        None => Ok(Config::default()),
    }
}

fn parse_config(path: &Path, config_str: &str) -> Result<Config> {
    let config = if path.extension().map_or(false, |ext| ext == "json") {
        serde_json::from_str(config_str).context("Failed to parse JSON config")?
    } else if path.extension().map_or(false, |ext| ext == "toml") {
        toml::from_str(config_str).context("Failed to parse TOML config")?
    } else {
        return Err(Error::Config(format!("Unsupported config file format: {:?}", path)).into());
    };

    Ok(config)
}

/// Resolve the configuration path from the first CLI argument or the environment
pub fn config_path_from_env() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV_VAR).ok())
        .map(PathBuf::from)
}
