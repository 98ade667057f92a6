use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub metacat: MetacatConfig,
    #[serde(default)]
    pub lineage: LineageConfig,
}

/// Metacat-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetacatConfig {
    pub db_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Lineage query configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LineageConfig {
    /// Default hop bound for CLI lineage queries when --depth is not given.
    /// 0 means unbounded (exhaust the connected component).
    #[serde(default = "default_lineage_depth")]
    pub default_depth: i64,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            default_depth: default_lineage_depth(),
        }
    }
}

fn default_lineage_depth() -> i64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in METACAT_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("METACAT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.metacat.db_path.as_os_str().is_empty() {
            anyhow::bail!("metacat.db_path must not be empty. Set db_path in config.toml.");
        }

        if self.lineage.default_depth < 0 {
            anyhow::bail!(
                "lineage.default_depth must be >= 0 (0 means unbounded), got {}",
                self.lineage.default_depth
            );
        }

        Ok(())
    }

    /// Get database path
    pub fn db_path(&self) -> &Path {
        &self.metacat.db_path
    }
}
