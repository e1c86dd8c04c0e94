//! Server configuration loading
//!
//! Each setting is resolved in priority order:
//! 1. Command-line argument or environment variable (highest priority)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! Command-line and environment values arrive together as [`ConfigOverrides`];
//! the binary's argument parser decides which of the two wins.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default listen address
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default tracing filter directive
pub const DEFAULT_LOG_LEVEL: &str = "bandstore_api=info,bandstore_common=info,tower_http=info";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl ServerConfig {
    /// Merge overrides, file values and compiled defaults
    pub fn resolve(overrides: ConfigOverrides, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();

        Self {
            host: overrides
                .host
                .or(file.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(file.port).unwrap_or(DEFAULT_PORT),
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            log_level: overrides
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Resolve using an explicit config file, or the platform default location
    pub fn load(config_file: Option<PathBuf>, overrides: ConfigOverrides) -> Result<Self> {
        let file = match config_file.or_else(default_config_path) {
            Some(path) => load_toml_config(&path)?,
            None => None,
        };
        Ok(Self::resolve(overrides, file))
    }

    /// `host:port` string suitable for binding a listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load a TOML config file
///
/// A missing file is not an error: it yields `Ok(None)` so startup proceeds
/// on defaults. A file that exists but cannot be parsed is an error.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

    info!("Loaded config file {}", path.display());
    Ok(Some(config))
}

/// Platform config file location (`<config dir>/bandstore/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    let path = dirs::config_dir().map(|d| d.join("bandstore").join("config.toml"));
    if path.is_none() {
        warn!("Could not determine config directory");
    }
    path
}

/// Platform database location (`<local data dir>/bandstore/bands.db`)
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("bandstore"))
        .unwrap_or_else(|| PathBuf::from("./bandstore_data"))
        .join("bands.db")
}
