//! Server configuration resolved from environment variables.
//!
//! # Responsibility
//! - Read listen address, store location and logging settings.
//! - Reject malformed values with a message naming the variable.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - `CELLGRID_PORT` wins over the generic `PORT`.

use cellgrid_core::default_log_level;
use std::path::PathBuf;

pub const HOST_VAR: &str = "CELLGRID_HOST";
pub const PORT_VAR: &str = "CELLGRID_PORT";
pub const FALLBACK_PORT_VAR: &str = "PORT";
pub const DB_PATH_VAR: &str = "CELLGRID_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "CELLGRID_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "CELLGRID_LOG_DIR";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_PATH: &str = "cellgrid.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file path, or `:memory:` for a throwaway store.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rotating log files; stderr only when unset.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let port = match read(PORT_VAR).map(|value| (PORT_VAR, value)).or_else(|| {
            read(FALLBACK_PORT_VAR).map(|value| (FALLBACK_PORT_VAR, value))
        }) {
            Some((key, value)) => parse_port(key, &value)?,
            None => defaults.port,
        };

        Ok(Self {
            host: read(HOST_VAR).unwrap_or(defaults.host),
            port,
            db_path: read(DB_PATH_VAR).map(PathBuf::from).unwrap_or(defaults.db_path),
            log_level: read(LOG_LEVEL_VAR).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_VAR),
        })
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "{key} must be a port number between 0 and 65535, got `{value}`"
        )),
    }
}
