//! Server configuration from environment variables
//!
//! - `EVENTS_DATA_DIR`: directory of event files loaded at startup (default `data`)
//! - `EVENTS_HOST`: bind address (default `0.0.0.0`)
//! - `EVENTS_PORT`: listen port (default `8080`)
//! - `RUST_LOG`: tracing filter (default `info`)

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::types::{EventsError, EventsResult};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory containing tab-separated event files
    pub data_dir: PathBuf,
    pub host: String,
    pub port: u16,
    /// `tracing_subscriber` env-filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> EventsResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> EventsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let data_dir = match lookup("EVENTS_DATA_DIR") {
            Some(path) if Path::new(&path).is_absolute() => PathBuf::from(path),
            Some(path) => current_dir.join(path),
            None => current_dir.join(DEFAULT_DATA_DIR),
        };

        let port = match lookup("EVENTS_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                EventsError::Config(format!("EVENTS_PORT '{}' is not a valid port: {}", raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            data_dir,
            host: lookup("EVENTS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> EventsResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| EventsError::Config(format!("invalid bind address: {}", e)))
    }
}
