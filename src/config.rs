//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `sink.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: bind address, port, per-request timeout.
//!     - HistoryConfig: how many recent readings are kept (1..=10).
//!     - LoggingConfig: default tracing filter (RUST_LOG wins if set).
//!
//! every field has a default, so a partial file (or none at all) is fine.
//!
//! ==============================================================================

use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::store::HISTORY_CAPACITY;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SinkConfig {
    pub server: ServerConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5003,
            request_timeout_seconds: 30,
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: HISTORY_CAPACITY }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds.max(1))
    }
}

impl SinkConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let mut config: SinkConfig = toml::from_str(content).context("Failed to parse config")?;
        config.history.capacity = config.history.capacity.clamp(1, HISTORY_CAPACITY);
        config.server.request_timeout_seconds = config.server.request_timeout_seconds.max(1);
        Ok(config)
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;
        Self::from_toml(&content)
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            PathBuf::from("config").join("sink.toml"),
            PathBuf::from("..").join("config").join("sink.toml"),
        ];

        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        println!("[CONFIG] Loaded from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        println!("[CONFIG] Warning: Failed to load {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        println!("[CONFIG] Warning: No config file found - using defaults");
        Self::default()
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("┌─────────────────────────────────────────┐");
        println!("│           SINK CONFIGURATION            │");
        println!("├─────────────────────────────────────────┤");
        println!("│ Listen: {}:{}", self.server.host, self.server.port);
        println!("│ Request Timeout: {}s", self.server.request_timeout_seconds);
        println!("│ History Size: {}", self.history.capacity);
        println!("│ Log Level: {}", self.logging.level);
        println!("└─────────────────────────────────────────┘");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        let config = SinkConfig::default();
        assert_eq!(config.server.bind_addr().unwrap(), "0.0.0.0:5003".parse::<SocketAddr>().unwrap());
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_is_defaults() {
        assert_eq!(SinkConfig::from_toml("").unwrap(), SinkConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = SinkConfig::from_toml(
            r#"
            [server]
            port = 8080

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.history.capacity, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let config = SinkConfig::from_toml("[history]\ncapacity = 0\n").unwrap();
        assert_eq!(config.history.capacity, 1);
    }

    #[test]
    fn test_large_capacity_clamped() {
        let config = SinkConfig::from_toml("[history]\ncapacity = 50\n").unwrap();
        assert_eq!(config.history.capacity, HISTORY_CAPACITY);
    }

    #[test]
    fn test_zero_timeout_clamped() {
        let config = SinkConfig::from_toml("[server]\nrequest_timeout_seconds = 0\n").unwrap();
        assert_eq!(config.server.request_timeout_seconds, 1);
        assert_eq!(config.server.request_timeout(), Duration::from_secs(1));

        let mut raw = SinkConfig::default();
        raw.server.request_timeout_seconds = 0;
        assert_eq!(raw.server.request_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(SinkConfig::from_toml("[server]\nport = \"nope\"").is_err());
    }

    #[test]
    fn test_bad_host_is_error() {
        let mut config = SinkConfig::default();
        config.server.host = "not an ip".to_string();
        assert!(config.server.bind_addr().is_err());
    }
}
