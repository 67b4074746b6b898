//! Gateway configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) gives a working in-memory gateway on `127.0.0.1:8080`.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//! request_timeout_ms = 30000
//!
//! [store]
//! backend = "rest"
//! rest_url = "http://hbase-rest:8080"
//! zookeeper_quorum = "zk1,zk2,zk3"
//!
//! [scan]
//! max_rows = 10000
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cellgate_core::{ScanOptions, DEFAULT_MAX_SCAN_ROWS};
use cellgate_storage::{StoreBackend, StoreConfig};

/// Configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// File that was being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or settings contradict each other
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Listen address
    pub bind: String,
    /// Upper bound on one request's store work, in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ServerSettings {
    /// Request timeout as a duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// `[scan]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Most rows a single scan returns
    pub max_rows: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_SCAN_ROWS,
        }
    }
}

impl From<ScanSettings> for ScanOptions {
    fn from(settings: ScanSettings) -> Self {
        ScanOptions::with_max_rows(settings.max_rows)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One compact text line per event
    #[default]
    Compact,
    /// JSON Lines
    Json,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Base level or filter directive (`info`, `cellgate=debug,info`)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP listener
    pub server: ServerSettings,
    /// Store connection
    pub store: StoreConfig,
    /// Scan bounds
    pub scan: ScanSettings,
    /// Logging
    pub logging: LoggingSettings,
}

impl GatewayConfig {
    /// Read and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GatewayConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::Invalid("server.bind must not be empty".into()));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "server.request_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.scan.max_rows == 0 {
            return Err(ConfigError::Invalid(
                "scan.max_rows must be greater than zero".into(),
            ));
        }
        if self.store.backend == StoreBackend::Rest {
            match self.store.rest_url.as_deref() {
                Some(url) if url.starts_with("http://") || url.starts_with("https://") => {}
                Some(url) => {
                    return Err(ConfigError::Invalid(format!(
                        "store.rest_url must be an http(s) URL, got '{}'",
                        url
                    )))
                }
                None => {
                    return Err(ConfigError::Invalid(
                        "store.rest_url is required when store.backend = \"rest\"".into(),
                    ))
                }
            }
        }
        if self.store.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "store.timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
