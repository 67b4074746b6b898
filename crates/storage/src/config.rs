//! Store connection settings and backend selection.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use cellgate_core::{StoreError, StoreResult};

use crate::client::Connection;
use crate::memory::MemoryConnection;
use crate::rest::{RestConnection, DEFAULT_SCANNER_BATCH};

/// Which store implementation to connect to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-process store; data lives as long as the connection
    #[default]
    Memory,
    /// Cluster reached through its REST gateway
    Rest,
}

/// Store connection settings.
///
/// The cluster coordinates (`rootdir`, `master`, quorum) are carried for
/// clients that need them and reported at startup; the REST backend itself
/// only needs `rest_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to use
    pub backend: StoreBackend,
    /// Base URL of the REST gateway (required for `rest`)
    pub rest_url: Option<String>,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Cells fetched per scanner page
    pub scanner_batch: usize,
    /// Cluster root directory
    pub rootdir: Option<String>,
    /// Whether the cluster runs distributed
    pub cluster_distributed: bool,
    /// Master address
    pub master: Option<String>,
    /// Coordination quorum hosts, comma-separated
    pub zookeeper_quorum: Option<String>,
    /// Coordination client port
    pub zookeeper_client_port: u16,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            rest_url: None,
            timeout_ms: 30_000,
            scanner_batch: DEFAULT_SCANNER_BATCH,
            rootdir: None,
            cluster_distributed: false,
            master: None,
            zookeeper_quorum: None,
            zookeeper_client_port: 2181,
        }
    }
}

impl StoreConfig {
    /// Settings for the in-process store.
    pub fn memory() -> Self {
        Self::default()
    }

    /// Settings for a REST gateway at `url`.
    pub fn rest(url: impl Into<String>) -> Self {
        Self {
            backend: StoreBackend::Rest,
            rest_url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cluster client properties in `hbase.*` form.
    ///
    /// Only settings that were given are included.
    pub fn properties(&self) -> BTreeMap<&'static str, String> {
        let mut props = BTreeMap::new();
        if let Some(rootdir) = &self.rootdir {
            props.insert("hbase.rootdir", rootdir.clone());
        }
        props.insert(
            "hbase.cluster.distributed",
            self.cluster_distributed.to_string(),
        );
        if let Some(master) = &self.master {
            props.insert("hbase.master", master.clone());
        }
        if let Some(quorum) = &self.zookeeper_quorum {
            props.insert("hbase.zookeeper.quorum", quorum.clone());
            props.insert(
                "hbase.zookeeper.property.clientPort",
                self.zookeeper_client_port.to_string(),
            );
        }
        props
    }
}

/// Open the connection described by `config`.
///
/// Called once at startup; the returned connection is shared by every
/// request.
pub fn connect(config: &StoreConfig) -> StoreResult<Arc<dyn Connection>> {
    let connection: Arc<dyn Connection> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryConnection::new()),
        StoreBackend::Rest => {
            let url = config.rest_url.as_deref().ok_or_else(|| {
                StoreError::InvalidRequest("store.rest_url is required for the rest backend".into())
            })?;
            Arc::new(
                RestConnection::new(url, config.timeout())
                    .with_scanner_batch(config.scanner_batch),
            )
        }
    };

    info!(
        backend = connection.backend(),
        properties = ?config.properties(),
        "Store connection ready"
    );
    Ok(connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_memory() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(connect(&config).unwrap().backend(), "memory");
    }

    #[test]
    fn test_rest_requires_url() {
        let config = StoreConfig {
            backend: StoreBackend::Rest,
            ..StoreConfig::default()
        };
        assert!(matches!(connect(&config), Err(StoreError::InvalidRequest(_))));
    }

    #[test]
    fn test_rest_connects_lazily() {
        let connection = connect(&StoreConfig::rest("http://127.0.0.1:9")).unwrap();
        assert_eq!(connection.backend(), "rest");
    }

    #[test]
    fn test_properties() {
        let config = StoreConfig {
            rootdir: Some("hdfs://nn:8020/hbase".into()),
            cluster_distributed: true,
            master: Some("master:16000".into()),
            zookeeper_quorum: Some("zk1,zk2".into()),
            ..StoreConfig::default()
        };
        let props = config.properties();
        assert_eq!(props["hbase.rootdir"], "hdfs://nn:8020/hbase");
        assert_eq!(props["hbase.cluster.distributed"], "true");
        assert_eq!(props["hbase.zookeeper.property.clientPort"], "2181");
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"backend":"rest","rest_url":"http://h:8080"}"#).unwrap();
        assert_eq!(config.backend, StoreBackend::Rest);
        assert_eq!(config.timeout_ms, 30_000);
    }
}
