//! Main entry point for cellgate.
//!
//! This module provides the `Gateway` struct, which owns the shared store
//! connection and exposes every facade operation.

use std::ops::Deref;
use std::sync::Arc;

use tracing::info;

use cellgate_api::FacadeImpl;
use cellgate_core::{Error, Result, ScanOptions};
use cellgate_storage::{connect, Connection, MemoryConnection, StoreConfig};

/// The gateway.
///
/// Create one with [`Gateway::memory`] or [`Gateway::builder`] and share it
/// (it is `Send + Sync`). It dereferences to [`FacadeImpl`], so the facade
/// operations are called directly on it once the traits are in scope.
///
/// # Example
///
/// ```
/// use cellgate::prelude::*;
///
/// let gw = Gateway::memory();
/// assert!(gw.create_table("users", "info,stats")?);
///
/// gw.put_cell("users", "u1", "info", "name", "Alice")?;
/// assert_eq!(gw.get_cell("users", "u1", "info", "name")?.as_deref(), Some("Alice"));
///
/// let summary = gw.scan_rows_matching("users", "info", "^u")?;
/// assert_eq!(summary.count, 1);
/// # Ok::<(), cellgate::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Gateway {
    facade: FacadeImpl,
}

impl Gateway {
    /// Gateway over a fresh in-process store.
    ///
    /// Data lives as long as the gateway (and its clones).
    pub fn memory() -> Self {
        Self::from_connection(Arc::new(MemoryConnection::new()))
    }

    /// Gateway over an already opened connection, with default scan bounds.
    pub fn from_connection(connection: Arc<dyn Connection>) -> Self {
        Self {
            facade: FacadeImpl::new(connection),
        }
    }

    /// Gateway over a configured facade.
    pub fn from_facade(facade: FacadeImpl) -> Self {
        Self { facade }
    }

    /// Create a builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cellgate::Gateway;
    ///
    /// let gw = Gateway::builder()
    ///     .rest("http://hbase-rest:8080")
    ///     .max_scan_rows(500)
    ///     .open()?;
    /// # Ok::<(), cellgate::Error>(())
    /// ```
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// The facade.
    pub fn facade(&self) -> &FacadeImpl {
        &self.facade
    }

    /// The shared store connection.
    pub fn connection(&self) -> &Arc<dyn Connection> {
        self.facade.connection()
    }

    /// Short name of the store backend (`memory`, `rest`).
    pub fn backend(&self) -> &'static str {
        self.facade.connection().backend()
    }
}

impl Deref for Gateway {
    type Target = FacadeImpl;

    fn deref(&self) -> &FacadeImpl {
        &self.facade
    }
}

/// Builder for gateway configuration.
///
/// Defaults to the in-process store and a scan bound of
/// [`DEFAULT_MAX_SCAN_ROWS`](cellgate_core::DEFAULT_MAX_SCAN_ROWS).
#[derive(Debug, Clone, Default)]
pub struct GatewayBuilder {
    store: StoreConfig,
    scan: ScanOptions,
}

impl GatewayBuilder {
    /// Create a builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the in-process store.
    pub fn memory(mut self) -> Self {
        self.store = StoreConfig::memory();
        self
    }

    /// Use the REST gateway at `url`.
    pub fn rest(mut self, url: impl Into<String>) -> Self {
        self.store = StoreConfig::rest(url);
        self
    }

    /// Use explicit store settings.
    pub fn store_config(mut self, config: StoreConfig) -> Self {
        self.store = config;
        self
    }

    /// Most rows a single scan returns.
    pub fn max_scan_rows(mut self, max_rows: usize) -> Self {
        self.scan = ScanOptions::with_max_rows(max_rows);
        self
    }

    /// Open the store connection and build the gateway.
    pub fn open(self) -> Result<Gateway> {
        if self.scan.max_rows == 0 {
            return Err(Error::invalid_input("max_scan_rows must be at least 1"));
        }

        let connection = connect(&self.store)?;
        info!(
            backend = connection.backend(),
            max_scan_rows = self.scan.max_rows,
            "Gateway opened"
        );
        Ok(Gateway {
            facade: FacadeImpl::new(connection).with_scan_options(self.scan),
        })
    }
}
