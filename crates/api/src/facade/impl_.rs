//! Shared implementation state for the facade traits.

use std::fmt;
use std::sync::Arc;

use tracing::{error, warn};

use cellgate_core::{Error, Result, ScanOptions, TableName};
use cellgate_storage::Connection;

/// Facade over a shared store connection.
///
/// Implements every facade trait. Holds nothing but the connection and the
/// scan bound, so it can be shared freely across threads.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use cellgate_api::{CellFacade, FacadeImpl, TableFacade};
/// use cellgate_storage::MemoryConnection;
///
/// let facade = FacadeImpl::new(Arc::new(MemoryConnection::new()));
/// assert!(facade.create_table("users", "info").unwrap());
/// facade.put_cell("users", "u1", "info", "name", "Alice").unwrap();
/// assert_eq!(
///     facade.get_cell("users", "u1", "info", "name").unwrap().as_deref(),
///     Some("Alice")
/// );
/// ```
#[derive(Clone)]
pub struct FacadeImpl {
    connection: Arc<dyn Connection>,
    scan_options: ScanOptions,
}

impl FacadeImpl {
    /// Create a facade over an opened connection.
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            scan_options: ScanOptions::default(),
        }
    }

    /// Replace the bounds applied to [`scan_rows_matching`](crate::ScanFacade::scan_rows_matching).
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// The shared store connection.
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Bounds applied to scans.
    pub fn scan_options(&self) -> ScanOptions {
        self.scan_options
    }

    /// Fail with `TableNotFound` unless `table` exists.
    ///
    /// The admin handle is released before returning.
    pub(crate) fn require_table(&self, table: &TableName) -> Result<()> {
        let admin = self.connection.admin()?;
        if admin.table_exists(table)? {
            Ok(())
        } else {
            Err(Error::TableNotFound {
                table: table.to_string(),
            })
        }
    }

    /// Run one facade operation, logging a failure once on the way out.
    pub(crate) fn observe<T>(
        &self,
        op: &'static str,
        table: &str,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        f().map_err(|e| {
            let rejected = e.is_not_found()
                || e.is_invalid_input()
                || e.is_conflict()
                || matches!(e, Error::Encoding { .. });
            if rejected {
                warn!(op, table, error = %e, "Request rejected");
            } else {
                error!(
                    op,
                    table,
                    backend = self.connection.backend(),
                    code = e.error_code(),
                    error = %e,
                    "Store operation failed"
                );
            }
            e
        })
    }
}

impl fmt::Debug for FacadeImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacadeImpl")
            .field("backend", &self.connection.backend())
            .field("scan_options", &self.scan_options)
            .finish()
    }
}

/// Decode stored bytes as text.
pub(crate) fn decode_utf8(bytes: &[u8], what: impl FnOnce() -> String) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| Error::Encoding { what: what() })
}
