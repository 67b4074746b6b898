//! # cellgate
//!
//! Typed gateway to a column-family store.
//!
//! cellgate wraps a shared store connection and exposes table lifecycle and
//! cell-level operations with typed results: create and drop tables, put and
//! get single cells, read a family or a whole row, and run bounded row-key
//! regex scans.
//!
//! ## Quick Start
//!
//! ```
//! use cellgate::prelude::*;
//!
//! let gw = Gateway::memory();
//! gw.create_table("events", "d")?;
//! gw.put_cell("events", "112213-001", "d", "kind", "login")?;
//!
//! let cells = gw.get_family("events", "112213-001", "d")?;
//! assert_eq!(cells["kind"], "login");
//! # Ok::<(), cellgate::Error>(())
//! ```
//!
//! ## Backends
//!
//! - in-process ([`Gateway::memory`]): enforces the store's table rules,
//!   for tests and local development
//! - REST ([`GatewayBuilder::rest`]): a cluster reached through its REST
//!   gateway
//!
//! ## Errors
//!
//! Every operation returns [`Result`]. Missing tables and families, invalid
//! input and store failures are distinct [`Error`] variants; nothing is
//! swallowed.

#![warn(missing_docs)]

mod gateway;

pub mod prelude;

// Re-export main entry points
pub use gateway::{Gateway, GatewayBuilder};

// Re-export the facade
pub use cellgate_api::{CellFacade, FacadeImpl, GatewayFacade, ScanFacade, TableFacade};

// Re-export core types
pub use cellgate_core::{
    Error, FamilyName, Result, RowCell, ScanOptions, ScanSummary, StoreError, TableName,
    DEFAULT_MAX_SCAN_ROWS, ROW_CELL_DELIMITER,
};

// Re-export store configuration
pub use cellgate_storage::{Connection, MemoryConnection, RestConnection, StoreBackend, StoreConfig};
