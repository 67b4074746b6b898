//! Store backends for cellgate
//!
//! This crate provides the client seam the facade talks to and two
//! implementations of it:
//! - [`MemoryConnection`]: in-process store with the cluster's table rules
//! - [`RestConnection`]: cluster reached through its REST gateway
//!
//! [`connect`] picks one from a [`StoreConfig`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod memory;
pub mod ops;
pub mod rest;

pub use client::{Admin, Connection, Scanner, Table};
pub use config::{connect, StoreBackend, StoreConfig};
pub use memory::MemoryConnection;
pub use ops::{Cell, ColumnSelector, Get, Put, RowFilter, RowResult, Scan, TableDescriptor};
pub use rest::{RestConnection, DEFAULT_SCANNER_BATCH};
