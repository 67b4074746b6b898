//! Gateway Comprehensive Test Suite
//!
//! Verifies the gateway facade end to end against the in-process store,
//! which enforces the same table rules as a cluster.
//!
//! ## Key Verification Points
//!
//! 1. Table lifecycle: idempotent create, disable-before-delete drop
//! 2. Missing tables are rejected without mutating the store
//! 3. Cell, family and row reads round-trip exactly what was written
//! 4. Scans honour the row-key pattern, the family and the row bound
//! 5. Store handles are released on every exit path
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all gateway tests
//! cargo test --test gateway_comprehensive
//!
//! # Run scan tests only
//! cargo test --test gateway_comprehensive scan_ops::
//! ```

use std::sync::Arc;

use cellgate::prelude::*;
use cellgate::MemoryConnection;

// Test modules
pub mod cell_ops;
pub mod concurrency;
pub mod properties;
pub mod row_ops;
pub mod scan_ops;
pub mod table_ops;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Create a gateway together with a handle on its store for inspection
pub fn create_gateway() -> (Gateway, MemoryConnection) {
    let store = MemoryConnection::new();
    let gateway = Gateway::from_connection(Arc::new(store.clone()));
    (gateway, store)
}

/// Create a gateway with a single-family table `t1` (family `f`)
pub fn create_gateway_with_table() -> (Gateway, MemoryConnection) {
    let (gateway, store) = create_gateway();
    assert!(gateway.create_table("t1", "f").unwrap());
    (gateway, store)
}

/// Create a gateway over a store with the given scan bound
pub fn create_bounded_gateway(max_rows: usize) -> (Gateway, MemoryConnection) {
    let store = MemoryConnection::new();
    let gateway = Gateway::from_connection(Arc::new(store.clone()));
    let facade = gateway
        .facade()
        .clone()
        .with_scan_options(ScanOptions::with_max_rows(max_rows));
    (Gateway::from_facade(facade), store)
}
