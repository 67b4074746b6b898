//! Store client seam
//!
//! A [`Connection`] is the long-lived, process-wide handle to a
//! column-family store. Work happens through short-lived resources opened
//! from it: an [`Admin`] for table lifecycle and a [`Table`] for data. Both
//! are returned boxed and are released when dropped, so every exit path of
//! a caller (including `?` early returns) gives them back.
//!
//! # Thread Safety
//!
//! `Connection` is `Send + Sync` and is shared as `Arc<dyn Connection>`.
//! Admin and table handles are per-call and are not shared.

use cellgate_core::{StoreResult, TableName};

use crate::ops::{Get, Put, RowResult, Scan, TableDescriptor};

/// Iterator over scan results.
pub type Scanner<'a> = Box<dyn Iterator<Item = StoreResult<RowResult>> + 'a>;

/// Shared handle to a column-family store.
pub trait Connection: Send + Sync {
    /// Short backend name for logs (`memory`, `rest`).
    fn backend(&self) -> &'static str;

    /// Open an administrative resource.
    fn admin(&self) -> StoreResult<Box<dyn Admin + '_>>;

    /// Open a data resource for `name`.
    ///
    /// Opening does not check that the table exists; operations on the
    /// handle fail with `TableNotFound` if it does not.
    fn table(&self, name: &TableName) -> StoreResult<Box<dyn Table + '_>>;
}

/// Table lifecycle operations.
pub trait Admin {
    /// Whether `name` exists (enabled or not).
    fn table_exists(&self, name: &TableName) -> StoreResult<bool>;

    /// Create a table. Fails with `TableExists` if the name is taken.
    fn create_table(&self, descriptor: &TableDescriptor) -> StoreResult<()>;

    /// Whether `name` is enabled.
    fn is_table_enabled(&self, name: &TableName) -> StoreResult<bool>;

    /// Disable a table. Fails with `TableDisabled` if already disabled.
    fn disable_table(&self, name: &TableName) -> StoreResult<()>;

    /// Delete a table. Fails with `TableEnabled` unless disabled first.
    fn delete_table(&self, name: &TableName) -> StoreResult<()>;

    /// Names of all tables.
    fn list_tables(&self) -> StoreResult<Vec<TableName>>;
}

/// Data operations on one table.
pub trait Table {
    /// Table this handle targets.
    fn name(&self) -> &TableName;

    /// Write the cells of a [`Put`] atomically for its row.
    fn put(&self, put: &Put) -> StoreResult<()>;

    /// Read one row. A missing row yields an empty [`RowResult`].
    fn get(&self, get: &Get) -> StoreResult<RowResult>;

    /// Iterate rows in key order.
    fn scan(&self, scan: &Scan) -> StoreResult<Scanner<'_>>;
}
