//! In-process column-family store
//!
//! Enforces the same rules as a real cluster so the facade can be exercised
//! without one:
//! - creating an existing table fails with `TableExists`
//! - deleting an enabled table fails with `TableEnabled`
//! - data operations on a disabled table fail with `TableDisabled`
//! - cells may only be written to declared families
//!
//! # Design
//!
//! - DashMap: tables sharded by name, lookups never block other tables
//! - RwLock per table: concurrent readers, one writer per table
//! - BTreeMap rows: row keys and `(family, qualifier)` columns kept in store
//!   order, so scans and row reads come back sorted
//!
//! Open admin and table handles are counted; [`MemoryConnection::open_handles`]
//! returns to zero once every handle has been dropped.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use regex::bytes::Regex;
use tracing::debug;

use cellgate_core::{StoreError, StoreResult, TableName};

use crate::client::{Admin, Connection, Scanner, Table};
use crate::ops::{Cell, Get, Put, RowFilter, RowResult, Scan, TableDescriptor};

type Columns = BTreeMap<(String, Vec<u8>), Vec<u8>>;

/// State of one table.
#[derive(Debug)]
struct TableData {
    enabled: bool,
    families: BTreeSet<String>,
    rows: BTreeMap<Vec<u8>, Columns>,
}

impl TableData {
    fn new(descriptor: &TableDescriptor) -> Self {
        Self {
            enabled: true,
            families: descriptor
                .families()
                .iter()
                .map(|f| f.as_str().to_string())
                .collect(),
            rows: BTreeMap::new(),
        }
    }

    fn check_family(&self, table: &TableName, family: &str) -> StoreResult<()> {
        if self.families.contains(family) {
            Ok(())
        } else {
            Err(StoreError::FamilyNotFound {
                table: table.to_string(),
                family: family.to_string(),
            })
        }
    }
}

fn to_cells<'a>(
    columns: impl Iterator<Item = (&'a (String, Vec<u8>), &'a Vec<u8>)>,
) -> Vec<Cell> {
    columns
        .map(|((family, qualifier), value)| Cell::new(family.clone(), qualifier.clone(), value.clone()))
        .collect()
}

#[derive(Debug, Default)]
struct MemoryStore {
    tables: DashMap<TableName, Arc<RwLock<TableData>>>,
    open_handles: AtomicUsize,
}

impl MemoryStore {
    /// Look up a table that accepts data operations.
    fn live_table(&self, name: &TableName) -> StoreResult<Arc<RwLock<TableData>>> {
        let data = self
            .tables
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;

        if !data.read().enabled {
            return Err(StoreError::TableDisabled(name.to_string()));
        }
        Ok(data)
    }
}

/// Counts a handle as open for as long as it lives.
struct HandleGuard<'a>(&'a AtomicUsize);

impl<'a> HandleGuard<'a> {
    fn acquire(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        HandleGuard(counter)
    }
}

impl Drop for HandleGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Connection to an in-process store.
///
/// Clones share the same tables.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cellgate_storage::{Connection, MemoryConnection};
///
/// let store = MemoryConnection::new();
/// let shared: Arc<dyn Connection> = Arc::new(store.clone());
/// assert_eq!(shared.backend(), "memory");
/// assert_eq!(store.table_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryConnection {
    inner: Arc<MemoryStore>,
}

impl MemoryConnection {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of admin and table handles currently open.
    pub fn open_handles(&self) -> usize {
        self.inner.open_handles.load(Ordering::Acquire)
    }

    /// Number of tables, enabled or not.
    pub fn table_count(&self) -> usize {
        self.inner.tables.len()
    }

    /// Total number of cells across all tables.
    pub fn total_cells(&self) -> usize {
        self.inner
            .tables
            .iter()
            .map(|entry| entry.value().read().rows.values().map(|c| c.len()).sum::<usize>())
            .sum()
    }
}

impl Connection for MemoryConnection {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn admin(&self) -> StoreResult<Box<dyn Admin + '_>> {
        Ok(Box::new(MemoryAdmin {
            store: &self.inner,
            _guard: HandleGuard::acquire(&self.inner.open_handles),
        }))
    }

    fn table(&self, name: &TableName) -> StoreResult<Box<dyn Table + '_>> {
        Ok(Box::new(MemoryTable {
            store: &self.inner,
            name: name.clone(),
            _guard: HandleGuard::acquire(&self.inner.open_handles),
        }))
    }
}

struct MemoryAdmin<'a> {
    store: &'a MemoryStore,
    _guard: HandleGuard<'a>,
}

impl Admin for MemoryAdmin<'_> {
    fn table_exists(&self, name: &TableName) -> StoreResult<bool> {
        Ok(self.store.tables.contains_key(name))
    }

    fn create_table(&self, descriptor: &TableDescriptor) -> StoreResult<()> {
        if descriptor.families().is_empty() {
            return Err(StoreError::InvalidRequest(format!(
                "table {} must declare at least one column family",
                descriptor.name()
            )));
        }

        match self.store.tables.entry(descriptor.name().clone()) {
            Entry::Occupied(_) => Err(StoreError::TableExists(descriptor.name().to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(TableData::new(descriptor))));
                debug!(table = %descriptor.name(), "memory store created table");
                Ok(())
            }
        }
    }

    fn is_table_enabled(&self, name: &TableName) -> StoreResult<bool> {
        self.store
            .tables
            .get(name)
            .map(|entry| entry.value().read().enabled)
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    fn disable_table(&self, name: &TableName) -> StoreResult<()> {
        let data = self
            .store
            .tables
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))?;

        let mut data = data.write();
        if !data.enabled {
            return Err(StoreError::TableDisabled(name.to_string()));
        }
        data.enabled = false;
        debug!(table = %name, "memory store disabled table");
        Ok(())
    }

    fn delete_table(&self, name: &TableName) -> StoreResult<()> {
        match self
            .store
            .tables
            .remove_if(name, |_, data| !data.read().enabled)
        {
            Some(_) => {
                debug!(table = %name, "memory store deleted table");
                Ok(())
            }
            None if self.store.tables.contains_key(name) => {
                Err(StoreError::TableEnabled(name.to_string()))
            }
            None => Err(StoreError::TableNotFound(name.to_string())),
        }
    }

    fn list_tables(&self) -> StoreResult<Vec<TableName>> {
        let mut names: Vec<TableName> = self
            .store
            .tables
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }
}

struct MemoryTable<'a> {
    store: &'a MemoryStore,
    name: TableName,
    _guard: HandleGuard<'a>,
}

impl Table for MemoryTable<'_> {
    fn name(&self) -> &TableName {
        &self.name
    }

    fn put(&self, put: &Put) -> StoreResult<()> {
        if put.cells().is_empty() {
            return Err(StoreError::InvalidRequest("put has no columns".into()));
        }

        let data = self.store.live_table(&self.name)?;
        let mut data = data.write();

        // Validate every family before touching the row so a put is all-or-nothing
        for cell in put.cells() {
            data.check_family(&self.name, &cell.family)?;
        }

        let columns = data.rows.entry(put.row().to_vec()).or_default();
        for cell in put.cells() {
            columns.insert(
                (cell.family.clone(), cell.qualifier.clone()),
                cell.value.clone(),
            );
        }
        Ok(())
    }

    fn get(&self, get: &Get) -> StoreResult<RowResult> {
        let data = self.store.live_table(&self.name)?;
        let data = data.read();

        for selector in get.columns() {
            data.check_family(&self.name, selector.family())?;
        }

        let cells = match data.rows.get(get.row()) {
            Some(columns) => to_cells(
                columns
                    .iter()
                    .filter(|((family, qualifier), _)| get.selects(family, qualifier)),
            ),
            None => Vec::new(),
        };
        Ok(RowResult::new(get.row(), cells))
    }

    fn scan(&self, scan: &Scan) -> StoreResult<Scanner<'_>> {
        let regex = match scan.filter() {
            Some(RowFilter::RowKeyRegex(pattern)) => Some(
                Regex::new(pattern).map_err(|e| StoreError::InvalidFilter(e.to_string()))?,
            ),
            None => None,
        };

        let data = self.store.live_table(&self.name)?;
        let data = data.read();

        for family in scan.families() {
            data.check_family(&self.name, family)?;
        }

        let limit = scan.limit().unwrap_or(usize::MAX);
        let rows: Vec<RowResult> = data
            .rows
            .iter()
            .filter(|(row, _)| regex.as_ref().map_or(true, |re| re.is_match(row)))
            .filter_map(|(row, columns)| {
                let cells = to_cells(
                    columns
                        .iter()
                        .filter(|((family, _), _)| scan.selects_family(family)),
                );
                // Rows without cells in the scanned families are not returned
                (!cells.is_empty()).then(|| RowResult::new(row.clone(), cells))
            })
            .take(limit)
            .collect();

        Ok(Box::new(rows.into_iter().map(Ok)))
    }
}
