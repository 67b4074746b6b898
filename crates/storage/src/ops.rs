//! Operation descriptors and results exchanged with a store backend.
//!
//! These mirror the shapes of a column-family store client: a table is
//! described once, a [`Put`] writes cells of one row, a [`Get`] reads
//! selected columns of one row and a [`Scan`] walks rows in key order.

use std::collections::BTreeMap;

use cellgate_core::{FamilyName, TableName};

/// Schema of a table to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    name: TableName,
    families: Vec<FamilyName>,
}

impl TableDescriptor {
    /// Descriptor with no families yet.
    pub fn new(name: TableName) -> Self {
        Self {
            name,
            families: Vec::new(),
        }
    }

    /// Declare a column family.
    pub fn add_family(mut self, family: FamilyName) -> Self {
        self.families.push(family);
        self
    }

    /// Table name.
    pub fn name(&self) -> &TableName {
        &self.name
    }

    /// Declared families, in declaration order.
    pub fn families(&self) -> &[FamilyName] {
        &self.families
    }
}

/// A single stored cell.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Column family
    pub family: String,
    /// Column qualifier
    pub qualifier: Vec<u8>,
    /// Value
    pub value: Vec<u8>,
}

impl Cell {
    /// Build a cell.
    pub fn new(
        family: impl Into<String>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            family: family.into(),
            qualifier: qualifier.into(),
            value: value.into(),
        }
    }
}

/// Write of one or more cells to a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Put {
    row: Vec<u8>,
    cells: Vec<Cell>,
}

impl Put {
    /// Empty put for `row`.
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            cells: Vec::new(),
        }
    }

    /// Add a cell at `family:qualifier`.
    pub fn add_column(
        mut self,
        family: impl Into<String>,
        qualifier: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Self {
        self.cells.push(Cell::new(family, qualifier, value));
        self
    }

    /// Target row.
    pub fn row(&self) -> &[u8] {
        &self.row
    }

    /// Cells to write.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

/// Column restriction for a [`Get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Every qualifier in the family
    Family(String),
    /// A single `family:qualifier` column
    Column(String, Vec<u8>),
}

impl ColumnSelector {
    /// Family this selector targets.
    pub fn family(&self) -> &str {
        match self {
            ColumnSelector::Family(f) | ColumnSelector::Column(f, _) => f,
        }
    }
}

/// Read of one row.
///
/// With no selectors every cell of the row is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Get {
    row: Vec<u8>,
    columns: Vec<ColumnSelector>,
}

impl Get {
    /// Read all of `row`.
    pub fn new(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            columns: Vec::new(),
        }
    }

    /// Restrict to a whole family.
    pub fn add_family(mut self, family: impl Into<String>) -> Self {
        self.columns.push(ColumnSelector::Family(family.into()));
        self
    }

    /// Restrict to one column.
    pub fn add_column(mut self, family: impl Into<String>, qualifier: impl Into<Vec<u8>>) -> Self {
        self.columns
            .push(ColumnSelector::Column(family.into(), qualifier.into()));
        self
    }

    /// Target row.
    pub fn row(&self) -> &[u8] {
        &self.row
    }

    /// Column restrictions.
    pub fn columns(&self) -> &[ColumnSelector] {
        &self.columns
    }

    /// Whether the cell at `family:qualifier` is selected.
    pub fn selects(&self, family: &str, qualifier: &[u8]) -> bool {
        self.columns.is_empty()
            || self.columns.iter().any(|c| match c {
                ColumnSelector::Family(f) => f == family,
                ColumnSelector::Column(f, q) => f == family && q.as_slice() == qualifier,
            })
    }
}

/// Server-side row filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Keep rows whose key contains a match for the regular expression
    RowKeyRegex(String),
}

/// Range read over a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    families: Vec<String>,
    filter: Option<RowFilter>,
    limit: Option<usize>,
}

impl Scan {
    /// Full-table scan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a family.
    pub fn add_family(mut self, family: impl Into<String>) -> Self {
        self.families.push(family.into());
        self
    }

    /// Attach a row filter.
    pub fn with_filter(mut self, filter: RowFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Stop after `limit` rows.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Family restrictions (empty means all).
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// Row filter, if any.
    pub fn filter(&self) -> Option<&RowFilter> {
        self.filter.as_ref()
    }

    /// Row limit, if any.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Whether cells of `family` are part of the scan.
    pub fn selects_family(&self, family: &str) -> bool {
        self.families.is_empty() || self.families.iter().any(|f| f == family)
    }
}

/// Cells of one row, sorted by family then qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowResult {
    row: Vec<u8>,
    cells: Vec<Cell>,
}

impl RowResult {
    /// Result for `row`; cells are sorted into store order.
    pub fn new(row: impl Into<Vec<u8>>, mut cells: Vec<Cell>) -> Self {
        cells.sort_by(|a, b| (&a.family, &a.qualifier).cmp(&(&b.family, &b.qualifier)));
        Self {
            row: row.into(),
            cells,
        }
    }

    /// Result with no cells.
    pub fn empty(row: impl Into<Vec<u8>>) -> Self {
        Self {
            row: row.into(),
            cells: Vec::new(),
        }
    }

    /// Row key.
    pub fn row(&self) -> &[u8] {
        &self.row
    }

    /// Cells of the row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at `family:qualifier`.
    pub fn value(&self, family: &str, qualifier: &[u8]) -> Option<&[u8]> {
        self.cells
            .iter()
            .find(|c| c.family == family && c.qualifier == qualifier)
            .map(|c| c.value.as_slice())
    }

    /// Qualifier → value map of one family.
    pub fn family_map(&self, family: &str) -> BTreeMap<&[u8], &[u8]> {
        self.cells
            .iter()
            .filter(|c| c.family == family)
            .map(|c| (c.qualifier.as_slice(), c.value.as_slice()))
            .collect()
    }

    /// Append cells of the same row (used when a row arrives in batches).
    pub fn merge(&mut self, other: RowResult) {
        self.cells.extend(other.cells);
        self.cells
            .sort_by(|a, b| (&a.family, &a.qualifier).cmp(&(&b.family, &b.qualifier)));
    }

    /// Consume into the cell list.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
