//! Cell Facade - single-cell writes and row reads
//!
//! Every operation checks that the table exists before opening a table
//! handle, so a request against a missing table never reaches the store's
//! data path.
//!
//! ## Desugaring
//!
//! | Facade | Store |
//! |--------|-------|
//! | `put_cell(t, r, f, q, v)` | `put(Put(r).add_column(f, q, v))` |
//! | `get_cell(t, r, f, q)` | `get(Get(r).add_column(f, q)).value(f, q)` |
//! | `get_family(t, r, f)` | `get(Get(r).add_family(f)).family_map(f)` |
//! | `get_row(t, r)` | `get(Get(r)).cells()` |
//! | `get_row_delimited(t, r)` | `get_row(t, r).map(to_delimited)` |

use std::collections::BTreeMap;

use tracing::debug;

use cellgate_core::{validate_row_key, FamilyName, Result, RowCell, TableName};
use cellgate_storage::{Get, Put};

/// Cell-level data operations.
pub trait CellFacade {
    /// Write one cell. The value is stored as its UTF-8 bytes.
    fn put_cell(
        &self,
        table: &str,
        row_key: &str,
        family: &str,
        qualifier: &str,
        value: &str,
    ) -> Result<()>;

    /// Read one cell.
    ///
    /// Returns `None` when the row or the cell does not exist.
    fn get_cell(
        &self,
        table: &str,
        row_key: &str,
        family: &str,
        qualifier: &str,
    ) -> Result<Option<String>>;

    /// Read every qualifier/value pair of one family of a row.
    ///
    /// Empty when the row has no cells in the family.
    fn get_family(&self, table: &str, row_key: &str, family: &str)
        -> Result<BTreeMap<String, String>>;

    /// Read every cell of a row, ordered by family then qualifier.
    fn get_row(&self, table: &str, row_key: &str) -> Result<Vec<RowCell>>;

    /// Read a row as `qualifier&&&value` strings.
    ///
    /// The family is dropped and the format cannot distinguish a delimiter
    /// inside a qualifier or value; use [`get_row`](CellFacade::get_row)
    /// where that matters.
    fn get_row_delimited(&self, table: &str, row_key: &str) -> Result<Vec<String>> {
        Ok(self
            .get_row(table, row_key)?
            .iter()
            .map(RowCell::to_delimited)
            .collect())
    }
}

// =============================================================================
// Implementation
// =============================================================================

use super::impl_::{decode_utf8, FacadeImpl};

fn parse_target(table: &str, row_key: &str) -> Result<TableName> {
    let name = TableName::parse(table)?;
    validate_row_key(row_key.as_bytes())?;
    Ok(name)
}

impl CellFacade for FacadeImpl {
    fn put_cell(
        &self,
        table: &str,
        row_key: &str,
        family: &str,
        qualifier: &str,
        value: &str,
    ) -> Result<()> {
        self.observe("put_cell", table, || {
            let name = parse_target(table, row_key)?;
            let family = FamilyName::parse(family)?;
            self.require_table(&name)?;

            let handle = self.connection().table(&name)?;
            handle.put(&Put::new(row_key).add_column(family.as_str(), qualifier, value))?;

            debug!(table = %name, row_key, family = %family, qualifier, "Put cell");
            Ok(())
        })
    }

    fn get_cell(
        &self,
        table: &str,
        row_key: &str,
        family: &str,
        qualifier: &str,
    ) -> Result<Option<String>> {
        self.observe("get_cell", table, || {
            let name = parse_target(table, row_key)?;
            let family = FamilyName::parse(family)?;
            self.require_table(&name)?;

            let handle = self.connection().table(&name)?;
            let row = handle.get(&Get::new(row_key).add_column(family.as_str(), qualifier))?;

            row.value(family.as_str(), qualifier.as_bytes())
                .map(|bytes| {
                    decode_utf8(bytes, || {
                        format!("value of {}:{}:{}:{}", name, row_key, family, qualifier)
                    })
                })
                .transpose()
        })
    }

    fn get_family(
        &self,
        table: &str,
        row_key: &str,
        family: &str,
    ) -> Result<BTreeMap<String, String>> {
        self.observe("get_family", table, || {
            let name = parse_target(table, row_key)?;
            let family = FamilyName::parse(family)?;
            self.require_table(&name)?;

            let handle = self.connection().table(&name)?;
            let row = handle.get(&Get::new(row_key).add_family(family.as_str()))?;

            row.family_map(family.as_str())
                .into_iter()
                .map(|(qualifier, value)| -> Result<(String, String)> {
                    let qualifier = decode_utf8(qualifier, || {
                        format!("qualifier in {}:{}:{}", name, row_key, family)
                    })?;
                    let value = decode_utf8(value, || {
                        format!("value of {}:{}:{}:{}", name, row_key, family, qualifier)
                    })?;
                    Ok((qualifier, value))
                })
                .collect()
        })
    }

    fn get_row(&self, table: &str, row_key: &str) -> Result<Vec<RowCell>> {
        self.observe("get_row", table, || {
            let name = parse_target(table, row_key)?;
            self.require_table(&name)?;

            let handle = self.connection().table(&name)?;
            let row = handle.get(&Get::new(row_key))?;

            row.into_cells()
                .into_iter()
                .map(|cell| -> Result<RowCell> {
                    let qualifier = decode_utf8(&cell.qualifier, || {
                        format!("qualifier in {}:{}:{}", name, row_key, cell.family)
                    })?;
                    let value = decode_utf8(&cell.value, || {
                        format!("value of {}:{}:{}:{}", name, row_key, cell.family, qualifier)
                    })?;
                    Ok(RowCell {
                        family: cell.family,
                        qualifier,
                        value,
                    })
                })
                .collect()
        })
    }
}
