//! JSON bodies of the store's REST gateway.
//!
//! Row keys, column names and values travel base64-encoded. A column name is
//! `family:qualifier`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use cellgate_core::{StoreError, StoreResult, TableName};

use crate::ops::{Cell, Put, RowResult, TableDescriptor};

/// A batch of rows with their cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellSet {
    #[serde(rename = "Row", default)]
    pub rows: Vec<CellSetRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellSetRow {
    pub key: String,
    #[serde(rename = "Cell", default)]
    pub cells: Vec<CellSetCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellSetCell {
    pub column: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(rename = "$")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TableSchema {
    pub name: String,
    #[serde(rename = "ColumnSchema", default)]
    pub column_schema: Vec<ColumnSchema>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ColumnSchema {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct TableList {
    #[serde(default)]
    pub table: Vec<TableEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct TableEntry {
    pub name: String,
}

impl TableSchema {
    pub fn from_descriptor(descriptor: &TableDescriptor) -> Self {
        Self {
            name: descriptor.name().to_string(),
            column_schema: descriptor
                .families()
                .iter()
                .map(|f| ColumnSchema {
                    name: f.to_string(),
                })
                .collect(),
        }
    }

    pub fn has_family(&self, family: &str) -> bool {
        self.column_schema.iter().any(|c| c.name == family)
    }
}

impl TableList {
    pub fn into_names(self) -> StoreResult<Vec<TableName>> {
        let mut names = self
            .table
            .into_iter()
            .map(|t| {
                TableName::parse(&t.name)
                    .map_err(|e| StoreError::Decode(format!("table list entry: {}", e)))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}

fn decode_b64(field: &str, text: &str) -> StoreResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| StoreError::Decode(format!("{} is not base64: {}", field, e)))
}

/// Encode the cells of a put as a single-row cell set.
pub(crate) fn encode_put(put: &Put) -> CellSet {
    let cells = put
        .cells()
        .iter()
        .map(|cell| {
            let mut column = Vec::with_capacity(cell.family.len() + 1 + cell.qualifier.len());
            column.extend_from_slice(cell.family.as_bytes());
            column.push(b':');
            column.extend_from_slice(&cell.qualifier);
            CellSetCell {
                column: STANDARD.encode(column),
                timestamp: None,
                value: STANDARD.encode(&cell.value),
            }
        })
        .collect();

    CellSet {
        rows: vec![CellSetRow {
            key: STANDARD.encode(put.row()),
            cells,
        }],
    }
}

/// Decode a cell set into row results, one per row entry.
pub(crate) fn decode_rows(cell_set: CellSet) -> StoreResult<Vec<RowResult>> {
    cell_set
        .rows
        .into_iter()
        .map(|row| {
            let key = decode_b64("row key", &row.key)?;
            let cells = row
                .cells
                .into_iter()
                .map(|cell| {
                    let column = decode_b64("column", &cell.column)?;
                    let split = column.iter().position(|b| *b == b':').ok_or_else(|| {
                        StoreError::Decode("column has no family separator".into())
                    })?;
                    let family = String::from_utf8(column[..split].to_vec())
                        .map_err(|_| StoreError::Decode("family is not UTF-8".into()))?;
                    let value = decode_b64("value", &cell.value)?;
                    Ok(Cell::new(family, column[split + 1..].to_vec(), value))
                })
                .collect::<StoreResult<Vec<_>>>()?;
            Ok(RowResult::new(key, cells))
        })
        .collect()
}
