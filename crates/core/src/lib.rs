//! Core types for cellgate
//!
//! This crate defines the vocabulary shared by every layer of the gateway:
//! - [`TableName`], [`FamilyName`]: validated store identifiers
//! - [`RowCell`], [`ScanOptions`], [`ScanSummary`]: facade result shapes
//! - [`Error`], [`StoreError`]: the error taxonomy
//! - [`WireError`]: the canonical JSON error representation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;
pub mod wire;

pub use error::{Error, Result, StoreError, StoreResult};
pub use types::{
    parse_family_csv, validate_row_key, FamilyName, RowCell, ScanOptions, ScanSummary, TableName,
    DEFAULT_MAX_SCAN_ROWS, MAX_ROW_KEY_LEN, ROW_CELL_DELIMITER,
};
pub use wire::WireError;
