//! Core types for the gateway
//!
//! This module defines the identifiers and result shapes used throughout the
//! system:
//! - [`TableName`]: validated table identifier with optional namespace
//! - [`FamilyName`]: validated column family identifier
//! - [`RowCell`]: one decoded cell of a row
//! - [`ScanOptions`] / [`ScanSummary`]: bounded scan contract

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Separator between qualifier and value in the delimited row format.
///
/// The format is ambiguous when a qualifier or value itself contains this
/// sequence; prefer the structured [`RowCell`] form.
pub const ROW_CELL_DELIMITER: &str = "&&&";

/// Longest row key the store accepts.
pub const MAX_ROW_KEY_LEN: usize = i16::MAX as usize;

/// Default upper bound on rows returned by a single scan.
pub const DEFAULT_MAX_SCAN_ROWS: usize = 10_000;

/// Name of a table, optionally prefixed by a namespace (`ns:table`).
///
/// Construct with [`TableName::parse`]; the store's naming rules are checked
/// up front so malformed names never reach a backend.
///
/// # Examples
///
/// ```
/// use cellgate_core::TableName;
///
/// let t = TableName::parse("metrics:cpu").unwrap();
/// assert_eq!(t.namespace(), Some("metrics"));
/// assert_eq!(t.qualifier(), "cpu");
///
/// assert!(TableName::parse("").is_err());
/// assert!(TableName::parse("bad name").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Parse and validate a table name.
    pub fn parse(name: &str) -> Result<Self> {
        let (namespace, qualifier) = match name.split_once(':') {
            Some((ns, q)) => (Some(ns), q),
            None => (None, name),
        };

        if let Some(ns) = namespace {
            if ns.is_empty() || !ns.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::invalid_input(format!(
                    "invalid namespace in table name '{}'",
                    name
                )));
            }
        }

        if qualifier.is_empty() {
            return Err(Error::invalid_input("table name must not be empty"));
        }
        if qualifier.starts_with('.') || qualifier.starts_with('-') {
            return Err(Error::invalid_input(format!(
                "table name '{}' must not start with '.' or '-'",
                name
            )));
        }
        if let Some(bad) = qualifier
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(Error::invalid_input(format!(
                "table name '{}' contains illegal character {:?}",
                name, bad
            )));
        }

        Ok(TableName(name.to_string()))
    }

    /// Full name as given, including any namespace prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Namespace part, if present.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once(':').map(|(ns, _)| ns)
    }

    /// Table part without namespace.
    pub fn qualifier(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, q)| q)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TableName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        TableName::parse(&value)
    }
}

impl From<TableName> for String {
    fn from(name: TableName) -> Self {
        name.0
    }
}

/// Name of a column family.
///
/// Families are declared when a table is created and cannot change
/// afterwards. A family name is printable text without `:` (which separates
/// family from qualifier in a column name) and does not start with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FamilyName(String);

impl FamilyName {
    /// Parse and validate a family name.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::invalid_input("column family name must not be empty"));
        }
        if name.starts_with('.') {
            return Err(Error::invalid_input(format!(
                "column family '{}' must not start with '.'",
                name
            )));
        }
        if name.contains(':') {
            return Err(Error::invalid_input(format!(
                "column family '{}' must not contain ':'",
                name
            )));
        }
        if name.chars().any(char::is_control) {
            return Err(Error::invalid_input(format!(
                "column family {:?} contains control characters",
                name
            )));
        }
        Ok(FamilyName(name.to_string()))
    }

    /// Family name as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FamilyName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        FamilyName::parse(&value)
    }
}

impl From<FamilyName> for String {
    fn from(name: FamilyName) -> Self {
        name.0
    }
}

/// Parse a comma-separated family list such as `"f1,f2"`.
///
/// Entries are trimmed. Empty entries and duplicates are rejected.
///
/// # Examples
///
/// ```
/// use cellgate_core::parse_family_csv;
///
/// let families = parse_family_csv("info, stats").unwrap();
/// assert_eq!(families.len(), 2);
/// assert!(parse_family_csv("a,,b").is_err());
/// assert!(parse_family_csv("a,a").is_err());
/// ```
pub fn parse_family_csv(csv: &str) -> Result<Vec<FamilyName>> {
    let mut seen = HashSet::new();
    let mut families = Vec::new();

    for entry in csv.split(',') {
        let family = FamilyName::parse(entry.trim())?;
        if !seen.insert(family.clone()) {
            return Err(Error::invalid_input(format!(
                "column family '{}' listed more than once",
                family
            )));
        }
        families.push(family);
    }

    Ok(families)
}

/// Validate a row key against the store's limits.
pub fn validate_row_key(row_key: &[u8]) -> Result<()> {
    if row_key.is_empty() {
        return Err(Error::invalid_input("row key must not be empty"));
    }
    if row_key.len() > MAX_ROW_KEY_LEN {
        return Err(Error::invalid_input(format!(
            "row key is {} bytes, limit is {}",
            row_key.len(),
            MAX_ROW_KEY_LEN
        )));
    }
    Ok(())
}

/// One cell of a row, decoded to text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowCell {
    /// Column family
    pub family: String,
    /// Column qualifier
    pub qualifier: String,
    /// Cell value
    pub value: String,
}

impl RowCell {
    /// Render as `qualifier&&&value`.
    pub fn to_delimited(&self) -> String {
        format!("{}{}{}", self.qualifier, ROW_CELL_DELIMITER, self.value)
    }
}

/// Bounds applied to a filtered scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Maximum number of matching rows to return
    pub max_rows: usize,
}

impl ScanOptions {
    /// Options with the given row bound.
    pub fn with_max_rows(max_rows: usize) -> Self {
        Self { max_rows }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_rows: DEFAULT_MAX_SCAN_ROWS,
        }
    }
}

/// Outcome of a filtered scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Number of matching rows returned
    pub count: usize,
    /// Keys of the matching rows, in store order (lossy UTF-8)
    pub row_keys: Vec<String>,
    /// `true` when the scan stopped at the row bound
    pub truncated: bool,
}
