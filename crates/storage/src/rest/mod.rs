//! Store backend speaking to a cluster through its REST gateway.
//!
//! Endpoints used:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | schema | `GET/PUT/DELETE /{table}/schema` |
//! | list tables | `GET /` |
//! | put | `PUT /{table}/{row}` with a cell set body |
//! | get | `GET /{table}/{row}[/{columns}]` |
//! | scan | `PUT /{table}/scanner`, then `GET`/`DELETE` on the returned location |
//!
//! The gateway has no enable/disable endpoint. Disabled tables are tracked
//! on the connection so that the disable-before-delete order and the
//! rejection of data operations on disabled tables behave like the
//! in-process store.

mod cellset;
mod scanner;
#[cfg(test)]
mod test_gateway;

use std::collections::HashSet;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tracing::debug;
use ureq::{Agent, AgentBuilder};

use cellgate_core::{StoreError, StoreResult, TableName};

use crate::client::{Admin, Connection, Scanner, Table};
use crate::ops::{ColumnSelector, Get, Put, RowFilter, RowResult, Scan, TableDescriptor};

use cellset::{decode_rows, encode_put, CellSet, TableList, TableSchema};
use scanner::RestScanner;

/// Default number of cells fetched per scanner page.
pub const DEFAULT_SCANNER_BATCH: usize = 1000;

/// Map a ureq failure to a store error.
pub(crate) fn status_error(err: ureq::Error) -> StoreError {
    match err {
        ureq::Error::Status(status, response) => StoreError::Http {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => StoreError::Transport(transport.to_string()),
    }
}

/// Connection to a REST gateway.
#[derive(Debug)]
pub struct RestConnection {
    agent: Agent,
    base_url: String,
    scanner_batch: usize,
    disabled: Mutex<HashSet<TableName>>,
}

impl RestConnection {
    /// Connect to the gateway at `base_url` (for example `http://hbase:8080`).
    ///
    /// No request is made until the first operation.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            scanner_batch: DEFAULT_SCANNER_BATCH,
            disabled: Mutex::new(HashSet::new()),
        }
    }

    /// Set the number of cells fetched per scanner page.
    pub fn with_scanner_batch(mut self, batch: usize) -> Self {
        self.scanner_batch = batch.max(1);
        self
    }

    /// Gateway base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &TableName) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(table.as_str()))
    }

    fn schema(&self, table: &TableName) -> StoreResult<Option<TableSchema>> {
        let url = format!("{}/schema", self.table_url(table));
        match self.agent.get(&url).set("Accept", "application/json").call() {
            Ok(response) => response
                .into_json()
                .map(Some)
                .map_err(|e| StoreError::Decode(format!("schema of {}: {}", table, e))),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(status_error(e)),
        }
    }

    fn ensure_enabled(&self, table: &TableName) -> StoreResult<()> {
        if self.disabled.lock().contains(table) {
            return Err(StoreError::TableDisabled(table.to_string()));
        }
        Ok(())
    }

    /// Work out why a data request was refused.
    ///
    /// The gateway answers a missing table or family with a bare status, so
    /// the schema is consulted to name the culprit.
    fn explain_failure<'f>(
        &self,
        table: &TableName,
        families: impl IntoIterator<Item = &'f str>,
        err: ureq::Error,
    ) -> StoreError {
        let original = status_error(err);
        if !matches!(original, StoreError::Http { .. }) {
            return original;
        }

        match self.schema(table) {
            Ok(None) => StoreError::TableNotFound(table.to_string()),
            Ok(Some(schema)) => families
                .into_iter()
                .find(|f| !schema.has_family(f))
                .map(|family| StoreError::FamilyNotFound {
                    table: table.to_string(),
                    family: family.to_string(),
                })
                .unwrap_or(original),
            Err(_) => original,
        }
    }
}

impl Connection for RestConnection {
    fn backend(&self) -> &'static str {
        "rest"
    }

    fn admin(&self) -> StoreResult<Box<dyn Admin + '_>> {
        Ok(Box::new(RestAdmin { conn: self }))
    }

    fn table(&self, name: &TableName) -> StoreResult<Box<dyn Table + '_>> {
        Ok(Box::new(RestTable {
            conn: self,
            name: name.clone(),
        }))
    }
}

struct RestAdmin<'a> {
    conn: &'a RestConnection,
}

impl Admin for RestAdmin<'_> {
    fn table_exists(&self, name: &TableName) -> StoreResult<bool> {
        Ok(self.conn.schema(name)?.is_some())
    }

    fn create_table(&self, descriptor: &TableDescriptor) -> StoreResult<()> {
        if descriptor.families().is_empty() {
            return Err(StoreError::InvalidRequest(format!(
                "table {} must declare at least one column family",
                descriptor.name()
            )));
        }
        if self.table_exists(descriptor.name())? {
            return Err(StoreError::TableExists(descriptor.name().to_string()));
        }

        let url = format!("{}/schema", self.conn.table_url(descriptor.name()));
        self.conn
            .agent
            .put(&url)
            .set("Accept", "application/json")
            .send_json(TableSchema::from_descriptor(descriptor))
            .map_err(status_error)?;

        self.conn.disabled.lock().remove(descriptor.name());
        debug!(table = %descriptor.name(), "rest store created table");
        Ok(())
    }

    fn is_table_enabled(&self, name: &TableName) -> StoreResult<bool> {
        if !self.table_exists(name)? {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        Ok(!self.conn.disabled.lock().contains(name))
    }

    fn disable_table(&self, name: &TableName) -> StoreResult<()> {
        if !self.table_exists(name)? {
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        if !self.conn.disabled.lock().insert(name.clone()) {
            return Err(StoreError::TableDisabled(name.to_string()));
        }
        debug!(table = %name, "rest store disabled table");
        Ok(())
    }

    fn delete_table(&self, name: &TableName) -> StoreResult<()> {
        if !self.table_exists(name)? {
            self.conn.disabled.lock().remove(name);
            return Err(StoreError::TableNotFound(name.to_string()));
        }
        if !self.conn.disabled.lock().contains(name) {
            return Err(StoreError::TableEnabled(name.to_string()));
        }

        let url = format!("{}/schema", self.conn.table_url(name));
        match self.conn.agent.delete(&url).call() {
            Ok(_) | Err(ureq::Error::Status(404, _)) => {}
            Err(e) => return Err(status_error(e)),
        }

        self.conn.disabled.lock().remove(name);
        debug!(table = %name, "rest store deleted table");
        Ok(())
    }

    fn list_tables(&self) -> StoreResult<Vec<TableName>> {
        let url = format!("{}/", self.conn.base_url);
        let list: TableList = self
            .conn
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
            .map_err(status_error)?
            .into_json()
            .map_err(|e| StoreError::Decode(format!("table list: {}", e)))?;
        list.into_names()
    }
}

struct RestTable<'a> {
    conn: &'a RestConnection,
    name: TableName,
}

impl RestTable<'_> {
    fn column_spec(selector: &ColumnSelector) -> String {
        match selector {
            ColumnSelector::Family(family) => urlencoding::encode(family).into_owned(),
            ColumnSelector::Column(family, qualifier) => format!(
                "{}:{}",
                urlencoding::encode(family),
                urlencoding::encode_binary(qualifier)
            ),
        }
    }
}

impl Table for RestTable<'_> {
    fn name(&self) -> &TableName {
        &self.name
    }

    fn put(&self, put: &Put) -> StoreResult<()> {
        if put.cells().is_empty() {
            return Err(StoreError::InvalidRequest("put has no columns".into()));
        }
        self.conn.ensure_enabled(&self.name)?;

        let url = format!(
            "{}/{}",
            self.conn.table_url(&self.name),
            urlencoding::encode_binary(put.row())
        );
        self.conn
            .agent
            .put(&url)
            .set("Accept", "application/json")
            .send_json(encode_put(put))
            .map_err(|e| {
                self.conn.explain_failure(
                    &self.name,
                    put.cells().iter().map(|c| c.family.as_str()),
                    e,
                )
            })?;
        Ok(())
    }

    fn get(&self, get: &Get) -> StoreResult<RowResult> {
        self.conn.ensure_enabled(&self.name)?;

        let mut url = format!(
            "{}/{}",
            self.conn.table_url(&self.name),
            urlencoding::encode_binary(get.row())
        );
        if !get.columns().is_empty() {
            let spec: Vec<String> = get.columns().iter().map(Self::column_spec).collect();
            url.push('/');
            url.push_str(&spec.join(","));
        }

        let response = match self
            .conn
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(e) => {
                // 404 covers a missing row as well as a missing table or family
                let families = get.columns().iter().map(ColumnSelector::family);
                return match self.conn.explain_failure(&self.name, families, e) {
                    StoreError::Http { status: 404, .. } => Ok(RowResult::empty(get.row())),
                    other => Err(other),
                };
            }
        };

        let cell_set: CellSet = response
            .into_json()
            .map_err(|e| StoreError::Decode(format!("row of {}: {}", self.name, e)))?;
        let row = decode_rows(cell_set)?
            .into_iter()
            .find(|r| r.row() == get.row())
            .map(|r| {
                let cells = r
                    .into_cells()
                    .into_iter()
                    .filter(|c| get.selects(&c.family, &c.qualifier))
                    .collect();
                RowResult::new(get.row(), cells)
            })
            .unwrap_or_else(|| RowResult::empty(get.row()));
        Ok(row)
    }

    fn scan(&self, scan: &Scan) -> StoreResult<Scanner<'_>> {
        if let Some(RowFilter::RowKeyRegex(pattern)) = scan.filter() {
            regex::Regex::new(pattern).map_err(|e| StoreError::InvalidFilter(e.to_string()))?;
        }
        self.conn.ensure_enabled(&self.name)?;

        let mut model = Map::new();
        model.insert("batch".into(), json!(self.conn.scanner_batch));
        if !scan.families().is_empty() {
            let columns: Vec<Value> = scan
                .families()
                .iter()
                .map(|f| Value::String(STANDARD.encode(f)))
                .collect();
            model.insert("column".into(), Value::Array(columns));
        }
        if let Some(RowFilter::RowKeyRegex(pattern)) = scan.filter() {
            let filter = json!({
                "type": "RowFilter",
                "op": "EQUAL",
                "comparator": { "type": "RegexStringComparator", "value": pattern },
            });
            model.insert("filter".into(), Value::String(filter.to_string()));
        }

        let url = format!("{}/scanner", self.conn.table_url(&self.name));
        let response = self
            .conn
            .agent
            .put(&url)
            .set("Accept", "application/json")
            .send_json(Value::Object(model))
            .map_err(|e| {
                self.conn.explain_failure(
                    &self.name,
                    scan.families().iter().map(String::as_str),
                    e,
                )
            })?;

        let location = response
            .header("Location")
            .map(str::to_string)
            .ok_or_else(|| StoreError::Decode("scanner response has no Location".into()))?;
        debug!(table = %self.name, scanner = %location, "opened scanner");

        Ok(Box::new(RestScanner::new(
            &self.conn.agent,
            location,
            scan.limit(),
        )))
    }
}
