//! HTTP endpoint handlers.
//!
//! Each handler parses its request, runs one facade operation on the
//! blocking pool and shapes the result as JSON:
//! - `/health` - Health check
//! - `/import` - Put one cell from a flat JSON record
//! - `/v1/tables/...` - One endpoint per facade operation

use std::collections::BTreeMap;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cellgate_api::{CellFacade, ScanFacade, TableFacade};
use cellgate_core::{RowCell, ScanOptions, ScanSummary};

use crate::error::AppError;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
///
/// Returns 200 OK if the server is running. The store is not contacted.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "ok" }))
}

/// Body of `POST /import`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub table_name: String,
    pub row_key: String,
    pub family: String,
    pub qualifier: String,
    /// Strings are stored as-is, other JSON values as their JSON text
    pub value: Value,
}

fn value_to_text(value: Value) -> Result<String, AppError> {
    match value {
        Value::Null => Err(AppError::BadRequest("value must not be null".into())),
        Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}

/// Store one cell.
///
/// # Request Body
///
/// ```json
/// {"tableName": "t1", "rowKey": "r1", "family": "f", "qualifier": "q", "value": "v"}
/// ```
pub async fn import_cell(
    State(state): State<AppState>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    let value = value_to_text(request.value)?;

    state
        .run_blocking(move |facade| {
            facade.put_cell(
                &request.table_name,
                &request.row_key,
                &request.family,
                &request.qualifier,
                &value,
            )
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct TableListResponse {
    pub tables: Vec<String>,
}

/// `GET /v1/tables`
pub async fn list_tables(
    State(state): State<AppState>,
) -> Result<Json<TableListResponse>, AppError> {
    let tables = state.run_blocking(|facade| facade.list_tables()).await?;
    Ok(Json(TableListResponse { tables }))
}

#[derive(Debug, Serialize)]
pub struct TableInfoResponse {
    pub table: String,
    pub exists: bool,
}

/// `GET /v1/tables/{table}`
pub async fn table_info(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<TableInfoResponse>, AppError> {
    let probe = table.clone();
    let exists = state
        .run_blocking(move |facade| facade.table_exists(&probe))
        .await?;
    Ok(Json(TableInfoResponse { table, exists }))
}

#[derive(Debug, Deserialize)]
pub struct CreateTableRequest {
    /// Comma-separated family names
    pub families: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTableResponse {
    pub created: bool,
}

/// `PUT /v1/tables/{table}`
pub async fn create_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
    payload: Result<Json<CreateTableRequest>, JsonRejection>,
) -> Result<Json<CreateTableResponse>, AppError> {
    let Json(request) = payload?;
    let created = state
        .run_blocking(move |facade| facade.create_table(&table, &request.families))
        .await?;
    Ok(Json(CreateTableResponse { created }))
}

#[derive(Debug, Serialize)]
pub struct DropTableResponse {
    pub dropped: bool,
}

/// `DELETE /v1/tables/{table}`
pub async fn drop_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<DropTableResponse>, AppError> {
    let dropped = state
        .run_blocking(move |facade| facade.drop_table(&table))
        .await?;
    Ok(Json(DropTableResponse { dropped }))
}

#[derive(Debug, Deserialize)]
pub struct PutCellRequest {
    pub value: String,
}

/// `PUT /v1/tables/{table}/rows/{row}/{family}/{qualifier}`
pub async fn put_cell(
    State(state): State<AppState>,
    Path((table, row, family, qualifier)): Path<(String, String, String, String)>,
    payload: Result<Json<PutCellRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(request) = payload?;
    state
        .run_blocking(move |facade| {
            facade.put_cell(&table, &row, &family, &qualifier, &request.value)
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct CellResponse {
    pub value: Option<String>,
}

/// `GET /v1/tables/{table}/rows/{row}/{family}/{qualifier}`
pub async fn get_cell(
    State(state): State<AppState>,
    Path((table, row, family, qualifier)): Path<(String, String, String, String)>,
) -> Result<Json<CellResponse>, AppError> {
    let value = state
        .run_blocking(move |facade| facade.get_cell(&table, &row, &family, &qualifier))
        .await?;
    Ok(Json(CellResponse { value }))
}

#[derive(Debug, Serialize)]
pub struct FamilyResponse {
    pub cells: BTreeMap<String, String>,
}

/// `GET /v1/tables/{table}/rows/{row}/{family}`
pub async fn get_family(
    State(state): State<AppState>,
    Path((table, row, family)): Path<(String, String, String)>,
) -> Result<Json<FamilyResponse>, AppError> {
    let cells = state
        .run_blocking(move |facade| facade.get_family(&table, &row, &family))
        .await?;
    Ok(Json(FamilyResponse { cells }))
}

/// Output shape of a row read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowFormat {
    /// `[{family, qualifier, value}]`
    #[default]
    Cells,
    /// `["qualifier&&&value"]`
    Delimited,
}

#[derive(Debug, Default, Deserialize)]
pub struct RowQuery {
    #[serde(default)]
    pub format: RowFormat,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RowCells {
    Cells(Vec<RowCell>),
    Delimited(Vec<String>),
}

#[derive(Debug, Serialize)]
pub struct RowResponse {
    pub cells: RowCells,
}

/// `GET /v1/tables/{table}/rows/{row}[?format=delimited]`
pub async fn get_row(
    State(state): State<AppState>,
    Path((table, row)): Path<(String, String)>,
    query: Result<Query<RowQuery>, QueryRejection>,
) -> Result<Json<RowResponse>, AppError> {
    let Query(query) = query?;
    let cells = match query.format {
        RowFormat::Cells => RowCells::Cells(
            state
                .run_blocking(move |facade| facade.get_row(&table, &row))
                .await?,
        ),
        RowFormat::Delimited => RowCells::Delimited(
            state
                .run_blocking(move |facade| facade.get_row_delimited(&table, &row))
                .await?,
        ),
    };
    Ok(Json(RowResponse { cells }))
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub family: String,
    pub pattern: String,
    /// Lower the server's row bound for this request
    #[serde(default)]
    pub limit: Option<usize>,
}

/// `POST /v1/tables/{table}/scan`
///
/// A `limit` above the configured bound is clamped to it.
pub async fn scan(
    State(state): State<AppState>,
    Path(table): Path<String>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanSummary>, AppError> {
    let Json(request) = payload?;
    let bound = state.facade().scan_options().max_rows;
    let options = ScanOptions::with_max_rows(request.limit.map_or(bound, |l| l.min(bound)));

    let summary = state
        .run_blocking(move |facade| {
            facade.scan_rows_matching_with(&table, &request.family, &request.pattern, options)
        })
        .await?;
    Ok(Json(summary))
}
