//! Router construction.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the gateway router.
///
/// `/import/test1` is kept as an alias of `/import` for existing clients.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/import", post(handlers::import_cell))
        .route("/import/test1", post(handlers::import_cell))
        .route("/v1/tables", get(handlers::list_tables))
        .route(
            "/v1/tables/{table}",
            get(handlers::table_info)
                .put(handlers::create_table)
                .delete(handlers::drop_table),
        )
        .route("/v1/tables/{table}/scan", post(handlers::scan))
        .route("/v1/tables/{table}/rows/{row}", get(handlers::get_row))
        .route(
            "/v1/tables/{table}/rows/{row}/{family}",
            get(handlers::get_family),
        )
        .route(
            "/v1/tables/{table}/rows/{row}/{family}/{qualifier}",
            put(handlers::put_cell).get(handlers::get_cell),
        )
        .with_state(state)
}
