//! HTTP front end for cellgate.
//!
//! An axum server exposing the gateway facade as JSON endpoints. Facade
//! calls block on store I/O and run on tokio's blocking pool.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `POST /import` - Put one cell (`tableName`, `rowKey`, `family`, `qualifier`, `value`)
//! - `GET /v1/tables` - Table names
//! - `GET|PUT|DELETE /v1/tables/{table}` - Exists, create, drop
//! - `PUT|GET /v1/tables/{table}/rows/{row}/{family}/{qualifier}` - Put or get a cell
//! - `GET /v1/tables/{table}/rows/{row}/{family}` - Family map
//! - `GET /v1/tables/{table}/rows/{row}` - Whole row (`?format=delimited`)
//! - `POST /v1/tables/{table}/scan` - Bounded regex scan
//!
//! Errors are `{"code", "message", "details"?}` with 400 for invalid input,
//! 404 for a missing table or family, 409 for a disabled table, 502 for store
//! failures.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ConfigError, GatewayConfig, LogFormat, LoggingSettings, ScanSettings, ServerSettings};
pub use error::AppError;
pub use logging::init_logging;
pub use routes::router;
pub use server::{build_state, serve, serve_on};
pub use state::AppState;
