//! Gateway facade for cellgate
//!
//! Typed table and cell operations over a shared store connection. See
//! [`facade`] for the operation set and the mapping of each operation onto
//! store calls.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod facade;

pub use facade::{CellFacade, FacadeImpl, GatewayFacade, ScanFacade, TableFacade};
