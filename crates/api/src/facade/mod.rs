//! Facade API - typed gateway operations
//!
//! The facade is the one surface callers use. Each operation validates its
//! input, checks the table, opens the store resources it needs and releases
//! them before returning, on success and on error alike.
//!
//! ## Modules
//!
//! - [`table`]: create, drop, exists
//! - [`cell`]: put/get of single cells, family and row reads
//! - [`scan`]: bounded row-key regex scans
//!
//! ## Error Policy
//!
//! Every operation returns [`cellgate_core::Result`]. A failure is logged
//! once, at warn for not-found, invalid input, undecodable data or a
//! disabled table and at error for store failures, and then returned
//! unchanged.

mod impl_;

pub mod cell;
pub mod scan;
pub mod table;

pub use cell::CellFacade;
pub use impl_::FacadeImpl;
pub use scan::ScanFacade;
pub use table::TableFacade;

/// Every facade operation.
pub trait GatewayFacade: TableFacade + CellFacade + ScanFacade + Send + Sync {}

impl<T> GatewayFacade for T where T: TableFacade + CellFacade + ScanFacade + Send + Sync {}
