//! Convenient imports for cellgate.
//!
//! ```
//! use cellgate::prelude::*;
//!
//! let gw = Gateway::memory();
//! gw.create_table("t", "f")?;
//! # Ok::<(), cellgate::Error>(())
//! ```

// Main entry point
pub use crate::gateway::{Gateway, GatewayBuilder};

// Error handling
pub use cellgate_core::{Error, Result};

// Facade operations
pub use cellgate_api::{CellFacade, GatewayFacade, ScanFacade, TableFacade};

// Core types
pub use cellgate_core::{RowCell, ScanOptions, ScanSummary};
