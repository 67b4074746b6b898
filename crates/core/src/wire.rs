//! Wire error representation
//!
//! All gateway errors encode to JSON as:
//! ```json
//! {
//!   "code": "TableNotFound",
//!   "message": "table not found: users",
//!   "details": {"table": "users"}
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! | Code | Description |
//! |------|-------------|
//! | TableNotFound | Table does not exist |
//! | FamilyNotFound | Column family not declared on the table |
//! | TableDisabled | Table is disabled and rejects data operations |
//! | InvalidInput | Malformed input rejected before the store |
//! | Encoding | Stored bytes are not UTF-8 |
//! | StoreError | Store unavailable or failed |
//! | Internal | Bug or invariant violation |

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, StoreError};

/// Wire error representation for JSON encoding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireError {
    /// The canonical error code (e.g., "TableNotFound")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl WireError {
    /// Create a new wire error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

impl Error {
    /// Get the canonical error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::TableNotFound { .. } => "TableNotFound",
            Error::FamilyNotFound { .. } => "FamilyNotFound",
            Error::TableDisabled { .. } => "TableDisabled",
            Error::InvalidInput { .. } => "InvalidInput",
            Error::Encoding { .. } => "Encoding",
            Error::Store(_) => "StoreError",
            Error::Internal(_) => "Internal",
        }
    }

    /// Convert to wire error format
    pub fn to_wire_error(&self) -> WireError {
        WireError {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            Error::TableNotFound { table } => Some(json!({ "table": table })),
            Error::FamilyNotFound { table, family } => {
                Some(json!({ "table": table, "family": family }))
            }
            Error::TableDisabled { table } => Some(json!({ "table": table })),
            Error::InvalidInput { reason } => Some(json!({ "reason": reason })),
            Error::Encoding { what } => Some(json!({ "what": what })),
            Error::Store(StoreError::Http { status, .. }) => Some(json!({ "status": status })),
            Error::Store(_) | Error::Internal(_) => None,
        }
    }
}
