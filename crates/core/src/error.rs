//! Error types for cellgate.
//!
//! Two layers:
//! - [`StoreError`]: failures reported by a store backend (memory or REST)
//! - [`Error`]: what facade callers see; store errors that carry a
//!   not-found meaning are lifted into dedicated variants so callers can
//!   match on them without inspecting the backend error.

use thiserror::Error;

/// Errors raised by a column-family store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced table does not exist
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// A table with this name already exists
    #[error("table already exists: {0}")]
    TableExists(String),

    /// Tables must be disabled before they can be deleted
    #[error("table is enabled: {0}")]
    TableEnabled(String),

    /// The table is disabled and rejects data operations
    #[error("table is disabled: {0}")]
    TableDisabled(String),

    /// The column family is not declared on the table
    #[error("column family '{family}' does not exist in table {table}")]
    FamilyNotFound {
        /// Table the request targeted
        table: String,
        /// Undeclared family
        family: String,
    },

    /// Row filter could not be compiled
    #[error("invalid row filter: {0}")]
    InvalidFilter(String),

    /// Request rejected by the store before execution
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Store answered with an unexpected HTTP status
    #[error("store returned status {status}: {message}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Connection-level failure (DNS, refused, timeout)
    #[error("store transport error: {0}")]
    Transport(String),

    /// Store response could not be decoded
    #[error("malformed store response: {0}")]
    Decode(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store backend operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// All gateway errors.
///
/// Every facade operation returns this type. Nothing is swallowed: the
/// facade logs a failure once and hands it to the caller, who decides
/// whether to retry or surface it.
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced table does not exist
    #[error("table not found: {table}")]
    TableNotFound {
        /// Table name as given by the caller
        table: String,
    },

    /// Referenced column family is not declared on the table
    #[error("column family not found: {table}:{family}")]
    FamilyNotFound {
        /// Table name
        table: String,
        /// Family name
        family: String,
    },

    /// Table exists but is disabled and rejects data operations
    #[error("table is disabled: {table}")]
    TableDisabled {
        /// Table name
        table: String,
    },

    /// Malformed input, rejected before reaching the store
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong
        reason: String,
    },

    /// Stored bytes are not valid UTF-8
    #[error("{what} is not valid UTF-8")]
    Encoding {
        /// What could not be decoded
        what: String,
    },

    /// Store unavailable or failed
    #[error("store error: {0}")]
    Store(StoreError),

    /// Internal error (bug or invariant violation)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error (table or family).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::TableNotFound { .. } | Error::FamilyNotFound { .. }
        )
    }

    /// Check if the request conflicts with the table's current state.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::TableDisabled { .. })
    }

    /// Check if the input was rejected before reaching the store.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }

    /// Check if this error is retryable.
    ///
    /// Transport failures and 5xx answers may succeed on retry; everything
    /// else is deterministic for the same input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Store(StoreError::Transport(_)) | Error::Store(StoreError::Io(_)) => true,
            Error::Store(StoreError::Http { status, .. }) => *status >= 500,
            _ => false,
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::TableNotFound(table) => Error::TableNotFound { table },
            StoreError::FamilyNotFound { table, family } => Error::FamilyNotFound { table, family },
            StoreError::TableDisabled(table) => Error::TableDisabled { table },
            StoreError::InvalidFilter(reason) => Error::InvalidInput { reason },
            other => Error::Store(other),
        }
    }
}
