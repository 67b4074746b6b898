//! HTTP error handling and response formatting.
//!
//! Every failure leaves the server as a [`WireError`] JSON body with a status
//! derived from its error code.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use cellgate_core::{Error, WireError};

/// Application error type that converts to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Error returned by a facade operation
    Gateway(Error),
    /// Request body or query string could not be parsed
    BadRequest(String),
    /// The store work did not finish within the request timeout
    Timeout,
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        AppError::Gateway(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Gateway(e) => write!(f, "{}", e),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Gateway(e) => match e {
                Error::InvalidInput { .. } | Error::Encoding { .. } => StatusCode::BAD_REQUEST,
                Error::TableNotFound { .. } | Error::FamilyNotFound { .. } => StatusCode::NOT_FOUND,
                Error::TableDisabled { .. } => StatusCode::CONFLICT,
                Error::Store(_) => StatusCode::BAD_GATEWAY,
                Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn to_wire_error(&self) -> WireError {
        match self {
            AppError::Gateway(e) => e.to_wire_error(),
            AppError::BadRequest(msg) => WireError::new("InvalidInput", msg.clone()),
            AppError::Timeout => WireError::new("Timeout", "request timed out"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::debug!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(self.to_wire_error())).into_response()
    }
}
