//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use cellgate_api::FacadeImpl;
use cellgate_core::{Error, Result};

use crate::error::AppError;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    facade: Arc<FacadeImpl>,
    request_timeout: Duration,
}

impl AppState {
    /// Wrap a facade.
    pub fn new(facade: FacadeImpl, request_timeout: Duration) -> Self {
        Self {
            facade: Arc::new(facade),
            request_timeout,
        }
    }

    /// The shared facade.
    pub fn facade(&self) -> &Arc<FacadeImpl> {
        &self.facade
    }

    /// Run a facade call on the blocking pool.
    ///
    /// Store calls block on I/O; they run off the async workers and are
    /// abandoned (not cancelled) after the request timeout.
    pub async fn run_blocking<T, F>(&self, f: F) -> std::result::Result<T, AppError>
    where
        F: FnOnce(&FacadeImpl) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let facade = Arc::clone(&self.facade);
        let task = tokio::task::spawn_blocking(move || f(&facade));

        match tokio::time::timeout(self.request_timeout, task).await {
            Ok(Ok(result)) => result.map_err(AppError::from),
            Ok(Err(join_error)) => Err(AppError::Gateway(Error::Internal(format!(
                "facade task failed: {}",
                join_error
            )))),
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Facade call exceeded request timeout"
                );
                Err(AppError::Timeout)
            }
        }
    }
}
