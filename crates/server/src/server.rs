//! Server lifecycle: build state from configuration, bind, serve until
//! Ctrl-C.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};

use cellgate_api::FacadeImpl;
use cellgate_storage::connect;

use crate::config::GatewayConfig;
use crate::routes::router;
use crate::state::AppState;

/// Open the store connection and wrap it in handler state.
pub fn build_state(config: &GatewayConfig) -> anyhow::Result<AppState> {
    let connection = connect(&config.store).context("failed to open store connection")?;
    let facade = FacadeImpl::new(connection).with_scan_options(config.scan.into());
    Ok(AppState::new(facade, config.server.request_timeout()))
}

/// Serve on an already-bound listener until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP server bound");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &GatewayConfig, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    serve_on(listener, state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("HTTP server received shutdown signal");
}
