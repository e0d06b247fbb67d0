use anyhow::{Context, Result};
use tokio::signal;

/// Resolves once Ctrl+C or SIGTERM arrives.
///
/// Fails only when a signal handler cannot be installed; the caller decides
/// whether that is fatal.
pub async fn wait_for_shutdown() -> Result<()> {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .context("failed to install Ctrl+C handler")
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("failed to install SIGTERM handler")?;
        sigterm.recv().await;
        Ok::<(), anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            tracing::info!("Received Ctrl+C signal");
        },
        result = terminate => {
            result?;
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutdown signal received, initiating graceful shutdown");
    Ok(())
}

/// Future suitable for `axum::serve(..).with_graceful_shutdown(..)`.
///
/// A handler installation failure is logged and the future never resolves,
/// so the server keeps running rather than stopping immediately.
pub async fn shutdown_signal() {
    if let Err(e) = wait_for_shutdown().await {
        tracing::error!(error = %e, "Shutdown signal handling unavailable");
        std::future::pending::<()>().await;
    }
}
