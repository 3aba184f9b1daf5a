//! Termination signal handling (spec §4.8).

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ServerError;
use crate::shutdown::ShutdownFlag;

/// Spawns a task that waits for SIGINT or SIGTERM and triggers `shutdown`
/// on either. The handler itself performs no I/O and allocates nothing
/// beyond the flag flip (spec §4.8) — it does not decide how the acceptor
/// or timer observe the flag, only sets it.
///
/// # Errors
///
/// Returns [`ServerError::Signal`] if the underlying signal handlers
/// cannot be installed.
pub fn install(shutdown: Arc<ShutdownFlag>) -> Result<tokio::task::JoinHandle<()>, ServerError> {
    let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        .map_err(ServerError::Signal)?;
    let mut sigint = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
        .map_err(ServerError::Signal)?;

    Ok(tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM"),
            _ = sigint.recv() => info!("received SIGINT"),
        }
        shutdown.trigger();
        warn!("shutdown requested");
    }))
}
