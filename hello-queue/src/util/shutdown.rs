//! Shutdown signal handling.

use tokio::signal;
use tracing::info;

use crate::error::{Error, Result};

/// Resolve once SIGINT (Ctrl+C) or, on unix, SIGTERM is received.
///
/// # Errors
///
/// Returns [`Error::Signal`] if a signal listener can not be installed.
pub async fn wait_for_signal() -> Result<()> {
    #[cfg(unix)]
    {
        let mut terminate = signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(Error::Signal)?;

        tokio::select! {
            res = signal::ctrl_c() => {
                res.map_err(Error::Signal)?;
                info!("Received SIGINT");
            }
            _ = terminate.recv() => info!("Received SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.map_err(Error::Signal)?;
        info!("Received SIGINT");
    }

    info!("shutting_down");
    Ok(())
}
