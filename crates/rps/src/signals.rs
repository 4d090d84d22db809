//! Signal handling for graceful server shutdown.
//!
//! The first SIGINT or SIGTERM (Ctrl+C on Windows) starts a graceful
//! shutdown through the shared `ShutdownState`. A second one terminates the
//! process immediately.

use rps_server::ShutdownState;
use tokio::signal;
use tracing::{error, info, warn};

/// Waits for a termination signal and initiates shutdown on `shutdown_state`.
///
/// # Returns
///
/// `Ok(())` once a signal was received, or an error if the signal handlers
/// could not be installed.
pub async fn wait_for_shutdown_signal(
    shutdown_state: &ShutdownState,
) -> Result<(), Box<dyn std::error::Error>> {
    wait_for_signal().await?;
    info!("📡 Received shutdown signal - initiating graceful shutdown");
    shutdown_state.initiate_shutdown();
    Ok(())
}

/// Exits the process on the next termination signal.
pub fn spawn_forced_exit_handler() {
    tokio::spawn(async {
        if let Err(e) = wait_for_signal().await {
            error!("Failed to set up forced shutdown signal handler: {e}");
            return;
        }

        warn!("Shutdown signal received again, exiting immediately");
        std::process::exit(1);
    });
}

async fn wait_for_signal() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(unix)]
    {
        use signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;

        tokio::select! {
            _ = sigint.recv() => (),
            _ = sigterm.recv() => ()
        }
    }

    #[cfg(windows)]
    signal::ctrl_c().await?;

    Ok(())
}
