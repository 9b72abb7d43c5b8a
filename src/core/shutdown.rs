//! # OS termination signals.
//!
//! [`wait_for_shutdown_signal`] completes on the first of:
//! - **Unix**: `SIGINT`, `SIGTERM`, `SIGQUIT`
//! - **Other platforms**: Ctrl-C

/// Waits for a termination signal.
///
/// Returns `Err` if a signal handler cannot be registered.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
