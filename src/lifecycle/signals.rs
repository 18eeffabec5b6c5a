//! OS signal handling.
//!
//! SIGINT and SIGTERM both request a stop; on non-Unix targets only Ctrl-C
//! is observed. Handlers are registered before the listening task starts so
//! a registration failure is a startup error, not a silent stop.

use std::io;

use crate::lifecycle::Shutdown;

/// Registered stop-signal streams.
#[cfg(unix)]
pub struct StopSignals {
    terminate: tokio::signal::unix::Signal,
    interrupt: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl StopSignals {
    /// Install the SIGTERM and SIGINT handlers. Must run inside a Tokio runtime.
    pub fn register() -> io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};

        Ok(Self {
            terminate: signal(SignalKind::terminate())?,
            interrupt: signal(SignalKind::interrupt())?,
        })
    }

    /// Resolve once the process is asked to stop.
    pub async fn recv(&mut self) {
        tokio::select! {
            _ = self.terminate.recv() => tracing::info!("Received SIGTERM"),
            _ = self.interrupt.recv() => tracing::info!("Received SIGINT"),
        }
    }
}

#[cfg(not(unix))]
pub struct StopSignals;

#[cfg(not(unix))]
impl StopSignals {
    pub fn register() -> io::Result<Self> {
        Ok(Self)
    }

    pub async fn recv(&mut self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl-C"),
            Err(e) => {
                tracing::error!(error = %e, "Ctrl-C listener failed");
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Register stop signals, then trigger `shutdown` on the first one.
pub fn spawn_signal_handler(shutdown: Shutdown) -> io::Result<tokio::task::JoinHandle<()>> {
    let mut signals = StopSignals::register()?;

    Ok(tokio::spawn(async move {
        signals.recv().await;
        shutdown.trigger();
    }))
}
