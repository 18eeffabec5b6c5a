//! Stop notification for the scheduler.

use tokio::sync::broadcast;

/// Coordinator for cooperative shutdown.
///
/// Every long-running loop holds a [`ShutdownSignal`] and checks it at its
/// own safe points.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Hand out a receiver. Triggers sent before this call are not seen.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Notify every subscriber.
    pub fn trigger(&self) {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(notified, "Shutdown triggered");
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of [`Shutdown`].
pub struct ShutdownSignal {
    rx: broadcast::Receiver<()>,
}

impl ShutdownSignal {
    /// Wait for a stop. A dropped [`Shutdown`] counts as one.
    pub async fn recv(&mut self) {
        // Ok, Lagged and Closed all mean a stop was requested.
        let _ = self.rx.recv().await;
    }
}
