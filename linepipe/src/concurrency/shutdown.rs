//! Broadcast shutdown signal for pipeline tasks.

use tokio::sync::watch;

/// Sending side of the shutdown signal.
///
/// Cloning is cheap, every clone triggers the same signal.
#[derive(Debug, Clone)]
pub struct ShutdownTx(watch::Sender<bool>);

impl ShutdownTx {
    /// Signals shutdown to every subscribed receiver.
    ///
    /// The signal is stored even when no receiver is alive yet, so receivers subscribed later
    /// observe it too.
    pub fn shutdown(&self) {
        self.0.send_replace(true);
    }

    /// Returns `true` once shutdown has been signalled.
    pub fn is_shutdown(&self) -> bool {
        *self.0.borrow()
    }

    /// Returns a new receiver observing this signal.
    pub fn subscribe(&self) -> ShutdownRx {
        ShutdownRx(self.0.subscribe())
    }
}

/// Receiving side of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownRx(watch::Receiver<bool>);

impl ShutdownRx {
    /// Returns `true` once shutdown has been signalled.
    pub fn is_shutdown(&self) -> bool {
        *self.0.borrow()
    }

    /// Completes once shutdown has been signalled.
    ///
    /// If every sender is dropped without signalling, shutdown can no longer happen and the
    /// returned future never completes.
    pub async fn wait_for_shutdown(&mut self) {
        if self.0.wait_for(|is_shutdown| *is_shutdown).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Creates a new shutdown channel in the "running" state.
pub fn create_shutdown_channel() -> (ShutdownTx, ShutdownRx) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTx(tx), ShutdownRx(rx))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn every_subscriber_observes_shutdown() {
        let (tx, mut rx) = create_shutdown_channel();
        let mut other_rx = tx.subscribe();

        assert!(!rx.is_shutdown());

        tx.shutdown();

        rx.wait_for_shutdown().await;
        other_rx.wait_for_shutdown().await;
        assert!(rx.is_shutdown());
        assert!(other_rx.is_shutdown());
    }

    #[tokio::test]
    async fn late_subscriber_sees_past_shutdown() {
        let (tx, _rx) = create_shutdown_channel();
        tx.shutdown();

        assert!(tx.subscribe().is_shutdown());
    }

    #[tokio::test]
    async fn dropped_sender_never_completes() {
        let (tx, mut rx) = create_shutdown_channel();
        drop(tx);

        let waited = tokio::time::timeout(Duration::from_millis(50), rx.wait_for_shutdown()).await;

        assert!(waited.is_err());
    }

    #[test]
    fn shutdown_without_receivers_is_kept_for_later_subscribers() {
        let (tx, rx) = create_shutdown_channel();
        drop(rx);

        tx.shutdown();

        assert!(tx.is_shutdown());
        assert!(tx.subscribe().is_shutdown());
    }
}
