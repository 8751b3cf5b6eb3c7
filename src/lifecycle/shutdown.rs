//! Shutdown coordination for the site server.
//!
//! # Design Decisions
//! - The signal is a latched flag, not a message: a waiter that starts
//!   after the trigger still sees it

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// The server and any background task wait on it; one trigger stops them all.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
    grace: Duration,
}

impl Shutdown {
    /// Create a coordinator that allows `grace` for in-flight requests.
    pub fn new(grace: Duration) -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            grace,
        }
    }

    /// Subscribe to the shutdown flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Resolve once the flag is set, including when it was set earlier.
    ///
    /// The receiver is taken when this is called, not when the future is
    /// first polled.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Set the shutdown flag.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Time in-flight requests get to finish after the trigger.
    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_trigger_reaches_all_waiters() {
        let shutdown = Shutdown::default();
        let a = shutdown.wait();
        let b = shutdown.wait();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), async {
            a.await;
            b.await;
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_trigger_before_wait_is_seen() {
        let shutdown = Shutdown::default();
        assert!(!shutdown.is_triggered());

        shutdown.trigger();
        assert!(shutdown.is_triggered());

        let late = shutdown.clone().wait();
        tokio::time::timeout(Duration::from_millis(100), late)
            .await
            .unwrap();
    }
}
