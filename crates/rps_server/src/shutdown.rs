//! Shutdown coordination for graceful server shutdown.
//!
//! A `ShutdownState` is cloned into every component that has to stop when
//! the process is asked to exit. Tasks either poll the flag or await
//! [`ShutdownState::wait`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

/// Shared shutdown state for coordinating graceful shutdown across components.
#[derive(Debug, Clone, Default)]
pub struct ShutdownState {
    /// Set once shutdown has been requested; never cleared
    initiated: Arc<AtomicBool>,
    /// Wakes tasks parked in `wait`
    notify: Arc<Notify>,
}

impl ShutdownState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if shutdown has been initiated.
    pub fn is_shutdown_initiated(&self) -> bool {
        self.initiated.load(Ordering::Acquire)
    }

    /// Initiates shutdown and wakes every waiting task. Idempotent.
    pub fn initiate_shutdown(&self) {
        if !self.initiated.swap(true, Ordering::AcqRel) {
            info!("🛑 Shutdown initiated - no new connections will be accepted");
        }
        self.notify.notify_waiters();
    }

    /// Resolves once shutdown has been initiated, immediately if it already was.
    pub async fn wait(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_shutdown_initiated() {
                return;
            }
            notified.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_wait_returns_after_initiate() {
        let state = ShutdownState::new();
        let waiter = {
            let state = state.clone();
            tokio::spawn(async move { state.wait().await })
        };

        assert!(!state.is_shutdown_initiated());
        state.initiate_shutdown();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .expect("waiter task panicked");
        assert!(state.is_shutdown_initiated());
    }

    #[tokio::test]
    async fn test_wait_after_initiate_is_immediate() {
        let state = ShutdownState::new();
        state.initiate_shutdown();
        state.initiate_shutdown();
        tokio::time::timeout(Duration::from_millis(100), state.wait())
            .await
            .expect("already shut down");
    }
}
