//! Signal handling for graceful termination

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use colored::Colorize;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::Notify;

/// Shutdown signal shared between the signal path and the pipeline.
///
/// Exactly one writer (the signal tasks) and one reader (the pipeline), so
/// a single atomic boolean is enough. The pipeline observes the flag at its
/// checkpoints rather than the handler exiting the process directly; the
/// interactive prompt additionally awaits `notified` so a signal delivered
/// while waiting for input unblocks it.
#[derive(Clone)]
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Get a clone of the shutdown flag
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Mark shutdown as requested and wake anyone awaiting `notified`
    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    /// Wait until shutdown is requested. Returns immediately if it already
    /// was; the waiter is registered before the flag check so a request
    /// landing in between cannot be missed.
    pub async fn notified(&self) {
        let mut notified = std::pin::pin!(self.notify.notified());
        notified.as_mut().enable();
        if self.is_shutdown() {
            return;
        }
        notified.await;
    }

    /// Install SIGINT and SIGTERM handlers
    pub async fn setup(&self) -> Result<(), std::io::Error> {
        let mut sigint = signal(SignalKind::interrupt())?;
        let this = self.clone();
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!(
                "\n{} Termination signal received. Stopping recording...",
                "↓".cyan()
            );
            this.request_shutdown();
        });

        let mut sigterm = signal(SignalKind::terminate())?;
        let this = self.clone();
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!(
                "\n{} Termination signal received. Stopping recording...",
                "↓".cyan()
            );
            this.request_shutdown();
        });

        Ok(())
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_signal_default_is_false() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_shutdown());
    }

    #[test]
    fn shutdown_signal_flag_can_be_set() {
        let signal = ShutdownSignal::new();
        let flag = signal.flag();
        flag.store(true, Ordering::SeqCst);
        assert!(signal.is_shutdown());
    }

    #[test]
    fn request_shutdown_sets_the_flag() {
        let signal = ShutdownSignal::new();
        signal.request_shutdown();
        assert!(signal.is_shutdown());
    }

    #[tokio::test]
    async fn notified_returns_for_a_prior_request() {
        let signal = ShutdownSignal::new();
        signal.request_shutdown();
        signal.notified().await;
    }

    #[tokio::test]
    async fn notified_wakes_on_request() {
        let signal = ShutdownSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move { waiter.notified().await });
        tokio::task::yield_now().await;
        signal.request_shutdown();
        handle.await.unwrap();
    }
}
