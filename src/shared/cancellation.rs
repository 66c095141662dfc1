//! Cooperative cancellation handle
//!
//! Every service operation receives a `CancellationSignal` and hands it to
//! each collaborator call. Cancellation never interrupts a call that is
//! already running; it is observed at the next check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;
use tracing::debug;

/// Returned by [`CancellationSignal::check`] once the signal has fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Cancellation signal that can be cloned and shared across tasks
#[derive(Clone)]
pub struct CancellationSignal {
    sender: broadcast::Sender<()>,
    cancelled: Arc<AtomicBool>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fire the signal. Repeated calls are no-ops.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Cancellation signal triggered");
            let _ = self.sender.send(());
        }
    }

    /// `Err(Cancelled)` once the signal has fired, so callers can use `?`
    /// before each suspension point.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Resolve when the signal fires (immediately if it already has).
    pub async fn cancelled(&self) {
        let mut rx = self.sender.subscribe();
        if self.is_cancelled() {
            return;
        }
        // A closed channel cannot happen while `self` holds the sender
        let _ = rx.recv().await;
    }
}

impl Default for CancellationSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CancellationSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancellationSignal")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
