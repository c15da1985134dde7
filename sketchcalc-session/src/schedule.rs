//! Deferred reveal scheduling for recognized formulas.
//!
//! Every record from a recognition response is revealed after the same
//! flat delay. Each reveal runs as its own tokio task; the handles are
//! retained so `cancel_all` can abort anything still pending and drain
//! anything already delivered. A reset therefore cannot be overridden by
//! a stale reveal firing later.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A formula reveal queued for delivery after the flat delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reveal {
    /// The recognized expression.
    pub expr: String,
    /// Its answer.
    pub answer: String,
}

/// Single-consumer scheduler for deferred reveals.
pub struct RevealScheduler {
    tx: mpsc::UnboundedSender<Reveal>,
    rx: mpsc::UnboundedReceiver<Reveal>,
    tasks: Vec<JoinHandle<()>>,
}

impl RevealScheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// Schedule `reveal` for delivery after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, reveal: Reveal, delay: Duration) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver only disappears on scheduler teardown.
            let _ = tx.send(reveal);
        });
        self.tasks.push(handle);
    }

    /// Deliver every reveal whose delay has elapsed, in delivery order.
    pub fn drain_ready(&mut self) -> Vec<Reveal> {
        self.tasks.retain(|task| !task.is_finished());

        let mut ready = Vec::new();
        while let Ok(reveal) = self.rx.try_recv() {
            ready.push(reveal);
        }
        ready
    }

    /// Abort all pending tasks and discard undelivered reveals.
    pub fn cancel_all(&mut self) {
        let pending = self.tasks.len();
        for task in self.tasks.drain(..) {
            task.abort();
        }
        while self.rx.try_recv().is_ok() {}
        if pending > 0 {
            tracing::debug!("cancelled {pending} scheduled reveals");
        }
    }

    /// Number of reveal tasks not yet delivered.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.is_finished()).count()
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}
