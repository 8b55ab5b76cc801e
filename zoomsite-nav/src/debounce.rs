//! Debounce timers for bursty interaction classes
//!
//! Collapses a burst of invocations (mouse movement, resize, scroll) into
//! a single delayed action: each call restarts the quiet-period timer, and
//! the action runs only once the burst goes quiet. Pending actions are
//! fully cancellable so no stale callback fires against a departed view.

use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Restartable quiet-period timer for one interaction class
pub struct Debouncer {
    quiet: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// New debouncer with a fixed quiet period
    pub fn new(quiet: Duration) -> Self {
        Self { quiet, pending: Mutex::new(None) }
    }

    /// The configured quiet period
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule `action` to run after the quiet period
    ///
    /// Any previously scheduled action that has not fired yet is
    /// cancelled; only the latest call in a burst fires.
    pub fn call<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let quiet = self.quiet;
        let task = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            action();
        });

        let mut pending = self.pending.lock().expect("debounce lock poisoned");
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }

    /// Cancel any pending action without running it
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debounce lock poisoned");
        if let Some(task) = pending.take() {
            task.abort();
        }
    }

    /// Whether an action is currently scheduled
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().expect("debounce lock poisoned");
        pending.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(task) = pending.take() {
                task.abort();
            }
        }
    }
}
