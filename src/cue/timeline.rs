//! Cancelable delayed steps.
//!
//! A [`PendingSteps`] owns a list of `(offset, item)` pairs and fires them
//! in order from a single tokio task. Cancelling it (or dropping it) drops
//! every step that has not fired yet.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

/// Steps scheduled relative to the moment they were spawned.
#[derive(Debug)]
pub struct PendingSteps {
    task: JoinHandle<()>,
}

impl PendingSteps {
    /// Spawns the steps on the current tokio runtime.
    ///
    /// Offsets are measured from now, so they should be non-decreasing.
    /// Returns `None` when called outside a runtime; nothing is scheduled
    /// in that case.
    pub fn spawn<T, F>(steps: Vec<(Duration, T)>, mut fire: F) -> Option<Self>
    where
        T: Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!(
                    "No async runtime available, dropping {} delayed step(s)",
                    steps.len()
                );
                return None;
            }
        };

        let start = Instant::now();
        let count = steps.len();
        let task = handle.spawn(async move {
            for (offset, item) in steps {
                let Some(deadline) = start.checked_add(offset) else {
                    warn!("Delayed step offset {:?} is out of range, dropping the rest", offset);
                    break;
                };
                sleep_until(deadline).await;
                fire(item);
            }
        });

        debug!("Scheduled {} delayed step(s)", count);
        Some(Self { task })
    }

    /// Cancels every step that has not fired yet.
    pub fn cancel(&self) {
        if !self.task.is_finished() {
            debug!("Cancelling pending steps");
        }
        self.task.abort();
    }

    /// Returns true once every step has fired or the steps were cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for PendingSteps {
    fn drop(&mut self) {
        self.task.abort();
    }
}
