//! Wait-group style tracking of in-flight crawl work
//!
//! A crawl context hands out one [`WorkGuard`] per admitted visit. The guard
//! lives as long as the visit task, including the time the task spends
//! scheduling child visits, so a context only reports drained once no task
//! can add more work to it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct TrackerInner {
    pending: AtomicUsize,
    drained: Notify,
}

/// Counts pending units of work and wakes waiters when the count reaches zero
#[derive(Debug, Clone, Default)]
pub struct WorkTracker {
    inner: Arc<TrackerInner>,
}

/// A unit of pending work; dropping it marks the work as done
#[derive(Debug)]
#[must_use = "work is marked done as soon as the guard is dropped"]
pub struct WorkGuard {
    inner: Arc<TrackerInner>,
}

impl WorkTracker {
    /// Creates a tracker with no pending work
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new unit of pending work
    pub fn begin(&self) -> WorkGuard {
        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        WorkGuard {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Returns the number of units still pending
    pub fn pending(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Returns true if no work is pending
    pub fn is_drained(&self) -> bool {
        self.pending() == 0
    }

    /// Waits until the pending count reaches zero
    ///
    /// Returns immediately if nothing is pending.
    pub async fn wait_drained(&self) {
        loop {
            let notified = self.inner.drained.notified();
            tokio::pin!(notified);
            // Register before checking the count so a concurrent drop cannot be missed
            notified.as_mut().enable();

            if self.is_drained() {
                return;
            }

            notified.await;
        }
    }
}

impl Drop for WorkGuard {
    fn drop(&mut self) {
        if self.inner.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.inner.drained.notify_waiters();
        }
    }
}
