//! Confirmation Scheduler - one cancellable timer per pending record.
//!
//! Each scheduled confirmation owns a slot in `timers`. When the delay
//! elapses the task fires only if it still holds its slot, so `cancel()`
//! wins any race against an expiring timer.

use dashmap::DashMap;
use futures::future::{abortable, AbortHandle};
use shared_types::TxHash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Statistics for the confirmation scheduler
#[derive(Debug, Default)]
pub struct SchedulerStats {
    pub total_scheduled: AtomicU64,
    pub total_fired: AtomicU64,
    pub total_cancelled: AtomicU64,
}

pub struct ConfirmationScheduler {
    delay: Duration,
    timers: Arc<DashMap<TxHash, AbortHandle>>,
    stats: Arc<SchedulerStats>,
}

impl ConfirmationScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timers: Arc::new(DashMap::new()),
            stats: Arc::new(SchedulerStats::default()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `on_elapsed` once `delay` has passed, unless cancelled first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, tx_hash: TxHash, on_elapsed: F)
    where
        F: FnOnce(&TxHash) + Send + 'static,
    {
        let timers = Arc::clone(&self.timers);
        let stats = Arc::clone(&self.stats);
        let delay = self.delay;
        let key = tx_hash.clone();

        let (task, handle) = abortable(async move {
            tokio::time::sleep(delay).await;
            if timers.remove(&key).is_some() {
                stats.total_fired.fetch_add(1, Ordering::Relaxed);
                on_elapsed(&key);
            }
        });

        // Slot is claimed before the task can run.
        if let Some(previous) = self.timers.insert(tx_hash, handle) {
            previous.abort();
        }
        self.stats.total_scheduled.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(task);
    }

    /// Cancels a scheduled confirmation. Returns `false` if none was pending.
    pub fn cancel(&self, tx_hash: &TxHash) -> bool {
        match self.timers.remove(tx_hash) {
            Some((_, handle)) => {
                handle.abort();
                self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                debug!(tx_hash = %tx_hash, "Cancelled scheduled confirmation");
                true
            }
            None => false,
        }
    }

    /// Cancels every outstanding timer. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let keys: Vec<TxHash> = self.timers.iter().map(|e| e.key().clone()).collect();
        keys.iter().filter(|key| self.cancel(key)).count()
    }

    pub fn is_scheduled(&self, tx_hash: &TxHash) -> bool {
        self.timers.contains_key(tx_hash)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }
}
