//! Ledger Store - concurrent map from transaction hash to record.
//!
//! Records are never removed or overwritten for the lifetime of the store.

use super::entities::{LedgerRecord, LedgerStatus, StatusView, Timestamp, TxHash};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Statistics for the ledger store
#[derive(Debug, Default)]
pub struct StoreStats {
    /// Records created
    pub total_inserted: AtomicU64,
    /// Records confirmed
    pub total_confirmed: AtomicU64,
    /// Inserts rejected because the hash already existed
    pub total_collisions: AtomicU64,
    /// Lookups for unknown hashes
    pub total_misses: AtomicU64,
}

/// Outcome of a confirmation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Record moved from pending to confirmed.
    Confirmed { block: u64, confirmed_at: Timestamp },
    /// Record was already confirmed; nothing changed.
    AlreadyConfirmed,
    /// No record for the hash.
    Missing,
}

#[derive(Debug, Default)]
pub struct LedgerStore {
    records: DashMap<TxHash, LedgerRecord>,
    stats: StoreStats,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record under its hash if the hash is unused.
    ///
    /// On collision the record is handed back unchanged and the existing
    /// entry is left untouched.
    pub fn insert_new(&self, record: LedgerRecord) -> Result<TxHash, LedgerRecord> {
        match self.records.entry(record.tx_hash().clone()) {
            Entry::Occupied(_) => {
                self.stats.total_collisions.fetch_add(1, Ordering::Relaxed);
                Err(record)
            }
            Entry::Vacant(slot) => {
                let tx_hash = record.tx_hash().clone();
                slot.insert(record);
                self.stats.total_inserted.fetch_add(1, Ordering::Relaxed);
                Ok(tx_hash)
            }
        }
    }

    pub fn get(&self, tx_hash: &TxHash) -> Option<LedgerRecord> {
        self.records.get(tx_hash).map(|entry| entry.value().clone())
    }

    /// Snapshot of the current state, as returned by the status query.
    pub fn snapshot(&self, tx_hash: &TxHash) -> Option<StatusView> {
        let view = self.records.get(tx_hash).map(|entry| entry.value().view());
        if view.is_none() {
            self.stats.total_misses.fetch_add(1, Ordering::Relaxed);
        }
        view
    }

    /// Confirms the record if it exists and is still pending.
    pub fn confirm(&self, tx_hash: &TxHash, now: Timestamp) -> ConfirmOutcome {
        let Some(mut entry) = self.records.get_mut(tx_hash) else {
            return ConfirmOutcome::Missing;
        };

        if entry.confirm(now) {
            self.stats.total_confirmed.fetch_add(1, Ordering::Relaxed);
            debug!(tx_hash = %tx_hash, "Record confirmed");
            ConfirmOutcome::Confirmed {
                block: entry.block(),
                confirmed_at: now,
            }
        } else {
            ConfirmOutcome::AlreadyConfirmed
        }
    }

    pub fn contains(&self, tx_hash: &TxHash) -> bool {
        self.records.contains_key(tx_hash)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_by_status(&self, status: LedgerStatus) -> usize {
        self.records
            .iter()
            .filter(|entry| entry.status() == status)
            .count()
    }

    /// Most recent records first, by submission time.
    pub fn recent(&self, limit: usize) -> Vec<StatusView> {
        let mut views: Vec<StatusView> = self.records.iter().map(|entry| entry.view()).collect();
        views.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.tx_hash.cmp(&a.tx_hash))
        });
        views.truncate(limit);
        views
    }

    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }
}
