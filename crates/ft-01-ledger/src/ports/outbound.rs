//! Outbound (Driven) ports for the Ledger subsystem.

use crate::domain::{LedgerError, StatusView, SubmitReceipt, Timestamp, TxHash};
use async_trait::async_trait;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

/// Time source for record timestamps.
///
/// Abstracted to allow testing with deterministic time.
pub trait TimeSource: Send + Sync {
    /// Returns the current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Default system time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        shared_types::now_millis()
    }
}

/// Manually driven clock.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    time: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(Ordering::SeqCst)
    }
}

/// Randomness for hash suffixes and block numbers.
pub trait EntropySource: Send + Sync {
    fn next_u32(&self) -> u32;

    /// Uniform sample from a half-open range.
    fn next_in_range(&self, range: Range<u64>) -> u64;
}

/// Thread-local RNG. Not cryptographic; hashes are identifiers only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngEntropy;

impl EntropySource for ThreadRngEntropy {
    fn next_u32(&self) -> u32 {
        rand::thread_rng().gen()
    }

    fn next_in_range(&self, range: Range<u64>) -> u64 {
        rand::thread_rng().gen_range(range)
    }
}

/// Seeded RNG for reproducible runs.
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl EntropySource for SeededEntropy {
    fn next_u32(&self) -> u32 {
        self.rng.lock().gen()
    }

    fn next_in_range(&self, range: Range<u64>) -> u64 {
        self.rng.lock().gen_range(range)
    }
}

/// Client-side view of a ledger, local or remote.
///
/// The status poller drives this port; the gateway crate provides an HTTP
/// implementation and [`crate::LedgerService`] implements it in-process.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn submit(&self, payload: Value) -> Result<SubmitReceipt, LedgerError>;

    async fn fetch_status(&self, tx_hash: &TxHash) -> Result<StatusView, LedgerError>;
}

/// Entropy that repeats the same value, for forcing collisions.
#[cfg(test)]
pub struct FixedEntropy(pub u32);

#[cfg(test)]
impl EntropySource for FixedEntropy {
    fn next_u32(&self) -> u32 {
        self.0
    }

    fn next_in_range(&self, range: Range<u64>) -> u64 {
        range.start
    }
}
