//! Ledger service - wires the store, scheduler and event channel together.

use crate::domain::{
    validate_payload, ConfirmOutcome, HashGenerator, LedgerError, LedgerEvent, LedgerRecord,
    LedgerStatus, LedgerStore, PayloadLimits, StatusView, SubmitReceipt, Timestamp, TxHash,
    DEFAULT_BLOCK_RANGE,
};
use crate::ports::inbound::{LedgerApi, LedgerStats};
use crate::ports::outbound::{
    EntropySource, LedgerClient, SystemTimeSource, ThreadRngEntropy, TimeSource,
};
use crate::scheduler::ConfirmationScheduler;
use async_trait::async_trait;
use serde_json::Value;
use std::ops::Range;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// Delay between submit and automatic confirmation
    pub confirmation_delay: Duration,
    /// Synthetic block number range (half-open)
    pub block_range: Range<u64>,
    /// Hash generations tried before giving up on a submit
    pub max_hash_attempts: u32,
    /// Structural payload limits
    pub payload_limits: PayloadLimits,
    /// Capacity of the event broadcast channel
    pub event_buffer: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_millis(3000),
            block_range: DEFAULT_BLOCK_RANGE,
            max_hash_attempts: 8,
            payload_limits: PayloadLimits::default(),
            event_buffer: 256,
        }
    }
}

pub struct LedgerService {
    config: LedgerConfig,
    store: Arc<LedgerStore>,
    scheduler: ConfirmationScheduler,
    hashes: HashGenerator,
    time: Arc<dyn TimeSource>,
    entropy: Arc<dyn EntropySource>,
    events: broadcast::Sender<LedgerEvent>,
}

impl LedgerService {
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_sources(config, Arc::new(SystemTimeSource), Arc::new(ThreadRngEntropy))
    }

    /// Creates a service with injected time and randomness.
    pub fn with_sources(
        config: LedgerConfig,
        time: Arc<dyn TimeSource>,
        entropy: Arc<dyn EntropySource>,
    ) -> Self {
        let (events, _) = broadcast::channel(config.event_buffer.max(1));
        Self {
            scheduler: ConfirmationScheduler::new(config.confirmation_delay),
            hashes: HashGenerator::new(config.block_range.clone()),
            store: Arc::new(LedgerStore::new()),
            config,
            time,
            entropy,
            events,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<LedgerStore> {
        Arc::clone(&self.store)
    }

    /// Cancels all outstanding confirmation timers.
    pub fn shutdown(&self) -> usize {
        let cancelled = self.scheduler.cancel_all();
        if cancelled > 0 {
            info!(cancelled, "Ledger shut down with pending confirmations");
        }
        cancelled
    }

    fn schedule_confirmation(&self, tx_hash: TxHash) {
        let store = Arc::clone(&self.store);
        let time = Arc::clone(&self.time);
        let events = self.events.clone();

        self.scheduler.schedule(tx_hash, move |tx_hash| {
            apply_confirmation(&store, &events, tx_hash, time.now());
        });
    }
}

/// Confirms a record and announces it. Shared by the timer and `finalize`.
fn apply_confirmation(
    store: &LedgerStore,
    events: &broadcast::Sender<LedgerEvent>,
    tx_hash: &TxHash,
    now: Timestamp,
) -> ConfirmOutcome {
    let outcome = store.confirm(tx_hash, now);
    match &outcome {
        ConfirmOutcome::Confirmed {
            block,
            confirmed_at,
        } => {
            info!(tx_hash = %tx_hash, block, "Transaction confirmed");
            // No subscribers is fine
            let _ = events.send(LedgerEvent::Confirmed {
                tx_hash: tx_hash.clone(),
                block: *block,
                confirmed_at: *confirmed_at,
            });
        }
        ConfirmOutcome::AlreadyConfirmed => {
            debug!(tx_hash = %tx_hash, "Transaction already confirmed");
        }
        ConfirmOutcome::Missing => {
            warn!(tx_hash = %tx_hash, "Confirmation for unknown transaction");
        }
    }
    outcome
}

impl LedgerApi for LedgerService {
    fn submit(&self, payload: Value) -> Result<SubmitReceipt, LedgerError> {
        if let Err(e) = validate_payload(&payload, &self.config.payload_limits) {
            warn!(error = %e, "Rejected transaction payload");
            return Err(e);
        }

        let timestamp = self.time.now();
        let block = self.hashes.next_block(&*self.entropy);
        let mut candidate = LedgerRecord::pending(
            self.hashes.next_hash(&*self.entropy, timestamp),
            block,
            timestamp,
            payload,
        );

        for attempt in 1..=self.config.max_hash_attempts {
            match self.store.insert_new(candidate) {
                Ok(tx_hash) => {
                    info!(tx_hash = %tx_hash, block, timestamp, "Transaction submitted");
                    // Scheduled only after the insert is visible.
                    self.schedule_confirmation(tx_hash.clone());
                    let _ = self.events.send(LedgerEvent::Submitted {
                        tx_hash: tx_hash.clone(),
                        block,
                        timestamp,
                    });
                    return Ok(SubmitReceipt {
                        tx_hash,
                        status: LedgerStatus::Pending,
                    });
                }
                Err(rejected) => {
                    warn!(
                        tx_hash = %rejected.tx_hash(),
                        attempt,
                        "Transaction hash collision, regenerating"
                    );
                    candidate = rejected.with_tx_hash(self.hashes.next_hash(&*self.entropy, timestamp));
                }
            }
        }

        Err(LedgerError::HashCollision {
            attempts: self.config.max_hash_attempts,
        })
    }

    fn status(&self, tx_hash: Option<&str>) -> Result<StatusView, LedgerError> {
        let Some(raw) = tx_hash.filter(|s| !s.is_empty()) else {
            debug!("Status query without txHash");
            return Err(LedgerError::NotFound { tx_hash: None });
        };

        let tx_hash = TxHash::from(raw);
        self.store.snapshot(&tx_hash).ok_or_else(|| {
            debug!(tx_hash = %tx_hash, "Status query for unknown transaction");
            LedgerError::not_found(tx_hash)
        })
    }

    fn finalize(&self, tx_hash: &TxHash) -> Result<StatusView, LedgerError> {
        if !self.store.contains(tx_hash) {
            return Err(LedgerError::not_found(tx_hash.clone()));
        }
        self.scheduler.cancel(tx_hash);
        apply_confirmation(&self.store, &self.events, tx_hash, self.time.now());
        self.store
            .snapshot(tx_hash)
            .ok_or_else(|| LedgerError::not_found(tx_hash.clone()))
    }

    fn cancel_confirmation(&self, tx_hash: &TxHash) -> bool {
        self.scheduler.cancel(tx_hash)
    }

    fn recent(&self, limit: usize) -> Vec<StatusView> {
        self.store.recent(limit)
    }

    fn stats(&self) -> LedgerStats {
        let records = self.store.len();
        let confirmed = self.store.count_by_status(LedgerStatus::Confirmed);
        LedgerStats {
            records,
            pending: records.saturating_sub(confirmed),
            confirmed,
            scheduled_confirmations: self.scheduler.pending(),
            collisions: self.store.stats().total_collisions.load(Ordering::Relaxed),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }
}

#[async_trait]
impl LedgerClient for LedgerService {
    async fn submit(&self, payload: Value) -> Result<SubmitReceipt, LedgerError> {
        LedgerApi::submit(self, payload)
    }

    async fn fetch_status(&self, tx_hash: &TxHash) -> Result<StatusView, LedgerError> {
        LedgerApi::status(self, Some(tx_hash.as_str()))
    }
}
