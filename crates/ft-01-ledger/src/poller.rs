//! Client Poller - submits once, then polls status until confirmed.
//!
//! Only `NotFound` is treated as transient (the record may not be visible yet
//! on a remote replica); every other error ends the wait.

use crate::domain::{LedgerError, StatusView, TxHash};
use crate::ports::outbound::LedgerClient;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Poller configuration
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Time between status queries; the first query waits one interval
    pub interval: Duration,
    /// Consecutive `NotFound` answers tolerated before giving up
    pub max_not_found: u32,
    /// Upper bound on status queries (None = poll until confirmed)
    pub max_attempts: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1500),
            max_not_found: 3,
            max_attempts: None,
        }
    }
}

/// Result of a successful wait.
#[derive(Debug, Clone, PartialEq)]
pub struct PollReport {
    /// The confirmed snapshot
    pub view: StatusView,
    /// Status queries issued, including the one that saw `confirmed`
    pub attempts: u32,
    /// Queries that answered `pending`
    pub pending_observations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("submit failed: {0}")]
    Submit(LedgerError),

    #[error("transaction {tx_hash} not found after {attempts} attempts")]
    NotFound { tx_hash: TxHash, attempts: u32 },

    #[error("transaction {tx_hash} still pending after {attempts} attempts")]
    Exhausted { tx_hash: TxHash, attempts: u32 },

    #[error("status query failed: {0}")]
    Status(LedgerError),
}

#[derive(Debug, Clone, Default)]
pub struct StatusPoller {
    config: PollerConfig,
}

impl StatusPoller {
    pub fn new(config: PollerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Submits `payload` exactly once and waits for its confirmation.
    pub async fn submit_and_wait<C>(&self, client: &C, payload: Value) -> Result<PollReport, PollError>
    where
        C: LedgerClient + ?Sized,
    {
        let receipt = client.submit(payload).await.map_err(PollError::Submit)?;
        info!(tx_hash = %receipt.tx_hash, "Submitted, waiting for confirmation");
        self.wait_for_confirmation(client, &receipt.tx_hash).await
    }

    pub async fn wait_for_confirmation<C>(
        &self,
        client: &C,
        tx_hash: &TxHash,
    ) -> Result<PollReport, PollError>
    where
        C: LedgerClient + ?Sized,
    {
        self.wait_with(client, tx_hash, |_| {}).await
    }

    /// Like [`wait_for_confirmation`](Self::wait_for_confirmation), calling
    /// `on_update` with every snapshot received.
    pub async fn wait_with<C, F>(
        &self,
        client: &C,
        tx_hash: &TxHash,
        mut on_update: F,
    ) -> Result<PollReport, PollError>
    where
        C: LedgerClient + ?Sized,
        F: FnMut(&StatusView),
    {
        let mut ticker = interval_at(Instant::now() + self.config.interval, self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut attempts = 0u32;
        let mut pending_observations = 0u32;
        let mut not_found = 0u32;

        loop {
            if let Some(max) = self.config.max_attempts {
                if attempts >= max {
                    warn!(tx_hash = %tx_hash, attempts, "Gave up waiting for confirmation");
                    return Err(PollError::Exhausted {
                        tx_hash: tx_hash.clone(),
                        attempts,
                    });
                }
            }

            ticker.tick().await;
            attempts += 1;

            match client.fetch_status(tx_hash).await {
                Ok(view) => {
                    not_found = 0;
                    on_update(&view);
                    if view.is_confirmed() {
                        info!(tx_hash = %tx_hash, attempts, block = view.block, "Transaction confirmed");
                        return Ok(PollReport {
                            view,
                            attempts,
                            pending_observations,
                        });
                    }
                    pending_observations += 1;
                    debug!(tx_hash = %tx_hash, attempts, "Still pending");
                }
                Err(e) if e.is_not_found() => {
                    not_found += 1;
                    debug!(tx_hash = %tx_hash, not_found, "Status not found yet");
                    if not_found > self.config.max_not_found {
                        return Err(PollError::NotFound {
                            tx_hash: tx_hash.clone(),
                            attempts,
                        });
                    }
                }
                Err(e) => {
                    warn!(tx_hash = %tx_hash, error = %e, "Status query failed");
                    return Err(PollError::Status(e));
                }
            }
        }
    }
}
