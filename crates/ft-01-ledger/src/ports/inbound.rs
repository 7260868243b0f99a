//! Inbound (Driving) port for the Ledger subsystem.

use crate::domain::{LedgerError, LedgerEvent, StatusView, SubmitReceipt, TxHash};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;

/// Counters describing the ledger at a point in time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LedgerStats {
    pub records: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub scheduled_confirmations: usize,
    pub collisions: u64,
}

/// Primary API of the ledger.
///
/// Calls never block on the confirmation delay. `submit` must be invoked
/// from within a Tokio runtime because it schedules the confirmation task.
pub trait LedgerApi: Send + Sync {
    /// Records `payload` as a pending transaction and schedules its
    /// confirmation.
    ///
    /// # Errors
    /// - `InvalidPayload` if the payload is not an object within limits
    /// - `HashCollision` if no unique hash could be allocated
    fn submit(&self, payload: Value) -> Result<SubmitReceipt, LedgerError>;

    /// Current state of a transaction.
    ///
    /// A missing or empty `tx_hash` is reported as `NotFound`, same as an
    /// unknown one.
    fn status(&self, tx_hash: Option<&str>) -> Result<StatusView, LedgerError>;

    /// Confirms immediately, cancelling the scheduled timer.
    ///
    /// Idempotent for already-confirmed records.
    fn finalize(&self, tx_hash: &TxHash) -> Result<StatusView, LedgerError>;

    /// Cancels a scheduled confirmation. The record stays pending until
    /// finalized. Returns `false` if nothing was scheduled.
    fn cancel_confirmation(&self, tx_hash: &TxHash) -> bool;

    /// Most recent records first.
    fn recent(&self, limit: usize) -> Vec<StatusView>;

    fn stats(&self) -> LedgerStats;

    /// Subscribe to submitted/confirmed events. Events sent before the
    /// call are not replayed.
    fn subscribe(&self) -> broadcast::Receiver<LedgerEvent>;
}
