//! Core domain entities for the Ledger subsystem.
//!
//! Defines the record state machine and the wire views returned to clients.

pub use shared_types::{Timestamp, TxHash};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Confirmation state of a ledger record.
///
/// ```text
/// [PENDING] ──confirm──→ [CONFIRMED]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerStatus {
    #[default]
    Pending,
    Confirmed,
}

impl LedgerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

impl std::fmt::Display for LedgerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted transaction and its confirmation state.
///
/// Fields other than `status` are fixed at creation. They are private so the
/// only mutation path is [`LedgerRecord::confirm`].
#[derive(Clone, Debug, PartialEq)]
pub struct LedgerRecord {
    tx_hash: TxHash,
    status: LedgerStatus,
    block: u64,
    timestamp: Timestamp,
    tx: Value,
    confirmed_at: Option<Timestamp>,
}

impl LedgerRecord {
    /// Creates a new pending record.
    pub fn pending(tx_hash: TxHash, block: u64, timestamp: Timestamp, tx: Value) -> Self {
        Self {
            tx_hash,
            status: LedgerStatus::Pending,
            block,
            timestamp,
            tx,
            confirmed_at: None,
        }
    }

    pub fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    pub fn status(&self) -> LedgerStatus {
        self.status
    }

    pub fn block(&self) -> u64 {
        self.block
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn tx(&self) -> &Value {
        &self.tx
    }

    pub fn confirmed_at(&self) -> Option<Timestamp> {
        self.confirmed_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == LedgerStatus::Pending
    }

    /// Moves the record to `Confirmed`.
    ///
    /// Returns `false` (and changes nothing) if it was already confirmed.
    pub fn confirm(&mut self, now: Timestamp) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = LedgerStatus::Confirmed;
        self.confirmed_at = Some(now);
        true
    }

    /// Re-keys a record that has not been stored yet.
    pub(crate) fn with_tx_hash(mut self, tx_hash: TxHash) -> Self {
        self.tx_hash = tx_hash;
        self
    }

    pub fn view(&self) -> StatusView {
        StatusView::from(self)
    }
}

/// Response to a successful submit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReceipt {
    pub tx_hash: TxHash,
    pub status: LedgerStatus,
}

/// Point-in-time snapshot returned by the status query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusView {
    pub tx_hash: TxHash,
    pub status: LedgerStatus,
    pub block: u64,
    pub timestamp: Timestamp,
    pub tx: Value,
}

impl StatusView {
    pub fn is_confirmed(&self) -> bool {
        self.status == LedgerStatus::Confirmed
    }
}

impl From<&LedgerRecord> for StatusView {
    fn from(record: &LedgerRecord) -> Self {
        Self {
            tx_hash: record.tx_hash.clone(),
            status: record.status,
            block: record.block,
            timestamp: record.timestamp,
            tx: record.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> LedgerRecord {
        LedgerRecord::pending(
            TxHash::from_parts(0xabcd_0001, 1_000),
            4242,
            1_000,
            json!({"sender": "BankA", "amount": 500}),
        )
    }

    #[test]
    fn test_new_record_is_pending() {
        let record = sample();
        assert!(record.is_pending());
        assert_eq!(record.confirmed_at(), None);
    }

    #[test]
    fn test_confirm_is_one_way() {
        let mut record = sample();
        assert!(record.confirm(4_000));
        assert_eq!(record.status(), LedgerStatus::Confirmed);
        assert_eq!(record.confirmed_at(), Some(4_000));

        // Second confirm is a no-op and keeps the first confirmation time
        assert!(!record.confirm(9_000));
        assert_eq!(record.confirmed_at(), Some(4_000));
        assert_eq!(record.block(), 4242);
        assert_eq!(record.timestamp(), 1_000);
    }

    #[test]
    fn test_status_view_wire_shape() {
        let view = sample().view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["txHash"], "0xabcd00013e8");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["block"], 4242);
        assert_eq!(json["timestamp"], 1_000);
        assert_eq!(json["tx"]["sender"], "BankA");
    }

    #[test]
    fn test_submit_receipt_wire_shape() {
        let receipt = SubmitReceipt {
            tx_hash: TxHash::from("0x1"),
            status: LedgerStatus::Pending,
        };
        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            json!({"txHash": "0x1", "status": "pending"})
        );
    }
}
