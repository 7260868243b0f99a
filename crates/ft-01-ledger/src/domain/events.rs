//! Ledger lifecycle events broadcast to subscribers (WebSocket feed, tests).

use super::entities::{Timestamp, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// A record was created in `pending` state.
    Submitted {
        #[serde(rename = "txHash")]
        tx_hash: TxHash,
        block: u64,
        timestamp: Timestamp,
    },
    /// A record moved to `confirmed`.
    Confirmed {
        #[serde(rename = "txHash")]
        tx_hash: TxHash,
        block: u64,
        #[serde(rename = "confirmedAt")]
        confirmed_at: Timestamp,
    },
}

impl LedgerEvent {
    pub fn tx_hash(&self) -> &TxHash {
        match self {
            Self::Submitted { tx_hash, .. } | Self::Confirmed { tx_hash, .. } => tx_hash,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Submitted { .. } => "submitted",
            Self::Confirmed { .. } => "confirmed",
        }
    }
}
