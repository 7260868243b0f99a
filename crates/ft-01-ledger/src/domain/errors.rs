//! Ledger error types.

use shared_types::TxHash;

/// Ledger error type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Hash missing from the request or unknown to the store.
    #[error("Transaction not found")]
    NotFound { tx_hash: Option<TxHash> },

    /// Payload rejected at the boundary.
    #[error("invalid transaction payload: {0}")]
    InvalidPayload(String),

    /// Every generated hash collided with an existing record.
    #[error("could not allocate a unique transaction hash after {attempts} attempts")]
    HashCollision { attempts: u32 },

    /// A remote ledger could not be reached or answered unexpectedly.
    #[error("ledger transport error: {0}")]
    Transport(String),
}

impl LedgerError {
    pub fn not_found(tx_hash: impl Into<TxHash>) -> Self {
        Self::NotFound {
            tx_hash: Some(tx_hash.into()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
