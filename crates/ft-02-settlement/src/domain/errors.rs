//! Settlement error types.

use shared_types::{AccountId, Amount, IdError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettlementError {
    /// Zero, negative, or self-directed transfer.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("insufficient balance: {account} has {available}, needs {required}")]
    InsufficientBalance {
        account: AccountId,
        available: Amount,
        required: Amount,
    },

    #[error("Transaction not found")]
    TransactionNotFound(String),

    #[error(transparent)]
    InvalidAccount(#[from] IdError),
}

impl SettlementError {
    /// True for errors caused by the caller's input rather than missing data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_) | Self::InsufficientBalance { .. } | Self::InvalidAccount(_)
        )
    }
}
