//! Inbound (Driving) port for the Settlement subsystem.

use crate::domain::{Account, Amount, Page, SettlementError, TransferRecord, TransferRequest};

/// Primary API of the settlement book.
pub trait SettlementApi: Send + Sync {
    /// Resets the configured genesis accounts to their opening balances.
    ///
    /// Returns the number of accounts seeded.
    fn init_ledger(&self) -> Result<usize, SettlementError>;

    /// Settles a transfer atomically and assigns it a `tx_id`.
    ///
    /// # Errors
    /// - `InvalidAmount` for zero, negative or self transfers
    /// - `AccountNotFound` if either party is unknown
    /// - `InsufficientBalance` if the sender cannot cover the amount
    fn transfer(&self, request: TransferRequest) -> Result<TransferRecord, SettlementError>;

    fn balance(&self, account: &str) -> Result<Amount, SettlementError>;

    fn account(&self, account: &str) -> Result<Account, SettlementError>;

    fn accounts(&self) -> Vec<Account>;

    /// Transfers involving `account`, oldest first. Unknown accounts have an
    /// empty history.
    fn history(&self, account: &str) -> Vec<TransferRecord>;

    fn transactions(&self, page: Page) -> Vec<TransferRecord>;

    fn transaction(&self, tx_id: &str) -> Result<TransferRecord, SettlementError>;

    /// Sum of all balances.
    fn total_supply(&self) -> Amount;
}
