//! Settlement entities.

pub use shared_types::{AccountId, Amount};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default page size for transaction listings.
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Hard cap on a single page.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// A settlement account and its balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: AccountId,
    pub balance: Amount,
}

/// Request to move funds between two accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: Amount,
}

/// A completed transfer. Also serves as the transaction registry entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Sequential id, starting at 1
    pub id: u64,
    /// UUID v4 assigned at settlement
    pub tx_id: String,
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

impl TransferRecord {
    pub fn involves(&self, account: &str) -> bool {
        self.sender == account || self.receiver == account
    }
}

/// Offset pagination (`skip` / `limit`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    pub skip: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Page {
    pub fn new(skip: usize, limit: usize) -> Self {
        Self { skip, limit }
    }

    /// Limit clamped to [`MAX_PAGE_LIMIT`].
    pub fn effective_limit(&self) -> usize {
        self.limit.min(MAX_PAGE_LIMIT)
    }
}
