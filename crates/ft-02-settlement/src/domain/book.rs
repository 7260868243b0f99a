//! Account Book - balances plus an append-only transfer log.
//!
//! Pure domain object with no interior locking; `SettlementService` owns the
//! lock that makes each transfer atomic.

use super::entities::{Account, AccountId, Amount, Page, TransferRecord};
use super::errors::SettlementError;
use chrono::{DateTime, Utc};
use shared_types::validate_account_id;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct AccountBook {
    accounts: BTreeMap<AccountId, Account>,
    transfers: Vec<TransferRecord>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or resets the given accounts to their opening balances.
    ///
    /// Accounts not in `genesis` are left alone. Every entry is validated
    /// before any is applied. Returns the number seeded.
    pub fn seed<'a, I>(&mut self, genesis: I) -> Result<usize, SettlementError>
    where
        I: IntoIterator<Item = (&'a str, Amount)>,
    {
        let genesis: Vec<(&str, Amount)> = genesis.into_iter().collect();
        for &(name, balance) in &genesis {
            validate_account_id(name)?;
            if balance.is_sign_negative() {
                return Err(SettlementError::InvalidAmount(format!(
                    "opening balance for {} is negative",
                    name
                )));
            }
        }

        for &(name, balance) in &genesis {
            self.accounts.insert(
                name.to_string(),
                Account {
                    name: name.to_string(),
                    balance,
                },
            );
        }
        Ok(genesis.len())
    }

    /// Moves `amount` from `sender` to `receiver`.
    ///
    /// Checks run in a fixed order: amount, accounts, balance. Nothing is
    /// modified unless every check passes.
    pub fn transfer(
        &mut self,
        sender: &str,
        receiver: &str,
        amount: Amount,
        tx_id: String,
        at: DateTime<Utc>,
    ) -> Result<TransferRecord, SettlementError> {
        if amount <= Amount::ZERO {
            return Err(SettlementError::InvalidAmount(format!(
                "amount must be positive, got {}",
                amount
            )));
        }
        if sender == receiver {
            return Err(SettlementError::InvalidAmount(
                "sender and receiver must differ".to_string(),
            ));
        }

        let available = self.account(sender)?.balance;
        self.account(receiver)?;

        if available < amount {
            return Err(SettlementError::InsufficientBalance {
                account: sender.to_string(),
                available,
                required: amount,
            });
        }

        if let Some(from) = self.accounts.get_mut(sender) {
            from.balance -= amount;
        }
        if let Some(to) = self.accounts.get_mut(receiver) {
            to.balance += amount;
        }

        let record = TransferRecord {
            id: self.transfers.len() as u64 + 1,
            tx_id,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount,
            timestamp: at,
        };
        self.transfers.push(record.clone());
        Ok(record)
    }

    pub fn account(&self, name: &str) -> Result<&Account, SettlementError> {
        self.accounts
            .get(name)
            .ok_or_else(|| SettlementError::AccountNotFound(name.to_string()))
    }

    pub fn balance(&self, name: &str) -> Result<Amount, SettlementError> {
        self.account(name).map(|a| a.balance)
    }

    /// Accounts in name order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Transfers where `account` is sender or receiver, oldest first.
    pub fn history(&self, account: &str) -> Vec<TransferRecord> {
        self.transfers
            .iter()
            .filter(|t| t.involves(account))
            .cloned()
            .collect()
    }

    pub fn transactions(&self, page: Page) -> Vec<TransferRecord> {
        self.transfers
            .iter()
            .skip(page.skip)
            .take(page.effective_limit())
            .cloned()
            .collect()
    }

    pub fn transaction(&self, tx_id: &str) -> Result<&TransferRecord, SettlementError> {
        self.transfers
            .iter()
            .find(|t| t.tx_id == tx_id)
            .ok_or_else(|| SettlementError::TransactionNotFound(tx_id.to_string()))
    }

    pub fn transfer_count(&self) -> usize {
        self.transfers.len()
    }

    pub fn total_supply(&self) -> Amount {
        self.accounts.values().map(|a| a.balance).sum()
    }
}
