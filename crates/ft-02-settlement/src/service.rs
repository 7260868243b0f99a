//! Settlement service - a single `RwLock<AccountBook>` behind `SettlementApi`.

use crate::domain::{
    Account, AccountBook, Amount, Page, SettlementError, TransferRecord, TransferRequest,
};
use crate::ports::inbound::SettlementApi;
use chrono::Utc;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// An account created by `init_ledger`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub name: String,
    pub balance: Amount,
}

impl GenesisAccount {
    pub fn new(name: impl Into<String>, balance: Amount) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub genesis_accounts: Vec<GenesisAccount>,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            genesis_accounts: vec![
                GenesisAccount::new("BankA", Decimal::from(1_000_000)),
                GenesisAccount::new("BankB", Decimal::from(500_000)),
            ],
        }
    }
}

pub struct SettlementService {
    config: SettlementConfig,
    book: RwLock<AccountBook>,
}

impl SettlementService {
    /// Creates the service and seeds the genesis accounts.
    pub fn new(config: SettlementConfig) -> Result<Self, SettlementError> {
        let service = Self {
            config,
            book: RwLock::new(AccountBook::new()),
        };
        service.init_ledger()?;
        Ok(service)
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }
}

impl SettlementApi for SettlementService {
    fn init_ledger(&self) -> Result<usize, SettlementError> {
        let genesis = self
            .config
            .genesis_accounts
            .iter()
            .map(|a| (a.name.as_str(), a.balance));
        let seeded = self.book.write().seed(genesis)?;
        info!(accounts = seeded, "Settlement ledger initialised");
        Ok(seeded)
    }

    fn transfer(&self, request: TransferRequest) -> Result<TransferRecord, SettlementError> {
        let tx_id = Uuid::new_v4().to_string();
        let result = self.book.write().transfer(
            &request.sender,
            &request.receiver,
            request.amount,
            tx_id,
            Utc::now(),
        );

        match &result {
            Ok(record) => info!(
                tx_id = %record.tx_id,
                sender = %record.sender,
                receiver = %record.receiver,
                amount = %record.amount,
                "Transfer settled"
            ),
            Err(e) => warn!(
                sender = %request.sender,
                receiver = %request.receiver,
                error = %e,
                "Transfer rejected"
            ),
        }
        result
    }

    fn balance(&self, account: &str) -> Result<Amount, SettlementError> {
        self.book.read().balance(account)
    }

    fn account(&self, account: &str) -> Result<Account, SettlementError> {
        self.book.read().account(account).cloned()
    }

    fn accounts(&self) -> Vec<Account> {
        self.book.read().accounts().cloned().collect()
    }

    fn history(&self, account: &str) -> Vec<TransferRecord> {
        self.book.read().history(account)
    }

    fn transactions(&self, page: Page) -> Vec<TransferRecord> {
        self.book.read().transactions(page)
    }

    fn transaction(&self, tx_id: &str) -> Result<TransferRecord, SettlementError> {
        self.book.read().transaction(tx_id).cloned()
    }

    fn total_supply(&self) -> Amount {
        self.book.read().total_supply()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::thread;

    fn service() -> SettlementService {
        SettlementService::new(SettlementConfig::default()).unwrap()
    }

    fn request(sender: &str, receiver: &str, amount: Amount) -> TransferRequest {
        TransferRequest {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }

    #[test]
    fn test_genesis_balances() {
        let svc = service();
        assert_eq!(svc.balance("BankA").unwrap(), dec!(1000000));
        assert_eq!(svc.balance("BankB").unwrap(), dec!(500000));
        assert_eq!(svc.accounts().len(), 2);
    }

    #[test]
    fn test_transfer_assigns_uuid() {
        let svc = service();
        let record = svc.transfer(request("BankA", "BankB", dec!(100))).unwrap();

        assert!(Uuid::parse_str(&record.tx_id).is_ok());
        assert_eq!(svc.transaction(&record.tx_id).unwrap(), record);
        assert_eq!(svc.history("BankA"), vec![record]);
    }

    #[test]
    fn test_init_ledger_resets() {
        let svc = service();
        svc.transfer(request("BankA", "BankB", dec!(100))).unwrap();
        assert_eq!(svc.init_ledger().unwrap(), 2);
        assert_eq!(svc.balance("BankA").unwrap(), dec!(1000000));
    }

    #[test]
    fn test_invalid_genesis_fails_construction() {
        let config = SettlementConfig {
            genesis_accounts: vec![GenesisAccount::new("", dec!(1))],
        };
        assert!(SettlementService::new(config).is_err());
    }

    #[test]
    fn test_concurrent_transfers_conserve_supply() {
        let svc = Arc::new(service());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let svc = Arc::clone(&svc);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let (from, to) = if i % 2 == 0 {
                            ("BankA", "BankB")
                        } else {
                            ("BankB", "BankA")
                        };
                        svc.transfer(request(from, to, dec!(10))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(svc.total_supply(), dec!(1500000));
        assert_eq!(svc.transactions(Page::new(0, 1000)).len(), 400);
    }

    #[test]
    fn test_config_deserializes_numeric_balances() {
        let config: SettlementConfig = serde_json::from_str(
            r#"{"genesis_accounts": [{"name": "CentralBank", "balance": 2500000}]}"#,
        )
        .unwrap();
        assert_eq!(config.genesis_accounts[0].balance, dec!(2500000));
    }
}
