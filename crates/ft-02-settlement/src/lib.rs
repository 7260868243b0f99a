//! # Settlement Subsystem
//!
//! **Subsystem ID:** 2
//!
//! Interbank account book backing the dashboard's transfer screens.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Amount strictly positive | `domain/book.rs` - `transfer()` |
//! | Both accounts exist | `domain/book.rs` - `transfer()` |
//! | No overdraft | `domain/book.rs` - `transfer()` |
//! | Debit and credit are atomic | `service.rs` - single write lock |
//! | Transfers conserve total supply | `domain/book.rs` - `total_supply()` |
//!
//! ## Module Structure
//!
//! ```text
//! domain/   - Account, TransferRecord, AccountBook, SettlementError
//! ports/    - SettlementApi (inbound)
//! service   - SettlementService (RwLock<AccountBook>)
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::inbound::SettlementApi;
pub use service::{GenesisAccount, SettlementConfig, SettlementService};
