//! WebSocket push feeds.
//!
//! - `/api/ledger/ws`: ledger `submitted` / `confirmed` events as they happen
//! - `/api/v1/fraud-alerts/ws`: greeting, then a fresh assessment per tick

pub mod fraud_feed;
pub mod ledger_feed;

pub use fraud_feed::{fraud_feed, GREETING};
pub use ledger_feed::ledger_feed;
