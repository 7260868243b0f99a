//! Outbound adapters.

pub mod http_client;

pub use http_client::{HttpLedgerClient, DEFAULT_CLIENT_TIMEOUT};
