//! Ports for the Ledger subsystem.
//!
//! - `inbound`: the API the gateway drives (`LedgerApi`)
//! - `outbound`: what the ledger needs from the world (time, randomness) and
//!   the client-side contract used by the poller (`LedgerClient`)

pub mod inbound;
pub mod outbound;
