//! # FinTrust Test Suite
//!
//! Cross-subsystem tests that exercise the ledger, settlement and risk crates
//! through the gateway, either in-process or over a real socket.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── harness.rs        # In-process router and live node fixtures
//! └── integration/
//!     ├── ledger_flow.rs    # submit → pending → confirmed, poller
//!     ├── payments_flow.rs  # transfers, fraud alerts, compliance, mBridge
//!     └── live.rs           # HTTP client and WebSocket feeds over TCP
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ft-tests
//! cargo test -p ft-tests integration::live::
//! cargo bench -p ft-tests
//! ```

#[cfg(test)]
mod harness;
pub mod integration;
