//! # Ledger Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Accepts opaque transaction payloads, assigns each a hash and a synthetic
//! block number, and confirms it after a fixed delay. Clients discover the
//! confirmation by polling the status query.
//!
//! ## State Machine
//!
//! ```text
//! [no record] ──submit──→ [PENDING] ──(delay elapses | finalize)──→ [CONFIRMED]
//!                                                                   (terminal)
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | One record per hash, never overwritten | `domain/store.rs` - `insert_new()` vacant entry |
//! | Status only moves pending → confirmed | `domain/entities.rs` - `LedgerRecord::confirm()` |
//! | `block` / `timestamp` immutable | `domain/entities.rs` - private fields |
//! | Insert happens-before confirmation | `service.rs` - schedule after `insert_new()` |
//! | Payload stored verbatim | `domain/entities.rs` - `tx` is never mutated |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs   - LedgerService (implements LedgerApi)            │
//! │  scheduler.rs - ConfirmationScheduler (cancellable timers)      │
//! │  poller.rs    - StatusPoller (client-side confirmation wait)    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - LedgerApi trait                            │
//! │  ports/outbound.rs - TimeSource, EntropySource, LedgerClient    │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/entities.rs   - LedgerRecord, LedgerStatus, StatusView  │
//! │  domain/store.rs      - LedgerStore (DashMap)                   │
//! │  domain/hash.rs       - HashGenerator                           │
//! │  domain/validation.rs - payload limits                          │
//! │  domain/events.rs     - LedgerEvent                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod poller;
pub mod ports;
pub mod scheduler;
pub mod service;

pub use domain::*;
pub use poller::{PollError, PollReport, PollerConfig, StatusPoller};
pub use ports::inbound::{LedgerApi, LedgerStats};
pub use ports::outbound::{
    EntropySource, LedgerClient, ManualTimeSource, SeededEntropy, SystemTimeSource,
    ThreadRngEntropy, TimeSource,
};
pub use scheduler::ConfirmationScheduler;
pub use service::{LedgerConfig, LedgerService};
