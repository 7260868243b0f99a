//! # Node Runtime Library
//!
//! Wires the FinTrust subsystems together behind the API gateway. The main
//! entry point is the `main.rs` binary; the library is exposed for tests.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (defaults, `FT_CONFIG` file, `FT_*` overrides)
//! 2. Initialize subsystems in dependency order (ledger, settlement, risk)
//! 3. Bind the gateway and serve
//! 4. On Ctrl+C: drain HTTP, cancel pending confirmation timers

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod container;
pub mod runtime;

pub use container::{ConfigError, ContainerError, NodeConfig, SubsystemContainer};
pub use runtime::{NodeError, NodeRuntime};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
