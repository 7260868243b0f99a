//! # Subsystem Container
//!
//! Holds the subsystem instances and their configuration. Subsystems are
//! built in dependency order: ledger, settlement, then risk (which reads
//! settlement records for its reports).

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, CONFIG_PATH_ENV};
pub use subsystems::{ContainerError, SubsystemContainer};
