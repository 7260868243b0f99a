//! # Shared Types Crate
//!
//! Identifiers and value types that cross subsystem boundaries.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `TxHash`, `Timestamp` and account names are
//!   defined once here and re-used by every subsystem.
//! - **Transparent Wire Format**: newtypes serialize as their inner value so the
//!   JSON seen by dashboard clients is unchanged.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
