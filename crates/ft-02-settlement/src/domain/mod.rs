//! Domain layer for the Settlement subsystem.

pub mod book;
pub mod entities;
pub mod errors;

pub use book::AccountBook;
pub use entities::*;
pub use errors::SettlementError;
