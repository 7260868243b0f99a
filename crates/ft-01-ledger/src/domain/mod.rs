//! Domain layer for the Ledger subsystem.

pub mod entities;
pub mod errors;
pub mod events;
pub mod hash;
pub mod store;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use hash::*;
pub use store::*;
pub use validation::*;
