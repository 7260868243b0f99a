//! REST handlers, one module per resource.

pub mod audit;
pub mod compliance;
pub mod fraud;
pub mod ledger;
pub mod mbridge;
pub mod ops;
pub mod transactions;
