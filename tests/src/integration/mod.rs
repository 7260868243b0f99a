//! Cross-subsystem integration flows.

pub mod ledger_flow;
pub mod live;
pub mod payments_flow;
