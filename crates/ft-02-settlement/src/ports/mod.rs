//! Ports for the Settlement subsystem.

pub mod inbound;
