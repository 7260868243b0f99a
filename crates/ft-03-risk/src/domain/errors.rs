//! Risk error types.

use super::alerts::AlertStatus;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RiskError {
    #[error("fraud alert not found: {0}")]
    AlertNotFound(String),

    #[error("alert {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: AlertStatus,
        to: AlertStatus,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("fraud threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}
