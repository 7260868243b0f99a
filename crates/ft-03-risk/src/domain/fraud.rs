//! Fraud assessment value types.

use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount};

/// Scores strictly above this raise an alert.
pub const DEFAULT_FRAUD_THRESHOLD: f64 = 0.8;

/// Transaction submitted for scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudCheckRequest {
    pub tx_id: String,
    pub sender: AccountId,
    pub receiver: AccountId,
    pub amount: Amount,
}

impl FraudCheckRequest {
    /// Request carrying only a transaction id, used for lookups and the live feed.
    pub fn for_tx(tx_id: impl Into<String>) -> Self {
        Self {
            tx_id: tx_id.into(),
            sender: AccountId::new(),
            receiver: AccountId::new(),
            amount: Amount::ZERO,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FraudAssessment {
    pub tx_id: String,
    pub fraud_score: f64,
    pub alert: bool,
}

impl FraudAssessment {
    /// Clamps `score` into `[0, 1]` (NaN counts as 0) and applies `threshold`.
    pub fn new(tx_id: impl Into<String>, score: f64, threshold: f64) -> Self {
        let fraud_score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self {
            tx_id: tx_id.into(),
            fraud_score,
            alert: fraud_score > threshold,
        }
    }

    /// Score on the dashboard's 0-100 scale.
    pub fn risk_score(&self) -> u8 {
        (self.fraud_score * 100.0).round() as u8
    }
}
