//! mBridge cross-border corridors.

use super::errors::RiskError;
use serde::{Deserialize, Serialize};
use shared_types::{AccountId, Amount};

/// A supported currency pair and its fixed conversion rate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorridorConfig {
    pub corridors: Vec<CorridorRate>,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            corridors: vec![CorridorRate {
                from_currency: "GHS".to_string(),
                to_currency: "NGN".to_string(),
                rate: Amount::from(70),
            }],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossBorderRequest {
    pub tx_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub amount: Amount,
    pub sender: AccountId,
    pub receiver: AccountId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossBorderSettlement {
    pub tx_id: String,
    pub from_currency: String,
    pub to_currency: String,
    pub original_amount: Amount,
    pub settled_amount: Amount,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CorridorOutcome {
    Settled(CrossBorderSettlement),
    Unsupported { status: String },
}

impl CorridorOutcome {
    fn unsupported() -> Self {
        Self::Unsupported {
            status: "unsupported currency pair".to_string(),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }
}

/// Lookup table over the configured corridors. Currency codes match exactly.
#[derive(Clone, Debug, Default)]
pub struct CorridorTable {
    rates: Vec<CorridorRate>,
}

impl CorridorTable {
    pub fn new(config: &CorridorConfig) -> Self {
        Self {
            rates: config.corridors.clone(),
        }
    }

    pub fn rate(&self, from: &str, to: &str) -> Option<Amount> {
        self.rates
            .iter()
            .find(|r| r.from_currency == from && r.to_currency == to)
            .map(|r| r.rate)
    }

    pub fn settle(&self, request: &CrossBorderRequest) -> Result<CorridorOutcome, RiskError> {
        if request.amount <= Amount::ZERO {
            return Err(RiskError::InvalidAmount(format!(
                "amount must be positive, got {}",
                request.amount
            )));
        }
        let Some(rate) = self.rate(&request.from_currency, &request.to_currency) else {
            return Ok(CorridorOutcome::unsupported());
        };
        Ok(CorridorOutcome::Settled(CrossBorderSettlement {
            tx_id: request.tx_id.clone(),
            from_currency: request.from_currency.clone(),
            to_currency: request.to_currency.clone(),
            original_amount: request.amount,
            settled_amount: request.amount * rate,
            status: "settled".to_string(),
        }))
    }
}
