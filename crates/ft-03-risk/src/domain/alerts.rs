//! Fraud alert review queue.
//!
//! ```text
//! [New] --review--> [Reviewed] --resolve--> [Resolved]
//!   └────────────────resolve──────────────────┘
//! ```

use super::errors::RiskError;
use super::fraud::FraudAssessment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Reviewed,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Reviewed => "Reviewed",
            Self::Resolved => "Resolved",
        }
    }

    pub fn can_transition_to(&self, next: AlertStatus) -> bool {
        matches!(
            (self, next),
            (Self::New, Self::Reviewed) | (Self::New, Self::Resolved) | (Self::Reviewed, Self::Resolved)
        )
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Ok(Self::New),
            "reviewed" => Ok(Self::Reviewed),
            "resolved" => Ok(Self::Resolved),
            other => Err(format!("unknown alert status: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudAlert {
    pub id: String,
    pub transaction_id: String,
    pub date: DateTime<Utc>,
    pub reason: String,
    /// 0-100
    pub risk_score: u8,
    pub status: AlertStatus,
}

/// Alerts keyed by id, in raise order.
#[derive(Debug, Default)]
pub struct AlertQueue {
    alerts: BTreeMap<u64, FraudAlert>,
    next_seq: u64,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises an alert for a flagged assessment.
    pub fn raise(&mut self, assessment: &FraudAssessment, threshold: f64, at: DateTime<Utc>) -> FraudAlert {
        self.next_seq += 1;
        let alert = FraudAlert {
            id: format_alert_id(self.next_seq),
            transaction_id: assessment.tx_id.clone(),
            date: at,
            reason: format!(
                "Fraud score {:.2} exceeds threshold {:.2}",
                assessment.fraud_score, threshold
            ),
            risk_score: assessment.risk_score(),
            status: AlertStatus::New,
        };
        self.alerts.insert(self.next_seq, alert.clone());
        alert
    }

    pub fn get(&self, id: &str) -> Result<&FraudAlert, RiskError> {
        parse_alert_id(id)
            .and_then(|seq| self.alerts.get(&seq))
            .ok_or_else(|| RiskError::AlertNotFound(id.to_string()))
    }

    /// Alerts oldest first, optionally filtered by status.
    pub fn list(&self, status: Option<AlertStatus>) -> Vec<FraudAlert> {
        self.alerts
            .values()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .cloned()
            .collect()
    }

    pub fn transition(&mut self, id: &str, next: AlertStatus) -> Result<FraudAlert, RiskError> {
        let alert = parse_alert_id(id)
            .and_then(|seq| self.alerts.get_mut(&seq))
            .ok_or_else(|| RiskError::AlertNotFound(id.to_string()))?;

        if !alert.status.can_transition_to(next) {
            return Err(RiskError::InvalidTransition {
                id: id.to_string(),
                from: alert.status,
                to: next,
            });
        }
        alert.status = next;
        Ok(alert.clone())
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn count_by_status(&self, status: AlertStatus) -> usize {
        self.alerts.values().filter(|a| a.status == status).count()
    }
}

fn format_alert_id(seq: u64) -> String {
    format!("FA{:04}", seq)
}

fn parse_alert_id(id: &str) -> Option<u64> {
    id.strip_prefix("FA")?.parse().ok()
}
