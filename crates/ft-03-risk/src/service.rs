//! Risk service - fraud scoring, alert queue, reports and corridors behind one
//! handle.

use crate::domain::{
    AlertQueue, AlertStatus, AmlStatus, AuditEntry, AuditLog, CorridorConfig, CorridorOutcome, CorridorTable,
    CrossBorderRequest, FraudAlert, FraudAssessment, FraudCheckRequest, ReportArchive, RiskError,
    DEFAULT_AUDIT_CAPACITY, DEFAULT_FRAUD_THRESHOLD,
};
use crate::ports::outbound::FraudScorer;
use chrono::Utc;
use ft_02_settlement::TransferRecord;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Scores strictly above this are flagged
    pub fraud_threshold: f64,
    pub corridors: CorridorConfig,
    /// Audit entries kept before the oldest is dropped
    pub audit_capacity: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            fraud_threshold: DEFAULT_FRAUD_THRESHOLD,
            corridors: CorridorConfig::default(),
            audit_capacity: DEFAULT_AUDIT_CAPACITY,
        }
    }
}

/// Result of screening a transaction.
#[derive(Debug, Clone)]
pub struct Screening {
    pub assessment: FraudAssessment,
    /// Present when the assessment was flagged
    pub alert: Option<FraudAlert>,
}

pub struct RiskService {
    threshold: f64,
    scorer: Arc<dyn FraudScorer>,
    alerts: RwLock<AlertQueue>,
    reports: RwLock<ReportArchive>,
    audit: RwLock<AuditLog>,
    corridors: CorridorTable,
}

impl RiskService {
    pub fn new(config: RiskConfig, scorer: Arc<dyn FraudScorer>) -> Result<Self, RiskError> {
        if !(0.0..=1.0).contains(&config.fraud_threshold) {
            return Err(RiskError::InvalidThreshold(config.fraud_threshold));
        }
        Ok(Self {
            threshold: config.fraud_threshold,
            scorer,
            alerts: RwLock::new(AlertQueue::new()),
            reports: RwLock::new(ReportArchive::new()),
            audit: RwLock::new(AuditLog::with_capacity(config.audit_capacity)),
            corridors: CorridorTable::new(&config.corridors),
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Scores a transaction without touching the alert queue.
    pub fn assess(&self, request: &FraudCheckRequest) -> FraudAssessment {
        let score = self.scorer.score(request);
        let assessment = FraudAssessment::new(request.tx_id.clone(), score, self.threshold);
        debug!(tx_id = %assessment.tx_id, score = assessment.fraud_score, "Fraud score computed");
        assessment
    }

    /// Scores a transaction and raises an alert if it is flagged.
    pub fn screen(&self, request: &FraudCheckRequest) -> Screening {
        let assessment = self.assess(request);
        let alert = assessment.alert.then(|| {
            let alert = self.alerts.write().raise(&assessment, self.threshold, Utc::now());
            warn!(
                alert_id = %alert.id,
                tx_id = %alert.transaction_id,
                risk_score = alert.risk_score,
                "Fraud alert raised"
            );
            self.record_audit(
                "risk",
                "fraud_alert_raised",
                Some(format!("{} for {}", alert.id, alert.transaction_id)),
            );
            alert
        });
        Screening { assessment, alert }
    }

    pub fn alerts(&self, status: Option<AlertStatus>) -> Vec<FraudAlert> {
        self.alerts.read().list(status)
    }

    pub fn alert(&self, id: &str) -> Result<FraudAlert, RiskError> {
        self.alerts.read().get(id).cloned()
    }

    pub fn review_alert(&self, id: &str) -> Result<FraudAlert, RiskError> {
        self.transition(id, AlertStatus::Reviewed)
    }

    pub fn resolve_alert(&self, id: &str) -> Result<FraudAlert, RiskError> {
        self.transition(id, AlertStatus::Resolved)
    }

    fn transition(&self, id: &str, next: AlertStatus) -> Result<FraudAlert, RiskError> {
        let alert = self.alerts.write().transition(id, next)?;
        info!(alert_id = %id, status = %next, "Fraud alert updated");
        let action = match next {
            AlertStatus::Resolved => "fraud_alert_resolved",
            _ => "fraud_alert_reviewed",
        };
        self.record_audit("risk", action, Some(id.to_string()));
        Ok(alert)
    }

    pub fn open_alerts(&self) -> usize {
        self.alerts.read().count_by_status(AlertStatus::New)
    }

    pub fn aml_status(&self, account: &str) -> AmlStatus {
        AmlStatus::clear(account)
    }

    /// AML report for a settled transfer, generated once and cached.
    pub fn report(&self, record: &TransferRecord) -> String {
        let (report, generated) = self.reports.write().get_or_render(record);
        if generated {
            info!(tx_id = %record.tx_id, "Compliance report generated");
            self.record_audit("risk", "compliance_report_generated", Some(record.tx_id.clone()));
        }
        report
    }

    pub fn report_names(&self) -> Vec<String> {
        self.reports.read().names()
    }

    /// Appends to the audit trail, stamped now.
    pub fn record_audit(&self, actor: &str, action: &str, details: Option<String>) {
        self.audit.write().record(AuditEntry {
            timestamp: Utc::now(),
            actor: actor.to_string(),
            action: action.to_string(),
            details,
        });
    }

    /// Up to `limit` audit entries, newest first.
    pub fn audit_log(&self, limit: usize) -> Vec<AuditEntry> {
        self.audit.read().entries(limit)
    }

    pub fn settle_cross_border(&self, request: &CrossBorderRequest) -> Result<CorridorOutcome, RiskError> {
        let outcome = self.corridors.settle(request)?;
        if outcome.is_settled() {
            info!(
                tx_id = %request.tx_id,
                from = %request.from_currency,
                to = %request.to_currency,
                amount = %request.amount,
                "Cross-border settlement"
            );
        } else {
            debug!(
                from = %request.from_currency,
                to = %request.to_currency,
                "Unsupported corridor"
            );
        }
        Ok(outcome)
    }
}
