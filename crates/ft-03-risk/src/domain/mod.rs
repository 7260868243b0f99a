//! Risk domain.

pub mod alerts;
pub mod audit;
pub mod compliance;
pub mod corridor;
pub mod errors;
pub mod fraud;

pub use alerts::{AlertQueue, AlertStatus, FraudAlert};
pub use audit::{AuditEntry, AuditLog, DEFAULT_AUDIT_CAPACITY};
pub use compliance::{render_report, AmlStatus, ReportArchive};
pub use corridor::{CorridorConfig, CorridorOutcome, CorridorRate, CorridorTable, CrossBorderRequest, CrossBorderSettlement};
pub use errors::RiskError;
pub use fraud::{FraudAssessment, FraudCheckRequest, DEFAULT_FRAUD_THRESHOLD};
