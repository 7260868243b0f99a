//! # Risk Subsystem
//!
//! **Subsystem ID:** 3
//!
//! Everything the dashboard shows about risk: fraud scores, the fraud alert
//! review queue, AML status and reports, the audit trail and the GHS/NGN
//! mBridge corridor.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Fraud score within `[0, 1]` | `domain/fraud.rs` - `FraudAssessment::new()` |
//! | Alert iff score > threshold | `domain/fraud.rs` - `FraudAssessment::new()` |
//! | Alert status only moves forward | `domain/alerts.rs` - `AlertStatus::can_transition_to()` |
//! | One report per settlement tx | `domain/compliance.rs` - `ReportArchive` |
//! | Audit trail bounded, newest first | `domain/audit.rs` - `AuditLog::record()` |
//!
//! ## Module Structure
//!
//! ```text
//! domain/    - assessments, alerts, audit trail, compliance reports, corridors
//! ports/     - FraudScorer (outbound)
//! adapters/  - RandomFraudScorer, FixedFraudScorer
//! service    - RiskService
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FixedFraudScorer, RandomFraudScorer};
pub use domain::*;
pub use ports::outbound::FraudScorer;
pub use service::{RiskConfig, RiskService, Screening};
