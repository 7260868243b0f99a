//! Outbound (Driven) port for the Risk subsystem.

use crate::domain::FraudCheckRequest;

/// Fraud model.
///
/// Returns a raw score; thresholding and clamping happen in
/// `FraudAssessment::new` so every model is judged the same way.
pub trait FraudScorer: Send + Sync {
    fn score(&self, request: &FraudCheckRequest) -> f64;
}
