//! Fraud scorer adapters.

use crate::domain::FraudCheckRequest;
use crate::ports::outbound::FraudScorer;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random score in `[0, 1)`, standing in for the trained model.
pub struct RandomFraudScorer {
    rng: Mutex<StdRng>,
}

impl RandomFraudScorer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomFraudScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FraudScorer for RandomFraudScorer {
    fn score(&self, _request: &FraudCheckRequest) -> f64 {
        self.rng.lock().gen_range(0.0..1.0)
    }
}

/// Always returns the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedFraudScorer(pub f64);

impl FraudScorer for FixedFraudScorer {
    fn score(&self, _request: &FraudCheckRequest) -> f64 {
        self.0
    }
}
