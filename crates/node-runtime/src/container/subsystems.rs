//! # Subsystem Container
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Ledger (no dependencies)
//! Level 0: Settlement (seeds genesis accounts)
//! Level 1: Risk (reads settlement records for reports)
//! ```
//!
//! All subsystems are wrapped in `Arc`; each guards its own state.

use std::sync::Arc;

use tracing::{info, instrument};

use ft_01_ledger::{LedgerApi, LedgerService};
use ft_02_settlement::{SettlementError, SettlementService};
use ft_03_risk::{FraudScorer, RandomFraudScorer, RiskError, RiskService};

use crate::container::config::NodeConfig;

/// Failure while building a subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("settlement init failed: {0}")]
    Settlement(#[from] SettlementError),

    #[error("risk init failed: {0}")]
    Risk(#[from] RiskError),
}

/// Central container holding all subsystem instances.
pub struct SubsystemContainer {
    /// Mock ledger with delayed confirmation (FT-01)
    pub ledger: Arc<LedgerService>,
    /// Account book and transfers (FT-02)
    pub settlement: Arc<SettlementService>,
    /// Fraud, alerts, compliance and corridors (FT-03)
    pub risk: Arc<RiskService>,
    /// Configuration the container was built from
    pub config: NodeConfig,
}

impl SubsystemContainer {
    /// Build all subsystems with the random fraud scorer.
    pub fn new(config: NodeConfig) -> Result<Self, ContainerError> {
        Self::with_scorer(config, Arc::new(RandomFraudScorer::new()))
    }

    #[instrument(name = "container_init", skip_all)]
    pub fn with_scorer(
        config: NodeConfig,
        scorer: Arc<dyn FraudScorer>,
    ) -> Result<Self, ContainerError> {
        let ledger = Arc::new(LedgerService::new(config.gateway.ledger_config()));
        info!(
            delay_ms = config.gateway.ledger.confirmation_delay.as_millis() as u64,
            "  [FT-01] Ledger initialized"
        );

        let settlement = Arc::new(SettlementService::new(config.settlement.clone())?);
        info!("  [FT-02] Settlement initialized");

        let risk = Arc::new(RiskService::new(config.risk_config(), scorer)?);
        info!(
            threshold = config.gateway.fraud.threshold,
            "  [FT-03] Risk initialized"
        );

        Ok(Self {
            ledger,
            settlement,
            risk,
            config,
        })
    }

    /// Cancel outstanding confirmation timers. Returns how many were dropped.
    pub fn shutdown(&self) -> usize {
        self.ledger.shutdown()
    }

    pub fn pending_confirmations(&self) -> usize {
        self.ledger.stats().scheduled_confirmations
    }
}
