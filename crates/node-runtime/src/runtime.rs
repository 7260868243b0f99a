//! # Node Runtime
//!
//! Owns the subsystem container and the gateway, and drives startup and
//! graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use fintrust_telemetry::log_event;
use ft_03_risk::FraudScorer;
use ft_04_api_gateway::{ApiGatewayService, GatewayError};
use tracing::info;

use crate::container::{ContainerError, NodeConfig, SubsystemContainer};

/// Runtime failures.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The main node runtime orchestrating all subsystems.
pub struct NodeRuntime {
    container: Arc<SubsystemContainer>,
    gateway: ApiGatewayService,
}

impl NodeRuntime {
    /// Build subsystems in dependency order, then the gateway over them.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        info!("Creating FinTrust node runtime");
        Self::from_container(SubsystemContainer::new(config)?)
    }

    /// Same as [`NodeRuntime::new`] with a caller-chosen fraud scorer.
    pub fn with_scorer(config: NodeConfig, scorer: Arc<dyn FraudScorer>) -> Result<Self, NodeError> {
        Self::from_container(SubsystemContainer::with_scorer(config, scorer)?)
    }

    fn from_container(container: SubsystemContainer) -> Result<Self, NodeError> {
        let container = Arc::new(container);
        let gateway = ApiGatewayService::new(
            container.config.gateway.clone(),
            container.ledger.clone(),
            container.settlement.clone(),
            container.risk.clone(),
        )?;
        Ok(Self { container, gateway })
    }

    /// Bind the gateway. Returns the listening address.
    pub async fn start(&mut self) -> Result<SocketAddr, NodeError> {
        info!("===========================================");
        info!("  FinTrust Node Runtime v{}", crate::VERSION);
        info!("===========================================");

        let addr = self.gateway.start().await?;
        let config = &self.container.config.gateway;
        log_event!(
            info,
            "runtime",
            "All subsystems running",
            addr = %addr,
            confirmation_delay_ms = config.ledger.confirmation_delay.as_millis() as u64,
            ledger_protected = config.ledger_protected()
        );
        Ok(addr)
    }

    /// Run until `signal` resolves, then shut down.
    pub async fn run_until<F>(&mut self, signal: F) -> Result<(), NodeError>
    where
        F: Future<Output = ()>,
    {
        if self.gateway.local_addr().is_none() {
            self.start().await?;
        }
        let served = self.gateway.run_until(signal).await;
        self.stop_subsystems();
        Ok(served?)
    }

    /// Stop accepting requests, then cancel pending confirmations.
    pub async fn shutdown(&mut self) -> Result<(), NodeError> {
        info!("Initiating graceful shutdown...");
        let stopped = self.gateway.shutdown().await;
        self.stop_subsystems();
        Ok(stopped?)
    }

    fn stop_subsystems(&self) {
        let cancelled = self.container.shutdown();
        info!(cancelled, "Shutdown complete");
    }

    pub fn container(&self) -> Arc<SubsystemContainer> {
        Arc::clone(&self.container)
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.gateway.local_addr()
    }
}
