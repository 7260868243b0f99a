//! API Gateway service - binds the HTTP listener and owns its lifecycle.

use crate::domain::{GatewayConfig, GatewayError};
use crate::middleware::GatewayMetrics;
use crate::router::{build_router, AppState};
use axum::Router;
use fintrust_telemetry::log_event;
use ft_01_ledger::LedgerApi;
use ft_02_settlement::SettlementApi;
use ft_03_risk::RiskService;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

type ServerTask = JoinHandle<io::Result<()>>;

/// API Gateway service state
pub struct ApiGatewayService {
    config: GatewayConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<ServerTask>,
    local_addr: Option<SocketAddr>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(
        config: GatewayConfig,
        ledger: Arc<dyn LedgerApi>,
        settlement: Arc<dyn SettlementApi>,
        risk: Arc<RiskService>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;

        let metrics = Arc::new(GatewayMetrics::new());
        let state = AppState::new(&config, ledger, settlement, risk, metrics);

        Ok(Self {
            config,
            state,
            shutdown_tx: None,
            server: None,
            local_addr: None,
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Get metrics
    pub fn metrics(&self) -> Arc<GatewayMetrics> {
        Arc::clone(&self.state.metrics)
    }

    /// Router with the full middleware stack, for in-process use.
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &self.config)
    }

    /// Address the server is listening on, once started.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Bind the listener and serve in the background.
    ///
    /// Returns the bound address, which differs from the configured one when
    /// the configured port is 0.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if self.server.is_some() {
            return Err(GatewayError::AlreadyStarted);
        }
        if !self.config.http.enabled {
            return Err(GatewayError::Internal("HTTP server is disabled".into()));
        }

        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(format!("{}: {}", addr, e)))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let router = self.router();
        let server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        log_event!(info, "gateway", "API Gateway listening", addr = %local_addr);
        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(server);
        self.local_addr = Some(local_addr);
        Ok(local_addr)
    }

    /// Serve until `signal` resolves or the server fails, then shut down.
    pub async fn run_until<F>(&mut self, signal: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()>,
    {
        if self.server.is_none() {
            self.start().await?;
        }
        let Some(mut server) = self.server.take() else {
            return Err(GatewayError::Internal("server task missing".into()));
        };

        let finished = tokio::select! {
            _ = signal => None,
            result = &mut server => Some(result),
        };

        match finished {
            None => {
                info!("Received shutdown signal");
                self.server = Some(server);
                self.shutdown().await
            }
            Some(result) => {
                self.shutdown_tx = None;
                self.local_addr = None;
                let outcome = server_outcome(result);
                if let Err(e) = &outcome {
                    error!(error = %e, "HTTP server error");
                }
                outcome
            }
        }
    }

    /// Trigger graceful shutdown and wait for in-flight requests.
    pub async fn shutdown(&mut self) -> Result<(), GatewayError> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        self.local_addr = None;
        match self.server.take() {
            Some(server) => {
                let outcome = server_outcome(server.await);
                info!("API Gateway stopped");
                outcome
            }
            None => Ok(()),
        }
    }
}

fn server_outcome(result: Result<io::Result<()>, JoinError>) -> Result<(), GatewayError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(GatewayError::Server(e.to_string())),
        Err(e) => Err(GatewayError::Server(format!("server task failed: {}", e))),
    }
}
