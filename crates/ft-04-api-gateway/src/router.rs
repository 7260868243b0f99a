//! Route table and shared handler state.
//!
//! | Prefix | Module |
//! |--------|--------|
//! | `/`, `/health`, `/metrics` | `routes/ops.rs` |
//! | `/api/ledger` | `routes/ledger.rs`, `ws/ledger_feed.rs` |
//! | `/api/v1/transactions` | `routes/transactions.rs` |
//! | `/api/v1/fraud-alerts` | `routes/fraud.rs`, `ws/fraud_feed.rs` |
//! | `/api/v1/compliance` | `routes/compliance.rs` |
//! | `/api/v1/mbridge` | `routes/mbridge.rs` |
//! | `/api/v1/audit-log` | `routes/audit.rs` |

use crate::domain::GatewayConfig;
use crate::middleware::{GatewayMetrics, MiddlewareStack};
use crate::routes::{audit, compliance, fraud, ledger, mbridge, ops, transactions};
use crate::ws;
use axum::routing::{get, post};
use axum::Router;
use ft_01_ledger::LedgerApi;
use ft_02_settlement::SettlementApi;
use ft_03_risk::RiskService;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<dyn LedgerApi>,
    pub settlement: Arc<dyn SettlementApi>,
    pub risk: Arc<RiskService>,
    pub metrics: Arc<GatewayMetrics>,
    /// Period of the live fraud feed
    pub alert_feed_interval: Duration,
}

impl AppState {
    pub fn new(
        config: &GatewayConfig,
        ledger: Arc<dyn LedgerApi>,
        settlement: Arc<dyn SettlementApi>,
        risk: Arc<RiskService>,
        metrics: Arc<GatewayMetrics>,
    ) -> Self {
        Self {
            ledger,
            settlement,
            risk,
            metrics,
            alert_feed_interval: config.fraud.alert_feed_interval,
        }
    }
}

/// Builds the full HTTP router with middleware applied.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let stack = MiddlewareStack::from_config(config, Arc::clone(&state.metrics));

    // Routes that change ledger, settlement or review state
    let mut protected = Router::new()
        .route("/api/ledger/submit", post(ledger::submit))
        .route("/api/v1/transactions", post(transactions::create))
        .route("/api/v1/transactions/", post(transactions::create))
        .route("/api/v1/transactions/init-ledger", post(transactions::init_ledger))
        .route("/api/v1/fraud-alerts/:id/review", post(fraud::review))
        .route("/api/v1/fraud-alerts/:id/resolve", post(fraud::resolve));
    if let Some(auth) = stack.auth {
        protected = protected.route_layer(auth);
    }

    let open = Router::new()
        .route("/", get(ops::health))
        .route("/health", get(ops::health))
        .route("/metrics", get(ops::metrics_json))
        .route("/metrics/prometheus", get(ops::metrics_prometheus))
        // Ledger protocol
        .route("/api/ledger/status", get(ledger::status))
        .route("/api/ledger/ws", get(ws::ledger_feed))
        // Settlement
        .route("/api/v1/transactions", get(transactions::list))
        .route("/api/v1/transactions/", get(transactions::list))
        .route("/api/v1/transactions/:tx_id", get(transactions::get))
        .route("/api/v1/transactions/balance/:account", get(transactions::balance))
        .route("/api/v1/transactions/history/:account", get(transactions::history))
        .route("/api/v1/transactions/account/:account", get(transactions::account))
        // Fraud
        .route("/api/v1/fraud-alerts", get(fraud::list))
        .route("/api/v1/fraud-alerts/", get(fraud::list))
        .route("/api/v1/fraud-alerts/check", post(fraud::check))
        .route("/api/v1/fraud-alerts/ws", get(ws::fraud_feed))
        .route("/api/v1/fraud-alerts/:id", get(fraud::score_tx))
        // Compliance
        .route("/api/v1/compliance/aml-status/:account", get(compliance::aml_status))
        .route("/api/v1/compliance/report/:tx_id", get(compliance::report))
        .route("/api/v1/compliance/reports", get(compliance::reports))
        .route("/api/v1/audit-log", get(audit::list))
        // Cross-border
        .route("/api/v1/mbridge", post(mbridge::settle));

    let middleware = ServiceBuilder::new()
        .layer(stack.cors)
        .layer(stack.tracing)
        .layer(stack.metrics)
        .layer(stack.timeout)
        .layer(stack.validation);

    open.merge(protected)
        .fallback(ops::not_found)
        .layer(middleware)
        .with_state(state)
}
