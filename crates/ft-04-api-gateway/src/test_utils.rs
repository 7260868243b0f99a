//! Router harness shared by the handler tests.

use crate::domain::GatewayConfig;
use crate::middleware::GatewayMetrics;
use crate::router::{build_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use ft_01_ledger::LedgerService;
use ft_02_settlement::{SettlementConfig, SettlementService};
use ft_03_risk::{FixedFraudScorer, RiskConfig, RiskService};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub ledger: Arc<LedgerService>,
    pub settlement: Arc<SettlementService>,
    pub risk: Arc<RiskService>,
    pub metrics: Arc<GatewayMetrics>,
}

impl TestApp {
    /// Default config, every transaction scores 0.1.
    pub fn new() -> Self {
        Self::with(GatewayConfig::default(), 0.1)
    }

    pub fn with_score(score: f64) -> Self {
        Self::with(GatewayConfig::default(), score)
    }

    pub fn with(config: GatewayConfig, score: f64) -> Self {
        let ledger = Arc::new(LedgerService::new(config.ledger_config()));
        let settlement = Arc::new(SettlementService::new(SettlementConfig::default()).unwrap());
        let risk = Arc::new(
            RiskService::new(
                RiskConfig {
                    fraud_threshold: config.fraud.threshold,
                    ..RiskConfig::default()
                },
                Arc::new(FixedFraudScorer(score)),
            )
            .unwrap(),
        );
        let metrics = Arc::new(GatewayMetrics::new());
        let state = AppState::new(
            &config,
            ledger.clone(),
            settlement.clone(),
            risk.clone(),
            metrics.clone(),
        );
        Self {
            router: build_router(state, &config),
            ledger,
            settlement,
            risk,
            metrics,
        }
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(router: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn post_empty(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::post(uri).body(Body::empty()).unwrap()).await
}
