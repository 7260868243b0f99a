//! Fixtures shared by the integration flows.

use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use ft_01_ledger::LedgerService;
use ft_02_settlement::{SettlementConfig, SettlementService};
use ft_03_risk::{FixedFraudScorer, RiskConfig, RiskService};
use ft_04_api_gateway::{ApiGatewayService, GatewayConfig};
use node_runtime::{NodeConfig, NodeRuntime};
use serde_json::Value;
use tower::ServiceExt;

/// Gateway router over fresh subsystems, driven without a socket.
pub struct InProcess {
    pub router: Router,
    pub ledger: Arc<LedgerService>,
    pub settlement: Arc<SettlementService>,
    pub risk: Arc<RiskService>,
}

impl InProcess {
    pub fn new(config: GatewayConfig, fraud_score: f64) -> Self {
        let ledger = Arc::new(LedgerService::new(config.ledger_config()));
        let settlement = Arc::new(SettlementService::new(SettlementConfig::default()).unwrap());
        let risk = Arc::new(
            RiskService::new(
                RiskConfig {
                    fraud_threshold: config.fraud.threshold,
                    ..RiskConfig::default()
                },
                Arc::new(FixedFraudScorer(fraud_score)),
            )
            .unwrap(),
        );
        let router = ApiGatewayService::new(config, ledger.clone(), settlement.clone(), risk.clone())
            .unwrap()
            .router();
        Self {
            router,
            ledger,
            settlement,
            risk,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_with(uri, body, None).await
    }

    pub async fn post_with(&self, uri: &str, body: &Value, api_key: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }
}

/// A full node listening on an ephemeral loopback port.
pub struct LiveNode {
    pub runtime: NodeRuntime,
    pub base_url: String,
    pub ws_url: String,
}

impl LiveNode {
    pub async fn start(mut config: NodeConfig, fraud_score: f64) -> Self {
        config.gateway.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.gateway.http.port = 0;
        let mut runtime =
            NodeRuntime::with_scorer(config, Arc::new(FixedFraudScorer(fraud_score))).unwrap();
        let addr = runtime.start().await.unwrap();
        Self {
            runtime,
            base_url: format!("http://{}", addr),
            ws_url: format!("ws://{}", addr),
        }
    }

    pub async fn stop(mut self) {
        self.runtime.shutdown().await.unwrap();
    }
}

/// Node config with a confirmation delay short enough for real-time tests.
pub fn fast_config(delay: Duration) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.gateway.ledger.confirmation_delay = delay;
    config.gateway.poller.interval = Duration::from_millis(50);
    config.gateway.fraud.alert_feed_interval = Duration::from_millis(50);
    config
}
