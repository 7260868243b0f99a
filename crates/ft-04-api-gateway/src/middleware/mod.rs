//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → Cors → Tracing → Metrics → Timeout → Validation → (Auth) → Handler
//!
//! `AuthLayer` wraps only the protected routes; everything else is applied
//! to the whole router.

pub mod auth;
pub mod cors;
pub mod metrics;
pub mod timeout;
pub mod tracing;
pub mod validation;

pub use auth::{constant_time_compare, AuthConfig, AuthLayer};
pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsLayer, RequestTimer};
pub use timeout::TimeoutLayer;
pub use tracing::TracingLayer;
pub use validation::{validate_json_body, ValidationLayer};

use crate::domain::GatewayConfig;
use std::sync::Arc;

/// Middleware stack builder
pub struct MiddlewareStack {
    pub validation: ValidationLayer,
    pub auth: Option<AuthLayer>,
    pub timeout: TimeoutLayer,
    pub tracing: TracingLayer,
    pub metrics: MetricsLayer,
    pub cors: tower_http::cors::CorsLayer,
}

impl MiddlewareStack {
    /// Create middleware stack from gateway config
    pub fn from_config(config: &GatewayConfig, metrics: Arc<GatewayMetrics>) -> Self {
        let auth = config.ledger_protected().then(|| {
            AuthLayer::new(AuthConfig {
                api_key: config.security.api_key.clone(),
            })
        });

        Self {
            validation: ValidationLayer::new(config.limits.clone()),
            auth,
            timeout: TimeoutLayer::new(config.timeouts.clone()),
            tracing: TracingLayer::new(),
            metrics: MetricsLayer::new(metrics),
            cors: create_cors_layer(&config.cors),
        }
    }
}
