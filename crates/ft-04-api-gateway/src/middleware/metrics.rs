//! Gateway metrics.
//!
//! Atomic counters exported as JSON (`/metrics`) and Prometheus text
//! (`/metrics/prometheus`).

use axum::{body::Body, http::Method, http::Request, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// API Gateway metrics
#[derive(Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,
    pub write_requests_total: AtomicU64,

    // Ledger protocol
    pub ledger_submits: AtomicU64,
    pub ledger_status_queries: AtomicU64,
    pub ledger_not_found: AtomicU64,
    pub ledger_confirmed_observed: AtomicU64,

    // Risk
    pub fraud_checks: AtomicU64,
    pub fraud_flagged: AtomicU64,

    // WebSocket counters
    pub websocket_connections: AtomicU64,
    pub websocket_messages_sent: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a request
    pub fn record_request(&self, success: bool, is_write: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        if is_write {
            self.write_requests_total.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_submit(&self) {
        self.ledger_submits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a status query and what it found
    pub fn record_status_query(&self, found: bool, confirmed: bool) {
        self.ledger_status_queries.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.ledger_not_found.fetch_add(1, Ordering::Relaxed);
        } else if confirmed {
            self.ledger_confirmed_observed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_fraud_check(&self, flagged: bool) {
        self.fraud_checks.fetch_add(1, Ordering::Relaxed);
        if flagged {
            self.fraud_flagged.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record WebSocket connection
    pub fn record_ws_connect(&self) {
        self.websocket_connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Record WebSocket disconnection
    pub fn record_ws_disconnect(&self) {
        self.websocket_connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record WebSocket message sent
    pub fn record_ws_message(&self) {
        self.websocket_messages_sent.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics in Prometheus format
    pub fn to_prometheus(&self) -> String {
        let mut output = String::new();

        let counters: [(&str, &str, &AtomicU64); 10] = [
            ("requests_total", "Total number of API requests", &self.requests_total),
            ("requests_success_total", "Successful requests", &self.requests_success),
            ("requests_error_total", "Failed requests", &self.requests_error),
            ("write_requests_total", "POST requests", &self.write_requests_total),
            ("ledger_submits_total", "Ledger submissions accepted", &self.ledger_submits),
            ("ledger_status_queries_total", "Ledger status queries", &self.ledger_status_queries),
            ("ledger_not_found_total", "Status queries for unknown hashes", &self.ledger_not_found),
            (
                "ledger_confirmed_observed_total",
                "Status queries that returned confirmed",
                &self.ledger_confirmed_observed,
            ),
            ("fraud_checks_total", "Fraud assessments", &self.fraud_checks),
            ("fraud_flagged_total", "Assessments above threshold", &self.fraud_flagged),
        ];

        for (name, help, value) in counters {
            output.push_str(&format!(
                "# HELP fintrust_gateway_{name} {help}\n\
                 # TYPE fintrust_gateway_{name} counter\n\
                 fintrust_gateway_{name} {}\n",
                value.load(Ordering::Relaxed)
            ));
        }

        output.push_str(&format!(
            "# HELP fintrust_gateway_websocket_connections Active WebSocket connections\n\
             # TYPE fintrust_gateway_websocket_connections gauge\n\
             fintrust_gateway_websocket_connections {}\n",
            self.websocket_connections.load(Ordering::Relaxed)
        ));

        output.push_str(&format!(
            "# HELP fintrust_gateway_websocket_messages_sent_total WebSocket frames sent\n\
             # TYPE fintrust_gateway_websocket_messages_sent_total counter\n\
             fintrust_gateway_websocket_messages_sent_total {}\n",
            self.websocket_messages_sent.load(Ordering::Relaxed)
        ));

        output.push_str(&format!(
            "# HELP fintrust_gateway_average_latency_ms Average request latency\n\
             # TYPE fintrust_gateway_average_latency_ms gauge\n\
             fintrust_gateway_average_latency_ms {:.2}\n",
            self.average_latency_ms()
        ));

        output
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "writes": self.write_requests_total.load(Ordering::Relaxed),
            },
            "ledger": {
                "submits": self.ledger_submits.load(Ordering::Relaxed),
                "status_queries": self.ledger_status_queries.load(Ordering::Relaxed),
                "not_found": self.ledger_not_found.load(Ordering::Relaxed),
                "confirmed_observed": self.ledger_confirmed_observed.load(Ordering::Relaxed),
            },
            "fraud": {
                "checks": self.fraud_checks.load(Ordering::Relaxed),
                "flagged": self.fraud_flagged.load(Ordering::Relaxed),
            },
            "websocket": {
                "connections": self.websocket_connections.load(Ordering::Relaxed),
                "messages_sent": self.websocket_messages_sent.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    is_write: bool,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, is_write: bool) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            is_write,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics.record_request(success, self.is_write, latency_ms);
    }
}

/// Layer that times every request into [`GatewayMetrics`].
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<GatewayMetrics>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for MetricsService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let timer = RequestTimer::new(Arc::clone(&self.metrics), req.method() == Method::POST);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let result = inner.call(req).await;
            let success = matches!(&result, Ok(r) if !r.status().is_client_error() && !r.status().is_server_error());
            timer.finish(success);
            result
        })
    }
}
