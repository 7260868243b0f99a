//! Tracing middleware.
//!
//! Wraps every request in an `api_request` span tagged with the subsystem
//! that serves the route, the `txHash` of ledger status queries and an
//! incoming `x-request-id` or W3C `traceparent` id when present.

use axum::{body::Body, http::Request, response::Response};
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};
use tracing::{debug, field, info_span, warn, Instrument, Span};

#[derive(Clone, Default)]
pub struct TracingLayer;

impl TracingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for TracingLayer {
    type Service = TracingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TracingService { inner }
    }
}

#[derive(Clone)]
pub struct TracingService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for TracingService<S>
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
        let mut inner = self.inner.clone();
        let path = req.uri().path();

        let span = info_span!(
            "api_request",
            method = %req.method(),
            path = %path,
            subsystem = route_subsystem(path),
            tx_hash = field::Empty,
            request_id = field::Empty,
            status = field::Empty,
            latency_ms = field::Empty,
        );
        if let Some(tx_hash) = status_query_hash(&req) {
            span.record("tx_hash", tx_hash);
        }
        if let Some(id) = request_id(&req) {
            span.record("request_id", id.as_str());
        }

        let started = Instant::now();
        Box::pin(
            async move {
                let result = inner.call(req).await;

                let span = Span::current();
                span.record("latency_ms", started.elapsed().as_millis() as u64);
                if let Ok(response) = &result {
                    let status = response.status();
                    span.record("status", status.as_u16());
                    if status.is_server_error() {
                        warn!(status = status.as_u16(), "Request failed");
                    } else {
                        debug!(status = status.as_u16(), "Request completed");
                    }
                }

                result
            }
            .instrument(span),
        )
    }
}

/// Subsystem label for a request path.
fn route_subsystem(path: &str) -> &'static str {
    if path.starts_with("/api/ledger") {
        "ledger"
    } else if path.starts_with("/api/v1/transactions") {
        "settlement"
    } else if path.starts_with("/api/v1/fraud-alerts") || path.starts_with("/api/v1/compliance") {
        "risk"
    } else if path.starts_with("/api/v1/mbridge") {
        "mbridge"
    } else {
        "gateway"
    }
}

fn status_query_hash<B>(req: &Request<B>) -> Option<&str> {
    if req.uri().path() != "/api/ledger/status" {
        return None;
    }
    req.uri()
        .query()?
        .split('&')
        .find_map(|pair| pair.strip_prefix("txHash="))
        .filter(|hash| !hash.is_empty())
}

/// `x-request-id`, or the trace id of a W3C `traceparent` header.
fn request_id<B>(req: &Request<B>) -> Option<String> {
    if let Some(id) = req.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        return Some(id.to_string());
    }

    // version-trace_id-parent_id-trace_flags
    let traceparent = req.headers().get("traceparent")?.to_str().ok()?;
    let parts: Vec<&str> = traceparent.split('-').collect();
    if parts.len() != 4 || parts[1].len() != 32 {
        return None;
    }
    Some(parts[1].to_string())
}
