//! Request validation middleware.
//!
//! Enforces the body size limit and rejects POST bodies that are not JSON
//! before they reach a handler.

use crate::domain::{ApiError, LimitsConfig};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::warn;

/// Validation layer configuration
#[derive(Clone)]
pub struct ValidationLayer {
    config: Arc<LimitsConfig>,
}

impl ValidationLayer {
    pub fn new(config: LimitsConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for ValidationLayer {
    type Service = ValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ValidationService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Validation service
#[derive(Clone)]
pub struct ValidationService<S> {
    inner: S,
    config: Arc<LimitsConfig>,
}

impl<S> Service<Request<Body>> for ValidationService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let max = self.config.max_request_size;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            // Check content-length header first (fast path)
            if let Some(len) = declared_length(&req) {
                if len > max {
                    warn!(size = len, max, "Request too large (from header)");
                    return Ok(ApiError::payload_too_large(max).into_response());
                }
            }

            if req.method() != Method::POST {
                return inner.call(req).await;
            }

            let (parts, body) = req.into_parts();
            let body_bytes = match to_bytes(body, max).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, max, "Failed to read request body");
                    return Ok(ApiError::payload_too_large(max).into_response());
                }
            };

            if let Err(e) = validate_json_body(&body_bytes) {
                warn!(error = %e, path = %parts.uri.path(), "Rejected request body");
                return Ok(e.into_response());
            }

            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

fn declared_length<B>(req: &Request<B>) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Checks that a non-empty body is well-formed JSON.
///
/// Empty bodies pass; endpoints that need one reject them on extraction.
pub fn validate_json_body(body: &Bytes) -> Result<(), ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    serde_json::from_slice::<serde::de::IgnoredAny>(body)
        .map(|_| ())
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Router};
    use tower::ServiceExt;

    fn app(max: usize) -> Router {
        Router::new()
            .route("/submit", post(|body: Bytes| async move { body.len().to_string() }))
            .layer(ValidationLayer::new(LimitsConfig {
                max_request_size: max,
                ..LimitsConfig::default()
            }))
    }

    fn post_body(body: &'static str) -> Request<Body> {
        Request::post("/submit")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_json() {
        let response = app(1024).oneshot(post_body(r#"{"amount": 1}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_rejects_oversized_body() {
        let response = app(8)
            .oneshot(post_body(r#"{"amount": 123456789}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_rejects_oversized_stream_without_length() {
        let body = Body::from_stream(futures::stream::iter(vec![Ok::<_, std::io::Error>(
            Bytes::from_static(br#"{"padding": "xxxxxxxxxxxxxxxx"}"#),
        )]));
        let req = Request::post("/submit").body(body).unwrap();
        let response = app(8).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_rejects_malformed_json() {
        let response = app(1024).oneshot(post_body("{not json")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_body_passes() {
        assert!(validate_json_body(&Bytes::new()).is_ok());
        assert!(validate_json_body(&Bytes::from_static(b"  \n")).is_ok());
    }
}
