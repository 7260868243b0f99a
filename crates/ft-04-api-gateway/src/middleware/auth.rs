//! Authentication middleware.
//!
//! Applied only to routes that change ledger or review state, and only when
//! an API key is configured with `protect_ledger`.

use crate::domain::ApiError;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Authentication configuration
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// API key for protected access (None = no key required)
    pub api_key: Option<String>,
}

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    config: Arc<AuthConfig>,
}

impl AuthLayer {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    config: Arc<AuthConfig>,
}

impl<S> Service<Request<Body>> for AuthService<S>
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
        let config = Arc::clone(&self.config);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if !check_api_key(&req, &config) {
                warn!(path = %req.uri().path(), "Protected route access denied");
                return Ok(ApiError::unauthorized("valid API key required").into_response());
            }
            debug!(path = %req.uri().path(), "API key accepted");
            inner.call(req).await
        })
    }
}

/// Check API key from request
fn check_api_key<B>(req: &Request<B>, config: &AuthConfig) -> bool {
    let expected_key = match &config.api_key {
        Some(key) => key,
        None => return true, // No key configured = always valid
    };

    // Check Authorization header (Bearer token)
    if let Some(auth) = req.headers().get("authorization") {
        if let Ok(auth_str) = auth.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return constant_time_compare(token, expected_key);
            }
        }
    }

    // Check X-API-Key header
    if let Some(api_key) = req.headers().get("x-api-key") {
        if let Ok(key_str) = api_key.to_str() {
            return constant_time_compare(key_str, expected_key);
        }
    }

    // Query parameter, for WebSocket clients that cannot set headers
    if let Some(query) = req.uri().query() {
        for pair in query.split('&') {
            if let Some(key) = pair.strip_prefix("api_key=") {
                return constant_time_compare(key, expected_key);
            }
        }
    }

    false
}

/// Constant-time string comparison.
///
/// Both inputs are padded to the longer length with different fill bytes, so
/// the comparison time does not depend on where they first differ or on
/// which is shorter.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let bytes_equal: bool = a_padded.ct_eq(&b_padded).into();
    bytes_equal && a.len() == b.len()
}
