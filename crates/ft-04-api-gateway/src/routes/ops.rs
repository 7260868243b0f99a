//! Health, metrics and fallback handlers.

use crate::domain::ApiError;
use crate::router::AppState;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};

/// Service identifier reported by the health check.
pub const SERVICE_NAME: &str = "fintrust-gateway";

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": crate::VERSION,
    }))
}

/// Gateway counters plus ledger and alert queue snapshots.
pub async fn metrics_json(State(state): State<AppState>) -> Json<Value> {
    let mut body = state.metrics.to_json();
    if let Some(map) = body.as_object_mut() {
        map.insert(
            "ledger_state".into(),
            serde_json::to_value(state.ledger.stats()).unwrap_or_default(),
        );
        map.insert(
            "open_alerts".into(),
            Value::from(state.risk.open_alerts()),
        );
    }
    Json(body)
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}

pub async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
