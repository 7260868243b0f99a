//! Ledger protocol endpoints.
//!
//! - `POST /api/ledger/submit` → `{"txHash", "status": "pending"}`
//! - `GET /api/ledger/status?txHash=` → snapshot or 404

use crate::domain::{ApiError, ApiResult};
use crate::router::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use bytes::Bytes;
use fintrust_telemetry::log_tx_event;
use ft_01_ledger::{StatusView, SubmitReceipt};
use serde_json::Value;

const TX_HASH_PARAM: &str = "txHash";

/// Raw query pairs in order, repeated keys kept.
type QueryPairs = Vec<(String, String)>;

/// The body is parsed as JSON whatever its `Content-Type`.
pub async fn submit(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<SubmitReceipt>> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e)))?;
    let receipt = state.ledger.submit(payload)?;
    state.metrics.record_submit();
    state
        .risk
        .record_audit("ledger", "ledger_submit", Some(receipt.tx_hash.to_string()));
    log_tx_event!(debug, "gateway", "Submit accepted", receipt.tx_hash);
    Ok(Json(receipt))
}

/// Uses the first `txHash` when the parameter is repeated.
pub async fn status(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<StatusView>> {
    let Query(pairs) = query?;
    let tx_hash = pairs
        .iter()
        .find(|(key, _)| key == TX_HASH_PARAM)
        .map(|(_, value)| value.as_str());

    match state.ledger.status(tx_hash) {
        Ok(view) => {
            state.metrics.record_status_query(true, view.is_confirmed());
            Ok(Json(view))
        }
        Err(e) => {
            state.metrics.record_status_query(false, false);
            Err(e.into())
        }
    }
}
