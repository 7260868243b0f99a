//! Settlement endpoints under `/api/v1/transactions`.
//!
//! New transfers are fraud-screened first; a flagged transfer raises an
//! alert and is never settled.

use crate::domain::{ApiError, ApiResult};
use crate::router::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ft_02_settlement::{Account, Page, TransferRecord, TransferRequest};
use ft_03_risk::FraudCheckRequest;
use serde_json::{json, Value};
use tracing::warn;

/// Placeholder id scored before settlement assigns the real one.
const PROVISIONAL_TX_ID: &str = "pending-tx";

pub async fn list(
    State(state): State<AppState>,
    page: Result<Query<Page>, QueryRejection>,
) -> ApiResult<Json<Vec<TransferRecord>>> {
    let Query(page) = page?;
    Ok(Json(state.settlement.transactions(page)))
}

pub async fn get(
    State(state): State<AppState>,
    Path(tx_id): Path<String>,
) -> ApiResult<Json<TransferRecord>> {
    Ok(Json(state.settlement.transaction(&tx_id)?))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TransferRequest>, JsonRejection>,
) -> ApiResult<Json<TransferRecord>> {
    let Json(request) = body?;

    let screening = state.risk.screen(&FraudCheckRequest {
        tx_id: PROVISIONAL_TX_ID.to_string(),
        sender: request.sender.clone(),
        receiver: request.receiver.clone(),
        amount: request.amount,
    });
    state.metrics.record_fraud_check(screening.assessment.alert);

    if screening.assessment.alert {
        warn!(
            sender = %request.sender,
            receiver = %request.receiver,
            amount = %request.amount,
            fraud_score = screening.assessment.fraud_score,
            "Transfer flagged, not settled"
        );
        let mut details = json!({
            "status": "flagged",
            "fraud_score": screening.assessment.fraud_score,
        });
        if let Some(alert) = &screening.alert {
            details["alert_id"] = Value::from(alert.id.clone());
        }
        return Err(ApiError::with_data(
            StatusCode::BAD_REQUEST,
            "Transaction flagged",
            details,
        ));
    }

    let record = state.settlement.transfer(request)?;
    state.risk.record_audit(
        "settlement",
        "transfer_settled",
        Some(format!(
            "{} {} -> {} {}",
            record.tx_id, record.sender, record.receiver, record.amount
        )),
    );
    Ok(Json(record))
}

pub async fn balance(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> ApiResult<Json<Value>> {
    let balance = state.settlement.balance(&account)?;
    Ok(Json(json!({"account": account, "balance": balance})))
}

pub async fn history(State(state): State<AppState>, Path(account): Path<String>) -> Json<Value> {
    let history = state.settlement.history(&account);
    Json(json!({"account": account, "history": history}))
}

pub async fn account(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> ApiResult<Json<Account>> {
    Ok(Json(state.settlement.account(&account)?))
}

pub async fn init_ledger(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let accounts = state.settlement.init_ledger()?;
    state
        .risk
        .record_audit("settlement", "ledger_init", Some(format!("{} accounts", accounts)));
    Ok(Json(json!({"status": "success", "accounts": accounts})))
}
