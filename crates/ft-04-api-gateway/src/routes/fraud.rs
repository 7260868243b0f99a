//! Fraud scoring and alert review under `/api/v1/fraud-alerts`.

use crate::domain::{ApiError, ApiResult};
use crate::router::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use ft_03_risk::{AlertStatus, FraudAlert, FraudAssessment, FraudCheckRequest};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct AlertFilter {
    pub status: Option<String>,
}

/// Assessment returned by `POST /check`, with the alert it raised if any.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    #[serde(flatten)]
    pub assessment: FraudAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_id: Option<String>,
}

pub async fn check(
    State(state): State<AppState>,
    body: Result<Json<FraudCheckRequest>, JsonRejection>,
) -> ApiResult<Json<CheckResponse>> {
    let Json(request) = body?;
    let screening = state.risk.screen(&request);
    state.metrics.record_fraud_check(screening.assessment.alert);
    Ok(Json(CheckResponse {
        assessment: screening.assessment,
        alert_id: screening.alert.map(|a| a.id),
    }))
}

/// Scores a transaction id on demand. Never raises an alert.
pub async fn score_tx(State(state): State<AppState>, Path(tx_id): Path<String>) -> Json<FraudAssessment> {
    let assessment = state.risk.assess(&FraudCheckRequest::for_tx(tx_id));
    state.metrics.record_fraud_check(assessment.alert);
    Json(assessment)
}

pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<AlertFilter>, QueryRejection>,
) -> ApiResult<Json<Vec<FraudAlert>>> {
    let Query(filter) = filter?;
    let status = filter
        .status
        .as_deref()
        .map(str::parse::<AlertStatus>)
        .transpose()
        .map_err(ApiError::bad_request)?;
    Ok(Json(state.risk.alerts(status)))
}

pub async fn review(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<FraudAlert>> {
    Ok(Json(state.risk.review_alert(&id)?))
}

pub async fn resolve(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<FraudAlert>> {
    Ok(Json(state.risk.resolve_alert(&id)?))
}
