//! `POST /api/v1/mbridge` - cross-border settlement over a fixed-rate corridor.
//!
//! An unsupported pair is not an error: it answers 200 with
//! `{"status": "unsupported currency pair"}`.

use crate::domain::ApiResult;
use crate::router::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use ft_03_risk::{CorridorOutcome, CrossBorderRequest};

pub async fn settle(
    State(state): State<AppState>,
    body: Result<Json<CrossBorderRequest>, JsonRejection>,
) -> ApiResult<Json<CorridorOutcome>> {
    let Json(request) = body?;
    Ok(Json(state.risk.settle_cross_border(&request)?))
}
