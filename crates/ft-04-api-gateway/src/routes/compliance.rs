//! AML status and compliance reports under `/api/v1/compliance`.

use crate::domain::ApiResult;
use crate::router::AppState;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use ft_03_risk::AmlStatus;
use serde_json::{json, Value};

pub async fn aml_status(State(state): State<AppState>, Path(account): Path<String>) -> Json<AmlStatus> {
    Json(state.risk.aml_status(&account))
}

/// Plain-text AML report for a settled transaction.
pub async fn report(
    State(state): State<AppState>,
    Path(tx_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let record = state.settlement.transaction(&tx_id)?;
    let report = state.risk.report(&record);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"report_{}.txt\"", record.tx_id),
            ),
        ],
        report,
    ))
}

pub async fn reports(State(state): State<AppState>) -> Json<Value> {
    Json(json!({"reports": state.risk.report_names()}))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{get, post_json, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_aml_status() {
        let app = TestApp::new();
        let (status, body) = get(&app.router, "/api/v1/compliance/aml-status/BankA").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["aml_status"], "clear");
        assert_eq!(body["kyc_status"], "verified");
    }

    #[tokio::test]
    async fn test_report_for_settled_transfer() {
        let app = TestApp::new();
        let transfer = json!({"sender": "BankA", "receiver": "BankB", "amount": "42"});
        let (_, record) = post_json(&app.router, "/api/v1/transactions", &transfer).await;
        let tx_id = record["tx_id"].as_str().unwrap();

        let (status, body) = get(&app.router, &format!("/api/v1/compliance/report/{}", tx_id)).await;
        assert_eq!(status, StatusCode::OK);
        let text = body.as_str().unwrap();
        assert!(text.contains(&format!("Transaction ID: {}", tx_id)));
        assert!(text.contains("Sender:    BankA"));

        let (_, listed) = get(&app.router, "/api/v1/compliance/reports").await;
        assert_eq!(listed["reports"], json!([format!("report_{}.txt", tx_id)]));
    }

    #[tokio::test]
    async fn test_report_for_unknown_transaction() {
        let app = TestApp::new();
        let (status, body) = get(&app.router, "/api/v1/compliance/report/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Transaction not found");
        let (_, listed) = get(&app.router, "/api/v1/compliance/reports").await;
        assert_eq!(listed["reports"], json!([]));
    }
}
