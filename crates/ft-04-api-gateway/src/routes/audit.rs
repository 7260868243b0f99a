//! `GET /api/v1/audit-log?limit=` - the audit trail, newest first.

use crate::domain::ApiResult;
use crate::router::AppState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use ft_03_risk::{AuditEntry, DEFAULT_AUDIT_CAPACITY};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuditQuery {
    pub limit: usize,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_AUDIT_CAPACITY,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<AuditQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    let Query(query) = query?;
    Ok(Json(state.risk.audit_log(query.limit)))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{get, post_empty, post_json, TestApp};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_actions_listed_newest_first() {
        let app = TestApp::with_score(0.95);

        let (_, receipt) = post_json(&app.router, "/api/ledger/submit", &json!({"amount": 1})).await;
        let transfer = json!({"sender": "BankA", "receiver": "BankB", "amount": "5"});
        let (status, _) = post_json(&app.router, "/api/v1/transactions", &transfer).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        post_empty(&app.router, "/api/v1/fraud-alerts/FA0001/review").await;

        let (status, log) = get(&app.router, "/api/v1/audit-log").await;
        assert_eq!(status, StatusCode::OK);
        let actions: Vec<&str> = log
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["action"].as_str().unwrap())
            .collect();
        assert_eq!(actions, ["fraud_alert_reviewed", "fraud_alert_raised", "ledger_submit"]);
        assert_eq!(log[2]["actor"], "ledger");
        assert_eq!(log[2]["details"], receipt["txHash"]);
        assert!(log[0]["timestamp"].as_i64().unwrap() >= log[2]["timestamp"].as_i64().unwrap());
    }

    #[tokio::test]
    async fn test_settled_transfer_and_limit() {
        let app = TestApp::new();
        let transfer = json!({"sender": "BankA", "receiver": "BankB", "amount": "5"});
        let (_, record) = post_json(&app.router, "/api/v1/transactions", &transfer).await;
        post_empty(&app.router, "/api/v1/transactions/init-ledger").await;

        let (_, log) = get(&app.router, "/api/v1/audit-log?limit=1").await;
        assert_eq!(log.as_array().unwrap().len(), 1);
        assert_eq!(log[0]["action"], "ledger_init");

        let (_, log) = get(&app.router, "/api/v1/audit-log").await;
        assert_eq!(log[1]["action"], "transfer_settled");
        assert_eq!(log[1]["actor"], "settlement");
        assert!(log[1]["details"].as_str().unwrap().contains(record["tx_id"].as_str().unwrap()));

        let (status, body) = get(&app.router, "/api/v1/audit-log?limit=all").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_log_is_capped() {
        let app = TestApp::new();
        for n in 0..1002 {
            app.risk.record_audit("ledger", "ledger_submit", Some(format!("0x{}", n)));
        }
        let (_, log) = get(&app.router, "/api/v1/audit-log?limit=5000").await;
        let log = log.as_array().unwrap();
        assert_eq!(log.len(), 1000);
        assert_eq!(log[0]["details"], "0x1001");
        assert_eq!(log[999]["details"], "0x2");
    }
}
