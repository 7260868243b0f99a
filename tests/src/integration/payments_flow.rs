//! # Payments Flow
//!
//! Settlement, fraud screening, compliance and mBridge driven together
//! through the gateway:
//!
//! 1. **Transfer → Settlement → Compliance**: a clean transfer settles and
//!    produces a downloadable report.
//! 2. **Transfer → Risk**: a flagged transfer raises an alert and leaves
//!    balances untouched.
//! 3. **Auth**: mutation routes require the key when protection is on.

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ft_02_settlement::SettlementApi;
    use ft_04_api_gateway::GatewayConfig;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::harness::InProcess;

    fn transfer(sender: &str, receiver: &str, amount: &str) -> serde_json::Value {
        json!({"sender": sender, "receiver": receiver, "amount": amount})
    }

    // =========================================================================
    // SETTLEMENT → COMPLIANCE
    // =========================================================================

    #[tokio::test]
    async fn test_clean_transfer_settles_and_reports() {
        let app = InProcess::new(GatewayConfig::default(), 0.2);
        let supply = app.settlement.total_supply();

        let (status, record) = app
            .post_json("/api/v1/transactions", &transfer("BankA", "BankB", "250.50"))
            .await;
        assert_eq!(status, StatusCode::OK);
        let tx_id = record["tx_id"].as_str().unwrap().to_string();

        let (_, a) = app.get("/api/v1/transactions/balance/BankA").await;
        let (_, b) = app.get("/api/v1/transactions/balance/BankB").await;
        assert_eq!(a["balance"], "999749.50");
        assert_eq!(b["balance"], "500250.50");
        assert_eq!(app.settlement.total_supply(), supply);

        let (_, fetched) = app.get(&format!("/api/v1/transactions/{}", tx_id)).await;
        assert_eq!(fetched, record);

        for account in ["BankA", "BankB"] {
            let (_, history) = app
                .get(&format!("/api/v1/transactions/history/{}", account))
                .await;
            assert_eq!(history["history"][0]["tx_id"], tx_id.as_str(), "{}", account);
        }

        let (status, report) = app
            .get(&format!("/api/v1/compliance/report/{}", tx_id))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(report.as_str().unwrap().contains(&tx_id));

        let (_, metrics) = app.get("/metrics").await;
        assert_eq!(metrics["fraud"]["checks"], 1);
        assert_eq!(metrics["fraud"]["flagged"], 0);
    }

    #[tokio::test]
    async fn test_transfer_validation() {
        let app = InProcess::new(GatewayConfig::default(), 0.2);

        let (status, _) = app
            .post_json("/api/v1/transactions", &transfer("BankA", "BankB", "0"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post_json("/api/v1/transactions", &transfer("BankB", "BankA", "500000.01"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .post_json("/api/v1/transactions", &transfer("BankA", "BankA", "1"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(app.settlement.transactions(Default::default()).is_empty());
        assert_eq!(app.settlement.balance("BankA").unwrap(), dec!(1000000));
    }

    // =========================================================================
    // SETTLEMENT → RISK
    // =========================================================================

    #[tokio::test]
    async fn test_flagged_transfer_raises_alert_and_holds_funds() {
        let app = InProcess::new(GatewayConfig::default(), 0.93);

        let (status, body) = app
            .post_json("/api/v1/transactions", &transfer("BankA", "BankB", "10"))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let alert_id = body["details"]["alert_id"].as_str().unwrap().to_string();
        assert_eq!(app.settlement.balance("BankB").unwrap(), dec!(500000));

        let (_, open) = app.get("/api/v1/fraud-alerts?status=new").await;
        assert_eq!(open[0]["id"], alert_id.as_str());
        assert_eq!(open[0]["riskScore"], 93);

        let (status, _) = app
            .post_json(&format!("/api/v1/fraud-alerts/{}/review", alert_id), &json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        let (status, resolved) = app
            .post_json(&format!("/api/v1/fraud-alerts/{}/resolve", alert_id), &json!({}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resolved["status"], "Resolved");

        let (_, metrics) = app.get("/metrics").await;
        assert_eq!(metrics["fraud"]["flagged"], 1);
        assert_eq!(metrics["open_alerts"], 0);
    }

    // =========================================================================
    // MBRIDGE
    // =========================================================================

    #[tokio::test]
    async fn test_mbridge_leaves_domestic_book_alone() {
        let app = InProcess::new(GatewayConfig::default(), 0.2);
        let request = json!({
            "tx_id": "mb-7",
            "from_currency": "GHS",
            "to_currency": "NGN",
            "amount": "2.5",
            "sender": "BankA",
            "receiver": "BankB",
        });

        let (status, body) = app.post_json("/api/v1/mbridge", &request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settled_amount"], "175.0");
        assert!(app.settlement.transactions(Default::default()).is_empty());
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    #[tokio::test]
    async fn test_protected_node_guards_every_mutation() {
        let mut config = GatewayConfig::default();
        config.security.api_key = Some("s3cret".into());
        config.security.protect_ledger = true;
        let app = InProcess::new(config, 0.2);

        let mutations = [
            ("/api/ledger/submit", json!({"amount": 1})),
            ("/api/v1/transactions", transfer("BankA", "BankB", "1")),
            ("/api/v1/transactions/init-ledger", json!({})),
        ];
        for (uri, body) in &mutations {
            let (status, _) = app.post_json(uri, body).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        }
        for (uri, body) in &mutations {
            let (status, _) = app.post_with(uri, body, Some("s3cret")).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
        }

        let (status, _) = app.get("/api/v1/transactions/balance/BankA").await;
        assert_eq!(status, StatusCode::OK);
    }
}
