//! # Ledger Flow
//!
//! Submit → pending → confirmed through the gateway, observed by the HTTP
//! surface, the event stream and the status poller at once.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use ft_01_ledger::{
        LedgerApi, LedgerClient, LedgerEvent, LedgerStatus, PollError, PollerConfig, StatusPoller,
        TxHash,
    };
    use ft_04_api_gateway::GatewayConfig;
    use serde_json::json;

    use crate::harness::InProcess;

    fn payment() -> serde_json::Value {
        json!({"amount": 500, "from": "BankA", "to": "BankB"})
    }

    // =========================================================================
    // HTTP SURFACE
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_status_lifecycle_keeps_record_fields() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);

        let (status, receipt) = app.post_json("/api/ledger/submit", &payment()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["status"], "pending");
        let tx_hash = receipt["txHash"].as_str().unwrap().to_string();
        let uri = format!("/api/ledger/status?txHash={}", tx_hash);

        let (_, pending) = app.get(&uri).await;
        assert_eq!(pending["status"], "pending");
        assert_eq!(pending["tx"], payment());
        let block = pending["block"].as_u64().unwrap();
        assert!((1000..11000).contains(&block));

        tokio::time::sleep(Duration::from_millis(2900)).await;
        let (_, still_pending) = app.get(&uri).await;
        assert_eq!(still_pending["status"], "pending");

        tokio::time::sleep(Duration::from_millis(600)).await;
        let (_, confirmed) = app.get(&uri).await;
        assert_eq!(confirmed["status"], "confirmed");
        assert_eq!(confirmed["block"], pending["block"]);
        assert_eq!(confirmed["timestamp"], pending["timestamp"]);
        assert_eq!(confirmed["tx"], pending["tx"]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        let (_, later) = app.get(&uri).await;
        assert_eq!(later, confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submissions_confirm_independently() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);

        let (_, first) = app.post_json("/api/ledger/submit", &json!({"n": 1})).await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        let (_, second) = app.post_json("/api/ledger/submit", &json!({"n": 2})).await;
        assert_ne!(first["txHash"], second["txHash"]);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let first_view = app.ledger.status(first["txHash"].as_str()).unwrap();
        let second_view = app.ledger.status(second["txHash"].as_str()).unwrap();
        assert_eq!(first_view.status, LedgerStatus::Confirmed);
        assert_eq!(second_view.status, LedgerStatus::Pending);
    }

    #[tokio::test]
    async fn test_not_found_shapes() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        for uri in [
            "/api/ledger/status",
            "/api/ledger/status?txHash=",
            "/api/ledger/status?txHash=0xdeadbeef",
        ] {
            let (status, body) = app.get(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body, json!({"error": "Transaction not found"}));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_metrics_reflect_ledger_state() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        app.post_json("/api/ledger/submit", &payment()).await;
        app.post_json("/api/ledger/submit", &payment()).await;
        app.get("/api/ledger/status?txHash=0xmissing").await;

        let (_, metrics) = app.get("/metrics").await;
        assert_eq!(metrics["ledger"]["submits"], 2);
        assert_eq!(metrics["ledger"]["not_found"], 1);
        assert_eq!(metrics["ledger_state"]["pending"], 2);

        tokio::time::sleep(Duration::from_secs(4)).await;
        let (_, metrics) = app.get("/metrics").await;
        assert_eq!(metrics["ledger_state"]["confirmed"], 2);
        assert_eq!(metrics["ledger_state"]["scheduled_confirmations"], 0);
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_events_follow_http_submit() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        let mut events = app.ledger.subscribe();

        let (_, receipt) = app.post_json("/api/ledger/submit", &payment()).await;
        let tx_hash = TxHash::from(receipt["txHash"].as_str().unwrap());

        let submitted = events.recv().await.unwrap();
        assert!(matches!(&submitted, LedgerEvent::Submitted { .. }));
        assert_eq!(submitted.tx_hash(), &tx_hash);

        let confirmed = events.recv().await.unwrap();
        assert_eq!(confirmed.name(), "confirmed");
        assert_eq!(confirmed.tx_hash(), &tx_hash);
    }

    // =========================================================================
    // POLLER
    // =========================================================================

    #[tokio::test(start_paused = true)]
    async fn test_poller_waits_for_gateway_submission() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        let (_, receipt) = app.post_json("/api/ledger/submit", &payment()).await;
        let tx_hash = TxHash::from(receipt["txHash"].as_str().unwrap());

        let poller = StatusPoller::new(PollerConfig::default());
        let mut seen = Vec::new();
        let report = poller
            .wait_with(app.ledger.as_ref(), &tx_hash, |view| seen.push(view.status))
            .await
            .unwrap();

        assert!(report.view.is_confirmed());
        assert_eq!(report.view.tx, payment());
        assert!(report.pending_observations >= 1);
        assert_eq!(seen.first(), Some(&LedgerStatus::Pending));
        assert_eq!(seen.last(), Some(&LedgerStatus::Confirmed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_submits_once() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        let poller = StatusPoller::new(PollerConfig::default());

        let report = poller.submit_and_wait(app.ledger.as_ref(), payment()).await.unwrap();
        assert!(report.view.is_confirmed());
        assert_eq!(app.ledger.stats().records, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_poller_gives_up_on_unknown_hash() {
        let app = InProcess::new(GatewayConfig::default(), 0.1);
        let poller = StatusPoller::new(PollerConfig::default());
        let unknown = TxHash::from("0xnever");

        assert!(app.ledger.fetch_status(&unknown).await.is_err());
        let err = poller.wait_for_confirmation(app.ledger.as_ref(), &unknown).await.unwrap_err();
        assert!(matches!(err, PollError::NotFound { attempts: 4, .. }));
    }
}
