//! # Live Node
//!
//! A full node on an ephemeral loopback port, driven by the HTTP ledger
//! client, the status poller and WebSocket clients. Real time, short delays.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::StreamExt;
    use ft_01_ledger::{LedgerClient, LedgerError, LedgerStatus, PollError, StatusPoller, TxHash};
    use ft_04_api_gateway::HttpLedgerClient;
    use serde_json::{json, Value};
    use tokio::time::timeout;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message;

    use crate::harness::{fast_config, LiveNode};

    const DELAY: Duration = Duration::from_millis(300);
    const WAIT: Duration = Duration::from_secs(5);

    fn text_json(message: Message) -> Value {
        serde_json::from_str(message.to_text().unwrap()).unwrap()
    }

    // =========================================================================
    // HTTP CLIENT + POLLER
    // =========================================================================

    #[tokio::test]
    async fn test_poller_confirms_over_http() {
        let node = LiveNode::start(fast_config(DELAY), 0.1).await;
        let client = HttpLedgerClient::new(&node.base_url).unwrap();
        let poller = StatusPoller::new(node.runtime.container().config.gateway.poller_config());

        let payload = json!({"amount": 500, "from": "BankA", "to": "BankB"});
        let report = timeout(WAIT, poller.submit_and_wait(&client, payload.clone()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.view.status, LedgerStatus::Confirmed);
        assert_eq!(report.view.tx, payload);
        assert!(report.pending_observations >= 1);

        let again = client.fetch_status(&report.view.tx_hash).await.unwrap();
        assert_eq!(again, report.view);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_http_client_error_mapping() {
        let node = LiveNode::start(fast_config(DELAY), 0.1).await;
        let client = HttpLedgerClient::new(&node.base_url).unwrap();

        let missing = client.fetch_status(&TxHash::from("0xnope")).await.unwrap_err();
        assert!(missing.is_not_found());

        let invalid = client.submit(json!([1, 2, 3])).await.unwrap_err();
        assert!(matches!(invalid, LedgerError::InvalidPayload(_)));

        node.stop().await;
    }

    #[tokio::test]
    async fn test_api_key_over_http() {
        let mut config = fast_config(DELAY);
        config.gateway.security.api_key = Some("k-123".into());
        config.gateway.security.protect_ledger = true;
        let node = LiveNode::start(config, 0.1).await;

        let anonymous = HttpLedgerClient::new(&node.base_url).unwrap();
        let rejected = anonymous.submit(json!({"amount": 1})).await.unwrap_err();
        assert!(matches!(rejected, LedgerError::Transport(ref m) if m.contains("401")));

        let keyed = HttpLedgerClient::new(&node.base_url).unwrap().with_api_key("k-123");
        let receipt = keyed.submit(json!({"amount": 1})).await.unwrap();
        assert_eq!(receipt.status, LedgerStatus::Pending);

        // Status reads stay open
        assert!(anonymous.fetch_status(&receipt.tx_hash).await.is_ok());

        node.stop().await;
    }

    #[tokio::test]
    async fn test_poller_fails_when_node_goes_away() {
        let mut config = fast_config(Duration::from_secs(30));
        config.gateway.poller.interval = Duration::from_millis(100);
        let node = LiveNode::start(config, 0.1).await;
        let client = HttpLedgerClient::with_timeout(&node.base_url, Duration::from_secs(1)).unwrap();
        let poller = StatusPoller::new(node.runtime.container().config.gateway.poller_config());

        let receipt = client.submit(json!({"amount": 1})).await.unwrap();
        node.stop().await;

        let err = timeout(WAIT, poller.wait_for_confirmation(&client, &receipt.tx_hash))
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, PollError::Status(LedgerError::Transport(_))));
    }

    // =========================================================================
    // WEBSOCKET FEEDS
    // =========================================================================

    #[tokio::test]
    async fn test_ledger_feed_streams_lifecycle() {
        let node = LiveNode::start(fast_config(DELAY), 0.1).await;
        let (socket, _) = connect_async(format!("{}/api/ledger/ws", node.ws_url)).await.unwrap();
        let (_write, mut read) = socket.split();

        let client = HttpLedgerClient::new(&node.base_url).unwrap();
        let receipt = client.submit(json!({"amount": 7})).await.unwrap();

        let submitted = text_json(timeout(WAIT, read.next()).await.unwrap().unwrap().unwrap());
        assert_eq!(submitted["event"], "submitted");
        assert_eq!(submitted["txHash"], receipt.tx_hash.as_str());

        let confirmed = text_json(timeout(WAIT, read.next()).await.unwrap().unwrap().unwrap());
        assert_eq!(confirmed["event"], "confirmed");
        assert_eq!(confirmed["txHash"], receipt.tx_hash.as_str());
        assert_eq!(confirmed["block"], submitted["block"]);

        node.stop().await;
    }

    #[tokio::test]
    async fn test_fraud_feed_greets_then_streams() {
        let node = LiveNode::start(fast_config(DELAY), 0.1).await;
        let (socket, _) = connect_async(format!("{}/api/v1/fraud-alerts/ws", node.ws_url))
            .await
            .unwrap();
        let (_write, mut read) = socket.split();

        let greeting = text_json(timeout(WAIT, read.next()).await.unwrap().unwrap().unwrap());
        assert_eq!(greeting, json!({"message": "Connected to fraud alert WebSocket"}));

        for seq in 1..=2 {
            let frame = text_json(timeout(WAIT, read.next()).await.unwrap().unwrap().unwrap());
            assert_eq!(frame["tx_id"], format!("live-tx-{}", seq));
            assert_eq!(frame["fraud_score"], 0.1);
            assert_eq!(frame["alert"], false);
        }

        let metrics: Value = reqwest::get(format!("{}/metrics", node.base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(metrics["websocket"]["messages_sent"].as_u64().unwrap() >= 3);

        node.stop().await;
    }
}
