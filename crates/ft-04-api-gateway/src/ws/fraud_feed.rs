//! Live fraud feed.

use crate::middleware::GatewayMetrics;
use crate::router::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use ft_03_risk::{FraudCheckRequest, RiskService};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// First frame sent on every connection.
pub const GREETING: &str = "Connected to fraud alert WebSocket";

pub async fn fraud_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let risk = Arc::clone(&state.risk);
    let metrics = Arc::clone(&state.metrics);
    let period = state.alert_feed_interval;
    ws.on_upgrade(move |socket| stream_assessments(socket, risk, metrics, period))
}

async fn stream_assessments(
    socket: WebSocket,
    risk: Arc<RiskService>,
    metrics: Arc<GatewayMetrics>,
    period: Duration,
) {
    metrics.record_ws_connect();
    info!(period_ms = period.as_millis() as u64, "Fraud feed connected");
    let (mut sender, mut receiver) = socket.split();

    let greeting = json!({ "message": GREETING }).to_string();
    if sender.send(Message::Text(greeting)).await.is_ok() {
        metrics.record_ws_message();

        let mut ticks = interval_at(Instant::now() + period, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut seq: u64 = 0;

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    seq += 1;
                    let assessment = risk.assess(&FraudCheckRequest::for_tx(format!("live-tx-{}", seq)));
                    let text = match serde_json::to_string(&assessment) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode assessment");
                            continue;
                        }
                    };
                    if let Err(e) = sender.send(Message::Text(text)).await {
                        debug!(error = %e, "Fraud feed send failed");
                        break;
                    }
                    metrics.record_ws_message();
                }
                incoming = receiver.next() => match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        warn!(error = %e, "Fraud feed error");
                        break;
                    }
                    Some(Ok(_)) => {}
                },
            }
        }
    }

    metrics.record_ws_disconnect();
    info!("Fraud feed closed");
}
