//! Ledger event stream.
//!
//! Each subscriber gets its own broadcast receiver taken at upgrade time, so
//! events from before the connection are never replayed. A slow client that
//! falls behind the channel skips the missed events and keeps streaming.

use crate::middleware::GatewayMetrics;
use crate::router::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use ft_01_ledger::LedgerEvent;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

pub async fn ledger_feed(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.ledger.subscribe();
    let metrics = Arc::clone(&state.metrics);
    ws.on_upgrade(move |socket| stream_events(socket, events, metrics))
}

async fn stream_events(
    socket: WebSocket,
    mut events: broadcast::Receiver<LedgerEvent>,
    metrics: Arc<GatewayMetrics>,
) {
    metrics.record_ws_connect();
    info!("Ledger feed connected");
    let (mut sender, mut receiver) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode ledger event");
                            continue;
                        }
                    };
                    if let Err(e) = sender.send(Message::Text(text)).await {
                        debug!(error = %e, "Ledger feed send failed");
                        break;
                    }
                    metrics.record_ws_message();
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Ledger feed lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(e)) => {
                    warn!(error = %e, "Ledger feed error");
                    break;
                }
                // Client messages are ignored; pings are answered by the socket.
                Some(Ok(_)) => {}
            },
        }
    }

    metrics.record_ws_disconnect();
    info!("Ledger feed closed");
}
