//! HTTP implementation of the ledger client port.
//!
//! Talks to a running gateway over `/api/ledger/*`, so the status poller can
//! drive a remote ledger exactly as it drives an in-process one.

use async_trait::async_trait;
use ft_01_ledger::{LedgerClient, LedgerError, StatusView, SubmitReceipt, TxHash};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default per-request timeout.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone, Debug)]
pub struct HttpLedgerClient {
    base_url: String,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl HttpLedgerClient {
    /// Client for a gateway at `base_url` (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: impl Into<String>) -> Result<Self, LedgerError> {
        Self::with_timeout(base_url, DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            api_key: None,
        })
    }

    /// Send `key` as `X-API-Key` on submissions.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit(&self, payload: Value) -> Result<SubmitReceipt, LedgerError> {
        let mut request = self.http.post(self.url("/api/ledger/submit")).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }
        let response = request.send().await.map_err(transport)?;
        let receipt: SubmitReceipt = decode(response).await?;
        debug!(tx_hash = %receipt.tx_hash, "Submitted over HTTP");
        Ok(receipt)
    }

    async fn fetch_status(&self, tx_hash: &TxHash) -> Result<StatusView, LedgerError> {
        let response = self
            .http
            .get(self.url("/api/ledger/status"))
            .query(&[("txHash", tx_hash.as_str())])
            .send()
            .await
            .map_err(transport)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LedgerError::not_found(tx_hash.clone()));
        }
        decode(response).await
    }
}

fn transport(e: reqwest::Error) -> LedgerError {
    LedgerError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    match status {
        StatusCode::BAD_REQUEST => Err(LedgerError::InvalidPayload(message)),
        StatusCode::NOT_FOUND => Err(LedgerError::NotFound { tx_hash: None }),
        _ => Err(LedgerError::Transport(format!("HTTP {}: {}", status.as_u16(), message))),
    }
}
