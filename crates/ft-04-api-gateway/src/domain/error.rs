//! API Gateway error types.
//!
//! Every error leaves the gateway as `{"error": message}` with an optional
//! `details` object, using the HTTP status to carry the error class.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ft_01_ledger::LedgerError;
use ft_02_settlement::SettlementError;
use ft_03_risk::RiskError;
use serde::Serialize;
use std::fmt;

/// API error with its HTTP status
#[derive(Debug, Clone)]
pub struct ApiError {
    /// HTTP status code
    pub status: StatusCode,
    /// Error message
    pub message: String,
    /// Optional additional data
    pub data: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
        }
    }

    /// Create error with additional data
    pub fn with_data(status: StatusCode, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            status,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Malformed or rejected request
    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, details)
    }

    /// Resource not found (transaction, account, alert)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// The ledger's not-found error, worded exactly as clients expect.
    pub fn transaction_not_found() -> Self {
        Self::not_found("Transaction not found")
    }

    /// Request violates a state transition
    pub fn conflict(details: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, details)
    }

    /// Request body exceeds the configured size
    pub fn payload_too_large(limit: usize) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Request body exceeds {} bytes", limit),
        )
    }

    /// Missing or invalid credentials
    pub fn unauthorized(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            format!("Unauthorized: {}", details.into()),
        )
    }

    /// Temporarily unable to serve the request
    pub fn unavailable(details: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, details)
    }

    /// Request timeout
    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            StatusCode::GATEWAY_TIMEOUT,
            format!("Request timeout: {}", operation.into()),
        )
    }

    /// Internal error
    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", details.into()),
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

impl Serialize for ApiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let len = if self.data.is_some() { 2 } else { 1 };
        let mut state = serializer.serialize_struct("ApiError", len)?;
        state.serialize_field("error", &self.message)?;
        if let Some(ref data) = self.data {
            state.serialize_field("details", data)?;
        }
        state.end()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(&self)).into_response()
    }
}

// Conversions from domain errors

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::NotFound { .. } => ApiError::transaction_not_found(),
            LedgerError::InvalidPayload(_) => ApiError::bad_request(e.to_string()),
            LedgerError::HashCollision { .. } => ApiError::unavailable(e.to_string()),
            LedgerError::Transport(_) => ApiError::new(StatusCode::BAD_GATEWAY, e.to_string()),
        }
    }
}

impl From<SettlementError> for ApiError {
    fn from(e: SettlementError) -> Self {
        match e {
            SettlementError::TransactionNotFound(_) => ApiError::transaction_not_found(),
            SettlementError::AccountNotFound(_) => ApiError::not_found(e.to_string()),
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<RiskError> for ApiError {
    fn from(e: RiskError) -> Self {
        match e {
            RiskError::AlertNotFound(_) => ApiError::not_found(e.to_string()),
            RiskError::InvalidTransition { .. } => ApiError::conflict(e.to_string()),
            RiskError::InvalidAmount(_) => ApiError::bad_request(e.to_string()),
            RiskError::InvalidThreshold(_) => ApiError::internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Gateway-level errors (startup and shutdown)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(String),

    /// Server stopped with an error
    #[error("server error: {0}")]
    Server(String),

    /// Already running
    #[error("gateway already started")]
    AlreadyStarted,

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
