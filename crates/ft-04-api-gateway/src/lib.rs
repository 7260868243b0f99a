// Allow missing docs for handler functions
#![allow(missing_docs)]

//! FT-04 API Gateway - HTTP and WebSocket surface for FinTrust.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                        API GATEWAY (ft-04)                           │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐                │
//! │  │  REST (JSON) │  │  WebSocket   │  │ Health/Metrics│               │
//! │  │  Port 8000   │  │  feeds       │  │              │                │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘                │
//! │         │                 │                 │                        │
//! │  ┌──────┴─────────────────┴─────────────────┴──────┐                 │
//! │  │                Middleware Stack                  │                │
//! │  │  Cors → Tracing → Metrics → Timeout → Validation │                │
//! │  │              (→ Auth on mutation routes)         │                │
//! │  └──────────────────────┬───────────────────────────┘                │
//! │                         │ AppState                                   │
//! └─────────────────────────┼────────────────────────────────────────────┘
//!        ┌──────────────────┼──────────────────┐
//!        ▼                  ▼                  ▼
//!   ft-01-ledger     ft-02-settlement     ft-03-risk
//! ```
//!
//! # Ledger protocol
//!
//! - `POST /api/ledger/submit` stores the payload as `pending` and answers
//!   immediately with `{"txHash", "status": "pending"}`.
//! - `GET /api/ledger/status?txHash=` returns the current snapshot, or
//!   `404 {"error": "Transaction not found"}` for a missing or unknown hash.
//! - `GET /api/ledger/ws` pushes `submitted` / `confirmed` events.
//!
//! # Security
//!
//! - Request body size limit (413) and JSON pre-validation (400)
//! - Optional API key on mutation routes, compared in constant time
//! - Per-request timeout (504)
//!
//! # Usage
//!
//! ```ignore
//! use ft_04_api_gateway::{ApiGatewayService, GatewayConfig};
//!
//! let mut gateway = ApiGatewayService::new(config, ledger, settlement, risk)?;
//! gateway.run_until(shutdown_signal()).await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod service;
pub mod ws;

#[cfg(test)]
mod test_utils;

// Re-exports for public API
pub use adapters::HttpLedgerClient;
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::ConfigError;
pub use middleware::GatewayMetrics;
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
