//! # FinTrust Telemetry
//!
//! Logging initialisation shared by every FinTrust binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fintrust_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::for_service("fintrust-node"))?;
//!     // Events are now formatted and filtered
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FT_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directives |
//! | `FT_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `FT_SERVICE_NAME` / `OTEL_SERVICE_NAME` | `fintrust` | Service name |

mod config;
mod logging;
mod subscriber;

pub use config::TelemetryConfig;
pub use subscriber::{env_filter, init_subscriber};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Failed to install subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging for the process.
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_subscriber(config)
}
