//! Gateway domain: configuration and error types.

pub mod config;
pub mod error;

pub use config::{
    ConfigError, CorsConfig, FraudConfig, GatewayConfig, HttpConfig, LedgerSection, LimitsConfig,
    PollerSection, SecurityConfig, TimeoutConfig,
};
pub use error::{ApiError, ApiResult, GatewayError};
