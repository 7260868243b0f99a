//! Gateway configuration with validation.

use ft_01_ledger::{LedgerConfig, PayloadLimits, PollerConfig};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Ledger timing and hash allocation
    pub ledger: LedgerSection,
    /// Client poller defaults
    pub poller: PollerSection,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Timeout configuration
    pub timeouts: TimeoutConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Security configuration
    pub security: SecurityConfig,
    /// Fraud scoring and alert feed
    pub fraud: FraudConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.confirmation_delay.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "confirmation_delay cannot be 0".into(),
            ));
        }

        if self.ledger.block_range_start >= self.ledger.block_range_end {
            return Err(ConfigError::Invalid(format!(
                "empty block range {}..{}",
                self.ledger.block_range_start, self.ledger.block_range_end
            )));
        }

        if self.ledger.max_hash_attempts == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_hash_attempts cannot be 0".into(),
            ));
        }

        if self.poller.interval.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "poller interval cannot be 0".into(),
            ));
        }

        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.limits.max_payload_depth == 0 || self.limits.max_payload_fields == 0 {
            return Err(ConfigError::InvalidLimit(
                "payload depth and field limits cannot be 0".into(),
            ));
        }

        if self.timeouts.default.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "default timeout cannot be 0".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.fraud.threshold) {
            return Err(ConfigError::Invalid(format!(
                "fraud threshold {} outside [0, 1]",
                self.fraud.threshold
            )));
        }

        if self.fraud.alert_feed_interval.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "alert_feed_interval cannot be 0".into(),
            ));
        }

        if self.security.protect_ledger && self.security.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::Invalid(
                "protect_ledger requires security.api_key".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Ledger service settings derived from the `ledger` and `limits` sections.
    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            confirmation_delay: self.ledger.confirmation_delay,
            block_range: self.ledger.block_range_start..self.ledger.block_range_end,
            max_hash_attempts: self.ledger.max_hash_attempts,
            payload_limits: PayloadLimits {
                max_depth: self.limits.max_payload_depth,
                max_fields: self.limits.max_payload_fields,
            },
            ..LedgerConfig::default()
        }
    }

    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: self.poller.interval,
            max_not_found: self.poller.max_not_found,
            max_attempts: self.poller.max_attempts,
        }
    }

    /// True when ledger and mutation routes require the API key.
    pub fn ledger_protected(&self) -> bool {
        self.security.protect_ledger && self.security.api_key.is_some()
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8000)
    pub port: u16,
    /// Enable HTTP server
    pub enabled: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8000,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSection {
    /// Delay between submit and automatic confirmation
    #[serde(with = "humantime_serde")]
    pub confirmation_delay: Duration,
    /// First synthetic block number (inclusive)
    pub block_range_start: u64,
    /// Last synthetic block number (exclusive)
    pub block_range_end: u64,
    /// Hash generations tried before a submit fails
    pub max_hash_attempts: u32,
}

impl Default for LedgerSection {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_secs(3),
            block_range_start: 1000,
            block_range_end: 11000,
            max_hash_attempts: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSection {
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub max_not_found: u32,
    pub max_attempts: Option<u32>,
}

impl Default for PollerSection {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1500),
            max_not_found: 3,
            max_attempts: None,
        }
    }
}

/// Request limits configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB)
    pub max_request_size: usize,
    /// Max nesting depth of a ledger payload
    pub max_payload_depth: usize,
    /// Max keys across all objects of a ledger payload
    pub max_payload_fields: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1MB
            max_payload_depth: 32,
            max_payload_fields: 1024,
        }
    }
}

/// Timeout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Default timeout for every request
    #[serde(with = "humantime_serde")]
    pub default: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(10),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS
    pub enabled: bool,
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Allowed methods
    pub allowed_methods: Vec<String>,
    /// Allowed headers
    pub allowed_headers: Vec<String>,
    /// Expose headers
    pub expose_headers: Vec<String>,
    /// Max age for preflight cache
    pub max_age: u64,
    /// Allow credentials
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()],
            allowed_headers: vec![
                "Content-Type".to_string(),
                "Authorization".to_string(),
                "X-API-Key".to_string(),
            ],
            expose_headers: vec![],
            max_age: 86400, // 24 hours
            allow_credentials: false,
        }
    }
}

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// API key for protected routes (None = open)
    pub api_key: Option<String>,
    /// Require the key on ledger and mutation routes
    pub protect_ledger: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FraudConfig {
    /// Scores strictly above this raise an alert
    pub threshold: f64,
    /// Period of the live fraud feed
    #[serde(with = "humantime_serde")]
    pub alert_feed_interval: Duration,
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            alert_feed_interval: Duration::from_secs(10),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_millis() == 0 {
            serializer.serialize_str(&format!("{}s", duration.as_secs()))
        } else {
            serializer.serialize_str(&format!("{}ms", duration.as_millis()))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        // "ms" must be checked before "s" and "m"
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map_err(|_| "invalid minutes")?
                .checked_mul(60)
                .map(Duration::from_secs)
                .ok_or("minutes out of range")
        } else {
            // Try parsing as plain seconds
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
