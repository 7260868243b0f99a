//! # Node Configuration
//!
//! Unified configuration for all subsystems and runtime parameters.
//!
//! ## Loading order
//!
//! 1. Built-in defaults
//! 2. TOML file named by `FT_CONFIG` (optional)
//! 3. Environment overrides: `FT_HTTP_HOST`, `FT_HTTP_PORT`, `FT_API_KEY`,
//!    `FT_CONFIRMATION_DELAY_MS`

use ft_02_settlement::SettlementConfig;
use ft_03_risk::{CorridorConfig, RiskConfig};
use ft_04_api_gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_ENV: &str = "FT_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP surface, ledger timing, limits, security.
    pub gateway: GatewayConfig,
    /// Genesis accounts of the settlement book.
    pub settlement: SettlementConfig,
    /// mBridge corridors.
    pub corridors: CorridorConfig,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] ft_04_api_gateway::ConfigError),
}

impl NodeConfig {
    /// Load from `FT_CONFIG` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.gateway.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FT_HTTP_HOST") {
            self.gateway.http.host = parse_env("FT_HTTP_HOST", host)?;
        }
        if let Some(port) = lookup("FT_HTTP_PORT") {
            self.gateway.http.port = parse_env("FT_HTTP_PORT", port)?;
        }
        if let Some(key) = lookup("FT_API_KEY").filter(|k| !k.is_empty()) {
            self.gateway.security.api_key = Some(key);
        }
        if let Some(ms) = lookup("FT_CONFIRMATION_DELAY_MS") {
            let ms: u64 = parse_env("FT_CONFIRMATION_DELAY_MS", ms)?;
            self.gateway.ledger.confirmation_delay = Duration::from_millis(ms);
        }
        Ok(())
    }

    /// Risk settings drawn from the gateway's fraud section and the corridors.
    pub fn risk_config(&self) -> RiskConfig {
        RiskConfig {
            fraud_threshold: self.gateway.fraud.threshold,
            corridors: self.corridors.clone(),
            ..RiskConfig::default()
        }
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
