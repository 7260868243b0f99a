//! # FinTrust Node
//!
//! Serves the mock CBDC ledger, settlement, risk and mBridge APIs.
//!
//! ```text
//! FT_CONFIG=fintrust.toml FT_HTTP_PORT=8000 RUST_LOG=info node-runtime
//! ```

use anyhow::{Context, Result};
use fintrust_telemetry::{init_telemetry, TelemetryConfig};
use node_runtime::{NodeConfig, NodeRuntime};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("failed to initialise logging")?;

    let config = NodeConfig::load().context("failed to load configuration")?;

    let mut runtime = NodeRuntime::new(config).context("failed to build node runtime")?;
    let addr = runtime.start().await?;
    info!(%addr, "Node is running. Press Ctrl+C to stop.");

    runtime
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for Ctrl+C");
            }
        })
        .await?;

    Ok(())
}
