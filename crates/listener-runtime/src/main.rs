//! # Star Notary Listener
//!
//! Watches the Star Notary contract and forwards each event to the Star
//! Notary API once it is buried under enough blocks.
//!
//! ## Startup Sequence
//!
//! 1. Initialize logging
//! 2. Load configuration from the environment
//! 3. Connect the ledger websocket and build the API client
//! 4. Subscribe to all five event types
//! 5. Run the reactor until a stream closes or Ctrl-C

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tracing::{debug, error, info};

use listener_runtime::{
    join_keepalive, spawn_keepalive, EthersLedgerClient, ListenerConfig, StarNotaryApiClient,
};
use snl_03_confirmation_pipeline::ListenerReactor;
use snl_telemetry::{init_telemetry, metrics_snapshot, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_telemetry(&telemetry).context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Star Notary Listener v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = ListenerConfig::from_env().context("Invalid listener configuration")?;
    info!(
        contract = ?config.contract_address,
        confirmation_blocks = config.confirmation_blocks,
        api = %config.api.base_url(),
        "Configuration loaded"
    );

    let ledger = Arc::new(
        EthersLedgerClient::connect(
            &config.rpc_ws_url,
            config.contract_address,
            config.subscription_buffer,
        )
        .await
        .context("Failed to connect to the ledger")?,
    );
    let notifier =
        Arc::new(StarNotaryApiClient::new(&config.api).context("Failed to build API client")?);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let keepalive = config
        .keepalive_interval
        .map(|period| spawn_keepalive(Arc::clone(&ledger), period, shutdown_rx));

    let mut reactor = ListenerReactor::new(Arc::clone(&ledger), notifier, config.pipeline());
    reactor
        .subscribe_all()
        .await
        .context("Failed to subscribe to contract events")?;

    let queue = reactor.queue();
    let outcome = tokio::select! {
        result = reactor.run() => result.context("Listener stopped"),
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!(pending = queue.len(), "Shutdown requested");
            Ok(())
        }
    };

    let _ = shutdown_tx.send(true);
    if let Some(handle) = keepalive {
        join_keepalive(handle).await;
    }

    match metrics_snapshot() {
        Ok(snapshot) => debug!(metrics = %snapshot, "Final metrics"),
        Err(e) => debug!(error = %e, "Metrics unavailable"),
    }

    if let Err(e) = &outcome {
        error!(error = %e, "Listener exited with error");
    }
    outcome
}

