//! Provider keepalive.
//!
//! Websocket providers drop idle connections. A cheap `current_height` call
//! on a fixed period keeps the socket busy while the queue is empty and the
//! reactor is parked on the subscriptions.

use std::sync::Arc;
use std::time::Duration;

use snl_03_confirmation_pipeline::LedgerClient;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Spawn the keepalive loop. It exits once `shutdown` flips to `true` or its
/// sender is dropped.
pub fn spawn_keepalive<L>(
    ledger: Arc<L>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    L: LedgerClient + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match ledger.current_height().await {
                        Ok(height) => debug!(%height, "[snl-keepalive] Provider alive"),
                        Err(e) => warn!(error = %e, "[snl-keepalive] Keepalive request failed"),
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[snl-keepalive] Stopping");
                        return;
                    }
                }
            }
        }
    })
}

/// Wait for a stopped keepalive task. A panic inside it is logged, not
/// propagated. Returns whether the task exited cleanly.
pub async fn join_keepalive(handle: JoinHandle<()>) -> bool {
    match handle.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "[snl-keepalive] Keepalive task failed");
            false
        }
    }
}
