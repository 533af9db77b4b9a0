use super::manager::SessionLifecycleManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawn the periodic expiry check.
///
/// This is the only enforcement point for expiry that is not triggered by
/// a direct user action: each tick runs `enforce_expiry` and publishes the
/// current status to subscribers. Abort the returned handle on shutdown.
pub fn spawn_expiry_ticker(
    manager: Arc<Mutex<SessionLifecycleManager>>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "expiry ticker started");

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first interval tick fires immediately; skip it so a fresh
        // session is not evaluated at time zero.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let mut manager = manager.lock().await;
            manager.enforce_expiry();
            manager.publish_tick();
        }
    })
}
