//! Background sweeper for idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::services::game_flow::GameFlowService;

/// Every `interval`, evict sessions idle longer than `ttl` with nobody
/// attached. Runs until the returned handle is aborted.
pub fn spawn_idle_sweeper(
    flow: Arc<GameFlowService>,
    ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let evicted = flow.evict_idle(ttl);
            if evicted.is_empty() {
                debug!("Idle sweep found nothing to evict");
            } else {
                info!(count = evicted.len(), "Idle sweep evicted sessions");
            }
        }
    })
}
