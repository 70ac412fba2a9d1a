use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, instrument};

use super::coordinator::SessionCoordinator;
use super::events::EventSink;

/// Configuration for the liveness sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to look for silent players
    pub sweep_interval: Duration,
    /// How long a player may go without a heartbeat before their scan is auto-resolved
    pub grace_period: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(5),
            grace_period: Duration::from_secs(30),
        }
    }
}

/// Starts the background task that auto-resolves scans of silent players
#[instrument(skip(coordinator, sink))]
pub async fn start_timeout_sweeper(
    coordinator: Arc<SessionCoordinator>,
    sink: Arc<dyn EventSink>,
    config: SweeperConfig,
) {
    info!(
        sweep_interval_secs = config.sweep_interval.as_secs(),
        grace_period_secs = config.grace_period.as_secs(),
        "Starting timeout sweeper"
    );

    let mut sweep_interval = interval(config.sweep_interval);

    loop {
        sweep_interval.tick().await;
        let resolved = sweep_timeouts(&coordinator, &sink, config.grace_period).await;
        if resolved > 0 {
            info!(resolved, "Timeout sweep completed");
        }
    }
}

/// One sweep pass. Returns how many scans were auto-resolved.
async fn sweep_timeouts(
    coordinator: &Arc<SessionCoordinator>,
    sink: &Arc<dyn EventSink>,
    grace_period: Duration,
) -> usize {
    let outcome = coordinator.check_timeouts(grace_period).await;
    let resolved = outcome.value.len();

    if outcome.events.is_empty() {
        debug!("No timed out players");
    } else {
        sink.deliver(outcome.events).await;
    }
    resolved
}
