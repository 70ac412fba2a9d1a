use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, instrument};

use super::connection_manager::ConnectionManager;
use super::gateway::EventGateway;

/// Starts the background task that pushes the game snapshot to moderators
#[instrument(skip(gateway, connection_manager))]
pub async fn start_state_broadcast(
    gateway: Arc<EventGateway>,
    connection_manager: Arc<dyn ConnectionManager>,
    period: Duration,
) {
    info!(
        period_ms = period.as_millis() as u64,
        "Starting moderator state broadcast"
    );

    let mut ticker = interval(period);

    loop {
        ticker.tick().await;
        if connection_manager.moderator_count().await > 0 {
            gateway.push_state().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::SessionCoordinator;
    use crate::websockets::connection_manager::{ConnectionRole, InMemoryConnectionManager};
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_moderators_receive_periodic_state() {
        let coordinator = Arc::new(SessionCoordinator::default());
        let connections = Arc::new(InMemoryConnectionManager::new());
        let gateway = Arc::new(EventGateway::new(coordinator, connections.clone()));

        let (tx, mut rx) = mpsc::unbounded_channel();
        connections
            .add_connection("gm".to_string(), ConnectionRole::Moderator, tx)
            .await;

        let handle = tokio::spawn(start_state_broadcast(
            gateway,
            connections.clone(),
            Duration::from_secs(1),
        ));
        tokio::time::sleep(Duration::from_millis(2500)).await;
        handle.abort();

        let mut pushes = 0;
        while rx.try_recv().is_ok() {
            pushes += 1;
        }
        assert!(pushes >= 2, "expected repeated pushes, got {pushes}");
    }
}
