use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unmask::game::{start_timeout_sweeper, EventSink, SessionCoordinator};
use unmask::websockets::{start_state_broadcast, ConnectionManager, InMemoryConnectionManager};
use unmask::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unmask=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "Starting Unmask game server");

    let coordinator = Arc::new(SessionCoordinator::new(config.coordinator_config()));
    let connection_manager: Arc<dyn ConnectionManager> = Arc::new(InMemoryConnectionManager::new());
    let app_state = AppState::new(Arc::clone(&coordinator), Arc::clone(&connection_manager));

    // Background tasks
    let sink: Arc<dyn EventSink> = app_state.gateway.clone();
    tokio::spawn(start_timeout_sweeper(
        Arc::clone(&coordinator),
        sink,
        config.sweeper_config(),
    ));
    tokio::spawn(start_state_broadcast(
        Arc::clone(&app_state.gateway),
        connection_manager,
        config.state_broadcast_interval,
    ));

    let app = router(app_state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server running on http://{}", address);
    axum::serve(listener, app).await
}
