use std::sync::Arc;

use unmask::{
    game::{CoordinatorConfig, SessionCoordinator},
    websockets::{ConnectionManager, ConnectionRole, EventGateway, WebsocketReceiveHandler},
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const MODERATOR: &str = "gm";

pub struct TestSetup {
    pub coordinator: Arc<SessionCoordinator>,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub gateway: Arc<EventGateway>,
    pub input_handler: WebsocketReceiveHandler,
    pub players: Vec<String>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    team_size: usize,
    max_players: usize,
    register: bool,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            team_size: 4,
            max_players: 100,
            register: false,
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// `count` players named p0, p1, ...
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.players = (0..count).map(|i| format!("p{i}")).collect();
        self
    }

    pub fn with_team_size(mut self, team_size: usize) -> Self {
        self.team_size = team_size;
        self
    }

    pub fn with_max_players(mut self, max_players: usize) -> Self {
        self.max_players = max_players;
        self
    }

    /// Send REGISTER for every player during build
    pub fn registered(mut self) -> Self {
        self.register = true;
        self
    }

    pub async fn build(self) -> TestSetup {
        let coordinator = Arc::new(SessionCoordinator::new(CoordinatorConfig {
            default_squad_size: self.team_size,
            max_players: self.max_players,
        }));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());
        let connections: Arc<dyn ConnectionManager> = mock_conn_manager.clone();
        let gateway = Arc::new(EventGateway::new(
            Arc::clone(&coordinator),
            Arc::clone(&connections),
        ));

        // Connect moderator and players
        mock_conn_manager
            .connect(MODERATOR, ConnectionRole::Moderator)
            .await;
        for player in &self.players {
            mock_conn_manager
                .connect(player, ConnectionRole::Player)
                .await;
        }

        let input_handler = WebsocketReceiveHandler::new(
            Arc::clone(&coordinator),
            connections,
            Arc::clone(&gateway),
        );

        let setup = TestSetup {
            coordinator,
            mock_conn_manager,
            gateway,
            input_handler,
            players: self.players,
        };

        if self.register {
            setup.register_all().await;
            setup.clear_messages().await;
        }
        setup
    }
}
