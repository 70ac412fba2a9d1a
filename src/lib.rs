// Library crate for the Unmask party game server
// This file exposes the public API for integration tests

pub mod config;
pub mod game;
pub mod http;
pub mod shared;
pub mod websockets;

// Re-export commonly used types for easier access in tests
pub use config::ServerConfig;
pub use game::{GameError, GamePhase, SessionCoordinator, SquadPhase};
pub use http::router;
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, ConnectionRole, EventGateway, MessageHandler, MessageType,
    WebSocketMessage, WebsocketReceiveHandler,
};
