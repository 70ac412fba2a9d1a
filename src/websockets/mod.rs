// Public API
pub use broadcast::start_state_broadcast;
pub use connection_manager::{ConnectionManager, ConnectionRole, InMemoryConnectionManager};
pub use gateway::EventGateway;
pub use handler::{moderator_websocket_handler, player_websocket_handler, WebsocketReceiveHandler};
pub use messages::{MessageType, WebSocketMessage};
pub use socket::MessageHandler;

// Internal modules
mod broadcast;
mod connection_manager;
mod gateway;
mod handler;
mod messages;
mod socket;
