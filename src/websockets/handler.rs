use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::game::{EventSink, GameError, GamePhase, Registration, SessionCoordinator};
use crate::shared::AppState;

use super::connection_manager::{ConnectionManager, ConnectionRole};
use super::gateway::EventGateway;
use super::messages::{
    to_payload, MessageType, MinigameStatePayload, ScanPayload, SetPhasePayload,
    SetTeamSizePayload, SignalJammerGuessPayload, TumblerStatePayload, VerifyCodePayload,
    WebSocketMessage,
};
use super::socket::{Connection, MessageHandler};

/// Routes inbound client messages to the coordinator and replies with an ACK
pub struct WebsocketReceiveHandler {
    coordinator: Arc<SessionCoordinator>,
    connection_manager: Arc<dyn ConnectionManager>,
    gateway: Arc<EventGateway>,
}

fn parse_payload<T: DeserializeOwned>(payload: Value) -> Result<T, GameError> {
    serde_json::from_value(payload).map_err(|e| GameError::validation(e.to_string()))
}

impl WebsocketReceiveHandler {
    pub fn new(
        coordinator: Arc<SessionCoordinator>,
        connection_manager: Arc<dyn ConnectionManager>,
        gateway: Arc<EventGateway>,
    ) -> Self {
        Self {
            coordinator,
            connection_manager,
            gateway,
        }
    }

    /// Handle one request; the returned fields are merged into the ACK
    async fn dispatch(
        &self,
        conn_id: &str,
        role: ConnectionRole,
        message: WebSocketMessage,
    ) -> Result<Value, GameError> {
        let message_type = message.message_type;
        match (role, message_type.is_moderator_request()) {
            _ if message_type.is_server_message() => {
                return Err(GameError::validation(format!(
                    "{message_type:?} is a server message"
                )))
            }
            (ConnectionRole::Player, true) => {
                return Err(GameError::precondition("moderator request on a player connection"))
            }
            (ConnectionRole::Moderator, false) => {
                return Err(GameError::precondition("player request on a moderator connection"))
            }
            _ => {}
        }

        let coordinator = &self.coordinator;
        let payload = message.payload;

        match message_type {
            MessageType::Register => {
                let registration: Registration = parse_payload(payload)?;
                let outcome = coordinator.register_player(conn_id, registration).await?;
                self.gateway.deliver(outcome.events).await;
                Ok(json!({ "player": outcome.value }))
            }
            MessageType::GetPrompt => Ok(json!({ "prompt": coordinator.request_prompt() })),
            MessageType::GetTarget => {
                let target = coordinator.request_target(conn_id).await;
                Ok(json!({ "target": target }))
            }
            MessageType::Scan => {
                let ScanPayload { target_id } = parse_payload(payload)?;
                let outcome = coordinator.handle_scan(conn_id, &target_id).await?;
                self.gateway.deliver(outcome.events).await;
                Ok(to_payload(&outcome.value))
            }
            MessageType::MinigameState => {
                let MinigameStatePayload { state } = parse_payload(payload)?;
                coordinator.submit_minigame_state(conn_id, state).await?;
                Ok(json!({}))
            }
            MessageType::SignalJammerGuess => {
                let SignalJammerGuessPayload { symbol_index } = parse_payload(payload)?;
                let index = u8::try_from(symbol_index).map_err(|_| {
                    GameError::validation(format!("symbol index {symbol_index} is out of range"))
                })?;
                let outcome = coordinator.handle_signal_jammer_guess(conn_id, index).await?;
                self.gateway.deliver(outcome.events).await;

                let result = outcome.value;
                let mut data = to_payload(&result.outcome);
                if let Value::Object(fields) = &mut data {
                    let correct = result.outcome == crate::game::GuessOutcome::Correct;
                    fields.insert("success".to_string(), Value::Bool(correct));
                    fields.insert("progress".to_string(), json!(result.squad_progress));
                }
                Ok(data)
            }
            MessageType::GetClue => Ok(json!({ "clue": coordinator.clue(conn_id).await? })),
            MessageType::GetSquadInfo => Ok(to_payload(&coordinator.squad_info(conn_id).await?)),
            MessageType::GetFragment => {
                Ok(to_payload(&coordinator.request_fragment(conn_id).await?))
            }
            MessageType::TumblerState => {
                let TumblerStatePayload { at_sweet_spot } = parse_payload(payload)?;
                let outcome = coordinator.handle_tumbler_state(conn_id, at_sweet_spot).await?;
                self.gateway.deliver(outcome.events).await;
                Ok(to_payload(&outcome.value))
            }
            MessageType::VerifyCode => {
                let VerifyCodePayload { code } = parse_payload(payload)?;
                let outcome = coordinator.verify_getaway_code(conn_id, &code).await?;
                self.gateway.deliver(outcome.events).await;
                Ok(json!({ "success": outcome.value }))
            }
            MessageType::Heartbeat => {
                coordinator.handle_heartbeat(conn_id).await?;
                Ok(json!({}))
            }

            MessageType::SetPhase => {
                let SetPhasePayload { phase } = parse_payload(payload)?;
                let phase = GamePhase::from_str(&phase.to_lowercase())
                    .map_err(|_| GameError::validation(format!("unknown phase {phase}")))?;
                self.change_phase(phase).await?;
                Ok(json!({ "phase": phase }))
            }
            MessageType::StartChain => {
                self.change_phase(GamePhase::Chain).await?;
                Ok(json!({ "phase": GamePhase::Chain }))
            }
            MessageType::StartHeist => {
                self.change_phase(GamePhase::Heist).await?;
                Ok(json!({ "phase": GamePhase::Heist }))
            }
            MessageType::SetTeamSize => {
                let SetTeamSizePayload { size } = parse_payload(payload)?;
                let size = usize::try_from(size.max(0)).unwrap_or(0);
                let team_size = coordinator.set_team_size(size).await?;
                self.gateway.push_state().await;
                Ok(json!({ "team_size": team_size }))
            }
            MessageType::ResetGame => {
                let outcome = coordinator.reset_game().await;
                self.gateway.deliver(outcome.events).await;
                self.gateway.push_state().await;
                Ok(json!({}))
            }
            MessageType::GetGameState => {
                let snapshot = coordinator.snapshot().await;
                let check = coordinator.can_start_game().await;
                Ok(json!({ "state": snapshot, "can_start": check }))
            }

            MessageType::Ack | MessageType::Error | MessageType::Event => Err(
                GameError::validation(format!("{message_type:?} is a server message")),
            ),
        }
    }

    async fn change_phase(&self, phase: GamePhase) -> Result<(), GameError> {
        let outcome = self.coordinator.set_phase(phase).await?;
        self.gateway.deliver(outcome.events).await;
        self.gateway.push_state().await;
        Ok(())
    }

    /// Tear down a closed connection. A player leaves the registry; their
    /// squad slot stays and the sweeper resolves any outstanding scan.
    pub async fn handle_disconnect(&self, conn_id: &str, role: ConnectionRole) {
        self.connection_manager.remove_connection(conn_id).await;
        if role != ConnectionRole::Player {
            return;
        }

        match self.coordinator.remove_player(conn_id).await {
            Ok(outcome) => self.gateway.deliver(outcome.events).await,
            Err(GameError::NotFound(_)) => {
                debug!(conn_id = %conn_id, "Unregistered connection closed");
            }
            Err(e) => warn!(conn_id = %conn_id, error = %e, "Failed to remove player"),
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, conn_id: &str, role: ConnectionRole, message: String) {
        debug!(conn_id = %conn_id, role = ?role, message = %message, "Received message");

        let request = match serde_json::from_str::<WebSocketMessage>(&message) {
            Ok(request) => request,
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Failed to parse WebSocket message");
                let reply = WebSocketMessage::error(format!("Malformed message: {e}"));
                self.connection_manager
                    .send_to_connection(conn_id, &reply.to_json())
                    .await;
                return;
            }
        };

        let message_type = request.message_type;
        let request_id = request.request_id();

        let reply = match self.dispatch(conn_id, role, request).await {
            Ok(data) => WebSocketMessage::ack(message_type, data, request_id),
            Err(e) => {
                warn!(
                    conn_id = %conn_id,
                    message_type = ?message_type,
                    error = %e,
                    "Rejected request"
                );
                WebSocketMessage::rejection(message_type, &e, request_id)
            }
        };

        self.connection_manager
            .send_to_connection(conn_id, &reply.to_json())
            .await;
    }
}

/// Player endpoint: GET /ws
pub async fn player_websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| {
        handle_websocket_connection(socket, ConnectionRole::Player, app_state)
    })
}

/// Moderator endpoint: GET /ws/gm
pub async fn moderator_websocket_handler(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| {
        handle_websocket_connection(socket, ConnectionRole::Moderator, app_state)
    })
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    role: ConnectionRole,
    app_state: AppState,
) {
    let conn_id = Uuid::new_v4().to_string();
    info!(conn_id = %conn_id, role = ?role, "WebSocket connection established");

    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .connection_manager
        .add_connection(conn_id.clone(), role, outbound_sender)
        .await;

    if role == ConnectionRole::Moderator {
        app_state.gateway.push_state().await;
    }

    let handler = Arc::new(WebsocketReceiveHandler::new(
        Arc::clone(&app_state.coordinator),
        Arc::clone(&app_state.connection_manager),
        Arc::clone(&app_state.gateway),
    ));

    let connection = Connection::new(
        conn_id.clone(),
        role,
        Box::new(socket),
        outbound_receiver,
        handler.clone(),
    );

    match connection.run().await {
        Ok(()) => info!(conn_id = %conn_id, "WebSocket connection closed cleanly"),
        Err(e) => warn!(conn_id = %conn_id, error = ?e, "WebSocket connection error"),
    }

    handler.handle_disconnect(&conn_id, role).await;
}
