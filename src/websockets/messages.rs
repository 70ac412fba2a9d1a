use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::game::{GameError, GameEvent};

/// Message types for WebSocket communication
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    // Player -> Server
    Register,
    GetPrompt,
    GetTarget,
    Scan,
    MinigameState,
    SignalJammerGuess,
    GetClue,
    GetSquadInfo,
    GetFragment,
    TumblerState,
    VerifyCode,
    Heartbeat,

    // Moderator -> Server
    SetPhase,
    SetTeamSize,
    StartChain,
    StartHeist,
    ResetGame,
    GetGameState,

    // Server -> Client
    Ack,
    Error,
    Event,
}

impl MessageType {
    pub fn is_moderator_request(&self) -> bool {
        matches!(
            self,
            MessageType::SetPhase
                | MessageType::SetTeamSize
                | MessageType::StartChain
                | MessageType::StartHeist
                | MessageType::ResetGame
                | MessageType::GetGameState
        )
    }

    pub fn is_server_message(&self) -> bool {
        matches!(self, MessageType::Ack | MessageType::Error | MessageType::Event)
    }
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
    /// Echoed back on the ACK so clients can match replies to requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub meta: Option<WebSocketMessageMeta>,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanPayload {
    pub target_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalJammerGuessPayload {
    pub symbol_index: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TumblerStatePayload {
    pub at_sweet_spot: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodePayload {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinigameStatePayload {
    pub state: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPhasePayload {
    pub phase: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTeamSizePayload {
    pub size: i64,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

/// Serialize a payload; these types always serialize, but a failure is logged
/// rather than taking the connection down.
pub fn to_payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to serialize message payload");
        Value::Null
    })
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
                request_id: None,
            }),
        }
    }

    pub fn request_id(&self) -> Option<String> {
        self.meta.as_ref().and_then(|m| m.request_id.clone())
    }

    fn with_request_id(mut self, request_id: Option<String>) -> Self {
        if let Some(meta) = self.meta.as_mut() {
            meta.request_id = request_id;
        }
        self
    }

    /// Create an ACK for a handled request. `data` fields are merged into the
    /// payload; `success` defaults to true unless `data` sets it.
    pub fn ack(request: MessageType, data: Value, request_id: Option<String>) -> Self {
        let mut payload = Map::new();
        payload.insert("request".to_string(), to_payload(&request));
        payload.insert("success".to_string(), Value::Bool(true));
        if let Value::Object(fields) = data {
            payload.extend(fields);
        }
        Self::new(MessageType::Ack, Value::Object(payload)).with_request_id(request_id)
    }

    /// Create an ACK for a rejected request
    pub fn rejection(request: MessageType, error: &GameError, request_id: Option<String>) -> Self {
        let payload = json!({
            "request": request,
            "success": false,
            "code": error.code(),
            "message": error.to_string(),
        });
        Self::new(MessageType::Ack, payload).with_request_id(request_id)
    }

    /// Create an ERROR message
    pub fn error(message: String) -> Self {
        let payload = ErrorPayload { message };
        Self::new(MessageType::Error, to_payload(&payload))
    }

    /// Create an EVENT message carrying a game notification
    pub fn event(event: &GameEvent) -> Self {
        Self::new(MessageType::Event, to_payload(event))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to serialize WebSocket message");
            String::new()
        })
    }
}
