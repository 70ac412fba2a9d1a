use serde_json::{json, Value};

use unmask::websockets::{ConnectionRole, MessageHandler, MessageType, WebSocketMessage};

use super::setup::{TestSetup, MODERATOR};

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a raw frame as the given connection
    pub async fn send_raw(&self, conn_id: &str, role: ConnectionRole, raw: &str) {
        self.input_handler
            .handle_message(conn_id, role, raw.to_string())
            .await;
    }

    /// Send a request and return the payload of the ACK it produced
    pub async fn request(
        &self,
        conn_id: &str,
        role: ConnectionRole,
        message_type: MessageType,
        payload: Value,
    ) -> Value {
        let message = WebSocketMessage::new(message_type, payload);
        let raw = serde_json::to_string(&message).unwrap();
        self.send_raw(conn_id, role, &raw).await;
        self.last_ack_for(conn_id)
            .await
            .unwrap_or_else(|| panic!("no ACK sent to {conn_id} for {message_type:?}"))
    }

    pub async fn player_request(&self, conn_id: &str, message_type: MessageType, payload: Value) -> Value {
        self.request(conn_id, ConnectionRole::Player, message_type, payload)
            .await
    }

    pub async fn moderator_request(&self, message_type: MessageType, payload: Value) -> Value {
        self.request(MODERATOR, ConnectionRole::Moderator, message_type, payload)
            .await
    }

    /// Clear all recorded messages
    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    pub async fn last_ack_for(&self, conn_id: &str) -> Option<Value> {
        self.mock_conn_manager
            .get_messages_for(conn_id)
            .await
            .into_iter()
            .rev()
            .find(|m| m["type"] == "ACK")
            .map(|m| m["payload"].clone())
    }

    /// Payloads of every EVENT message a connection received
    pub async fn events_for(&self, conn_id: &str) -> Vec<Value> {
        self.mock_conn_manager
            .get_messages_for(conn_id)
            .await
            .into_iter()
            .filter(|m| m["type"] == "EVENT")
            .map(|m| m["payload"].clone())
            .collect()
    }

    pub async fn has_event(&self, conn_id: &str, event: &str) -> bool {
        self.events_for(conn_id)
            .await
            .iter()
            .any(|e| e["event"] == event)
    }

    /// Squad roster in chain order
    pub async fn squad_order(&self, squad_id: &str) -> Vec<String> {
        self.coordinator.squad_member_ids(squad_id).await
    }

    pub async fn secret_index(&self, squad_id: &str) -> u8 {
        let squad = self.coordinator.squad(squad_id).await.unwrap();
        let secret = squad.lock().await.secret_index().unwrap();
        secret
    }

    pub async fn getaway_code(&self, squad_id: &str) -> String {
        let squad = self.coordinator.squad(squad_id).await.unwrap();
        let code = squad.lock().await.getaway_code().unwrap();
        code
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn register(&self, conn_id: &str) -> Value {
        self.player_request(
            conn_id,
            MessageType::Register,
            json!({
                "nickname": format!("agent-{conn_id}"),
                "identifying_info": format!("sketch of {conn_id}"),
                "tell": "taps foot",
            }),
        )
        .await
    }

    pub async fn register_all(&self) {
        for player in &self.players {
            let ack = self.register(player).await;
            assert_eq!(ack["success"], true, "registration failed for {player}: {ack}");
        }
    }

    pub async fn start_chain(&self) -> Value {
        self.moderator_request(MessageType::StartChain, json!({})).await
    }

    pub async fn scan(&self, scanner: &str, target: &str) -> Value {
        self.player_request(scanner, MessageType::Scan, json!({ "target_id": target }))
            .await
    }

    /// Every member scans their target, in roster order
    pub async fn complete_loop(&self, squad_id: &str) -> Value {
        let order = self.squad_order(squad_id).await;
        let mut last = Value::Null;
        for (i, scanner) in order.iter().enumerate() {
            last = self.scan(scanner, &order[(i + 1) % order.len()]).await;
        }
        last
    }

    pub async fn guess(&self, conn_id: &str, symbol_index: i64) -> Value {
        self.player_request(
            conn_id,
            MessageType::SignalJammerGuess,
            json!({ "symbol_index": symbol_index }),
        )
        .await
    }

    pub async fn tumbler(&self, conn_id: &str, at_sweet_spot: bool) -> Value {
        self.player_request(
            conn_id,
            MessageType::TumblerState,
            json!({ "at_sweet_spot": at_sweet_spot }),
        )
        .await
    }

    pub async fn verify_code(&self, conn_id: &str, code: &str) -> Value {
        self.player_request(conn_id, MessageType::VerifyCode, json!({ "code": code }))
            .await
    }

    pub async fn heartbeat(&self, conn_id: &str) -> Value {
        self.player_request(conn_id, MessageType::Heartbeat, json!({}))
            .await
    }

    /// Drop a player's connection as the socket loop would on close
    pub async fn disconnect(&self, conn_id: &str) {
        self.input_handler
            .handle_disconnect(conn_id, ConnectionRole::Player)
            .await;
    }
}
