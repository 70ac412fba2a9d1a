use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use unmask::websockets::{ConnectionManager, ConnectionRole};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records every message sent to each connection instead of writing to a socket
#[derive(Clone)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    connections: Arc<RwLock<HashMap<String, ConnectionRole>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self {
            sent_messages: Arc::new(RwLock::new(HashMap::new())),
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn connect(&self, conn_id: &str, role: ConnectionRole) {
        self.connections
            .write()
            .await
            .insert(conn_id.to_string(), role);
    }

    pub async fn is_connected(&self, conn_id: &str) -> bool {
        self.connections.read().await.contains_key(conn_id)
    }

    pub async fn get_messages_for(&self, conn_id: &str) -> Vec<Value> {
        self.sent_messages
            .read()
            .await
            .get(conn_id)
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| serde_json::from_str(m).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }

    async fn record(&self, conn_id: &str, message: &str) {
        self.sent_messages
            .write()
            .await
            .entry(conn_id.to_string())
            .or_default()
            .push(message.to_string());
    }

    async fn ids_where(&self, keep: impl Fn(ConnectionRole) -> bool) -> Vec<String> {
        self.connections
            .read()
            .await
            .iter()
            .filter(|(_, role)| keep(**role))
            .map(|(id, _)| id.clone())
            .collect()
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(
        &self,
        conn_id: String,
        role: ConnectionRole,
        _sender: mpsc::UnboundedSender<String>,
    ) {
        self.connect(&conn_id, role).await;
    }

    async fn remove_connection(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    async fn send_to_connection(&self, conn_id: &str, message: &str) {
        if self.is_connected(conn_id).await {
            self.record(conn_id, message).await;
        }
    }

    async fn send_to_connections(&self, conn_ids: &[String], message: &str) {
        for conn_id in conn_ids {
            self.send_to_connection(conn_id, message).await;
        }
    }

    async fn send_to_moderators(&self, message: &str) {
        for conn_id in self.ids_where(|role| role == ConnectionRole::Moderator).await {
            self.record(&conn_id, message).await;
        }
    }

    async fn broadcast(&self, message: &str) {
        for conn_id in self.ids_where(|_| true).await {
            self.record(&conn_id, message).await;
        }
    }

    async fn moderator_count(&self) -> usize {
        self.ids_where(|role| role == ConnectionRole::Moderator)
            .await
            .len()
    }
}
