use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

/// Which endpoint a connection came in on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionRole {
    Player,
    Moderator,
}

#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(
        &self,
        conn_id: String,
        role: ConnectionRole,
        sender: mpsc::UnboundedSender<String>,
    );

    async fn remove_connection(&self, conn_id: &str);

    async fn send_to_connection(&self, conn_id: &str, message: &str);

    async fn send_to_connections(&self, conn_ids: &[String], message: &str);

    async fn send_to_moderators(&self, message: &str);

    /// Every open connection, players and moderators alike
    async fn broadcast(&self, message: &str);

    async fn moderator_count(&self) -> usize;
}

struct ConnectionEntry {
    role: ConnectionRole,
    sender: mpsc::UnboundedSender<String>,
}

pub struct InMemoryConnectionManager {
    // conn_id -> outbound channel
    connections: Arc<RwLock<HashMap<String, ConnectionEntry>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(
        &self,
        conn_id: String,
        role: ConnectionRole,
        sender: mpsc::UnboundedSender<String>,
    ) {
        let mut connections = self.connections.write().await;
        connections.insert(conn_id, ConnectionEntry { role, sender });
    }

    async fn remove_connection(&self, conn_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(conn_id);
    }

    async fn send_to_connection(&self, conn_id: &str, message: &str) {
        let connections = self.connections.read().await;
        if let Some(entry) = connections.get(conn_id) {
            let _ = entry.sender.send(message.to_string());
        }
    }

    async fn send_to_connections(&self, conn_ids: &[String], message: &str) {
        let connections = self.connections.read().await;
        for conn_id in conn_ids {
            if let Some(entry) = connections.get(conn_id) {
                let _ = entry.sender.send(message.to_string());
            }
        }
    }

    async fn send_to_moderators(&self, message: &str) {
        let connections = self.connections.read().await;
        for entry in connections.values() {
            if entry.role == ConnectionRole::Moderator {
                let _ = entry.sender.send(message.to_string());
            }
        }
    }

    async fn broadcast(&self, message: &str) {
        let connections = self.connections.read().await;
        for entry in connections.values() {
            let _ = entry.sender.send(message.to_string());
        }
    }

    async fn moderator_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections
            .values()
            .filter(|entry| entry.role == ConnectionRole::Moderator)
            .count()
    }
}
