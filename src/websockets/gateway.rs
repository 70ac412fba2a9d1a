use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::game::{Audience, EventSink, GameEvent, Outbound, SessionCoordinator};

use super::connection_manager::ConnectionManager;
use super::messages::WebSocketMessage;

/// Delivers coordinator events to the connections that should see them
///
/// Squad audiences are resolved against the squad's roster at delivery time,
/// after the operation that produced them has released its locks.
pub struct EventGateway {
    coordinator: Arc<SessionCoordinator>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl EventGateway {
    pub fn new(
        coordinator: Arc<SessionCoordinator>,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            coordinator,
            connection_manager,
        }
    }

    pub async fn deliver_one(&self, outbound: Outbound) {
        let message = WebSocketMessage::event(&outbound.event).to_json();
        debug!(
            audience = ?outbound.audience,
            event = outbound.event.event_type(),
            "Delivering event"
        );

        match outbound.audience {
            Audience::Player(conn_id) => {
                self.connection_manager
                    .send_to_connection(&conn_id, &message)
                    .await
            }
            Audience::Squad(squad_id) => {
                let members = self.coordinator.squad_member_ids(&squad_id).await;
                self.connection_manager
                    .send_to_connections(&members, &message)
                    .await
            }
            Audience::Moderators => self.connection_manager.send_to_moderators(&message).await,
            Audience::Everyone => self.connection_manager.broadcast(&message).await,
        }
    }

    /// Push the full snapshot to every moderator
    pub async fn push_state(&self) {
        let snapshot = self.coordinator.snapshot().await;
        self.deliver_one(Outbound::to_moderators(GameEvent::GameState(snapshot)))
            .await;
    }
}

#[async_trait]
impl EventSink for EventGateway {
    async fn deliver(&self, events: Vec<Outbound>) {
        for outbound in events {
            self.deliver_one(outbound).await;
        }
    }
}
