use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    phase::{GamePhase, Minigame, SquadPhase},
    snapshot::GameSnapshot,
};

/// Who an outbound event is meant for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Audience {
    Player(String),
    Squad(String),
    Moderators,
    /// Every connected player and moderator
    Everyone,
}

/// Notifications produced by the coordinator
///
/// These are facts about state changes that already happened. The core never
/// delivers them itself; it returns them alongside operation results and the
/// gateway routes them to their audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PhaseChange {
        phase: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        squad_id: Option<String>,
    },
    ScanComplete {
        scanner_id: String,
    },
    SquadActivated {
        squad_id: String,
    },
    TumblerSync {
        synced: bool,
        sync_time: f64,
        players_ready: usize,
        total_players: usize,
    },
    AutoResolved {
        player_id: String,
    },
    MinigameSuccess {
        game: Minigame,
    },
    HeistComplete {
        squad_id: String,
    },
    GameReset,

    // Moderator telemetry
    PlayerJoined {
        id: String,
        nickname: String,
        identifying_info: String,
        count: usize,
    },
    PlayerLeft {
        id: String,
        count: usize,
    },
    ScanRecorded {
        squad_id: String,
        scanner_id: String,
    },
    SquadLoopComplete {
        squad_id: String,
    },
    SquadTumblerComplete {
        squad_id: String,
    },
    SquadCompleted {
        squad_id: String,
        finish_rank: u32,
    },
    SquadError {
        squad_id: String,
    },
    GameState(GameSnapshot),
}

impl GameEvent {
    pub fn global_phase(phase: GamePhase) -> Self {
        GameEvent::PhaseChange {
            phase: phase.to_string(),
            squad_id: None,
        }
    }

    pub fn squad_phase(squad_id: &str, phase: SquadPhase) -> Self {
        GameEvent::PhaseChange {
            phase: phase.to_string(),
            squad_id: Some(squad_id.to_string()),
        }
    }

    /// Short name used in logs
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::PhaseChange { .. } => "phase_change",
            GameEvent::ScanComplete { .. } => "scan_complete",
            GameEvent::SquadActivated { .. } => "squad_activated",
            GameEvent::TumblerSync { .. } => "tumbler_sync",
            GameEvent::AutoResolved { .. } => "auto_resolved",
            GameEvent::MinigameSuccess { .. } => "minigame_success",
            GameEvent::HeistComplete { .. } => "heist_complete",
            GameEvent::GameReset => "game_reset",
            GameEvent::PlayerJoined { .. } => "player_joined",
            GameEvent::PlayerLeft { .. } => "player_left",
            GameEvent::ScanRecorded { .. } => "scan_recorded",
            GameEvent::SquadLoopComplete { .. } => "squad_loop_complete",
            GameEvent::SquadTumblerComplete { .. } => "squad_tumbler_complete",
            GameEvent::SquadCompleted { .. } => "squad_completed",
            GameEvent::SquadError { .. } => "squad_error",
            GameEvent::GameState(_) => "game_state",
        }
    }
}

/// An event paired with its audience
#[derive(Debug, Clone, PartialEq)]
pub struct Outbound {
    pub audience: Audience,
    pub event: GameEvent,
}

impl Outbound {
    pub fn new(audience: Audience, event: GameEvent) -> Self {
        Self { audience, event }
    }

    pub fn to_squad(squad_id: &str, event: GameEvent) -> Self {
        Self::new(Audience::Squad(squad_id.to_string()), event)
    }

    pub fn to_moderators(event: GameEvent) -> Self {
        Self::new(Audience::Moderators, event)
    }

    pub fn to_everyone(event: GameEvent) -> Self {
        Self::new(Audience::Everyone, event)
    }
}

/// Result of a coordinator operation plus the events it produced
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub events: Vec<Outbound>,
}

impl<T> Outcome<T> {
    pub fn new(value: T, events: Vec<Outbound>) -> Self {
        Self { value, events }
    }

    pub fn quiet(value: T) -> Self {
        Self::new(value, Vec::new())
    }
}

/// Destination for events produced outside a request/response cycle
/// (the timeout sweeper, the moderator state loop)
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn deliver(&self, events: Vec<Outbound>);
}
