use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::phase::{GamePhase, Minigame, SquadPhase};

/// Identifying info submitted at registration, kept for the moderator wall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub nickname: String,
    pub identifying_info: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadStatus {
    pub id: String,
    pub phase: SquadPhase,
    pub minigame: Option<Minigame>,
    pub members: usize,
    pub connected: usize,
    pub scans_completed: usize,
    pub loop_complete: bool,
    pub progress: u32,
    pub wrong_guesses: usize,
    pub max_tries: usize,
    pub finish_rank: Option<u32>,
}

/// Aggregate view pulled by (and periodically pushed to) moderators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: GamePhase,
    pub player_count: usize,
    pub max_players: usize,
    pub squad_count: usize,
    pub team_size: usize,
    pub drawings: Vec<Submission>,
    pub squads: Vec<SquadStatus>,
}

/// Team-size dependent settings a player needs for the minigames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadInfo {
    pub squad_id: String,
    pub team_size: usize,
    pub max_tries: usize,
    pub code_length: usize,
}
