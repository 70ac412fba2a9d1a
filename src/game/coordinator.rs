use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::{
    errors::GameError,
    events::{GameEvent, Outbound, Outcome},
    phase::{GamePhase, Minigame, SquadPhase},
    player::{random_prompt, ConnId, Player, Registration},
    snapshot::{GameSnapshot, SquadInfo, Submission},
    squad::{Fragment, GuessOutcome, Squad, TargetInfo},
};

pub const MIN_SQUAD_SIZE: usize = 2;
pub const MAX_SQUAD_SIZE: usize = 10;

/// Squads are owned by the coordinator; each one is serialized behind its own lock
pub type SharedSquad = Arc<Mutex<Squad>>;

#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Squad size used after start-up and after every reset
    pub default_squad_size: usize,
    pub max_players: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            default_squad_size: 4,
            max_players: 100,
        }
    }
}

/// Whether the registered players split evenly into squads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartCheck {
    pub valid: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub loop_complete: bool,
    pub squad_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResult {
    pub squad_id: String,
    pub outcome: GuessOutcome,
    pub squad_progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TumblerStatus {
    pub squad_id: String,
    pub synced: bool,
    /// Seconds the current unbroken hold has lasted
    pub sync_time: f64,
    pub players_ready: usize,
    pub total_players: usize,
    pub complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoResolution {
    pub squad_id: String,
    pub player_id: String,
    pub loop_complete: bool,
}

fn start_check(player_count: usize, squad_size: usize) -> StartCheck {
    if player_count < squad_size {
        return StartCheck {
            valid: false,
            reason: format!("Need at least {squad_size} players"),
        };
    }
    if player_count % squad_size != 0 {
        let needed = squad_size - player_count % squad_size;
        return StartCheck {
            valid: false,
            reason: format!("Need {needed} more players for even teams"),
        };
    }
    StartCheck {
        valid: true,
        reason: "Ready to start".to_string(),
    }
}

struct SessionState {
    phase: GamePhase,
    squad_size: usize,
    players: HashMap<ConnId, Player>,
    squads: HashMap<String, SharedSquad>,
    /// Squad ids in formation order
    squad_order: Vec<String>,
    submissions: Vec<Submission>,
    next_squad_number: u32,
}

impl SessionState {
    fn new(squad_size: usize, next_squad_number: u32) -> Self {
        Self {
            phase: GamePhase::Start,
            squad_size,
            players: HashMap::new(),
            squads: HashMap::new(),
            squad_order: Vec::new(),
            submissions: Vec::new(),
            next_squad_number,
        }
    }

    fn ordered_squads(&self) -> Vec<(String, SharedSquad)> {
        self.squad_order
            .iter()
            .filter_map(|id| self.squads.get(id).map(|s| (id.clone(), Arc::clone(s))))
            .collect()
    }
}

/// Single in-memory authority for one party game session
///
/// Global state (phase, registry, squad map) sits behind one `RwLock`; each
/// squad sits behind its own `Mutex`. Locks are always taken registry first,
/// then squad, and per-player operations release the registry before locking
/// their squad, so operations on different squads run concurrently while
/// operations on the same squad are serialized.
pub struct SessionCoordinator {
    config: CoordinatorConfig,
    state: RwLock<SessionState>,
    finished_squads: AtomicU32,
}

impl SessionCoordinator {
    pub fn new(config: CoordinatorConfig) -> Self {
        let squad_size = config
            .default_squad_size
            .clamp(MIN_SQUAD_SIZE, MAX_SQUAD_SIZE);
        Self {
            config,
            state: RwLock::new(SessionState::new(squad_size, 1)),
            finished_squads: AtomicU32::new(0),
        }
    }

    // ------------------------------------------------------------------
    // Player lifecycle
    // ------------------------------------------------------------------

    #[instrument(skip(self, registration))]
    pub async fn register_player(
        &self,
        conn_id: &str,
        registration: Registration,
    ) -> Result<Outcome<Player>, GameError> {
        if conn_id.trim().is_empty() {
            return Err(GameError::validation("connection id cannot be empty"));
        }
        if registration.nickname.trim().is_empty() {
            return Err(GameError::validation("nickname cannot be empty"));
        }

        let mut state = self.state.write().await;

        if state.players.contains_key(conn_id) {
            return Err(GameError::DuplicateRegistration(conn_id.to_string()));
        }
        if !state.phase.precedes_formation() {
            return Err(GameError::precondition("squads have already been formed"));
        }
        if state.players.len() >= self.config.max_players {
            return Err(GameError::precondition(format!(
                "session is full ({} players)",
                self.config.max_players
            )));
        }

        let player = Player::new(conn_id.to_string(), registration, Instant::now());
        state.submissions.push(Submission {
            id: player.id.clone(),
            nickname: player.nickname.clone(),
            identifying_info: player.identifying_info.clone(),
            timestamp: Utc::now(),
        });
        state.players.insert(player.id.clone(), player.clone());
        let count = state.players.len();

        info!(player_id = %conn_id, nickname = %player.nickname, count, "Player registered");

        let joined = GameEvent::PlayerJoined {
            id: player.id.clone(),
            nickname: player.nickname.clone(),
            identifying_info: player.identifying_info.clone(),
            count,
        };
        Ok(Outcome::new(player, vec![Outbound::to_moderators(joined)]))
    }

    pub fn request_prompt(&self) -> String {
        random_prompt()
    }

    /// Remove a player. A squad slot they held stays in the roster, vacant.
    #[instrument(skip(self))]
    pub async fn remove_player(&self, conn_id: &str) -> Result<Outcome<()>, GameError> {
        let (squad, count) = {
            let mut state = self.state.write().await;
            let player = state
                .players
                .remove(conn_id)
                .ok_or_else(|| GameError::not_found(format!("{conn_id} is not registered")))?;
            let squad = player
                .squad_id
                .as_ref()
                .and_then(|id| state.squads.get(id).cloned());
            (squad, state.players.len())
        };

        if let Some(squad) = squad {
            let mut squad = squad.lock().await;
            squad.release_member(conn_id);
            debug!(squad_id = %squad.id(), player_id = %conn_id, "Squad slot vacated");
        }

        info!(player_id = %conn_id, count, "Player removed");

        let left = GameEvent::PlayerLeft {
            id: conn_id.to_string(),
            count,
        };
        Ok(Outcome::new((), vec![Outbound::to_moderators(left)]))
    }

    /// Refresh a player's liveness. Once squads are formed the squad owns
    /// liveness, so squad members only take the registry read lock.
    #[instrument(skip(self))]
    pub async fn handle_heartbeat(&self, conn_id: &str) -> Result<(), GameError> {
        let now = Instant::now();
        let squad = {
            let state = self.state.read().await;
            let player = state
                .players
                .get(conn_id)
                .ok_or_else(|| GameError::not_found(format!("{conn_id} is not registered")))?;
            player
                .squad_id
                .as_ref()
                .and_then(|id| state.squads.get(id).cloned())
        };

        match squad {
            Some(squad) => squad.lock().await.handle_reconnect(conn_id, now),
            None => {
                let mut state = self.state.write().await;
                if let Some(player) = state.players.get_mut(conn_id) {
                    player.touch(now);
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Global phase and squad formation
    // ------------------------------------------------------------------

    /// Set the squad size. Clamped to [2, 10]; only allowed before formation.
    #[instrument(skip(self))]
    pub async fn set_team_size(&self, size: usize) -> Result<usize, GameError> {
        let mut state = self.state.write().await;
        if !state.phase.precedes_formation() {
            return Err(GameError::precondition(
                "team size is fixed once squads are formed",
            ));
        }

        state.squad_size = size.clamp(MIN_SQUAD_SIZE, MAX_SQUAD_SIZE);
        info!(team_size = state.squad_size, "Team size set");
        Ok(state.squad_size)
    }

    pub async fn team_size(&self) -> usize {
        self.state.read().await.squad_size
    }

    pub async fn phase(&self) -> GamePhase {
        self.state.read().await.phase
    }

    pub async fn can_start_game(&self) -> StartCheck {
        let state = self.state.read().await;
        start_check(state.players.len(), state.squad_size)
    }

    #[instrument(skip(self))]
    pub async fn set_phase(&self, phase: GamePhase) -> Result<Outcome<()>, GameError> {
        let mut state = self.state.write().await;
        let current = state.phase;
        let formed = !current.precedes_formation();

        if formed && phase <= current {
            return Err(GameError::precondition(format!(
                "cannot move from {current} back to {phase}; reset the game to start over"
            )));
        }
        if !formed && phase > GamePhase::Chain {
            return Err(GameError::precondition("squads have not been formed yet"));
        }

        let mut events = Vec::new();

        if phase == GamePhase::Chain {
            let check = start_check(state.players.len(), state.squad_size);
            if !check.valid {
                return Err(GameError::precondition(check.reason));
            }
            Self::form_squads(&mut state)?;
        }

        if phase == GamePhase::Heist {
            for (squad_id, squad) in state.ordered_squads() {
                let mut squad = squad.lock().await;
                if squad.phase() == SquadPhase::Chain {
                    squad.force_advance(SquadPhase::Heist)?;
                    events.push(Outbound::to_squad(
                        &squad_id,
                        GameEvent::squad_phase(&squad_id, SquadPhase::Heist),
                    ));
                }
            }
        }

        state.phase = phase;
        info!(from = %current, to = %phase, "Global phase changed");

        events.insert(0, Outbound::to_everyone(GameEvent::global_phase(phase)));
        Ok(Outcome::new((), events))
    }

    /// Shuffle every registered player and cut the list into full squads.
    /// Builds everything first so a failure leaves the registry untouched.
    fn form_squads(state: &mut SessionState) -> Result<(), GameError> {
        let size = state.squad_size;
        let mut ids: Vec<ConnId> = state.players.keys().cloned().collect();
        ids.shuffle(&mut rand::rng());

        if ids.len() % size != 0 {
            return Err(GameError::precondition(format!(
                "{} players cannot be split into squads of {size}",
                ids.len()
            )));
        }

        let mut formed = Vec::with_capacity(ids.len() / size);
        let mut number = state.next_squad_number;
        for group in ids.chunks(size) {
            let squad_id = format!("squad_{number}");
            number += 1;

            let mut squad = Squad::new(squad_id.clone(), size);
            for player_id in group {
                let player = state
                    .players
                    .get(player_id)
                    .ok_or_else(|| GameError::not_found(player_id.clone()))?;
                squad.add_member(player)?;
            }
            squad.advance(SquadPhase::Chain)?;
            formed.push((squad_id, group.to_vec(), squad));
        }

        state.next_squad_number = number;
        for (squad_id, members, squad) in formed {
            for player_id in &members {
                if let Some(player) = state.players.get_mut(player_id) {
                    player.squad_id = Some(squad_id.clone());
                }
            }
            info!(squad_id = %squad_id, members = members.len(), "Squad formed");
            state.squad_order.push(squad_id.clone());
            state.squads.insert(squad_id, Arc::new(Mutex::new(squad)));
        }

        info!(
            squads = state.squads.len(),
            squad_size = size,
            "Squads formed"
        );
        Ok(())
    }

    /// Move one squad forward on its own, without touching the global phase
    #[instrument(skip(self))]
    pub async fn advance_squad(
        &self,
        squad_id: &str,
        phase: SquadPhase,
    ) -> Result<Outcome<()>, GameError> {
        let squad = self
            .squad(squad_id)
            .await
            .ok_or_else(|| GameError::not_found(format!("unknown squad {squad_id}")))?;
        let mut squad = squad.lock().await;

        let mut events = Vec::new();
        self.advance_locked(&mut squad, phase, &mut events)?;
        Ok(Outcome::new((), events))
    }

    fn advance_locked(
        &self,
        squad: &mut Squad,
        phase: SquadPhase,
        events: &mut Vec<Outbound>,
    ) -> Result<(), GameError> {
        squad.advance(phase)?;
        let squad_id = squad.id().to_string();
        events.push(Outbound::to_squad(
            &squad_id,
            GameEvent::squad_phase(&squad_id, phase),
        ));

        match phase {
            SquadPhase::Getaway => {
                events.push(Outbound::to_squad(
                    &squad_id,
                    GameEvent::MinigameSuccess {
                        game: Minigame::Tumbler,
                    },
                ));
                events.push(Outbound::to_moderators(GameEvent::SquadTumblerComplete {
                    squad_id: squad_id.clone(),
                }));
            }
            SquadPhase::Complete => {
                let rank = self.finished_squads.fetch_add(1, Ordering::SeqCst) + 1;
                squad.set_finish_rank(rank);
                info!(squad_id = %squad_id, finish_rank = rank, "Squad escaped");
                events.push(Outbound::to_squad(
                    &squad_id,
                    GameEvent::HeistComplete {
                        squad_id: squad_id.clone(),
                    },
                ));
                events.push(Outbound::to_moderators(GameEvent::SquadCompleted {
                    squad_id: squad_id.clone(),
                    finish_rank: squad.finish_rank().unwrap_or(rank),
                }));
            }
            _ => {}
        }
        Ok(())
    }

    fn loop_closed(
        &self,
        squad: &mut Squad,
        events: &mut Vec<Outbound>,
    ) -> Result<(), GameError> {
        let squad_id = squad.id().to_string();
        info!(squad_id = %squad_id, "Scan loop complete");
        events.push(Outbound::to_squad(
            &squad_id,
            GameEvent::SquadActivated {
                squad_id: squad_id.clone(),
            },
        ));
        events.push(Outbound::to_moderators(GameEvent::SquadLoopComplete {
            squad_id: squad_id.clone(),
        }));
        self.advance_locked(squad, SquadPhase::Heist, events)
    }

    // ------------------------------------------------------------------
    // Squad lookups
    // ------------------------------------------------------------------

    pub async fn squad(&self, squad_id: &str) -> Option<SharedSquad> {
        self.state.read().await.squads.get(squad_id).cloned()
    }

    pub async fn squad_ids(&self) -> Vec<String> {
        self.state.read().await.squad_order.clone()
    }

    /// Current roster of a squad, used to resolve squad-scoped audiences
    pub async fn squad_member_ids(&self, squad_id: &str) -> Vec<ConnId> {
        match self.squad(squad_id).await {
            Some(squad) => squad.lock().await.member_ids(),
            None => Vec::new(),
        }
    }

    /// A registered player, with liveness taken from their squad once formed
    pub async fn player(&self, conn_id: &str) -> Option<Player> {
        let (mut player, squad) = {
            let state = self.state.read().await;
            let player = state.players.get(conn_id).cloned()?;
            let squad = player
                .squad_id
                .as_ref()
                .and_then(|id| state.squads.get(id).cloned());
            (player, squad)
        };

        if let Some(squad) = squad {
            if let Some((connected, last_seen)) = squad.lock().await.liveness(conn_id) {
                player.connected = connected;
                player.last_seen = last_seen;
            }
        }
        Some(player)
    }

    pub async fn player_count(&self) -> usize {
        self.state.read().await.players.len()
    }

    /// The squad a registered player belongs to. The registry lock is
    /// released before returning so the caller can lock the squad.
    async fn squad_of(&self, conn_id: &str) -> Result<(String, SharedSquad), GameError> {
        let state = self.state.read().await;
        let player = state
            .players
            .get(conn_id)
            .ok_or_else(|| GameError::not_found(format!("{conn_id} is not registered")))?;
        let squad_id = player
            .squad_id
            .clone()
            .ok_or_else(|| GameError::precondition("player is not in a squad"))?;
        let squad = state
            .squads
            .get(&squad_id)
            .cloned()
            .ok_or_else(|| GameError::not_found(format!("unknown squad {squad_id}")))?;
        Ok((squad_id, squad))
    }

    // ------------------------------------------------------------------
    // Chain phase
    // ------------------------------------------------------------------

    pub async fn request_target(&self, conn_id: &str) -> Option<TargetInfo> {
        let (_, squad) = self.squad_of(conn_id).await.ok()?;
        let squad = squad.lock().await;
        squad.target_info(conn_id)
    }

    #[instrument(skip(self))]
    pub async fn handle_scan(
        &self,
        scanner_id: &str,
        target_id: &str,
    ) -> Result<Outcome<ScanResult>, GameError> {
        let (squad_id, squad) = self.squad_of(scanner_id).await?;
        let mut squad = squad.lock().await;

        let loop_complete = squad.record_scan(scanner_id, target_id)?;

        let mut events = vec![
            Outbound::to_squad(
                &squad_id,
                GameEvent::ScanComplete {
                    scanner_id: scanner_id.to_string(),
                },
            ),
            Outbound::to_moderators(GameEvent::ScanRecorded {
                squad_id: squad_id.clone(),
                scanner_id: scanner_id.to_string(),
            }),
        ];

        if loop_complete {
            self.loop_closed(&mut squad, &mut events)?;
        }

        Ok(Outcome::new(
            ScanResult {
                loop_complete,
                squad_id,
            },
            events,
        ))
    }

    // ------------------------------------------------------------------
    // Heist minigames
    // ------------------------------------------------------------------

    pub async fn squad_info(&self, conn_id: &str) -> Result<SquadInfo, GameError> {
        let (squad_id, squad) = self.squad_of(conn_id).await?;
        let squad = squad.lock().await;
        Ok(SquadInfo {
            squad_id,
            team_size: squad.size(),
            max_tries: squad.max_tries(),
            code_length: squad.code_length(),
        })
    }

    pub async fn clue(&self, conn_id: &str) -> Result<String, GameError> {
        let (_, squad) = self.squad_of(conn_id).await?;
        let squad = squad.lock().await;
        squad.clue_for(conn_id).map(str::to_string)
    }

    pub async fn submit_minigame_state(
        &self,
        conn_id: &str,
        state: serde_json::Value,
    ) -> Result<(), GameError> {
        let (_, squad) = self.squad_of(conn_id).await?;
        let mut squad = squad.lock().await;
        squad.record_minigame_state(conn_id, state)
    }

    #[instrument(skip(self))]
    pub async fn handle_signal_jammer_guess(
        &self,
        conn_id: &str,
        symbol_index: u8,
    ) -> Result<Outcome<GuessResult>, GameError> {
        let (squad_id, squad) = self.squad_of(conn_id).await?;
        let mut squad = squad.lock().await;

        let outcome = squad.guess_signal_jammer(symbol_index)?;
        let event = match outcome {
            GuessOutcome::Correct => Outbound::to_squad(
                &squad_id,
                GameEvent::MinigameSuccess {
                    game: Minigame::SignalJammer,
                },
            ),
            _ => Outbound::to_moderators(GameEvent::SquadError {
                squad_id: squad_id.clone(),
            }),
        };

        Ok(Outcome::new(
            GuessResult {
                squad_id,
                outcome,
                squad_progress: squad.progress(),
            },
            vec![event],
        ))
    }

    #[instrument(skip(self))]
    pub async fn handle_tumbler_state(
        &self,
        conn_id: &str,
        at_sweet_spot: bool,
    ) -> Result<Outcome<TumblerStatus>, GameError> {
        let (squad_id, squad) = self.squad_of(conn_id).await?;
        let mut squad = squad.lock().await;

        let progress = squad.report_tumbler(conn_id, at_sweet_spot, Instant::now())?;
        let status = TumblerStatus {
            squad_id: squad_id.clone(),
            synced: progress.synced,
            sync_time: progress.sync_time.as_secs_f64(),
            players_ready: progress.players_ready,
            total_players: progress.total_players,
            complete: progress.cracked,
        };

        let mut events = vec![Outbound::to_squad(
            &squad_id,
            GameEvent::TumblerSync {
                synced: status.synced,
                sync_time: status.sync_time,
                players_ready: status.players_ready,
                total_players: status.total_players,
            },
        )];

        if progress.cracked {
            info!(squad_id = %squad_id, "Vault cracked, moving to getaway");
            self.advance_locked(&mut squad, SquadPhase::Getaway, &mut events)?;
        }

        Ok(Outcome::new(status, events))
    }

    pub async fn request_fragment(&self, conn_id: &str) -> Result<Fragment, GameError> {
        let (squad_id, squad) = self.squad_of(conn_id).await?;
        let fragment = squad.lock().await.request_fragment(conn_id)?;
        debug!(
            squad_id = %squad_id,
            player_id = %conn_id,
            position = fragment.position,
            "Fragment assigned"
        );
        Ok(fragment)
    }

    #[instrument(skip(self, code))]
    pub async fn verify_getaway_code(
        &self,
        conn_id: &str,
        code: &str,
    ) -> Result<Outcome<bool>, GameError> {
        let (_, squad) = self.squad_of(conn_id).await?;
        let mut squad = squad.lock().await;

        if !squad.verify_code(code)? {
            return Ok(Outcome::quiet(false));
        }

        let mut events = Vec::new();
        self.advance_locked(&mut squad, SquadPhase::Complete, &mut events)?;
        Ok(Outcome::new(true, events))
    }

    // ------------------------------------------------------------------
    // Liveness sweep
    // ------------------------------------------------------------------

    /// Auto-resolve the outstanding chain scan of every player whose last
    /// heartbeat is older than `grace`. A timed-out player counts as having
    /// found their target.
    #[instrument(skip(self))]
    pub async fn check_timeouts(
        &self,
        grace: Duration,
    ) -> Outcome<Vec<AutoResolution>> {
        let now = Instant::now();
        let squads = self.state.read().await.ordered_squads();

        let mut resolutions = Vec::new();
        let mut events = Vec::new();

        for (squad_id, squad) in squads {
            let mut squad = squad.lock().await;
            let timed_out = squad.check_timeouts(now, grace);

            for player_id in timed_out {
                if squad.phase() != SquadPhase::Chain || squad.has_scanned(&player_id) {
                    continue;
                }

                let loop_complete = match squad.auto_resolve(&player_id) {
                    Ok(loop_complete) => loop_complete,
                    Err(e) => {
                        warn!(
                            squad_id = %squad_id,
                            player_id = %player_id,
                            error = %e,
                            "Failed to auto-resolve scan"
                        );
                        continue;
                    }
                };

                info!(squad_id = %squad_id, player_id = %player_id, "Scan auto-resolved");
                events.push(Outbound::to_squad(
                    &squad_id,
                    GameEvent::AutoResolved {
                        player_id: player_id.clone(),
                    },
                ));
                events.push(Outbound::to_moderators(GameEvent::ScanRecorded {
                    squad_id: squad_id.clone(),
                    scanner_id: player_id.clone(),
                }));

                if loop_complete {
                    if let Err(e) = self.loop_closed(&mut squad, &mut events) {
                        warn!(squad_id = %squad_id, error = %e, "Failed to advance squad");
                    }
                }

                resolutions.push(AutoResolution {
                    squad_id: squad_id.clone(),
                    player_id,
                    loop_complete,
                });
            }
        }

        Outcome::new(resolutions, events)
    }

    // ------------------------------------------------------------------
    // Moderator view
    // ------------------------------------------------------------------

    pub async fn snapshot(&self) -> GameSnapshot {
        let state = self.state.read().await;
        let mut squads = Vec::with_capacity(state.squad_order.len());
        for (_, squad) in state.ordered_squads() {
            squads.push(squad.lock().await.status());
        }

        GameSnapshot {
            phase: state.phase,
            player_count: state.players.len(),
            max_players: self.config.max_players,
            squad_count: state.squads.len(),
            team_size: state.squad_size,
            drawings: state.submissions.clone(),
            squads,
        }
    }

    /// Clear every player and squad and return to the start phase
    #[instrument(skip(self))]
    pub async fn reset_game(&self) -> Outcome<()> {
        let mut state = self.state.write().await;
        let squad_size = self
            .config
            .default_squad_size
            .clamp(MIN_SQUAD_SIZE, MAX_SQUAD_SIZE);
        *state = SessionState::new(squad_size, state.next_squad_number);
        self.finished_squads.store(0, Ordering::SeqCst);

        info!("Game reset");
        Outcome::new((), vec![Outbound::to_everyone(GameEvent::GameReset)])
    }
}

impl Default for SessionCoordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}
