// Public API
pub use chain::ScanChain;
pub use getaway::{Fragment, GetawayCode};
pub use signal_jammer::{max_tries, GuessOutcome, SignalJammer, SYMBOL_COUNT};
pub use tumbler::{Tumbler, TumblerProgress, HOLD_DURATION, REPORT_TTL};

// Internal modules
mod chain;
mod getaway;
mod signal_jammer;
mod tumbler;

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use super::{
    errors::GameError,
    phase::{Minigame, SquadPhase},
    player::{ConnId, Player},
    snapshot::SquadStatus,
};

/// Progress awarded for each cleared minigame
pub const PROGRESS_STEP: u32 = 25;
pub const PROGRESS_COMPLETE: u32 = 100;

const CLUES: [&str; 5] = [
    "It is NOT in the first row",
    "It is NOT in the first column",
    "It is NOT red",
    "It is in the center area",
    "It has a sharp angle",
];

/// A roster slot. Slots are never removed; a departed player leaves a
/// vacant slot whose chain edge is resolved by the timeout sweeper.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: ConnId,
    pub identifying_info: String,
    pub tell: String,
    pub prompt: String,
    pub connected: bool,
    pub departed: bool,
    pub last_seen: Instant,
}

impl Member {
    fn from_player(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            identifying_info: player.identifying_info.clone(),
            tell: player.tell.clone(),
            prompt: player.prompt.clone(),
            connected: player.connected,
            departed: false,
            last_seen: player.last_seen,
        }
    }

    fn is_active(&self) -> bool {
        self.connected && !self.departed
    }
}

/// What a scanner is told about the member they are looking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    pub identifying_info: String,
    pub tell: String,
    pub prompt: String,
}

/// One team: its roster, scan chain, minigame state and phase
///
/// A squad never changes phase on its own. Operations report milestones
/// (loop complete, vault cracked, code verified) and the coordinator calls
/// [`Squad::advance`], which re-checks the milestone before moving.
#[derive(Debug)]
pub struct Squad {
    id: String,
    size: usize,
    roster: Vec<Member>,
    phase: SquadPhase,
    minigame: Option<Minigame>,
    chain: ScanChain,
    signal_jammer: Option<SignalJammer>,
    tumbler: Tumbler,
    getaway: Option<GetawayCode>,
    progress: u32,
    vault_cracked: bool,
    code_verified: bool,
    finish_rank: Option<u32>,
    minigame_states: HashMap<ConnId, serde_json::Value>,
}

impl Squad {
    pub fn new(id: String, size: usize) -> Self {
        Self {
            id,
            size,
            roster: Vec::with_capacity(size),
            phase: SquadPhase::Forming,
            minigame: None,
            chain: ScanChain::new(Vec::new()),
            signal_jammer: None,
            tumbler: Tumbler::new(),
            getaway: None,
            progress: 0,
            vault_cracked: false,
            code_verified: false,
            finish_rank: None,
            minigame_states: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn phase(&self) -> SquadPhase {
        self.phase
    }

    pub fn minigame(&self) -> Option<Minigame> {
        self.minigame
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn finish_rank(&self) -> Option<u32> {
        self.finish_rank
    }

    pub fn set_finish_rank(&mut self, rank: u32) {
        if self.finish_rank.is_none() {
            self.finish_rank = Some(rank);
        }
    }

    /// Roster ids in chain order, including vacant slots
    pub fn member_ids(&self) -> Vec<ConnId> {
        self.roster.iter().map(|m| m.id.clone()).collect()
    }

    pub fn has_member(&self, player_id: &str) -> bool {
        self.member(player_id).is_some()
    }

    fn member(&self, player_id: &str) -> Option<&Member> {
        self.roster.iter().find(|m| m.id == player_id)
    }

    fn member_mut(&mut self, player_id: &str) -> Option<&mut Member> {
        self.roster.iter_mut().find(|m| m.id == player_id)
    }

    fn require_member(&self, player_id: &str) -> Result<&Member, GameError> {
        self.member(player_id).ok_or_else(|| {
            GameError::not_found(format!("{player_id} is not a member of {}", self.id))
        })
    }

    pub fn connected_count(&self) -> usize {
        self.roster.iter().filter(|m| m.is_active()).count()
    }

    pub fn add_member(&mut self, player: &Player) -> Result<(), GameError> {
        if self.phase != SquadPhase::Forming {
            return Err(GameError::precondition("squad roster is locked"));
        }
        if self.roster.len() >= self.size {
            return Err(GameError::precondition("squad roster is full"));
        }
        if self.has_member(&player.id) {
            return Err(GameError::validation(format!(
                "{} is already in {}",
                player.id, self.id
            )));
        }

        self.roster.push(Member::from_player(player));
        Ok(())
    }

    /// Forward-only, one-step transition guarded by the milestone of the target phase
    pub fn advance(&mut self, phase: SquadPhase) -> Result<(), GameError> {
        self.transition(phase, true)
    }

    /// Moderator override: still forward-only and still needs a full roster,
    /// but does not wait for the squad's own milestone
    pub fn force_advance(&mut self, phase: SquadPhase) -> Result<(), GameError> {
        self.transition(phase, false)
    }

    fn transition(&mut self, phase: SquadPhase, check_milestone: bool) -> Result<(), GameError> {
        if self.phase.next() != Some(phase) {
            return Err(GameError::precondition(format!(
                "{} cannot move from {} to {}",
                self.id, self.phase, phase
            )));
        }

        match phase {
            SquadPhase::Forming => {}
            SquadPhase::Chain => {
                if self.roster.len() != self.size {
                    return Err(GameError::precondition(format!(
                        "{} has {} of {} members",
                        self.id,
                        self.roster.len(),
                        self.size
                    )));
                }
                self.chain = ScanChain::new(self.member_ids());
            }
            SquadPhase::Heist => {
                if check_milestone && !self.is_loop_complete() {
                    return Err(GameError::precondition("scan loop is not complete"));
                }
                self.enter_heist();
            }
            SquadPhase::Getaway => {
                if check_milestone && !self.vault_cracked {
                    return Err(GameError::precondition("vault has not been cracked"));
                }
                self.tumbler.reset();
                self.minigame = Some(Minigame::Getaway);
            }
            SquadPhase::Complete => {
                if check_milestone && !self.code_verified {
                    return Err(GameError::precondition("getaway code not verified"));
                }
                self.progress = PROGRESS_COMPLETE;
            }
        }

        info!(squad_id = %self.id, from = %self.phase, to = %phase, "Squad advanced");
        self.phase = phase;
        Ok(())
    }

    fn enter_heist(&mut self) {
        self.signal_jammer = Some(SignalJammer::random());
        self.getaway = Some(GetawayCode::generate(self.size));
        self.tumbler.reset();
        self.minigame = Some(Minigame::SignalJammer);
    }

    // ------------------------------------------------------------------
    // Scan chain
    // ------------------------------------------------------------------

    pub fn target_of(&self, player_id: &str) -> Option<&ConnId> {
        self.chain.target_of(player_id)
    }

    pub fn target_info(&self, player_id: &str) -> Option<TargetInfo> {
        let target_id = self.chain.target_of(player_id)?;
        let target = self.member(target_id)?;
        Some(TargetInfo {
            identifying_info: target.identifying_info.clone(),
            tell: target.tell.clone(),
            prompt: target.prompt.clone(),
        })
    }

    /// Returns whether the loop is complete after this scan
    pub fn record_scan(&mut self, scanner_id: &str, target_id: &str) -> Result<bool, GameError> {
        if self.phase != SquadPhase::Chain {
            return Err(GameError::precondition(format!(
                "{} is not in the chain phase",
                self.id
            )));
        }

        self.chain.record(scanner_id, target_id)?;
        debug!(squad_id = %self.id, scanner_id = %scanner_id, "Scan recorded");
        Ok(self.chain.is_complete())
    }

    pub fn has_scanned(&self, player_id: &str) -> bool {
        self.chain.is_resolved(player_id)
    }

    pub fn is_loop_complete(&self) -> bool {
        self.chain.is_complete()
    }

    /// Resolve a member's outstanding scan against their assigned target
    pub fn auto_resolve(&mut self, player_id: &str) -> Result<bool, GameError> {
        let target = self
            .chain
            .target_of(player_id)
            .cloned()
            .ok_or_else(|| GameError::not_found(format!("{player_id} has no target")))?;
        self.record_scan(player_id, &target)
    }

    // ------------------------------------------------------------------
    // Liveness
    // ------------------------------------------------------------------

    pub fn handle_reconnect(&mut self, player_id: &str, now: Instant) {
        if let Some(member) = self.member_mut(player_id) {
            if !member.departed {
                member.connected = true;
                member.last_seen = now;
            }
        }
    }

    /// Whether a member is connected, and when they were last heard from
    pub fn liveness(&self, player_id: &str) -> Option<(bool, Instant)> {
        self.member(player_id)
            .map(|m| (m.is_active(), m.last_seen))
    }

    /// Vacate a slot. The roster keeps its size.
    pub fn release_member(&mut self, player_id: &str) {
        if let Some(member) = self.member_mut(player_id) {
            member.departed = true;
            member.connected = false;
        }
        self.minigame_states.remove(player_id);
    }

    /// Members whose last heartbeat is older than `grace`. They are marked
    /// disconnected as a side effect.
    pub fn check_timeouts(&mut self, now: Instant, grace: Duration) -> Vec<ConnId> {
        let mut timed_out = Vec::new();
        for member in self.roster.iter_mut() {
            if now.saturating_duration_since(member.last_seen) > grace {
                member.connected = false;
                timed_out.push(member.id.clone());
            }
        }
        timed_out
    }

    // ------------------------------------------------------------------
    // Minigames
    // ------------------------------------------------------------------

    fn require_minigame(&self, game: Minigame) -> Result<(), GameError> {
        if self.phase != SquadPhase::Heist || self.minigame != Some(game) {
            return Err(GameError::precondition(format!(
                "{} is not playing {}",
                self.id, game
            )));
        }
        Ok(())
    }

    pub fn max_tries(&self) -> usize {
        max_tries(self.size)
    }

    pub fn can_guess_signal_jammer(&self, max_tries: usize) -> bool {
        self.signal_jammer
            .as_ref()
            .is_some_and(|jammer| jammer.can_guess(max_tries))
    }

    pub fn guess_signal_jammer(&mut self, symbol_index: u8) -> Result<GuessOutcome, GameError> {
        self.require_minigame(Minigame::SignalJammer)?;
        let max_tries = self.max_tries();
        let jammer = self
            .signal_jammer
            .as_mut()
            .ok_or_else(|| GameError::precondition("signal jammer not armed"))?;

        let outcome = jammer.guess(symbol_index, max_tries)?;
        if outcome == GuessOutcome::Correct {
            self.progress += PROGRESS_STEP;
            self.minigame = Some(Minigame::Tumbler);
            info!(squad_id = %self.id, "Signal jammer cracked");
        }
        Ok(outcome)
    }

    pub fn report_tumbler(
        &mut self,
        player_id: &str,
        at_sweet_spot: bool,
        now: Instant,
    ) -> Result<TumblerProgress, GameError> {
        self.require_member(player_id)?;
        self.require_minigame(Minigame::Tumbler)?;

        let connected = self.connected_count();
        let progress = self
            .tumbler
            .report(player_id, at_sweet_spot, now, connected);

        if progress.cracked {
            self.vault_cracked = true;
            self.progress += PROGRESS_STEP;
            info!(squad_id = %self.id, "Vault cracked");
        }
        Ok(progress)
    }

    pub fn request_fragment(&mut self, player_id: &str) -> Result<Fragment, GameError> {
        self.require_member(player_id)?;
        self.getaway
            .as_mut()
            .and_then(|code| code.fragment_for(player_id))
            .ok_or_else(|| GameError::precondition("getaway code not issued yet"))
    }

    pub fn code_length(&self) -> usize {
        self.size * getaway::CHARS_PER_MEMBER
    }

    /// Returns whether the submitted code is correct
    pub fn verify_code(&mut self, code: &str) -> Result<bool, GameError> {
        if self.phase != SquadPhase::Getaway {
            return Err(GameError::precondition(format!(
                "{} is not in the getaway phase",
                self.id
            )));
        }

        let correct = self.getaway.as_ref().is_some_and(|g| g.matches(code));
        if correct {
            self.code_verified = true;
        }
        Ok(correct)
    }

    pub fn clue_for(&self, player_id: &str) -> Result<&'static str, GameError> {
        let index = self
            .roster
            .iter()
            .position(|m| m.id == player_id)
            .ok_or_else(|| GameError::not_found(format!("{player_id} is not in {}", self.id)))?;
        Ok(CLUES[index % CLUES.len()])
    }

    pub fn record_minigame_state(
        &mut self,
        player_id: &str,
        state: serde_json::Value,
    ) -> Result<(), GameError> {
        self.require_member(player_id)?;
        self.minigame_states.insert(player_id.to_string(), state);
        Ok(())
    }

    pub fn minigame_state(&self, player_id: &str) -> Option<&serde_json::Value> {
        self.minigame_states.get(player_id)
    }

    /// Secret signal-jammer symbol, once armed
    pub fn secret_index(&self) -> Option<u8> {
        self.signal_jammer.as_ref().map(|j| j.secret())
    }

    /// Full getaway code, once issued
    pub fn getaway_code(&self) -> Option<String> {
        self.getaway.as_ref().map(|g| g.code())
    }

    pub fn status(&self) -> SquadStatus {
        SquadStatus {
            id: self.id.clone(),
            phase: self.phase,
            minigame: self.minigame,
            members: self.roster.len(),
            connected: self.connected_count(),
            scans_completed: self.chain.resolved_count(),
            loop_complete: self.chain.is_complete(),
            progress: self.progress,
            wrong_guesses: self
                .signal_jammer
                .as_ref()
                .map_or(0, |j| j.wrong_guesses()),
            max_tries: self.max_tries(),
            finish_rank: self.finish_rank,
        }
    }
}
