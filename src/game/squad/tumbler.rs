use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use crate::game::player::ConnId;

/// Reports older than this no longer count; the sender is treated as inactive
pub const REPORT_TTL: Duration = Duration::from_secs(2);

/// How long every member must hold the sweet spot without a break
pub const HOLD_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy)]
struct Report {
    at_sweet_spot: bool,
    at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TumblerProgress {
    pub synced: bool,
    pub sync_time: Duration,
    pub players_ready: usize,
    pub total_players: usize,
    pub cracked: bool,
}

/// Synchronized hold for one squad
///
/// The squad is synced while the number of fresh reports covers every
/// connected member and every fresh report is at the sweet spot. The first
/// synced report latches a start time; any unsynced report clears it.
#[derive(Debug, Clone, Default)]
pub struct Tumbler {
    reports: HashMap<ConnId, Report>,
    sync_start: Option<Instant>,
}

impl Tumbler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(
        &mut self,
        player_id: &str,
        at_sweet_spot: bool,
        now: Instant,
        connected_members: usize,
    ) -> TumblerProgress {
        let report = Report { at_sweet_spot, at: now };
        match self.reports.get(player_id) {
            Some(existing) if existing.at > now => {}
            _ => {
                self.reports.insert(player_id.to_string(), report);
            }
        }

        self.reports
            .retain(|_, r| now.saturating_duration_since(r.at) <= REPORT_TTL);

        let active = self.reports.len();
        let players_ready = self.reports.values().filter(|r| r.at_sweet_spot).count();
        let all_synced = active > 0 && active >= connected_members && players_ready == active;

        if !all_synced {
            if self.sync_start.take().is_some() {
                debug!(player_id = %player_id, "Tumbler sync broken");
            }
            return TumblerProgress {
                synced: false,
                sync_time: Duration::ZERO,
                players_ready,
                total_players: connected_members,
                cracked: false,
            };
        }

        let started = *self.sync_start.get_or_insert(now);
        let held = now.saturating_duration_since(started);

        if held >= HOLD_DURATION {
            self.reset();
            return TumblerProgress {
                synced: true,
                sync_time: HOLD_DURATION,
                players_ready,
                total_players: connected_members,
                cracked: true,
            };
        }

        TumblerProgress {
            synced: true,
            sync_time: held,
            players_ready,
            total_players: connected_members,
            cracked: false,
        }
    }

    #[cfg(test)]
    pub fn is_holding(&self) -> bool {
        self.sync_start.is_some()
    }

    pub fn reset(&mut self) {
        self.reports.clear();
        self.sync_start = None;
    }
}
