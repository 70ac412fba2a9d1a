use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Session-wide phase, driven by the moderator
///
/// `Start`, `Tutorial` and `Lobby` precede squad formation. Entering `Chain`
/// forms the squads; from then on each squad also tracks its own `SquadPhase`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Start,
    Tutorial,
    Lobby,
    Chain,
    Heist,
    Getaway,
    Complete,
}

impl GamePhase {
    /// Whether squads have not been formed yet in this phase
    pub fn precedes_formation(&self) -> bool {
        *self < GamePhase::Chain
    }
}

/// Per-squad phase. Only ever moves forward, one step at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SquadPhase {
    Forming,
    Chain,
    Heist,
    Getaway,
    Complete,
}

impl SquadPhase {
    /// The phase that directly follows this one, if any
    pub fn next(&self) -> Option<SquadPhase> {
        SquadPhase::iter().skip_while(|p| p != self).nth(1)
    }
}

/// Cooperative minigames played during the heist, in order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Minigame {
    SignalJammer,
    Tumbler,
    Getaway,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_squad_phase_order() {
        assert_eq!(SquadPhase::Forming.next(), Some(SquadPhase::Chain));
        assert_eq!(SquadPhase::Chain.next(), Some(SquadPhase::Heist));
        assert_eq!(SquadPhase::Heist.next(), Some(SquadPhase::Getaway));
        assert_eq!(SquadPhase::Getaway.next(), Some(SquadPhase::Complete));
        assert_eq!(SquadPhase::Complete.next(), None);
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(GamePhase::from_str("chain").unwrap(), GamePhase::Chain);
        assert_eq!(GamePhase::Tutorial.to_string(), "tutorial");
        assert_eq!(Minigame::SignalJammer.to_string(), "signal_jammer");
        assert_eq!(
            serde_json::to_string(&SquadPhase::Getaway).unwrap(),
            "\"getaway\""
        );
        assert!(GamePhase::from_str("intermission").is_err());
    }

    #[test]
    fn test_formation_window() {
        assert!(GamePhase::Start.precedes_formation());
        assert!(GamePhase::Lobby.precedes_formation());
        assert!(!GamePhase::Chain.precedes_formation());
        assert!(!GamePhase::Complete.precedes_formation());
    }
}
