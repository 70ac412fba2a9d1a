use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::errors::GameError;

/// Symbols on the jammer grid (3x3)
pub const SYMBOL_COUNT: u8 = 9;

/// Larger squads get fewer tries: 10 for a pair, never fewer than 3
pub fn max_tries(team_size: usize) -> usize {
    12usize.saturating_sub(team_size).max(3)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GuessOutcome {
    Correct,
    WrongSymbol { tries_left: usize, max_tries: usize },
    MaxTriesExceeded { max_tries: usize, guesses: usize },
}

/// Shared guessing state for one squad. Wrong guesses are counted for the
/// whole squad, not per player.
#[derive(Debug, Clone)]
pub struct SignalJammer {
    secret: u8,
    wrong_guesses: usize,
    solved: bool,
}

impl SignalJammer {
    pub fn new(secret: u8) -> Self {
        Self {
            secret: secret % SYMBOL_COUNT,
            wrong_guesses: 0,
            solved: false,
        }
    }

    pub fn random() -> Self {
        Self::new(rand::rng().random_range(0..SYMBOL_COUNT))
    }

    pub fn can_guess(&self, max_tries: usize) -> bool {
        self.wrong_guesses < max_tries
    }

    pub fn guess(&mut self, symbol_index: u8, max_tries: usize) -> Result<GuessOutcome, GameError> {
        if symbol_index >= SYMBOL_COUNT {
            return Err(GameError::validation(format!(
                "symbol index {symbol_index} is outside 0..{SYMBOL_COUNT}"
            )));
        }

        if self.solved {
            return Err(GameError::precondition("signal jammer already solved"));
        }

        if !self.can_guess(max_tries) {
            return Ok(GuessOutcome::MaxTriesExceeded {
                max_tries,
                guesses: self.wrong_guesses,
            });
        }

        if symbol_index == self.secret {
            self.solved = true;
            return Ok(GuessOutcome::Correct);
        }

        self.wrong_guesses += 1;
        Ok(GuessOutcome::WrongSymbol {
            tries_left: max_tries - self.wrong_guesses,
            max_tries,
        })
    }

    pub fn secret(&self) -> u8 {
        self.secret
    }

    pub fn wrong_guesses(&self) -> usize {
        self.wrong_guesses
    }

    #[cfg(test)]
    pub fn is_solved(&self) -> bool {
        self.solved
    }
}
