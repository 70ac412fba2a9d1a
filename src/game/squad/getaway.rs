use std::collections::HashMap;

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::game::player::ConnId;

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Characters of code per squad member
pub const CHARS_PER_MEMBER: usize = 2;

/// One character of the getaway code as shown to a single player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(rename = "char")]
    pub character: char,
    /// 1-based position in the code
    pub position: usize,
    pub code_length: usize,
}

/// The squad's getaway code and who has been shown which part of it
#[derive(Debug, Clone)]
pub struct GetawayCode {
    fragments: Vec<char>,
    assignments: HashMap<ConnId, usize>,
    next_position: usize,
}

impl GetawayCode {
    pub fn generate(team_size: usize) -> Self {
        let mut rng = rand::rng();
        let fragments = (0..team_size * CHARS_PER_MEMBER)
            .filter_map(|_| CODE_ALPHABET.choose(&mut rng).map(|b| *b as char))
            .collect();
        Self::from_fragments(fragments)
    }

    pub fn from_fragments(fragments: Vec<char>) -> Self {
        Self {
            fragments,
            assignments: HashMap::new(),
            next_position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Round-robin assignment, memoised per player
    pub fn fragment_for(&mut self, player_id: &str) -> Option<Fragment> {
        if self.fragments.is_empty() {
            return None;
        }

        let position = match self.assignments.get(player_id) {
            Some(position) => *position,
            None => {
                let position = self.next_position % self.fragments.len();
                self.next_position += 1;
                self.assignments.insert(player_id.to_string(), position);
                position
            }
        };

        Some(Fragment {
            character: self.fragments[position],
            position: position + 1,
            code_length: self.fragments.len(),
        })
    }

    pub fn code(&self) -> String {
        self.fragments.iter().collect()
    }

    /// Case-insensitive comparison against the full code
    pub fn matches(&self, submitted: &str) -> bool {
        !self.fragments.is_empty() && submitted.to_uppercase() == self.code()
    }
}
