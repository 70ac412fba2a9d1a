use std::collections::HashSet;

use crate::game::{errors::GameError, player::ConnId};

/// Circular chain of custody inside one squad
///
/// Each member must find the next member in the shuffled roster order; the
/// last member's target wraps around to the first. Edges can be resolved in
/// any order and the loop closes when the last outstanding edge is resolved.
#[derive(Debug, Clone)]
pub struct ScanChain {
    order: Vec<ConnId>,
    resolved: HashSet<ConnId>,
}

impl ScanChain {
    pub fn new(order: Vec<ConnId>) -> Self {
        Self {
            order,
            resolved: HashSet::new(),
        }
    }

    fn position(&self, player_id: &str) -> Option<usize> {
        self.order.iter().position(|id| id == player_id)
    }

    /// The member `player_id` has to scan
    pub fn target_of(&self, player_id: &str) -> Option<&ConnId> {
        let index = self.position(player_id)?;
        self.order.get((index + 1) % self.order.len())
    }

    /// Resolve the scanner's edge. Rejections leave the chain untouched.
    pub fn record(&mut self, scanner_id: &str, target_id: &str) -> Result<(), GameError> {
        let expected = self
            .target_of(scanner_id)
            .ok_or_else(|| GameError::not_found(format!("{scanner_id} is not in this chain")))?;

        if self.resolved.contains(scanner_id) {
            return Err(GameError::precondition("scan already recorded"));
        }

        if expected != target_id {
            return Err(GameError::validation("invalid target"));
        }

        self.resolved.insert(scanner_id.to_string());
        Ok(())
    }

    pub fn is_resolved(&self, player_id: &str) -> bool {
        self.resolved.contains(player_id)
    }

    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_complete(&self) -> bool {
        !self.order.is_empty() && self.order.iter().all(|id| self.resolved.contains(id))
    }
}
