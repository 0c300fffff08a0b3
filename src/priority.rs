//! Priority arbiter.
//!
//! One algorithm for any player count. The pass-set is cleared on every
//! explicit `set`; once every player in the game has passed in succession the
//! arbiter holds no one and reports ready.

use std::fmt;

use crate::ids::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityError {
    /// `player` tried to pass while `holder` had priority.
    NotPriorityHolder {
        player: PlayerId,
        holder: Option<PlayerId>,
    },
}

impl fmt::Display for PriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityError::NotPriorityHolder { player, holder } => match holder {
                Some(holder) => write!(f, "{} passed but {} holds priority", player, holder),
                None => write!(f, "{} passed but no one holds priority", player),
            },
        }
    }
}

impl std::error::Error for PriorityError {}

/// Result of passing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Priority moved to `next`.
    Passed { next: PlayerId },
    /// Every player has passed in succession.
    AllPassed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityArbiter {
    holder: Option<PlayerId>,
    passed: Vec<PlayerId>,
    all_passed: bool,
}

impl PriorityArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives priority to `player` and forgets earlier passes.
    pub fn set(&mut self, player: PlayerId) {
        self.holder = Some(player);
        self.passed.clear();
        self.all_passed = false;
    }

    /// No one holds priority and nothing is pending (no-priority steps).
    pub fn clear(&mut self) {
        self.holder = None;
        self.passed.clear();
        self.all_passed = false;
    }

    pub fn holder(&self) -> Option<PlayerId> {
        self.holder
    }

    pub fn has_priority(&self, player: PlayerId) -> bool {
        self.holder == Some(player)
    }

    /// Players who have passed since the last `set`, in pass order.
    pub fn passed(&self) -> &[PlayerId] {
        &self.passed
    }

    /// `players` is the turn order of players still in the game.
    pub fn pass(
        &mut self,
        player: PlayerId,
        players: &[PlayerId],
    ) -> Result<PassOutcome, PriorityError> {
        if self.holder != Some(player) {
            return Err(PriorityError::NotPriorityHolder {
                player,
                holder: self.holder,
            });
        }
        if !self.passed.contains(&player) {
            self.passed.push(player);
        }

        if players.iter().all(|p| self.passed.contains(p)) {
            self.holder = None;
            self.all_passed = true;
            return Ok(PassOutcome::AllPassed);
        }

        let start = players.iter().position(|&p| p == player).unwrap_or(0);
        let next = (1..=players.len())
            .map(|offset| players[(start + offset) % players.len()])
            .find(|p| !self.passed.contains(p));
        match next {
            Some(next) => {
                self.holder = Some(next);
                Ok(PassOutcome::Passed { next })
            }
            None => {
                self.holder = None;
                self.all_passed = true;
                Ok(PassOutcome::AllPassed)
            }
        }
    }

    /// True exactly when no one holds priority because everyone passed.
    pub fn ready_to_resolve_or_advance(&self) -> bool {
        self.holder.is_none() && self.all_passed
    }
}
