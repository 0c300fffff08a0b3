//! Pending triggered abilities.
//!
//! Whatever detects a trigger event queues an entry here. The game loop takes
//! the whole queue before a player would receive priority and puts the entries
//! on the stack in APNAP order.

use crate::effect::EffectExecutor;
use crate::ids::{ObjectId, PlayerId};

/// A triggered ability waiting to be put on the stack.
#[derive(Debug, Clone)]
pub struct TriggeredAbilityEntry {
    pub source: Option<ObjectId>,
    pub controller: PlayerId,
    pub effect: Box<dyn EffectExecutor>,
}

impl TriggeredAbilityEntry {
    pub fn new(
        source: Option<ObjectId>,
        controller: PlayerId,
        effect: Box<dyn EffectExecutor>,
    ) -> Self {
        Self {
            source,
            controller,
            effect,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TriggerQueue {
    entries: Vec<TriggeredAbilityEntry>,
}

impl TriggerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: TriggeredAbilityEntry) {
        self.entries.push(entry);
    }

    /// Drains the queue in the order entries were added.
    pub fn take_all(&mut self) -> Vec<TriggeredAbilityEntry> {
        std::mem::take(&mut self.entries)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
