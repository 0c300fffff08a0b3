//! The resolution stack.
//!
//! The stack is a zone plus the per-entry data needed to resolve it. The zone
//! order (index 0 on top) is authoritative; `entries` is keyed by object id.

use std::collections::HashMap;

use crate::effect::{Choices, EffectExecutor};
use crate::ids::{CardId, ObjectId, PlayerId};
use crate::zone::{Zone, ZoneId, ZonePosition};

/// One object on the stack.
#[derive(Debug, Clone)]
pub enum StackEntry {
    /// A cast card. It moves to another zone when it resolves.
    Spell {
        id: ObjectId,
        card: CardId,
        controller: PlayerId,
        choices: Choices,
    },
    /// An activated or triggered ability. It ceases to exist when it resolves.
    Ability {
        id: ObjectId,
        source: Option<ObjectId>,
        controller: PlayerId,
        effect: Box<dyn EffectExecutor>,
        choices: Choices,
    },
}

impl StackEntry {
    pub fn id(&self) -> ObjectId {
        match self {
            StackEntry::Spell { id, .. } | StackEntry::Ability { id, .. } => *id,
        }
    }

    pub fn controller(&self) -> PlayerId {
        match self {
            StackEntry::Spell { controller, .. } | StackEntry::Ability { controller, .. } => {
                *controller
            }
        }
    }

    pub fn choices(&self) -> &Choices {
        match self {
            StackEntry::Spell { choices, .. } | StackEntry::Ability { choices, .. } => choices,
        }
    }

    pub fn is_spell(&self) -> bool {
        matches!(self, StackEntry::Spell { .. })
    }

    pub fn is_ability(&self) -> bool {
        matches!(self, StackEntry::Ability { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ResolutionStack {
    zone: Zone,
    entries: HashMap<ObjectId, StackEntry>,
}

impl Default for ResolutionStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self {
            zone: Zone::new(ZoneId::stack()),
            entries: HashMap::new(),
        }
    }

    /// Puts an entry on top.
    pub fn push(&mut self, entry: StackEntry) {
        let id = entry.id();
        self.zone.add(id, Some(ZonePosition::Top));
        self.entries.insert(id, entry);
    }

    /// Removes and returns the top entry (last in, first out).
    pub fn pop(&mut self) -> Option<StackEntry> {
        let id = self.zone.draw_top()?;
        self.entries.remove(&id)
    }

    pub fn peek(&self) -> Option<&StackEntry> {
        self.zone.top().and_then(|id| self.entries.get(&id))
    }

    pub fn get(&self, id: ObjectId) -> Option<&StackEntry> {
        self.entries.get(&id)
    }

    /// Removes an entry that is not necessarily on top (a countered spell).
    pub fn remove(&mut self, id: ObjectId) -> Option<StackEntry> {
        let entry = self.entries.remove(&id)?;
        self.zone.remove(id);
        Some(entry)
    }

    /// The stack as a zone.
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    /// Ids top first.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.zone.ids()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.zone.contains(id)
    }

    pub fn len(&self) -> usize {
        self.zone.count()
    }

    pub fn is_empty(&self) -> bool {
        self.zone.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::GainLifeEffect;

    fn spell(raw: u64) -> StackEntry {
        StackEntry::Spell {
            id: ObjectId::from_raw(raw),
            card: CardId::from_raw(1),
            controller: PlayerId::from_index(0),
            choices: Choices::default(),
        }
    }

    fn ability(raw: u64) -> StackEntry {
        StackEntry::Ability {
            id: ObjectId::from_raw(raw),
            source: None,
            controller: PlayerId::from_index(1),
            effect: Box::new(GainLifeEffect::you(1)),
            choices: Choices::default(),
        }
    }

    #[test]
    fn test_stack_is_last_in_first_out() {
        let mut stack = ResolutionStack::new();
        stack.push(spell(1));
        stack.push(ability(2));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek().map(|e| e.id()), Some(ObjectId::from_raw(2)));

        let first = stack.pop().unwrap();
        assert!(first.is_ability());
        assert_eq!(first.id(), ObjectId::from_raw(2));

        let second = stack.pop().unwrap();
        assert!(second.is_spell());
        assert_eq!(second.id(), ObjectId::from_raw(1));

        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_ids_are_top_first() {
        let mut stack = ResolutionStack::new();
        stack.push(spell(1));
        stack.push(spell(2));
        stack.push(ability(3));
        assert_eq!(
            stack.ids(),
            vec![
                ObjectId::from_raw(3),
                ObjectId::from_raw(2),
                ObjectId::from_raw(1)
            ]
        );
    }

    #[test]
    fn test_remove_from_middle() {
        let mut stack = ResolutionStack::new();
        stack.push(spell(1));
        stack.push(spell(2));
        stack.push(spell(3));

        let removed = stack.remove(ObjectId::from_raw(2)).unwrap();
        assert_eq!(removed.controller(), PlayerId::from_index(0));
        assert!(!stack.contains(ObjectId::from_raw(2)));
        assert_eq!(stack.pop().map(|e| e.id()), Some(ObjectId::from_raw(3)));
        assert_eq!(stack.pop().map(|e| e.id()), Some(ObjectId::from_raw(1)));
    }
}
