//! Card database.
//!
//! Each card is defined in its own file under `definitions/`.

pub mod builders;
pub mod definitions;

pub use builders::CardDefinitionBuilder;
pub use definitions::*;

use std::collections::HashMap;
use std::sync::Arc;

use crate::ability::Ability;
use crate::card::Card;
use crate::effect::EffectExecutor;
use crate::ids::CardId;

/// A complete card definition: the printed card plus what it can do.
///
/// Immutable once registered; the game state shares it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CardDefinition {
    /// The static card data (name, types, P/T, etc.)
    pub card: Card,

    /// Activated abilities, in printed order.
    pub abilities: Vec<Box<dyn Ability>>,

    /// For instants/sorceries: the effect when the spell resolves
    pub spell_effect: Option<Box<dyn EffectExecutor>>,
}

impl CardDefinition {
    pub fn new(card: Card) -> Self {
        Self {
            card,
            abilities: Vec::new(),
            spell_effect: None,
        }
    }

    /// Get the card's name.
    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn id(&self) -> CardId {
        self.card.id
    }

    /// Check if this is a creature.
    pub fn is_creature(&self) -> bool {
        self.card.is_creature()
    }

    /// Check if this is an instant or sorcery.
    pub fn is_spell(&self) -> bool {
        self.card.is_instant() || self.card.is_sorcery()
    }

    pub fn is_permanent(&self) -> bool {
        self.card.is_permanent()
    }
}

/// Registry of card definitions, by name.
///
/// Registration assigns `CardId`s in order, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct CardRegistry {
    cards: HashMap<String, Arc<CardDefinition>>,
    next_id: u32,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self {
            cards: HashMap::new(),
            next_id: 1,
        }
    }

    /// All built-in definitions.
    pub fn with_builtin_cards() -> Self {
        let mut registry = Self::new();
        registry.register(basic_plains());
        registry.register(basic_island());
        registry.register(basic_swamp());
        registry.register(basic_mountain());
        registry.register(basic_forest());
        registry.register(savannah_lions());
        registry.register(grizzly_bears());
        registry.register(lightning_bolt());
        registry.register(forked_bolt());
        registry
    }

    /// Registers a definition under its name, replacing any earlier one.
    pub fn register(&mut self, mut def: CardDefinition) -> CardId {
        let id = CardId::from_raw(self.next_id.max(1));
        self.next_id = id.0 + 1;
        def.card.id = id;
        self.cards.insert(def.card.name.clone(), Arc::new(def));
        id
    }

    pub fn get(&self, name: &str) -> Option<&Arc<CardDefinition>> {
        self.cards.get(name)
    }

    pub fn get_by_id(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.values().find(|def| def.card.id == id)
    }

    /// Card names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cards.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
