//! Card definition builder.
//!
//! Wraps `CardBuilder` and adds abilities and a spell effect.

use crate::ability::{Ability, TapManaAbility};
use crate::card::{CardBuilder, PowerToughness};
use crate::effect::EffectExecutor;
use crate::ids::CardId;
use crate::mana::ManaCost;
use crate::types::{CardType, Subtype, Supertype};

use super::CardDefinition;

#[derive(Debug)]
pub struct CardDefinitionBuilder {
    card: CardBuilder,
    subtypes: Vec<Subtype>,
    abilities: Vec<Box<dyn Ability>>,
    spell_effect: Option<Box<dyn EffectExecutor>>,
}

impl CardDefinitionBuilder {
    /// `id` is usually `CardId::default()`; `CardRegistry::register` assigns the real one.
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            card: CardBuilder::new(id, name),
            subtypes: Vec::new(),
            abilities: Vec::new(),
            spell_effect: None,
        }
    }

    pub fn mana_cost(mut self, cost: ManaCost) -> Self {
        self.card = self.card.mana_cost(cost);
        self
    }

    pub fn supertypes(mut self, supertypes: Vec<Supertype>) -> Self {
        self.card = self.card.supertypes(supertypes);
        self
    }

    pub fn card_types(mut self, types: Vec<CardType>) -> Self {
        self.card = self.card.card_types(types);
        self
    }

    pub fn subtypes(mut self, subtypes: Vec<Subtype>) -> Self {
        self.subtypes = subtypes.clone();
        self.card = self.card.subtypes(subtypes);
        self
    }

    pub fn oracle_text(mut self, text: impl Into<String>) -> Self {
        self.card = self.card.oracle_text(text);
        self
    }

    pub fn power_toughness(mut self, pt: PowerToughness) -> Self {
        self.card = self.card.power_toughness(pt);
        self
    }

    pub fn with_ability(mut self, ability: impl Ability + 'static) -> Self {
        self.abilities.push(Box::new(ability));
        self
    }

    /// Adds `{T}: Add {X}.` for each basic land type among the subtypes.
    pub fn basic_land_abilities(mut self) -> Self {
        for mana in self.subtypes.iter().filter_map(|s| s.basic_land_mana()) {
            self.abilities.push(Box::new(TapManaAbility::new(mana)));
        }
        self
    }

    pub fn spell_effect(mut self, effect: impl EffectExecutor + 'static) -> Self {
        self.spell_effect = Some(Box::new(effect));
        self
    }

    pub fn build(self) -> CardDefinition {
        CardDefinition {
            card: self.card.build(),
            abilities: self.abilities,
            spell_effect: self.spell_effect,
        }
    }
}
