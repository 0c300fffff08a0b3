//! Current characteristics of objects.
//!
//! The core never reads printed card fields for rules decisions; it asks the
//! `CharacteristicsSource` held by the game state. A layer system can replace
//! the default source without touching anything else.

use std::fmt;

use crate::card::Card;
use crate::game_state::GameState;
use crate::mana::ManaCost;
use crate::object::GameObject;
use crate::types::{CardType, Subtype, Supertype};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Characteristics {
    pub name: String,
    pub mana_cost: Option<ManaCost>,
    pub supertypes: Vec<Supertype>,
    pub card_types: Vec<CardType>,
    pub subtypes: Vec<Subtype>,
    pub power: Option<i32>,
    pub toughness: Option<i32>,
}

impl Characteristics {
    pub fn from_card(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            mana_cost: card.mana_cost.clone(),
            supertypes: card.supertypes.clone(),
            card_types: card.card_types.clone(),
            subtypes: card.subtypes.clone(),
            power: card.power_toughness.map(|pt| pt.power),
            toughness: card.power_toughness.map(|pt| pt.toughness),
        }
    }

    pub fn has_card_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    pub fn is_creature(&self) -> bool {
        self.has_card_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.has_card_type(CardType::Land)
    }
}

pub trait CharacteristicsSource: fmt::Debug + Send + Sync {
    fn characteristics_of(&self, object: &GameObject, game: &GameState) -> Characteristics;
}

/// Printed values plus counters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintedCharacteristics;

impl CharacteristicsSource for PrintedCharacteristics {
    fn characteristics_of(&self, object: &GameObject, game: &GameState) -> Characteristics {
        let mut chars = object
            .card
            .and_then(|card| game.cards.get(&card))
            .map(|def| Characteristics::from_card(&def.card))
            .unwrap_or_else(|| Characteristics {
                name: object.name.clone(),
                ..Characteristics::default()
            });

        let bonus = object.counter_pt_bonus();
        if bonus != 0 {
            chars.power = chars.power.map(|p| p + bonus);
            chars.toughness = chars.toughness.map(|t| t + bonus);
        }
        chars
    }
}
