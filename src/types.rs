#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::mana::ManaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Supertype {
    Basic,
    Legendary,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Planeswalker,
    Instant,
    Sorcery,
}

impl CardType {
    /// Returns true if objects of this type stay on the battlefield after resolving.
    pub fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Subtype {
    // Basic land types
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,

    // Creature types
    Bear,
    Cat,
    Elf,
    Goblin,
    Human,
    Soldier,
    Warrior,
}

impl Subtype {
    /// The mana a basic land of this type taps for, if this is a basic land type.
    pub fn basic_land_mana(self) -> Option<ManaType> {
        match self {
            Subtype::Plains => Some(ManaType::White),
            Subtype::Island => Some(ManaType::Blue),
            Subtype::Swamp => Some(ManaType::Black),
            Subtype::Mountain => Some(ManaType::Red),
            Subtype::Forest => Some(ManaType::Green),
            _ => None,
        }
    }
}
