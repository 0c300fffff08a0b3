//! Swamp basic land card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::types::{CardType, Subtype, Supertype};

/// Swamp - Basic Land — Swamp
pub fn basic_swamp() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Swamp")
        .supertypes(vec![Supertype::Basic])
        .card_types(vec![CardType::Land])
        .subtypes(vec![Subtype::Swamp])
        .oracle_text("{T}: Add {B}.")
        .basic_land_abilities()
        .build()
}
