//! Mountain basic land card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::types::{CardType, Subtype, Supertype};

/// Mountain - Basic Land — Mountain
pub fn basic_mountain() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Mountain")
        .supertypes(vec![Supertype::Basic])
        .card_types(vec![CardType::Land])
        .subtypes(vec![Subtype::Mountain])
        .oracle_text("{T}: Add {R}.")
        .basic_land_abilities()
        .build()
}
