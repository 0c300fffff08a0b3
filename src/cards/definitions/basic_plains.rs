//! Plains basic land card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::types::{CardType, Subtype, Supertype};

/// Plains - Basic Land — Plains
pub fn basic_plains() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Plains")
        .supertypes(vec![Supertype::Basic])
        .card_types(vec![CardType::Land])
        .subtypes(vec![Subtype::Plains])
        .oracle_text("{T}: Add {W}.")
        .basic_land_abilities()
        .build()
}
