//! Forest basic land card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::types::{CardType, Subtype, Supertype};

/// Forest - Basic Land — Forest
pub fn basic_forest() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Forest")
        .supertypes(vec![Supertype::Basic])
        .card_types(vec![CardType::Land])
        .subtypes(vec![Subtype::Forest])
        .oracle_text("{T}: Add {G}.")
        .basic_land_abilities()
        .build()
}
