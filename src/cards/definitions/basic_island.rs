//! Island basic land card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::types::{CardType, Subtype, Supertype};

/// Island - Basic Land — Island
pub fn basic_island() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Island")
        .supertypes(vec![Supertype::Basic])
        .card_types(vec![CardType::Land])
        .subtypes(vec![Subtype::Island])
        .oracle_text("{T}: Add {U}.")
        .basic_land_abilities()
        .build()
}
