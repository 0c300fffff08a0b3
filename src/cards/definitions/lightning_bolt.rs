//! Lightning Bolt card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::effect::DealDamageEffect;
use crate::ids::CardId;
use crate::mana::{ManaCost, ManaSymbol};
use crate::types::CardType;

/// Lightning Bolt - {R}
/// Instant
/// Lightning Bolt deals 3 damage to any target.
pub fn lightning_bolt() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Lightning Bolt")
        .mana_cost(ManaCost::from_symbols(vec![ManaSymbol::Red]))
        .card_types(vec![CardType::Instant])
        .oracle_text("Lightning Bolt deals 3 damage to any target.")
        .spell_effect(DealDamageEffect { amount: 3 })
        .build()
}
