//! Forked Bolt card definition.

use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::effect::DivideDamageEffect;
use crate::ids::CardId;
use crate::mana::{ManaCost, ManaSymbol};
use crate::types::CardType;

/// Forked Bolt - {R}
/// Sorcery
/// Forked Bolt deals 2 damage divided as you choose among one or two targets.
pub fn forked_bolt() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Forked Bolt")
        .mana_cost(ManaCost::from_symbols(vec![ManaSymbol::Red]))
        .card_types(vec![CardType::Sorcery])
        .oracle_text(
            "Forked Bolt deals 2 damage divided as you choose among one or two targets.",
        )
        .spell_effect(DivideDamageEffect {
            amount: 2,
            max_targets: 2,
        })
        .build()
}
