//! Savannah Lions card definition.

use crate::card::PowerToughness;
use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::mana::{ManaCost, ManaSymbol};
use crate::types::{CardType, Subtype};

/// Savannah Lions - {W}
/// Creature — Cat (2/1)
pub fn savannah_lions() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Savannah Lions")
        .mana_cost(ManaCost::from_symbols(vec![ManaSymbol::White]))
        .card_types(vec![CardType::Creature])
        .subtypes(vec![Subtype::Cat])
        .power_toughness(PowerToughness::fixed(2, 1))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;
    use crate::tests::integration_tests::{ReplayTestConfig, run_replay_test};

    #[test]
    fn test_savannah_lions() {
        let def = savannah_lions();
        assert_eq!(def.name(), "Savannah Lions");
        assert!(def.is_creature());
        assert_eq!(def.card.mana_value(), 1);
        assert_eq!(def.card.power_toughness, Some(PowerToughness::fixed(2, 1)));
    }

    /// Tests casting Savannah Lions off a single Plains.
    #[test]
    fn test_replay_savannah_lions_casting() {
        let game = run_replay_test(
            vec![
                "1", // Tap Plains for {W}
                "1", // Cast Savannah Lions (auto-passes handle resolution)
            ],
            ReplayTestConfig::new()
                .p1_hand(vec!["Savannah Lions"])
                .p1_battlefield(vec!["Plains"]),
        );

        assert!(game.battlefield_has("Savannah Lions"));
        let alice = PlayerId::from_index(0);
        assert!(!game.hand_has(alice, "Savannah Lions"));
        assert!(game.players[0].mana_pool.is_empty());
    }
}
