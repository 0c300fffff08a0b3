//! Grizzly Bears card definition.

use crate::card::PowerToughness;
use crate::cards::{CardDefinition, CardDefinitionBuilder};
use crate::ids::CardId;
use crate::mana::{ManaCost, ManaSymbol};
use crate::types::{CardType, Subtype};

/// Grizzly Bears - {1}{G}
/// Creature — Bear (2/2)
pub fn grizzly_bears() -> CardDefinition {
    CardDefinitionBuilder::new(CardId::default(), "Grizzly Bears")
        .mana_cost(ManaCost::from_symbols(vec![
            ManaSymbol::Generic(1),
            ManaSymbol::Green,
        ]))
        .card_types(vec![CardType::Creature])
        .subtypes(vec![Subtype::Bear])
        .power_toughness(PowerToughness::fixed(2, 2))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;
    use crate::tests::integration_tests::{ReplayTestConfig, run_replay_test};

    #[test]
    fn test_grizzly_bears() {
        let def = grizzly_bears();
        assert_eq!(def.name(), "Grizzly Bears");
        assert!(def.is_creature());
        assert!(def.abilities.is_empty());
    }

    #[test]
    fn test_replay_grizzly_bears_casting() {
        let game = run_replay_test(
            vec![
                "1", // Tap Forest 1
                "1", // Tap Forest 2
                "1", // Cast Grizzly Bears (auto-passes handle resolution)
            ],
            ReplayTestConfig::new()
                .p1_hand(vec!["Grizzly Bears"])
                .p1_battlefield(vec!["Forest", "Forest"]),
        );

        assert!(
            game.battlefield_has("Grizzly Bears"),
            "Grizzly Bears should be on battlefield after casting"
        );

        let alice = PlayerId::from_index(0);
        let bears_id = game.battlefield.iter().find(|&id| {
            game.object(id)
                .map(|obj| obj.name == "Grizzly Bears" && obj.controller == alice)
                .unwrap_or(false)
        });

        let Some(bears_id) = bears_id else {
            panic!("Could not find Grizzly Bears on battlefield");
        };
        let chars = game.characteristics_of(bears_id).unwrap();
        assert_eq!(chars.power, Some(2), "Should have 2 power");
        assert_eq!(chars.toughness, Some(2), "Should have 2 toughness");
        assert!(game.object(bears_id).unwrap().is_summoning_sick());
    }

    /// One Forest is not enough: {G} covers the colored pip and nothing is left for {1}.
    #[test]
    fn test_replay_grizzly_bears_one_forest_is_not_enough() {
        let game = run_replay_test(
            vec![
                "1", // Tap Forest
                "1", // Not a legal index anymore; rejected, then forced pass
            ],
            ReplayTestConfig::new()
                .p1_hand(vec!["Grizzly Bears"])
                .p1_battlefield(vec!["Forest"]),
        );

        let alice = PlayerId::from_index(0);
        assert!(game.hand_has(alice, "Grizzly Bears"));
        assert!(!game.battlefield_has("Grizzly Bears"));
    }
}
