//! Activated abilities.
//!
//! The core only needs `can_activate`/`activate`; mana abilities and the
//! stack-using kind go through the same interface.

use std::fmt;

use crate::actions::ActionError;
use crate::effect::{Choices, EffectExecutor};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::mana::{ManaCost, ManaType};

/// Who is activating what, with the choices already made.
#[derive(Debug, Clone)]
pub struct ActivationContext {
    pub source: ObjectId,
    pub player: PlayerId,
    pub choices: Choices,
}

impl ActivationContext {
    pub fn new(source: ObjectId, player: PlayerId) -> Self {
        Self {
            source,
            player,
            choices: Choices::default(),
        }
    }

    pub fn with_choices(mut self, choices: Choices) -> Self {
        self.choices = choices;
        self
    }
}

pub trait Ability: fmt::Debug + Send + Sync {
    fn description(&self) -> String;

    /// Mana abilities resolve immediately instead of using the stack.
    fn is_mana_ability(&self) -> bool {
        false
    }

    fn can_activate(&self, game: &GameState, source: ObjectId, player: PlayerId) -> bool;

    /// Pays costs and applies the ability. Fails without changing state if
    /// `can_activate` would be false.
    fn activate(&self, game: &mut GameState, ctx: &ActivationContext) -> Result<(), ActionError>;

    /// The effect the ability puts on the stack, if any.
    fn effect(&self) -> Option<&dyn EffectExecutor> {
        None
    }

    fn clone_box(&self) -> Box<dyn Ability>;
}

impl Clone for Box<dyn Ability> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Source is on the battlefield, controlled by `player`, and (if `needs_tap`)
/// untapped and free of summoning sickness when it is a creature.
fn source_ready(game: &GameState, source: ObjectId, player: PlayerId, needs_tap: bool) -> bool {
    let Some(obj) = game.object(source) else {
        return false;
    };
    if !obj.is_on_battlefield() || obj.controller != player {
        return false;
    }
    if needs_tap {
        if obj.is_tapped() {
            return false;
        }
        if obj.is_summoning_sick() && game.is_creature(source) {
            return false;
        }
    }
    true
}

/// `{T}: Add one mana of a type.`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapManaAbility {
    pub mana: ManaType,
}

impl TapManaAbility {
    pub fn new(mana: ManaType) -> Self {
        Self { mana }
    }
}

impl Ability for TapManaAbility {
    fn description(&self) -> String {
        format!("{{T}}: Add {{{}}}.", self.mana.symbol())
    }

    fn is_mana_ability(&self) -> bool {
        true
    }

    fn can_activate(&self, game: &GameState, source: ObjectId, player: PlayerId) -> bool {
        source_ready(game, source, player, true)
    }

    fn activate(&self, game: &mut GameState, ctx: &ActivationContext) -> Result<(), ActionError> {
        if !self.can_activate(game, ctx.source, ctx.player) {
            return Err(ActionError::CantActivate);
        }
        game.tap(ctx.source);
        game.player_mut(ctx.player)
            .ok_or(ActionError::PlayerNotFound)?
            .mana_pool
            .add(self.mana, 1);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn Ability> {
        Box::new(*self)
    }
}

/// `[cost], [{T}]: effect.` Uses the stack.
#[derive(Debug, Clone)]
pub struct ManaCostAbility {
    pub cost: ManaCost,
    pub tap: bool,
    pub effect: Box<dyn EffectExecutor>,
}

impl Ability for ManaCostAbility {
    fn description(&self) -> String {
        let mut cost = Vec::new();
        if !self.cost.is_empty() {
            cost.push(self.cost.to_oracle());
        }
        if self.tap {
            cost.push("{T}".to_string());
        }
        format!("{}: {}", cost.join(", "), self.effect.description())
    }

    fn can_activate(&self, game: &GameState, source: ObjectId, player: PlayerId) -> bool {
        source_ready(game, source, player, self.tap)
            && game
                .player(player)
                .is_some_and(|p| p.mana_pool.can_pay(&self.cost))
    }

    fn activate(&self, game: &mut GameState, ctx: &ActivationContext) -> Result<(), ActionError> {
        if !source_ready(game, ctx.source, ctx.player, self.tap) {
            return Err(ActionError::CantActivate);
        }
        // Paying is the last step that can fail, so nothing is tapped on failure.
        game.player_mut(ctx.player)
            .ok_or(ActionError::PlayerNotFound)?
            .mana_pool
            .pay(&self.cost)?;
        if self.tap {
            game.tap(ctx.source);
        }
        game.put_ability_on_stack(
            Some(ctx.source),
            ctx.player,
            self.effect.clone_box(),
            ctx.choices.clone(),
        );
        Ok(())
    }

    fn effect(&self) -> Option<&dyn EffectExecutor> {
        Some(self.effect.as_ref())
    }

    fn clone_box(&self) -> Box<dyn Ability> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardBuilder, PowerToughness};
    use crate::config::GameConfig;
    use crate::effect::GainLifeEffect;
    use crate::ids::CardId;
    use crate::mana::ManaSymbol;
    use crate::types::CardType;
    use crate::zone::ZoneKind;

    fn setup() -> (GameState, PlayerId, ObjectId) {
        let mut game = GameState::new(vec!["Alice".to_string()], GameConfig::default());
        let alice = PlayerId::from_index(0);
        let land = CardBuilder::new(CardId::from_raw(100), "Forest")
            .card_types(vec![CardType::Land])
            .build();
        let id = game.create_object_from_card(&land, alice, ZoneKind::Battlefield).unwrap();
        (game, alice, id)
    }

    #[test]
    fn test_tap_mana_ability_adds_mana_and_taps() {
        let (mut game, alice, forest) = setup();
        let ability = TapManaAbility::new(ManaType::Green);
        assert!(ability.is_mana_ability());
        assert!(ability.can_activate(&game, forest, alice));

        ability
            .activate(&mut game, &ActivationContext::new(forest, alice))
            .unwrap();
        assert!(game.object(forest).unwrap().is_tapped());
        assert_eq!(
            game.player(alice).unwrap().mana_pool.balance(ManaType::Green),
            1
        );
        assert!(game.stack.is_empty());

        assert!(!ability.can_activate(&game, forest, alice));
        assert_eq!(
            ability.activate(&mut game, &ActivationContext::new(forest, alice)),
            Err(ActionError::CantActivate)
        );
    }

    #[test]
    fn test_summoning_sick_creature_cannot_tap() {
        let mut game = GameState::new(vec!["Alice".to_string()], GameConfig::default());
        let alice = PlayerId::from_index(0);
        let elf = CardBuilder::new(CardId::from_raw(101), "Llanowar Elves")
            .card_types(vec![CardType::Creature])
            .power_toughness(PowerToughness::fixed(1, 1))
            .build();
        let id = game.create_object_from_card(&elf, alice, ZoneKind::Battlefield).unwrap();

        let ability = TapManaAbility::new(ManaType::Green);
        assert!(!ability.can_activate(&game, id, alice));
        game.object_mut(id).unwrap().status.remove(crate::object::StatusFlags::SUMMONING_SICK);
        assert!(ability.can_activate(&game, id, alice));
    }

    #[test]
    fn test_mana_cost_ability_pays_and_uses_stack() {
        let (mut game, alice, forest) = setup();
        let ability = ManaCostAbility {
            cost: ManaCost::from_symbols(vec![ManaSymbol::Green]),
            tap: true,
            effect: Box::new(GainLifeEffect::you(1)),
        };
        assert_eq!(ability.description(), "{G}, {T}: gain 1 life");
        assert!(!ability.can_activate(&game, forest, alice));

        let err = ability
            .activate(&mut game, &ActivationContext::new(forest, alice))
            .unwrap_err();
        assert!(matches!(err, ActionError::InsufficientMana(_)));
        assert!(!game.object(forest).unwrap().is_tapped(), "no partial payment");

        game.player_mut(alice)
            .unwrap()
            .mana_pool
            .add(ManaType::Green, 1);
        ability
            .activate(&mut game, &ActivationContext::new(forest, alice))
            .unwrap();
        assert!(game.object(forest).unwrap().is_tapped());
        assert_eq!(game.stack.len(), 1);
        assert!(game.stack.peek().unwrap().is_ability());
        assert!(game.player(alice).unwrap().mana_pool.is_empty());
    }
}
