//! Effects carried by spells and abilities.
//!
//! The core treats effects as opaque handles: it asks them what choices they
//! need (targets, a mode, a distribution), records those choices on the stack
//! entry, and calls `execute` on resolution.

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};

/// A chosen target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Target {
    Object(ObjectId),
    Player(PlayerId),
}

/// What kind of thing an effect may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFilter {
    AnyPlayer,
    Opponent,
    Creature,
    /// A creature or a player.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub filter: TargetFilter,
    pub min: usize,
    pub max: usize,
}

impl TargetSpec {
    pub fn single(filter: TargetFilter) -> Self {
        Self {
            filter,
            min: 1,
            max: 1,
        }
    }

    pub fn up_to(filter: TargetFilter, max: usize) -> Self {
        Self { filter, min: 1, max }
    }

    /// Every legal target for `controller` in the current state.
    pub fn legal_targets(&self, game: &GameState, controller: PlayerId) -> Vec<Target> {
        let players = || game.players_in_game().into_iter();
        let creatures = || {
            game.battlefield
                .iter()
                .filter(|&id| game.is_creature(id))
                .map(Target::Object)
        };
        match self.filter {
            TargetFilter::AnyPlayer => players().map(Target::Player).collect(),
            TargetFilter::Opponent => players()
                .filter(|&p| p != controller)
                .map(Target::Player)
                .collect(),
            TargetFilter::Creature => creatures().collect(),
            TargetFilter::Any => players().map(Target::Player).chain(creatures()).collect(),
        }
    }

    /// Returns true if `target` is currently a legal choice.
    pub fn is_legal(&self, game: &GameState, controller: PlayerId, target: Target) -> bool {
        self.legal_targets(game, controller).contains(&target)
    }
}

/// Choices made while putting a spell or ability on the stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    pub targets: Vec<Target>,
    pub mode: Option<usize>,
    /// Per-target amounts for a divided effect, parallel to `targets`.
    pub distribution: Vec<u32>,
}

/// Everything an effect sees when it executes.
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub source: Option<ObjectId>,
    pub controller: PlayerId,
    pub targets: Vec<Target>,
    pub mode: Option<usize>,
    pub distribution: Vec<u32>,
}

impl EffectContext {
    pub fn new(source: Option<ObjectId>, controller: PlayerId, choices: &Choices) -> Self {
        Self {
            source,
            controller,
            targets: choices.targets.clone(),
            mode: choices.mode,
            distribution: choices.distribution.clone(),
        }
    }

    /// A context with no choices, for effects that need none.
    pub fn bare(source: Option<ObjectId>, controller: PlayerId) -> Self {
        Self::new(source, controller, &Choices::default())
    }

    fn first_player_target(&self) -> Option<PlayerId> {
        self.targets.iter().find_map(|t| match t {
            Target::Player(p) => Some(*p),
            Target::Object(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    PlayerNotFound(PlayerId),
    ObjectNotFound(ObjectId),
    MissingTarget,
    InvalidMode(usize),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::PlayerNotFound(p) => write!(f, "player {} not found", p),
            EffectError::ObjectNotFound(id) => write!(f, "object {} not found", id),
            EffectError::MissingTarget => write!(f, "effect needs a target"),
            EffectError::InvalidMode(m) => write!(f, "mode {} does not exist", m),
        }
    }
}

impl std::error::Error for EffectError {}

/// Trait for executing effects.
///
/// `clone_box` exists because `Clone` is not object-safe.
pub trait EffectExecutor: fmt::Debug + Send + Sync {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError>;

    fn clone_box(&self) -> Box<dyn EffectExecutor>;

    fn description(&self) -> String;

    /// Target requirements, if the effect targets.
    fn target_spec(&self) -> Option<TargetSpec> {
        None
    }

    /// Mode descriptions for a modal effect. Empty if not modal.
    fn modes(&self) -> Vec<String> {
        Vec::new()
    }

    /// Total amount to divide among targets, for divided effects.
    fn distribution(&self) -> Option<u32> {
        None
    }
}

impl Clone for Box<dyn EffectExecutor> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Which player an effect applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChoice {
    You,
    EachOpponent,
    TargetPlayer,
}

impl PlayerChoice {
    fn resolve(self, game: &GameState, ctx: &EffectContext) -> Result<Vec<PlayerId>, EffectError> {
        match self {
            PlayerChoice::You => Ok(vec![ctx.controller]),
            PlayerChoice::EachOpponent => Ok(game
                .players_in_game()
                .into_iter()
                .filter(|&p| p != ctx.controller)
                .collect()),
            PlayerChoice::TargetPlayer => ctx
                .first_player_target()
                .map(|p| vec![p])
                .ok_or(EffectError::MissingTarget),
        }
    }

    fn target_spec(self) -> Option<TargetSpec> {
        (self == PlayerChoice::TargetPlayer).then(|| TargetSpec::single(TargetFilter::AnyPlayer))
    }
}

/// Effect that causes a player to gain life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainLifeEffect {
    pub amount: u32,
    pub player: PlayerChoice,
}

impl GainLifeEffect {
    pub fn you(amount: u32) -> Self {
        Self {
            amount,
            player: PlayerChoice::You,
        }
    }
}

impl EffectExecutor for GainLifeEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        for player in self.player.resolve(game, ctx)? {
            game.player_mut(player)
                .ok_or(EffectError::PlayerNotFound(player))?
                .gain_life(self.amount);
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        format!("gain {} life", self.amount)
    }

    fn target_spec(&self) -> Option<TargetSpec> {
        self.player.target_spec()
    }
}

/// Effect that causes a player to lose life.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoseLifeEffect {
    pub amount: u32,
    pub player: PlayerChoice,
}

impl LoseLifeEffect {
    pub fn each_opponent(amount: u32) -> Self {
        Self {
            amount,
            player: PlayerChoice::EachOpponent,
        }
    }

    pub fn target_player(amount: u32) -> Self {
        Self {
            amount,
            player: PlayerChoice::TargetPlayer,
        }
    }
}

impl EffectExecutor for LoseLifeEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        for player in self.player.resolve(game, ctx)? {
            game.player_mut(player)
                .ok_or(EffectError::PlayerNotFound(player))?
                .lose_life(self.amount);
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        format!("lose {} life", self.amount)
    }

    fn target_spec(&self) -> Option<TargetSpec> {
        self.player.target_spec()
    }
}

/// Effect that draws cards for the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCardsEffect {
    pub count: usize,
}

impl EffectExecutor for DrawCardsEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        if game.player(ctx.controller).is_none() {
            return Err(EffectError::PlayerNotFound(ctx.controller));
        }
        game.draw_cards(ctx.controller, self.count);
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        match self.count {
            1 => "draw a card".to_string(),
            n => format!("draw {} cards", n),
        }
    }
}

fn deal_damage(game: &mut GameState, target: Target, amount: u32) -> Result<(), EffectError> {
    match target {
        Target::Player(p) => {
            game.player_mut(p)
                .ok_or(EffectError::PlayerNotFound(p))?
                .lose_life(amount);
        }
        Target::Object(id) => {
            game.object_mut(id)
                .ok_or(EffectError::ObjectNotFound(id))?
                .damage += amount;
        }
    }
    Ok(())
}

/// Deals damage to one target creature or player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealDamageEffect {
    pub amount: u32,
}

impl EffectExecutor for DealDamageEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        let target = ctx.targets.first().copied().ok_or(EffectError::MissingTarget)?;
        deal_damage(game, target, self.amount)
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        format!("deal {} damage to any target", self.amount)
    }

    fn target_spec(&self) -> Option<TargetSpec> {
        Some(TargetSpec::single(TargetFilter::Any))
    }
}

/// Deals damage divided as the controller chooses among up to `max_targets`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivideDamageEffect {
    pub amount: u32,
    pub max_targets: usize,
}

impl EffectExecutor for DivideDamageEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        if ctx.targets.is_empty() {
            return Err(EffectError::MissingTarget);
        }
        for (index, &target) in ctx.targets.iter().enumerate() {
            // Without an explicit split, the first target takes everything.
            let share = match ctx.distribution.get(index) {
                Some(&share) => share,
                None if ctx.distribution.is_empty() && index == 0 => self.amount,
                None => 0,
            };
            if share > 0 {
                deal_damage(game, target, share)?;
            }
        }
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        format!(
            "deal {} damage divided among up to {} targets",
            self.amount, self.max_targets
        )
    }

    fn target_spec(&self) -> Option<TargetSpec> {
        Some(TargetSpec::up_to(TargetFilter::Any, self.max_targets))
    }

    fn distribution(&self) -> Option<u32> {
        Some(self.amount)
    }
}

/// Choose one of several effects.
#[derive(Debug, Clone)]
pub struct ChooseOneEffect {
    pub modes: Vec<Box<dyn EffectExecutor>>,
}

impl EffectExecutor for ChooseOneEffect {
    fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
        let index = ctx.mode.unwrap_or(0);
        let mode = self.modes.get(index).ok_or(EffectError::InvalidMode(index))?;
        mode.execute(game, ctx)
    }

    fn clone_box(&self) -> Box<dyn EffectExecutor> {
        Box::new(self.clone())
    }

    fn description(&self) -> String {
        format!("choose one: {}", self.modes().join("; "))
    }

    fn modes(&self) -> Vec<String> {
        self.modes.iter().map(|m| m.description()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn new_test_game() -> GameState {
        GameState::new(
            vec!["Alice".to_string(), "Bob".to_string()],
            GameConfig::default(),
        )
    }

    #[test]
    fn test_gain_life_fixed_amount() {
        let mut game = new_test_game();
        let alice = PlayerId::from_index(0);
        let ctx = EffectContext::bare(None, alice);

        GainLifeEffect::you(5).execute(&mut game, &ctx).unwrap();
        assert_eq!(game.player(alice).unwrap().life, 25);
    }

    #[test]
    fn test_lose_life_each_opponent() {
        let mut game = new_test_game();
        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let ctx = EffectContext::bare(None, alice);

        LoseLifeEffect::each_opponent(3).execute(&mut game, &ctx).unwrap();
        assert_eq!(game.player(alice).unwrap().life, 20);
        assert_eq!(game.player(bob).unwrap().life, 17);
    }

    #[test]
    fn test_target_player_without_target_fails() {
        let mut game = new_test_game();
        let alice = PlayerId::from_index(0);
        let ctx = EffectContext::bare(None, alice);

        let err = LoseLifeEffect::target_player(2)
            .execute(&mut game, &ctx)
            .unwrap_err();
        assert_eq!(err, EffectError::MissingTarget);
        assert!(LoseLifeEffect::target_player(2).target_spec().is_some());
        assert!(LoseLifeEffect::each_opponent(2).target_spec().is_none());
    }

    #[test]
    fn test_opponent_targets_exclude_controller() {
        let game = new_test_game();
        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let spec = TargetSpec::single(TargetFilter::Opponent);

        assert_eq!(spec.legal_targets(&game, alice), vec![Target::Player(bob)]);
        assert!(!spec.is_legal(&game, alice, Target::Player(alice)));
    }

    #[test]
    fn test_divided_damage_follows_distribution() {
        let mut game = new_test_game();
        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let choices = Choices {
            targets: vec![Target::Player(alice), Target::Player(bob)],
            mode: None,
            distribution: vec![1, 3],
        };
        let ctx = EffectContext::new(None, alice, &choices);

        let effect = DivideDamageEffect {
            amount: 4,
            max_targets: 2,
        };
        assert_eq!(effect.distribution(), Some(4));
        effect.execute(&mut game, &ctx).unwrap();
        assert_eq!(game.player(alice).unwrap().life, 19);
        assert_eq!(game.player(bob).unwrap().life, 17);
    }

    #[test]
    fn test_choose_one_runs_selected_mode() {
        let mut game = new_test_game();
        let alice = PlayerId::from_index(0);
        let effect = ChooseOneEffect {
            modes: vec![
                Box::new(GainLifeEffect::you(2)),
                Box::new(LoseLifeEffect::each_opponent(2)),
            ],
        };
        assert_eq!(effect.modes(), vec!["gain 2 life", "lose 2 life"]);

        let choices = Choices {
            mode: Some(1),
            ..Choices::default()
        };
        effect
            .execute(&mut game, &EffectContext::new(None, alice, &choices))
            .unwrap();
        assert_eq!(game.player(PlayerId::from_index(1)).unwrap().life, 18);

        let bad = Choices {
            mode: Some(5),
            ..Choices::default()
        };
        assert_eq!(
            effect.execute(&mut game, &EffectContext::new(None, alice, &bad)),
            Err(EffectError::InvalidMode(5))
        );
    }
}
