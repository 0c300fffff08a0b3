//! Player decision system.
//!
//! This module provides:
//! - `LegalAction` and the helper that computes the legal set for a player
//! - `DecisionMaker`, the interface the orchestrator asks for every choice
//! - Stock decision makers for automated play and tests

use std::collections::{HashMap, VecDeque};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::actions::{self, ActionError};
use crate::effect::{Target, TargetSpec};
use crate::game_state::{GameState, Phase, Step};
use crate::ids::{ObjectId, PlayerId};

// ============================================================================
// Action Types
// ============================================================================

/// A legal action a player can take when they have priority.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum LegalAction {
    /// Pass priority to the next player.
    PassPriority,

    /// Play a land from hand.
    PlayLand { land_id: ObjectId },

    /// Cast a spell from hand.
    CastSpell { spell_id: ObjectId },

    /// Activate an ability of a permanent, mana abilities included.
    ActivateAbility {
        source: ObjectId,
        ability_index: usize,
    },
}

/// Result of a completed game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum GameResult {
    /// A player won the game.
    Winner(PlayerId),
    /// The game ended in a draw.
    Draw,
    /// Multiple players remain (game stopped early).
    Remaining(Vec<PlayerId>),
}

// ============================================================================
// State Summary
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
    pub life: i32,
    pub hand_size: usize,
    pub library_size: usize,
    pub graveyard_size: usize,
    pub has_lost: bool,
}

/// What a decision maker sees of the game when asked to act.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StateSummary {
    pub turn_number: u32,
    pub phase: Phase,
    pub step: Option<Step>,
    pub active_player: PlayerId,
    pub priority_holder: Option<PlayerId>,
    pub players: Vec<PlayerSummary>,
    pub battlefield_size: usize,
    pub stack_size: usize,
}

impl StateSummary {
    pub fn from_game(game: &GameState) -> Self {
        Self {
            turn_number: game.turn.turn_number,
            phase: game.turn.phase,
            step: game.turn.step,
            active_player: game.turn.active_player,
            priority_holder: game.priority.holder(),
            players: game
                .players
                .iter()
                .map(|p| PlayerSummary {
                    id: p.id,
                    name: p.name.clone(),
                    life: p.life,
                    hand_size: p.hand_size(),
                    library_size: p.library_size(),
                    graveyard_size: p.graveyard.count(),
                    has_lost: p.has_lost,
                })
                .collect(),
            battlefield_size: game.battlefield.count(),
            stack_size: game.stack.len(),
        }
    }

    pub fn life_of(&self, player: PlayerId) -> Option<i32> {
        self.players.iter().find(|p| p.id == player).map(|p| p.life)
    }
}

/// Context for a priority decision.
#[derive(Debug, Clone)]
pub struct PriorityContext {
    pub player: PlayerId,
    pub legal_actions: Vec<LegalAction>,
    pub summary: StateSummary,
}

impl PriorityContext {
    pub fn new(game: &GameState, player: PlayerId) -> Self {
        Self {
            player,
            legal_actions: compute_legal_actions(game, player),
            summary: StateSummary::from_game(game),
        }
    }
}

// ============================================================================
// Legal Actions
// ============================================================================

/// Compute legal actions for a player who has priority.
///
/// Pass comes first, then land plays, ability activations and spells. Each
/// entry is checked with the same predicate that guards the action itself.
pub fn compute_legal_actions(game: &GameState, player: PlayerId) -> Vec<LegalAction> {
    let mut legal = vec![LegalAction::PassPriority];
    if !game.priority.has_priority(player) {
        return legal;
    }
    let Some(player_data) = game.player(player) else {
        return legal;
    };
    let hand = player_data.hand.ids();

    for &land_id in &hand {
        if actions::can_play_land(game, player, land_id).is_ok() {
            legal.push(LegalAction::PlayLand { land_id });
        }
    }

    for source in game.permanents_controlled_by(player) {
        let Some(def) = game.definition_of(source) else {
            continue;
        };
        for (ability_index, ability) in def.abilities.iter().enumerate() {
            let choosable = ability
                .effect()
                .is_none_or(|effect| actions::has_legal_choices(game, player, effect));
            if choosable && actions::can_activate_ability(game, player, source, ability_index).is_ok()
            {
                legal.push(LegalAction::ActivateAbility {
                    source,
                    ability_index,
                });
            }
        }
    }

    for &spell_id in &hand {
        if actions::can_cast_spell(game, player, spell_id).is_err() {
            continue;
        }
        let choosable = game
            .definition_of(spell_id)
            .and_then(|def| def.spell_effect.clone())
            .is_none_or(|effect| actions::has_legal_choices(game, player, effect.as_ref()));
        if choosable {
            legal.push(LegalAction::CastSpell { spell_id });
        }
    }

    legal
}

// ============================================================================
// Decision Maker
// ============================================================================

/// Splits `total` across `targets` as evenly as possible, extra to the front.
pub fn even_distribution(total: u32, targets: usize) -> Vec<u32> {
    if targets == 0 {
        return Vec::new();
    }
    let n = targets as u32;
    (0..n)
        .map(|i| total / n + u32::from(i < total % n))
        .collect()
}

/// Answers every question the engine asks a player.
///
/// Every method but `choose_action` has a default that picks the first legal
/// option. Calls are synchronous and must not drive the game loop.
pub trait DecisionMaker {
    /// Pick one of `ctx.legal_actions`. Anything else is rejected and asked again.
    fn choose_action(&mut self, game: &GameState, ctx: &PriorityContext) -> LegalAction;

    fn choose_targets(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        spec: &TargetSpec,
        legal: &[Target],
    ) -> Vec<Target> {
        legal.iter().copied().take(spec.min.max(1)).collect()
    }

    /// Index into `modes`.
    fn choose_mode(&mut self, _game: &GameState, _player: PlayerId, _modes: &[String]) -> usize {
        0
    }

    /// A permutation of `0..items.len()`; the first index goes on the stack first.
    fn choose_order(&mut self, _game: &GameState, _player: PlayerId, items: &[String]) -> Vec<usize> {
        (0..items.len()).collect()
    }

    /// One positive amount per target, summing to `total`.
    fn choose_distribution(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        total: u32,
        targets: &[Target],
    ) -> Vec<u32> {
        even_distribution(total, targets.len())
    }

    /// `count` cards from `hand` to discard during cleanup.
    fn choose_discard(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        count: usize,
        hand: &[ObjectId],
    ) -> Vec<ObjectId> {
        hand.iter().copied().take(count).collect()
    }

    fn on_action_rejected(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        _action: &LegalAction,
        _error: &ActionError,
    ) {
    }

    fn on_game_over(&mut self, _game: &GameState, _result: &GameResult) {}
}

/// Always passes priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPassDecisionMaker;

impl DecisionMaker for AutoPassDecisionMaker {
    fn choose_action(&mut self, _game: &GameState, _ctx: &PriorityContext) -> LegalAction {
        LegalAction::PassPriority
    }
}

/// Takes the first legal action that isn't a pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectFirstDecisionMaker;

impl DecisionMaker for SelectFirstDecisionMaker {
    fn choose_action(&mut self, _game: &GameState, ctx: &PriorityContext) -> LegalAction {
        ctx.legal_actions
            .iter()
            .find(|a| **a != LegalAction::PassPriority)
            .cloned()
            .unwrap_or(LegalAction::PassPriority)
    }
}

/// Simple automated player: plays a land, casts what it can, taps lands when
/// that gets a spell in hand closer to castable, otherwise passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPlayDecisionMaker;

impl AutoPlayDecisionMaker {
    /// Mana value of the cheapest nonland card in hand the player could afford
    /// by tapping everything still untapped.
    fn wanted_mana(game: &GameState, player: PlayerId, untapped_sources: usize) -> Option<u32> {
        let pool = game.player(player)?.mana_pool.total();
        let reachable = pool.saturating_add(untapped_sources as u32);
        game.player(player)?
            .hand
            .iter()
            .filter_map(|id| game.characteristics_of(id))
            .filter(|c| !c.is_land())
            .map(|c| c.mana_cost.map_or(0, |m| m.mana_value()))
            .filter(|&mv| mv > pool && mv <= reachable)
            .min()
    }
}

impl DecisionMaker for AutoPlayDecisionMaker {
    fn choose_action(&mut self, game: &GameState, ctx: &PriorityContext) -> LegalAction {
        let legal = &ctx.legal_actions;

        if let Some(land) = legal.iter().find(|a| matches!(a, LegalAction::PlayLand { .. })) {
            return land.clone();
        }
        if let Some(spell) = legal.iter().find(|a| matches!(a, LegalAction::CastSpell { .. })) {
            return spell.clone();
        }

        let mana_taps: Vec<&LegalAction> = legal
            .iter()
            .filter(|a| match a {
                LegalAction::ActivateAbility {
                    source,
                    ability_index,
                } => game
                    .definition_of(*source)
                    .and_then(|def| def.abilities.get(*ability_index).map(|a| a.is_mana_ability()))
                    .unwrap_or(false),
                _ => false,
            })
            .collect();
        if Self::wanted_mana(game, ctx.player, mana_taps.len()).is_some() {
            if let Some(tap) = mana_taps.first() {
                return (*tap).clone();
            }
        }

        LegalAction::PassPriority
    }

    /// Aims at opponents and their creatures before anything of its own.
    fn choose_targets(
        &mut self,
        game: &GameState,
        player: PlayerId,
        spec: &TargetSpec,
        legal: &[Target],
    ) -> Vec<Target> {
        let hostile = |t: &Target| match *t {
            Target::Player(p) => p != player,
            Target::Object(id) => game.object(id).is_some_and(|o| o.controller != player),
        };
        let mut ordered: Vec<Target> = legal.iter().copied().filter(|t| hostile(t)).collect();
        ordered.extend(legal.iter().copied().filter(|t| !hostile(t)));
        ordered.truncate(spec.min.max(1));
        ordered
    }
}

/// Replays a fixed list of actions, then passes. Test helper.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisionMaker {
    actions: VecDeque<LegalAction>,
    targets: VecDeque<Vec<Target>>,
    pub rejected: Vec<(LegalAction, ActionError)>,
    pub result: Option<GameResult>,
}

impl ScriptedDecisionMaker {
    pub fn new(actions: impl IntoIterator<Item = LegalAction>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Target choices returned in order, one per `choose_targets` call.
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Vec<Target>>) -> Self {
        self.targets = targets.into_iter().collect();
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.actions.is_empty()
    }
}

impl DecisionMaker for ScriptedDecisionMaker {
    fn choose_action(&mut self, _game: &GameState, _ctx: &PriorityContext) -> LegalAction {
        self.actions.pop_front().unwrap_or(LegalAction::PassPriority)
    }

    fn choose_targets(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        spec: &TargetSpec,
        legal: &[Target],
    ) -> Vec<Target> {
        self.targets
            .pop_front()
            .unwrap_or_else(|| legal.iter().copied().take(spec.min.max(1)).collect())
    }

    fn on_action_rejected(
        &mut self,
        _game: &GameState,
        _player: PlayerId,
        action: &LegalAction,
        error: &ActionError,
    ) {
        self.rejected.push((action.clone(), error.clone()));
    }

    fn on_game_over(&mut self, _game: &GameState, result: &GameResult) {
        self.result = Some(result.clone());
    }
}

/// Routes each question to the asking player's decision maker.
pub struct DecisionRouter {
    players: HashMap<PlayerId, Box<dyn DecisionMaker>>,
    default: Box<dyn DecisionMaker>,
}

impl DecisionRouter {
    pub fn new(default: Box<dyn DecisionMaker>) -> Self {
        Self {
            players: HashMap::new(),
            default,
        }
    }

    pub fn with_player(mut self, player: PlayerId, decision_maker: Box<dyn DecisionMaker>) -> Self {
        self.players.insert(player, decision_maker);
        self
    }

    fn route(&mut self, player: PlayerId) -> &mut dyn DecisionMaker {
        match self.players.get_mut(&player) {
            Some(dm) => dm.as_mut(),
            None => self.default.as_mut(),
        }
    }
}

impl std::fmt::Debug for DecisionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut players: Vec<&PlayerId> = self.players.keys().collect();
        players.sort();
        f.debug_struct("DecisionRouter")
            .field("players", &players)
            .finish_non_exhaustive()
    }
}

impl DecisionMaker for DecisionRouter {
    fn choose_action(&mut self, game: &GameState, ctx: &PriorityContext) -> LegalAction {
        self.route(ctx.player).choose_action(game, ctx)
    }

    fn choose_targets(
        &mut self,
        game: &GameState,
        player: PlayerId,
        spec: &TargetSpec,
        legal: &[Target],
    ) -> Vec<Target> {
        self.route(player).choose_targets(game, player, spec, legal)
    }

    fn choose_mode(&mut self, game: &GameState, player: PlayerId, modes: &[String]) -> usize {
        self.route(player).choose_mode(game, player, modes)
    }

    fn choose_order(&mut self, game: &GameState, player: PlayerId, items: &[String]) -> Vec<usize> {
        self.route(player).choose_order(game, player, items)
    }

    fn choose_distribution(
        &mut self,
        game: &GameState,
        player: PlayerId,
        total: u32,
        targets: &[Target],
    ) -> Vec<u32> {
        self.route(player)
            .choose_distribution(game, player, total, targets)
    }

    fn choose_discard(
        &mut self,
        game: &GameState,
        player: PlayerId,
        count: usize,
        hand: &[ObjectId],
    ) -> Vec<ObjectId> {
        self.route(player).choose_discard(game, player, count, hand)
    }

    fn on_action_rejected(
        &mut self,
        game: &GameState,
        player: PlayerId,
        action: &LegalAction,
        error: &ActionError,
    ) {
        self.route(player)
            .on_action_rejected(game, player, action, error);
    }

    fn on_game_over(&mut self, game: &GameState, result: &GameResult) {
        for dm in self.players.values_mut() {
            dm.on_game_over(game, result);
        }
        self.default.on_game_over(game, result);
    }
}
