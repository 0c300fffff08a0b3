//! Game loop orchestrator.
//!
//! Drives a game from the current state to its end: state-based actions,
//! triggered abilities, priority, resolution and step advancement, in that
//! order, with every player decision delegated to a [`DecisionMaker`].

use std::fmt;

use tracing::{debug, info, warn};

use crate::actions::{self, ActionError};
use crate::decision::{DecisionMaker, GameResult, LegalAction, PriorityContext, even_distribution};
use crate::effect::{Choices, EffectContext, EffectError, EffectExecutor};
use crate::game_state::{GameState, InvariantViolation, Step};
use crate::ids::{ObjectId, PlayerId};
use crate::priority::PriorityError;
use crate::rules;
use crate::stack::StackEntry;
use crate::triggers::TriggeredAbilityEntry;
use crate::turn::{self, TurnError};
use crate::zone::{ZoneId, ZoneKind};

/// Errors that stop the game loop.
#[derive(Debug, Clone)]
pub enum GameLoopError {
    /// Error from turn progression.
    TurnError(TurnError),
    /// Error from priority handling.
    PriorityError(PriorityError),
    /// The zone bookkeeping no longer agrees with itself.
    InvariantViolation(InvariantViolation),
    /// The game is already over.
    GameOver,
    /// An effect failed while resolving. The object still left the stack.
    ResolutionFailed(String),
}

impl From<TurnError> for GameLoopError {
    fn from(err: TurnError) -> Self {
        GameLoopError::TurnError(err)
    }
}

impl From<PriorityError> for GameLoopError {
    fn from(err: PriorityError) -> Self {
        GameLoopError::PriorityError(err)
    }
}

impl From<InvariantViolation> for GameLoopError {
    fn from(err: InvariantViolation) -> Self {
        GameLoopError::InvariantViolation(err)
    }
}

impl fmt::Display for GameLoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameLoopError::TurnError(e) => write!(f, "Turn error: {}", e),
            GameLoopError::PriorityError(e) => write!(f, "Priority error: {}", e),
            GameLoopError::InvariantViolation(e) => write!(f, "Invariant violation: {}", e),
            GameLoopError::GameOver => write!(f, "Game is over"),
            GameLoopError::ResolutionFailed(msg) => write!(f, "Resolution failed: {}", msg),
        }
    }
}

impl std::error::Error for GameLoopError {}

/// What one call to [`step`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopStep {
    /// A player's chosen action was applied.
    Acted { player: PlayerId, action: LegalAction },
    /// A player ran out of rejected attempts and was made to pass.
    ForcedPass { player: PlayerId },
    /// The top of the stack resolved.
    Resolved(ObjectId),
    /// The turn moved to its next step.
    Advanced,
    /// No one held priority outside a no-priority step; the active player got it.
    PriorityRestored,
    /// The game has ended.
    GameOver(GameResult),
}

// ============================================================================
// State-based actions and triggers
// ============================================================================

/// Applies state-based actions until none apply. Returns true if any did.
pub fn check_and_apply_sbas(game: &mut GameState) -> bool {
    let mut any = false;
    while rules::check_and_apply(game) {
        any = true;
        if game.is_game_over() {
            break;
        }
    }
    any
}

/// Puts every pending trigger on the stack in APNAP order and returns how
/// many went on.
///
/// The active player's triggers go on first so they resolve last. A player
/// with several triggers orders them; a trigger with no legal targets is
/// removed.
pub fn put_triggers_on_stack(game: &mut GameState, dm: &mut dyn DecisionMaker) -> usize {
    let mut pending = game.triggers.take_all();
    if pending.is_empty() {
        return 0;
    }

    let mut placed = 0;
    for controller in game.apnap_order() {
        let (mine, rest): (Vec<TriggeredAbilityEntry>, Vec<TriggeredAbilityEntry>) =
            pending.into_iter().partition(|t| t.controller == controller);
        pending = rest;
        if mine.is_empty() {
            continue;
        }

        for trigger in order_triggers(game, dm, controller, mine) {
            let choices = gather_choices(game, dm, controller, trigger.effect.as_ref());
            let Some(choices) = settle_trigger_choices(game, controller, trigger.effect.as_ref(), choices)
            else {
                debug!(
                    controller = %controller,
                    trigger = %trigger.effect.description(),
                    "trigger removed: no legal targets"
                );
                continue;
            };
            game.put_ability_on_stack(trigger.source, controller, trigger.effect, choices);
            placed += 1;
        }
    }

    // Triggers controlled by players no longer in the game.
    if !pending.is_empty() {
        debug!(count = pending.len(), "dropping triggers of players out of the game");
    }
    placed
}

fn order_triggers(
    game: &GameState,
    dm: &mut dyn DecisionMaker,
    controller: PlayerId,
    mut triggers: Vec<TriggeredAbilityEntry>,
) -> Vec<TriggeredAbilityEntry> {
    if triggers.len() < 2 {
        return triggers;
    }
    let descriptions: Vec<String> = triggers.iter().map(|t| t.effect.description()).collect();
    let order = dm.choose_order(game, controller, &descriptions);

    let mut seen = vec![false; triggers.len()];
    let is_permutation = order.len() == triggers.len()
        && order
            .iter()
            .all(|&i| i < seen.len() && !std::mem::replace(&mut seen[i], true));
    if !is_permutation {
        warn!(player = %controller, ?order, "invalid trigger order; keeping queue order");
        return triggers;
    }

    let mut slots: Vec<Option<TriggeredAbilityEntry>> = triggers.drain(..).map(Some).collect();
    order.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Asks the decision maker for everything `effect` needs.
pub fn gather_choices(
    game: &GameState,
    dm: &mut dyn DecisionMaker,
    player: PlayerId,
    effect: &dyn EffectExecutor,
) -> Choices {
    let mut choices = Choices::default();
    if let Some(spec) = effect.target_spec() {
        let legal = spec.legal_targets(game, player);
        choices.targets = dm.choose_targets(game, player, &spec, &legal);
    }
    let modes = effect.modes();
    if !modes.is_empty() {
        choices.mode = Some(dm.choose_mode(game, player, &modes));
    }
    if let Some(total) = effect.distribution() {
        if choices.targets.len() > 1 {
            choices.distribution = dm.choose_distribution(game, player, total, &choices.targets);
        }
    }
    choices
}

/// Triggers can't be re-prompted, so bad answers fall back to the first
/// legal options. `None` when no legal set of choices exists.
fn settle_trigger_choices(
    game: &GameState,
    controller: PlayerId,
    effect: &dyn EffectExecutor,
    mut choices: Choices,
) -> Option<Choices> {
    if !actions::has_legal_choices(game, controller, effect) {
        return None;
    }
    if actions::validate_choices(game, controller, Some(effect), &choices).is_ok() {
        return Some(choices);
    }

    if let Some(spec) = effect.target_spec() {
        let legal = spec.legal_targets(game, controller);
        let mut targets = Vec::new();
        for target in choices.targets.iter().chain(legal.iter()) {
            if targets.len() >= spec.max.max(spec.min) {
                break;
            }
            if legal.contains(target) && !targets.contains(target) {
                let from_choices = choices.targets.contains(target);
                if from_choices || targets.len() < spec.min {
                    targets.push(*target);
                }
            }
        }
        choices.targets = targets;
    }
    let modes = effect.modes();
    if !modes.is_empty() {
        choices.mode = Some(choices.mode.filter(|&m| m < modes.len()).unwrap_or(0));
    }
    if let Some(total) = effect.distribution() {
        choices.distribution = if choices.targets.len() > 1 {
            even_distribution(total, choices.targets.len())
        } else {
            Vec::new()
        };
    }

    actions::validate_choices(game, controller, Some(effect), &choices)
        .ok()
        .map(|()| choices)
}

// ============================================================================
// Actions
// ============================================================================

/// Applies an action chosen by `player`. Anything outside `legal` is rejected
/// with the most specific reason available.
fn apply_action(
    game: &mut GameState,
    dm: &mut dyn DecisionMaker,
    player: PlayerId,
    action: &LegalAction,
    legal: &[LegalAction],
) -> Result<(), ActionError> {
    if !legal.contains(action) {
        return Err(explain_illegal(game, player, action));
    }

    match *action {
        LegalAction::PassPriority => actions::perform_pass_priority(game, player).map(|_| ()),
        LegalAction::PlayLand { land_id } => actions::perform_play_land(game, player, land_id),
        LegalAction::CastSpell { spell_id } => {
            let choices = game
                .definition_of(spell_id)
                .and_then(|def| {
                    def.spell_effect
                        .as_deref()
                        .map(|effect| gather_choices(game, dm, player, effect))
                })
                .unwrap_or_default();
            actions::perform_cast_spell(game, player, spell_id, choices)
        }
        LegalAction::ActivateAbility {
            source,
            ability_index,
        } => {
            let choices = game
                .definition_of(source)
                .and_then(|def| {
                    def.abilities
                        .get(ability_index)
                        .and_then(|ability| ability.effect())
                        .map(|effect| gather_choices(game, dm, player, effect))
                })
                .unwrap_or_default();
            actions::perform_activate_ability(game, player, source, ability_index, choices)
        }
    }
}

fn explain_illegal(game: &GameState, player: PlayerId, action: &LegalAction) -> ActionError {
    let specific = match *action {
        LegalAction::PassPriority => Err(ActionError::NotYourPriority),
        LegalAction::PlayLand { land_id } => actions::can_play_land(game, player, land_id),
        LegalAction::CastSpell { spell_id } => actions::can_cast_spell(game, player, spell_id),
        LegalAction::ActivateAbility {
            source,
            ability_index,
        } => actions::can_activate_ability(game, player, source, ability_index),
    };
    specific.err().unwrap_or(ActionError::NotLegal)
}

// ============================================================================
// Resolution
// ============================================================================

/// Drops targets that became illegal. `None` means every target is gone and
/// the object is removed without effect.
fn recheck_targets(
    game: &GameState,
    controller: PlayerId,
    effect: Option<&dyn EffectExecutor>,
    choices: &Choices,
) -> Option<Choices> {
    let Some(spec) = effect.and_then(|e| e.target_spec()) else {
        return Some(choices.clone());
    };
    if choices.targets.is_empty() {
        return Some(choices.clone());
    }

    let legal = spec.legal_targets(game, controller);
    let mut kept = Choices {
        mode: choices.mode,
        ..Choices::default()
    };
    for (i, target) in choices.targets.iter().enumerate() {
        if legal.contains(target) {
            kept.targets.push(*target);
            if let Some(&amount) = choices.distribution.get(i) {
                kept.distribution.push(amount);
            }
        }
    }
    (!kept.targets.is_empty()).then_some(kept)
}

fn run_effect(
    game: &mut GameState,
    effect: &dyn EffectExecutor,
    source: Option<ObjectId>,
    controller: PlayerId,
    choices: &Choices,
) -> Result<(), EffectError> {
    let ctx = EffectContext::new(source, controller, choices);
    effect.execute(game, &ctx)
}

/// Resolves the top object of the stack.
///
/// The effect runs while the object is still on the stack. A spell then goes
/// to the battlefield (permanents) or its owner's graveyard; an ability ceases
/// to exist. Returns the resolved id, or `None` if the stack was empty.
pub fn resolve_top_of_stack(game: &mut GameState) -> Result<Option<ObjectId>, GameLoopError> {
    let Some(entry) = game.stack.peek().cloned() else {
        return Ok(None);
    };

    let outcome = match &entry {
        StackEntry::Spell {
            id,
            controller,
            choices,
            ..
        } => {
            let def = game.definition_of(*id);
            let effect = def.as_ref().and_then(|d| d.spell_effect.as_deref());
            let result = match recheck_targets(game, *controller, effect, choices) {
                Some(choices) => match effect {
                    Some(effect) => run_effect(game, effect, Some(*id), *controller, &choices),
                    None => Ok(()),
                },
                None => {
                    debug!(spell = %id, "spell fizzles: all targets illegal");
                    game.move_to(*id, ZoneKind::Graveyard)?;
                    return Ok(Some(*id));
                }
            };

            let is_permanent = def.as_ref().is_some_and(|d| d.is_permanent());
            if is_permanent {
                game.move_object(*id, ZoneId::battlefield(), None)?;
                if let Some(obj) = game.object_mut(*id) {
                    obj.controller = *controller;
                }
            } else {
                game.move_to(*id, ZoneKind::Graveyard)?;
            }
            result
        }
        StackEntry::Ability {
            id,
            source,
            controller,
            effect,
            choices,
        } => {
            let result = match recheck_targets(game, *controller, Some(effect.as_ref()), choices) {
                Some(choices) => run_effect(game, effect.as_ref(), *source, *controller, &choices),
                None => {
                    debug!(ability = %id, "ability fizzles: all targets illegal");
                    Ok(())
                }
            };
            game.remove_from_game(*id);
            result
        }
    };

    debug!(object = %entry.id(), controller = %entry.controller(), "resolved");
    outcome.map_err(|err| {
        warn!(object = %entry.id(), error = %err, "effect failed during resolution");
        GameLoopError::ResolutionFailed(err.to_string())
    })?;
    Ok(Some(entry.id()))
}

// ============================================================================
// The loop
// ============================================================================

fn finish(game: &GameState, dm: &mut dyn DecisionMaker, result: GameResult) -> LoopStep {
    dm.on_game_over(game, &result);
    LoopStep::GameOver(result)
}

fn over_turn_limit(game: &GameState) -> bool {
    game.config
        .turn_limit
        .is_some_and(|limit| game.turn.turn_number > limit)
}

/// Runs one unit of work: one player decision, one resolution, or one step
/// advance, with state-based actions and triggers handled first.
pub fn step(game: &mut GameState, dm: &mut dyn DecisionMaker) -> Result<LoopStep, GameLoopError> {
    if let Some(result) = &game.result {
        return Ok(LoopStep::GameOver(result.clone()));
    }
    game.validate_zone_consistency()?;

    let sbas_applied = check_and_apply_sbas(game);
    if let Some(result) = game.result.clone() {
        return Ok(finish(game, dm, result));
    }

    // Something happened during cleanup: players get priority, and cleanup
    // runs again once they are done.
    if game.turn.step == Some(Step::Cleanup)
        && game.priority.holder().is_none()
        && !game.priority.ready_to_resolve_or_advance()
        && (sbas_applied || !game.triggers.is_empty())
    {
        game.turn.repeat_cleanup = true;
        game.priority.set(game.active_player());
    }

    if let Some(holder) = game.priority.holder() {
        if !game.triggers.is_empty() {
            if put_triggers_on_stack(game, dm) > 0 {
                game.priority.set(game.active_player());
            }
        } else if game.player(holder).is_some_and(|p| !p.is_in_game()) {
            match game.next_player_in_game(holder) {
                Some(next) => game.priority.set(next),
                None => game.priority.clear(),
            }
        }
    }

    if let Some(player) = game.priority.holder() {
        return decide(game, dm, player);
    }

    if game.priority.ready_to_resolve_or_advance() {
        if !game.stack.is_empty() {
            let resolved = resolve_top_of_stack(game);
            check_and_apply_sbas(game);
            if let Some(result) = game.result.clone() {
                resolved?;
                return Ok(finish(game, dm, result));
            }
            game.priority.set(game.active_player());
            return match resolved? {
                Some(id) => Ok(LoopStep::Resolved(id)),
                None => Ok(LoopStep::PriorityRestored),
            };
        }
        return advance(game, dm);
    }

    if turn::is_no_priority_step(game) {
        return advance(game, dm);
    }

    warn!(
        step = %turn::current_phase_description(game),
        "no priority holder; giving priority to the active player"
    );
    game.priority.set(game.active_player());
    Ok(LoopStep::PriorityRestored)
}

fn decide(
    game: &mut GameState,
    dm: &mut dyn DecisionMaker,
    player: PlayerId,
) -> Result<LoopStep, GameLoopError> {
    let attempts = game.config.max_rejected_actions.max(1);
    for _ in 0..attempts {
        let ctx = PriorityContext::new(game, player);
        let action = dm.choose_action(game, &ctx);
        match apply_action(game, dm, player, &action, &ctx.legal_actions) {
            Ok(()) => return Ok(LoopStep::Acted { player, action }),
            Err(err) => {
                debug!(player = %player, ?action, error = %err, "action rejected");
                dm.on_action_rejected(game, player, &action, &err);
            }
        }
    }

    warn!(player = %player, attempts, "too many rejected actions; passing priority");
    let players = game.players_in_game();
    game.priority.pass(player, &players)?;
    Ok(LoopStep::ForcedPass { player })
}

fn advance(game: &mut GameState, dm: &mut dyn DecisionMaker) -> Result<LoopStep, GameLoopError> {
    turn::advance_step(game, dm)?;
    if over_turn_limit(game) {
        let result = GameResult::Remaining(game.players_in_game());
        info!(turn = game.turn.turn_number, ?result, "turn limit reached");
        game.result = Some(result.clone());
        return Ok(finish(game, dm, result));
    }
    Ok(LoopStep::Advanced)
}

/// Runs the game until it ends or reaches the configured turn limit.
///
/// The game must already be started. Calling this on a finished game is an
/// error.
pub fn run_game(game: &mut GameState, dm: &mut dyn DecisionMaker) -> Result<GameResult, GameLoopError> {
    if game.is_game_over() {
        return Err(GameLoopError::GameOver);
    }
    info!(players = game.players.len(), "game started");
    loop {
        if let LoopStep::GameOver(result) = step(game, dm)? {
            return Ok(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;
    use crate::config::GameConfig;
    use crate::decision::{AutoPassDecisionMaker, ScriptedDecisionMaker};
    use crate::effect::{GainLifeEffect, LoseLifeEffect, Target, TargetFilter, TargetSpec};
    use crate::game_state::Phase;
    use std::sync::Arc;

    fn game_in_main_phase(players: usize) -> GameState {
        let names = (0..players).map(|i| format!("P{}", i)).collect();
        let mut game = GameState::new(names, GameConfig::default());
        game.turn.phase = Phase::FirstMain;
        game.turn.step = None;
        game.priority.set(PlayerId::from_index(0));
        game
    }

    #[test]
    fn test_sba_fixed_point() {
        let mut game = game_in_main_phase(2);
        assert!(!check_and_apply_sbas(&mut game));
        game.players[1].life = 0;
        assert!(check_and_apply_sbas(&mut game));
        assert_eq!(game.result, Some(GameResult::Winner(PlayerId::from_index(0))));
    }

    #[test]
    fn test_ability_resolves_and_ceases_to_exist() {
        let mut game = game_in_main_phase(2);
        let alice = PlayerId::from_index(0);
        let id = game.put_ability_on_stack(
            None,
            alice,
            Box::new(GainLifeEffect::you(3)),
            Choices::default(),
        );

        assert_eq!(resolve_top_of_stack(&mut game).unwrap(), Some(id));
        assert_eq!(game.players[0].life, 23);
        assert!(game.stack.is_empty());
        assert!(game.object(id).is_none());
        assert!(resolve_top_of_stack(&mut game).unwrap().is_none());
    }

    #[test]
    fn test_spell_with_vanished_target_fizzles() {
        let mut game = game_in_main_phase(2);
        let cards = CardRegistry::with_builtin_cards();
        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let bolt = Arc::clone(cards.get("Lightning Bolt").unwrap());
        let bears = Arc::clone(cards.get("Grizzly Bears").unwrap());

        let bolt_id = game.create_object_from_definition(&bolt, alice, ZoneKind::Hand).unwrap();
        let bears_id = game.create_object_from_definition(&bears, bob, ZoneKind::Battlefield).unwrap();
        let choices = Choices {
            targets: vec![Target::Object(bears_id)],
            ..Choices::default()
        };
        game.put_spell_on_stack(bolt_id, alice, choices).unwrap();
        game.move_to(bears_id, ZoneKind::Graveyard).unwrap();

        assert_eq!(resolve_top_of_stack(&mut game).unwrap(), Some(bolt_id));
        assert!(game.players[0].graveyard.contains(bolt_id));
        assert_eq!(game.players[1].life, 20);
    }

    #[test]
    fn test_triggers_go_on_in_apnap_order() {
        let mut game = game_in_main_phase(3);
        // Bob is active; queue order is C, A, B.
        game.turn.active_player = PlayerId::from_index(1);
        for p in [2u8, 0, 1] {
            game.triggers.add(TriggeredAbilityEntry::new(
                None,
                PlayerId::from_index(p),
                Box::new(GainLifeEffect::you(1)),
            ));
        }

        let mut dm = AutoPassDecisionMaker;
        assert_eq!(put_triggers_on_stack(&mut game, &mut dm), 3);

        // Top of the stack is the last placed: B first, then C, then A.
        let mut controllers = Vec::new();
        while let Some(entry) = game.stack.peek() {
            controllers.push(entry.controller().0);
            let id = entry.id();
            game.remove_from_game(id);
        }
        assert_eq!(controllers, vec![0, 2, 1]);
    }

    /// Deals 1 damage to target creature.
    #[derive(Debug, Clone)]
    struct PingCreature;

    impl EffectExecutor for PingCreature {
        fn execute(&self, game: &mut GameState, ctx: &EffectContext) -> Result<(), EffectError> {
            let target = ctx.targets.first().copied().ok_or(EffectError::MissingTarget)?;
            if let Target::Object(id) = target {
                if let Some(obj) = game.object_mut(id) {
                    obj.damage += 1;
                }
            }
            Ok(())
        }

        fn clone_box(&self) -> Box<dyn EffectExecutor> {
            Box::new(self.clone())
        }

        fn description(&self) -> String {
            "deal 1 damage to target creature".to_string()
        }

        fn target_spec(&self) -> Option<TargetSpec> {
            Some(TargetSpec::single(TargetFilter::Creature))
        }
    }

    #[test]
    fn test_trigger_without_legal_targets_is_removed() {
        let mut game = game_in_main_phase(2);
        let alice = PlayerId::from_index(0);
        game.triggers
            .add(TriggeredAbilityEntry::new(None, alice, Box::new(PingCreature)));
        game.triggers.add(TriggeredAbilityEntry::new(
            None,
            alice,
            Box::new(LoseLifeEffect::each_opponent(1)),
        ));

        let mut dm = AutoPassDecisionMaker;
        assert_eq!(put_triggers_on_stack(&mut game, &mut dm), 1);
        assert_eq!(game.stack.len(), 1);
        assert!(game.triggers.is_empty());
    }

    #[test]
    fn test_missing_priority_holder_goes_to_active_player() {
        let mut game = game_in_main_phase(2);
        let bob = PlayerId::from_index(1);
        game.turn.active_player = bob;
        game.priority.clear();

        let outcome = step(&mut game, &mut AutoPassDecisionMaker).unwrap();

        assert_eq!(outcome, LoopStep::PriorityRestored);
        assert_eq!(game.priority.holder(), Some(bob));
        assert!(game.priority.passed().is_empty());
        assert_eq!(game.turn.phase, Phase::FirstMain);
    }

    #[test]
    fn test_illegal_action_is_rejected_then_pass_forced() {
        let mut game = game_in_main_phase(2);
        game.config.max_rejected_actions = 2;
        let alice = PlayerId::from_index(0);
        let bogus = LegalAction::PlayLand {
            land_id: ObjectId::from_raw(u64::MAX),
        };
        let mut dm = ScriptedDecisionMaker::new(vec![bogus.clone(), bogus]);

        let outcome = step(&mut game, &mut dm).unwrap();
        assert_eq!(outcome, LoopStep::ForcedPass { player: alice });
        assert_eq!(dm.rejected.len(), 2);
        assert_eq!(game.priority.holder(), Some(PlayerId::from_index(1)));
    }

    #[test]
    fn test_autopass_game_ends_by_decking() {
        let mut config = GameConfig::default();
        config.seed = Some(7);
        let mut game = GameState::new(vec!["A".to_string(), "B".to_string()], config);
        game.start_game();
        let mut dm = AutoPassDecisionMaker;

        let result = run_game(&mut game, &mut dm).unwrap();
        // Libraries are empty; the first player to draw loses.
        assert!(matches!(result, GameResult::Winner(_) | GameResult::Draw));
        assert!(game.is_game_over());
        assert!(matches!(run_game(&mut game, &mut dm), Err(GameLoopError::GameOver)));
    }

    #[test]
    fn test_turn_limit_stops_the_game() {
        let mut config = GameConfig::default();
        config.seed = Some(1);
        config.turn_limit = Some(3);
        config.starting_hand_size = 0;
        let mut game = GameState::new(vec!["A".to_string(), "B".to_string()], config);
        let cards = CardRegistry::with_builtin_cards();
        let forest = Arc::clone(cards.get("Forest").unwrap());
        for player in [PlayerId::from_index(0), PlayerId::from_index(1)] {
            for _ in 0..10 {
                game.create_object_from_definition(&forest, player, ZoneKind::Library).unwrap();
            }
        }
        game.start_game();

        let mut dm = AutoPassDecisionMaker;
        let result = run_game(&mut game, &mut dm).unwrap();
        assert_eq!(
            result,
            GameResult::Remaining(vec![PlayerId::from_index(0), PlayerId::from_index(1)])
        );
        assert_eq!(game.turn.turn_number, 4);
    }
}
