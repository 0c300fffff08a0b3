//! Player actions taken while holding priority.
//!
//! Every action is checked in full before anything changes; a failed check
//! leaves the game exactly as it was. Each successful action gives priority
//! back to the actor, which also forgets earlier passes.

use std::fmt;

use tracing::debug;

use crate::ability::ActivationContext;
use crate::effect::{Choices, EffectExecutor};
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::mana::{InsufficientMana, ManaCost};
use crate::priority::{PassOutcome, PriorityError};
use crate::types::CardType;
use crate::zone::{ZoneId, ZoneKind};

/// Broad class of a rejected action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The action fails a legality predicate.
    IllegalAction,
    /// A cost cannot be paid.
    InsufficientResource,
}

/// Errors that can occur when attempting a player action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// You don't have priority.
    NotYourPriority,

    /// Not the active player.
    NotActivePlayer,

    /// Sorcery-speed action outside the active player's main phase.
    WrongTiming,

    /// The stack must be empty for this action.
    StackNotEmpty,

    /// Already played maximum lands this turn.
    AlreadyPlayedLand,

    /// The object is not a land.
    NotALand,

    /// The object can't be cast (a land, or nothing to cast).
    NotCastable,

    /// The object is not in the expected zone.
    WrongZone {
        expected: ZoneKind,
        actual: ZoneKind,
    },

    /// Object not found.
    ObjectNotFound,

    /// Player not found.
    PlayerNotFound,

    /// The permanent is already tapped.
    AlreadyTapped,

    /// The object doesn't have the required ability.
    NoSuchAbility,

    /// The ability's activation restrictions aren't met.
    CantActivate,

    /// Targets, mode or distribution don't fit the effect.
    InvalidChoices,

    /// The action isn't among the legal actions.
    NotLegal,

    /// Cannot pay the cost.
    InsufficientMana(InsufficientMana),
}

impl ActionError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ActionError::InsufficientMana(_) => ErrorClass::InsufficientResource,
            _ => ErrorClass::IllegalAction,
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NotYourPriority => write!(f, "you don't have priority"),
            ActionError::NotActivePlayer => write!(f, "not the active player"),
            ActionError::WrongTiming => write!(f, "only at sorcery speed"),
            ActionError::StackNotEmpty => write!(f, "the stack is not empty"),
            ActionError::AlreadyPlayedLand => write!(f, "no land plays left this turn"),
            ActionError::NotALand => write!(f, "not a land"),
            ActionError::NotCastable => write!(f, "can't be cast"),
            ActionError::WrongZone { expected, actual } => {
                write!(f, "expected an object in {:?}, found {:?}", expected, actual)
            }
            ActionError::ObjectNotFound => write!(f, "object not found"),
            ActionError::PlayerNotFound => write!(f, "player not found"),
            ActionError::AlreadyTapped => write!(f, "already tapped"),
            ActionError::NoSuchAbility => write!(f, "no such ability"),
            ActionError::CantActivate => write!(f, "ability can't be activated now"),
            ActionError::InvalidChoices => write!(f, "invalid targets, mode or distribution"),
            ActionError::NotLegal => write!(f, "not a legal action"),
            ActionError::InsufficientMana(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::InsufficientMana(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InsufficientMana> for ActionError {
    fn from(err: InsufficientMana) -> Self {
        ActionError::InsufficientMana(err)
    }
}

impl From<PriorityError> for ActionError {
    fn from(_: PriorityError) -> Self {
        ActionError::NotYourPriority
    }
}

fn require_priority(game: &GameState, player: PlayerId) -> Result<(), ActionError> {
    if !game.priority.has_priority(player) {
        return Err(ActionError::NotYourPriority);
    }
    Ok(())
}

fn require_zone(game: &GameState, id: ObjectId, zone: ZoneId) -> Result<(), ActionError> {
    let object = game.object(id).ok_or(ActionError::ObjectNotFound)?;
    if object.zone != zone {
        return Err(ActionError::WrongZone {
            expected: zone.kind,
            actual: object.zone.kind,
        });
    }
    Ok(())
}

/// Active player, main phase, empty stack.
fn require_sorcery_timing(game: &GameState, player: PlayerId) -> Result<(), ActionError> {
    if game.turn.active_player != player {
        return Err(ActionError::NotActivePlayer);
    }
    if !game.is_main_phase() {
        return Err(ActionError::WrongTiming);
    }
    if !game.stack_is_empty() {
        return Err(ActionError::StackNotEmpty);
    }
    Ok(())
}

// === Choices ===

/// True when the effect can be given a legal set of choices at all.
pub fn has_legal_choices(game: &GameState, player: PlayerId, effect: &dyn EffectExecutor) -> bool {
    match effect.target_spec() {
        Some(spec) => spec.legal_targets(game, player).len() >= spec.min,
        None => true,
    }
}

/// Checks the choices made for an effect against the current state.
pub fn validate_choices(
    game: &GameState,
    player: PlayerId,
    effect: Option<&dyn EffectExecutor>,
    choices: &Choices,
) -> Result<(), ActionError> {
    let Some(effect) = effect else {
        return if choices == &Choices::default() {
            Ok(())
        } else {
            Err(ActionError::InvalidChoices)
        };
    };

    match effect.target_spec() {
        Some(spec) => {
            let count = choices.targets.len();
            if count < spec.min || count > spec.max {
                return Err(ActionError::InvalidChoices);
            }
            let legal = spec.legal_targets(game, player);
            for (i, target) in choices.targets.iter().enumerate() {
                if !legal.contains(target) || choices.targets[..i].contains(target) {
                    return Err(ActionError::InvalidChoices);
                }
            }
        }
        None if !choices.targets.is_empty() => return Err(ActionError::InvalidChoices),
        None => {}
    }

    let modes = effect.modes();
    match choices.mode {
        Some(mode) if mode >= modes.len() => return Err(ActionError::InvalidChoices),
        None if !modes.is_empty() => return Err(ActionError::InvalidChoices),
        _ => {}
    }

    if let Some(total) = effect.distribution() {
        if !choices.distribution.is_empty() {
            let sum: u32 = choices.distribution.iter().sum();
            if choices.distribution.len() != choices.targets.len()
                || choices.distribution.contains(&0)
                || sum != total
            {
                return Err(ActionError::InvalidChoices);
            }
        }
    } else if !choices.distribution.is_empty() {
        return Err(ActionError::InvalidChoices);
    }

    Ok(())
}

// === Play Land ===

pub fn can_play_land(game: &GameState, player: PlayerId, land_id: ObjectId) -> Result<(), ActionError> {
    require_priority(game, player)?;
    require_sorcery_timing(game, player)?;

    let player_data = game.player(player).ok_or(ActionError::PlayerNotFound)?;
    if !player_data.can_play_land() {
        return Err(ActionError::AlreadyPlayedLand);
    }

    require_zone(game, land_id, ZoneId::hand(player))?;
    if !game.is_land(land_id) {
        return Err(ActionError::NotALand);
    }
    Ok(())
}

pub fn perform_play_land(
    game: &mut GameState,
    player: PlayerId,
    land_id: ObjectId,
) -> Result<(), ActionError> {
    can_play_land(game, player, land_id)?;

    game.move_object(land_id, ZoneId::battlefield(), None)
        .map_err(|_| ActionError::ObjectNotFound)?;
    if let Some(player_data) = game.player_mut(player) {
        player_data.record_land_play();
    }

    debug!(player = %player, land = %land_id, "played land");
    game.priority.set(player);
    Ok(())
}

// === Cast Spell ===

fn spell_cost(game: &GameState, spell_id: ObjectId) -> ManaCost {
    game.characteristics_of(spell_id)
        .and_then(|c| c.mana_cost)
        .unwrap_or_default()
}

pub fn can_cast_spell(game: &GameState, player: PlayerId, spell_id: ObjectId) -> Result<(), ActionError> {
    require_priority(game, player)?;
    require_zone(game, spell_id, ZoneId::hand(player))?;

    let chars = game
        .characteristics_of(spell_id)
        .ok_or(ActionError::ObjectNotFound)?;
    if chars.is_land() || chars.card_types.is_empty() {
        return Err(ActionError::NotCastable);
    }
    if !chars.has_card_type(CardType::Instant) {
        require_sorcery_timing(game, player)?;
    }

    let cost = spell_cost(game, spell_id);
    game.player(player)
        .ok_or(ActionError::PlayerNotFound)?
        .mana_pool
        .allocate(&cost)?;
    Ok(())
}

/// Pays the spell's cost, then moves it from hand to the stack.
pub fn perform_cast_spell(
    game: &mut GameState,
    player: PlayerId,
    spell_id: ObjectId,
    choices: Choices,
) -> Result<(), ActionError> {
    can_cast_spell(game, player, spell_id)?;
    let def = game.definition_of(spell_id);
    let effect = def.as_ref().and_then(|d| d.spell_effect.as_deref());
    validate_choices(game, player, effect, &choices)?;

    let cost = spell_cost(game, spell_id);
    game.player_mut(player)
        .ok_or(ActionError::PlayerNotFound)?
        .mana_pool
        .pay(&cost)?;
    game.put_spell_on_stack(spell_id, player, choices)
        .map_err(|_| ActionError::ObjectNotFound)?;

    debug!(player = %player, spell = %spell_id, "cast spell");
    game.priority.set(player);
    Ok(())
}

// === Activate Ability ===

pub fn can_activate_ability(
    game: &GameState,
    player: PlayerId,
    source: ObjectId,
    ability_index: usize,
) -> Result<(), ActionError> {
    require_priority(game, player)?;
    require_zone(game, source, ZoneId::battlefield())?;

    let def = game.definition_of(source).ok_or(ActionError::NoSuchAbility)?;
    let ability = def
        .abilities
        .get(ability_index)
        .ok_or(ActionError::NoSuchAbility)?;

    if ability.can_activate(game, source, player) {
        return Ok(());
    }
    match game.object(source) {
        Some(obj) if obj.controller != player => Err(ActionError::CantActivate),
        Some(obj) if obj.is_tapped() => Err(ActionError::AlreadyTapped),
        Some(_) => Err(ActionError::CantActivate),
        None => Err(ActionError::ObjectNotFound),
    }
}

/// Mana abilities apply right away; other abilities pay and go on the stack.
pub fn perform_activate_ability(
    game: &mut GameState,
    player: PlayerId,
    source: ObjectId,
    ability_index: usize,
    choices: Choices,
) -> Result<(), ActionError> {
    can_activate_ability(game, player, source, ability_index)?;
    let def = game.definition_of(source).ok_or(ActionError::NoSuchAbility)?;
    let ability = def
        .abilities
        .get(ability_index)
        .ok_or(ActionError::NoSuchAbility)?;
    validate_choices(game, player, ability.effect(), &choices)?;

    let ctx = ActivationContext::new(source, player).with_choices(choices);
    ability.activate(game, &ctx)?;

    debug!(
        player = %player,
        source = %source,
        ability = %ability.description(),
        "activated ability"
    );
    game.priority.set(player);
    Ok(())
}

// === Pass Priority ===

pub fn perform_pass_priority(game: &mut GameState, player: PlayerId) -> Result<PassOutcome, ActionError> {
    let players = game.players_in_game();
    let outcome = game.priority.pass(player, &players)?;
    Ok(outcome)
}
