//! State-based actions.
//!
//! State-based actions are checked whenever a player would receive priority.
//! They don't use the stack and happen simultaneously: every condition is
//! checked against one state, then every consequence is applied.

use tracing::{debug, info};

use crate::decision::GameResult;
use crate::game_state::GameState;
use crate::ids::{ObjectId, PlayerId};
use crate::object::{CounterType, ObjectKind};
use crate::zone::ZoneKind;

/// A state-based action that needs to be performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateBasedAction {
    /// A player loses the game.
    PlayerLoses {
        player: PlayerId,
        reason: LoseReason,
    },

    /// A creature with lethal damage or toughness 0 or less goes to its
    /// owner's graveyard.
    CreatureDies(ObjectId),

    /// A token not on the battlefield ceases to exist.
    TokenCeasesToExist(ObjectId),

    /// +1/+1 and -1/-1 counters on a permanent annihilate (remove pairs).
    CountersAnnihilate { permanent: ObjectId, count: u32 },
}

/// Reason why a player loses the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoseReason {
    /// Life total is 0 or less.
    ZeroLife,
    /// Attempted to draw from an empty library.
    DrewFromEmptyLibrary,
}

/// Collects every state-based action that applies right now.
pub fn check_state_based_actions(game: &GameState) -> Vec<StateBasedAction> {
    let mut actions = Vec::new();

    check_player_sbas(game, &mut actions);
    check_creature_sbas(game, &mut actions);
    check_token_cleanup(game, &mut actions);
    check_counter_annihilation(game, &mut actions);

    actions
}

fn check_player_sbas(game: &GameState, actions: &mut Vec<StateBasedAction>) {
    for player in game.players.iter().filter(|p| p.is_in_game()) {
        if player.has_lethal_life() {
            actions.push(StateBasedAction::PlayerLoses {
                player: player.id,
                reason: LoseReason::ZeroLife,
            });
        } else if player.drew_from_empty_library {
            actions.push(StateBasedAction::PlayerLoses {
                player: player.id,
                reason: LoseReason::DrewFromEmptyLibrary,
            });
        }
    }
}

fn check_creature_sbas(game: &GameState, actions: &mut Vec<StateBasedAction>) {
    for obj_id in game.battlefield.iter() {
        let (Some(obj), Some(chars)) = (game.object(obj_id), game.characteristics_of(obj_id)) else {
            continue;
        };
        if !chars.is_creature() {
            continue;
        }
        let toughness = chars.toughness.unwrap_or(0);
        if toughness <= 0 || i64::from(obj.damage) >= i64::from(toughness) {
            actions.push(StateBasedAction::CreatureDies(obj_id));
        }
    }
}

fn check_token_cleanup(game: &GameState, actions: &mut Vec<StateBasedAction>) {
    for obj in game.registry.iter() {
        if obj.kind == ObjectKind::Token && obj.zone.kind != ZoneKind::Battlefield {
            actions.push(StateBasedAction::TokenCeasesToExist(obj.id));
        }
    }
}

fn check_counter_annihilation(game: &GameState, actions: &mut Vec<StateBasedAction>) {
    for obj_id in game.battlefield.iter() {
        let Some(obj) = game.object(obj_id) else {
            continue;
        };
        let plus = obj.counter_count(CounterType::PlusOnePlusOne);
        let minus = obj.counter_count(CounterType::MinusOneMinusOne);
        if plus > 0 && minus > 0 {
            actions.push(StateBasedAction::CountersAnnihilate {
                permanent: obj_id,
                count: plus.min(minus),
            });
        }
    }
}

/// Applies all pending state-based actions. Returns true if any applied.
pub fn apply_state_based_actions(game: &mut GameState) -> bool {
    let actions = check_state_based_actions(game);
    if actions.is_empty() {
        return false;
    }

    for action in actions {
        debug!(?action, "state-based action");
        apply_single_sba(game, action);
    }
    update_game_result(game);
    true
}

fn apply_single_sba(game: &mut GameState, action: StateBasedAction) {
    match action {
        StateBasedAction::PlayerLoses { player, .. } => {
            if let Some(p) = game.player_mut(player) {
                p.has_lost = true;
            }
        }
        StateBasedAction::CreatureDies(id) => {
            if let Err(violation) = game.move_to(id, ZoneKind::Graveyard) {
                debug_assert!(false, "{}", violation);
            }
        }
        StateBasedAction::TokenCeasesToExist(id) => {
            game.remove_from_game(id);
        }
        StateBasedAction::CountersAnnihilate { permanent, count } => {
            if let Some(obj) = game.object_mut(permanent) {
                obj.remove_counters(CounterType::PlusOnePlusOne, count);
                obj.remove_counters(CounterType::MinusOneMinusOne, count);
            }
        }
    }
}

/// Records the result once at most one player is left. A game that started
/// with one player ends only when that player loses.
fn update_game_result(game: &mut GameState) {
    if game.result.is_some() {
        return;
    }
    let remaining = game.players_in_game();
    let result = match remaining.as_slice() {
        [] => GameResult::Draw,
        [winner] if game.players.len() > 1 => GameResult::Winner(*winner),
        _ => return,
    };
    info!(?result, turn = game.turn.turn_number, "game over");
    game.result = Some(result);
}

/// Runs the checker once. Callers loop on it until it returns false.
pub fn check_and_apply(game: &mut GameState) -> bool {
    apply_state_based_actions(game)
}
