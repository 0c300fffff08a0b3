//! Turn structure.
//!
//! This module handles:
//! - Turn and phase progression (untap, upkeep, draw, main, combat, etc.)
//! - Turn-based actions fired on step entry (untapping, drawing, cleanup)
//! - Arming priority for the step just entered

use std::fmt;

use tracing::debug;

use crate::decision::DecisionMaker;
use crate::game_state::{GameState, Phase, Step};
use crate::ids::{ObjectId, PlayerId};

/// Errors that can occur during turn progression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnError {
    /// No players left in the game.
    NoPlayersRemaining,
    /// Invalid state for the requested operation.
    InvalidState { message: String },
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnError::NoPlayersRemaining => write!(f, "no players remaining"),
            TurnError::InvalidState { message } => write!(f, "invalid turn state: {}", message),
        }
    }
}

impl std::error::Error for TurnError {}

/// Returns the next step within a phase, or None if the phase is over.
pub fn next_step(phase: Phase, current_step: Option<Step>) -> Option<Step> {
    match (phase, current_step) {
        // Beginning phase
        (Phase::Beginning, Some(Step::Untap)) => Some(Step::Upkeep),
        (Phase::Beginning, Some(Step::Upkeep)) => Some(Step::Draw),
        (Phase::Beginning, Some(Step::Draw)) => None,
        (Phase::Beginning, None) => Some(Step::Untap),

        // Main phases have no steps
        (Phase::FirstMain, _) => None,
        (Phase::NextMain, _) => None,

        // Combat phase
        (Phase::Combat, Some(Step::BeginCombat)) => Some(Step::DeclareAttackers),
        (Phase::Combat, Some(Step::DeclareAttackers)) => Some(Step::DeclareBlockers),
        (Phase::Combat, Some(Step::DeclareBlockers)) => Some(Step::CombatDamage),
        (Phase::Combat, Some(Step::CombatDamage)) => Some(Step::EndCombat),
        (Phase::Combat, Some(Step::EndCombat)) => None,
        (Phase::Combat, None) => Some(Step::BeginCombat),

        // Ending phase
        (Phase::Ending, Some(Step::End)) => Some(Step::Cleanup),
        (Phase::Ending, Some(Step::Cleanup)) => None,
        (Phase::Ending, None) => Some(Step::End),

        // Invalid combinations
        _ => None,
    }
}

/// Returns the next phase after the given phase.
pub fn next_phase(phase: Phase) -> Option<Phase> {
    match phase {
        Phase::Beginning => Some(Phase::FirstMain),
        Phase::FirstMain => Some(Phase::Combat),
        Phase::Combat => Some(Phase::NextMain),
        Phase::NextMain => Some(Phase::Ending),
        Phase::Ending => None, // Turn ends
    }
}

/// Returns the first step of a phase, if any.
pub fn first_step_of_phase(phase: Phase) -> Option<Step> {
    match phase {
        Phase::Beginning => Some(Step::Untap),
        Phase::FirstMain => None,
        Phase::Combat => Some(Step::BeginCombat),
        Phase::NextMain => None,
        Phase::Ending => Some(Step::End),
    }
}

/// Whether a step belongs to a phase at all.
fn step_belongs_to(phase: Phase, step: Option<Step>) -> bool {
    match step {
        None => matches!(phase, Phase::FirstMain | Phase::NextMain),
        Some(Step::Untap | Step::Upkeep | Step::Draw) => phase == Phase::Beginning,
        Some(
            Step::BeginCombat
            | Step::DeclareAttackers
            | Step::DeclareBlockers
            | Step::CombatDamage
            | Step::EndCombat,
        ) => phase == Phase::Combat,
        Some(Step::End | Step::Cleanup) => phase == Phase::Ending,
    }
}

/// Advances the game to the next step within the current phase.
/// If at the end of a phase, advances to the next phase.
/// If at the end of the turn, advances to the next turn.
///
/// Fires the entered step's turn-based actions and arms priority for it. A
/// cleanup step flagged for repetition is entered again instead.
pub fn advance_step(
    game: &mut GameState,
    decision_maker: &mut dyn DecisionMaker,
) -> Result<(), TurnError> {
    if game.players_in_game().is_empty() {
        return Err(TurnError::NoPlayersRemaining);
    }
    if !step_belongs_to(game.turn.phase, game.turn.step) {
        return Err(TurnError::InvalidState {
            message: format!("{:?} is not a step of {:?}", game.turn.step, game.turn.phase),
        });
    }

    if game.config.empty_pools_each_step {
        game.empty_mana_pools();
    }

    if game.turn.step == Some(Step::Cleanup) && game.turn.repeat_cleanup {
        game.turn.repeat_cleanup = false;
        debug!(turn = game.turn.turn_number, "repeating cleanup");
        enter_current_step(game, decision_maker);
        return Ok(());
    }

    if let Some(next) = next_step(game.turn.phase, game.turn.step) {
        game.turn.step = Some(next);
    } else if let Some(phase) = next_phase(game.turn.phase) {
        game.turn.phase = phase;
        game.turn.step = first_step_of_phase(phase);
    } else {
        start_next_turn(game)?;
    }

    enter_current_step(game, decision_maker);
    Ok(())
}

/// Rotates the active player and resets the turn.
pub fn start_next_turn(game: &mut GameState) -> Result<(), TurnError> {
    let next = game
        .next_player_in_game(game.turn.active_player)
        .ok_or(TurnError::NoPlayersRemaining)?;

    game.turn.active_player = next;
    game.turn.turn_number += 1;
    game.turn.phase = Phase::Beginning;
    game.turn.step = Some(Step::Untap);
    game.turn.repeat_cleanup = false;
    for player in &mut game.players {
        player.begin_turn();
    }
    debug!(turn = game.turn.turn_number, active = %next, "turn started");
    Ok(())
}

/// Fires the turn-based actions of the current step, then arms priority.
pub fn enter_current_step(game: &mut GameState, decision_maker: &mut dyn DecisionMaker) {
    debug!(
        turn = game.turn.turn_number,
        step = %current_phase_description(game),
        "entering step"
    );
    match game.turn.step {
        Some(Step::Untap) => execute_untap_step(game),
        Some(Step::Draw) => execute_draw_step(game),
        Some(Step::Cleanup) => {
            if let Some((player, count)) = cleanup_discard_count(game) {
                let hand = game.player(player).map(|p| p.hand.ids()).unwrap_or_default();
                let chosen = decision_maker.choose_discard(game, player, count, &hand);
                let discards = settle_discard(&hand, chosen, count);
                apply_cleanup_discard(game, &discards);
            }
            execute_cleanup_step(game);
        }
        _ => {}
    }

    if is_no_priority_step(game) {
        game.priority.clear();
    } else {
        game.priority.set(game.turn.active_player);
    }
}

/// Returns true if it's currently "sorcery timing" - main phase with empty stack.
pub fn is_sorcery_timing(game: &GameState) -> bool {
    game.is_main_phase() && game.stack_is_empty()
}

/// Returns true if the current step doesn't grant priority (untap, cleanup normally).
pub fn is_no_priority_step(game: &GameState) -> bool {
    matches!(game.turn.step, Some(Step::Untap) | Some(Step::Cleanup))
}

/// Untaps all permanents controlled by the active player and removes
/// summoning sickness from them.
pub fn execute_untap_step(game: &mut GameState) {
    let active_player = game.turn.active_player;
    for id in game.permanents_controlled_by(active_player) {
        game.untap(id);
        game.remove_summoning_sickness(id);
    }
}

/// Active player draws a card, unless this is the first turn and the
/// first-draw skip is on.
pub fn execute_draw_step(game: &mut GameState) {
    if game.turn.turn_number == 1 && game.config.skip_first_draw {
        debug!("first turn draw skipped");
        return;
    }
    let active_player = game.turn.active_player;
    game.draw_card(active_player);
}

/// How many cards the active player must discard during cleanup.
pub fn cleanup_discard_count(game: &GameState) -> Option<(PlayerId, usize)> {
    let active_player = game.turn.active_player;
    let player = game.player(active_player)?;
    let excess = player.hand_size().saturating_sub(player.max_hand_size);
    (excess > 0).then_some((active_player, excess))
}

/// Takes the chosen cards that are really in hand, at most once each, then
/// fills up from the front of the hand.
fn settle_discard(hand: &[ObjectId], chosen: Vec<ObjectId>, count: usize) -> Vec<ObjectId> {
    let mut discards: Vec<ObjectId> = Vec::with_capacity(count);
    for id in chosen.into_iter().chain(hand.iter().copied()) {
        if discards.len() == count {
            break;
        }
        if hand.contains(&id) && !discards.contains(&id) {
            discards.push(id);
        }
    }
    discards
}

/// Moves the discarded cards to their owners' graveyards.
pub fn apply_cleanup_discard(game: &mut GameState, cards_to_discard: &[ObjectId]) {
    for &card_id in cards_to_discard {
        if let Err(violation) = game.move_to(card_id, crate::zone::ZoneKind::Graveyard) {
            debug_assert!(false, "{}", violation);
        }
    }
    debug!(count = cards_to_discard.len(), "discarded to hand size");
}

/// Empties mana pools and removes marked damage.
pub fn execute_cleanup_step(game: &mut GameState) {
    game.empty_mana_pools();
    for id in game.battlefield.ids() {
        game.clear_damage(id);
    }
}

/// Returns a human-readable description of the current phase/step.
pub fn current_phase_description(game: &GameState) -> String {
    let phase_name = match game.turn.phase {
        Phase::Beginning => "Beginning",
        Phase::FirstMain => "Precombat Main",
        Phase::Combat => "Combat",
        Phase::NextMain => "Postcombat Main",
        Phase::Ending => "Ending",
    };

    if let Some(step) = game.turn.step {
        let step_name = match step {
            Step::Untap => "Untap",
            Step::Upkeep => "Upkeep",
            Step::Draw => "Draw",
            Step::BeginCombat => "Beginning of Combat",
            Step::DeclareAttackers => "Declare Attackers",
            Step::DeclareBlockers => "Declare Blockers",
            Step::CombatDamage => "Combat Damage",
            Step::EndCombat => "End of Combat",
            Step::End => "End Step",
            Step::Cleanup => "Cleanup",
        };
        format!("{} Phase - {} Step", phase_name, step_name)
    } else {
        format!("{} Phase", phase_name)
    }
}

/// Checks if the game is in the combat phase.
pub fn is_combat_phase(game: &GameState) -> bool {
    game.turn.phase == Phase::Combat
}
