//! Rules that apply without a player acting.

pub mod state_based;

pub use state_based::{
    LoseReason, StateBasedAction, apply_state_based_actions, check_and_apply,
    check_state_based_actions,
};
