//! Per-game policy knobs.

use std::fmt;
#[cfg(feature = "serialization")]
use std::path::Path;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct GameConfig {
    pub starting_life: i32,
    pub starting_hand_size: usize,
    pub max_hand_size: usize,
    pub land_plays_per_turn: u32,
    /// The player who goes first skips the draw on turn 1.
    pub skip_first_draw: bool,
    /// Also empty mana pools whenever a step or phase ends. Pools are always
    /// emptied during cleanup.
    pub empty_pools_each_step: bool,
    pub shuffle_libraries: bool,
    /// `None` seeds the game RNG from the OS.
    pub seed: Option<u64>,
    /// `run_game` stops after this many turns.
    pub turn_limit: Option<u32>,
    /// Consecutive illegal choices before the player is made to pass.
    pub max_rejected_actions: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            starting_hand_size: 7,
            max_hand_size: 7,
            land_plays_per_turn: 1,
            skip_first_draw: true,
            empty_pools_each_step: false,
            shuffle_libraries: true,
            seed: None,
            turn_limit: None,
            max_rejected_actions: 8,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    #[cfg(feature = "serialization")]
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "failed to read config: {}", err),
            #[cfg(feature = "serialization")]
            ConfigError::Parse(err) => write!(f, "failed to parse config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            #[cfg(feature = "serialization")]
            ConfigError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

#[cfg(feature = "serialization")]
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

#[cfg(feature = "serialization")]
impl GameConfig {
    /// Parses a JSON object. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
