use crate::config::GameConfig;
use crate::ids::PlayerId;
use crate::mana::ManaPool;
use crate::zone::{Zone, ZoneId, ZoneKind};

/// Complete player state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    // Life and resources
    pub life: i32,
    pub mana_pool: ManaPool,

    // Per-turn tracking
    pub lands_played_this_turn: u32,
    pub land_plays_per_turn: u32,

    // Hand size
    pub max_hand_size: usize,

    // Game status
    pub has_lost: bool,
    /// Set when a draw found the library empty; the SBA checker turns it into a loss.
    pub drew_from_empty_library: bool,

    // Owned zones. Only the game state moves objects between them.
    pub library: Zone,
    pub hand: Zone,
    pub graveyard: Zone,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            id,
            name: name.into(),
            life: config.starting_life,
            mana_pool: ManaPool::new(),
            lands_played_this_turn: 0,
            land_plays_per_turn: config.land_plays_per_turn,
            max_hand_size: config.max_hand_size,
            has_lost: false,
            drew_from_empty_library: false,
            library: Zone::new(ZoneId::library(id)),
            hand: Zone::new(ZoneId::hand(id)),
            graveyard: Zone::new(ZoneId::graveyard(id)),
        }
    }

    /// The owned zone of `kind`, if this kind is per-player.
    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        match kind {
            ZoneKind::Library => Some(&self.library),
            ZoneKind::Hand => Some(&self.hand),
            ZoneKind::Graveyard => Some(&self.graveyard),
            _ => None,
        }
    }

    pub fn zone_mut(&mut self, kind: ZoneKind) -> Option<&mut Zone> {
        match kind {
            ZoneKind::Library => Some(&mut self.library),
            ZoneKind::Hand => Some(&mut self.hand),
            ZoneKind::Graveyard => Some(&mut self.graveyard),
            _ => None,
        }
    }

    /// Returns true if this player can play a land this turn.
    pub fn can_play_land(&self) -> bool {
        self.lands_played_this_turn < self.land_plays_per_turn
    }

    /// Gains life.
    pub fn gain_life(&mut self, amount: u32) {
        self.life += amount as i32;
    }

    /// Loses life.
    pub fn lose_life(&mut self, amount: u32) {
        self.life -= amount as i32;
    }

    /// Called at the beginning of this player's turn.
    pub fn begin_turn(&mut self) {
        self.lands_played_this_turn = 0;
    }

    /// Records a land play.
    pub fn record_land_play(&mut self) {
        self.lands_played_this_turn += 1;
    }

    /// Returns true if this player is still in the game.
    pub fn is_in_game(&self) -> bool {
        !self.has_lost
    }

    /// Checks if this player should lose due to life total.
    pub fn has_lethal_life(&self) -> bool {
        self.life <= 0
    }

    /// Returns the number of cards in hand.
    pub fn hand_size(&self) -> usize {
        self.hand.count()
    }

    /// Returns the number of cards in library.
    pub fn library_size(&self) -> usize {
        self.library.count()
    }
}
