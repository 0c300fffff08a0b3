use std::collections::HashMap;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::ids::{CardId, ObjectId, PlayerId, Timestamp};
use crate::zone::{ZoneId, ZoneKind};

/// Types of counters that can be placed on objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum CounterType {
    PlusOnePlusOne,
    MinusOneMinusOne,
    Loyalty,
    Charge,
    Time,
}

/// What an object physically is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    /// A physical card
    Card,
    /// A token permanent
    Token,
    /// An activated or triggered ability on the stack
    Ability,
}

/// Status flags of an object, stored as a bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StatusFlags(u8);

impl StatusFlags {
    pub const NONE: StatusFlags = StatusFlags(0);
    pub const TAPPED: StatusFlags = StatusFlags(1 << 0);
    pub const SUMMONING_SICK: StatusFlags = StatusFlags(1 << 1);
    pub const PHASED_OUT: StatusFlags = StatusFlags(1 << 2);
    pub const FACE_DOWN: StatusFlags = StatusFlags(1 << 3);
    pub const FLIPPED: StatusFlags = StatusFlags(1 << 4);
    pub const MONSTROUS: StatusFlags = StatusFlags(1 << 5);

    pub fn contains(self, flag: StatusFlags) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn insert(&mut self, flag: StatusFlags) {
        self.0 |= flag.0;
    }

    pub fn remove(&mut self, flag: StatusFlags) {
        self.0 &= !flag.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Runtime representation of a game object.
///
/// Relationships to other entities are ids looked up through the game state;
/// `zone` is a membership fact that must agree with the zone's own list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameObject {
    pub id: ObjectId,
    pub kind: ObjectKind,
    /// Reference to the card definition (None for abilities and pure tokens)
    pub card: Option<CardId>,
    /// Printed name for tokens and abilities; cards read theirs from the definition.
    pub name: String,
    // Ownership (owner never changes, controller can)
    pub owner: PlayerId,
    pub controller: PlayerId,
    pub zone: ZoneId,
    pub timestamp: Timestamp,
    pub status: StatusFlags,
    pub counters: HashMap<CounterType, u32>,
    /// Damage marked this turn.
    pub damage: u32,
}

impl GameObject {
    pub fn new(
        id: ObjectId,
        kind: ObjectKind,
        card: Option<CardId>,
        name: impl Into<String>,
        owner: PlayerId,
        zone: ZoneId,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            kind,
            card,
            name: name.into(),
            owner,
            controller: owner,
            zone,
            timestamp,
            status: StatusFlags::NONE,
            counters: HashMap::new(),
            damage: 0,
        }
    }

    pub fn is_tapped(&self) -> bool {
        self.status.contains(StatusFlags::TAPPED)
    }

    pub fn is_summoning_sick(&self) -> bool {
        self.status.contains(StatusFlags::SUMMONING_SICK)
    }

    pub fn is_on_battlefield(&self) -> bool {
        self.zone.kind == ZoneKind::Battlefield
    }

    pub fn counter_count(&self, counter: CounterType) -> u32 {
        self.counters.get(&counter).copied().unwrap_or(0)
    }

    pub fn add_counters(&mut self, counter: CounterType, amount: u32) {
        if amount > 0 {
            *self.counters.entry(counter).or_insert(0) += amount;
        }
    }

    /// Removes up to `amount` counters and returns how many were removed.
    pub fn remove_counters(&mut self, counter: CounterType, amount: u32) -> u32 {
        let Some(current) = self.counters.get_mut(&counter) else {
            return 0;
        };
        let removed = amount.min(*current);
        *current -= removed;
        if *current == 0 {
            self.counters.remove(&counter);
        }
        removed
    }

    /// Net +1/+1 modification from counters.
    pub fn counter_pt_bonus(&self) -> i32 {
        self.counter_count(CounterType::PlusOnePlusOne) as i32
            - self.counter_count(CounterType::MinusOneMinusOne) as i32
    }

    /// Resets state that does not survive leaving the battlefield.
    pub fn reset_permanent_state(&mut self) {
        self.status = StatusFlags::NONE;
        self.counters.clear();
        self.damage = 0;
        self.controller = self.owner;
    }
}
