//! Object registry: the arena that owns every game object by id.
//!
//! Ids and timestamps come from two independent per-game counters. All
//! cross-object references elsewhere in the crate are ids looked up here.

use std::fmt;

use crate::ids::{ObjectId, Timestamp};
use crate::object::GameObject;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An object with this id is already registered.
    DuplicateId(ObjectId),
    /// The id belonged to an object that has left the game.
    RetiredId(ObjectId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateId(id) => write!(f, "object {} is already registered", id),
            RegistryError::RetiredId(id) => write!(f, "object id {} was retired", id),
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Vacant,
    Live(Box<GameObject>),
    Retired,
}

/// Dense store of game objects indexed by `ObjectId`.
#[derive(Debug, Clone)]
pub struct ObjectRegistry {
    // Index 0 is never handed out.
    slots: Vec<Slot>,
    next_object: u64,
    next_timestamp: u64,
    live: usize,
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Vacant],
            next_object: 1,
            next_timestamp: 1,
            live: 0,
        }
    }

    /// Hands out a fresh id. Ids strictly increase and are never reused.
    pub fn next_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        id
    }

    /// Hands out a fresh timestamp from a counter independent of ids.
    pub fn next_timestamp(&mut self) -> Timestamp {
        let ts = Timestamp(self.next_timestamp);
        self.next_timestamp += 1;
        ts
    }

    /// Registers an object under its own id.
    pub fn register(&mut self, object: GameObject) -> Result<(), RegistryError> {
        let id = object.id;
        let index = id.0 as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, Slot::Vacant);
        }
        match self.slots[index] {
            Slot::Live(_) => return Err(RegistryError::DuplicateId(id)),
            Slot::Retired => return Err(RegistryError::RetiredId(id)),
            Slot::Vacant => {}
        }
        if id.0 >= self.next_object {
            self.next_object = id.0 + 1;
        }
        self.slots[index] = Slot::Live(Box::new(object));
        self.live += 1;
        Ok(())
    }

    /// Overwrites an object in place. Test builds only.
    #[cfg(test)]
    pub fn replace(&mut self, object: GameObject) {
        let index = object.id.0 as usize;
        if index >= self.slots.len() {
            self.slots.resize(index + 1, Slot::Vacant);
        }
        if !matches!(self.slots[index], Slot::Live(_)) {
            self.live += 1;
        }
        self.slots[index] = Slot::Live(Box::new(object));
    }

    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        match self.slots.get(id.0 as usize) {
            Some(Slot::Live(obj)) => Some(obj),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        match self.slots.get_mut(id.0 as usize) {
            Some(Slot::Live(obj)) => Some(obj),
            _ => None,
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Removes an object that has permanently left the game. Its id is retired.
    pub fn deregister(&mut self, id: ObjectId) -> Option<GameObject> {
        let slot = self.slots.get_mut(id.0 as usize)?;
        if !matches!(slot, Slot::Live(_)) {
            return None;
        }
        match std::mem::replace(slot, Slot::Retired) {
            Slot::Live(obj) => {
                self.live -= 1;
                Some(*obj)
            }
            _ => None,
        }
    }

    pub fn is_retired(&self, id: ObjectId) -> bool {
        matches!(self.slots.get(id.0 as usize), Some(Slot::Retired))
    }

    /// Iterates live objects in id order.
    pub fn iter(&self) -> impl Iterator<Item = &GameObject> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Live(obj) => Some(obj.as_ref()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}
