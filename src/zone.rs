//! Zones: named containers of object ids.
//!
//! For ordered zones (library, stack) index 0 is the top.

use rand::Rng;
use rand::seq::SliceRandom;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ids::{ObjectId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ZoneKind {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Stack,
    Exile,
}

impl ZoneKind {
    /// Returns true if objects in this zone are public (visible to all players).
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            ZoneKind::Battlefield | ZoneKind::Graveyard | ZoneKind::Stack | ZoneKind::Exile
        )
    }

    /// Returns true if objects in this zone are hidden (private to owner).
    pub fn is_hidden(&self) -> bool {
        matches!(self, ZoneKind::Library | ZoneKind::Hand)
    }

    /// Returns true if cards in this zone are ordered (order matters).
    pub fn is_ordered(&self) -> bool {
        matches!(self, ZoneKind::Library | ZoneKind::Stack)
    }

    /// Returns true if each player has their own zone of this kind.
    pub fn is_player_owned(&self) -> bool {
        matches!(
            self,
            ZoneKind::Library | ZoneKind::Hand | ZoneKind::Graveyard
        )
    }

    pub fn default_visibility(&self) -> Visibility {
        match self {
            ZoneKind::Library => Visibility::HiddenToAll,
            ZoneKind::Hand => Visibility::OwnerOnly,
            _ => Visibility::Public,
        }
    }

    /// Where `Zone::add` puts an object when no position is given.
    pub fn default_position(&self) -> ZonePosition {
        if self.is_ordered() {
            ZonePosition::Top
        } else {
            ZonePosition::Bottom
        }
    }
}

/// Who may see the objects in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Visibility {
    Public,
    OwnerOnly,
    HiddenToAll,
}

/// Identity of one concrete zone: its kind plus the owning player for
/// per-player zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ZoneId {
    pub kind: ZoneKind,
    pub owner: Option<PlayerId>,
}

impl ZoneId {
    pub fn library(player: PlayerId) -> Self {
        Self {
            kind: ZoneKind::Library,
            owner: Some(player),
        }
    }

    pub fn hand(player: PlayerId) -> Self {
        Self {
            kind: ZoneKind::Hand,
            owner: Some(player),
        }
    }

    pub fn graveyard(player: PlayerId) -> Self {
        Self {
            kind: ZoneKind::Graveyard,
            owner: Some(player),
        }
    }

    pub fn battlefield() -> Self {
        Self {
            kind: ZoneKind::Battlefield,
            owner: None,
        }
    }

    pub fn stack() -> Self {
        Self {
            kind: ZoneKind::Stack,
            owner: None,
        }
    }

    pub fn exile() -> Self {
        Self {
            kind: ZoneKind::Exile,
            owner: None,
        }
    }

    /// The zone of `kind` that an object owned by `owner` would go to.
    pub fn for_owner(kind: ZoneKind, owner: PlayerId) -> Self {
        Self {
            kind,
            owner: kind.is_player_owned().then_some(owner),
        }
    }
}

/// Where to insert an object in a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZonePosition {
    Top,
    Bottom,
    /// Index from the top, clamped to the zone size.
    Index(usize),
}

/// An ordered container of object ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    id: ZoneId,
    visibility: Visibility,
    objects: Vec<ObjectId>,
}

impl Zone {
    pub fn new(id: ZoneId) -> Self {
        Self {
            id,
            visibility: id.kind.default_visibility(),
            objects: Vec::new(),
        }
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    pub fn kind(&self) -> ZoneKind {
        self.id.kind
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.id.owner
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns true if `viewer` may see the objects in this zone.
    pub fn visible_to(&self, viewer: PlayerId) -> bool {
        match self.visibility {
            Visibility::Public => true,
            Visibility::OwnerOnly => self.id.owner == Some(viewer),
            Visibility::HiddenToAll => false,
        }
    }

    /// Adds an object at `position`, or at the zone's default position.
    pub fn add(&mut self, id: ObjectId, position: Option<ZonePosition>) {
        debug_assert!(
            !self.objects.contains(&id),
            "{:?} added twice to {:?}",
            id,
            self.id
        );
        match position.unwrap_or_else(|| self.id.kind.default_position()) {
            ZonePosition::Top => self.objects.insert(0, id),
            ZonePosition::Bottom => self.objects.push(id),
            ZonePosition::Index(index) => {
                let index = index.min(self.objects.len());
                self.objects.insert(index, id);
            }
        }
    }

    /// Removes an object. Removing an absent id logs a warning and returns false.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        match self.objects.iter().position(|&o| o == id) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => {
                warn!(zone = ?self.id, object = %id, "remove of object not in zone");
                false
            }
        }
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains(&id)
    }

    /// Snapshot of the ids in order (top first for ordered zones).
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.iter().copied()
    }

    pub fn count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn top(&self) -> Option<ObjectId> {
        self.objects.first().copied()
    }

    pub fn position(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|&o| o == id)
    }

    /// Uniformly permutes the zone.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.objects.shuffle(rng);
    }

    /// Pops the top object. `None` means the zone is empty; for a library
    /// the caller treats that as a draw from an empty library.
    pub fn draw_top(&mut self) -> Option<ObjectId> {
        if self.objects.is_empty() {
            None
        } else {
            Some(self.objects.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ids(raw: &[u64]) -> Vec<ObjectId> {
        raw.iter().map(|&r| ObjectId::from_raw(r)).collect()
    }

    #[test]
    fn test_zone_visibility() {
        assert!(ZoneKind::Battlefield.is_public());
        assert!(ZoneKind::Graveyard.is_public());
        assert!(ZoneKind::Stack.is_public());
        assert!(ZoneKind::Exile.is_public());

        assert!(ZoneKind::Library.is_hidden());
        assert!(ZoneKind::Hand.is_hidden());

        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let hand = Zone::new(ZoneId::hand(alice));
        assert!(hand.visible_to(alice));
        assert!(!hand.visible_to(bob));
        let library = Zone::new(ZoneId::library(alice));
        assert!(!library.visible_to(alice));
        assert!(Zone::new(ZoneId::battlefield()).visible_to(bob));
    }

    #[test]
    fn test_zone_ordering() {
        assert!(ZoneKind::Library.is_ordered());
        assert!(ZoneKind::Stack.is_ordered());

        assert!(!ZoneKind::Hand.is_ordered());
        assert!(!ZoneKind::Battlefield.is_ordered());
        assert!(!ZoneKind::Graveyard.is_ordered());
    }

    #[test]
    fn test_default_positions() {
        let alice = PlayerId::from_index(0);
        let mut library = Zone::new(ZoneId::library(alice));
        library.add(ObjectId::from_raw(1), None);
        library.add(ObjectId::from_raw(2), None);
        assert_eq!(library.ids(), ids(&[2, 1]), "library adds go on top");

        let mut graveyard = Zone::new(ZoneId::graveyard(alice));
        graveyard.add(ObjectId::from_raw(1), None);
        graveyard.add(ObjectId::from_raw(2), None);
        assert_eq!(graveyard.ids(), ids(&[1, 2]), "graveyard adds append");

        graveyard.add(ObjectId::from_raw(3), Some(ZonePosition::Top));
        graveyard.add(ObjectId::from_raw(4), Some(ZonePosition::Index(99)));
        assert_eq!(graveyard.ids(), ids(&[3, 1, 2, 4]));
    }

    #[test]
    fn test_remove_absent_is_not_fatal() {
        let mut hand = Zone::new(ZoneId::hand(PlayerId::from_index(0)));
        hand.add(ObjectId::from_raw(5), None);
        assert!(!hand.remove(ObjectId::from_raw(6)));
        assert!(hand.remove(ObjectId::from_raw(5)));
        assert!(!hand.remove(ObjectId::from_raw(5)));
        assert!(hand.is_empty());
    }

    #[test]
    fn test_ids_is_a_snapshot() {
        let mut hand = Zone::new(ZoneId::hand(PlayerId::from_index(0)));
        hand.add(ObjectId::from_raw(1), None);
        let snapshot = hand.ids();
        hand.add(ObjectId::from_raw(2), None);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(hand.count(), 2);
    }

    #[test]
    fn test_draw_top_pops_index_zero() {
        let mut library = Zone::new(ZoneId::library(PlayerId::from_index(0)));
        for raw in [3, 2, 1] {
            library.add(ObjectId::from_raw(raw), Some(ZonePosition::Top));
        }
        assert_eq!(library.draw_top(), Some(ObjectId::from_raw(1)));
        assert_eq!(library.draw_top(), Some(ObjectId::from_raw(2)));
        assert_eq!(library.draw_top(), Some(ObjectId::from_raw(3)));
        assert_eq!(library.draw_top(), None);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut library = Zone::new(ZoneId::library(PlayerId::from_index(0)));
        for raw in 1..=40 {
            library.add(ObjectId::from_raw(raw), Some(ZonePosition::Bottom));
        }
        let mut rng = StdRng::seed_from_u64(7);
        library.shuffle(&mut rng);

        let mut sorted = library.ids();
        sorted.sort();
        assert_eq!(sorted, (1..=40).map(ObjectId::from_raw).collect::<Vec<_>>());
        assert_eq!(library.count(), 40);
    }
}
