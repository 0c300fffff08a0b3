use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::card::Card;
use crate::cards::CardDefinition;
use crate::characteristics::{Characteristics, CharacteristicsSource, PrintedCharacteristics};
use crate::config::GameConfig;
use crate::decision::{GameResult, StateSummary};
use crate::effect::{Choices, EffectExecutor};
use crate::ids::{CardId, ObjectId, PlayerId};
use crate::object::{GameObject, ObjectKind, StatusFlags};
use crate::player::Player;
use crate::priority::PriorityArbiter;
use crate::registry::ObjectRegistry;
use crate::stack::{ResolutionStack, StackEntry};
use crate::triggers::TriggerQueue;
use crate::zone::{Zone, ZoneId, ZoneKind, ZonePosition};

/// Game phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Phase {
    Beginning,
    FirstMain,
    Combat,
    NextMain,
    Ending,
}

/// Steps within phases. Main phases have none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Step {
    // Beginning phase
    Untap,
    Upkeep,
    Draw,
    // Combat phase
    BeginCombat,
    DeclareAttackers,
    DeclareBlockers,
    CombatDamage,
    EndCombat,
    // Ending phase
    End,
    Cleanup,
}

/// Turn state tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub active_player: PlayerId,
    pub turn_number: u32,
    pub phase: Phase,
    pub step: Option<Step>,
    /// Set when something happened during cleanup; cleanup runs again once
    /// the priority window it opened closes.
    pub repeat_cleanup: bool,
}

impl TurnState {
    pub fn new(active_player: PlayerId) -> Self {
        Self {
            active_player,
            turn_number: 1,
            phase: Phase::Beginning,
            step: Some(Step::Untap),
            repeat_cleanup: false,
        }
    }
}

/// Zone or registry bookkeeping disagreed. Never recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation(pub String);

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violation: {}", self.0)
    }
}

impl std::error::Error for InvariantViolation {}

/// Complete game state.
///
/// One per game. Nothing here is shared between games.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub registry: ObjectRegistry,
    pub players: Vec<Player>,
    pub turn_order: Vec<PlayerId>,

    // Shared zones
    pub battlefield: Zone,
    pub exile: Zone,
    pub stack: ResolutionStack,

    pub turn: TurnState,
    pub priority: PriorityArbiter,
    pub triggers: TriggerQueue,

    /// Definitions of every card object in the game.
    pub cards: HashMap<CardId, Arc<CardDefinition>>,
    pub characteristics: Arc<dyn CharacteristicsSource>,
    pub rng: StdRng,
    pub result: Option<GameResult>,
}

/// `PlayerId` indexes fit in a `u8`.
pub const MAX_PLAYERS: usize = u8::MAX as usize + 1;

impl GameState {
    /// Names past `MAX_PLAYERS` are dropped.
    pub fn new(player_names: Vec<String>, config: GameConfig) -> Self {
        if player_names.len() > MAX_PLAYERS {
            warn!(
                requested = player_names.len(),
                max = MAX_PLAYERS,
                "too many players; extra names dropped"
            );
        }
        let players: Vec<Player> = player_names
            .into_iter()
            .zip(0..=u8::MAX)
            .map(|(name, index)| Player::new(PlayerId::from_index(index), name, &config))
            .collect();
        let turn_order = players.iter().map(|p| p.id).collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            registry: ObjectRegistry::new(),
            players,
            turn_order,
            battlefield: Zone::new(ZoneId::battlefield()),
            exile: Zone::new(ZoneId::exile()),
            stack: ResolutionStack::new(),
            turn: TurnState::new(PlayerId::from_index(0)),
            priority: PriorityArbiter::new(),
            triggers: TriggerQueue::new(),
            cards: HashMap::new(),
            characteristics: Arc::new(PrintedCharacteristics),
            rng,
            result: None,
        }
    }

    /// Shuffles libraries (per config), draws opening hands in APNAP order
    /// and enters the first turn's untap step.
    pub fn start_game(&mut self) {
        let first = self.turn_order.first().copied().unwrap_or(PlayerId::from_index(0));
        self.turn = TurnState::new(first);
        if self.config.shuffle_libraries {
            for player in self.turn_order.clone() {
                self.shuffle_library(player);
            }
        }
        let hand_size = self.config.starting_hand_size;
        for player in self.apnap_order() {
            self.draw_cards(player, hand_size);
        }
        debug!(players = self.players.len(), first = %first, "game started");
        crate::turn::execute_untap_step(self);
        self.priority.clear();
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index()).filter(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index()).filter(|p| p.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.registry.get(id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.registry.get_mut(id)
    }

    pub fn definition_of(&self, id: ObjectId) -> Option<Arc<CardDefinition>> {
        let card = self.object(id)?.card?;
        self.cards.get(&card).cloned()
    }

    /// Current characteristics, from the configured source.
    pub fn characteristics_of(&self, id: ObjectId) -> Option<Characteristics> {
        let object = self.object(id)?;
        Some(self.characteristics.characteristics_of(object, self))
    }

    pub fn is_creature(&self, id: ObjectId) -> bool {
        self.characteristics_of(id).is_some_and(|c| c.is_creature())
    }

    pub fn is_land(&self, id: ObjectId) -> bool {
        self.characteristics_of(id).is_some_and(|c| c.is_land())
    }

    pub fn active_player(&self) -> PlayerId {
        self.turn.active_player
    }

    /// Players still in the game, in turn order.
    pub fn players_in_game(&self) -> Vec<PlayerId> {
        self.turn_order
            .iter()
            .copied()
            .filter(|&p| self.player(p).is_some_and(|p| p.is_in_game()))
            .collect()
    }

    /// Players still in the game, starting with the active player.
    pub fn apnap_order(&self) -> Vec<PlayerId> {
        let in_game = self.players_in_game();
        let start = in_game
            .iter()
            .position(|&p| p == self.turn.active_player)
            .unwrap_or(0);
        in_game[start..]
            .iter()
            .chain(in_game[..start].iter())
            .copied()
            .collect()
    }

    /// The next in-game player after `player` in turn order.
    pub fn next_player_in_game(&self, player: PlayerId) -> Option<PlayerId> {
        let order = &self.turn_order;
        let start = order.iter().position(|&p| p == player)?;
        (1..=order.len())
            .map(|offset| order[(start + offset) % order.len()])
            .find(|&p| self.player(p).is_some_and(|p| p.is_in_game()))
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        match id.kind {
            ZoneKind::Battlefield => Some(&self.battlefield),
            ZoneKind::Exile => Some(&self.exile),
            ZoneKind::Stack => Some(self.stack.zone()),
            kind => self.player(id.owner?)?.zone(kind),
        }
    }

    /// Mutable zone access. The stack is only changed through `ResolutionStack`.
    fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        match id.kind {
            ZoneKind::Battlefield => Some(&mut self.battlefield),
            ZoneKind::Exile => Some(&mut self.exile),
            ZoneKind::Stack => None,
            kind => self.player_mut(id.owner?)?.zone_mut(kind),
        }
    }

    pub fn stack_is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn is_main_phase(&self) -> bool {
        matches!(self.turn.phase, Phase::FirstMain | Phase::NextMain)
    }

    pub fn permanents_controlled_by(&self, player: PlayerId) -> Vec<ObjectId> {
        self.battlefield
            .iter()
            .filter(|&id| self.object(id).is_some_and(|o| o.controller == player))
            .collect()
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn summary(&self) -> StateSummary {
        StateSummary::from_game(self)
    }

    // =========================================================================
    // Object creation
    // =========================================================================

    /// Makes `def` available to objects in this game and returns its id here.
    /// Definitions without an id of their own are matched by name.
    fn intern_definition(&mut self, def: &Arc<CardDefinition>) -> CardId {
        let id = def.id();
        if id != CardId::default() {
            match self.cards.get(&id) {
                None => {
                    self.cards.insert(id, Arc::clone(def));
                    return id;
                }
                Some(existing) if existing.name() == def.name() => return id,
                Some(_) => {}
            }
        }
        if let Some(existing) = self.cards.values().find(|d| d.name() == def.name()) {
            return existing.id();
        }

        let fresh = CardId::from_raw(self.cards.keys().map(|c| c.0).max().unwrap_or(0) + 1);
        let mut copy = CardDefinition::clone(def);
        copy.card.id = fresh;
        self.cards.insert(fresh, Arc::new(copy));
        fresh
    }

    /// Registers a new object and lists it in `zone`. Objects only reach the
    /// stack through `put_spell_on_stack` and `put_ability_on_stack`.
    fn spawn(
        &mut self,
        kind: ObjectKind,
        card: Option<CardId>,
        name: String,
        owner: PlayerId,
        zone: ZoneId,
    ) -> Result<ObjectId, InvariantViolation> {
        if zone.kind == ZoneKind::Stack {
            return Err(InvariantViolation(format!(
                "{} created on the stack without a stack entry",
                name
            )));
        }
        if self.zone(zone).is_none() {
            return Err(InvariantViolation(format!("no zone {:?}", zone)));
        }

        let id = self.registry.next_id();
        let timestamp = self.registry.next_timestamp();
        let object = GameObject::new(id, kind, card, name, owner, zone, timestamp);
        self.registry
            .register(object)
            .map_err(|err| InvariantViolation(err.to_string()))?;

        if zone.kind == ZoneKind::Battlefield && self.is_creature(id) {
            if let Some(obj) = self.object_mut(id) {
                obj.status.insert(StatusFlags::SUMMONING_SICK);
            }
        }
        if let Some(target) = self.zone_mut(zone) {
            target.add(id, None);
        }

        #[cfg(debug_assertions)]
        self.debug_assert_zone_consistency();
        Ok(id)
    }

    /// Creates a card object owned by `owner` in `kind` (the owner's zone for
    /// per-player kinds). Fails for the stack and for a player who does not
    /// exist.
    pub fn create_object_from_definition(
        &mut self,
        def: &Arc<CardDefinition>,
        owner: PlayerId,
        kind: ZoneKind,
    ) -> Result<ObjectId, InvariantViolation> {
        let card = self.intern_definition(def);
        self.spawn(
            ObjectKind::Card,
            Some(card),
            def.name().to_string(),
            owner,
            ZoneId::for_owner(kind, owner),
        )
    }

    /// Creates a card object from bare card data, without abilities.
    pub fn create_object_from_card(
        &mut self,
        card: &Card,
        owner: PlayerId,
        kind: ZoneKind,
    ) -> Result<ObjectId, InvariantViolation> {
        let def = Arc::new(CardDefinition::new(card.clone()));
        self.create_object_from_definition(&def, owner, kind)
    }

    /// Creates a token on the battlefield under `controller`.
    pub fn create_token(
        &mut self,
        def: &Arc<CardDefinition>,
        controller: PlayerId,
    ) -> Result<ObjectId, InvariantViolation> {
        let card = self.intern_definition(def);
        self.spawn(
            ObjectKind::Token,
            Some(card),
            def.name().to_string(),
            controller,
            ZoneId::battlefield(),
        )
    }

    // =========================================================================
    // Zone movement
    // =========================================================================

    fn take_from_zone(&mut self, id: ObjectId, from: ZoneId) {
        if from.kind == ZoneKind::Stack {
            self.stack.remove(id);
        } else if let Some(zone) = self.zone_mut(from) {
            zone.remove(id);
        }
    }

    /// Records `id` as being in `dest` and adds it there. The object must not
    /// be in any zone.
    fn place(&mut self, id: ObjectId, dest: ZoneId, position: Option<ZonePosition>) {
        let entering_battlefield = dest.kind == ZoneKind::Battlefield;
        let fresh_timestamp = (entering_battlefield || dest.kind == ZoneKind::Stack)
            .then(|| self.registry.next_timestamp());

        if let Some(obj) = self.registry.get_mut(id) {
            if obj.zone.kind == ZoneKind::Battlefield && !entering_battlefield {
                obj.reset_permanent_state();
            }
            obj.zone = dest;
            if let Some(ts) = fresh_timestamp {
                obj.timestamp = ts;
            }
        }
        if entering_battlefield && self.is_creature(id) {
            if let Some(obj) = self.registry.get_mut(id) {
                obj.status.insert(StatusFlags::SUMMONING_SICK);
            }
        }
        if let Some(zone) = self.zone_mut(dest) {
            zone.add(id, position);
        }
    }

    /// Moves an object between zones, keeping its id.
    ///
    /// Validates before changing anything: the object must exist, the
    /// destination must exist and not be the stack, and a per-player
    /// destination must belong to the owner.
    pub fn move_object(
        &mut self,
        id: ObjectId,
        dest: ZoneId,
        position: Option<ZonePosition>,
    ) -> Result<(), InvariantViolation> {
        let obj = self
            .object(id)
            .ok_or_else(|| InvariantViolation(format!("move of unknown object {}", id)))?;
        if dest.kind == ZoneKind::Stack {
            return Err(InvariantViolation(format!(
                "{} moved to the stack without a stack entry",
                id
            )));
        }
        if dest.kind.is_player_owned() && dest.owner != Some(obj.owner) {
            return Err(InvariantViolation(format!(
                "{} owned by {} moved to {:?}",
                id, obj.owner, dest
            )));
        }
        if self.zone(dest).is_none() {
            return Err(InvariantViolation(format!("no zone {:?}", dest)));
        }
        let from = obj.zone;

        self.take_from_zone(id, from);
        self.place(id, dest, position);
        debug!(object = %id, from = ?from.kind, to = ?dest.kind, "moved object");

        #[cfg(debug_assertions)]
        self.debug_assert_zone_consistency();
        Ok(())
    }

    /// Moves an object to its owner's zone of `kind`.
    pub fn move_to(&mut self, id: ObjectId, kind: ZoneKind) -> Result<(), InvariantViolation> {
        let owner = self
            .object(id)
            .map(|o| o.owner)
            .ok_or_else(|| InvariantViolation(format!("move of unknown object {}", id)))?;
        self.move_object(id, ZoneId::for_owner(kind, owner), None)
    }

    /// Puts a card object on the stack as a spell controlled by `controller`.
    pub fn put_spell_on_stack(
        &mut self,
        id: ObjectId,
        controller: PlayerId,
        choices: Choices,
    ) -> Result<(), InvariantViolation> {
        let obj = self
            .object(id)
            .ok_or_else(|| InvariantViolation(format!("cast of unknown object {}", id)))?;
        let card = obj
            .card
            .ok_or_else(|| InvariantViolation(format!("{} has no card to cast", id)))?;
        let from = obj.zone;

        self.take_from_zone(id, from);
        let timestamp = self.registry.next_timestamp();
        if let Some(obj) = self.registry.get_mut(id) {
            if from.kind == ZoneKind::Battlefield {
                obj.reset_permanent_state();
            }
            obj.zone = ZoneId::stack();
            obj.controller = controller;
            obj.timestamp = timestamp;
        }
        self.stack.push(StackEntry::Spell {
            id,
            card,
            controller,
            choices,
        });
        debug!(object = %id, controller = %controller, "spell put on stack");

        #[cfg(debug_assertions)]
        self.debug_assert_zone_consistency();
        Ok(())
    }

    /// Creates an ability object on the stack and returns its id.
    pub fn put_ability_on_stack(
        &mut self,
        source: Option<ObjectId>,
        controller: PlayerId,
        effect: Box<dyn EffectExecutor>,
        choices: Choices,
    ) -> ObjectId {
        let id = self.registry.next_id();
        let timestamp = self.registry.next_timestamp();
        let mut object = GameObject::new(
            id,
            ObjectKind::Ability,
            None,
            effect.description(),
            controller,
            ZoneId::stack(),
            timestamp,
        );
        object.controller = controller;
        let registered = self.registry.register(object);
        debug_assert!(registered.is_ok(), "fresh id rejected: {:?}", registered);

        self.stack.push(StackEntry::Ability {
            id,
            source,
            controller,
            effect,
            choices,
        });
        debug!(object = %id, controller = %controller, "ability put on stack");
        id
    }

    /// Removes an object from the game for good. Its id is retired.
    pub fn remove_from_game(&mut self, id: ObjectId) -> Option<GameObject> {
        let from = self.object(id)?.zone;
        self.take_from_zone(id, from);
        self.registry.deregister(id)
    }

    /// Draws the top card of `player`'s library. An empty library sets the
    /// player's empty-draw flag and returns `None`.
    pub fn draw_card(&mut self, player: PlayerId) -> Option<ObjectId> {
        let drawn = self.player_mut(player)?.library.draw_top();
        match drawn {
            Some(id) => {
                self.place(id, ZoneId::hand(player), None);
                Some(id)
            }
            None => {
                if let Some(p) = self.player_mut(player) {
                    p.drew_from_empty_library = true;
                }
                None
            }
        }
    }

    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> Vec<ObjectId> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw_card(player) {
                Some(id) => drawn.push(id),
                None => break,
            }
        }
        #[cfg(debug_assertions)]
        self.debug_assert_zone_consistency();
        drawn
    }

    pub fn shuffle_library(&mut self, player: PlayerId) {
        let GameState { players, rng, .. } = self;
        if let Some(p) = players.get_mut(player.index()) {
            p.library.shuffle(rng);
        }
    }

    // =========================================================================
    // Permanent state
    // =========================================================================

    pub fn tap(&mut self, id: ObjectId) {
        if let Some(obj) = self.object_mut(id) {
            obj.status.insert(StatusFlags::TAPPED);
        }
    }

    pub fn untap(&mut self, id: ObjectId) {
        if let Some(obj) = self.object_mut(id) {
            obj.status.remove(StatusFlags::TAPPED);
        }
    }

    pub fn remove_summoning_sickness(&mut self, id: ObjectId) {
        if let Some(obj) = self.object_mut(id) {
            obj.status.remove(StatusFlags::SUMMONING_SICK);
        }
    }

    pub fn clear_damage(&mut self, id: ObjectId) {
        if let Some(obj) = self.object_mut(id) {
            obj.damage = 0;
        }
    }

    pub fn empty_mana_pools(&mut self) {
        for player in &mut self.players {
            player.mana_pool.clear();
        }
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Checks that every registered object is listed in exactly one zone and
    /// that the zone agrees with the object's own zone field.
    pub fn validate_zone_consistency(&self) -> Result<(), InvariantViolation> {
        let mut seen: HashSet<ObjectId> = HashSet::new();

        let mut zones: Vec<&Zone> = vec![&self.battlefield, &self.exile, self.stack.zone()];
        for player in &self.players {
            zones.extend([&player.library, &player.hand, &player.graveyard]);
        }

        for zone in zones {
            for id in zone.iter() {
                if !seen.insert(id) {
                    return Err(InvariantViolation(format!(
                        "object {} appears in more than one zone",
                        id
                    )));
                }
                match self.registry.get(id) {
                    Some(obj) if obj.zone == zone.id() => {}
                    Some(obj) => {
                        return Err(InvariantViolation(format!(
                            "object {} listed in {:?} but records {:?}",
                            id,
                            zone.id(),
                            obj.zone
                        )));
                    }
                    None => {
                        return Err(InvariantViolation(format!(
                            "object {} listed in {:?} is not registered",
                            id,
                            zone.id()
                        )));
                    }
                }
            }
        }

        for obj in self.registry.iter() {
            if !seen.contains(&obj.id) {
                return Err(InvariantViolation(format!(
                    "object {} records {:?} but no zone lists it",
                    obj.id, obj.zone
                )));
            }
        }
        for id in self.stack.ids() {
            if self.stack.get(id).is_none() {
                return Err(InvariantViolation(format!(
                    "object {} is on the stack without an entry",
                    id
                )));
            }
        }

        Ok(())
    }

    /// Panics on a zone invariant violation. Debug builds only.
    #[cfg(debug_assertions)]
    pub fn debug_assert_zone_consistency(&self) {
        if let Err(violation) = self.validate_zone_consistency() {
            panic!("{}", violation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardBuilder, PowerToughness};
    use crate::object::CounterType;
    use crate::types::CardType;

    fn test_game() -> GameState {
        GameState::new(
            vec!["Alice".to_string(), "Bob".to_string()],
            GameConfig {
                seed: Some(1),
                ..GameConfig::default()
            },
        )
    }

    fn bears() -> Card {
        CardBuilder::new(CardId::from_raw(2), "Grizzly Bears")
            .card_types(vec![CardType::Creature])
            .power_toughness(PowerToughness::fixed(2, 2))
            .build()
    }

    fn forest() -> Card {
        CardBuilder::new(CardId::from_raw(1), "Forest")
            .card_types(vec![CardType::Land])
            .build()
    }

    fn fill_library(game: &mut GameState, player: PlayerId, count: usize) -> Vec<ObjectId> {
        (0..count)
            .map(|_| game.create_object_from_card(&forest(), player, ZoneKind::Library).unwrap())
            .collect()
    }

    #[test]
    fn test_new_game_has_players_and_zones() {
        let game = test_game();
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.players_in_game().len(), 2);
        assert!(game.registry.is_empty());
        assert!(game.zone(ZoneId::hand(PlayerId::from_index(1))).is_some());
        assert!(game.zone(ZoneId::hand(PlayerId::from_index(5))).is_none());
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_draw_seven_from_sixty() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        fill_library(&mut game, alice, 60);
        let top_seven: Vec<ObjectId> = game.players[0].library.ids()[..7].to_vec();

        let drawn = game.draw_cards(alice, 7);

        assert_eq!(drawn, top_seven, "drawn in library order");
        assert_eq!(game.players[0].library_size(), 53);
        assert_eq!(game.players[0].hand.ids(), top_seven);
        for id in drawn {
            assert_eq!(game.object(id).unwrap().zone, ZoneId::hand(alice));
        }
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_draw_from_empty_library_sets_flag() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        fill_library(&mut game, alice, 1);

        assert!(game.draw_card(alice).is_some());
        assert!(!game.players[0].drew_from_empty_library);
        assert!(game.draw_card(alice).is_none());
        assert!(game.players[0].drew_from_empty_library);
    }

    #[test]
    fn test_move_keeps_id_and_resets_permanent_state() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let id = game.create_object_from_card(&bears(), alice, ZoneKind::Battlefield).unwrap();
        let entered = game.object(id).unwrap().timestamp;
        assert!(game.object(id).unwrap().is_summoning_sick());

        {
            let obj = game.object_mut(id).unwrap();
            obj.damage = 1;
            obj.add_counters(CounterType::PlusOnePlusOne, 1);
            obj.status.insert(StatusFlags::TAPPED);
        }

        game.move_to(id, ZoneKind::Graveyard).unwrap();
        let obj = game.object(id).unwrap();
        assert_eq!(obj.zone, ZoneId::graveyard(alice));
        assert_eq!(obj.damage, 0);
        assert!(obj.counters.is_empty());
        assert!(obj.status.is_empty());
        assert!(game.players[0].graveyard.contains(id));
        assert!(!game.battlefield.contains(id));

        game.move_object(id, ZoneId::battlefield(), None).unwrap();
        assert!(game.object(id).unwrap().timestamp > entered);
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_invalid_move_changes_nothing() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let bob = PlayerId::from_index(1);
        let id = game.create_object_from_card(&bears(), alice, ZoneKind::Hand).unwrap();

        assert!(game.move_object(id, ZoneId::hand(bob), None).is_err());
        assert!(game.move_object(id, ZoneId::stack(), None).is_err());
        assert!(game.move_object(ObjectId::from_raw(999), ZoneId::exile(), None).is_err());

        assert_eq!(game.object(id).unwrap().zone, ZoneId::hand(alice));
        assert!(game.players[0].hand.contains(id));
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_every_zone_move_keeps_one_zone_per_object() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let ids = fill_library(&mut game, alice, 5);
        let route = [
            ZoneKind::Hand,
            ZoneKind::Battlefield,
            ZoneKind::Graveyard,
            ZoneKind::Exile,
            ZoneKind::Library,
        ];
        for (i, &id) in ids.iter().enumerate() {
            for kind in route.iter().cycle().skip(i).take(route.len()) {
                game.move_to(id, *kind).unwrap();
                assert!(game.validate_zone_consistency().is_ok());
                let containing = route
                    .iter()
                    .filter(|&&k| {
                        game.zone(ZoneId::for_owner(k, alice))
                            .is_some_and(|z| z.contains(id))
                    })
                    .count();
                assert_eq!(containing, 1);
            }
        }
    }

    #[test]
    fn test_objects_cannot_be_created_on_the_stack() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);

        let created = game.create_object_from_card(&bears(), alice, ZoneKind::Stack);
        assert!(created.is_err());
        assert!(game.registry.is_empty());
        assert!(game.stack.is_empty());
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_objects_cannot_be_created_for_missing_player() {
        let mut game = test_game();
        let nobody = PlayerId::from_index(9);

        assert!(game.create_object_from_card(&forest(), nobody, ZoneKind::Hand).is_err());
        assert!(game.registry.is_empty());
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_player_count_is_capped() {
        let names = (0..MAX_PLAYERS + 4).map(|i| format!("P{}", i)).collect();
        let game = GameState::new(names, GameConfig::default());

        assert_eq!(game.players.len(), MAX_PLAYERS);
        let last = game.players.last().map(|p| p.id);
        assert_eq!(last, Some(PlayerId::from_index(u8::MAX)));
        let distinct: HashSet<PlayerId> = game.players.iter().map(|p| p.id).collect();
        assert_eq!(distinct.len(), MAX_PLAYERS);
    }

    #[test]
    fn test_validate_detects_disagreement() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let id = game.create_object_from_card(&bears(), alice, ZoneKind::Hand).unwrap();

        let mut corrupted = game.object(id).unwrap().clone();
        corrupted.zone = ZoneId::graveyard(alice);
        game.registry.replace(corrupted);
        assert!(game.validate_zone_consistency().is_err());
    }

    #[test]
    fn test_spell_and_ability_on_stack() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let id = game.create_object_from_card(&bears(), alice, ZoneKind::Hand).unwrap();

        game.put_spell_on_stack(id, alice, Choices::default()).unwrap();
        let ability = game.put_ability_on_stack(
            None,
            alice,
            Box::new(crate::effect::GainLifeEffect::you(1)),
            Choices::default(),
        );
        assert_eq!(game.stack.ids(), vec![ability, id]);
        assert_eq!(game.object(id).unwrap().zone, ZoneId::stack());
        assert!(game.validate_zone_consistency().is_ok());

        assert!(game.remove_from_game(ability).is_some());
        assert!(game.registry.is_retired(ability));
        game.move_object(id, ZoneId::battlefield(), None).unwrap();
        assert!(game.stack.is_empty());
        assert!(game.validate_zone_consistency().is_ok());
    }

    #[test]
    fn test_token_is_a_token() {
        let mut game = test_game();
        let alice = PlayerId::from_index(0);
        let def = Arc::new(CardDefinition::new(bears()));
        let token = game.create_token(&def, alice).unwrap();
        assert_eq!(game.object(token).unwrap().kind, ObjectKind::Token);
        assert!(game.battlefield.contains(token));
    }

    #[test]
    fn test_apnap_order_starts_with_active_player() {
        let mut game = GameState::new(
            vec!["A".to_string(), "B".to_string(), "C".to_string()],
            GameConfig::default(),
        );
        game.turn.active_player = PlayerId::from_index(1);
        let order: Vec<u8> = game.apnap_order().iter().map(|p| p.0).collect();
        assert_eq!(order, vec![1, 2, 0]);

        game.players[2].has_lost = true;
        assert_eq!(
            game.next_player_in_game(PlayerId::from_index(1)),
            Some(PlayerId::from_index(0))
        );
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let order = |seed| {
            let mut game = GameState::new(
                vec!["Alice".to_string()],
                GameConfig {
                    seed: Some(seed),
                    ..GameConfig::default()
                },
            );
            let alice = PlayerId::from_index(0);
            fill_library(&mut game, alice, 30);
            game.shuffle_library(alice);
            game.players[0].library.ids()
        };
        assert_eq!(order(9), order(9));
    }
}
