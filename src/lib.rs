pub mod ability;
pub mod actions;
pub mod card;
pub mod cards;
pub mod characteristics;
pub mod config;
pub mod decision;
pub mod effect;
pub mod game_loop;
pub mod game_state;
pub mod ids;
pub mod mana;
pub mod object;
pub mod player;
pub mod priority;
pub mod registry;
pub mod rules;
pub mod stack;
pub mod triggers;
pub mod turn;
pub mod types;
pub mod zone;


pub use ability::{Ability, ActivationContext, ManaCostAbility, TapManaAbility};
pub use actions::{ActionError, ErrorClass};
pub use card::{Card, CardBuilder, PowerToughness};
pub use cards::{CardDefinition, CardDefinitionBuilder, CardRegistry};
pub use characteristics::{Characteristics, CharacteristicsSource, PrintedCharacteristics};
pub use config::{ConfigError, GameConfig};
pub use decision::{
    AutoPassDecisionMaker, AutoPlayDecisionMaker, DecisionMaker, DecisionRouter, GameResult,
    LegalAction, PlayerSummary, PriorityContext, ScriptedDecisionMaker, SelectFirstDecisionMaker,
    StateSummary, compute_legal_actions,
};
pub use effect::{
    Choices, EffectContext, EffectError, EffectExecutor, Target, TargetFilter, TargetSpec,
};
pub use game_loop::{GameLoopError, LoopStep, run_game};
pub use game_state::{GameState, InvariantViolation, MAX_PLAYERS, Phase, Step, TurnState};
pub use ids::{CardId, ObjectId, PlayerId, Timestamp};
pub use mana::{InsufficientMana, ManaCost, ManaPool, ManaSymbol, ManaType};
pub use object::{CounterType, GameObject, ObjectKind, StatusFlags};
pub use player::Player;
pub use priority::{PassOutcome, PriorityArbiter, PriorityError};
pub use registry::{ObjectRegistry, RegistryError};
pub use rules::{LoseReason, StateBasedAction};
pub use stack::{ResolutionStack, StackEntry};
pub use triggers::{TriggerQueue, TriggeredAbilityEntry};
pub use turn::TurnError;
pub use types::{CardType, Subtype, Supertype};
pub use zone::{Zone, ZoneId, ZoneKind, ZonePosition};
