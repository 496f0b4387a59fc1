//! # tower-battle
//!
//! Battle-resolution core for a single-player, turn-based deckbuilding game.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Effects, cards, enemies and encounters come from
//!    definition tables loaded once into a read-only `Catalog`.
//!
//! 2. **Deterministic**: Every random decision draws from one seeded
//!    stream. A `(seed, cursor)` pair reproduces a run exactly.
//!
//! 3. **Headless**: The core never renders or plays sound. Observable
//!    changes are recorded as `CombatEvent`s and handed to the host through
//!    the `presentation` traits.
//!
//! ## Architecture
//!
//! - **Run**: Owns the player, the pre-generated map and the RNG stream.
//!   The host drives it with `update(dt)` and player commands.
//!
//! - **Encounter**: Alternates player and enemy turns. Enemies act one at a
//!   time, paced by a fixed interval.
//!
//! - **Persistence**: A compact save point is recorded at the start of every
//!   encounter, at rest stops and when a reward is offered. Full bincode
//!   checkpoints capture a battle mid-turn.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration and error types
//! - `catalog`: Definition tables and their XML loader
//! - `effects`: Effect definitions, stacks and damage modifiers
//! - `cards`: Card definitions and instances
//! - `zones`: Draw, hand, discard and exhaust piles
//! - `enemies`: Enemy definitions, intentions and live enemies
//! - `combat`: Vitals, card play and intention resolution, events
//! - `encounters`: Encounter definitions, turn flow and rewards
//! - `run`: Map, session driver, save points and checkpoints
//! - `presentation`: Audio and overlay boundary

pub mod core;
pub mod catalog;
pub mod effects;
pub mod cards;
pub mod zones;
pub mod enemies;
pub mod combat;
pub mod encounters;
pub mod run;
pub mod presentation;

// Re-export commonly used types
pub use crate::core::{
    EntityId, EntityAllocator,
    GameRng, GameRngState,
    RunConfig, StarterCard,
    CatalogError, ConfigError, PlayError, RunError, SaveError,
};

pub use crate::catalog::{Catalog, CatalogKind, DefinitionSource, DirectorySource, InMemorySource};

pub use crate::effects::{
    EffectDefinition, EffectGrant, EffectId, EffectType, ModifierKind, StackType,
    Effect, EffectStack, DecayRule,
};

pub use crate::cards::{AttackType, CardDefinition, CardId, CardInstance, CardRarity, CardType, TargetMode};

pub use crate::zones::{CardPiles, Pile};

pub use crate::enemies::{Enemy, EnemyDefinition, EnemyId, Intention, IntentionMode, IntentionPreview};

pub use crate::combat::{BattleContext, CombatEvent, CombatantId, EventLog, Player, Vitals};

pub use crate::encounters::{Encounter, EncounterDefinition, EncounterId, TurnState};

pub use crate::run::{Checkpoint, Map, Run, RunOutcome, RunSnapshot};

pub use crate::presentation::{AudioSink, Overlay, OverlayText, Presenter, SoundCue};
