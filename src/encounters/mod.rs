//! Encounters: definitions, the live battle state machine and rewards.
//!
//! ## Key Types
//!
//! - `EncounterDefinition`: Difficulty tier and enemy spawn slots
//! - `Encounter`: A live battle with its turn state and reward offer
//! - `TurnState`: Which side is acting

pub mod definition;
pub mod encounter;
pub mod reward;

pub use definition::{EncounterDefinition, EncounterId, SpawnSlot, DEFAULT_SPAWN_BOUNDS};
pub use encounter::{Encounter, TurnState};
pub use reward::{roll_rewards, REWARD_COUNT};
