//! Core run types: entity IDs, RNG, configuration and errors.
//!
//! Everything here is independent of the card/enemy rules and is shared by
//! the rest of the crate.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{RunConfig, StarterCard};
pub use entity::{EntityAllocator, EntityId};
pub use error::{CatalogError, ConfigError, PlayError, RunError, SaveError};
pub use rng::{GameRng, GameRngState};
