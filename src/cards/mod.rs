//! Card system: definitions and instances.
//!
//! ## Key Types
//!
//! - `CardId`: One-byte identifier for card definitions (persisted in saves)
//! - `CardDefinition`: Static card data (cost, damage, targeting, effects)
//! - `CardInstance`: Handle to one physical card owned by the player

pub mod definition;
pub mod instance;

pub use definition::{AttackType, CardDefinition, CardId, CardRarity, CardType, TargetMode};
pub use instance::CardInstance;
