//! Enemies: static definitions and live instances.
//!
//! ## Key Types
//!
//! - `EnemyDefinition`: Max health, intention list and selection mode
//! - `Intention`: One telegraphed action (damage, block, effects, card)
//! - `Enemy`: A live enemy with its vitals and selected intention

pub mod definition;
pub mod enemy;

pub use definition::{EnemyDefinition, EnemyId, Intention, IntentionMode};
pub use enemy::{Enemy, IntentionPreview};
