//! Buff/debuff system.
//!
//! ## Key Types
//!
//! - `EffectDefinition`: Which numbers an effect modifies and how
//! - `EffectGrant`: An effect reference plus a stack count, carried by
//!   cards and enemy intentions
//! - `EffectStack`: The ordered effect list of one combatant
//!
//! ## Modifier Resolution
//!
//! Damage passes through the attacker's dealt-damage modifiers and then the
//! defender's received-damage modifiers. Block passes through the gainer's
//! own block modifiers. Within one list effects apply in the order they
//! were first applied.

pub mod definition;
pub mod stack;

pub use definition::{EffectDefinition, EffectGrant, EffectId, EffectType, ModifierKind, StackType};
pub use stack::{resolve_damage, DecayRule, Effect, EffectApplication, EffectStack};
