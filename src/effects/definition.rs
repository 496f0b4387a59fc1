//! Effect definitions - static buff/debuff data.
//!
//! An `EffectDefinition` says which numbers an effect changes and how.
//! The per-combatant stack count lives in `Effect` (see `stack.rs`).

use serde::{Deserialize, Serialize};

use crate::catalog::xml::FromAttribute;

/// Unique identifier for an effect definition (its catalog index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u16);

impl EffectId {
    /// Create a new effect ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// Whether an effect helps or hurts its bearer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    Buff,
    Debuff,
    #[default]
    Unknown,
}

impl FromAttribute for EffectType {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Buff" => Some(Self::Buff),
            "Debuff" => Some(Self::Debuff),
            _ => None,
        }
    }
}

/// What the stack count of an effect means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackType {
    /// Turns remaining. Decays by one each end-of-round.
    Duration,
    /// Strength of the effect. Never decays.
    Intensity,
    /// Charges consumed by the effect itself.
    Counter,
    #[default]
    None,
}

impl FromAttribute for StackType {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Duration" => Some(Self::Duration),
            "Intensity" => Some(Self::Intensity),
            "Counter" => Some(Self::Counter),
            "None" => Some(Self::None),
            _ => None,
        }
    }
}

/// The numbers an effect may modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    /// Damage the bearer deals.
    DealtDamage,
    /// Damage the bearer receives.
    ReceivedDamage,
    /// Block the bearer gains.
    Block,
}

/// Static effect definition.
///
/// ## Example
///
/// ```
/// use tower_battle::effects::{EffectDefinition, EffectId, EffectType, ModifierKind};
///
/// let vulnerable = EffectDefinition::new(EffectId::new(0), "Vulnerable", EffectType::Debuff)
///     .modifying(ModifierKind::ReceivedDamage)
///     .with_percentage(1.5);
///
/// assert_eq!(vulnerable.apply(ModifierKind::ReceivedDamage, 5, 2), 7);
/// assert_eq!(vulnerable.apply(ModifierKind::Block, 5, 2), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectDefinition {
    /// Catalog index.
    pub id: EffectId,

    /// Unique name, used by other definitions to reference this one.
    pub name: String,

    pub effect_type: EffectType,

    pub stack_type: StackType,

    pub modifies_dealt_damage: bool,

    pub modifies_received_damage: bool,

    pub modifies_block: bool,

    /// Multiply by `percent_modifier` instead of adding the stack count.
    pub use_percentage: bool,

    pub percent_modifier: f32,

    /// Consumes one stack to cancel an incoming debuff.
    pub blocks_debuff: bool,
}

impl EffectDefinition {
    /// Create a definition that modifies nothing.
    #[must_use]
    pub fn new(id: EffectId, name: impl Into<String>, effect_type: EffectType) -> Self {
        Self {
            id,
            name: name.into(),
            effect_type,
            stack_type: StackType::None,
            modifies_dealt_damage: false,
            modifies_received_damage: false,
            modifies_block: false,
            use_percentage: false,
            percent_modifier: 1.0,
            blocks_debuff: false,
        }
    }

    /// Set the stack type (builder pattern).
    #[must_use]
    pub fn with_stack_type(mut self, stack_type: StackType) -> Self {
        self.stack_type = stack_type;
        self
    }

    /// Mark a number as modified by this effect (builder pattern).
    #[must_use]
    pub fn modifying(mut self, kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::DealtDamage => self.modifies_dealt_damage = true,
            ModifierKind::ReceivedDamage => self.modifies_received_damage = true,
            ModifierKind::Block => self.modifies_block = true,
        }
        self
    }

    /// Switch to multiplicative mode (builder pattern).
    #[must_use]
    pub fn with_percentage(mut self, multiplier: f32) -> Self {
        self.use_percentage = true;
        self.percent_modifier = multiplier;
        self
    }

    /// Make this effect cancel debuffs (builder pattern).
    #[must_use]
    pub fn blocking_debuffs(mut self) -> Self {
        self.blocks_debuff = true;
        self
    }

    /// Does this effect modify the given number?
    #[must_use]
    pub const fn modifies(&self, kind: ModifierKind) -> bool {
        match kind {
            ModifierKind::DealtDamage => self.modifies_dealt_damage,
            ModifierKind::ReceivedDamage => self.modifies_received_damage,
            ModifierKind::Block => self.modifies_block,
        }
    }

    /// Apply this effect to a running value.
    ///
    /// Percentage effects multiply and truncate toward zero. Flat effects
    /// add the stack count. Unrelated numbers pass through unchanged.
    #[must_use]
    pub fn apply(&self, kind: ModifierKind, value: i32, stack: i32) -> i32 {
        if !self.modifies(kind) {
            value
        } else if self.use_percentage {
            (value as f32 * self.percent_modifier) as i32
        } else {
            value + stack
        }
    }
}

/// An effect reference carried by cards and intentions: which effect and
/// how many stacks to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectGrant {
    pub effect: EffectId,
    pub stack: i32,
}

impl EffectGrant {
    #[must_use]
    pub const fn new(effect: EffectId, stack: i32) -> Self {
        Self { effect, stack }
    }
}
