//! Health, block and effects shared by the player and enemies.
//!
//! These methods are the only places health or block change outside of the
//! turn-boundary block reset.

use serde::{Deserialize, Serialize};

use crate::effects::EffectStack;

/// Which combatant something belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantId {
    Player,
    /// Enemy by slot index in the current encounter.
    Enemy(usize),
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombatantId::Player => write!(f, "Player"),
            CombatantId::Enemy(slot) => write!(f, "Enemy#{}", slot),
        }
    }
}

/// How one hit was split between block and health.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    pub blocked: i32,
    pub health_lost: i32,
}

/// Health, block and effect list of one combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub current_health: i32,
    pub max_health: i32,
    pub current_block: i32,
    pub effects: EffectStack,
}

impl Vitals {
    /// Full health, no block, no effects.
    #[must_use]
    pub fn new(max_health: i32) -> Self {
        Self {
            current_health: max_health,
            max_health,
            current_block: 0,
            effects: EffectStack::new(),
        }
    }

    /// Absorb with block first, then lose health. Negative amounts are
    /// treated as zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        let amount = amount.max(0);
        let blocked = self.current_block.min(amount);
        self.current_block -= blocked;

        let before = self.current_health;
        self.current_health = (self.current_health - (amount - blocked)).clamp(0, self.max_health);

        DamageOutcome {
            blocked,
            health_lost: before - self.current_health,
        }
    }

    /// Add block. There is no upper bound.
    pub fn gain_block(&mut self, amount: i32) {
        self.current_block += amount.max(0);
    }

    /// Heal up to max health. Returns the amount actually restored.
    pub fn restore_health(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
        self.current_health - before
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.current_health > 0
    }
}
