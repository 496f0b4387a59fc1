//! Enemy definitions and their intention lists.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::catalog::xml::FromAttribute;
use crate::effects::EffectGrant;

/// Catalog index of an enemy definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyId(pub u16);

impl EnemyId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Enemy({})", self.0)
    }
}

/// How an enemy picks its next intention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentionMode {
    /// Uniformly random each round.
    Random,
    /// Cycle through the whole list.
    LoopAll,
    /// Walk the list once, then repeat the last entry forever.
    LoopLast,
    /// Unrecognised mode. Always picks the first intention.
    #[default]
    Unknown,
}

impl FromAttribute for IntentionMode {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Random" => Some(Self::Random),
            "LoopAll" => Some(Self::LoopAll),
            "LoopLast" => Some(Self::LoopLast),
            _ => None,
        }
    }
}

/// One action an enemy may telegraph and then perform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intention {
    pub damage: i32,
    pub block: i32,
    /// Card shuffled into the player's draw pile.
    pub card_to_add: Option<CardId>,
    /// Applied to the player.
    pub inflict_effect: Option<EffectGrant>,
    /// Applied to the enemy itself.
    pub gain_effect: Option<EffectGrant>,
    /// Wind-up turn: no damage or block this round.
    pub preparing: bool,
}

impl Intention {
    #[must_use]
    pub fn attack(damage: i32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn defend(block: i32) -> Self {
        Self {
            block,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn preparing() -> Self {
        Self {
            preparing: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card_to_add = Some(card);
        self
    }

    #[must_use]
    pub fn with_inflict(mut self, grant: EffectGrant) -> Self {
        self.inflict_effect = Some(grant);
        self
    }

    #[must_use]
    pub fn with_gain(mut self, grant: EffectGrant) -> Self {
        self.gain_effect = Some(grant);
        self
    }
}

/// Static enemy definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: EnemyId,
    pub name: String,
    pub max_health: i32,
    pub intention_mode: IntentionMode,
    pub intentions: Vec<Intention>,
}

impl EnemyDefinition {
    #[must_use]
    pub fn new(id: EnemyId, name: impl Into<String>, max_health: i32, mode: IntentionMode) -> Self {
        Self {
            id,
            name: name.into(),
            max_health,
            intention_mode: mode,
            intentions: Vec::new(),
        }
    }

    /// Append an intention (builder pattern).
    #[must_use]
    pub fn with_intention(mut self, intention: Intention) -> Self {
        self.intentions.push(intention);
        self
    }
}
