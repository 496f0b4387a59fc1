//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card type.
//! For example, "Slash" costs 1 energy and deals 6 damage to one enemy -
//! these are part of the definition.
//!
//! Which pile a copy currently sits in is tracked separately through
//! `CardInstance` handles.

use serde::{Deserialize, Serialize};

use crate::catalog::xml::FromAttribute;
use crate::effects::EffectGrant;

/// Unique identifier for a card definition.
///
/// Assigned in document order and persisted in save files, so it must fit
/// in one byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Attack,
    Skill,
    Power,
    Status,
    #[default]
    Unknown,
}

impl FromAttribute for CardType {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Attack" => Some(Self::Attack),
            "Skill" => Some(Self::Skill),
            "Power" => Some(Self::Power),
            "Status" => Some(Self::Status),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardRarity {
    Starter,
    Common,
    Uncommon,
    Rare,
    #[default]
    Unknown,
}

impl FromAttribute for CardRarity {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Starter" => Some(Self::Starter),
            "Common" => Some(Self::Common),
            "Uncommon" => Some(Self::Uncommon),
            "Rare" => Some(Self::Rare),
            _ => None,
        }
    }
}

/// Who a card's damage step hits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetMode {
    /// A single chosen enemy.
    One,
    /// Every living enemy.
    All,
    /// The player only. No damage step.
    SelfTarget,
    #[default]
    None,
}

impl FromAttribute for TargetMode {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "One" => Some(Self::One),
            "All" => Some(Self::All),
            "Self" => Some(Self::SelfTarget),
            "None" => Some(Self::None),
            _ => None,
        }
    }
}

/// Cosmetic tag selecting the sound a played card makes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    Slice,
    Pierce,
    LightImpact,
    HeavyImpact,
    Fire,
    Magic,
    #[default]
    None,
}

impl FromAttribute for AttackType {
    fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "Slice" => Some(Self::Slice),
            "Pierce" => Some(Self::Pierce),
            "LightImpact" => Some(Self::LightImpact),
            "HeavyImpact" => Some(Self::HeavyImpact),
            "Fire" => Some(Self::Fire),
            "Magic" => Some(Self::Magic),
            "None" => Some(Self::None),
            _ => None,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use tower_battle::cards::{CardDefinition, CardId, CardType, TargetMode};
///
/// let slash = CardDefinition::new(CardId::new(0), "Slash", CardType::Attack)
///     .with_cost(1)
///     .with_damage(6, 1)
///     .with_target(TargetMode::One);
///
/// assert_eq!(slash.damage, 6);
/// assert!(slash.is_playable);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    pub name: String,

    pub description: String,

    pub card_type: CardType,

    pub rarity: CardRarity,

    pub target_mode: TargetMode,

    pub attack_type: AttackType,

    /// Energy needed to play.
    pub cost: i32,

    /// Base damage per hit.
    pub damage: i32,

    pub num_hits: i32,

    pub block: i32,

    pub restore_hp: i32,

    pub cards_drawn: i32,

    pub energy_gain: i32,

    /// Applied to the target(s) after the damage step.
    pub inflict_effect: Option<EffectGrant>,

    /// Applied to the player.
    pub gain_effect: Option<EffectGrant>,

    /// Leaves play instead of going to the discard pile.
    pub exhaust: bool,

    /// False for cards that exist only as reward previews.
    pub is_playable: bool,
}

impl CardDefinition {
    /// Create a card that does nothing and costs nothing.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            card_type,
            rarity: CardRarity::Unknown,
            target_mode: TargetMode::None,
            attack_type: AttackType::None,
            cost: 0,
            damage: 0,
            num_hits: 0,
            block: 0,
            restore_hp: 0,
            cards_drawn: 0,
            energy_gain: 0,
            inflict_effect: None,
            gain_effect: None,
            exhaust: false,
            is_playable: true,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_damage(mut self, damage: i32, num_hits: i32) -> Self {
        self.damage = damage;
        self.num_hits = num_hits;
        self
    }

    #[must_use]
    pub fn with_block(mut self, block: i32) -> Self {
        self.block = block;
        self
    }

    #[must_use]
    pub fn with_target(mut self, target_mode: TargetMode) -> Self {
        self.target_mode = target_mode;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: CardRarity) -> Self {
        self.rarity = rarity;
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

    #[must_use]
    pub fn exhausting(mut self) -> Self {
        self.exhaust = true;
        self
    }

    #[must_use]
    pub fn unplayable(mut self) -> Self {
        self.is_playable = false;
        self
    }

    /// Does playing this card require choosing an enemy?
    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.target_mode == TargetMode::One
    }
}
