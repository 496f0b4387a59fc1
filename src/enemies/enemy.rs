//! Enemy instances and intention selection.
//!
//! An enemy telegraphs its next action by holding a selected intention
//! from its definition's list. Selection happens when the encounter begins
//! and again after every enemy turn.

use serde::{Deserialize, Serialize};

use super::definition::{EnemyDefinition, EnemyId, Intention, IntentionMode};
use crate::cards::CardId;
use crate::catalog::Catalog;
use crate::combat::Vitals;
use crate::core::GameRng;
use crate::effects::{resolve_damage, EffectGrant, ModifierKind};

/// A live enemy in the current encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub definition: EnemyId,
    pub vitals: Vitals,
    /// Screen rectangle from the encounter definition.
    pub bounds: [f32; 4],
    current_intention: Option<usize>,
}

/// What an enemy's current intention would do if performed right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IntentionPreview {
    pub damage: i32,
    pub block: i32,
    pub card_to_add: Option<CardId>,
    pub inflict_effect: Option<EffectGrant>,
    pub gain_effect: Option<EffectGrant>,
    pub preparing: bool,
}

impl Enemy {
    /// Spawn at full health with no intention selected.
    #[must_use]
    pub fn new(definition: &EnemyDefinition, bounds: [f32; 4]) -> Self {
        Self {
            definition: definition.id,
            vitals: Vitals::new(definition.max_health),
            bounds,
            current_intention: None,
        }
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.vitals.is_alive()
    }

    /// Index of the selected intention.
    #[must_use]
    pub const fn current_intention(&self) -> Option<usize> {
        self.current_intention
    }

    /// The selected intention, resolved against the definition.
    #[must_use]
    pub fn intention<'d>(&self, definition: &'d EnemyDefinition) -> Option<&'d Intention> {
        definition.intentions.get(self.current_intention?)
    }

    /// Pick the next intention according to the definition's mode.
    ///
    /// Only `Random` consumes the RNG. An empty intention list selects
    /// nothing.
    pub fn choose_next_intention(
        &mut self,
        definition: &EnemyDefinition,
        turn_number: u32,
        rng: &mut GameRng,
    ) -> Option<usize> {
        let len = definition.intentions.len();
        if len == 0 {
            self.current_intention = None;
            return None;
        }
        let turn = turn_number as usize;
        let index = match definition.intention_mode {
            IntentionMode::Random => rng.roll_less_than(len),
            IntentionMode::LoopAll => turn % len,
            IntentionMode::LoopLast => turn.min(len - 1),
            IntentionMode::Unknown => 0,
        };
        self.current_intention = Some(index);
        Some(index)
    }

    /// Numbers the current intention would produce against `player` now.
    ///
    /// Zero base values skip the modifier chain, so a flat buff never turns
    /// a non-attack into an attack. Preparing intentions produce no numbers.
    #[must_use]
    pub fn preview(
        &self,
        definition: &EnemyDefinition,
        player: &Vitals,
        catalog: &Catalog,
    ) -> Option<IntentionPreview> {
        let intention = self.intention(definition)?;
        let mut preview = IntentionPreview {
            card_to_add: intention.card_to_add,
            inflict_effect: intention.inflict_effect,
            gain_effect: intention.gain_effect,
            preparing: intention.preparing,
            ..IntentionPreview::default()
        };
        if intention.preparing {
            return Some(preview);
        }
        if intention.damage != 0 {
            preview.damage = resolve_damage(intention.damage, &self.vitals.effects, &player.effects, catalog);
        }
        if intention.block != 0 {
            preview.block = self.vitals.effects.modify(intention.block, ModifierKind::Block, catalog);
        }
        Some(preview)
    }
}
