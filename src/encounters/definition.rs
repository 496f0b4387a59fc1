//! Encounter definitions: which enemies appear, where, and how hard.

use serde::{Deserialize, Serialize};

use crate::enemies::EnemyId;

/// Catalog index of an encounter definition. Persisted in saves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncounterId(pub u8);

impl EncounterId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for EncounterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Encounter({})", self.0)
    }
}

/// Default screen rectangle for an enemy without `renderBounds`.
pub const DEFAULT_SPAWN_BOUNDS: [f32; 4] = [1100.0, 325.0, 1300.0, 525.0];

/// One enemy of an encounter and the screen rectangle it occupies.
///
/// The rectangle is opaque to combat; it is carried for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnSlot {
    pub enemy: EnemyId,
    pub bounds: [f32; 4],
}

impl SpawnSlot {
    #[must_use]
    pub const fn new(enemy: EnemyId) -> Self {
        Self {
            enemy,
            bounds: DEFAULT_SPAWN_BOUNDS,
        }
    }
}

/// Static encounter definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterDefinition {
    pub id: EncounterId,
    /// Difficulty tier, starting at 0. Boss encounters use the last two ids.
    pub difficulty: u8,
    pub enemies: Vec<SpawnSlot>,
}

impl EncounterDefinition {
    #[must_use]
    pub fn new(id: EncounterId, difficulty: u8) -> Self {
        Self {
            id,
            difficulty,
            enemies: Vec::new(),
        }
    }

    /// Add an enemy with default bounds (builder pattern).
    #[must_use]
    pub fn with_enemy(mut self, enemy: EnemyId) -> Self {
        self.enemies.push(SpawnSlot::new(enemy));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let pair = EncounterDefinition::new(EncounterId::new(4), 2)
            .with_enemy(EnemyId::new(0))
            .with_enemy(EnemyId::new(1));

        assert_eq!(pair.enemies.len(), 2);
        assert_eq!(pair.enemies[0].bounds, DEFAULT_SPAWN_BOUNDS);
        assert_eq!(format!("{}", pair.id), "Encounter(4)");
    }
}
