//! The run's encounter sequence and rest stops.
//!
//! ## Layout
//!
//! For each difficulty tier, in order, the map holds
//! `encounters_per_tier[tier]` encounters whose definition has
//! `difficulty == tier`. The second-to-last definition follows as the boss
//! and the last definition as the secret final boss.
//!
//! A rest stop sits after the last encounter of every tier and after the
//! boss. With the default `[3, 3, 3]` tiers that is after indices 2, 5, 8
//! and 9.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::core::{GameRng, RunConfig, RunError};
use crate::encounters::{Encounter, EncounterDefinition};

/// Where the map moved after finishing the current encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Stopped at a rest stop; the same encounter stays current.
    RestStop,
    /// Moved on to the encounter at this index.
    Encounter(usize),
    /// There is nothing left.
    Finished,
}

/// Pre-generated sequence of encounters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    encounters: Vec<Encounter>,
    rest_stops: Vec<usize>,
    current: usize,
    resting: bool,
}

impl Map {
    /// Generate every encounter of a run from the shared stream.
    ///
    /// Tier encounters are drawn by rejection sampling over the whole
    /// definition list. Each encounter rolls its rewards as soon as it is
    /// picked.
    pub fn generate(
        catalog: &Catalog,
        config: &RunConfig,
        rng: &mut GameRng,
    ) -> Result<Self, RunError> {
        let definitions = catalog.encounters();
        if definitions.len() < 2 {
            return Err(RunError::TooFewEncounters {
                count: definitions.len(),
            });
        }

        let mut encounters = Vec::with_capacity(config.tiered_encounter_count() + 2);
        let mut rest_stops = Vec::with_capacity(config.encounters_per_tier.len() + 1);
        for (tier, count) in config.encounters_per_tier.iter().enumerate() {
            let difficulty = u8::try_from(tier).map_err(|_| RunError::NoEncounterForTier {
                difficulty: u8::MAX,
            })?;
            if !definitions.iter().any(|d| d.difficulty == difficulty) {
                return Err(RunError::NoEncounterForTier { difficulty });
            }
            for _ in 0..*count {
                let definition = pick_for_tier(definitions, difficulty, rng);
                encounters.push(Encounter::new(definition, catalog, config, rng)?);
            }
            rest_stops.push(encounters.len() - 1);
        }

        let boss = &definitions[definitions.len() - 2];
        encounters.push(Encounter::new(boss, catalog, config, rng)?);
        rest_stops.push(encounters.len() - 1);
        let final_boss = &definitions[definitions.len() - 1];
        encounters.push(Encounter::new(final_boss, catalog, config, rng)?);

        debug!(encounters = encounters.len(), ?rest_stops, "Generated map");
        Ok(Self {
            encounters,
            rest_stops,
            current: 0,
            resting: false,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.encounters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.encounters.is_empty()
    }

    #[must_use]
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Encounter {
        &self.encounters[self.current]
    }

    pub fn current_mut(&mut self) -> &mut Encounter {
        &mut self.encounters[self.current]
    }

    /// Whether the player is at a rest stop.
    #[must_use]
    pub const fn is_resting(&self) -> bool {
        self.resting
    }

    /// Whether the current encounter is the last one.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.current + 1 == self.encounters.len()
    }

    /// Whether a rest stop follows the encounter at `index`.
    #[must_use]
    pub fn rest_stop_after(&self, index: usize) -> bool {
        self.rest_stops.contains(&index)
    }

    /// Whether the next `advance` only enters a rest stop.
    #[must_use]
    pub fn next_is_rest_stop(&self) -> bool {
        !self.resting && self.rest_stop_after(self.current)
    }

    /// Move past the current encounter.
    ///
    /// The first call after a tier's last encounter (or the boss) only
    /// enters the rest stop; the next call leaves it. The caller ends the
    /// old encounter and begins the new one.
    pub fn advance(&mut self) -> Advance {
        if self.next_is_rest_stop() {
            self.resting = true;
            return Advance::RestStop;
        }
        if self.is_final() {
            return Advance::Finished;
        }
        self.current += 1;
        self.resting = false;
        Advance::Encounter(self.current)
    }

    /// Jump to a saved position. The index must be in range.
    pub(crate) fn restore_position(&mut self, index: usize, resting: bool) {
        self.current = index;
        self.resting = resting;
    }
}

fn pick_for_tier<'d>(
    definitions: &'d [EncounterDefinition],
    difficulty: u8,
    rng: &mut GameRng,
) -> &'d EncounterDefinition {
    loop {
        let definition = &definitions[rng.roll_less_than(definitions.len())];
        if definition.difficulty == difficulty {
            return definition;
        }
    }
}
