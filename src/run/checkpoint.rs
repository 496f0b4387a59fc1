//! Full mid-battle checkpoints.
//!
//! Unlike the compact save layout, a checkpoint captures everything: piles,
//! effects, enemy health, turn pacing and the exact RNG position. It is
//! serialized with bincode and meant for tests and tooling rather than the
//! player's save file.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::map::Map;
use super::save::RunSnapshot;
use super::session::RunOutcome;
use crate::combat::Player;
use crate::core::{GameRngState, SaveError};

/// Complete state of a `Run` apart from the catalog and configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub(crate) rng: GameRngState,
    pub(crate) player: Player,
    pub(crate) map: Map,
    pub(crate) end_timer: f32,
    pub(crate) outcome: Option<RunOutcome>,
    pub(crate) save_point: Option<RunSnapshot>,
}

impl Checkpoint {
    /// Serialize with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SaveError> {
        let bytes = bincode::serialize(self)?;
        debug!(bytes = bytes.len(), "Serialized checkpoint");
        Ok(bytes)
    }

    /// Deserialize a buffer produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SaveError> {
        let checkpoint = bincode::deserialize(bytes)?;
        debug!(bytes = bytes.len(), "Deserialized checkpoint");
        Ok(checkpoint)
    }

    #[must_use]
    pub fn rng(&self) -> GameRngState {
        self.rng
    }

    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }
}
