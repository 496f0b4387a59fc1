//! Compact save layout.
//!
//! ## Byte Layout
//!
//! ```text
//! offset  size  field
//! 0       4     magic "TDTT"
//! 4       4     RNG seed (big-endian)
//! 8       4     RNG cursor (big-endian)
//! 12      1     encounter definition id
//! 13      1     encounter index on the map
//! 14      1     game state (0 normal, 1 reward screen, 2 resting)
//! 15      1     player current health
//! 16      n     deck card ids, one byte each
//! ```
//!
//! The deck length is implied by the buffer length.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{GameRngState, SaveError};
use crate::encounters::EncounterId;

pub const SAVE_MAGIC: [u8; 4] = *b"TDTT";

/// Length of the fixed header; the smallest valid save.
pub const HEADER_LEN: usize = 16;

/// Which screen the run was on when the snapshot was taken.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStateTag {
    #[default]
    Normal,
    RewardScreen,
    Resting,
}

impl GameStateTag {
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            GameStateTag::Normal => 0,
            GameStateTag::RewardScreen => 1,
            GameStateTag::Resting => 2,
        }
    }

    pub fn from_byte(byte: u8) -> Result<Self, SaveError> {
        match byte {
            0 => Ok(GameStateTag::Normal),
            1 => Ok(GameStateTag::RewardScreen),
            2 => Ok(GameStateTag::Resting),
            other => Err(SaveError::UnknownState(other)),
        }
    }
}

/// Everything needed to resume a run at an encounter boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub rng: GameRngState,
    pub encounter: EncounterId,
    pub encounter_index: u8,
    pub state: GameStateTag,
    pub health: u8,
    pub deck: Vec<CardId>,
}

impl RunSnapshot {
    /// Pack into the save layout.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.deck.len());
        bytes.extend_from_slice(&SAVE_MAGIC);
        bytes.extend_from_slice(&self.rng.seed.to_be_bytes());
        bytes.extend_from_slice(&self.rng.cursor.to_be_bytes());
        bytes.push(self.encounter.raw());
        bytes.push(self.encounter_index);
        bytes.push(self.state.to_byte());
        bytes.push(self.health);
        bytes.extend(self.deck.iter().map(|card| card.raw()));
        bytes
    }

    /// Unpack a save buffer. Nothing is partially applied on failure.
    pub fn decode(bytes: &[u8]) -> Result<Self, SaveError> {
        if bytes.len() < HEADER_LEN {
            return Err(SaveError::TooShort {
                len: bytes.len(),
                min: HEADER_LEN,
            });
        }
        let (header, deck) = bytes.split_at(HEADER_LEN);
        let word = |at: usize| u32::from_be_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]]);

        let magic = [header[0], header[1], header[2], header[3]];
        if magic != SAVE_MAGIC {
            return Err(SaveError::BadMagic { found: magic });
        }

        Ok(Self {
            rng: GameRngState {
                seed: word(4),
                cursor: word(8),
            },
            encounter: EncounterId::new(header[12]),
            encounter_index: header[13],
            state: GameStateTag::from_byte(header[14])?,
            health: header[15],
            deck: deck.iter().copied().map(CardId::new).collect(),
        })
    }
}
