//! Error types, one enum per failure domain.
//!
//! - `CatalogError`: definition tables could not be built. Fatal at startup.
//! - `SaveError`: a save buffer or checkpoint could not be used. The caller
//!   falls back to a fresh run.
//! - `RunError`: a run could not be constructed from the catalog and config.
//! - `PlayError`: a player command was rejected. State is untouched.
//!
//! Lookups by name or id return `Option` instead.

use std::path::PathBuf;

use crate::cards::CardId;
use crate::catalog::CatalogKind;
use crate::core::EntityId;
use crate::encounters::EncounterId;

/// Invalid run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse run configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Definition tables could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {kind} definitions from {path}: {source}")]
    Io {
        kind: CatalogKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no {kind} definitions were provided")]
    MissingSource { kind: CatalogKind },

    #[error("malformed {kind} document: {message}")]
    Malformed { kind: CatalogKind, message: String },

    #[error("unexpected <{found}> in {kind} definitions, expected <{expected}>")]
    UnexpectedElement {
        kind: CatalogKind,
        expected: &'static str,
        found: String,
    },

    #[error("{kind} definition `{name}` has no <{container}> list")]
    MissingContainer {
        kind: CatalogKind,
        name: String,
        container: &'static str,
    },

    #[error("too many {kind} definitions ({count}), ids hold at most {limit}")]
    TooMany {
        kind: CatalogKind,
        count: usize,
        limit: usize,
    },
}

/// A save buffer or checkpoint was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error("save data is {len} bytes, at least {min} are required")]
    TooShort { len: usize, min: usize },

    #[error("save data has magic {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("unknown game state tag {0}")]
    UnknownState(u8),

    #[error("saved deck references unknown card {0}")]
    UnknownCard(CardId),

    #[error("saved encounter index {index} is outside the map of {len} encounters")]
    EncounterOutOfRange { index: usize, len: usize },

    #[error("saved encounter {saved} does not match {generated} at map index {index}")]
    EncounterMismatch {
        index: usize,
        saved: EncounterId,
        generated: EncounterId,
    },

    #[error("{field} value {value} does not fit the save layout")]
    Overflow { field: &'static str, value: i64 },

    #[error("no save point has been recorded")]
    NoSavePoint,

    #[error("checkpoint failed: {0}")]
    Checkpoint(String),
}

impl From<bincode::Error> for SaveError {
    fn from(error: bincode::Error) -> Self {
        Self::Checkpoint(error.to_string())
    }
}

/// A run could not be created or resumed.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("no encounter definition has difficulty {difficulty}")]
    NoEncounterForTier { difficulty: u8 },

    #[error("{count} encounter definitions loaded, a map needs at least 2")]
    TooFewEncounters { count: usize },

    #[error("only {available} card definitions are eligible as rewards, 3 are offered")]
    TooFewRewardCandidates { available: usize },

    #[error("starter deck names unknown card `{0}`")]
    UnknownStarterCard(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// A player command was rejected without changing any state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("{0} is not in hand")]
    NotInHand(EntityId),

    #[error("card costs {cost} energy but only {available} is left")]
    InsufficientEnergy { cost: i32, available: i32 },

    #[error("{0} cannot be played")]
    Unplayable(CardId),

    #[error("no card is selected")]
    NoSelection,

    #[error("target is missing or already dead")]
    InvalidTarget,

    #[error("the player cannot act right now")]
    NotPlayerTurn,
}
