//! Run flow: map generation, the session driver and persistence.
//!
//! ## Key Types
//!
//! - `Map`: Pre-generated encounters with rest stops between tiers
//! - `Run`: The player, map and RNG stream of one run, driven by commands
//! - `RunSnapshot`: Compact save point written in the `TDTT` byte layout
//! - `Checkpoint`: Full bincode capture of a run for tests and tooling

pub mod checkpoint;
pub mod map;
pub mod save;
pub mod session;

pub use checkpoint::Checkpoint;
pub use map::{Advance, Map};
pub use save::{GameStateTag, RunSnapshot, HEADER_LEN, SAVE_MAGIC};
pub use session::{Run, RunOutcome};
