//! Card piles for the player's deck during an encounter.
//!
//! ## Key Types
//!
//! - `CardPiles`: Draw pile, hand and discard pile with shuffle semantics
//! - `Pile`: Which of the three piles a card is in

pub mod piles;

pub use piles::{CardPiles, Pile};
