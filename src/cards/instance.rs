//! Card instances - one handle per physical card.
//!
//! Deck copies and cards injected by enemies are both `CardInstance`s. The
//! player owns every instance; piles hold copies of the handle.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::EntityId;

/// A specific card held by the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Reference to the card definition.
    pub card_id: CardId,

    /// Created during an encounter and discarded when it ends.
    pub temporary: bool,
}

impl CardInstance {
    /// Create a permanent deck card.
    #[must_use]
    pub const fn new(entity_id: EntityId, card_id: CardId) -> Self {
        Self {
            entity_id,
            card_id,
            temporary: false,
        }
    }

    /// Create a card that only lives until the encounter ends.
    #[must_use]
    pub const fn temporary(entity_id: EntityId, card_id: CardId) -> Self {
        Self {
            entity_id,
            card_id,
            temporary: true,
        }
    }
}
