//! Card instance identification.
//!
//! Every card the player holds during a run (deck copies and cards that
//! enemies add mid-encounter) has a unique `EntityId`. Piles store handles
//! by value, so two copies of the same definition stay distinguishable.
//!
//! ```
//! use tower_battle::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::default();
//! assert_eq!(ids.allocate(), EntityId(0));
//! assert_eq!(ids.allocate(), EntityId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic source of fresh entity IDs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Hand out the next unused ID.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
