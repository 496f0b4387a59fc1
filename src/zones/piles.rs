//! Draw pile, hand and discard pile.
//!
//! `CardPiles` tracks where the player's cards are during an encounter and
//! handles movement between piles. All three piles are ordered:
//! - Draw pile: index 0 is the next card drawn
//! - Hand: cards in the order they were drawn
//! - Discard pile: cards in the order they were discarded
//!
//! ## Shuffling
//!
//! Shuffles move one uniformly random remaining card at a time from the
//! source onto the end of the draw pile. This consumes exactly one RNG roll
//! per card, which saved runs rely on to replay identically.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// The three piles a card can be in during an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pile {
    Draw,
    Hand,
    Discard,
}

/// Card locations for one encounter.
///
/// ```
/// use tower_battle::cards::{CardId, CardInstance};
/// use tower_battle::core::{EntityId, GameRng};
/// use tower_battle::zones::CardPiles;
///
/// let deck: Vec<_> = (0..4).map(|i| CardInstance::new(EntityId(i), CardId::new(0))).collect();
/// let mut rng = GameRng::new(1);
/// let mut piles = CardPiles::new();
///
/// piles.shuffle_draw_from_deck(&deck, &mut rng);
/// piles.draw_card(5, &mut rng);
///
/// assert_eq!(piles.hand().len(), 1);
/// assert_eq!(piles.draw_pile().len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    draw: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard: Vec<CardInstance>,
}

impl CardPiles {
    /// Create empty piles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the draw pile from a copy of the deck in random order.
    pub fn shuffle_draw_from_deck(&mut self, deck: &[CardInstance], rng: &mut GameRng) {
        let mut source = deck.to_vec();
        self.shuffle_into_draw(&mut source, rng);
    }

    /// Move the whole discard pile onto the draw pile in random order.
    pub fn shuffle_draw_from_discard(&mut self, rng: &mut GameRng) {
        let mut source = std::mem::take(&mut self.discard);
        self.shuffle_into_draw(&mut source, rng);
    }

    fn shuffle_into_draw(&mut self, source: &mut Vec<CardInstance>, rng: &mut GameRng) {
        while !source.is_empty() {
            let index = rng.roll_less_than(source.len());
            self.draw.push(source.remove(index));
        }
    }

    /// Move the front of the draw pile to the end of the hand.
    ///
    /// Does nothing when the hand is full. An empty draw pile is refilled
    /// from the discard pile first; if both are empty nothing is drawn.
    pub fn draw_card(&mut self, max_hand_size: usize, rng: &mut GameRng) -> Option<CardInstance> {
        if self.hand.len() >= max_hand_size {
            return None;
        }
        if self.draw.is_empty() {
            if self.discard.is_empty() {
                return None;
            }
            self.shuffle_draw_from_discard(rng);
        }
        let card = self.draw.remove(0);
        self.hand.push(card);
        Some(card)
    }

    /// Move every card in hand to the discard pile, keeping hand order.
    pub fn discard_hand(&mut self) {
        self.discard.append(&mut self.hand);
    }

    /// Take a card out of the hand.
    pub fn remove_from_hand(&mut self, entity: EntityId) -> Option<CardInstance> {
        let index = self.hand.iter().position(|c| c.entity_id == entity)?;
        Some(self.hand.remove(index))
    }

    /// Put a card on top of the discard pile.
    pub fn discard(&mut self, card: CardInstance) {
        self.discard.push(card);
    }

    /// Insert a card at a random position of the draw pile.
    ///
    /// The position is drawn from `0..len`, so a non-empty pile never gets
    /// the card at its very end; an empty pile simply receives it.
    pub fn insert_into_draw_randomly(&mut self, card: CardInstance, rng: &mut GameRng) {
        if self.draw.is_empty() {
            self.draw.push(card);
        } else {
            let index = rng.roll_less_than(self.draw.len());
            self.draw.insert(index, card);
        }
    }

    /// Empty all three piles.
    pub fn clear(&mut self) {
        self.draw.clear();
        self.hand.clear();
        self.discard.clear();
    }

    /// Which pile holds a card.
    #[must_use]
    pub fn location_of(&self, entity: EntityId) -> Option<Pile> {
        let holds = |pile: &[CardInstance]| pile.iter().any(|c| c.entity_id == entity);
        if holds(&self.hand) {
            Some(Pile::Hand)
        } else if holds(&self.draw) {
            Some(Pile::Draw)
        } else if holds(&self.discard) {
            Some(Pile::Discard)
        } else {
            None
        }
    }

    /// Find a card in hand.
    #[must_use]
    pub fn in_hand(&self, entity: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.entity_id == entity)
    }

    #[must_use]
    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw
    }

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw.len() + self.hand.len() + self.discard.len()
    }
}
