//! The player combatant: vitals, energy, deck and piles.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::vitals::Vitals;
use crate::cards::{CardId, CardInstance};
use crate::catalog::Catalog;
use crate::core::{EntityAllocator, EntityId, GameRng, RunConfig, RunError};
use crate::zones::CardPiles;

/// The player.
///
/// The deck is the permanent card list of the run. Piles hold copies of
/// deck handles plus any temporary cards enemies added this encounter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub vitals: Vitals,
    pub current_energy: i32,
    pub start_energy: i32,
    max_hand_size: usize,
    cards_drawn_per_turn: usize,
    deck: Vec<CardInstance>,
    temp_cards: Vec<CardInstance>,
    piles: CardPiles,
    selected_card: Option<EntityId>,
    ids: EntityAllocator,
}

impl Player {
    /// Create a player with the configured stats and the given deck.
    #[must_use]
    pub fn new(config: &RunConfig, deck: &[CardId]) -> Self {
        let mut player = Self {
            vitals: Vitals::new(config.player_max_health),
            current_energy: config.start_energy,
            start_energy: config.start_energy,
            max_hand_size: config.max_hand_size,
            cards_drawn_per_turn: config.cards_drawn_per_turn,
            deck: Vec::with_capacity(deck.len()),
            temp_cards: Vec::new(),
            piles: CardPiles::new(),
            selected_card: None,
            ids: EntityAllocator::default(),
        };
        for card in deck {
            player.add_to_deck(*card);
        }
        player
    }

    /// Create a player holding the configured starter deck.
    pub fn with_starter_deck(config: &RunConfig, catalog: &Catalog) -> Result<Self, RunError> {
        let mut deck = Vec::new();
        for entry in &config.starter_deck {
            let card = catalog
                .card_by_name(&entry.name)
                .ok_or_else(|| RunError::UnknownStarterCard(entry.name.clone()))?;
            deck.extend(std::iter::repeat(card.id).take(usize::from(entry.copies)));
        }
        Ok(Self::new(config, &deck))
    }

    /// Add a permanent card to the deck.
    pub fn add_to_deck(&mut self, card: CardId) -> CardInstance {
        let instance = CardInstance::new(self.ids.allocate(), card);
        self.deck.push(instance);
        instance
    }

    /// Create a card that lives until the encounter ends and shuffle it
    /// into the draw pile.
    pub fn add_temporary_card(&mut self, card: CardId, rng: &mut GameRng) -> CardInstance {
        let instance = CardInstance::temporary(self.ids.allocate(), card);
        self.temp_cards.push(instance);
        self.piles.insert_into_draw_randomly(instance, rng);
        instance
    }

    #[must_use]
    pub fn deck(&self) -> &[CardInstance] {
        &self.deck
    }

    /// Definition ids of the deck, in deck order.
    #[must_use]
    pub fn deck_card_ids(&self) -> Vec<CardId> {
        self.deck.iter().map(|c| c.card_id).collect()
    }

    #[must_use]
    pub fn temporary_cards(&self) -> &[CardInstance] {
        &self.temp_cards
    }

    #[must_use]
    pub fn piles(&self) -> &CardPiles {
        &self.piles
    }

    pub(crate) fn piles_mut(&mut self) -> &mut CardPiles {
        &mut self.piles
    }

    #[must_use]
    pub const fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    // === Turn flow ===

    /// Build the draw pile from the deck in random order.
    pub fn shuffle_draw_pile_from_deck(&mut self, rng: &mut GameRng) {
        self.piles.shuffle_draw_from_deck(&self.deck, rng);
    }

    /// Draw one card. See `CardPiles::draw_card`.
    pub fn draw_card(&mut self, rng: &mut GameRng) -> Option<CardInstance> {
        self.piles.draw_card(self.max_hand_size, rng)
    }

    /// Player turn entry: clear selection, draw, refill energy, drop block.
    pub fn begin_turn(&mut self, rng: &mut GameRng) {
        self.selected_card = None;
        for _ in 0..self.cards_drawn_per_turn {
            self.draw_card(rng);
        }
        self.current_energy = self.start_energy;
        self.vitals.current_block = 0;
    }

    /// Player turn exit: discard the hand.
    pub fn end_turn(&mut self) {
        self.piles.discard_hand();
    }

    pub fn gain_energy(&mut self, amount: i32) {
        self.current_energy += amount;
    }

    /// Encounter teardown: empty all piles, release temporary cards and
    /// clear effects.
    pub fn end_encounter(&mut self) {
        debug!(temporary = self.temp_cards.len(), "Releasing encounter cards");
        self.piles.clear();
        self.temp_cards.clear();
        self.selected_card = None;
        self.vitals.effects.clear();
    }

    // === Selection ===

    #[must_use]
    pub const fn selected_card(&self) -> Option<EntityId> {
        self.selected_card
    }

    pub(crate) fn set_selected_card(&mut self, card: Option<EntityId>) {
        self.selected_card = card;
    }
}
