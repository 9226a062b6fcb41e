//! Event deck: draw pile, discard pile, and the Shuffle event
//!
//! The deck is the engine's only randomness sink. Every shuffle runs
//! through the caller-supplied generator (the session's seeded ChaCha8),
//! so a fixed seed replays the same game.

pub mod card;

pub use card::{CardKind, EventCard};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, Result};

/// Draw and discard piles. The top of the draw pile is the end of the
/// vector.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventDeck {
    draw: Vec<EventCard>,
    discard: Vec<EventCard>,
}

impl EventDeck {
    /// A deck with the given cards in the draw pile, unshuffled
    pub fn new(cards: Vec<EventCard>) -> Self {
        Self {
            draw: cards,
            discard: Vec::new(),
        }
    }

    /// A deck shuffled for game start
    pub fn new_shuffled(cards: Vec<EventCard>, rng: &mut impl Rng) -> Self {
        let mut deck = Self::new(cards);
        deck.draw.shuffle(rng);
        deck
    }

    /// Pop the top card. An empty draw pile is a scenario or bookkeeping
    /// defect on the caller's side, never a normal state.
    pub fn draw(&mut self) -> Result<EventCard> {
        self.draw.pop().ok_or(EngineError::DeckEmpty)
    }

    /// Put a resolved card on the discard pile
    pub fn discard(&mut self, card: EventCard) {
        self.discard.push(card);
    }

    /// Resolve a Shuffle card: the card itself returns to the draw pile,
    /// both piles are shuffled, and the discard pile goes on top of the
    /// draw pile as the next-drawn run.
    pub fn resolve_shuffle(&mut self, card: EventCard, rng: &mut impl Rng) {
        self.draw.push(card);
        self.draw.shuffle(rng);
        self.discard.shuffle(rng);
        self.draw.append(&mut self.discard);
        tracing::debug!("deck reshuffled, {} cards in the draw pile", self.draw.len());
    }

    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Total cards across both piles; invariant under every deck
    /// operation
    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
