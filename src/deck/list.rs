//! Deck backed by a persistent vector.
//!
//! `im::Vector` keeps front removal and appends cheap and makes cloning a
//! deck O(1), so one loaded card set can seed many games.

use im::Vector;
use tracing::trace;

use super::Deck;
use crate::cards::Card;
use crate::core::GameRng;

/// A deck holding its cards in a list.
///
/// A finite deck removes cards as they are drawn and is exhausted once the
/// list is empty. A self-replenishing deck never removes anything: a cursor
/// walks the list and wraps to the start.
///
/// ```
/// use rust_apples::cards::PrizeCard;
/// use rust_apples::deck::{Deck, ListDeck};
///
/// let cards = ["Fuzzy", "Scary"].map(|w| PrizeCard::new(w).unwrap());
///
/// let mut finite = ListDeck::from_cards(cards.clone(), false);
/// assert!(finite.draw().is_some());
/// assert!(finite.draw().is_some());
/// assert!(finite.draw().is_none());
/// assert!(finite.is_exhausted());
///
/// let mut cycling = ListDeck::from_cards(cards, true);
/// let words: Vec<_> = (0..3).filter_map(|_| cycling.draw()).map(|c| c.to_string()).collect();
/// assert_eq!(words, ["Fuzzy", "Scary", "Fuzzy"]);
/// ```
#[derive(Clone, Debug)]
pub struct ListDeck<C: Card> {
    cards: Vector<C>,
    /// Next position to draw from. Only advanced by self-replenishing decks.
    cursor: usize,
    self_replenishing: bool,
    description: Option<String>,
}

impl<C: Card> ListDeck<C> {
    /// Create an empty deck.
    #[must_use]
    pub fn new(self_replenishing: bool) -> Self {
        Self {
            cards: Vector::new(),
            cursor: 0,
            self_replenishing,
            description: None,
        }
    }

    /// Create a deck holding `cards` in the given order.
    pub fn from_cards(cards: impl IntoIterator<Item = C>, self_replenishing: bool) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            ..Self::new(self_replenishing)
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Put a card at the bottom of the deck.
    pub fn add(&mut self, card: C) {
        self.cards.push_back(card);
    }

    /// Every card the deck holds, drawn or not for self-replenishing decks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if the deck holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl<C: Card> Deck<C> for ListDeck<C> {
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn is_self_replenishing(&self) -> bool {
        self.self_replenishing
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<C> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut cards);
        self.cards = cards.into_iter().collect();
        self.cursor = 0;
        trace!(kind = ?C::KIND, cards = self.cards.len(), "Shuffled deck");
    }

    fn draw(&mut self) -> Option<C> {
        if !self.self_replenishing {
            return self.cards.pop_front();
        }
        if self.cursor >= self.cards.len() {
            self.cursor = 0;
        }
        let card = self.cards.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(card)
    }

    /// A self-replenishing deck is only exhausted if it holds no cards.
    fn is_exhausted(&self) -> bool {
        self.cards.is_empty()
    }

    /// For a self-replenishing deck this is the whole cycle, starting at the
    /// next card to be drawn.
    fn remaining(&self) -> Vec<C> {
        if !self.self_replenishing {
            return self.cards.iter().cloned().collect();
        }
        let start = self.cursor.min(self.cards.len());
        self.cards
            .iter()
            .skip(start)
            .chain(self.cards.iter().take(start))
            .cloned()
            .collect()
    }

    fn remaining_len(&self) -> usize {
        self.cards.len()
    }

    fn combine(&mut self, other: &dyn Deck<C>) {
        self.cards.extend(other.remaining());
        self.cursor = 0;
    }
}
