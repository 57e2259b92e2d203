//! Decks: ordered, shuffleable sources of cards.
//!
//! The engine only talks to `dyn Deck<C>`; how the cards got there (a card
//! set, a test fixture, a refill) is the caller's business.
//!
//! ## Key Types
//!
//! - `Deck<C>`: the contract the game draws through
//! - `ListDeck<C>`: the standard implementation, finite or self-replenishing

pub mod list;

pub use list::ListDeck;

use crate::cards::Card;
use crate::core::GameRng;

/// A source of cards of one kind.
pub trait Deck<C: Card> {
    /// Text describing the deck, e.g. "Basic Set (2001 printing)".
    fn description(&self) -> Option<&str>;

    /// Whether the deck cycles forever instead of running out.
    fn is_self_replenishing(&self) -> bool;

    /// Randomize the draw order and restart iteration.
    fn shuffle(&mut self, rng: &mut GameRng);

    /// Take the next card, or `None` if there is nothing left to draw.
    fn draw(&mut self) -> Option<C>;

    /// True when `draw` would return `None`.
    fn is_exhausted(&self) -> bool;

    /// Cards still to be drawn, in draw order.
    fn remaining(&self) -> Vec<C>;

    /// Number of cards still to be drawn.
    fn remaining_len(&self) -> usize {
        self.remaining().len()
    }

    /// Append another deck's remaining cards to this one.
    fn combine(&mut self, other: &dyn Deck<C>);
}
