//! The game session state machine.
//!
//! ## Key Types
//!
//! - `Game<L>`: owns players, decks and the listener `L`; every operation
//!   returns an `Outcome`
//! - `Phase`: where the game is in its lifecycle
//! - `Submission`: a card submitted for judgement this round

pub mod engine;
pub mod phase;
mod roster;
mod round;

#[cfg(test)]
mod fixtures;

pub use engine::Game;
pub use phase::{Phase, Submission};
