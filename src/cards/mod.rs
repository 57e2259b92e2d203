//! Cards and card sets.
//!
//! ## Key Types
//!
//! - `PlayedCard`: noun cards dealt into hands and submitted each round
//! - `PrizeCard`: adjective cards played for and awarded to round winners
//! - `Card`: the trait decks are generic over
//! - `CardSet`: one printing's cards, loaded from a JSON document

pub mod card;
pub mod card_set;

pub use card::{Card, CardError, CardKey, CardKind, PlayedCard, PrizeCard};
pub use card_set::{CardSet, CardSetError};
