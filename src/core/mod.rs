//! Core engine types: configuration, players, result codes, RNG.
//!
//! These are the building blocks the game state machine is assembled from.
//! Policy lives in `GameConfig`; the engine consults it but never mutates it.

pub mod config;
pub mod outcome;
pub mod player;
pub mod rng;

pub use config::{ConfigError, GameConfig, PointsSchedule, MIN_CARDS_PER_HAND, MIN_PLAYERS};
pub use outcome::Outcome;
pub use player::Player;
pub use rng::{GameRng, GameRngState};
