//! # rust-apples
//!
//! A turn-based engine for the Apples to Apples party card game.
//!
//! ## Design Principles
//!
//! 1. **Outcomes, not panics**: every player-facing operation returns an
//!    `Outcome`. Only construction and loading can fail with an error.
//!
//! 2. **Transport-agnostic**: the engine knows nothing about chat rooms or
//!    sockets. Front ends observe it through a `GameEventListener` and drive
//!    it with `Game` operations or parsed `Command`s.
//!
//! 3. **Configuration Over Convention**: hand size, player limits, joining
//!    rules, judge rotation and the points schedule live in `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: outcomes, players, RNG, configuration
//! - `cards`: played and prize cards, JSON card sets
//! - `deck`: the `Deck` trait and its list-backed implementation
//! - `events`: listener trait, tracing listener, recording listener
//! - `game`: the game state machine
//! - `commands`: text command parsing and execution

pub mod cards;
pub mod commands;
pub mod core;
pub mod deck;
pub mod events;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, GameRngState, Outcome, Player, PointsSchedule,
};

pub use crate::cards::{Card, CardError, CardSet, CardSetError, PlayedCard, PrizeCard};

pub use crate::deck::{Deck, ListDeck};

pub use crate::events::{EventLog, GameEvent, GameEventListener, LoggingListener};

pub use crate::game::{Game, Phase, Submission};

pub use crate::commands::{execute, Command, CommandError, Reply};
