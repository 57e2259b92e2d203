//! Result codes returned by every mutating game operation.
//!
//! Expected failures (wrong phase, unknown player, exhausted deck) are
//! reported through `Outcome` rather than `Err` or a panic. Callers branch
//! on the code; nothing is swallowed.

use serde::{Deserialize, Serialize};

/// The result of a game operation.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The operation changed the game.
    Success,
    /// The call was valid but the game already satisfied the request.
    NoEffect,
    /// A required argument was missing, blank, or refers to nothing.
    ErrorInvalidParameter,
    /// The operation is not allowed in the current phase or by policy.
    ErrorProhibited,
    /// The game lacks a resource it needs (players, cards).
    ErrorGameUninitialized,
}

impl Outcome {
    /// True for `Success`.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// True for any of the `Error*` codes.
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(
            self,
            Outcome::ErrorInvalidParameter | Outcome::ErrorProhibited | Outcome::ErrorGameUninitialized
        )
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Outcome::Success => "success",
            Outcome::NoEffect => "no effect",
            Outcome::ErrorInvalidParameter => "invalid parameter",
            Outcome::ErrorProhibited => "prohibited",
            Outcome::ErrorGameUninitialized => "game uninitialized",
        };
        f.write_str(text)
    }
}
