//! Card-set documents.
//!
//! A card set is one printing of the game (a base set or an expansion). It
//! is stored as JSON:
//!
//! ```json
//! {
//!   "version": "Party Set",
//!   "printing": "2004",
//!   "played": [ { "word": "Bats", "flavor": "Flying mammals." } ],
//!   "prizes": [ { "word": "Absurd", "synonyms": "ridiculous, silly" } ]
//! }
//! ```
//!
//! Synonyms are a single comma-separated string, the way they are printed
//! on the card.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::card::{CardError, CardKind, PlayedCard, PrizeCard};
use crate::deck::ListDeck;

/// Errors raised while loading a card set.
#[derive(Debug, thiserror::Error)]
pub enum CardSetError {
    /// Failed to read the document.
    #[error("failed to read card set: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid card-set JSON.
    #[error("failed to parse card set JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// An entry could not be turned into a card.
    #[error("{kind:?} card #{index} is invalid: {source}")]
    InvalidCard {
        /// Which list the entry is in.
        kind: CardKind,
        /// Zero-based position in that list.
        index: usize,
        /// What was wrong with it.
        source: CardError,
    },
}

#[derive(Deserialize)]
struct CardSetDocument {
    version: String,
    #[serde(default)]
    printing: Option<String>,
    #[serde(default)]
    played: Vec<PlayedEntry>,
    #[serde(default)]
    prizes: Vec<PrizeEntry>,
}

#[derive(Deserialize)]
struct PlayedEntry {
    word: String,
    #[serde(default)]
    flavor: Option<String>,
}

#[derive(Deserialize)]
struct PrizeEntry {
    word: String,
    #[serde(default)]
    synonyms: Option<String>,
}

/// The cards of one printing.
#[derive(Clone, Debug)]
pub struct CardSet {
    version: String,
    printing: Option<String>,
    played: Vec<PlayedCard>,
    prizes: Vec<PrizeCard>,
}

impl CardSet {
    /// Parse a card set from JSON.
    pub fn from_json(json: &str) -> Result<Self, CardSetError> {
        let document: CardSetDocument = serde_json::from_str(json)?;

        let played = document
            .played
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let card = PlayedCard::new(&entry.word).map_err(|source| CardSetError::InvalidCard {
                    kind: CardKind::Played,
                    index,
                    source,
                })?;
                Ok(match entry.flavor {
                    Some(flavor) if !flavor.trim().is_empty() => card.with_flavor(flavor.trim()),
                    _ => card,
                })
            })
            .collect::<Result<Vec<_>, CardSetError>>()?;

        let prizes = document
            .prizes
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let card = PrizeCard::new(&entry.word).map_err(|source| CardSetError::InvalidCard {
                    kind: CardKind::Prize,
                    index,
                    source,
                })?;
                let synonyms = entry.synonyms.unwrap_or_default();
                Ok(card.with_synonyms(synonyms.split(',')))
            })
            .collect::<Result<Vec<_>, CardSetError>>()?;

        debug!(
            version = %document.version,
            played = played.len(),
            prizes = prizes.len(),
            "Loaded card set"
        );

        Ok(Self {
            version: document.version,
            printing: document.printing,
            played,
            prizes,
        })
    }

    /// Load a card set from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CardSetError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The set name, e.g. "Basic Set".
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The printing year, if recorded.
    #[must_use]
    pub fn printing(&self) -> Option<&str> {
        self.printing.as_deref()
    }

    /// Human-readable description, e.g. "Basic Set (2001 printing)".
    #[must_use]
    pub fn description(&self) -> String {
        match &self.printing {
            Some(printing) => format!("{} ({} printing)", self.version, printing),
            None => self.version.clone(),
        }
    }

    /// Played cards in document order.
    #[must_use]
    pub fn played_cards(&self) -> &[PlayedCard] {
        &self.played
    }

    /// Prize cards in document order.
    #[must_use]
    pub fn prize_cards(&self) -> &[PrizeCard] {
        &self.prizes
    }

    /// Build an unshuffled deck of this set's played cards.
    #[must_use]
    pub fn played_deck(&self, self_replenishing: bool) -> ListDeck<PlayedCard> {
        ListDeck::from_cards(self.played.iter().cloned(), self_replenishing)
            .with_description(self.description())
    }

    /// Build an unshuffled deck of this set's prize cards.
    #[must_use]
    pub fn prize_deck(&self, self_replenishing: bool) -> ListDeck<PrizeCard> {
        ListDeck::from_cards(self.prizes.iter().cloned(), self_replenishing)
            .with_description(self.description())
    }
}
