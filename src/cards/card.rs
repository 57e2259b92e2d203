//! Card values.
//!
//! Two kinds of cards circulate in a game:
//! - `PlayedCard`: the nouns dealt into hands and submitted for judgement
//! - `PrizeCard`: the adjectives a round is played for, awarded to winners
//!
//! Cards are immutable values. Equality and hashing go through a
//! `CardKey` computed once at construction: the card kind plus the trimmed,
//! lower-cased word. Two cards of the same kind with words differing only
//! in case are equal; cards of different kinds never are.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Errors raised when constructing a card.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// The word was empty or only whitespace.
    #[error("card word must not be blank")]
    BlankWord,
}

/// Which deck a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    /// Dealt into hands and submitted.
    Played,
    /// Played for and awarded.
    Prize,
}

/// Normalized identity of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardKey {
    kind: CardKind,
    folded: String,
}

impl CardKey {
    fn new(kind: CardKind, word: &str) -> Self {
        Self {
            kind,
            folded: word.to_lowercase(),
        }
    }

    /// The card kind.
    #[must_use]
    pub fn kind(&self) -> CardKind {
        self.kind
    }

    /// The case-folded word.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

fn checked_word(word: &str) -> Result<String, CardError> {
    let trimmed = word.trim();
    if trimmed.is_empty() {
        return Err(CardError::BlankWord);
    }
    Ok(trimmed.to_string())
}

/// Behaviour shared by both card kinds. Decks are generic over it.
pub trait Card: Clone + Eq + std::hash::Hash + std::fmt::Debug + std::fmt::Display {
    /// The kind every card of this type has.
    const KIND: CardKind;

    /// The trimmed word printed on the card.
    fn word(&self) -> &str;

    /// Normalized identity used for equality and hashing.
    fn key(&self) -> &CardKey;
}

/// A noun card dealt to players and submitted for judgement.
///
/// ```
/// use rust_apples::cards::PlayedCard;
///
/// let a = PlayedCard::new("  Abraham Lincoln ").unwrap();
/// let b = PlayedCard::new("abraham lincoln").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.word(), "Abraham Lincoln");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PlayedCardData", into = "PlayedCardData")]
pub struct PlayedCard {
    key: CardKey,
    word: String,
    flavor: Option<String>,
}

impl PlayedCard {
    /// Create a played card. Fails on a blank word.
    pub fn new(word: &str) -> Result<Self, CardError> {
        let word = checked_word(word)?;
        Ok(Self {
            key: CardKey::new(CardKind::Played, &word),
            word,
            flavor: None,
        })
    }

    /// Attach the flavor text printed under the word.
    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// The trimmed word.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Flavor text, if the card has any.
    #[must_use]
    pub fn flavor(&self) -> Option<&str> {
        self.flavor.as_deref()
    }
}

impl Card for PlayedCard {
    const KIND: CardKind = CardKind::Played;

    fn word(&self) -> &str {
        &self.word
    }

    fn key(&self) -> &CardKey {
        &self.key
    }
}

impl PartialEq for PlayedCard {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PlayedCard {}

impl std::hash::Hash for PlayedCard {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.key.hash(hasher);
    }
}

impl std::fmt::Display for PlayedCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.word)
    }
}

#[derive(Serialize, Deserialize)]
struct PlayedCardData {
    word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flavor: Option<String>,
}

impl TryFrom<PlayedCardData> for PlayedCard {
    type Error = CardError;

    fn try_from(data: PlayedCardData) -> Result<Self, Self::Error> {
        let card = PlayedCard::new(&data.word)?;
        Ok(match data.flavor {
            Some(flavor) => card.with_flavor(flavor),
            None => card,
        })
    }
}

impl From<PlayedCard> for PlayedCardData {
    fn from(card: PlayedCard) -> Self {
        Self {
            word: card.word,
            flavor: card.flavor,
        }
    }
}

/// An adjective card played for each round and awarded to its winners.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "PrizeCardData", into = "PrizeCardData")]
pub struct PrizeCard {
    key: CardKey,
    word: String,
    synonyms: BTreeSet<String>,
}

impl PrizeCard {
    /// Create a prize card. Fails on a blank word.
    pub fn new(word: &str) -> Result<Self, CardError> {
        let word = checked_word(word)?;
        Ok(Self {
            key: CardKey::new(CardKind::Prize, &word),
            word,
            synonyms: BTreeSet::new(),
        })
    }

    /// Attach synonyms. Blank entries are skipped and the rest trimmed.
    #[must_use]
    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for synonym in synonyms {
            self.add_synonym(synonym.as_ref());
        }
        self
    }

    fn add_synonym(&mut self, synonym: &str) {
        let synonym = synonym.trim();
        if !synonym.is_empty() {
            self.synonyms.insert(synonym.to_string());
        }
    }

    /// The trimmed word.
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Synonyms in sorted order.
    pub fn synonyms(&self) -> impl Iterator<Item = &str> {
        self.synonyms.iter().map(String::as_str)
    }

    /// Check whether the card lists `word` as a synonym (case-insensitive).
    #[must_use]
    pub fn has_synonym(&self, word: &str) -> bool {
        let word = word.trim();
        self.synonyms.iter().any(|s| s.eq_ignore_ascii_case(word))
    }
}

impl Card for PrizeCard {
    const KIND: CardKind = CardKind::Prize;

    fn word(&self) -> &str {
        &self.word
    }

    fn key(&self) -> &CardKey {
        &self.key
    }
}

impl PartialEq for PrizeCard {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for PrizeCard {}

impl std::hash::Hash for PrizeCard {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.key.hash(hasher);
    }
}

impl std::fmt::Display for PrizeCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.word)
    }
}

#[derive(Serialize, Deserialize)]
struct PrizeCardData {
    word: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    synonyms: BTreeSet<String>,
}

impl TryFrom<PrizeCardData> for PrizeCard {
    type Error = CardError;

    fn try_from(data: PrizeCardData) -> Result<Self, Self::Error> {
        Ok(PrizeCard::new(&data.word)?.with_synonyms(data.synonyms))
    }
}

impl From<PrizeCard> for PrizeCardData {
    fn from(card: PrizeCard) -> Self {
        Self {
            word: card.word,
            synonyms: card.synonyms,
        }
    }
}
