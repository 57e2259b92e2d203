//! Players seated at a game.
//!
//! A `Player` is identified by its id; everything else about it changes as
//! the game runs. Hand and score mutation is crate-private so that only the
//! engine deals cards and awards prizes.

use serde::Serialize;
use smallvec::SmallVec;

use crate::cards::{PlayedCard, PrizeCard};

/// Inline capacity of a hand. Official hands hold 7 cards.
pub const HAND_INLINE_CAPACITY: usize = 8;

/// A participant in a game.
///
/// `won_prizes` and `winning_cards` are parallel: the card at index `i` of
/// `winning_cards` is the one that won the prize at index `i`.
#[derive(Clone, Debug, Serialize)]
pub struct Player {
    id: String,
    nick: String,
    hand: SmallVec<[PlayedCard; HAND_INLINE_CAPACITY]>,
    won_prizes: Vec<PrizeCard>,
    winning_cards: Vec<PlayedCard>,
    active: bool,
    able_to_play: bool,
    rounds_played: u32,
    can_cheat: bool,
}

impl Player {
    /// Create a player. The nick defaults to the id.
    pub(crate) fn new(id: impl Into<String>, nick: Option<&str>, can_cheat: bool) -> Self {
        let id = id.into();
        let nick = nick.map_or_else(|| id.clone(), str::to_string);
        Self {
            id,
            nick,
            hand: SmallVec::new(),
            won_prizes: Vec::new(),
            winning_cards: Vec::new(),
            active: true,
            able_to_play: true,
            rounds_played: 0,
            can_cheat,
        }
    }

    /// The immutable identity.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Cards currently held, in the order they were dealt.
    #[must_use]
    pub fn hand(&self) -> &[PlayedCard] {
        &self.hand
    }

    /// The card at a zero-based hand position.
    #[must_use]
    pub fn card_at(&self, index: usize) -> Option<&PlayedCard> {
        self.hand.get(index)
    }

    /// The first held card whose word matches, ignoring case.
    #[must_use]
    pub fn card_by_word(&self, word: &str) -> Option<&PlayedCard> {
        let wanted = PlayedCard::new(word).ok()?;
        self.hand.iter().find(|card| **card == wanted)
    }

    /// Whether the hand holds a card equal to `card`.
    #[must_use]
    pub fn has_card(&self, card: &PlayedCard) -> bool {
        self.hand.contains(card)
    }

    /// Prize cards won so far.
    #[must_use]
    pub fn won_prizes(&self) -> &[PrizeCard] {
        &self.won_prizes
    }

    /// The played cards that won each prize, index-aligned with `won_prizes`.
    #[must_use]
    pub fn winning_cards(&self) -> &[PlayedCard] {
        &self.winning_cards
    }

    /// The played card that won `prize`, if this player won it.
    #[must_use]
    pub fn winning_card_for(&self, prize: &PrizeCard) -> Option<&PlayedCard> {
        let index = self.won_prizes.iter().position(|won| won == prize)?;
        self.winning_cards.get(index)
    }

    /// Score: the number of prizes won.
    #[must_use]
    pub fn points(&self) -> usize {
        self.won_prizes.len()
    }

    /// Whether the player is present.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the player may submit a card this round.
    #[must_use]
    pub fn is_able_to_play(&self) -> bool {
        self.able_to_play
    }

    /// Rounds this player has won.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Whether the player may inject cards into their own hand.
    #[must_use]
    pub fn can_cheat(&self) -> bool {
        self.can_cheat
    }

    pub(crate) fn deal_card(&mut self, card: PlayedCard) {
        self.hand.push(card);
    }

    /// Remove the first card equal to `card`. Returns it if one was held.
    pub(crate) fn remove_card(&mut self, card: &PlayedCard) -> Option<PlayedCard> {
        let index = self.hand.iter().position(|held| held == card)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn award_prize(&mut self, prize: PrizeCard, winning_card: PlayedCard) {
        self.won_prizes.push(prize);
        self.winning_cards.push(winning_card);
    }

    pub(crate) fn clear_hand(&mut self) {
        self.hand.clear();
    }

    pub(crate) fn clear_points(&mut self) {
        self.won_prizes.clear();
        self.winning_cards.clear();
    }

    pub(crate) fn reset_rounds_played(&mut self) {
        self.rounds_played = 0;
    }

    pub(crate) fn increment_rounds_played(&mut self) {
        self.rounds_played += 1;
    }

    /// Returns true if the flag changed.
    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    pub(crate) fn set_able_to_play(&mut self, able: bool) {
        self.able_to_play = able;
    }

    /// Replace the nick, returning the old one.
    pub(crate) fn set_nick(&mut self, nick: impl Into<String>) -> String {
        std::mem::replace(&mut self.nick, nick.into())
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl std::hash::Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, hasher: &mut H) {
        self.id.hash(hasher);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.nick)
    }
}
