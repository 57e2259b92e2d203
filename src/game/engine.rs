//! The game aggregate: state, construction and queries.
//!
//! Mutating operations live next door in `roster` (player lifecycle) and
//! `round` (dealing, submission, judgement). Every one of them returns an
//! [`Outcome`] and reports what changed to the listener before returning.

use rustc_hash::FxHashSet;
use tracing::debug;

use super::phase::{Phase, Submission};
use crate::cards::{PlayedCard, PrizeCard};
use crate::core::{ConfigError, GameConfig, Outcome, Player};
use crate::deck::Deck;
use crate::events::{GameEventListener, LoggingListener};

/// One game session.
///
/// The game owns its listener, decks and players. Players are kept in join
/// order, which is also the judge rotation order and the tiebreak order when
/// ranking by points.
///
/// ```
/// use rust_apples::cards::{PlayedCard, PrizeCard};
/// use rust_apples::core::{GameConfig, Outcome, PointsSchedule};
/// use rust_apples::deck::ListDeck;
/// use rust_apples::events::LoggingListener;
/// use rust_apples::game::{Game, Phase};
///
/// let played = ListDeck::from_cards(
///     ["Bats", "Cactus", "Dentists"].map(|w| PlayedCard::new(w).unwrap()),
///     true,
/// );
/// let prizes = ListDeck::from_cards([PrizeCard::new("Fuzzy").unwrap()], true);
/// let config = GameConfig::new()
///     .with_players(3, 3)
///     .with_cards_per_hand(1)
///     .with_points_schedule(PointsSchedule::Fixed(1))
///     .with_auto_start(false);
///
/// let mut game = Game::new(LoggingListener, config, played, prizes).unwrap();
/// for id in ["p1", "p2", "p3"] {
///     assert_eq!(game.join(id, None), Outcome::Success);
/// }
/// assert_eq!(game.start_round(), Outcome::Success);
/// assert_eq!(game.phase(), Phase::RoundPlay);
/// assert_eq!(game.current_judge().map(|j| j.id()), Some("p1"));
/// ```
pub struct Game<L: GameEventListener = LoggingListener> {
    pub(super) listener: L,
    pub(super) config: GameConfig,
    pub(super) played_deck: Box<dyn Deck<PlayedCard>>,
    pub(super) prize_deck: Box<dyn Deck<PrizeCard>>,
    pub(super) phase: Phase,
    /// Phase to restore on resume. Only set while suspended.
    pub(super) pre_suspended_phase: Option<Phase>,
    pub(super) players: Vec<Player>,
    pub(super) nicks: FxHashSet<String>,
    pub(super) banned_ids: FxHashSet<String>,
    /// Id of the judge. Always a member of `players`.
    pub(super) judge: Option<String>,
    pub(super) prize_card: Option<PrizeCard>,
    /// One entry per submitter, in submission order.
    pub(super) submissions: Vec<Submission>,
    /// Snapshot of the winning players. Non-empty only in `GameOver`.
    pub(super) winners: Vec<Player>,
    pub(super) points_needed_to_win: i32,
    pub(super) rounds_played: u32,
}

impl<L: GameEventListener> Game<L> {
    /// Create a game in the `Init` phase.
    ///
    /// The configuration is validated here; an invalid one never produces a
    /// game. Decks should be shuffled before they are handed over.
    pub fn new(
        listener: L,
        config: GameConfig,
        played_deck: impl Deck<PlayedCard> + 'static,
        prize_deck: impl Deck<PrizeCard> + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            min_players = config.min_players,
            max_players = config.max_players,
            cards_per_hand = config.cards_per_hand,
            played_deck = played_deck.description().unwrap_or("unnamed"),
            prize_deck = prize_deck.description().unwrap_or("unnamed"),
            "Created game"
        );
        Ok(Self {
            listener,
            points_needed_to_win: config.points_needed_to_win(0),
            config,
            played_deck: Box::new(played_deck),
            prize_deck: Box::new(prize_deck),
            phase: Phase::Init,
            pre_suspended_phase: None,
            players: Vec::new(),
            nicks: FxHashSet::default(),
            banned_ids: FxHashSet::default(),
            judge: None,
            prize_card: None,
            submissions: Vec::new(),
            winners: Vec::new(),
            rounds_played: 0,
        })
    }

    // === Collaborators ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[must_use]
    pub fn played_deck(&self) -> &dyn Deck<PlayedCard> {
        self.played_deck.as_ref()
    }

    /// Mutable access for refilling with `combine` after exhaustion.
    pub fn played_deck_mut(&mut self) -> &mut dyn Deck<PlayedCard> {
        self.played_deck.as_mut()
    }

    #[must_use]
    pub fn prize_deck(&self) -> &dyn Deck<PrizeCard> {
        self.prize_deck.as_ref()
    }

    /// Mutable access for refilling with `combine` after exhaustion.
    pub fn prize_deck_mut(&mut self) -> &mut dyn Deck<PrizeCard> {
        self.prize_deck.as_mut()
    }

    // === Phase queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// In `Init` with at least the minimum number of players.
    #[must_use]
    pub fn is_ready_to_start(&self) -> bool {
        self.phase == Phase::Init && self.players.len() >= self.config.min_players
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.phase.is_started()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.phase == Phase::Suspended
    }

    #[must_use]
    pub fn is_time_to_play(&self) -> bool {
        self.phase == Phase::RoundPlay
    }

    #[must_use]
    pub fn is_time_to_judge(&self) -> bool {
        self.phase == Phase::RoundJudge
    }

    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.phase == Phase::RoundOver
    }

    // === Player queries ===

    /// Players in join order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// The player using `nick`, if any.
    #[must_use]
    pub fn player_by_nick(&self, nick: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.nick() == nick)
    }

    #[must_use]
    pub fn current_judge(&self) -> Option<&Player> {
        self.judge_index().map(|i| &self.players[i])
    }

    #[must_use]
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| p.is_active()).collect()
    }

    /// Players still expected to submit this round, active or not.
    ///
    /// The judge and players who joined mid-round are never expected to.
    #[must_use]
    pub fn players_who_have_not_played(&self) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| self.must_submit(p))
            .collect()
    }

    /// Players by descending points. Ties keep join order.
    #[must_use]
    pub fn players_sorted_by_points(&self) -> Vec<&Player> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.points().cmp(&a.points()));
        sorted
    }

    /// The declared winners. Empty unless the game is over.
    #[must_use]
    pub fn winners(&self) -> &[Player] {
        &self.winners
    }

    /// Banned ids in sorted order.
    #[must_use]
    pub fn banned_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.banned_ids.iter().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn is_banned(&self, id: &str) -> bool {
        self.banned_ids.contains(id)
    }

    // === Round queries ===

    /// This round's submissions in submission order.
    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// The cards awaiting judgement, in submission order.
    #[must_use]
    pub fn submitted_cards(&self) -> Vec<&PlayedCard> {
        self.submissions.iter().map(Submission::card).collect()
    }

    /// The prize being played for.
    #[must_use]
    pub fn current_prize_card(&self) -> Option<&PrizeCard> {
        self.prize_card.as_ref()
    }

    /// Prize cards needed to win. 0 or less means winners are declared
    /// manually.
    #[must_use]
    pub fn points_needed_to_win(&self) -> i32 {
        self.points_needed_to_win
    }

    /// Rounds judged since the game (re)started.
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Override the threshold. Values of 0 or less disable automatic win
    /// detection.
    pub fn set_points_needed_to_win(&mut self, points: i32) -> Outcome {
        if points == self.points_needed_to_win {
            return Outcome::NoEffect;
        }
        let old = std::mem::replace(&mut self.points_needed_to_win, points);
        debug!(new_points = points, old_points = old, "Points needed to win changed");
        self.listener.points_needed_to_win_changed(points, old);
        Outcome::Success
    }

    // === Internal helpers ===

    pub(super) fn index_of(&self, id: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub(super) fn judge_index(&self) -> Option<usize> {
        let judge = self.judge.as_deref()?;
        self.index_of(judge)
    }

    pub(super) fn is_judge(&self, id: &str) -> bool {
        self.judge.as_deref() == Some(id)
    }

    pub(super) fn has_submitted(&self, id: &str) -> bool {
        self.submissions.iter().any(|s| s.player_id == id)
    }

    pub(super) fn must_submit(&self, player: &Player) -> bool {
        player.is_able_to_play() && !self.is_judge(player.id()) && !self.has_submitted(player.id())
    }

    pub(super) fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// A round is underway, possibly paused.
    pub(super) fn is_round_in_progress(&self) -> bool {
        self.phase.is_round_in_progress()
            || (self.phase == Phase::Suspended
                && self.pre_suspended_phase.is_some_and(Phase::is_round_in_progress))
    }

    /// Recompute the threshold from the player count, re-checking for a
    /// winner if it changed mid-game.
    pub(super) fn recompute_points_needed_to_win(&mut self) {
        let points = self.config.points_needed_to_win(self.players.len());
        if self.set_points_needed_to_win(points).is_success() && self.is_started() {
            self.check_for_game_winner(false);
        }
    }
}

impl<L: GameEventListener> std::fmt::Debug for Game<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("players", &self.players.len())
            .field("judge", &self.judge)
            .field("prize_card", &self.prize_card)
            .field("submissions", &self.submissions.len())
            .field("points_needed_to_win", &self.points_needed_to_win)
            .field("rounds_played", &self.rounds_played)
            .finish()
    }
}
