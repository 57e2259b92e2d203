//! Listener that turns game events into `tracing` records.

use tracing::{debug, warn};

use super::GameEventListener;
use crate::cards::{PlayedCard, PrizeCard};
use crate::core::Player;

/// Default listener: one `debug!` record per event.
///
/// Deck exhaustion is logged at `warn` since play stops until the deck is
/// refilled. Installing a subscriber is left to the application.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingListener;

impl LoggingListener {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn nicks<'a>(players: impl IntoIterator<Item = &'a Player>) -> String {
    players
        .into_iter()
        .map(Player::nick)
        .collect::<Vec<_>>()
        .join(", ")
}

impl GameEventListener for LoggingListener {
    fn minimum_players_joined(&mut self, players: &[Player]) {
        debug!(players = %nicks(players), "Minimum number of players joined");
    }

    fn maximum_players_joined(&mut self, players: &[Player]) {
        debug!(players = %nicks(players), "Maximum number of players joined");
    }

    fn not_enough_players(&mut self, players: &[Player]) {
        debug!(players = %nicks(players), "Not enough players to play");
    }

    fn game_won(&mut self, winner: &Player) {
        debug!(winner = %winner.nick(), points = winner.points(), "Game won");
    }

    fn game_won_by_multiple_players(&mut self, winners: &[&Player]) {
        debug!(winners = %nicks(winners.iter().copied()), "Game won by multiple players");
    }

    fn game_terminated(&mut self) {
        debug!("Game terminated");
    }

    fn round_started(&mut self, prize: &PrizeCard, judge: &Player) {
        debug!(prize = %prize, judge = %judge.nick(), "Round started");
    }

    fn player_joined(&mut self, player: &Player) {
        debug!(player = %player.nick(), id = %player.id(), "Player joined");
    }

    fn player_left(&mut self, player: &Player) {
        debug!(player = %player.nick(), id = %player.id(), "Player left");
    }

    fn judge_changed(&mut self, judge: &Player) {
        debug!(judge = %judge.nick(), "Judge changed");
    }

    fn player_inactivated(&mut self, player: &Player) {
        debug!(player = %player.nick(), "Player inactivated");
    }

    fn player_activated(&mut self, player: &Player) {
        debug!(player = %player.nick(), "Player activated");
    }

    fn player_nick_changed(&mut self, player: &Player, old_nick: &str) {
        debug!(player = %player.nick(), old_nick, "Player changed nick");
    }

    fn played_card_dealt(&mut self, player: &Player, card: &PlayedCard) {
        debug!(player = %player.nick(), card = %card, "Card dealt");
    }

    fn card_submitted(&mut self, player: &Player, card: &PlayedCard) {
        debug!(player = %player.nick(), card = %card, "Card submitted");
    }

    fn ready_to_judge(&mut self, judge: &Player, cards: &[PlayedCard]) {
        debug!(judge = %judge.nick(), submissions = cards.len(), "Ready to judge");
    }

    fn round_won(&mut self, judge: &Player, winner: &Player, card: &PlayedCard, prize: &PrizeCard) {
        debug!(
            judge = %judge.nick(),
            winner = %winner.nick(),
            card = %card,
            prize = %prize,
            "Round won"
        );
    }

    fn round_won_by_multiple_players(
        &mut self,
        judge: &Player,
        winners: &[&Player],
        card: &PlayedCard,
        prize: &PrizeCard,
    ) {
        debug!(
            judge = %judge.nick(),
            winners = %nicks(winners.iter().copied()),
            card = %card,
            prize = %prize,
            "Round won by multiple players"
        );
    }

    fn prize_deck_exhausted(&mut self) {
        warn!("Prize deck exhausted");
    }

    fn played_deck_exhausted(&mut self) {
        warn!("Played deck exhausted");
    }

    fn points_needed_to_win_changed(&mut self, new_points: i32, old_points: i32) {
        debug!(new_points, old_points, "Points needed to win changed");
    }

    fn play_suspended(&mut self, player: Option<&Player>) {
        debug!(player = player.map(Player::nick), "Play suspended");
    }

    fn play_resumed(&mut self, player: Option<&Player>) {
        debug!(player = player.map(Player::nick), "Play resumed");
    }

    fn prize_card_revealed(&mut self, prize: &PrizeCard) {
        debug!(prize = %prize, "Prize card revealed");
    }
}
