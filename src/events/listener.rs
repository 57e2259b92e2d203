//! The observer contract the engine reports through.

use crate::cards::{PlayedCard, PrizeCard};
use crate::core::Player;

/// Receives one callback per observable change in a game.
///
/// Callbacks run synchronously inside the operation that caused them, after
/// the state they describe has been applied. A listener must not call back
/// into the game that owns it.
///
/// Every method has an empty default body, so a listener only overrides the
/// events it cares about.
#[allow(unused_variables)]
pub trait GameEventListener {
    /// The player count just reached the configured minimum.
    fn minimum_players_joined(&mut self, players: &[Player]) {}

    /// The player count just reached the configured maximum.
    fn maximum_players_joined(&mut self, players: &[Player]) {}

    /// A player left and the count dropped below the minimum.
    fn not_enough_players(&mut self, players: &[Player]) {}

    /// One player won the game.
    fn game_won(&mut self, winner: &Player) {}

    /// Several players tied for the win.
    fn game_won_by_multiple_players(&mut self, winners: &[&Player]) {}

    /// The game was ended without a winner.
    fn game_terminated(&mut self) {}

    /// A round is set up: judge chosen, prize card revealed.
    fn round_started(&mut self, prize: &PrizeCard, judge: &Player) {}

    fn player_joined(&mut self, player: &Player) {}

    fn player_left(&mut self, player: &Player) {}

    fn judge_changed(&mut self, judge: &Player) {}

    fn player_inactivated(&mut self, player: &Player) {}

    fn player_activated(&mut self, player: &Player) {}

    /// `player` already carries the new nick.
    fn player_nick_changed(&mut self, player: &Player, old_nick: &str) {}

    /// A card was added to a player's hand.
    fn played_card_dealt(&mut self, player: &Player, card: &PlayedCard) {}

    /// A player submitted a card for judgement.
    fn card_submitted(&mut self, player: &Player, card: &PlayedCard) {}

    /// Every eligible player has submitted; `cards` are in submission order.
    fn ready_to_judge(&mut self, judge: &Player, cards: &[PlayedCard]) {}

    fn round_won(&mut self, judge: &Player, winner: &Player, card: &PlayedCard, prize: &PrizeCard) {}

    /// Several players submitted the winning card and each got the prize.
    fn round_won_by_multiple_players(
        &mut self,
        judge: &Player,
        winners: &[&Player],
        card: &PlayedCard,
        prize: &PrizeCard,
    ) {
    }

    fn prize_deck_exhausted(&mut self) {}

    fn played_deck_exhausted(&mut self) {}

    /// A value of 0 or less means the threshold is undefined.
    fn points_needed_to_win_changed(&mut self, new_points: i32, old_points: i32) {}

    /// `player` is the one whose absence caused the suspension, if any.
    fn play_suspended(&mut self, player: Option<&Player>) {}

    /// `player` is the one whose return allowed play to resume, if any.
    fn play_resumed(&mut self, player: Option<&Player>) {}

    fn prize_card_revealed(&mut self, prize: &PrizeCard) {}
}
