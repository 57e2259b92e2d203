//! Shared setup for the game unit tests.

use super::Game;
use crate::cards::{PlayedCard, PrizeCard};
use crate::core::{GameConfig, PointsSchedule};
use crate::deck::ListDeck;
use crate::events::EventLog;

/// A finite deck of `n` distinct played cards: "Noun 0", "Noun 1", ...
pub(crate) fn played_deck(n: usize) -> ListDeck<PlayedCard> {
    ListDeck::from_cards(
        (0..n).map(|i| PlayedCard::new(&format!("Noun {i}")).unwrap()),
        false,
    )
}

/// A finite deck of `n` distinct prize cards: "Adjective 0", ...
pub(crate) fn prize_deck(n: usize) -> ListDeck<PrizeCard> {
    ListDeck::from_cards(
        (0..n).map(|i| PrizeCard::new(&format!("Adjective {i}")).unwrap()),
        false,
    )
}

/// 3 to 4 players, 2 cards each, 2 points to win, manual round starts.
pub(crate) fn small_config() -> GameConfig {
    GameConfig::new()
        .with_players(3, 4)
        .with_cards_per_hand(2)
        .with_points_schedule(PointsSchedule::Fixed(2))
        .with_auto_start(false)
}

pub(crate) fn game_with(config: GameConfig) -> Game<EventLog> {
    Game::new(EventLog::new(), config, played_deck(60), prize_deck(20)).unwrap()
}

/// A game with `ids` joined and the first round started.
pub(crate) fn started_game(config: GameConfig, ids: &[&str]) -> Game<EventLog> {
    let mut game = game_with(config);
    for id in ids {
        assert!(game.join(id, None).is_success());
    }
    if !game.is_started() {
        assert!(game.start_round().is_success());
    }
    game.listener_mut().clear();
    game
}

/// Submit the first card of every player still expected to play.
pub(crate) fn submit_all(game: &mut Game<EventLog>) {
    let pending: Vec<(String, PlayedCard)> = game
        .players_who_have_not_played()
        .iter()
        .filter(|p| p.is_active())
        .map(|p| (p.id().to_string(), p.hand()[0].clone()))
        .collect();
    for (id, card) in pending {
        assert!(game.play(&id, &card).is_success());
    }
}
