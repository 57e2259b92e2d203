//! Whole-game flow tests.
//!
//! These drive a `Game` from the first join to game over and check the
//! event stream a front end would see along the way.

use rust_apples::cards::{PlayedCard, PrizeCard};
use rust_apples::core::{GameConfig, Outcome, PointsSchedule};
use rust_apples::deck::{Deck, ListDeck};
use rust_apples::events::{EventLog, GameEvent};
use rust_apples::game::{Game, Phase};

fn played(words: &[&str], self_replenishing: bool) -> ListDeck<PlayedCard> {
    ListDeck::from_cards(words.iter().map(|w| PlayedCard::new(w).unwrap()), self_replenishing)
}

fn prizes(words: &[&str], self_replenishing: bool) -> ListDeck<PrizeCard> {
    ListDeck::from_cards(words.iter().map(|w| PrizeCard::new(w).unwrap()), self_replenishing)
}

fn numbered_game(config: GameConfig) -> Game<EventLog> {
    let played = ListDeck::from_cards(
        (0..40).map(|i| PlayedCard::new(&format!("Noun {i}")).unwrap()),
        false,
    );
    let prizes = ListDeck::from_cards(
        (0..20).map(|i| PrizeCard::new(&format!("Adjective {i}")).unwrap()),
        false,
    );
    Game::new(EventLog::new(), config, played, prizes).unwrap()
}

fn hand_card(game: &Game<EventLog>, id: &str) -> PlayedCard {
    game.player(id).unwrap().hand()[0].clone()
}

// =============================================================================
// End-to-End
// =============================================================================

/// Three players, one card each, first point wins.
#[test]
fn test_single_round_game() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(1)
        .with_points_schedule(PointsSchedule::Fixed(1))
        .with_auto_start(false);
    let mut game = Game::new(
        EventLog::new(),
        config,
        played(&["Bats", "Cactus", "Dentists", "Elephants"], false),
        prizes(&["Fuzzy", "Groovy"], false),
    )
    .unwrap();

    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert!(game.is_ready_to_start());
    assert_eq!(game.start_round(), Outcome::Success);
    assert!(game.is_time_to_play());

    let judge = game.current_judge().unwrap().id().to_string();
    let others: Vec<String> = game
        .players()
        .iter()
        .filter(|p| p.id() != judge)
        .map(|p| p.id().to_string())
        .collect();
    assert_eq!(others.len(), 2);
    for id in &others {
        assert_eq!(game.player(id).unwrap().hand().len(), 1);
    }

    for id in &others {
        let card = hand_card(&game, id);
        assert_eq!(game.play(id, &card), Outcome::Success);
    }
    assert!(game.is_time_to_judge());
    assert_eq!(game.listener().count("ready_to_judge"), 1);

    let winning = game.submitted_cards()[1].clone();
    let winner_id = game.submissions()[1].player_id().to_string();
    assert_eq!(game.judge(&winning), Outcome::Success);

    assert!(game.is_over());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.winners().len(), 1);
    assert_eq!(game.winners()[0].id(), winner_id);
    assert_eq!(game.winners()[0].points(), 1);
    assert!(game
        .listener()
        .events()
        .contains(&GameEvent::GameWon { winner: winner_id }));
}

/// Event order for a round, from the first deal to the award.
#[test]
fn test_round_event_order() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(1)
        .with_points_schedule(PointsSchedule::Fixed(5))
        .with_auto_start(false);
    let mut game = numbered_game(config);
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    game.listener_mut().clear();

    assert_eq!(game.start_round(), Outcome::Success);
    assert_eq!(
        game.listener().names(),
        vec![
            "played_card_dealt",
            "played_card_dealt",
            "played_card_dealt",
            "judge_changed",
            "prize_card_revealed",
            "round_started",
        ]
    );
    game.listener_mut().clear();

    let p2 = hand_card(&game, "p2");
    let p3 = hand_card(&game, "p3");
    assert_eq!(game.play("p2", &p2), Outcome::Success);
    assert_eq!(game.play("p3", &p3), Outcome::Success);
    assert_eq!(game.judge(&p3), Outcome::Success);
    assert_eq!(
        game.listener().names(),
        vec!["card_submitted", "card_submitted", "ready_to_judge", "round_won"]
    );
    assert!(game.is_round_over());
}

/// Auto-start runs rounds back to back and rotates the judge in join order.
#[test]
fn test_auto_start_rotates_judge() {
    let config = GameConfig::new()
        .with_players(3, 4)
        .with_cards_per_hand(2)
        .with_points_schedule(PointsSchedule::Fixed(10));
    let mut game = numbered_game(config);
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert!(game.is_time_to_play());

    let mut judges = Vec::new();
    for _ in 0..4 {
        let judge = game.current_judge().unwrap().id().to_string();
        judges.push(judge.clone());
        let pending: Vec<(String, PlayedCard)> = game
            .players_who_have_not_played()
            .iter()
            .map(|p| (p.id().to_string(), p.hand()[0].clone()))
            .collect();
        for (id, card) in pending {
            assert_eq!(game.play(&id, &card), Outcome::Success);
        }
        let pick = game.submitted_cards()[0].clone();
        assert_eq!(game.judge(&pick), Outcome::Success);
    }
    assert_eq!(judges, vec!["p1", "p2", "p3", "p1"]);
    assert_eq!(game.rounds_played(), 4);
    assert!(game.is_time_to_play());
}

// =============================================================================
// Judging
// =============================================================================

/// Only submissions equal to the picked card win, whatever their case.
#[test]
fn test_judging_awards_matching_submissions_only() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(1)
        .with_points_schedule(PointsSchedule::Fixed(1))
        .with_auto_start(false);
    let mut game = Game::new(
        EventLog::new(),
        config,
        played(&["Bats", "Bats", "Cactus"], false),
        prizes(&["Fuzzy"], true),
    )
    .unwrap();
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.start_round(), Outcome::Success);
    assert_eq!(game.current_judge().unwrap().id(), "p1");

    let bats = PlayedCard::new("bats").unwrap();
    assert!(game.player("p2").unwrap().has_card(&bats));
    assert_eq!(game.play("p2", &bats), Outcome::Success);
    let cactus = hand_card(&game, "p3");
    assert_eq!(game.play("p3", &cactus), Outcome::Success);
    game.listener_mut().clear();

    assert_eq!(game.judge(&cactus), Outcome::Success);
    assert_eq!(game.listener().count("round_won"), 1);
    assert_eq!(game.winners()[0].id(), "p3");
}

/// Two identical winning cards fire the multi-winner events.
#[test]
fn test_multiple_round_winners_end_in_tie() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(1)
        .with_points_schedule(PointsSchedule::Fixed(1))
        .with_auto_start(false);
    let mut game = Game::new(
        EventLog::new(),
        config,
        played(&["Bats", "Bats", "BATS"], false),
        prizes(&["Fuzzy"], true),
    )
    .unwrap();
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.start_round(), Outcome::Success);

    let bats = PlayedCard::new("Bats").unwrap();
    assert_eq!(game.play("p2", &bats), Outcome::Success);
    assert_eq!(game.play("p3", &bats), Outcome::Success);
    game.listener_mut().clear();

    assert_eq!(game.judge(&bats), Outcome::Success);
    assert_eq!(game.listener().count("round_won"), 0);
    assert_eq!(game.listener().count("round_won_by_multiple_players"), 1);
    assert_eq!(game.listener().count("game_won_by_multiple_players"), 1);

    let winners: Vec<&str> = game.winners().iter().map(|p| p.id()).collect();
    assert_eq!(winners, vec!["p2", "p3"]);
    for winner in game.winners() {
        assert_eq!(winner.won_prizes(), &[PrizeCard::new("Fuzzy").unwrap()]);
    }
}

/// An inactive player never holds up judging.
#[test]
fn test_inactive_player_does_not_block_judging() {
    let config = GameConfig::new()
        .with_players(3, 4)
        .with_cards_per_hand(2)
        .with_points_schedule(PointsSchedule::Fixed(5))
        .with_auto_start(false);
    let mut game = numbered_game(config);
    for id in ["p1", "p2", "p3", "p4"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.start_round(), Outcome::Success);
    assert_eq!(game.inactivate("p4"), Outcome::Success);
    assert!(!game.is_suspended());

    let p2 = hand_card(&game, "p2");
    let p3 = hand_card(&game, "p3");
    assert_eq!(game.play("p2", &p2), Outcome::Success);
    assert!(game.is_time_to_play());
    assert_eq!(game.play("p3", &p3), Outcome::Success);
    assert!(game.is_time_to_judge());
    assert_eq!(game.submissions().len(), 2);
}

// =============================================================================
// Restart
// =============================================================================

/// Restarting a finished game clears scores and hands but keeps the players.
#[test]
fn test_restart_after_game_over() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(2)
        .with_points_schedule(PointsSchedule::Fixed(1))
        .with_auto_start(false);
    let mut game = numbered_game(config);
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.restart(), Outcome::ErrorProhibited);
    assert_eq!(game.start_round(), Outcome::Success);

    let p2 = hand_card(&game, "p2");
    let p3 = hand_card(&game, "p3");
    assert_eq!(game.play("p2", &p2), Outcome::Success);
    assert_eq!(game.play("p3", &p3), Outcome::Success);
    assert_eq!(game.judge(&p2), Outcome::Success);
    assert!(game.is_over());

    assert_eq!(game.restart(), Outcome::Success);
    assert_eq!(game.phase(), Phase::Init);
    assert_eq!(game.rounds_played(), 0);
    assert!(game.winners().is_empty());
    for player in game.players() {
        assert!(player.hand().is_empty());
        assert_eq!(player.points(), 0);
        assert_eq!(player.rounds_played(), 0);
    }
    assert_eq!(game.players().len(), 3);
    assert_eq!(game.start_round(), Outcome::Success);
}

/// Restart needs both decks to still hold cards.
#[test]
fn test_restart_with_exhausted_deck() {
    let config = GameConfig::new()
        .with_players(3, 3)
        .with_cards_per_hand(1)
        .with_points_schedule(PointsSchedule::Fixed(1))
        .with_auto_start(false);
    let mut game = Game::new(
        EventLog::new(),
        config,
        played(&["Bats", "Cactus", "Dentists", "Elephants"], false),
        prizes(&["Fuzzy"], false),
    )
    .unwrap();
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.start_round(), Outcome::Success);
    assert!(game.prize_deck().is_exhausted());
    assert_eq!(game.listener().count("prize_deck_exhausted"), 1);

    assert_eq!(game.terminate(), Outcome::Success);
    assert_eq!(game.restart(), Outcome::ErrorGameUninitialized);

    let refill = prizes(&["Groovy"], false);
    game.prize_deck_mut().combine(&refill);
    assert_eq!(game.restart(), Outcome::Success);
}

/// A terminated game reports it once and then stays over.
#[test]
fn test_terminate() {
    let mut game = numbered_game(GameConfig::new().with_players(3, 3).with_auto_start(false));
    assert_eq!(game.terminate(), Outcome::ErrorProhibited);
    for id in ["p1", "p2", "p3"] {
        assert_eq!(game.join(id, None), Outcome::Success);
    }
    assert_eq!(game.start_round(), Outcome::Success);
    assert_eq!(game.terminate(), Outcome::Success);
    assert_eq!(game.terminate(), Outcome::NoEffect);
    assert!(game.winners().is_empty());
    assert_eq!(game.listener().count("game_terminated"), 1);
    assert_eq!(game.join("p4", None), Outcome::ErrorProhibited);
}
