//! Round benchmarks
//!
//! Full games played to completion, with and without event recording.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_apples::{
    Deck, EventLog, Game, GameConfig, GameEventListener, GameRng, ListDeck, LoggingListener,
    PlayedCard, PointsSchedule, PrizeCard,
};

const PLAYER_COUNTS: &[usize] = &[3, 6, 12];
const POINTS_TO_WIN: i32 = 5;

fn decks(rng: &mut GameRng) -> (ListDeck<PlayedCard>, ListDeck<PrizeCard>) {
    let mut played = ListDeck::from_cards(
        (0..200).map(|i| PlayedCard::new(&format!("Noun {i}")).unwrap()),
        true,
    );
    let mut prizes = ListDeck::from_cards(
        (0..50).map(|i| PrizeCard::new(&format!("Adjective {i}")).unwrap()),
        true,
    );
    played.shuffle(rng);
    prizes.shuffle(rng);
    (played, prizes)
}

fn play_game<L: GameEventListener>(listener: L, players: usize, seed: u64) -> u32 {
    let mut rng = GameRng::new(seed);
    let (played, prizes) = decks(&mut rng);
    let config = GameConfig::new()
        .with_players(3, players.max(3))
        .with_points_schedule(PointsSchedule::Fixed(POINTS_TO_WIN))
        .with_auto_start(false);
    let mut game = Game::new(listener, config, played, prizes).unwrap();
    for i in 0..players {
        let _ = game.join(&format!("player{i}"), None);
    }

    while !game.is_over() {
        let _ = game.start_round();
        let pending: Vec<(String, PlayedCard)> = game
            .players_who_have_not_played()
            .iter()
            .map(|p| {
                let pick = rng.gen_range_usize(0..p.hand().len());
                (p.id().to_string(), p.hand()[pick].clone())
            })
            .collect();
        for (id, card) in pending {
            let _ = game.play(&id, &card);
        }
        let submitted: Vec<PlayedCard> = game.submitted_cards().into_iter().cloned().collect();
        let pick = rng.gen_range_usize(0..submitted.len());
        let _ = game.judge(&submitted[pick]);
    }
    game.rounds_played()
}

fn bench_full_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_game");

    for &players in PLAYER_COUNTS {
        group.throughput(Throughput::Elements(players as u64));

        group.bench_with_input(BenchmarkId::new("logging", players), &players, |b, &n| {
            b.iter(|| black_box(play_game(LoggingListener, n, 42)))
        });
        group.bench_with_input(BenchmarkId::new("recording", players), &players, |b, &n| {
            b.iter(|| black_box(play_game(EventLog::new(), n, 42)))
        });
    }

    group.finish();
}

fn bench_deck_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("deck_draw");

    for &replenishing in &[false, true] {
        group.bench_with_input(
            BenchmarkId::from_parameter(if replenishing { "replenishing" } else { "finite" }),
            &replenishing,
            |b, &replenishing| {
                b.iter(|| {
                    let mut deck = ListDeck::from_cards(
                        (0..500).map(|i| PlayedCard::new(&format!("Noun {i}")).unwrap()),
                        replenishing,
                    );
                    let mut drawn = 0;
                    while drawn < 500 && deck.draw().is_some() {
                        drawn += 1;
                    }
                    black_box(drawn)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_full_game, bench_deck_draw);
criterion_main!(benches);
