//! Recording listener.
//!
//! `EventLog` stores every callback as a `GameEvent` value so callers can
//! replay or assert on what a game reported. Players are recorded by id.

use serde::Serialize;

use super::GameEventListener;
use crate::cards::{PlayedCard, PrizeCard};
use crate::core::Player;

/// An event as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    MinimumPlayersJoined { players: Vec<String> },
    MaximumPlayersJoined { players: Vec<String> },
    NotEnoughPlayers { players: Vec<String> },
    GameWon { winner: String },
    GameWonByMultiplePlayers { winners: Vec<String> },
    GameTerminated,
    RoundStarted { prize: PrizeCard, judge: String },
    PlayerJoined { player: String },
    PlayerLeft { player: String },
    JudgeChanged { judge: String },
    PlayerInactivated { player: String },
    PlayerActivated { player: String },
    PlayerNickChanged { player: String, old_nick: String, new_nick: String },
    PlayedCardDealt { player: String, card: PlayedCard },
    CardSubmitted { player: String, card: PlayedCard },
    ReadyToJudge { judge: String, cards: Vec<PlayedCard> },
    RoundWon { judge: String, winner: String, card: PlayedCard, prize: PrizeCard },
    RoundWonByMultiplePlayers {
        judge: String,
        winners: Vec<String>,
        card: PlayedCard,
        prize: PrizeCard,
    },
    PrizeDeckExhausted,
    PlayedDeckExhausted,
    PointsNeededToWinChanged { new_points: i32, old_points: i32 },
    PlaySuspended { player: Option<String> },
    PlayResumed { player: Option<String> },
    PrizeCardRevealed { prize: PrizeCard },
}

impl GameEvent {
    /// Short snake_case name of the event kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::MinimumPlayersJoined { .. } => "minimum_players_joined",
            GameEvent::MaximumPlayersJoined { .. } => "maximum_players_joined",
            GameEvent::NotEnoughPlayers { .. } => "not_enough_players",
            GameEvent::GameWon { .. } => "game_won",
            GameEvent::GameWonByMultiplePlayers { .. } => "game_won_by_multiple_players",
            GameEvent::GameTerminated => "game_terminated",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::PlayerJoined { .. } => "player_joined",
            GameEvent::PlayerLeft { .. } => "player_left",
            GameEvent::JudgeChanged { .. } => "judge_changed",
            GameEvent::PlayerInactivated { .. } => "player_inactivated",
            GameEvent::PlayerActivated { .. } => "player_activated",
            GameEvent::PlayerNickChanged { .. } => "player_nick_changed",
            GameEvent::PlayedCardDealt { .. } => "played_card_dealt",
            GameEvent::CardSubmitted { .. } => "card_submitted",
            GameEvent::ReadyToJudge { .. } => "ready_to_judge",
            GameEvent::RoundWon { .. } => "round_won",
            GameEvent::RoundWonByMultiplePlayers { .. } => "round_won_by_multiple_players",
            GameEvent::PrizeDeckExhausted => "prize_deck_exhausted",
            GameEvent::PlayedDeckExhausted => "played_deck_exhausted",
            GameEvent::PointsNeededToWinChanged { .. } => "points_needed_to_win_changed",
            GameEvent::PlaySuspended { .. } => "play_suspended",
            GameEvent::PlayResumed { .. } => "play_resumed",
            GameEvent::PrizeCardRevealed { .. } => "prize_card_revealed",
        }
    }
}

fn ids<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<String> {
    players.into_iter().map(|p| p.id().to_string()).collect()
}

/// Listener that appends every event to a list.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they fired.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Event names in the order they fired.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(GameEvent::name).collect()
    }

    /// How many recorded events have the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.events.iter().filter(|e| e.name() == name).count()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

impl GameEventListener for EventLog {
    fn minimum_players_joined(&mut self, players: &[Player]) {
        self.push(GameEvent::MinimumPlayersJoined { players: ids(players) });
    }

    fn maximum_players_joined(&mut self, players: &[Player]) {
        self.push(GameEvent::MaximumPlayersJoined { players: ids(players) });
    }

    fn not_enough_players(&mut self, players: &[Player]) {
        self.push(GameEvent::NotEnoughPlayers { players: ids(players) });
    }

    fn game_won(&mut self, winner: &Player) {
        self.push(GameEvent::GameWon {
            winner: winner.id().to_string(),
        });
    }

    fn game_won_by_multiple_players(&mut self, winners: &[&Player]) {
        self.push(GameEvent::GameWonByMultiplePlayers {
            winners: ids(winners.iter().copied()),
        });
    }

    fn game_terminated(&mut self) {
        self.push(GameEvent::GameTerminated);
    }

    fn round_started(&mut self, prize: &PrizeCard, judge: &Player) {
        self.push(GameEvent::RoundStarted {
            prize: prize.clone(),
            judge: judge.id().to_string(),
        });
    }

    fn player_joined(&mut self, player: &Player) {
        self.push(GameEvent::PlayerJoined {
            player: player.id().to_string(),
        });
    }

    fn player_left(&mut self, player: &Player) {
        self.push(GameEvent::PlayerLeft {
            player: player.id().to_string(),
        });
    }

    fn judge_changed(&mut self, judge: &Player) {
        self.push(GameEvent::JudgeChanged {
            judge: judge.id().to_string(),
        });
    }

    fn player_inactivated(&mut self, player: &Player) {
        self.push(GameEvent::PlayerInactivated {
            player: player.id().to_string(),
        });
    }

    fn player_activated(&mut self, player: &Player) {
        self.push(GameEvent::PlayerActivated {
            player: player.id().to_string(),
        });
    }

    fn player_nick_changed(&mut self, player: &Player, old_nick: &str) {
        self.push(GameEvent::PlayerNickChanged {
            player: player.id().to_string(),
            old_nick: old_nick.to_string(),
            new_nick: player.nick().to_string(),
        });
    }

    fn played_card_dealt(&mut self, player: &Player, card: &PlayedCard) {
        self.push(GameEvent::PlayedCardDealt {
            player: player.id().to_string(),
            card: card.clone(),
        });
    }

    fn card_submitted(&mut self, player: &Player, card: &PlayedCard) {
        self.push(GameEvent::CardSubmitted {
            player: player.id().to_string(),
            card: card.clone(),
        });
    }

    fn ready_to_judge(&mut self, judge: &Player, cards: &[PlayedCard]) {
        self.push(GameEvent::ReadyToJudge {
            judge: judge.id().to_string(),
            cards: cards.to_vec(),
        });
    }

    fn round_won(&mut self, judge: &Player, winner: &Player, card: &PlayedCard, prize: &PrizeCard) {
        self.push(GameEvent::RoundWon {
            judge: judge.id().to_string(),
            winner: winner.id().to_string(),
            card: card.clone(),
            prize: prize.clone(),
        });
    }

    fn round_won_by_multiple_players(
        &mut self,
        judge: &Player,
        winners: &[&Player],
        card: &PlayedCard,
        prize: &PrizeCard,
    ) {
        self.push(GameEvent::RoundWonByMultiplePlayers {
            judge: judge.id().to_string(),
            winners: ids(winners.iter().copied()),
            card: card.clone(),
            prize: prize.clone(),
        });
    }

    fn prize_deck_exhausted(&mut self) {
        self.push(GameEvent::PrizeDeckExhausted);
    }

    fn played_deck_exhausted(&mut self) {
        self.push(GameEvent::PlayedDeckExhausted);
    }

    fn points_needed_to_win_changed(&mut self, new_points: i32, old_points: i32) {
        self.push(GameEvent::PointsNeededToWinChanged { new_points, old_points });
    }

    fn play_suspended(&mut self, player: Option<&Player>) {
        self.push(GameEvent::PlaySuspended {
            player: player.map(|p| p.id().to_string()),
        });
    }

    fn play_resumed(&mut self, player: Option<&Player>) {
        self.push(GameEvent::PlayResumed {
            player: player.map(|p| p.id().to_string()),
        });
    }

    fn prize_card_revealed(&mut self, prize: &PrizeCard) {
        self.push(GameEvent::PrizeCardRevealed { prize: prize.clone() });
    }
}
