//! Game configuration.
//!
//! `GameConfig` is a policy object: the engine consults it but never mutates
//! it. Defaults follow the official party rules except that three players
//! (one judge, two submitters) are enough to start.
//!
//! Configurations can be built in code with the `with_*` builder methods or
//! loaded from JSON:
//!
//! ```
//! use rust_apples::core::{GameConfig, PointsSchedule};
//!
//! let config = GameConfig::from_json(r#"{
//!     "cards_per_hand": 5,
//!     "min_players": 3,
//!     "max_players": 6,
//!     "points_schedule": { "kind": "fixed", "value": 4 }
//! }"#).unwrap();
//!
//! assert_eq!(config.cards_per_hand, 5);
//! assert_eq!(config.points_schedule, PointsSchedule::Fixed(4));
//! assert!(config.auto_start_round);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Smallest hand a game can be configured with.
pub const MIN_CARDS_PER_HAND: usize = 1;

/// Smallest player bound a game can be configured with.
pub const MIN_PLAYERS: usize = 2;

/// Errors raised while building or loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A numeric bound is below what the game can support.
    #[error("{setting} is {value}, but must be at least {minimum}")]
    BelowMinimum {
        /// Human-readable name of the setting.
        setting: &'static str,
        /// The configured value.
        value: usize,
        /// The smallest accepted value.
        minimum: usize,
    },

    /// The points schedule yields 0 for a reachable player count.
    ///
    /// Zero would let every player win before a single round is judged.
    #[error("points needed to win is 0 for {players} players")]
    PointsThreshold {
        /// The player count that produced the bad threshold.
        players: usize,
    },

    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse configuration JSON.
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How many prize cards a player needs to win.
///
/// A value of 0 or less from [`PointsSchedule::points_for`] means the
/// threshold is undefined and winners must be declared manually.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum PointsSchedule {
    /// The official table: 8 for fewer than 4 players, `12 - n` for 4 to 8
    /// players, 4 for more than 8.
    #[default]
    Official,
    /// The same threshold regardless of player count.
    Fixed(i32),
    /// No threshold; winners are declared manually.
    Manual,
    /// The entry with the greatest key not above the player count applies.
    /// Counts below every key fall back to manual declaration.
    ByPlayerCount(BTreeMap<usize, i32>),
}

impl PointsSchedule {
    /// Threshold for the given number of joined players.
    #[must_use]
    pub fn points_for(&self, player_count: usize) -> i32 {
        match self {
            PointsSchedule::Official => match player_count {
                0..=3 => 8,
                4..=8 => 12 - player_count as i32,
                _ => 4,
            },
            PointsSchedule::Fixed(points) => *points,
            PointsSchedule::Manual => -1,
            PointsSchedule::ByPlayerCount(table) => table
                .range(..=player_count)
                .next_back()
                .map_or(-1, |(_, points)| *points),
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cards each hand is replenished to at the start of a round.
    pub cards_per_hand: usize,

    /// Players needed before a round can start.
    pub min_players: usize,

    /// Players allowed to join.
    pub max_players: usize,

    /// Whether players may join once the game has started.
    pub players_can_join_during_game: bool,

    /// Whether players may leave once the game has started.
    pub players_can_leave_during_game: bool,

    /// Threshold policy.
    pub points_schedule: PointsSchedule,

    /// Compute the threshold once, when the first round starts, instead of
    /// after every join and leave.
    pub fix_points_at_start: bool,

    /// Rotate the judge every round. When false the judge is fixed.
    pub rotate_judge: bool,

    /// Start rounds automatically: when the minimum number of players has
    /// joined, after every judgement, and after a restart.
    pub auto_start_round: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cards_per_hand: 7,
            min_players: 3,
            max_players: 12,
            players_can_join_during_game: true,
            players_can_leave_during_game: true,
            points_schedule: PointsSchedule::Official,
            fix_points_at_start: true,
            rotate_judge: true,
            auto_start_round: true,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_cards_per_hand(mut self, cards: usize) -> Self {
        self.cards_per_hand = cards;
        self
    }

    /// Set the player bounds.
    #[must_use]
    pub fn with_players(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    /// Allow or forbid joining mid-game.
    #[must_use]
    pub fn with_join_during_game(mut self, allowed: bool) -> Self {
        self.players_can_join_during_game = allowed;
        self
    }

    /// Allow or forbid leaving mid-game.
    #[must_use]
    pub fn with_leave_during_game(mut self, allowed: bool) -> Self {
        self.players_can_leave_during_game = allowed;
        self
    }

    /// Set the threshold policy.
    #[must_use]
    pub fn with_points_schedule(mut self, schedule: PointsSchedule) -> Self {
        self.points_schedule = schedule;
        self
    }

    /// Fix the threshold when the first round starts.
    #[must_use]
    pub fn with_fixed_points_at_start(mut self, fixed: bool) -> Self {
        self.fix_points_at_start = fixed;
        self
    }

    /// Rotate or fix the judge.
    #[must_use]
    pub fn with_judge_rotation(mut self, rotate: bool) -> Self {
        self.rotate_judge = rotate;
        self
    }

    /// Start rounds automatically.
    #[must_use]
    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start_round = auto_start;
        self
    }

    /// Threshold for the given number of joined players.
    #[must_use]
    pub fn points_needed_to_win(&self, player_count: usize) -> i32 {
        self.points_schedule.points_for(player_count)
    }

    /// Check bounds and the points schedule.
    ///
    /// The schedule is checked at every player count where its value can
    /// change, from an emptied table up to `max_players`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards_per_hand < MIN_CARDS_PER_HAND {
            return Err(ConfigError::BelowMinimum {
                setting: "number of cards per hand",
                value: self.cards_per_hand,
                minimum: MIN_CARDS_PER_HAND,
            });
        }
        if self.min_players < MIN_PLAYERS {
            return Err(ConfigError::BelowMinimum {
                setting: "minimum number of players",
                value: self.min_players,
                minimum: MIN_PLAYERS,
            });
        }
        if self.max_players < self.min_players {
            return Err(ConfigError::BelowMinimum {
                setting: "maximum number of players",
                value: self.max_players,
                minimum: self.min_players,
            });
        }
        let breakpoints: Vec<usize> = match &self.points_schedule {
            PointsSchedule::Official => (0..=self.max_players.min(9)).collect(),
            PointsSchedule::ByPlayerCount(table) => std::iter::once(0)
                .chain(table.range(..=self.max_players).map(|(count, _)| *count))
                .collect(),
            PointsSchedule::Fixed(_) | PointsSchedule::Manual => vec![0],
        };
        for players in breakpoints {
            if self.points_needed_to_win(players) == 0 {
                return Err(ConfigError::PointsThreshold { players });
            }
        }
        Ok(())
    }
}
