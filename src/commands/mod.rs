//! Text commands.
//!
//! The transport-independent half of a chat front end: parse a line typed by
//! a player and run it against a game on their behalf. Card numbers are
//! 1-based, matching the numbered listings in [`Reply`].
//!
//! ```
//! use rust_apples::commands::{execute, Command, Reply};
//! use rust_apples::cards::{PlayedCard, PrizeCard};
//! use rust_apples::core::{GameConfig, Outcome};
//! use rust_apples::deck::ListDeck;
//! use rust_apples::events::LoggingListener;
//! use rust_apples::game::Game;
//!
//! let played = ListDeck::from_cards([PlayedCard::new("Bats").unwrap()], true);
//! let prizes = ListDeck::from_cards([PrizeCard::new("Fuzzy").unwrap()], true);
//! let mut game = Game::new(LoggingListener, GameConfig::new(), played, prizes).unwrap();
//!
//! let command: Command = "join Ace".parse().unwrap();
//! let reply = execute(&mut game, "ace@example", &command);
//! assert_eq!(reply, Reply::Outcome(Outcome::Success));
//! assert_eq!(game.player("ace@example").map(|p| p.nick()), Some("Ace"));
//! ```

use std::str::FromStr;

use tracing::debug;

use crate::cards::PlayedCard;
use crate::core::Outcome;
use crate::events::GameEventListener;
use crate::game::Game;

/// Errors raised while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line was blank.
    #[error("no command given")]
    Empty,

    /// The verb is not a known command.
    #[error("unknown command '{0}'")]
    Unknown(String),

    /// A required argument was left out.
    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    /// An argument was given to a command that takes none.
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },

    /// A card number was not a positive integer.
    #[error("'{value}' is not a card number")]
    InvalidCardNumber { value: String },
}

/// A parsed player command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `join [nick]`
    Join { nick: Option<String> },
    /// `leave`
    Leave,
    /// `nick <new nick>`
    Nick(String),
    /// `start`
    Start,
    /// `play <n>`: submit the n-th card of your hand.
    Play(usize),
    /// `judge <n>`: pick the n-th submitted card.
    Judge(usize),
    /// `away`
    Away,
    /// `back`
    Back,
    /// `abort`
    Abort,
    /// `terminate`
    Terminate,
    /// `restart`
    Restart,
    /// `hand`
    Hand,
    /// `scores`
    Scores,
}

impl Command {
    /// Parse a command line. The verb is case-insensitive.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let (verb, rest) = match input.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (input, ""),
        };
        if verb.is_empty() {
            return Err(CommandError::Empty);
        }
        let argument = (!rest.is_empty()).then_some(rest);

        let command = match verb.to_ascii_lowercase().as_str() {
            "join" => Command::Join {
                nick: argument.map(str::to_string),
            },
            "nick" => Command::Nick(
                argument
                    .ok_or(CommandError::MissingArgument {
                        command: "nick",
                        expected: "a new nick",
                    })?
                    .to_string(),
            ),
            "play" => Command::Play(card_number("play", argument)?),
            "judge" => Command::Judge(card_number("judge", argument)?),
            "leave" => no_argument(Command::Leave, "leave", argument)?,
            "start" => no_argument(Command::Start, "start", argument)?,
            "away" => no_argument(Command::Away, "away", argument)?,
            "back" => no_argument(Command::Back, "back", argument)?,
            "abort" => no_argument(Command::Abort, "abort", argument)?,
            "terminate" => no_argument(Command::Terminate, "terminate", argument)?,
            "restart" => no_argument(Command::Restart, "restart", argument)?,
            "hand" => no_argument(Command::Hand, "hand", argument)?,
            "scores" => no_argument(Command::Scores, "scores", argument)?,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };
        Ok(command)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn no_argument(command: Command, name: &'static str, argument: Option<&str>) -> Result<Command, CommandError> {
    match argument {
        Some(_) => Err(CommandError::UnexpectedArgument { command: name }),
        None => Ok(command),
    }
}

fn card_number(command: &'static str, argument: Option<&str>) -> Result<usize, CommandError> {
    let value = argument.ok_or(CommandError::MissingArgument {
        command,
        expected: "a card number",
    })?;
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidCardNumber {
            value: value.to_string(),
        }),
    }
}

/// One line of the score table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreLine {
    pub nick: String,
    pub points: usize,
    pub is_judge: bool,
}

/// What a command produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// The result of a game operation.
    Outcome(Outcome),
    /// The sender's hand, in hand order.
    Hand(Vec<PlayedCard>),
    /// Every player, by descending points.
    Scores(Vec<ScoreLine>),
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Outcome(outcome) => write!(f, "{outcome}"),
            Reply::Hand(cards) if cards.is_empty() => f.write_str("(no cards)"),
            Reply::Hand(cards) => {
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}. {}", i + 1, card)?;
                }
                Ok(())
            }
            Reply::Scores(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}: {}", line.nick, line.points)?;
                    if line.is_judge {
                        f.write_str(" (judge)")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Run `command` on behalf of the player with id `sender`.
pub fn execute<L: GameEventListener>(game: &mut Game<L>, sender: &str, command: &Command) -> Reply {
    debug!(sender, ?command, "Executing command");
    let outcome = match command {
        Command::Join { nick } => game.join(sender, nick.as_deref()),
        Command::Leave => game.leave(sender),
        Command::Nick(nick) => game.change_nick(sender, nick),
        Command::Start => game.start_round(),
        Command::Play(n) => match game
            .player(sender)
            .zip(n.checked_sub(1))
            .and_then(|(p, i)| p.card_at(i))
            .cloned()
        {
            Some(card) => game.play(sender, &card),
            None => Outcome::ErrorInvalidParameter,
        },
        Command::Judge(n) => {
            if game.player(sender).is_none() {
                Outcome::ErrorInvalidParameter
            } else if game.current_judge().map(|j| j.id()) != Some(sender) {
                Outcome::ErrorProhibited
            } else {
                let picked = n.checked_sub(1).and_then(|i| game.submitted_cards().get(i).map(|c| (*c).clone()));
                match picked {
                    Some(card) => game.judge(&card),
                    None => Outcome::ErrorInvalidParameter,
                }
            }
        }
        Command::Away => game.inactivate(sender),
        Command::Back => game.activate(sender),
        Command::Abort => game.abort_round(),
        Command::Terminate => game.terminate(),
        Command::Restart => game.restart(),
        Command::Hand => {
            return match game.player(sender) {
                Some(player) => Reply::Hand(player.hand().to_vec()),
                None => Reply::Outcome(Outcome::ErrorInvalidParameter),
            };
        }
        Command::Scores => {
            let judge = game.current_judge().map(|j| j.id().to_string());
            let lines = game
                .players_sorted_by_points()
                .into_iter()
                .map(|p| ScoreLine {
                    nick: p.nick().to_string(),
                    points: p.points(),
                    is_judge: judge.as_deref() == Some(p.id()),
                })
                .collect();
            return Reply::Scores(lines);
        }
    };
    Reply::Outcome(outcome)
}
