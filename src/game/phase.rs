//! Game phases and round submissions.

use serde::{Deserialize, Serialize};

use crate::cards::PlayedCard;

/// Where a game is in its lifecycle.
///
/// ```text
/// Init ──start_round──▶ RoundPlay ──last submission──▶ RoundJudge
///  ▲                      ▲                               │ judge
///  │ restart              └─────────start_round───── RoundOver
/// GameOver ◀── winner declared / terminate
/// ```
///
/// `Suspended` can interrupt any started phase and returns to it on resume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Gathering players before the first round.
    Init,
    /// Players may submit cards.
    RoundPlay,
    /// Every eligible player has submitted; the judge may decide.
    RoundJudge,
    /// The round was judged and the next one has not started.
    RoundOver,
    /// Terminal until restarted.
    GameOver,
    /// Paused for lack of active players or an inactive judge.
    Suspended,
}

impl Phase {
    /// True between the first round and the end of the game.
    #[must_use]
    pub const fn is_started(self) -> bool {
        !matches!(self, Phase::Init | Phase::GameOver)
    }

    /// True when a new round may be set up.
    #[must_use]
    pub const fn can_start_round(self) -> bool {
        matches!(self, Phase::Init | Phase::RoundOver)
    }

    /// True while cards are being submitted or judged.
    #[must_use]
    pub const fn is_round_in_progress(self) -> bool {
        matches!(self, Phase::RoundPlay | Phase::RoundJudge)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Phase::Init => "init",
            Phase::RoundPlay => "round play",
            Phase::RoundJudge => "round judge",
            Phase::RoundOver => "round over",
            Phase::GameOver => "game over",
            Phase::Suspended => "suspended",
        };
        f.write_str(text)
    }
}

/// A card submitted for judgement this round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub(crate) player_id: String,
    pub(crate) card: PlayedCard,
}

impl Submission {
    /// Id of the submitting player.
    #[must_use]
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// The submitted card.
    #[must_use]
    pub fn card(&self) -> &PlayedCard {
        &self.card
    }
}
