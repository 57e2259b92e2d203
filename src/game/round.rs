//! Round flow: dealing, judge selection, submission, judgement and the
//! end of the game.

use tracing::{debug, trace, warn};

use super::engine::Game;
use super::phase::{Phase, Submission};
use crate::cards::PlayedCard;
use crate::core::Outcome;
use crate::events::GameEventListener;

impl<L: GameEventListener> Game<L> {
    /// Set up the next round: replenish hands, pick the judge, reveal the
    /// prize card.
    ///
    /// If no active judge can be found the round is still set up, but play
    /// starts suspended until the judge returns.
    pub fn start_round(&mut self) -> Outcome {
        if self.phase == Phase::RoundPlay {
            return Outcome::NoEffect;
        }
        if !self.phase.can_start_round() {
            return Outcome::ErrorProhibited;
        }
        if self.players.len() < self.config.min_players {
            return Outcome::ErrorGameUninitialized;
        }
        if self.active_count() < self.config.min_players {
            return Outcome::ErrorProhibited;
        }
        if self.prize_deck.is_exhausted() {
            warn!("Cannot start round: prize deck exhausted");
            return Outcome::ErrorGameUninitialized;
        }
        let replenished = self.replenish_hands();
        if !replenished.is_success() {
            return replenished;
        }

        let first_round = self.phase == Phase::Init;
        if first_round && self.config.fix_points_at_start {
            let points = self.config.points_needed_to_win(self.players.len());
            if self.set_points_needed_to_win(points).is_success() {
                debug!(points, "Threshold fixed for this game");
            }
        }

        if self.config.rotate_judge {
            for _ in 0..=self.players.len() {
                let _ = self.set_judge();
                if self.current_judge().is_some_and(|j| j.is_active()) {
                    break;
                }
            }
        } else if self.judge.is_none() {
            let first = self.players.iter().position(|p| p.is_active()).unwrap_or(0);
            self.assign_judge(first);
        }
        let Some(judge) = self.judge_index() else {
            return Outcome::ErrorGameUninitialized;
        };

        let judge_active = self.players[judge].is_active();
        if !judge_active {
            debug!(judge = %self.players[judge].id(), "Judge inactive, round starts suspended");
            self.pre_suspended_phase = Some(Phase::RoundPlay);
            self.phase = Phase::Suspended;
            self.listener.play_suspended(None);
        }

        let Some(prize) = self.prize_deck.draw() else {
            return Outcome::ErrorGameUninitialized;
        };
        self.listener.prize_card_revealed(&prize);
        if self.prize_deck.is_exhausted() {
            warn!("Prize deck exhausted");
            self.listener.prize_deck_exhausted();
        }
        self.submissions.clear();
        if judge_active {
            self.phase = Phase::RoundPlay;
        }
        debug!(
            round = self.rounds_played + 1,
            judge = %self.players[judge].id(),
            prize = %prize,
            "Round started"
        );
        self.listener.round_started(&prize, &self.players[judge]);
        self.prize_card = Some(prize);
        Outcome::Success
    }

    /// Deal every hand up to the configured size.
    ///
    /// Fails with `ErrorGameUninitialized` if the played deck runs dry
    /// before every hand is full; refill it with `combine` and retry.
    pub(super) fn replenish_hands(&mut self) -> Outcome {
        let per_hand = self.config.cards_per_hand;
        let mut announced = false;
        for index in 0..self.players.len() {
            while self.players[index].hand().len() < per_hand {
                let Some(card) = self.played_deck.draw() else {
                    if !announced {
                        warn!("Played deck exhausted");
                        self.listener.played_deck_exhausted();
                    }
                    return Outcome::ErrorGameUninitialized;
                };
                trace!(player = %self.players[index].id(), card = %card, "Dealt card");
                self.players[index].deal_card(card.clone());
                self.listener.played_card_dealt(&self.players[index], &card);
                if self.played_deck.is_exhausted() {
                    warn!("Played deck exhausted");
                    self.listener.played_deck_exhausted();
                    announced = true;
                }
            }
            self.players[index].set_able_to_play(true);
        }
        Outcome::Success
    }

    /// Rotate the judge to the next player in join order.
    ///
    /// Only between rounds and only when the configuration rotates judges.
    pub fn set_judge(&mut self) -> Outcome {
        if !self.phase.can_start_round() || !self.config.rotate_judge {
            return Outcome::ErrorProhibited;
        }
        if self.players.is_empty() {
            return Outcome::NoEffect;
        }
        let current = self.judge_index();
        let next = current.map_or(0, |i| (i + 1) % self.players.len());
        if current == Some(next) {
            return Outcome::NoEffect;
        }
        self.assign_judge(next);
        Outcome::Success
    }

    /// Make `id` the judge. Only between rounds.
    pub fn set_judge_to(&mut self, id: &str) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if !self.phase.can_start_round() {
            return Outcome::ErrorProhibited;
        }
        if self.is_judge(id) {
            return Outcome::NoEffect;
        }
        self.assign_judge(index);
        Outcome::Success
    }

    fn assign_judge(&mut self, index: usize) {
        let judge = &self.players[index];
        debug!(judge = %judge.id(), "Judge changed");
        self.judge = Some(judge.id().to_string());
        self.listener.judge_changed(judge);
    }

    /// Submit `card` from `id`'s hand.
    ///
    /// Submitting brings an inactive player back.
    pub fn play(&mut self, id: &str, card: &PlayedCard) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if self.phase != Phase::RoundPlay
            || self.has_submitted(id)
            || self.is_judge(id)
            || !self.players[index].is_able_to_play()
        {
            return Outcome::ErrorProhibited;
        }
        if !self.players[index].has_card(card) {
            return Outcome::ErrorInvalidParameter;
        }
        if self.players[index].set_active(true) {
            debug!(player = %id, "Player activated by submitting");
            self.listener.player_activated(&self.players[index]);
        }
        let Some(card) = self.players[index].remove_card(card) else {
            return Outcome::ErrorInvalidParameter;
        };
        debug!(player = %id, card = %card, "Card submitted");
        self.submissions.push(Submission {
            player_id: id.to_string(),
            card: card.clone(),
        });
        self.listener.card_submitted(&self.players[index], &card);
        self.check_for_judgement_phase();
        Outcome::Success
    }

    /// Move to `RoundJudge` once every active player who must submit has.
    pub fn check_for_judgement_phase(&mut self) {
        if self.phase != Phase::RoundPlay || self.submissions.is_empty() {
            return;
        }
        if self
            .players
            .iter()
            .any(|p| p.is_active() && self.must_submit(p))
        {
            return;
        }
        let Some(judge) = self.judge_index() else {
            return;
        };
        self.phase = Phase::RoundJudge;
        let cards: Vec<PlayedCard> = self.submissions.iter().map(|s| s.card.clone()).collect();
        debug!(submissions = cards.len(), "Ready to judge");
        self.listener.ready_to_judge(&self.players[judge], &cards);
    }

    /// Pick the winning card. Every player who submitted an equal card wins
    /// the prize.
    pub fn judge(&mut self, card: &PlayedCard) -> Outcome {
        if !self.submissions.iter().any(|s| s.card == *card) {
            return Outcome::ErrorInvalidParameter;
        }
        let Some(judge) = self.judge_index() else {
            return Outcome::ErrorGameUninitialized;
        };
        if self.phase != Phase::RoundJudge {
            return Outcome::ErrorProhibited;
        }
        let Some(prize) = self.prize_card.clone() else {
            return Outcome::ErrorGameUninitialized;
        };
        if self.players[judge].set_active(true) {
            self.listener.player_activated(&self.players[judge]);
        }

        self.phase = Phase::RoundOver;
        self.rounds_played += 1;

        let mut winning: Vec<(usize, PlayedCard)> = Vec::new();
        for submission in self.submissions.iter().filter(|s| s.card == *card) {
            if let Some(index) = self.players.iter().position(|p| p.id() == submission.player_id) {
                winning.push((index, submission.card.clone()));
            }
        }
        for (index, submitted) in &winning {
            let winner = &mut self.players[*index];
            debug!(winner = %winner.id(), prize = %prize, card = %submitted, "Awarded prize");
            winner.award_prize(prize.clone(), submitted.clone());
            winner.increment_rounds_played();
        }

        match winning.as_slice() {
            [] => return Outcome::ErrorInvalidParameter,
            [(index, submitted)] => {
                self.listener
                    .round_won(&self.players[judge], &self.players[*index], submitted, &prize);
            }
            [(_, submitted), ..] => {
                let winners: Vec<_> = winning.iter().map(|(i, _)| &self.players[*i]).collect();
                self.listener
                    .round_won_by_multiple_players(&self.players[judge], &winners, submitted, &prize);
            }
        }
        self.submissions.clear();

        if self.points_needed_to_win > 0 {
            self.check_for_game_winner(false);
        }
        if !self.is_over() && self.config.auto_start_round {
            let outcome = self.start_round();
            debug!(%outcome, "Auto-started next round");
        }
        Outcome::Success
    }

    /// Declare the leaders winners if they reached the threshold, or
    /// regardless when `force` is set. Ties produce several winners.
    pub fn check_for_game_winner(&mut self, force: bool) {
        if !self.is_started() {
            return;
        }
        let Some(top) = self.players.iter().map(|p| p.points()).max() else {
            return;
        };
        let reached = self.points_needed_to_win > 0
            && i64::try_from(top).unwrap_or(i64::MAX) >= i64::from(self.points_needed_to_win);
        if !reached && !force {
            return;
        }

        self.winners = self
            .players
            .iter()
            .filter(|p| p.points() == top)
            .cloned()
            .collect();
        self.phase = Phase::GameOver;
        self.pre_suspended_phase = None;
        debug!(winners = self.winners.len(), points = top, forced = force, "Game over");
        match self.winners.as_slice() {
            [winner] => self.listener.game_won(winner),
            winners => {
                let winners: Vec<_> = winners.iter().collect();
                self.listener.game_won_by_multiple_players(&winners);
            }
        }
    }

    /// Return submitted cards to their owners and end the round unjudged.
    pub fn abort_round(&mut self) -> Outcome {
        if !self.is_started() {
            return Outcome::NoEffect;
        }
        if !self.phase.is_round_in_progress() {
            return Outcome::ErrorProhibited;
        }
        for submission in std::mem::take(&mut self.submissions) {
            if let Some(index) = self.index_of(&submission.player_id) {
                self.players[index].deal_card(submission.card.clone());
                self.listener.played_card_dealt(&self.players[index], &submission.card);
            }
        }
        self.phase = Phase::RoundOver;
        debug!("Round aborted");
        if self.config.auto_start_round {
            let outcome = self.start_round();
            debug!(%outcome, "Auto-started next round");
        }
        Outcome::Success
    }

    /// End a started game without declaring a winner.
    pub fn terminate(&mut self) -> Outcome {
        match self.phase {
            Phase::Init => Outcome::ErrorProhibited,
            Phase::GameOver => Outcome::NoEffect,
            _ => {
                self.phase = Phase::GameOver;
                self.pre_suspended_phase = None;
                debug!("Game terminated");
                self.listener.game_terminated();
                Outcome::Success
            }
        }
    }

    /// Reset a finished game to `Init`, keeping the players but clearing
    /// their hands and scores.
    pub fn restart(&mut self) -> Outcome {
        if !self.is_over() {
            return Outcome::ErrorProhibited;
        }
        if self.played_deck.is_exhausted() || self.prize_deck.is_exhausted() {
            return Outcome::ErrorGameUninitialized;
        }
        self.phase = Phase::Init;
        self.pre_suspended_phase = None;
        self.rounds_played = 0;
        self.prize_card = None;
        if self.config.rotate_judge {
            self.judge = None;
        }
        self.winners.clear();
        self.submissions.clear();
        for player in &mut self.players {
            player.clear_hand();
            player.clear_points();
            player.reset_rounds_played();
            player.set_able_to_play(true);
        }
        debug!(players = self.players.len(), "Game restarted");
        if self.config.auto_start_round {
            let outcome = self.start_round();
            debug!(%outcome, "Auto-started first round");
        }
        Outcome::Success
    }
}
