//! Player lifecycle: joining, leaving, presence, nicks and bans.

use tracing::debug;

use super::engine::Game;
use super::phase::Phase;
use crate::cards::PlayedCard;
use crate::core::{Outcome, Player};
use crate::events::GameEventListener;

impl<L: GameEventListener> Game<L> {
    /// Join with `id`, using `nick` as the display name (defaults to the id).
    pub fn join(&mut self, id: &str, nick: Option<&str>) -> Outcome {
        self.join_with(id, nick, false)
    }

    /// Join, optionally with the capability to inject cards into one's own
    /// hand (see [`Game::add_card_to_hand`]).
    ///
    /// Rejoining with an id that is already seated is `NoEffect` and leaves
    /// the nick unchanged.
    pub fn join_with(&mut self, id: &str, nick: Option<&str>, can_cheat: bool) -> Outcome {
        if id.trim().is_empty() {
            return Outcome::ErrorInvalidParameter;
        }
        if self.is_over()
            || (self.is_started() && !self.config.players_can_join_during_game)
            || self.banned_ids.contains(id)
        {
            return Outcome::ErrorProhibited;
        }
        let seated = self.index_of(id).is_some();
        if self.players.len() >= self.config.max_players {
            return if seated { Outcome::NoEffect } else { Outcome::ErrorProhibited };
        }
        if seated {
            return Outcome::NoEffect;
        }
        let nick = nick.unwrap_or(id);
        if nick.trim().is_empty() || self.nicks.contains(nick) {
            return Outcome::ErrorInvalidParameter;
        }

        let mut player = Player::new(id, Some(nick), can_cheat);
        if self.is_round_in_progress() {
            player.set_able_to_play(false);
        }
        self.nicks.insert(nick.to_string());
        self.players.push(player);
        let index = self.players.len() - 1;
        debug!(player = %id, nick, players = self.players.len(), "Player joined");
        self.listener.player_joined(&self.players[index]);

        let count = self.players.len();
        if count == self.config.min_players {
            self.listener.minimum_players_joined(&self.players);
        }
        if count == self.config.max_players {
            self.listener.maximum_players_joined(&self.players);
        }

        if !self.config.fix_points_at_start {
            self.recompute_points_needed_to_win();
        }
        if self.is_suspended() && self.can_resume() {
            self.resume(Some(index));
        }
        if self.config.auto_start_round && self.phase == Phase::Init && count >= self.config.min_players {
            let outcome = self.start_round();
            debug!(%outcome, "Auto-started first round");
        }
        Outcome::Success
    }

    /// Remove a player. The judge cannot leave.
    pub fn leave(&mut self, id: &str) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if (self.is_started() && !self.config.players_can_leave_during_game) || self.is_judge(id) {
            return Outcome::ErrorProhibited;
        }

        let player = self.players.remove(index);
        self.nicks.remove(player.nick());
        self.submissions.retain(|s| s.player_id != id);
        self.reopen_emptied_judgement();
        debug!(player = %id, players = self.players.len(), "Player left");
        self.listener.player_left(&player);

        if !self.config.fix_points_at_start {
            self.recompute_points_needed_to_win();
        }
        if self.players.len() < self.config.min_players {
            self.listener.not_enough_players(&self.players);
            if self.is_started() && !self.config.players_can_join_during_game {
                self.check_for_game_winner(true);
            }
        } else if self.active_count() < self.config.min_players && self.enter_suspension() {
            self.listener.play_suspended(Some(&player));
        }
        self.check_for_judgement_phase();
        Outcome::Success
    }

    /// Mark a player as away. Suspends play if they are the judge or too
    /// few active players remain.
    pub fn inactivate(&mut self, id: &str) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if !self.players[index].set_active(false) {
            return Outcome::NoEffect;
        }
        debug!(player = %id, "Player inactivated");
        self.listener.player_inactivated(&self.players[index]);

        if (self.is_judge(id) || self.active_count() < self.config.min_players) && self.enter_suspension() {
            self.listener.play_suspended(Some(&self.players[index]));
        }
        self.check_for_judgement_phase();
        Outcome::Success
    }

    /// Mark a player as present again. Resumes suspended play if the judge
    /// is active and enough players are.
    pub fn activate(&mut self, id: &str) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if !self.players[index].set_active(true) {
            return Outcome::NoEffect;
        }
        debug!(player = %id, "Player activated");
        self.listener.player_activated(&self.players[index]);

        if self.is_suspended() && self.can_resume() {
            self.resume(Some(index));
        }
        Outcome::Success
    }

    /// Pause a started game that lacks active players or an active judge.
    pub fn suspend_play(&mut self) -> Outcome {
        if !self.is_started() {
            return Outcome::ErrorProhibited;
        }
        if self.is_suspended() {
            return Outcome::NoEffect;
        }
        let judge_inactive = self.current_judge().is_some_and(|j| !j.is_active());
        if !judge_inactive && self.active_count() >= self.config.min_players {
            return Outcome::ErrorProhibited;
        }
        if self.enter_suspension() {
            self.listener.play_suspended(None);
        }
        Outcome::Success
    }

    /// Resume a suspended game once the judge and enough players are active.
    pub fn resume_play(&mut self) -> Outcome {
        if !self.is_suspended() {
            return Outcome::NoEffect;
        }
        if !self.can_resume() {
            return Outcome::ErrorProhibited;
        }
        self.resume(None);
        Outcome::Success
    }

    /// Kick `id` if seated (unless they judge) and keep them from joining.
    pub fn ban(&mut self, id: &str) -> Outcome {
        if id.trim().is_empty() {
            return Outcome::ErrorInvalidParameter;
        }
        if self.index_of(id).is_some() {
            let outcome = self.leave(id);
            debug!(player = %id, %outcome, "Kicked banned player");
        }
        if self.banned_ids.insert(id.to_string()) {
            debug!(player = %id, "Player banned");
            Outcome::Success
        } else {
            Outcome::NoEffect
        }
    }

    pub fn unban(&mut self, id: &str) -> Outcome {
        if self.banned_ids.remove(id) {
            debug!(player = %id, "Player unbanned");
            Outcome::Success
        } else {
            Outcome::NoEffect
        }
    }

    /// Change a player's nick. Nicks are unique and case-sensitive.
    pub fn change_nick(&mut self, id: &str, new_nick: &str) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if new_nick.trim().is_empty() {
            return Outcome::ErrorInvalidParameter;
        }
        if self.players[index].nick() == new_nick {
            return Outcome::NoEffect;
        }
        if self.nicks.contains(new_nick) {
            return Outcome::ErrorProhibited;
        }
        let old_nick = self.players[index].set_nick(new_nick);
        self.nicks.remove(&old_nick);
        self.nicks.insert(new_nick.to_string());
        debug!(player = %id, old_nick = %old_nick, new_nick, "Player changed nick");
        self.listener.player_nick_changed(&self.players[index], &old_nick);
        Outcome::Success
    }

    /// Put an arbitrary card into a player's hand. Only players who joined
    /// with the capability may do this.
    pub fn add_card_to_hand(&mut self, id: &str, card: PlayedCard) -> Outcome {
        let Some(index) = self.index_of(id) else {
            return Outcome::ErrorInvalidParameter;
        };
        if !self.players[index].can_cheat() {
            return Outcome::ErrorProhibited;
        }
        debug!(player = %id, card = %card, "Card injected into hand");
        self.players[index].deal_card(card.clone());
        self.listener.played_card_dealt(&self.players[index], &card);
        Outcome::Success
    }

    /// Enter `Suspended`, remembering the current phase. Returns false if
    /// the game is not started or already suspended.
    pub(super) fn enter_suspension(&mut self) -> bool {
        if !self.is_started() || self.is_suspended() {
            return false;
        }
        debug!(phase = %self.phase, "Play suspended");
        self.pre_suspended_phase = Some(self.phase);
        self.phase = Phase::Suspended;
        true
    }

    /// Send a round with no submissions left back to `RoundPlay`, directly
    /// or as the phase a suspension will restore.
    pub(super) fn reopen_emptied_judgement(&mut self) {
        if !self.submissions.is_empty() {
            return;
        }
        if self.phase == Phase::RoundJudge {
            debug!("Last submission withdrawn, back to play");
            self.phase = Phase::RoundPlay;
        } else if self.pre_suspended_phase == Some(Phase::RoundJudge) {
            self.pre_suspended_phase = Some(Phase::RoundPlay);
        }
    }

    pub(super) fn can_resume(&self) -> bool {
        self.active_count() >= self.config.min_players && self.current_judge().is_some_and(Player::is_active)
    }

    /// Restore the interrupted phase. `responsible` indexes the player whose
    /// arrival allowed play to continue.
    pub(super) fn resume(&mut self, responsible: Option<usize>) {
        let phase = self.pre_suspended_phase.take().unwrap_or(Phase::RoundPlay);
        debug!(%phase, "Play resumed");
        self.phase = phase;
        self.listener.play_resumed(responsible.and_then(|i| self.players.get(i)));
        self.check_for_judgement_phase();
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{game_with, small_config, started_game, submit_all};
    use crate::core::{GameConfig, Outcome, PointsSchedule};
    use crate::events::GameEvent;
    use crate::game::Phase;

    #[test]
    fn test_join_rejects_blank_id() {
        let mut game = game_with(small_config());
        assert_eq!(game.join("", None), Outcome::ErrorInvalidParameter);
        assert_eq!(game.join("   ", None), Outcome::ErrorInvalidParameter);
        assert!(game.players().is_empty());
        assert!(game.listener().events().is_empty());
    }

    #[test]
    fn test_join_nick_rules() {
        let mut game = game_with(small_config());
        assert_eq!(game.join("p1", Some("Ace")), Outcome::Success);
        assert_eq!(game.join("p2", Some("Ace")), Outcome::ErrorInvalidParameter);
        assert_eq!(game.join("p2", Some("ace")), Outcome::Success);
        assert_eq!(game.join("p3", Some(" ")), Outcome::ErrorInvalidParameter);
        assert_eq!(game.join("p1", Some("Other")), Outcome::NoEffect);
        assert_eq!(game.player("p1").map(|p| p.nick()), Some("Ace"));
        assert_eq!(game.players().len(), 2);
    }

    #[test]
    fn test_join_capacity() {
        let mut game = game_with(small_config());
        for id in ["p1", "p2", "p3", "p4"] {
            assert_eq!(game.join(id, None), Outcome::Success);
        }
        assert_eq!(game.join("p5", None), Outcome::ErrorProhibited);
        assert_eq!(game.join("p2", None), Outcome::NoEffect);
        assert_eq!(game.listener().count("maximum_players_joined"), 1);
        assert_eq!(game.listener().count("minimum_players_joined"), 1);
    }

    #[test]
    fn test_minimum_event_fires_again_after_dip() {
        let mut game = game_with(small_config());
        for id in ["p1", "p2", "p3"] {
            assert_eq!(game.join(id, None), Outcome::Success);
        }
        assert_eq!(game.leave("p3"), Outcome::Success);
        assert_eq!(game.listener().count("not_enough_players"), 1);
        assert_eq!(game.join("p3", None), Outcome::Success);
        assert_eq!(game.listener().count("minimum_players_joined"), 2);
    }

    #[test]
    fn test_banned_player_cannot_join() {
        let mut game = game_with(small_config());
        assert_eq!(game.join("p1", None), Outcome::Success);
        assert_eq!(game.ban("p1"), Outcome::Success);
        assert!(game.player("p1").is_none());
        assert_eq!(game.ban("p1"), Outcome::NoEffect);
        assert_eq!(game.ban(""), Outcome::ErrorInvalidParameter);
        assert_eq!(game.join("p1", None), Outcome::ErrorProhibited);
        assert_eq!(game.banned_ids(), vec!["p1"]);

        assert_eq!(game.unban("p1"), Outcome::Success);
        assert_eq!(game.unban("p1"), Outcome::NoEffect);
        assert_eq!(game.join("p1", None), Outcome::Success);
    }

    #[test]
    fn test_join_disallowed_mid_game() {
        let config = small_config().with_join_during_game(false);
        let mut game = started_game(config, &["p1", "p2", "p3"]);
        assert_eq!(game.join("p4", None), Outcome::ErrorProhibited);
    }

    #[test]
    fn test_mid_round_joiner_sits_out() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3"]);
        assert_eq!(game.join("p4", None), Outcome::Success);
        let p4 = game.player("p4").unwrap();
        assert!(!p4.is_able_to_play());
        assert!(p4.hand().is_empty());

        submit_all(&mut game);
        assert_eq!(game.phase(), Phase::RoundJudge);
    }

    #[test]
    fn test_threshold_follows_player_count() {
        let config = GameConfig::new()
            .with_players(3, 12)
            .with_fixed_points_at_start(false)
            .with_auto_start(false)
            .with_points_schedule(PointsSchedule::Official);
        let mut game = game_with(config);
        for id in ["p1", "p2", "p3", "p4", "p5"] {
            assert_eq!(game.join(id, None), Outcome::Success);
        }
        assert_eq!(game.points_needed_to_win(), 7);
        assert_eq!(game.leave("p5"), Outcome::Success);
        assert_eq!(game.points_needed_to_win(), 8);
        assert!(game.listener().events().contains(&GameEvent::PointsNeededToWinChanged {
            new_points: 7,
            old_points: 8
        }));
    }

    #[test]
    fn test_judge_cannot_leave() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3"]);
        assert_eq!(game.current_judge().map(|j| j.id()), Some("p1"));
        assert_eq!(game.leave("p1"), Outcome::ErrorProhibited);
        assert_eq!(game.leave("nobody"), Outcome::ErrorInvalidParameter);
    }

    #[test]
    fn test_leave_discards_submission() {
        let mut game = started_game(small_config().with_players(3, 4), &["p1", "p2", "p3", "p4"]);
        let card = game.player("p2").unwrap().hand()[0].clone();
        assert_eq!(game.play("p2", &card), Outcome::Success);
        assert_eq!(game.submissions().len(), 1);

        assert_eq!(game.leave("p2"), Outcome::Success);
        assert!(game.submissions().is_empty());
        assert!(game.player_by_nick("p2").is_none());
        assert_eq!(game.phase(), Phase::RoundPlay);
    }

    #[test]
    fn test_leave_below_minimum_forces_winner_when_closed() {
        let config = small_config().with_join_during_game(false);
        let mut game = started_game(config, &["p1", "p2", "p3"]);
        assert_eq!(game.leave("p3"), Outcome::Success);
        assert!(game.is_over());
        assert_eq!(game.winners().len(), 2);
        assert_eq!(game.listener().count("game_won_by_multiple_players"), 1);
    }

    #[test]
    fn test_inactive_judge_suspends_and_returns() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3"]);
        assert_eq!(game.inactivate("p1"), Outcome::Success);
        assert_eq!(game.inactivate("p1"), Outcome::NoEffect);
        assert!(game.is_suspended());
        assert_eq!(game.resume_play(), Outcome::ErrorProhibited);

        assert_eq!(game.activate("p1"), Outcome::Success);
        assert_eq!(game.activate("p1"), Outcome::NoEffect);
        assert_eq!(game.phase(), Phase::RoundPlay);
        assert_eq!(
            game.listener().names(),
            vec!["player_inactivated", "play_suspended", "player_activated", "play_resumed"]
        );
    }

    #[test]
    fn test_inactive_player_never_blocks_judgement() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3", "p4"]);
        assert_eq!(game.inactivate("p4"), Outcome::Success);
        assert!(!game.is_suspended());

        let card = game.player("p2").unwrap().hand()[0].clone();
        assert_eq!(game.play("p2", &card), Outcome::Success);
        assert_eq!(game.phase(), Phase::RoundPlay);
        let card = game.player("p3").unwrap().hand()[0].clone();
        assert_eq!(game.play("p3", &card), Outcome::Success);
        assert_eq!(game.phase(), Phase::RoundJudge);
        assert_eq!(game.players_who_have_not_played().len(), 1);
    }

    #[test]
    fn test_inactivating_last_pending_player_opens_judging() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3", "p4"]);
        for id in ["p2", "p3"] {
            let card = game.player(id).unwrap().hand()[0].clone();
            assert_eq!(game.play(id, &card), Outcome::Success);
        }
        assert_eq!(game.inactivate("p4"), Outcome::Success);
        assert_eq!(game.phase(), Phase::RoundJudge);
    }

    #[test]
    fn test_suspend_play_guards() {
        let mut game = game_with(small_config());
        assert_eq!(game.suspend_play(), Outcome::ErrorProhibited);
        assert_eq!(game.resume_play(), Outcome::NoEffect);

        let mut game = started_game(small_config(), &["p1", "p2", "p3"]);
        assert_eq!(game.suspend_play(), Outcome::ErrorProhibited);

        assert_eq!(game.inactivate("p3"), Outcome::Success);
        assert!(game.is_suspended());
        assert_eq!(game.suspend_play(), Outcome::NoEffect);
    }

    #[test]
    fn test_join_resumes_suspended_play() {
        let mut game = started_game(small_config(), &["p1", "p2", "p3"]);
        assert_eq!(game.inactivate("p3"), Outcome::Success);
        assert!(game.is_suspended());

        assert_eq!(game.join("p4", None), Outcome::Success);
        assert_eq!(game.phase(), Phase::RoundPlay);
        assert!(game.listener().events().contains(&GameEvent::PlayResumed {
            player: Some("p4".to_string())
        }));
    }

    #[test]
    fn test_change_nick() {
        let mut game = game_with(small_config());
        assert_eq!(game.join("p1", None), Outcome::Success);
        assert_eq!(game.join("p2", Some("Bee")), Outcome::Success);

        assert_eq!(game.change_nick("p1", "p1"), Outcome::NoEffect);
        assert_eq!(game.change_nick("p1", "Bee"), Outcome::ErrorProhibited);
        assert_eq!(game.change_nick("p1", ""), Outcome::ErrorInvalidParameter);
        assert_eq!(game.change_nick("p9", "Zed"), Outcome::ErrorInvalidParameter);
        assert_eq!(game.change_nick("p1", "Ace"), Outcome::Success);

        assert_eq!(game.player("p1").map(|p| p.nick()), Some("Ace"));
        assert_eq!(game.join("p3", Some("p1")), Outcome::Success);
        assert_eq!(game.join("p4", Some("Ace")), Outcome::ErrorInvalidParameter);
    }

    #[test]
    fn test_cheat_capability() {
        let mut game = game_with(small_config());
        assert_eq!(game.join_with("cheater", None, true), Outcome::Success);
        assert_eq!(game.join("honest", None), Outcome::Success);

        let card = crate::cards::PlayedCard::new("Loaded Dice").unwrap();
        assert_eq!(game.add_card_to_hand("honest", card.clone()), Outcome::ErrorProhibited);
        assert_eq!(game.add_card_to_hand("cheater", card.clone()), Outcome::Success);
        assert_eq!(game.player("cheater").unwrap().hand(), &[card]);
    }

    #[test]
    fn test_auto_start_on_minimum() {
        let mut game = game_with(small_config().with_auto_start(true));
        assert_eq!(game.join("p1", None), Outcome::Success);
        assert_eq!(game.join("p2", None), Outcome::Success);
        assert_eq!(game.phase(), Phase::Init);
        assert_eq!(game.join("p3", None), Outcome::Success);
        assert_eq!(game.phase(), Phase::RoundPlay);
        assert!(game.players().iter().all(|p| p.hand().len() == 2));
    }
}
