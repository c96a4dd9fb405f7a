//! Possession bookkeeping: minting ids, seeding the receiver, hand-overs.

use rand::seq::SliceRandom;

use super::{MatchEngine, Possession};
use crate::engine::sink::EventSink;
use crate::models::{ActionType, Outcome, PossessionId, TeamSide};

impl<S: EventSink> MatchEngine<S> {
    /// Start a possession for `team`.
    ///
    /// The receiver is `receiver` when given, else a random playmaker
    /// (CM/CDM/CAM/ST), else any teammate.
    pub(crate) fn start_possession(&mut self, team: TeamSide, receiver: Option<usize>) {
        let receiver = match receiver {
            Some(idx) => Some(idx),
            None => self.pick_receiver(team),
        };
        let Some(receiver) = receiver else {
            log::debug!("no receiver available for {}", team);
            return;
        };

        self.possession_count += 1;
        let id = PossessionId { step: self.clock.step, team, seq: self.possession_count };
        self.possession = Some(Possession { id, team, chain_length: 0 });

        if let Some(previous) = self.ball_carrier.take() {
            self.roster[previous].has_ball = false;
        }
        let agent = &mut self.roster[receiver];
        agent.has_ball = true;
        self.ball_carrier = Some(receiver);
        self.ball_zone = agent.zone;
        let zone = agent.zone;

        log::trace!("possession {} to {} #{}", id, team, self.roster[receiver].jersey);
        let event =
            self.player_event(receiver, ActionType::PossessionStart, zone, 0, Outcome::Success, 0.0);
        self.emit_event(event);
    }

    fn pick_receiver(&mut self, team: TeamSide) -> Option<usize> {
        let playmakers: Vec<usize> = self
            .roster
            .iter()
            .filter(|p| p.side == team && p.position.is_playmaker())
            .map(|p| p.id)
            .collect();
        if !playmakers.is_empty() {
            return playmakers.choose(&mut self.rng).copied();
        }
        let team_players: Vec<usize> =
            self.roster.iter().filter(|p| p.side == team).map(|p| p.id).collect();
        team_players.choose(&mut self.rng).copied()
    }

    /// Emit `PossessionEnd` for player `idx` without starting a new possession
    pub(crate) fn close_possession(&mut self, idx: usize, reason: Outcome) {
        let zone = self.roster[idx].zone;
        let event = self.player_event(idx, ActionType::PossessionEnd, zone, 0, reason, 0.0);
        self.emit_event(event);
    }

    /// Close the possession and hand a fresh one to the opponents
    pub(crate) fn end_possession(&mut self, idx: usize, reason: Outcome) {
        self.close_possession(idx, reason);
        let opponent = self.roster[idx].side.opponent();
        self.start_possession(opponent, None);
    }

    /// Player `idx` loses the ball: possession ends with reason `Lost`
    pub(crate) fn lose_ball(&mut self, idx: usize) {
        self.release_ball(idx);
        self.end_possession(idx, Outcome::Lost);
    }

    pub(crate) fn release_ball(&mut self, idx: usize) {
        self.roster[idx].has_ball = false;
        if self.ball_carrier == Some(idx) {
            self.ball_carrier = None;
        }
    }

    /// Hand the ball from the current carrier to `to`, inside the same possession
    pub(crate) fn transfer_ball(&mut self, from: usize, to: usize) {
        self.release_ball(from);
        let target = &mut self.roster[to];
        target.has_ball = true;
        self.ball_zone = target.zone;
        self.ball_carrier = Some(to);
    }
}
