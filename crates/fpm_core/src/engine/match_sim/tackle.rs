//! Defensive challenges and exogenous incidents.

use rand::seq::SliceRandom;
use rand::Rng;

use super::MatchEngine;
use crate::engine::actions::{resolve_challenge, ChallengeContext, ChallengeKind, ChallengeRolls};
use crate::engine::field::FIELD;
use crate::engine::sink::EventSink;
use crate::models::{ActionType, Outcome};

const EXOGENOUS_KINDS: [ActionType; 4] = [
    ActionType::Foul,
    ActionType::Interception,
    ActionType::Clearance,
    ActionType::BallRecovery,
];

impl<S: EventSink> MatchEngine<S> {
    /// Log a random incident by a random player. It never changes possession.
    pub(crate) fn exogenous_event(&mut self) {
        if self.roster.is_empty() {
            return;
        }
        let Some(&action) = EXOGENOUS_KINDS.choose(&mut self.rng) else {
            return;
        };
        let idx = self.rng.gen_range(0..self.roster.len());
        let pressure = self.rng.gen_range(0..=1u8);
        let outcome = Outcome::from_success(self.rng.gen_bool(0.5));

        let zone = self.roster[idx].zone;
        let event = self.player_event(idx, action, zone, pressure, outcome, 0.0);
        self.emit_event(event);

        let stats = &mut self.roster[idx].stats;
        match action {
            ActionType::Foul => stats.fouls += 1,
            ActionType::Interception => stats.interceptions += 1,
            ActionType::BallRecovery => stats.ball_recoveries += 1,
            _ => {}
        }
    }

    /// A random nearby opponent challenges the carrier
    pub(crate) fn defensive_challenge(&mut self) {
        let Some(carrier) = self.ball_carrier else {
            return;
        };
        let carrier_side = self.roster[carrier].side;
        let carrier_zone = self.roster[carrier].zone;
        let adjacent = FIELD.adjacent(carrier_zone);

        let defenders: Vec<usize> = self
            .roster
            .iter()
            .filter(|p| p.side != carrier_side)
            .filter(|p| p.zone == carrier_zone || adjacent.contains(&p.zone))
            .map(|p| p.id)
            .collect();
        let Some(&defender) = defenders.choose(&mut self.rng) else {
            return;
        };

        let kind = if self.rng.gen_bool(0.5) {
            ChallengeKind::Tackle
        } else {
            ChallengeKind::Interception
        };
        let skills = self.roster[defender].skills;
        let ctx = ChallengeContext { kind, tackling: skills.tackling, positioning: skills.positioning };
        let result = resolve_challenge(&ctx, &ChallengeRolls { success_roll: self.rng.gen() });

        self.apply_challenge(defender, carrier, kind, result.success);
    }

    /// Log a resolved challenge and, on success, hand the ball to the defender.
    ///
    /// A won interception arms the defender's counter-attack clock when the
    /// team plays on the counter.
    pub(crate) fn apply_challenge(
        &mut self,
        defender: usize,
        carrier: usize,
        kind: ChallengeKind,
        success: bool,
    ) {
        let zone = self.roster[defender].zone;
        let pressure = self.pressure_at(defender);
        let event = self.player_event(
            defender,
            kind.action_type(),
            zone,
            pressure,
            Outcome::from_success(success),
            0.0,
        );
        self.emit_event(event);

        let agent = &mut self.roster[defender];
        match kind {
            ChallengeKind::Tackle => agent.stats.tackles += 1,
            ChallengeKind::Interception => agent.stats.interceptions += 1,
        }
        if !success {
            return;
        }

        self.release_ball(carrier);
        self.close_possession(carrier, Outcome::Lost);
        let side = self.roster[defender].side;
        self.start_possession(side, Some(defender));

        let agent = &mut self.roster[defender];
        if kind == ChallengeKind::Interception && agent.tactics.counter_attack {
            agent.arm_counter_attack();
            log::debug!("counter-attack armed for {} #{}", agent.side, agent.jersey);
        }
    }
}
