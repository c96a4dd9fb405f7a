//! Off-ball movement: support runs and defensive recovery.

use rand::seq::SliceRandom;

use super::MatchEngine;
use crate::engine::field::FIELD;
use crate::engine::sink::EventSink;
use crate::engine::zone::Zone;
use crate::tactics::modifiers::is_in_final_third;

impl<S: EventSink> MatchEngine<S> {
    pub(crate) fn decide_without_ball(&mut self, idx: usize) {
        let side = self.roster[idx].side;
        match self.ball_carrier {
            Some(carrier) if self.roster[carrier].side == side => self.support_attack(idx, carrier),
            _ => self.defensive_positioning(idx),
        }
    }

    fn support_attack(&mut self, idx: usize, carrier: usize) {
        let ball_zone = self.roster[carrier].zone;
        let agent = &self.roster[idx];
        let team = agent.side;
        let position = agent.position;

        if agent.tactics.final_third_penetration {
            if !is_in_final_third(team, ball_zone) {
                if position.is_attacker() {
                    let free: Vec<Zone> = Zone::final_row(team)
                        .into_iter()
                        .filter(|&z| !self.is_occupied(z, Some(idx)))
                        .collect();
                    let preferred: Vec<Zone> =
                        free.iter().copied().filter(|&z| position.prefers_lane(z)).collect();
                    let pool = if preferred.is_empty() { free } else { preferred };
                    if let Some(&run) = pool.choose(&mut self.rng) {
                        self.roster[idx].zone = run;
                        return;
                    }
                }
            } else if let Some(zone) = FIELD
                .adjacent(ball_zone)
                .iter()
                .copied()
                .find(|&z| is_in_final_third(team, z) && !self.is_occupied(z, Some(idx)))
            {
                self.roster[idx].zone = zone;
                return;
            }
        }

        let free: Vec<Zone> = FIELD
            .adjacent(ball_zone)
            .iter()
            .copied()
            .filter(|&z| !self.is_occupied(z, Some(idx)))
            .collect();
        let target = free
            .iter()
            .copied()
            .find(|&z| position.prefers_lane(z))
            .or_else(|| free.first().copied());
        if let Some(zone) = target {
            self.roster[idx].zone = zone;
        }
    }

    /// Drop to the formation zone on the team's own goal row
    fn defensive_positioning(&mut self, idx: usize) {
        let agent = &mut self.roster[idx];
        agent.zone = agent.defensive_zone();
    }
}
