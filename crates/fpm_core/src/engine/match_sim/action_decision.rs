//! On-ball decision: eligible actions, tactical weights, one weighted draw.

use super::MatchEngine;
use crate::engine::field::FIELD;
use crate::engine::probability::{
    dribble_weight, estimate_dribble_success, expected_goals, pass_weight, shot_weight,
};
use crate::engine::sampler::WeightedSampler;
use crate::engine::sink::EventSink;
use crate::models::ActionType;
use crate::tactics::modifiers::{
    adjust_dribble_weight, adjust_pass_weight, adjust_shot_weight, is_final_third_entry,
    ActionContext,
};

/// Actions a ball carrier can choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnBallAction {
    Pass,
    Dribble,
    Shot,
}

impl OnBallAction {
    pub fn action_type(self) -> ActionType {
        match self {
            OnBallAction::Pass => ActionType::Pass,
            OnBallAction::Dribble => ActionType::Dribble,
            OnBallAction::Shot => ActionType::Shot,
        }
    }
}

impl<S: EventSink> MatchEngine<S> {
    /// Teammates of `idx` without the ball, roster order
    pub(crate) fn pass_targets(&self, idx: usize) -> Vec<usize> {
        let side = self.roster[idx].side;
        self.roster
            .iter()
            .filter(|p| p.side == side && p.id != idx && !p.has_ball)
            .map(|p| p.id)
            .collect()
    }

    /// Distance from player `idx` to the goal they attack
    pub(crate) fn distance_to_goal(&self, idx: usize) -> f32 {
        let agent = &self.roster[idx];
        FIELD.distance(agent.zone, FIELD.goal_zone(agent.side))
    }

    /// Situational facts for the tactical layer
    pub(crate) fn action_context(&self, idx: usize) -> ActionContext {
        let agent = &self.roster[idx];
        let team = agent.side;
        let zone = agent.zone;

        let entry_pass_available = self
            .pass_targets(idx)
            .iter()
            .any(|&t| is_final_third_entry(team, zone, self.roster[t].zone));
        let entry_dribble_available =
            FIELD.adjacent(zone).iter().any(|&to| is_final_third_entry(team, zone, to));

        let outlook = self.dribble_outlook(idx);
        let pressure = self.pressure_at(idx);

        ActionContext {
            team,
            zone,
            chain_length: self.chain_length_for(team),
            counter_clock: agent.counter_clock,
            entry_pass_available,
            entry_dribble_available,
            dribble_estimate: estimate_dribble_success(agent.skills.dribbling, &outlook),
            predicted_xg: expected_goals(
                agent.skills.shooting,
                agent.skills.finishing,
                self.distance_to_goal(idx),
                pressure,
            ),
        }
    }

    /// Weighted candidates for the carrier. Shot is only offered in the
    /// attacking half.
    pub(crate) fn action_weights(&self, idx: usize) -> Vec<(OnBallAction, f32)> {
        let agent = &self.roster[idx];
        let profile = &agent.tactics;
        let ctx = self.action_context(idx);

        let mut weights = vec![
            (
                OnBallAction::Pass,
                adjust_pass_weight(pass_weight(&agent.skills, agent.confidence), &ctx, profile),
            ),
            (
                OnBallAction::Dribble,
                adjust_dribble_weight(
                    dribble_weight(&agent.skills, agent.confidence),
                    &ctx,
                    profile,
                ),
            ),
        ];
        if FIELD.is_attacking(agent.zone, agent.side) {
            let base = shot_weight(&agent.skills, agent.confidence, self.distance_to_goal(idx));
            weights.push((OnBallAction::Shot, adjust_shot_weight(base, &ctx, profile)));
        }
        weights
    }

    pub(crate) fn decide_with_ball(&mut self, idx: usize) {
        let sampler = WeightedSampler::new(self.action_weights(idx));
        if let Some(action) = sampler.sample(&mut self.rng) {
            self.execute_action(idx, action);
        }
    }

    /// Run one action. The counter clock is consumed first; relabelling
    /// applies while it is still armed afterwards.
    pub(crate) fn execute_action(&mut self, idx: usize, action: OnBallAction) {
        let pressure = self.pressure_at(idx);
        let agent = &mut self.roster[idx];
        let counter_live = agent.tactics.counter_attack && agent.consume_counter_clock() > 0;

        match action {
            OnBallAction::Pass => self.attempt_pass(idx, pressure, counter_live),
            OnBallAction::Dribble => self.attempt_dribble(idx, pressure, counter_live),
            OnBallAction::Shot => self.attempt_shot(idx, pressure, counter_live),
        }
    }
}
