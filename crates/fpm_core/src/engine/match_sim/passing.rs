//! Pass execution and target selection.

use rand::Rng;

use super::MatchEngine;
use crate::engine::actions::{resolve_pass, PassContext, PassRolls};
use crate::engine::sink::EventSink;
use crate::engine::zone::Zone;
use crate::models::{ActionType, EventDetails, Outcome};
use crate::tactics::modifiers::{is_final_third_entry, pass_target_bonus};

const BASE_TARGET_SCORE: f32 = 0.5;
const FORWARD_TARGET_BONUS: f32 = 0.3;
const TARGET_PRESSURE_PENALTY: f32 = 0.1;
const ADVANCED_ROLE_BONUS: f32 = 0.2;

impl<S: EventSink> MatchEngine<S> {
    /// Pass to the best-scored teammate. Falls back to a dribble when nobody
    /// is available.
    pub(crate) fn attempt_pass(&mut self, idx: usize, pressure: u8, counter_live: bool) {
        let targets = self.pass_targets(idx);
        let Some(target) = self.choose_pass_target(idx, &targets) else {
            self.attempt_dribble(idx, pressure, counter_live);
            return;
        };

        let agent = &self.roster[idx];
        let team = agent.side;
        let from = agent.zone;
        let to = self.roster[target].zone;
        let profile = agent.tactics.clone();
        let ctx = PassContext { passing: agent.skills.passing, pressure };
        let rolls = PassRolls { success_roll: self.rng.gen() };
        let result = resolve_pass(&ctx, &rolls);

        let entry = result.success && is_final_third_entry(team, from, to);
        let marked_entry = entry && profile.final_third_penetration;
        let relabel = counter_live && entry;

        let mut details = EventDetails {
            target_player: Some(self.roster[target].jersey),
            ..Default::default()
        };
        if marked_entry {
            details.final_third_entry = true;
            details.tactical_bonus = Some(profile.tuning.final_third_bonus);
        }
        let action = if relabel {
            details.counter_attack = true;
            details.counter_attack_bonus = Some(profile.tuning.counter_attack_bonus);
            ActionType::Pass.counter_attack_variant()
        } else {
            ActionType::Pass
        };

        let event = self
            .player_event(idx, action, from, pressure, Outcome::from_success(result.success), 0.0)
            .with_details(details);
        self.emit_action(event);

        let agent = &mut self.roster[idx];
        agent.stats.passes_attempted += 1;
        agent.record_outcome(result.success);
        if !result.success {
            self.lose_ball(idx);
            return;
        }

        agent.stats.passes_completed += 1;
        if marked_entry {
            self.mark_final_third_entry(idx, from, to, ActionType::Pass);
        }
        self.transfer_ball(idx, target);
    }

    /// Highest-scoring candidate; the first one wins ties.
    pub(crate) fn choose_pass_target(&self, idx: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for &candidate in candidates {
            let score = self.pass_target_score(idx, candidate);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }
        best.map(|(candidate, _)| candidate)
    }

    pub(crate) fn pass_target_score(&self, idx: usize, candidate: usize) -> f32 {
        let passer = &self.roster[idx];
        let target = &self.roster[candidate];

        let mut score = BASE_TARGET_SCORE;
        score += pass_target_bonus(
            passer.side,
            passer.zone,
            target.zone,
            target.position,
            &passer.tactics,
        );
        if passer.side.is_forward(passer.zone, target.zone) {
            score += FORWARD_TARGET_BONUS;
        }
        score -= TARGET_PRESSURE_PENALTY * self.pressure_at(candidate) as f32;
        if target.position.is_advanced() {
            score += ADVANCED_ROLE_BONUS;
        }
        score
    }

    /// `FinalThirdEntry` marker following a successful entering action
    pub(crate) fn mark_final_third_entry(
        &mut self,
        idx: usize,
        from: Zone,
        to: Zone,
        kind: ActionType,
    ) {
        let bonus = self.roster[idx].tactics.tuning.final_third_bonus;
        let details = EventDetails {
            from_zone: Some(from),
            entry_kind: Some(kind),
            tactical_bonus: Some(bonus),
            ..Default::default()
        };
        let event = self
            .player_event(idx, ActionType::FinalThirdEntry, to, 0, Outcome::Success, 0.0)
            .with_details(details);
        self.emit_action(event);
        self.roster[idx].stats.final_third_entries += 1;
    }
}
