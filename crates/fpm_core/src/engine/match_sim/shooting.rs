//! Shots, goals and the shot-quality feedback loop.

use rand::Rng;

use super::MatchEngine;
use crate::engine::actions::{resolve_shot, ShotContext, ShotRolls};
use crate::engine::sink::EventSink;
use crate::models::{ActionType, EventDetails, Outcome, Position, TeamSide};
use crate::tactics::modifiers::{is_in_final_third, is_key_chance, shot_quality_reward};

impl<S: EventSink> MatchEngine<S> {
    pub(crate) fn attempt_shot(&mut self, idx: usize, pressure: u8, counter_live: bool) {
        let distance = self.distance_to_goal(idx);
        let agent = &self.roster[idx];
        let team = agent.side;
        let zone = agent.zone;
        let profile = agent.tactics.clone();
        let ctx = ShotContext {
            shooting: agent.skills.shooting,
            finishing: agent.skills.finishing,
            distance_to_goal: distance,
            pressure,
        };
        let rolls = ShotRolls { on_target_roll: self.rng.gen(), goal_roll: self.rng.gen() };
        let shot = resolve_shot(&ctx, &rolls);

        let tuning = &profile.tuning;
        let in_final_third = is_in_final_third(team, zone);
        let reward = shot_quality_reward(shot.xg, shot.on_target, shot.is_goal, tuning);

        let mut details = EventDetails::default();
        if profile.final_third_penetration {
            if is_key_chance(team, zone) {
                details.key_chance = true;
                details.tactical_bonus = Some(tuning.key_chance_bonus);
            } else if in_final_third {
                details.final_third_play = true;
                details.tactical_bonus = Some(tuning.final_third_bonus);
            }
        }
        if profile.shot_selection {
            details.shot_quality_reward = Some(reward);
            details.on_target = Some(shot.on_target);
        }
        let action = if counter_live && in_final_third {
            details.counter_attack = true;
            details.counter_attack_bonus = Some(tuning.counter_shot_bonus());
            ActionType::Shot.counter_attack_variant()
        } else {
            ActionType::Shot
        };

        let outcome = if shot.is_goal {
            Outcome::Goal
        } else if shot.on_target {
            Outcome::OnTarget
        } else {
            Outcome::Failure
        };
        let event =
            self.player_event(idx, action, zone, pressure, outcome, shot.xg).with_details(details);
        self.emit_action(event);

        let agent = &mut self.roster[idx];
        agent.stats.shots += 1;
        if shot.on_target {
            agent.stats.shots_on_target += 1;
        }
        if profile.shot_selection {
            agent.shot_quality_score += reward;
            agent.last_shot_reward = reward;
            if shot.xg < tuning.low_xg_threshold {
                agent.stats.low_xg_shots += 1;
            }
            if shot.xg >= tuning.low_xg_threshold || shot.on_target {
                agent.stats.quality_shots += 1;
            }
        }
        agent.record_outcome(shot.is_goal);

        if shot.is_goal {
            agent.stats.goals += 1;
            self.score.add_goal(team);
            log::debug!(
                "goal {} #{} at {:02}:{:02}, xg {:.2}",
                team,
                self.roster[idx].jersey,
                self.clock.minute,
                self.clock.second,
                shot.xg
            );
            let event = self.player_event(idx, ActionType::Goal, zone, 0, Outcome::Success, 0.0);
            self.emit_event(event);
            self.release_ball(idx);
            self.end_possession(idx, Outcome::Goal);
            return;
        }

        if shot.on_target {
            self.credit_save(team.opponent());
        }
        self.lose_ball(idx);
    }

    /// On-target shot kept out: the defending goalkeeper gets the save
    fn credit_save(&mut self, keeper_side: TeamSide) {
        if let Some(keeper) = self
            .roster
            .iter_mut()
            .find(|p| p.side == keeper_side && p.position == Position::GK)
        {
            keeper.stats.saves += 1;
        }
    }
}
