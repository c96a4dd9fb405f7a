//! Dribbles: success model, destination choice and the space estimate.

use rand::seq::SliceRandom;
use rand::Rng;

use super::MatchEngine;
use crate::engine::actions::{resolve_dribble, DribbleContext, DribbleRolls};
use crate::engine::field::FIELD;
use crate::engine::probability::{final_third_potential, opponent_density, DribbleOutlook};
use crate::engine::sink::EventSink;
use crate::engine::zone::{Zone, COLUMN_COUNT};
use crate::models::{ActionType, EventDetails, Outcome};
use crate::tactics::modifiers::{is_final_third_entry, is_in_final_third};

impl<S: EventSink> MatchEngine<S> {
    pub(crate) fn attempt_dribble(&mut self, idx: usize, pressure: u8, counter_live: bool) {
        let agent = &self.roster[idx];
        let team = agent.side;
        let from = agent.zone;
        let profile = agent.tactics.clone();
        let ctx = DribbleContext {
            dribbling: agent.skills.dribbling,
            pressure,
            model: profile.dribble_model,
            outlook: self.dribble_outlook(idx),
        };
        let rolls = DribbleRolls { success_roll: self.rng.gen() };
        let result = resolve_dribble(&ctx, &rolls);

        let destination = if result.success { self.choose_dribble_destination(idx) } else { None };
        let entry = destination.is_some_and(|to| is_final_third_entry(team, from, to));
        let marked_entry = entry && profile.final_third_penetration;

        let mut details = EventDetails::default();
        if profile.final_third_penetration {
            if entry {
                details.final_third_entry = true;
                details.tactical_bonus = Some(profile.tuning.final_third_bonus);
            } else if is_in_final_third(team, from) {
                details.final_third_play = true;
                details.tactical_bonus =
                    Some(profile.tuning.final_third_bonus * profile.tuning.final_third_play_share);
            }
        }
        let action = if counter_live && entry {
            details.counter_attack = true;
            details.counter_attack_bonus = Some(profile.tuning.counter_attack_bonus);
            ActionType::Dribble.counter_attack_variant()
        } else {
            ActionType::Dribble
        };

        let event = self
            .player_event(idx, action, from, pressure, Outcome::from_success(result.success), 0.0)
            .with_details(details);
        self.emit_action(event);

        let agent = &mut self.roster[idx];
        agent.stats.dribbles_attempted += 1;
        agent.record_outcome(result.success);
        if !result.success {
            self.lose_ball(idx);
            return;
        }
        agent.stats.dribbles_completed += 1;

        if let Some(to) = destination {
            if marked_entry {
                self.mark_final_third_entry(idx, from, to, ActionType::Dribble);
            }
            self.roster[idx].zone = to;
            self.ball_zone = to;
        }
    }

    /// Next zone for a successful dribble.
    ///
    /// With final-third penetration: an entry zone when one is adjacent, else
    /// a final-row zone (central lanes first) when already in the final third.
    /// Otherwise a random forward zone, or any adjacent zone.
    pub(crate) fn choose_dribble_destination(&mut self, idx: usize) -> Option<Zone> {
        let agent = &self.roster[idx];
        let team = agent.side;
        let from = agent.zone;
        let adjacent = FIELD.adjacent(from);
        if adjacent.is_empty() {
            return None;
        }

        if agent.tactics.final_third_penetration {
            let entries: Vec<Zone> =
                adjacent.iter().copied().filter(|&to| is_final_third_entry(team, from, to)).collect();
            if !entries.is_empty() {
                return entries.choose(&mut self.rng).copied();
            }

            if is_in_final_third(team, from) {
                let final_row: Vec<Zone> =
                    adjacent.iter().copied().filter(|&to| is_in_final_third(team, to)).collect();
                let central: Vec<Zone> =
                    final_row.iter().copied().filter(|z| z.is_central_lane()).collect();
                let pool = if central.is_empty() { final_row } else { central };
                if !pool.is_empty() {
                    return pool.choose(&mut self.rng).copied();
                }
            }
        }

        let forward: Vec<Zone> =
            adjacent.iter().copied().filter(|&to| team.is_forward(from, to)).collect();
        if forward.is_empty() {
            adjacent.choose(&mut self.rng).copied()
        } else {
            forward.choose(&mut self.rng).copied()
        }
    }

    /// Inputs for the context-aware dribble estimate at player `idx`
    pub(crate) fn dribble_outlook(&self, idx: usize) -> DribbleOutlook {
        let agent = &self.roster[idx];
        let team = agent.side;
        let zone = agent.zone;
        let adjacent = FIELD.adjacent(zone);

        let nearby = self
            .opponent_zones(team)
            .filter(|z| *z == zone || adjacent.contains(z))
            .count();

        let ahead_row = team.row_ahead(zone.row()).unwrap_or(zone.row());
        let col = zone.col();
        let ahead: Vec<Zone> = (col.saturating_sub(1).max(1)..=(col + 1).min(COLUMN_COUNT))
            .filter_map(|c| Zone::new(ahead_row, c))
            .collect();
        let free = ahead.iter().filter(|&&z| !self.is_occupied(z, None)).count();
        let space_ahead = if ahead.is_empty() { 0.0 } else { free as f32 / ahead.len() as f32 };

        DribbleOutlook {
            density: opponent_density(nearby),
            space_ahead,
            pressure: self.pressure_at(idx),
            final_third_potential: final_third_potential(team.rows_to_final_third(zone.row())),
        }
    }
}
