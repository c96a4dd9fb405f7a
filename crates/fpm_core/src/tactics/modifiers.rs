//! Tactical weight modifiers
//!
//! Pure functions that bend the base action weights according to a team's
//! [`TacticalProfile`]. Nothing here draws random numbers; callers gather the
//! situational facts into an [`ActionContext`] first.

use super::profile::{TacticalProfile, TacticalTuning};
use crate::engine::field::FIELD;
use crate::engine::zone::Zone;
use crate::models::{Position, TeamSide};

/// Weight floor applied after all modifiers
pub const MIN_ACTION_WEIGHT: f32 = 0.1;

// ============================================================================
// Zone predicates
// ============================================================================

/// Entering the final row from one or two rows short of it.
pub fn is_final_third_entry(team: TeamSide, from: Zone, to: Zone) -> bool {
    let rows_left = team.rows_to_final_third(from.row());
    (1..=2).contains(&rows_left) && to.row() == team.attacking_row()
}

pub fn is_in_final_third(team: TeamSide, zone: Zone) -> bool {
    FIELD.is_final_third(zone, team)
}

/// Central final-row zone
pub fn is_key_chance(team: TeamSide, zone: Zone) -> bool {
    is_in_final_third(team, zone) && zone.is_central_lane()
}

// ============================================================================
// Action weights
// ============================================================================

/// Situational facts for weighting one on-ball decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext {
    pub team: TeamSide,
    pub zone: Zone,
    /// Pass/Dribble/Shot actions already taken in this possession
    pub chain_length: u32,
    /// Counter-attack clock before this action consumes it
    pub counter_clock: u8,
    /// Some pass target would enter the final third
    pub entry_pass_available: bool,
    /// Some adjacent zone would enter the final third
    pub entry_dribble_available: bool,
    /// Context-aware dribble success estimate
    pub dribble_estimate: f32,
    /// Expected goals if the shot were taken now
    pub predicted_xg: f32,
}

impl ActionContext {
    fn in_final_third(&self) -> bool {
        is_in_final_third(self.team, self.zone)
    }

    fn counter_armed(&self, profile: &TacticalProfile) -> bool {
        profile.counter_attack && self.counter_clock > 0
    }
}

pub fn adjust_pass_weight(weight: f32, ctx: &ActionContext, profile: &TacticalProfile) -> f32 {
    let t = &profile.tuning;
    let mut weight = weight;

    if profile.possession_build_up {
        if ctx.chain_length < t.possession_chain_limit {
            weight *= t.possession_pass_multiplier;
            if (2..=3).contains(&ctx.chain_length) {
                weight *= t.chain_build_bonus;
            }
        } else {
            weight *= t.long_chain_pass_damping;
        }
    }

    if ctx.counter_armed(profile) && ctx.entry_pass_available {
        weight += t.counter_attack_bonus;
    }

    if profile.final_third_penetration {
        if ctx.entry_pass_available {
            weight *= t.entry_pass_multiplier;
        }
        if ctx.in_final_third() {
            weight *= t.final_third_pass_multiplier;
        }
    }

    weight.max(MIN_ACTION_WEIGHT)
}

pub fn adjust_dribble_weight(weight: f32, ctx: &ActionContext, profile: &TacticalProfile) -> f32 {
    let t = &profile.tuning;
    let mut weight = weight;

    if profile.dribble_filter {
        if ctx.dribble_estimate < t.dribble_success_threshold {
            weight -= t.dribble_failure_penalty;
        } else {
            weight += t.dribble_success_reward;
        }
    }

    if profile.dribble_restraint && ctx.chain_length < t.restraint_chain_limit {
        weight *= t.restraint_dribble_multiplier;
    }

    if ctx.counter_armed(profile) && ctx.entry_dribble_available {
        weight += t.counter_attack_bonus;
    }

    if profile.final_third_penetration {
        if ctx.entry_dribble_available {
            weight *= t.entry_dribble_multiplier;
        }
        if ctx.in_final_third() {
            weight *= t.final_third_dribble_multiplier;
        }
    }

    weight.max(MIN_ACTION_WEIGHT)
}

pub fn adjust_shot_weight(weight: f32, ctx: &ActionContext, profile: &TacticalProfile) -> f32 {
    let t = &profile.tuning;
    let mut weight = weight;

    if profile.shot_selection {
        if ctx.chain_length >= t.shot_chain_threshold {
            weight *= t.shot_chain_bonus;
        }
        if ctx.predicted_xg < t.low_xg_threshold {
            weight *= t.low_xg_multiplier;
        }
    }

    if ctx.counter_armed(profile) && ctx.in_final_third() {
        weight += t.counter_shot_bonus();
    }

    if profile.final_third_penetration {
        if is_key_chance(ctx.team, ctx.zone) {
            weight *= t.key_chance_shot_multiplier;
        } else if ctx.in_final_third() {
            weight *= t.final_third_shot_multiplier;
        }
    }

    weight.max(MIN_ACTION_WEIGHT)
}

// ============================================================================
// Pass targeting
// ============================================================================

/// Penetration share of a pass-target score. Zero unless the profile pushes
/// into the final third.
pub fn pass_target_bonus(
    team: TeamSide,
    actor_zone: Zone,
    target_zone: Zone,
    target_position: Position,
    profile: &TacticalProfile,
) -> f32 {
    if !profile.final_third_penetration {
        return 0.0;
    }
    let t = &profile.tuning;
    let actor_in_final = is_in_final_third(team, actor_zone);
    let target_in_final = is_in_final_third(team, target_zone);
    let mut bonus = 0.0;

    if is_final_third_entry(team, actor_zone, target_zone) {
        bonus += t.entry_target_bonus;
    } else if target_in_final {
        bonus += t.final_row_target_bonus;
    } else if !actor_in_final
        && team.rows_to_final_third(target_zone.row()) == 1
        && team.is_forward(actor_zone, target_zone)
    {
        bonus += t.progressive_target_bonus;
    }

    if target_position.is_attacker() && actor_in_final && target_in_final {
        bonus += t.attacker_target_bonus;
    }

    bonus
}

// ============================================================================
// Feedback
// ============================================================================

/// Shot-selection reward: punishes speculative shots, pays for accuracy and goals.
pub fn shot_quality_reward(xg: f32, on_target: bool, is_goal: bool, tuning: &TacticalTuning) -> f32 {
    let mut reward = 0.0;
    if xg < tuning.low_xg_threshold {
        reward += tuning.low_xg_reward;
    } else if on_target {
        reward += tuning.on_target_reward;
    }
    if is_goal {
        reward += tuning.goal_reward;
    }
    reward
}

pub const CONFIDENCE_GAIN: f32 = 0.05;
pub const CONFIDENCE_LOSS: f32 = 0.03;
pub const MIN_CONFIDENCE: f32 = 0.1;
pub const MAX_CONFIDENCE: f32 = 1.0;

/// Confidence change for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceUpdate {
    pub delta: f32,
    /// The pending shot reward was folded in and should be cleared
    pub reward_consumed: bool,
}

pub fn confidence_update(
    last_success: bool,
    chain_length: u32,
    last_shot_reward: f32,
    profile: &TacticalProfile,
) -> ConfidenceUpdate {
    let t = &profile.tuning;
    let mut reward_consumed = false;
    let delta = if last_success {
        let mut gain = CONFIDENCE_GAIN;
        if profile.possession_build_up && chain_length >= t.confidence_gain_chain {
            gain *= t.chain_confidence_gain;
        }
        if profile.shot_selection && last_shot_reward != 0.0 {
            gain += last_shot_reward * t.reward_confidence_gain;
            reward_consumed = true;
        }
        gain
    } else {
        let mut loss = CONFIDENCE_LOSS;
        if profile.possession_build_up && chain_length >= t.confidence_loss_chain {
            loss *= t.chain_confidence_damping;
        }
        if profile.shot_selection && last_shot_reward < 0.0 {
            loss += last_shot_reward.abs() * t.reward_confidence_loss;
            reward_consumed = true;
        }
        -loss
    };
    ConfidenceUpdate { delta, reward_consumed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactics::TacticalPreset;

    fn ctx(team: TeamSide, zone: Zone) -> ActionContext {
        ActionContext {
            team,
            zone,
            chain_length: 0,
            counter_clock: 0,
            entry_pass_available: false,
            entry_dribble_available: false,
            dribble_estimate: 0.5,
            predicted_xg: 0.2,
        }
    }

    #[test]
    fn test_final_third_entry_geometry() {
        assert!(is_final_third_entry(TeamSide::Home, Zone::C2, Zone::D2));
        assert!(is_final_third_entry(TeamSide::Home, Zone::B3, Zone::D1));
        assert!(!is_final_third_entry(TeamSide::Home, Zone::A3, Zone::D3));
        assert!(!is_final_third_entry(TeamSide::Home, Zone::D2, Zone::D3));
        assert!(is_final_third_entry(TeamSide::Away, Zone::B4, Zone::A4));
        assert!(!is_final_third_entry(TeamSide::Away, Zone::C4, Zone::D4));
        assert!(is_key_chance(TeamSide::Away, Zone::A2));
        assert!(!is_key_chance(TeamSide::Away, Zone::A1));
    }

    #[test]
    fn test_plain_profile_only_floors() {
        let plain = TacticalProfile::plain();
        let c = ctx(TeamSide::Home, Zone::C3);
        assert_eq!(adjust_pass_weight(0.5, &c, &plain), 0.5);
        assert_eq!(adjust_dribble_weight(0.01, &c, &plain), MIN_ACTION_WEIGHT);
        assert_eq!(adjust_shot_weight(0.4, &c, &plain), 0.4);
    }

    #[test]
    fn test_build_up_chain_scaling() {
        let profile = TacticalProfile::from_preset(TacticalPreset::Possession);
        let mut c = ctx(TeamSide::Home, Zone::B3);
        c.chain_length = 1;
        assert!((adjust_pass_weight(1.0, &c, &profile) - 1.5).abs() < 1e-5);
        c.chain_length = 2;
        assert!((adjust_pass_weight(1.0, &c, &profile) - 1.95).abs() < 1e-5);
        c.chain_length = 5;
        assert!((adjust_pass_weight(1.0, &c, &profile) - 0.9).abs() < 1e-5);
    }

    #[test]
    fn test_restraint_and_filter() {
        let standard = TacticalProfile::from_preset(TacticalPreset::Standard);
        let mut c = ctx(TeamSide::Away, Zone::C3);
        c.chain_length = 1;
        assert!((adjust_dribble_weight(1.0, &c, &standard) - 0.7).abs() < 1e-5);
        c.chain_length = 3;
        assert!((adjust_dribble_weight(1.0, &c, &standard) - 1.0).abs() < 1e-5);

        let penetration = TacticalProfile::from_preset(TacticalPreset::Penetration);
        let mut c = ctx(TeamSide::Home, Zone::A3);
        c.dribble_estimate = 0.3;
        assert_eq!(adjust_dribble_weight(0.6, &c, &penetration), MIN_ACTION_WEIGHT);
        c.dribble_estimate = 0.8;
        assert!((adjust_dribble_weight(0.6, &c, &penetration) - 4.6).abs() < 1e-5);
    }

    #[test]
    fn test_counter_attack_bonus_needs_entry() {
        let counter = TacticalProfile::from_preset(TacticalPreset::Counter);
        let mut c = ctx(TeamSide::Home, Zone::C3);
        c.counter_clock = 2;
        assert!((adjust_pass_weight(0.5, &c, &counter) - 0.5).abs() < 1e-5);
        c.entry_pass_available = true;
        // (0.5 + 8) * 2.5
        assert!((adjust_pass_weight(0.5, &c, &counter) - 21.25).abs() < 1e-4);
    }

    #[test]
    fn test_shot_modifiers() {
        let penetration = TacticalProfile::from_preset(TacticalPreset::Penetration);
        let mut c = ctx(TeamSide::Home, Zone::D3);
        c.chain_length = 3;
        // 1.0 * 1.2 * 3.0
        assert!((adjust_shot_weight(1.0, &c, &penetration) - 3.6).abs() < 1e-5);
        c.zone = Zone::D1;
        c.predicted_xg = 0.05;
        // 1.0 * 1.2 * 0.3 * 1.8
        assert!((adjust_shot_weight(1.0, &c, &penetration) - 0.648).abs() < 1e-5);
        c.counter_clock = 1;
        // (0.36 + 4.8) * 1.8
        assert!((adjust_shot_weight(1.0, &c, &penetration) - 9.288).abs() < 1e-4);
    }

    #[test]
    fn test_pass_target_bonus() {
        let penetration = TacticalProfile::from_preset(TacticalPreset::Penetration);
        let home = TeamSide::Home;
        assert_eq!(pass_target_bonus(home, Zone::C3, Zone::D3, Position::ST, &penetration), 1.5);
        assert_eq!(pass_target_bonus(home, Zone::A3, Zone::D3, Position::CB, &penetration), 0.8);
        assert_eq!(pass_target_bonus(home, Zone::B3, Zone::C2, Position::CM, &penetration), 0.4);
        assert!((pass_target_bonus(home, Zone::D2, Zone::D4, Position::LW, &penetration) - 1.4).abs() < 1e-5);
        assert_eq!(pass_target_bonus(home, Zone::C3, Zone::D3, Position::ST, &TacticalProfile::plain()), 0.0);
    }

    #[test]
    fn test_shot_quality_reward() {
        let t = TacticalTuning::default();
        assert_eq!(shot_quality_reward(0.05, true, false, &t), -4.0);
        assert_eq!(shot_quality_reward(0.2, true, false, &t), 3.0);
        assert_eq!(shot_quality_reward(0.2, true, true, &t), 13.0);
        assert_eq!(shot_quality_reward(0.2, false, false, &t), 0.0);
        assert_eq!(shot_quality_reward(0.05, true, true, &t), 6.0);
    }

    #[test]
    fn test_confidence_update() {
        let penetration = TacticalProfile::from_preset(TacticalPreset::Penetration);
        let up = confidence_update(true, 3, 0.0, &penetration);
        assert!((up.delta - 0.065).abs() < 1e-6);
        assert!(!up.reward_consumed);

        let up = confidence_update(true, 0, 13.0, &penetration);
        assert!((up.delta - 0.18).abs() < 1e-6);
        assert!(up.reward_consumed);

        let up = confidence_update(false, 2, -4.0, &penetration);
        assert!((up.delta + (0.021 + 0.02)).abs() < 1e-6);

        let up = confidence_update(false, 5, -4.0, &TacticalProfile::plain());
        assert!((up.delta + 0.03).abs() < 1e-6);
        assert!(!up.reward_consumed);
    }

    #[test]
    fn test_confidence_update_follows_tuning() {
        let tuning = TacticalTuning {
            chain_confidence_gain: 2.0,
            confidence_gain_chain: 1,
            chain_confidence_damping: 0.5,
            reward_confidence_gain: 0.02,
            reward_confidence_loss: 0.01,
            ..TacticalTuning::default()
        };
        let profile = TacticalProfile::from_preset(TacticalPreset::Penetration).with_tuning(tuning);

        let up = confidence_update(true, 1, 0.0, &profile);
        assert!((up.delta - 0.1).abs() < 1e-6);
        let up = confidence_update(true, 0, 5.0, &profile);
        assert!((up.delta - 0.15).abs() < 1e-6);
        let up = confidence_update(false, 2, -4.0, &profile);
        assert!((up.delta + (0.015 + 0.04)).abs() < 1e-6);
    }
}
