//! Probability calculation utilities for match simulation
//!
//! All functions are pure: they take skills and situational values and return
//! weights or probabilities, so they can be tested without a running match.

use crate::models::Skills;

// ============================================================================
// Constants
// ============================================================================

/// Distance (field units) over which shot quality decays to its floor
pub const SHOT_DISTANCE_SCALE: f32 = 50.0;
/// Goal-zone distance under which a shot counts as from shooting range
pub const SHOOTING_RANGE: f32 = 20.0;
pub const SHOOTING_RANGE_MULTIPLIER: f32 = 1.5;

pub const MIN_XG: f32 = 0.01;
pub const MAX_XG: f32 = 0.99;
pub const MAX_ON_TARGET: f32 = 0.9;

pub const MIN_PASS_SUCCESS: f32 = 0.1;
pub const PASS_PRESSURE_PENALTY: f32 = 0.1;
pub const MIN_DRIBBLE_SUCCESS: f32 = 0.2;
pub const DRIBBLE_PRESSURE_PENALTY: f32 = 0.15;

pub const TACKLE_FACTOR: f32 = 0.7;
pub const INTERCEPTION_FACTOR: f32 = 0.6;

// ============================================================================
// Base action weights
// ============================================================================

/// `0.6 * passing + 0.4 * confidence`
#[inline]
pub fn pass_weight(skills: &Skills, confidence: f32) -> f32 {
    skills.passing * 0.6 + confidence * 0.4
}

/// `0.7 * dribbling + 0.3 * confidence`
#[inline]
pub fn dribble_weight(skills: &Skills, confidence: f32) -> f32 {
    skills.dribbling * 0.7 + confidence * 0.3
}

/// `0.8 * shooting + 0.2 * confidence`, boosted inside shooting range
#[inline]
pub fn shot_weight(skills: &Skills, confidence: f32, distance_to_goal: f32) -> f32 {
    let weight = skills.shooting * 0.8 + confidence * 0.2;
    if distance_to_goal < SHOOTING_RANGE {
        weight * SHOOTING_RANGE_MULTIPLIER
    } else {
        weight
    }
}

// ============================================================================
// Success probabilities
// ============================================================================

#[inline]
pub fn pass_success(passing: f32, pressure: u8) -> f32 {
    (passing - PASS_PRESSURE_PENALTY * pressure as f32).max(MIN_PASS_SUCCESS)
}

#[inline]
pub fn dribble_success(dribbling: f32, pressure: u8) -> f32 {
    (dribbling - DRIBBLE_PRESSURE_PENALTY * pressure as f32).max(MIN_DRIBBLE_SUCCESS)
}

/// Inputs to the context-aware dribble estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DribbleOutlook {
    /// Opponents in own and adjacent zones / 3, capped at 1
    pub density: f32,
    /// Free fraction of the cells ahead
    pub space_ahead: f32,
    pub pressure: u8,
    /// 1.0 one row from the final row, 0.6 two rows, else 0.2
    pub final_third_potential: f32,
}

/// Refined dribble estimate, clamped to [0.1, 0.95]
pub fn estimate_dribble_success(dribbling: f32, outlook: &DribbleOutlook) -> f32 {
    let p = dribbling - outlook.density * 0.3 + outlook.space_ahead * 0.2
        - outlook.pressure as f32 * 0.15
        + outlook.final_third_potential * 0.25;
    p.clamp(0.1, 0.95)
}

/// Opponent count normalised to [0, 1]
#[inline]
pub fn opponent_density(opponents_nearby: usize) -> f32 {
    (opponents_nearby as f32 / 3.0).min(1.0)
}

/// Dribble payoff by rows still to cover before the final row
#[inline]
pub fn final_third_potential(rows_to_final_third: u8) -> f32 {
    match rows_to_final_third {
        1 => 1.0,
        2 => 0.6,
        _ => 0.2,
    }
}

// ============================================================================
// Shooting
// ============================================================================

/// Expected goals for a shot from `distance_to_goal` under `pressure`
pub fn expected_goals(shooting: f32, finishing: f32, distance_to_goal: f32, pressure: u8) -> f32 {
    let distance_factor = (1.0 - distance_to_goal / SHOT_DISTANCE_SCALE).max(0.1);
    let quality = (shooting + finishing) / 2.0 * distance_factor - 0.1 * pressure as f32;
    quality.clamp(MIN_XG, MAX_XG)
}

/// `min(0.9, 2 * xg + 0.3)`
#[inline]
pub fn on_target_probability(xg: f32) -> f32 {
    (xg * 2.0 + 0.3).min(MAX_ON_TARGET)
}

/// Goal probability given the shot is on target; P(goal) = xg until the on-target cap binds
#[inline]
pub fn goal_given_on_target(xg: f32) -> f32 {
    (xg / on_target_probability(xg)).min(1.0)
}

// ============================================================================
// Defending
// ============================================================================

#[inline]
pub fn tackle_success(tackling: f32) -> f32 {
    tackling * TACKLE_FACTOR
}

#[inline]
pub fn interception_success(positioning: f32) -> f32 {
    positioning * INTERCEPTION_FACTOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_weights() {
        let skills = Skills::uniform(0.5);
        assert!((pass_weight(&skills, 0.5) - 0.5).abs() < 1e-6);
        assert!((dribble_weight(&skills, 1.0) - 0.65).abs() < 1e-6);
        assert!((shot_weight(&skills, 0.5, 30.0) - 0.5).abs() < 1e-6);
        assert!((shot_weight(&skills, 0.5, 10.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_success_floors() {
        assert!((pass_success(0.8, 1) - 0.7).abs() < 1e-6);
        assert_eq!(pass_success(0.2, 3), MIN_PASS_SUCCESS);
        assert!((dribble_success(0.8, 2) - 0.5).abs() < 1e-6);
        assert_eq!(dribble_success(0.3, 3), MIN_DRIBBLE_SUCCESS);
    }

    #[test]
    fn test_elite_finisher_point_blank() {
        let xg = expected_goals(0.95, 0.95, 0.0, 0);
        assert!((xg - 0.95).abs() < 1e-6);
        assert!(xg <= MAX_XG);
        assert!((on_target_probability(xg) - 0.9).abs() < 1e-6);
        // Conversion caps at 1.0, so the goal chance tops out at the on-target cap
        assert_eq!(goal_given_on_target(xg), 1.0);
        let p_goal = on_target_probability(xg) * goal_given_on_target(xg);
        assert!((p_goal - xg.min(MAX_ON_TARGET)).abs() < 1e-6);
    }

    #[test]
    fn test_goal_chance_equals_xg_below_cap() {
        let xg = 0.2;
        assert!((on_target_probability(xg) - 0.7).abs() < 1e-6);
        let p_goal = on_target_probability(xg) * goal_given_on_target(xg);
        assert!((p_goal - xg).abs() < 1e-6);
    }

    #[test]
    fn test_xg_floor_far_and_pressured() {
        assert_eq!(expected_goals(0.3, 0.3, 70.0, 3), MIN_XG);
        // 0.1 floor on the distance factor
        let far = expected_goals(0.8, 0.8, 100.0, 0);
        assert!((far - 0.08).abs() < 1e-6);
    }

    #[test]
    fn test_dribble_estimate_clamped() {
        let open = DribbleOutlook {
            density: 0.0,
            space_ahead: 1.0,
            pressure: 0,
            final_third_potential: 1.0,
        };
        assert_eq!(estimate_dribble_success(0.9, &open), 0.95);
        let crowded = DribbleOutlook {
            density: 1.0,
            space_ahead: 0.0,
            pressure: 3,
            final_third_potential: 0.2,
        };
        assert_eq!(estimate_dribble_success(0.3, &crowded), 0.1);
        assert_eq!(final_third_potential(1), 1.0);
        assert_eq!(final_third_potential(2), 0.6);
        assert_eq!(final_third_potential(3), 0.2);
        assert_eq!(opponent_density(6), 1.0);
    }
}
