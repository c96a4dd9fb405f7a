//! Action execution logic and result structures
//!
//! Pure resolution of passes, dribbles, shots and defensive challenges.
//! All randomness is passed in through the `*Rolls` structs, each roll a
//! uniform draw in [0, 1).

use super::probability::{self, DribbleOutlook};
use crate::models::ActionType;
use crate::tactics::DribbleModel;

// ============================================================================
// Pass Action
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct PassContext {
    pub passing: f32,
    pub pressure: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct PassRolls {
    pub success_roll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassResult {
    pub success_probability: f32,
    pub success: bool,
}

pub fn resolve_pass(ctx: &PassContext, rolls: &PassRolls) -> PassResult {
    let success_probability = probability::pass_success(ctx.passing, ctx.pressure);
    PassResult { success_probability, success: rolls.success_roll < success_probability }
}

// ============================================================================
// Dribble Action
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct DribbleContext {
    pub dribbling: f32,
    pub pressure: u8,
    pub model: DribbleModel,
    /// Used by [`DribbleModel::ContextAware`]
    pub outlook: DribbleOutlook,
}

#[derive(Debug, Clone, Copy)]
pub struct DribbleRolls {
    pub success_roll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DribbleResult {
    pub success_probability: f32,
    pub success: bool,
}

pub fn resolve_dribble(ctx: &DribbleContext, rolls: &DribbleRolls) -> DribbleResult {
    let success_probability = match ctx.model {
        DribbleModel::Basic => probability::dribble_success(ctx.dribbling, ctx.pressure),
        DribbleModel::ContextAware => {
            probability::estimate_dribble_success(ctx.dribbling, &ctx.outlook)
        }
    };
    DribbleResult { success_probability, success: rolls.success_roll < success_probability }
}

// ============================================================================
// Shot Action
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ShotContext {
    pub shooting: f32,
    pub finishing: f32,
    pub distance_to_goal: f32,
    pub pressure: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct ShotRolls {
    pub on_target_roll: f32,
    pub goal_roll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotResult {
    pub xg: f32,
    pub on_target_probability: f32,
    pub on_target: bool,
    pub is_goal: bool,
}

/// Goals are only possible on target.
pub fn resolve_shot(ctx: &ShotContext, rolls: &ShotRolls) -> ShotResult {
    let xg = probability::expected_goals(
        ctx.shooting,
        ctx.finishing,
        ctx.distance_to_goal,
        ctx.pressure,
    );
    let on_target_probability = probability::on_target_probability(xg);
    let on_target = rolls.on_target_roll < on_target_probability;
    let is_goal = on_target && rolls.goal_roll < probability::goal_given_on_target(xg);
    ShotResult { xg, on_target_probability, on_target, is_goal }
}

// ============================================================================
// Defensive Challenge
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKind {
    Tackle,
    Interception,
}

impl ChallengeKind {
    pub fn action_type(self) -> ActionType {
        match self {
            ChallengeKind::Tackle => ActionType::Tackle,
            ChallengeKind::Interception => ActionType::Interception,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChallengeContext {
    pub kind: ChallengeKind,
    pub tackling: f32,
    pub positioning: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ChallengeRolls {
    pub success_roll: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChallengeResult {
    pub success_probability: f32,
    pub success: bool,
}

pub fn resolve_challenge(ctx: &ChallengeContext, rolls: &ChallengeRolls) -> ChallengeResult {
    let success_probability = match ctx.kind {
        ChallengeKind::Tackle => probability::tackle_success(ctx.tackling),
        ChallengeKind::Interception => probability::interception_success(ctx.positioning),
    };
    ChallengeResult { success_probability, success: rolls.success_roll < success_probability }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_outlook() -> DribbleOutlook {
        DribbleOutlook { density: 0.0, space_ahead: 1.0, pressure: 0, final_third_potential: 0.2 }
    }

    #[test]
    fn test_pass_roll_threshold() {
        let ctx = PassContext { passing: 0.7, pressure: 2 };
        assert!(resolve_pass(&ctx, &PassRolls { success_roll: 0.49 }).success);
        assert!(!resolve_pass(&ctx, &PassRolls { success_roll: 0.51 }).success);
    }

    #[test]
    fn test_dribble_models_differ() {
        let basic = DribbleContext {
            dribbling: 0.5,
            pressure: 0,
            model: DribbleModel::Basic,
            outlook: open_outlook(),
        };
        let aware = DribbleContext { model: DribbleModel::ContextAware, ..basic };
        let rolls = DribbleRolls { success_roll: 0.6 };
        assert!(!resolve_dribble(&basic, &rolls).success);
        // 0.5 + 0.2 + 0.05 = 0.75
        let r = resolve_dribble(&aware, &rolls);
        assert!((r.success_probability - 0.75).abs() < 1e-5);
        assert!(r.success);
    }

    #[test]
    fn test_shot_goal_requires_on_target() {
        let ctx = ShotContext { shooting: 0.95, finishing: 0.95, distance_to_goal: 0.0, pressure: 0 };
        let miss = resolve_shot(&ctx, &ShotRolls { on_target_roll: 0.95, goal_roll: 0.0 });
        assert!(!miss.on_target && !miss.is_goal);
        let goal = resolve_shot(&ctx, &ShotRolls { on_target_roll: 0.1, goal_roll: 0.5 });
        assert!(goal.on_target && goal.is_goal);
        assert!((goal.xg - 0.95).abs() < 1e-6);
        assert!((goal.on_target_probability - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_challenge_probabilities() {
        let tackle = ChallengeContext { kind: ChallengeKind::Tackle, tackling: 0.8, positioning: 0.2 };
        let r = resolve_challenge(&tackle, &ChallengeRolls { success_roll: 0.5 });
        assert!((r.success_probability - 0.56).abs() < 1e-6);
        assert!(r.success);
        let interception = ChallengeContext { kind: ChallengeKind::Interception, ..tackle };
        let r = resolve_challenge(&interception, &ChallengeRolls { success_roll: 0.5 });
        assert!((r.success_probability - 0.12).abs() < 1e-6);
        assert!(!r.success);
    }
}
