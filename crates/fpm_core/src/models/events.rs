use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use super::team::{MatchOutcome, TeamSide, TeamStatus};
use crate::engine::zone::Zone;

// ============================================================================
// Case identifiers
// ============================================================================

/// Identifier of one possession: `M{step:02}-{H|A}{seq:03}`, e.g. `M07-H004`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PossessionId {
    /// Step at which the possession was minted
    pub step: u64,
    pub team: TeamSide,
    /// Match-wide possession counter (1-based)
    pub seq: u32,
}

impl fmt::Display for PossessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{:02}-{}{:03}", self.step, self.team.initial(), self.seq)
    }
}

/// Trace key for an event: a possession, or one of the match boundary markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseId {
    MatchStart,
    MatchEnd,
    Possession(PossessionId),
}

impl CaseId {
    pub fn possession(&self) -> Option<PossessionId> {
        match self {
            CaseId::Possession(id) => Some(*id),
            _ => None,
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseId::MatchStart => f.write_str("MATCH_START"),
            CaseId::MatchEnd => f.write_str("MATCH_END"),
            CaseId::Possession(id) => id.fmt(f),
        }
    }
}

impl Serialize for CaseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Event vocabulary
// ============================================================================

/// Activity label of an event (the process-mining activity name)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ActionType {
    KickOff,
    MatchEnd,
    PossessionStart,
    PossessionEnd,
    Pass,
    CounterAttackPass,
    Dribble,
    CounterAttackDribble,
    Shot,
    CounterAttackShot,
    Goal,
    FinalThirdEntry,
    Tackle,
    Interception,
    Foul,
    Clearance,
    BallRecovery,
}

impl ActionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::KickOff => "KickOff",
            ActionType::MatchEnd => "MatchEnd",
            ActionType::PossessionStart => "PossessionStart",
            ActionType::PossessionEnd => "PossessionEnd",
            ActionType::Pass => "Pass",
            ActionType::CounterAttackPass => "CounterAttackPass",
            ActionType::Dribble => "Dribble",
            ActionType::CounterAttackDribble => "CounterAttackDribble",
            ActionType::Shot => "Shot",
            ActionType::CounterAttackShot => "CounterAttackShot",
            ActionType::Goal => "Goal",
            ActionType::FinalThirdEntry => "FinalThirdEntry",
            ActionType::Tackle => "Tackle",
            ActionType::Interception => "Interception",
            ActionType::Foul => "Foul",
            ActionType::Clearance => "Clearance",
            ActionType::BallRecovery => "BallRecovery",
        }
    }

    /// Pass, dribble or shot, including counter-attack variants
    pub fn is_on_ball_action(self) -> bool {
        matches!(
            self,
            ActionType::Pass
                | ActionType::CounterAttackPass
                | ActionType::Dribble
                | ActionType::CounterAttackDribble
                | ActionType::Shot
                | ActionType::CounterAttackShot
        )
    }

    pub fn is_counter_attack(self) -> bool {
        matches!(
            self,
            ActionType::CounterAttackPass
                | ActionType::CounterAttackDribble
                | ActionType::CounterAttackShot
        )
    }

    pub fn is_shot(self) -> bool {
        matches!(self, ActionType::Shot | ActionType::CounterAttackShot)
    }

    /// Match-boundary events carry no possession id
    pub fn is_match_boundary(self) -> bool {
        matches!(self, ActionType::KickOff | ActionType::MatchEnd)
    }

    /// Counter-attack label for an on-ball action
    pub fn counter_attack_variant(self) -> Self {
        match self {
            ActionType::Pass => ActionType::CounterAttackPass,
            ActionType::Dribble => ActionType::CounterAttackDribble,
            ActionType::Shot => ActionType::CounterAttackShot,
            other => other,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome tag of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Success,
    Failure,
    Goal,
    OnTarget,
    /// Possession ended by losing the ball
    Lost,
    Complete,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "Success",
            Outcome::Failure => "Failure",
            Outcome::Goal => "Goal",
            Outcome::OnTarget => "OnTarget",
            Outcome::Lost => "Lost",
            Outcome::Complete => "Complete",
        }
    }

    pub fn from_success(success: bool) -> Self {
        if success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team-status column: scoreline from the actor's view, or the final result
/// on `MatchEnd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Live(TeamStatus),
    Final(MatchOutcome),
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusTag::Live(status) => f.write_str(status.as_str()),
            StatusTag::Final(outcome) => f.write_str(outcome.as_str()),
        }
    }
}

impl Serialize for StatusTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// MatchEvent
// ============================================================================

/// Tactical annotations attached to on-ball events
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventDetails {
    /// Origin zone for `FinalThirdEntry` markers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_zone: Option<Zone>,
    /// Receiver jersey for completed passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_player: Option<u8>,
    /// Action that produced a `FinalThirdEntry`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_kind: Option<ActionType>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub final_third_entry: bool,
    /// Dribble or shot taken inside the final third
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub final_third_play: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub key_chance: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub counter_attack: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactical_bonus: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_attack_bonus: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shot_quality_reward: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_target: Option<bool>,
}

impl EventDetails {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One flat record of the event stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEvent {
    pub possession_id: CaseId,
    /// Kick-off time plus elapsed match clock
    pub timestamp: DateTime<Utc>,
    pub step: u64,
    pub minute: u32,
    pub second: u32,
    pub team: TeamSide,
    /// Jersey number; 0 for match-boundary events
    pub player_id: u8,
    pub action: ActionType,
    pub zone: Zone,
    /// Pressure level 0-3 at the actor's zone
    pub pressure: u8,
    pub team_status: StatusTag,
    pub outcome: Outcome,
    /// Expected-goal delta; non-zero only for shots
    pub xg_change: f32,
    #[serde(skip_serializing_if = "EventDetails::is_empty")]
    pub details: EventDetails,
}

impl MatchEvent {
    pub fn is_home(&self) -> bool {
        self.team == TeamSide::Home
    }

    pub fn with_details(mut self, details: EventDetails) -> Self {
        self.details = details;
        self
    }
}
