//! Player agents
//!
//! Per-player state carried across ticks. Decision logic lives on
//! `MatchEngine` (see `match_sim/`), which owns the roster and mutates agents
//! through their roster index.

use std::sync::Arc;

use super::formation::{initial_zone, FormationSlot};
use super::zone::Zone;
use crate::models::{PlayerStats, Position, Skills, TeamSide};
use crate::tactics::modifiers::{ConfidenceUpdate, MAX_CONFIDENCE, MIN_CONFIDENCE};
use crate::tactics::TacticalProfile;

pub const INITIAL_ENERGY: f32 = 100.0;
pub const INITIAL_CONFIDENCE: f32 = 0.5;

/// Decision state, derived from the possession flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    WithoutBall,
    WithBall,
}

#[derive(Debug, Clone)]
pub struct PlayerAgent {
    /// Roster index
    pub id: usize,
    pub side: TeamSide,
    pub position: Position,
    pub jersey: u8,
    pub name: String,
    pub zone: Zone,
    /// Nominal zone in the Home frame
    pub formation_zone: Zone,
    pub has_ball: bool,
    /// 0-100
    pub energy: f32,
    /// 0.1-1.0
    pub confidence: f32,
    pub skills: Skills,
    pub tactics: Arc<TacticalProfile>,
    /// Remaining counter-attack actions
    pub counter_clock: u8,
    /// Outcome of the player's last on-ball action
    pub last_success: Option<bool>,
    pub shot_quality_score: f32,
    /// Pending shot reward, folded into the next confidence update
    pub last_shot_reward: f32,
    pub stats: PlayerStats,
}

impl PlayerAgent {
    pub fn new(
        id: usize,
        side: TeamSide,
        slot: &FormationSlot,
        skills: Skills,
        tactics: Arc<TacticalProfile>,
    ) -> Self {
        Self {
            id,
            side,
            position: slot.position,
            jersey: slot.jersey,
            name: format!("{} {}", side, slot.role_label()),
            zone: initial_zone(slot.position, side),
            formation_zone: slot.position.formation_zone(slot.jersey),
            has_ball: false,
            energy: INITIAL_ENERGY,
            confidence: INITIAL_CONFIDENCE,
            skills,
            tactics,
            counter_clock: 0,
            last_success: None,
            shot_quality_score: 0.0,
            last_shot_reward: 0.0,
            stats: PlayerStats::default(),
        }
    }

    pub fn state(&self) -> AgentState {
        if self.has_ball {
            AgentState::WithBall
        } else {
            AgentState::WithoutBall
        }
    }

    pub fn spend_energy(&mut self, amount: f32) {
        self.energy = (self.energy - amount).max(0.0);
    }

    pub fn apply_confidence(&mut self, update: ConfidenceUpdate) {
        self.confidence = (self.confidence + update.delta).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE);
        if update.reward_consumed {
            self.last_shot_reward = 0.0;
        }
    }

    pub fn arm_counter_attack(&mut self) {
        self.counter_clock = self.tactics.tuning.counter_attack_window;
    }

    /// Consume one counter-attack action; returns the clock left afterwards
    pub fn consume_counter_clock(&mut self) -> u8 {
        self.counter_clock = self.counter_clock.saturating_sub(1);
        self.counter_clock
    }

    /// Formation zone in the team frame, dropped onto the team's own goal row
    pub fn defensive_zone(&self) -> Zone {
        self.side.orient(self.formation_zone).with_row(self.side.defensive_row())
    }

    pub fn record_outcome(&mut self, success: bool) {
        self.last_success = Some(success);
    }
}
