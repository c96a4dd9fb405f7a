use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::zone::Zone;

/// Upper bound for any generated skill
pub const MAX_SKILL: f32 = 0.95;
/// Half-width of the uniform jitter applied to position-specific skills
pub const SKILL_JITTER: f32 = 0.1;

/// Playing position. A closed set: every roster entry is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    CB,
    LB,
    RB,
    CDM,
    CM,
    CAM,
    LW,
    RW,
    ST,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::GK => "Goalkeeper",
            Position::CB => "Center Back",
            Position::LB => "Left Back",
            Position::RB => "Right Back",
            Position::CDM => "Defensive Midfielder",
            Position::CM => "Central Midfielder",
            Position::CAM => "Attacking Midfielder",
            Position::LW => "Left Winger",
            Position::RW => "Right Winger",
            Position::ST => "Striker",
        }
    }

    /// Advanced roles that pass targeting favours
    pub fn is_advanced(self) -> bool {
        matches!(self, Position::ST | Position::CAM)
    }

    /// Roles that make attacking runs
    pub fn is_attacker(self) -> bool {
        matches!(self, Position::ST | Position::CAM | Position::LW | Position::RW)
    }

    /// Roles preferred when a new possession is seeded
    pub fn is_playmaker(self) -> bool {
        matches!(self, Position::CM | Position::CDM | Position::CAM | Position::ST)
    }

    /// Whether a zone suits the role when moving into support:
    /// central lanes for strikers and attacking mids, the near flank for wingers.
    pub fn prefers_lane(self, zone: Zone) -> bool {
        match self {
            Position::ST | Position::CAM => zone.is_central_lane(),
            Position::LW => matches!(zone.col(), 1 | 2),
            Position::RW => matches!(zone.col(), 4 | 5),
            _ => true,
        }
    }

    /// Nominal formation zone, expressed from the Home perspective.
    pub fn formation_zone(self, jersey: u8) -> Zone {
        match self {
            Position::GK => Zone::A3,
            Position::CB => {
                if jersey % 2 == 0 {
                    Zone::A2
                } else {
                    Zone::A4
                }
            }
            Position::LB => Zone::B1,
            Position::RB => Zone::B5,
            Position::CDM => Zone::B3,
            Position::CM | Position::CAM => Zone::C3,
            Position::LW => Zone::C1,
            Position::RW => Zone::C5,
            Position::ST => Zone::D3,
        }
    }
}

/// Skill vector. Every value lies in [0, 0.95].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub passing: f32,
    pub shooting: f32,
    pub tackling: f32,
    pub dribbling: f32,
    pub positioning: f32,
    pub crossing: f32,
    pub finishing: f32,
    pub saving: f32,
    pub speed: f32,
    pub strength: f32,
}

impl Default for Skills {
    fn default() -> Self {
        Self::baseline()
    }
}

impl Skills {
    /// Outfield baseline before position adjustments
    pub fn baseline() -> Self {
        Self {
            passing: 0.5,
            shooting: 0.3,
            tackling: 0.4,
            dribbling: 0.4,
            positioning: 0.5,
            crossing: 0.3,
            finishing: 0.3,
            saving: 0.1,
            speed: 0.5,
            strength: 0.5,
        }
    }

    /// Baseline with the position's signature skills, each jittered by
    /// a uniform draw in [-0.1, 0.1].
    pub fn for_position<R: Rng + ?Sized>(position: Position, rng: &mut R) -> Self {
        let mut skills = Self::baseline();
        for (slot, value) in signature_skills(position) {
            let jitter = rng.gen_range(-SKILL_JITTER..=SKILL_JITTER);
            *skills.slot_mut(*slot) = (value + jitter).clamp(0.0, MAX_SKILL);
        }
        skills
    }

    /// Same skill everywhere; used by tests and scripted scenarios
    pub fn uniform(value: f32) -> Self {
        let v = value.clamp(0.0, MAX_SKILL);
        Self {
            passing: v,
            shooting: v,
            tackling: v,
            dribbling: v,
            positioning: v,
            crossing: v,
            finishing: v,
            saving: v,
            speed: v,
            strength: v,
        }
    }

    fn slot_mut(&mut self, slot: SkillSlot) -> &mut f32 {
        match slot {
            SkillSlot::Passing => &mut self.passing,
            SkillSlot::Shooting => &mut self.shooting,
            SkillSlot::Tackling => &mut self.tackling,
            SkillSlot::Dribbling => &mut self.dribbling,
            SkillSlot::Positioning => &mut self.positioning,
            SkillSlot::Crossing => &mut self.crossing,
            SkillSlot::Finishing => &mut self.finishing,
            SkillSlot::Saving => &mut self.saving,
            SkillSlot::Speed => &mut self.speed,
            SkillSlot::Strength => &mut self.strength,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkillSlot {
    Passing,
    Shooting,
    Tackling,
    Dribbling,
    Positioning,
    Crossing,
    Finishing,
    Saving,
    Speed,
    Strength,
}

fn signature_skills(position: Position) -> &'static [(SkillSlot, f32)] {
    use SkillSlot::*;
    match position {
        Position::GK => &[(Saving, 0.8), (Positioning, 0.7), (Passing, 0.4)],
        Position::CB => &[(Tackling, 0.7), (Positioning, 0.7), (Strength, 0.7)],
        Position::LB | Position::RB => &[(Speed, 0.6), (Crossing, 0.6), (Tackling, 0.6)],
        Position::CDM => &[(Tackling, 0.7), (Passing, 0.7), (Positioning, 0.7)],
        Position::CM => &[(Passing, 0.8), (Positioning, 0.6), (Dribbling, 0.6)],
        Position::CAM => &[(Passing, 0.7), (Dribbling, 0.8), (Shooting, 0.7)],
        Position::LW | Position::RW => &[(Speed, 0.8), (Dribbling, 0.8), (Crossing, 0.7)],
        Position::ST => &[(Shooting, 0.9), (Finishing, 0.9), (Positioning, 0.7)],
    }
}

/// Running per-player match counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub passes_attempted: u32,
    pub passes_completed: u32,
    pub dribbles_attempted: u32,
    pub dribbles_completed: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub goals: u32,
    pub tackles: u32,
    pub interceptions: u32,
    pub ball_recoveries: u32,
    pub fouls: u32,
    pub saves: u32,
    /// Shots with xG below the low-quality threshold
    pub low_xg_shots: u32,
    /// Shots that were on target or above the low-quality threshold
    pub quality_shots: u32,
    pub final_third_entries: u32,
}
