//! Lineups and kick-off placement.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::zone::Zone;
use crate::error::{MatchError, Result};
use crate::models::{Position, TeamSide};

/// Players per side
pub const MAX_PLAYERS: usize = 11;

/// One lineup entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: Position,
    pub jersey: u8,
    /// Role label used in the display name, e.g. "Left Mid"
    #[serde(default)]
    pub role: Option<String>,
}

impl FormationSlot {
    pub fn new(position: Position, jersey: u8, role: &str) -> Self {
        Self { position, jersey, role: Some(role.to_string()) }
    }

    pub fn role_label(&self) -> &str {
        self.role.as_deref().unwrap_or_else(|| self.position.as_str())
    }
}

/// A named lineup in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub slots: Vec<FormationSlot>,
}

impl Formation {
    pub const PRESET_NAMES: [&'static str; 2] = ["4-3-3", "4-4-2"];

    pub fn four_three_three() -> Self {
        use Position::*;
        Self {
            name: "4-3-3".to_string(),
            slots: vec![
                FormationSlot::new(GK, 1, "Goalkeeper"),
                FormationSlot::new(CB, 4, "Center Back"),
                FormationSlot::new(CB, 5, "Center Back"),
                FormationSlot::new(LB, 3, "Left Back"),
                FormationSlot::new(RB, 2, "Right Back"),
                FormationSlot::new(CDM, 6, "Defensive Mid"),
                FormationSlot::new(CM, 8, "Central Mid"),
                FormationSlot::new(CAM, 10, "Attacking Mid"),
                FormationSlot::new(LW, 11, "Left Wing"),
                FormationSlot::new(RW, 7, "Right Wing"),
                FormationSlot::new(ST, 9, "Striker"),
            ],
        }
    }

    pub fn four_four_two() -> Self {
        use Position::*;
        Self {
            name: "4-4-2".to_string(),
            slots: vec![
                FormationSlot::new(GK, 1, "Goalkeeper"),
                FormationSlot::new(CB, 4, "Center Back"),
                FormationSlot::new(CB, 5, "Center Back"),
                FormationSlot::new(LB, 3, "Left Back"),
                FormationSlot::new(RB, 2, "Right Back"),
                FormationSlot::new(CM, 6, "Central Mid"),
                FormationSlot::new(CM, 8, "Central Mid"),
                FormationSlot::new(LW, 11, "Left Mid"),
                FormationSlot::new(RW, 7, "Right Mid"),
                FormationSlot::new(ST, 9, "Striker"),
                FormationSlot::new(ST, 10, "Second Striker"),
            ],
        }
    }

    /// Look up a built-in lineup by name
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim() {
            "4-3-3" | "433" => Ok(Self::four_three_three()),
            "4-4-2" | "442" => Ok(Self::four_four_two()),
            other => Err(MatchError::InvalidFormation {
                name: other.to_string(),
                reason: format!("unknown preset (known: {})", Self::PRESET_NAMES.join(", ")),
            }),
        }
    }

    /// Roster size and jersey checks
    pub fn validate(&self, team: TeamSide) -> Result<()> {
        if self.slots.is_empty() {
            return Err(MatchError::EmptyRoster { team: team.to_string() });
        }
        if self.slots.len() > MAX_PLAYERS {
            return Err(self.invalid(format!(
                "{} players, at most {} allowed",
                self.slots.len(),
                MAX_PLAYERS
            )));
        }
        let mut seen = HashSet::new();
        for slot in &self.slots {
            if slot.jersey == 0 {
                return Err(self.invalid("jersey 0 is reserved".to_string()));
            }
            if !seen.insert(slot.jersey) {
                return Err(self.invalid(format!("duplicate jersey {}", slot.jersey)));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> MatchError {
        MatchError::InvalidFormation { name: self.name.clone(), reason }
    }
}

/// Kick-off zone per position and side.
pub fn initial_zone(position: Position, team: TeamSide) -> Zone {
    use Position::*;
    match team {
        TeamSide::Home => match position {
            GK => Zone::A3,
            CB => Zone::A2,
            LB => Zone::A1,
            RB => Zone::A5,
            CDM => Zone::B3,
            CM => Zone::C2,
            CAM => Zone::C4,
            LW => Zone::C1,
            RW => Zone::C5,
            ST => Zone::D3,
        },
        TeamSide::Away => match position {
            GK => Zone::D3,
            CB => Zone::D4,
            LB => Zone::D5,
            RB => Zone::D1,
            CDM => Zone::C3,
            CM => Zone::C4,
            CAM => Zone::C2,
            LW => Zone::C5,
            RW => Zone::C1,
            ST => Zone::A3,
        },
    }
}
