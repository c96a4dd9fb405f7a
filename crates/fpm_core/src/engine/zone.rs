//! Zone Definitions
//!
//! The pitch is a fixed 4x5 grid. Rows run from `A` (the Home goal line) to
//! `D` (the Away goal line); columns run `1..=5` across the pitch.
//!
//! ```text
//!        col 1   col 2   col 3   col 4   col 5
//! row D   D1      D2      D3      D4      D5     <- Away goal
//! row C   C1      C2      C3      C4      C5
//! row B   B1      B2      B3      B4      B5
//! row A   A1      A2      A3      A4      A5     <- Home goal
//! ```
//!
//! Zones are plain `Copy` values; an invalid zone cannot be constructed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::TeamSide;

// ============================================================================
// Row
// ============================================================================

/// Row of the grid, ordered from the Home goal line to the Away goal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Row {
    A,
    B,
    C,
    D,
}

impl Row {
    /// All rows in order (Home goal line first)
    pub const ALL: [Row; 4] = [Row::A, Row::B, Row::C, Row::D];

    /// Row index (0-3)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Row offset by `delta` rows, or `None` when it falls off the grid.
    pub fn offset(self, delta: i8) -> Option<Self> {
        let idx = self.index() as i8 + delta;
        if idx < 0 {
            return None;
        }
        Self::from_index(idx as usize)
    }

    pub fn as_char(self) -> char {
        match self {
            Row::A => 'A',
            Row::B => 'B',
            Row::C => 'C',
            Row::D => 'D',
        }
    }

    /// The five zones of this row, column order
    pub fn zones(self) -> [Zone; COLUMN_COUNT as usize] {
        let base = self.index() * COLUMN_COUNT as usize;
        let mut out = [Zone::CENTER; COLUMN_COUNT as usize];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = Zone::ALL[base + i];
        }
        out
    }

    /// Row classification. Named from the Home perspective, like the zone labels.
    pub fn zone_type(self) -> ZoneType {
        match self {
            Row::A => ZoneType::DefensiveBox,
            Row::B => ZoneType::DefensiveThird,
            Row::C => ZoneType::Midfield,
            Row::D => ZoneType::AttackingThird,
        }
    }
}

/// Row-type classification of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    DefensiveBox,
    DefensiveThird,
    Midfield,
    AttackingThird,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::DefensiveBox => "defensive_box",
            ZoneType::DefensiveThird => "defensive_third",
            ZoneType::Midfield => "midfield",
            ZoneType::AttackingThird => "attacking_third",
        }
    }
}

// ============================================================================
// Zone
// ============================================================================

/// One cell of the 4x5 field grid.
///
/// Declaration order is row-major, so `zone as usize` is the zone index (0-19).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    A1,
    A2,
    A3,
    A4,
    A5,
    B1,
    B2,
    B3,
    B4,
    B5,
    C1,
    C2,
    C3,
    C4,
    C5,
    D1,
    D2,
    D3,
    D4,
    D5,
}

/// Number of zones on the grid
pub const ZONE_COUNT: usize = 20;
/// Number of columns (lanes) on the grid
pub const COLUMN_COUNT: u8 = 5;

impl Zone {
    /// All 20 zones in row-major order
    pub const ALL: [Zone; ZONE_COUNT] = [
        Zone::A1, Zone::A2, Zone::A3, Zone::A4, Zone::A5,
        Zone::B1, Zone::B2, Zone::B3, Zone::B4, Zone::B5,
        Zone::C1, Zone::C2, Zone::C3, Zone::C4, Zone::C5,
        Zone::D1, Zone::D2, Zone::D3, Zone::D4, Zone::D5,
    ];

    /// Center circle; also the fallback for failed lookups.
    pub const CENTER: Zone = Zone::C3;

    /// Create from row and 1-based column
    pub fn new(row: Row, col: u8) -> Option<Self> {
        if !(1..=COLUMN_COUNT).contains(&col) {
            return None;
        }
        Self::from_index(row.index() * COLUMN_COUNT as usize + (col - 1) as usize)
    }

    /// Create zone from index (0-19)
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Zone index (0-19) for table lookups
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn row(self) -> Row {
        // index / 5 is always < 4
        Row::ALL[self.index() / COLUMN_COUNT as usize]
    }

    /// 1-based column
    pub fn col(self) -> u8 {
        (self.index() % COLUMN_COUNT as usize) as u8 + 1
    }

    pub fn zone_type(self) -> ZoneType {
        self.row().zone_type()
    }

    /// Zones of the row a team attacks
    pub fn final_row(team: TeamSide) -> [Zone; COLUMN_COUNT as usize] {
        team.attacking_row().zones()
    }

    /// Same row, column mirrored across the pitch (1 <-> 5, 2 <-> 4).
    pub fn mirror(self) -> Self {
        Self::new(self.row(), COLUMN_COUNT + 1 - self.col()).unwrap_or(self)
    }

    /// Same column moved to `row`.
    pub fn with_row(self, row: Row) -> Self {
        Self::new(row, self.col()).unwrap_or(self)
    }

    /// Columns 2-4
    pub fn is_central_lane(self) -> bool {
        (2..=4).contains(&self.col())
    }

    /// Columns 1 and 5
    pub fn is_wide_lane(self) -> bool {
        matches!(self.col(), 1 | 5)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::A1 => "A1",
            Zone::A2 => "A2",
            Zone::A3 => "A3",
            Zone::A4 => "A4",
            Zone::A5 => "A5",
            Zone::B1 => "B1",
            Zone::B2 => "B2",
            Zone::B3 => "B3",
            Zone::B4 => "B4",
            Zone::B5 => "B5",
            Zone::C1 => "C1",
            Zone::C2 => "C2",
            Zone::C3 => "C3",
            Zone::C4 => "C4",
            Zone::C5 => "C5",
            Zone::D1 => "D1",
            Zone::D2 => "D2",
            Zone::D3 => "D3",
            Zone::D4 => "D4",
            Zone::D5 => "D5",
        }
    }

    /// Parse a zone label such as `"B4"` (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let row = match chars.next()?.to_ascii_uppercase() {
            'A' => Row::A,
            'B' => Row::B,
            'C' => Row::C,
            'D' => Row::D,
            _ => return None,
        };
        let col = chars.next()?.to_digit(10)? as u8;
        if chars.next().is_some() {
            return None;
        }
        Self::new(row, col)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_index_roundtrip() {
        for zone in Zone::ALL {
            assert_eq!(Zone::from_index(zone.index()), Some(zone));
        }
        assert_eq!(Zone::from_index(ZONE_COUNT), None);
    }

    #[test]
    fn test_row_and_column() {
        assert_eq!(Zone::A1.row(), Row::A);
        assert_eq!(Zone::A1.col(), 1);
        assert_eq!(Zone::C4.row(), Row::C);
        assert_eq!(Zone::C4.col(), 4);
        assert_eq!(Zone::D5.row(), Row::D);
        assert_eq!(Zone::D5.col(), 5);
        assert_eq!(Zone::new(Row::B, 3), Some(Zone::B3));
        assert_eq!(Zone::new(Row::B, 0), None);
        assert_eq!(Zone::new(Row::B, 6), None);
    }

    #[test]
    fn test_parse_and_display() {
        for zone in Zone::ALL {
            assert_eq!(Zone::parse(zone.as_str()), Some(zone));
            assert_eq!(zone.to_string(), zone.as_str());
        }
        assert_eq!(Zone::parse("c3"), Some(Zone::C3));
        assert_eq!(Zone::parse("E1"), None);
        assert_eq!(Zone::parse("A6"), None);
        assert_eq!(Zone::parse("A12"), None);
        assert_eq!(Zone::parse(""), None);
    }

    #[test]
    fn test_zone_types_by_row() {
        assert_eq!(Zone::A3.zone_type(), ZoneType::DefensiveBox);
        assert_eq!(Zone::B1.zone_type(), ZoneType::DefensiveThird);
        assert_eq!(Zone::C5.zone_type(), ZoneType::Midfield);
        assert_eq!(Zone::D2.zone_type(), ZoneType::AttackingThird);
        assert_eq!(ZoneType::AttackingThird.as_str(), "attacking_third");
    }

    #[test]
    fn test_mirror_is_involution() {
        for zone in Zone::ALL {
            assert_eq!(zone.mirror().mirror(), zone);
            assert_eq!(zone.mirror().row(), zone.row());
        }
        assert_eq!(Zone::B1.mirror(), Zone::B5);
        assert_eq!(Zone::C3.mirror(), Zone::C3);
    }

    #[test]
    fn test_lanes() {
        assert!(Zone::D3.is_central_lane());
        assert!(Zone::D2.is_central_lane());
        assert!(!Zone::D1.is_central_lane());
        assert!(Zone::A5.is_wide_lane());
        assert!(!Zone::A4.is_wide_lane());
    }

    #[test]
    fn test_final_row() {
        assert_eq!(Zone::final_row(TeamSide::Home), [Zone::D1, Zone::D2, Zone::D3, Zone::D4, Zone::D5]);
        assert_eq!(Zone::final_row(TeamSide::Away)[4], Zone::A5);
        assert_eq!(Row::B.zones()[0], Zone::B1);
    }

    #[test]
    fn test_row_offset() {
        assert_eq!(Row::A.offset(1), Some(Row::B));
        assert_eq!(Row::A.offset(-1), None);
        assert_eq!(Row::D.offset(1), None);
        assert_eq!(Row::D.offset(-3), Some(Row::A));
    }
}
