//! Field geometry
//!
//! Static, read-only geometry for the 20-zone grid: bounds, centers,
//! adjacency, distances and pressure readings. One shared instance lives in
//! [`FIELD`]; all queries are pure.

use once_cell::sync::Lazy;

use super::zone::{Row, Zone, COLUMN_COUNT};
use crate::models::TeamSide;

/// Field width in field units (5 columns of 10)
pub const FIELD_WIDTH: f32 = 50.0;
/// Field length in field units (4 rows of 20)
pub const FIELD_LENGTH: f32 = 80.0;

/// Pressure cap returned by [`Field::pressure_level`]
pub const MAX_PRESSURE: u8 = 3;
/// Pressure contributed by an opponent standing in the same zone
pub const SAME_ZONE_PRESSURE: u8 = 2;
/// Pressure contributed by an opponent in an adjacent zone
pub const ADJACENT_ZONE_PRESSURE: u8 = 1;

/// Process-wide field instance
pub static FIELD: Lazy<Field> = Lazy::new(Field::standard);

/// Rectangular bounds and center of one zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneGeometry {
    pub zone: Zone,
    /// [x0, x1) across the pitch
    pub x_range: (f32, f32),
    /// [y0, y1) along the pitch, from the Home goal line
    pub y_range: (f32, f32),
    pub center: (f32, f32),
}

/// The 4x5 zone grid with precomputed adjacency
#[derive(Debug, Clone)]
pub struct Field {
    pub width: f32,
    pub length: f32,
    geometry: Vec<ZoneGeometry>,
    adjacency: Vec<Vec<Zone>>,
}

impl Default for Field {
    fn default() -> Self {
        Self::standard()
    }
}

impl Field {
    /// 50 x 80 field
    pub fn standard() -> Self {
        Self::new(FIELD_WIDTH, FIELD_LENGTH)
    }

    pub fn new(width: f32, length: f32) -> Self {
        let zone_width = width / COLUMN_COUNT as f32;
        let zone_length = length / Row::ALL.len() as f32;

        let geometry = Zone::ALL
            .iter()
            .map(|&zone| {
                let x0 = (zone.col() - 1) as f32 * zone_width;
                let y0 = zone.row().index() as f32 * zone_length;
                ZoneGeometry {
                    zone,
                    x_range: (x0, x0 + zone_width),
                    y_range: (y0, y0 + zone_length),
                    center: (x0 + zone_width / 2.0, y0 + zone_length / 2.0),
                }
            })
            .collect();

        let adjacency = Zone::ALL.iter().map(|&zone| neighbours(zone)).collect();

        Self { width, length, geometry, adjacency }
    }

    pub fn geometry(&self, zone: Zone) -> &ZoneGeometry {
        &self.geometry[zone.index()]
    }

    pub fn center(&self, zone: Zone) -> (f32, f32) {
        self.geometry(zone).center
    }

    /// ((x0, x1), (y0, y1))
    pub fn bounds(&self, zone: Zone) -> ((f32, f32), (f32, f32)) {
        let geo = self.geometry(zone);
        (geo.x_range, geo.y_range)
    }

    /// 8-neighbourhood clipped at the grid edges (3, 5 or 8 zones)
    pub fn adjacent(&self, zone: Zone) -> &[Zone] {
        &self.adjacency[zone.index()]
    }

    /// Euclidean distance between zone centers
    pub fn distance(&self, a: Zone, b: Zone) -> f32 {
        let (ax, ay) = self.center(a);
        let (bx, by) = self.center(b);
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    /// Zone containing a field coordinate.
    ///
    /// Coordinates are clamped to the field; a non-finite coordinate falls
    /// back to the center zone.
    pub fn zone_at(&self, x: f32, y: f32) -> Zone {
        if !x.is_finite() || !y.is_finite() {
            return Zone::CENTER;
        }
        let zone_width = self.width / COLUMN_COUNT as f32;
        let zone_length = self.length / Row::ALL.len() as f32;

        let col = ((x.clamp(0.0, self.width) / zone_width) as usize).min(COLUMN_COUNT as usize - 1);
        let row = ((y.clamp(0.0, self.length) / zone_length) as usize).min(Row::ALL.len() - 1);

        Zone::from_index(row * COLUMN_COUNT as usize + col).unwrap_or(Zone::CENTER)
    }

    /// Pressure on `zone`: 2 per opponent in the zone, 1 per adjacent
    /// opponent, capped at 3.
    pub fn pressure_level<I>(&self, zone: Zone, opponent_zones: I) -> u8
    where
        I: IntoIterator<Item = Zone>,
    {
        let adjacent = self.adjacent(zone);
        let mut pressure: u32 = 0;
        for opponent in opponent_zones {
            if opponent == zone {
                pressure += SAME_ZONE_PRESSURE as u32;
            } else if adjacent.contains(&opponent) {
                pressure += ADJACENT_ZONE_PRESSURE as u32;
            }
            if pressure >= MAX_PRESSURE as u32 {
                return MAX_PRESSURE;
            }
        }
        pressure as u8
    }

    /// Zone of the goal the team attacks
    pub fn goal_zone(&self, team: TeamSide) -> Zone {
        match team {
            TeamSide::Home => Zone::D3,
            TeamSide::Away => Zone::A3,
        }
    }

    /// Own half: rows A-B for Home, C-D for Away
    pub fn is_defensive(&self, zone: Zone, team: TeamSide) -> bool {
        team.progress(zone.row()) < 2
    }

    /// Opponent half: rows C-D for Home, A-B for Away
    pub fn is_attacking(&self, zone: Zone, team: TeamSide) -> bool {
        !self.is_defensive(zone, team)
    }

    /// Whether the zone is in the team's final third (attacking-most row)
    pub fn is_final_third(&self, zone: Zone, team: TeamSide) -> bool {
        zone.row() == team.attacking_row()
    }
}

fn neighbours(zone: Zone) -> Vec<Zone> {
    let mut out = Vec::with_capacity(8);
    for dr in -1i8..=1 {
        for dc in -1i8..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let Some(row) = zone.row().offset(dr) else {
                continue;
            };
            let col = zone.col() as i8 + dc;
            if col < 1 {
                continue;
            }
            if let Some(next) = Zone::new(row, col as u8) {
                out.push(next);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_geometry_matches_grid() {
        let field = Field::standard();
        assert_eq!(field.center(Zone::A1), (5.0, 10.0));
        assert_eq!(field.center(Zone::D3), (25.0, 70.0));
        assert_eq!(field.bounds(Zone::B2), ((10.0, 20.0), (20.0, 40.0)));
    }

    #[test]
    fn test_adjacency_counts() {
        let field = Field::standard();
        // Corners have 3 neighbours, edges 5, interior 8
        assert_eq!(field.adjacent(Zone::A1).len(), 3);
        assert_eq!(field.adjacent(Zone::D5).len(), 3);
        assert_eq!(field.adjacent(Zone::A3).len(), 5);
        assert_eq!(field.adjacent(Zone::B1).len(), 5);
        assert_eq!(field.adjacent(Zone::B3).len(), 8);
        assert_eq!(field.adjacent(Zone::C4).len(), 8);
    }

    #[test]
    fn test_adjacency_symmetric_and_valid() {
        let field = Field::standard();
        for zone in Zone::ALL {
            for &other in field.adjacent(zone) {
                assert!(Zone::ALL.contains(&other));
                assert_ne!(zone, other);
                assert!(
                    field.adjacent(other).contains(&zone),
                    "{} -> {} not symmetric",
                    zone,
                    other
                );
            }
        }
    }

    #[test]
    fn test_distance() {
        let field = Field::standard();
        assert_eq!(field.distance(Zone::D3, Zone::D3), 0.0);
        assert_eq!(field.distance(Zone::D3, Zone::D2), 10.0);
        assert_eq!(field.distance(Zone::D3, Zone::C3), 20.0);
        let diag = field.distance(Zone::A1, Zone::B2);
        assert!((diag - (10.0f32.powi(2) + 20.0f32.powi(2)).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_pressure_levels() {
        let field = Field::standard();
        assert_eq!(field.pressure_level(Zone::C3, Vec::<Zone>::new()), 0);
        assert_eq!(field.pressure_level(Zone::C3, [Zone::C4]), 1);
        assert_eq!(field.pressure_level(Zone::C3, [Zone::C3]), 2);
        assert_eq!(field.pressure_level(Zone::C3, [Zone::C3, Zone::B3]), 3);
        assert_eq!(field.pressure_level(Zone::C3, [Zone::C3, Zone::C3, Zone::C3]), 3);
        // Non-adjacent opponents apply no pressure
        assert_eq!(field.pressure_level(Zone::C3, [Zone::A1, Zone::A5]), 0);
    }

    #[test]
    fn test_team_classification() {
        let field = Field::standard();
        assert_eq!(field.goal_zone(TeamSide::Home), Zone::D3);
        assert_eq!(field.goal_zone(TeamSide::Away), Zone::A3);
        assert!(field.is_defensive(Zone::B2, TeamSide::Home));
        assert!(field.is_attacking(Zone::C2, TeamSide::Home));
        assert!(field.is_defensive(Zone::C2, TeamSide::Away));
        assert!(field.is_attacking(Zone::B2, TeamSide::Away));
        assert!(field.is_final_third(Zone::D1, TeamSide::Home));
        assert!(field.is_final_third(Zone::A1, TeamSide::Away));
    }

    #[test]
    fn test_zone_at_clamps_and_falls_back() {
        let field = Field::standard();
        assert_eq!(field.zone_at(5.0, 10.0), Zone::A1);
        assert_eq!(field.zone_at(49.9, 79.9), Zone::D5);
        assert_eq!(field.zone_at(500.0, 500.0), Zone::D5);
        assert_eq!(field.zone_at(-3.0, -3.0), Zone::A1);
        assert_eq!(field.zone_at(f32::NAN, 10.0), Zone::C3);
    }

    proptest! {
        #[test]
        fn prop_pressure_is_bounded(opponents in proptest::collection::vec(0usize..20, 0..30), zone in 0usize..20) {
            let field = Field::standard();
            let zone = Zone::from_index(zone).unwrap();
            let opponents = opponents.into_iter().filter_map(Zone::from_index);
            let level = field.pressure_level(zone, opponents);
            prop_assert!(level <= MAX_PRESSURE);
        }

        #[test]
        fn prop_zone_at_always_valid(x in -100.0f32..200.0, y in -100.0f32..200.0) {
            let zone = FIELD.zone_at(x, y);
            prop_assert!(Zone::ALL.contains(&zone));
        }
    }
}
