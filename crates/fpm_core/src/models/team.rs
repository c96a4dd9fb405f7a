use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::zone::{Row, Zone};

/// Team identity. Home defends row A and attacks row D; Away is mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// 0 for Home, 1 for Away
    pub const fn index(self) -> usize {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Home => "Home",
            TeamSide::Away => "Away",
        }
    }

    /// Single-letter tag used in possession ids
    pub fn initial(self) -> char {
        match self {
            TeamSide::Home => 'H',
            TeamSide::Away => 'A',
        }
    }

    /// Row holding the team's own goal
    pub fn defensive_row(self) -> Row {
        match self {
            TeamSide::Home => Row::A,
            TeamSide::Away => Row::D,
        }
    }

    /// Final third: the attacking-most row
    pub fn attacking_row(self) -> Row {
        match self {
            TeamSide::Home => Row::D,
            TeamSide::Away => Row::A,
        }
    }

    /// Row step that moves toward the opponent goal (+1 for Home, -1 for Away)
    pub fn forward_step(self) -> i8 {
        match self {
            TeamSide::Home => 1,
            TeamSide::Away => -1,
        }
    }

    /// Rows advanced from the team's own goal line (0 = own goal row, 3 = final third)
    pub fn progress(self, row: Row) -> u8 {
        match self {
            TeamSide::Home => row.index() as u8,
            TeamSide::Away => (Row::ALL.len() - 1 - row.index()) as u8,
        }
    }

    /// Whether moving from `from` to `to` advances toward the opponent goal
    pub fn is_forward(self, from: Zone, to: Zone) -> bool {
        self.progress(to.row()) > self.progress(from.row())
    }

    /// The row directly ahead of `row`, if any
    pub fn row_ahead(self, row: Row) -> Option<Row> {
        row.offset(self.forward_step())
    }

    /// Rows left to cover before reaching the final third
    pub fn rows_to_final_third(self, row: Row) -> u8 {
        self.progress(self.attacking_row()) - self.progress(row)
    }

    /// Map a zone expressed from the Home perspective into this team's frame.
    ///
    /// Away mirrors both rows and columns, so a Home left back in `B1`
    /// becomes an Away left back in `C5`.
    pub fn orient(self, home_zone: Zone) -> Zone {
        match self {
            TeamSide::Home => home_zone,
            TeamSide::Away => {
                let row = Row::ALL[Row::ALL.len() - 1 - home_zone.row().index()];
                home_zone.mirror().with_row(row)
            }
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoreline status from one team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamStatus {
    Leading,
    Trailing,
    Tied,
}

impl TeamStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TeamStatus::Leading => "Leading",
            TeamStatus::Trailing => "Trailing",
            TeamStatus::Tied => "Tied",
        }
    }
}

/// Final result classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[serde(rename = "Home Win")]
    HomeWin,
    #[serde(rename = "Away Win")]
    AwayWin,
    Draw,
}

impl MatchOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchOutcome::HomeWin => "Home Win",
            MatchOutcome::AwayWin => "Away Win",
            MatchOutcome::Draw => "Draw",
        }
    }
}

/// Goals per team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

impl Score {
    pub fn get(&self, side: TeamSide) -> u32 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn add_goal(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home += 1,
            TeamSide::Away => self.away += 1,
        }
    }

    pub fn status_for(&self, side: TeamSide) -> TeamStatus {
        let own = self.get(side);
        let other = self.get(side.opponent());
        match own.cmp(&other) {
            std::cmp::Ordering::Greater => TeamStatus::Leading,
            std::cmp::Ordering::Less => TeamStatus::Trailing,
            std::cmp::Ordering::Equal => TeamStatus::Tied,
        }
    }

    pub fn outcome(&self) -> MatchOutcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => MatchOutcome::HomeWin,
            std::cmp::Ordering::Less => MatchOutcome::AwayWin,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_helpers() {
        assert_eq!(TeamSide::Home.attacking_row(), Row::D);
        assert_eq!(TeamSide::Away.attacking_row(), Row::A);
        assert!(TeamSide::Home.is_forward(Zone::B2, Zone::C1));
        assert!(!TeamSide::Home.is_forward(Zone::B2, Zone::B3));
        assert!(TeamSide::Away.is_forward(Zone::C2, Zone::B2));
        assert_eq!(TeamSide::Home.rows_to_final_third(Row::B), 2);
        assert_eq!(TeamSide::Away.rows_to_final_third(Row::B), 1);
        assert_eq!(TeamSide::Away.row_ahead(Row::A), None);
        assert_eq!(TeamSide::Home.row_ahead(Row::A), Some(Row::B));
    }

    #[test]
    fn test_orient_mirrors_away() {
        assert_eq!(TeamSide::Home.orient(Zone::B1), Zone::B1);
        assert_eq!(TeamSide::Away.orient(Zone::B1), Zone::C5);
        assert_eq!(TeamSide::Away.orient(Zone::A3), Zone::D3);
        for zone in Zone::ALL {
            assert_eq!(TeamSide::Away.orient(TeamSide::Away.orient(zone)), zone);
        }
    }

    #[test]
    fn test_score_status_and_outcome() {
        let mut score = Score::default();
        assert_eq!(score.outcome(), MatchOutcome::Draw);
        assert_eq!(score.status_for(TeamSide::Home), TeamStatus::Tied);
        score.add_goal(TeamSide::Away);
        assert_eq!(score.outcome(), MatchOutcome::AwayWin);
        assert_eq!(score.status_for(TeamSide::Home), TeamStatus::Trailing);
        assert_eq!(score.status_for(TeamSide::Away), TeamStatus::Leading);
        assert_eq!(MatchOutcome::HomeWin.as_str(), "Home Win");
    }
}
