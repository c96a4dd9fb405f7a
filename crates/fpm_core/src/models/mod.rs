pub mod events;
pub mod match_result;
pub mod player;
pub mod team;

pub use events::{ActionType, CaseId, EventDetails, MatchEvent, Outcome, PossessionId, StatusTag};
pub use match_result::{MatchStats, MatchSummary, TeamTotals};
pub use player::{PlayerStats, Position, Skills};
pub use team::{MatchOutcome, Score, TeamSide, TeamStatus};
