use serde::Serialize;
use std::collections::BTreeMap;

use super::events::{ActionType, MatchEvent, Outcome};
use super::team::{MatchOutcome, Score, TeamSide};

/// Per-team running totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamTotals {
    pub possessions: u32,
    pub passes: u32,
    pub passes_completed: u32,
    pub dribbles: u32,
    pub shots: u32,
    pub shots_on_target: u32,
    pub goals: u32,
    pub xg: f32,
    pub final_third_entries: u32,
    pub counter_attack_actions: u32,
}

/// Aggregate event statistics for one match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub total_events: u32,
    pub action_counts: BTreeMap<ActionType, u32>,
    pub home: TeamTotals,
    pub away: TeamTotals,
}

impl MatchStats {
    pub fn team(&self, side: TeamSide) -> &TeamTotals {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    fn team_mut(&mut self, side: TeamSide) -> &mut TeamTotals {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn count(&self, action: ActionType) -> u32 {
        self.action_counts.get(&action).copied().unwrap_or(0)
    }

    /// Fold one emitted event into the totals
    pub fn record(&mut self, event: &MatchEvent) {
        self.total_events += 1;
        *self.action_counts.entry(event.action).or_insert(0) += 1;

        if event.action.is_match_boundary() {
            return;
        }

        let totals = self.team_mut(event.team);
        if event.action.is_counter_attack() {
            totals.counter_attack_actions += 1;
        }
        match event.action {
            ActionType::PossessionStart => totals.possessions += 1,
            ActionType::Pass | ActionType::CounterAttackPass => {
                totals.passes += 1;
                if event.outcome == Outcome::Success {
                    totals.passes_completed += 1;
                }
            }
            ActionType::Dribble | ActionType::CounterAttackDribble => totals.dribbles += 1,
            ActionType::Shot | ActionType::CounterAttackShot => {
                totals.shots += 1;
                totals.xg += event.xg_change;
                if matches!(event.outcome, Outcome::OnTarget | Outcome::Goal) {
                    totals.shots_on_target += 1;
                }
            }
            ActionType::Goal => totals.goals += 1,
            ActionType::FinalThirdEntry => totals.final_third_entries += 1,
            _ => {}
        }
    }
}

/// Summary query result. Final once the match has ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub final_score: Score,
    pub duration_minutes: u32,
    pub total_possessions: u32,
    pub total_steps: u64,
    pub result: MatchOutcome,
    pub finished: bool,
    pub stats: MatchStats,
}

impl MatchSummary {
    /// Score formatted as `home-away`
    pub fn scoreline(&self) -> String {
        format!("{}-{}", self.final_score.home, self.final_score.away)
    }
}
