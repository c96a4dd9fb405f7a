//! Event sinks
//!
//! The engine pushes every [`MatchEvent`] into an [`EventSink`]. Recording is
//! fire-and-forget; a sink never feeds back into the simulation.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{ActionType, MatchEvent, TeamSide};

pub trait EventSink {
    fn record(&mut self, event: MatchEvent);
}

impl EventSink for Vec<MatchEvent> {
    fn record(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn record(&mut self, event: MatchEvent) {
        (**self).record(event);
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: MatchEvent) {}
}

// ============================================================================
// EventLog
// ============================================================================

/// In-memory event buffer with summary queries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<MatchEvent>,
}

/// Aggregate view of an [`EventLog`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventLogStats {
    pub total_events: usize,
    /// Distinct case ids, match markers included
    pub unique_possessions: usize,
    pub actions_breakdown: BTreeMap<ActionType, usize>,
    pub teams: Vec<TeamSide>,
    pub total_xg_home: f32,
    pub total_xg_away: f32,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MatchEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one possession, in emission order
    pub fn possession_events<'a>(
        &'a self,
        case: &'a crate::models::CaseId,
    ) -> impl Iterator<Item = &'a MatchEvent> + 'a {
        self.events.iter().filter(move |e| &e.possession_id == case)
    }

    pub fn stats(&self) -> EventLogStats {
        let mut stats = EventLogStats { total_events: self.events.len(), ..Default::default() };
        let mut cases = BTreeSet::new();
        for event in &self.events {
            cases.insert(event.possession_id.to_string());
            *stats.actions_breakdown.entry(event.action).or_insert(0) += 1;
            if !stats.teams.contains(&event.team) {
                stats.teams.push(event.team);
            }
            match event.team {
                TeamSide::Home => stats.total_xg_home += event.xg_change,
                TeamSide::Away => stats.total_xg_away += event.xg_change,
            }
        }
        stats.unique_possessions = cases.len();
        stats
    }

    /// SHA-256 over a canonical line per event, as lowercase hex.
    ///
    /// Two runs with the same seed and configuration give the same digest.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for e in &self.events {
            let line = format!(
                "{}|{}|{}|{}|{}|{}|{}|{}|{}|{:.6}\n",
                e.possession_id,
                e.step,
                e.team,
                e.player_id,
                e.action,
                e.zone,
                e.pressure,
                e.team_status,
                e.outcome,
                e.xg_change
            );
            hasher.update(line.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl EventSink for EventLog {
    fn record(&mut self, event: MatchEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::default_kickoff;
    use crate::engine::zone::Zone;
    use crate::models::{CaseId, Outcome, PossessionId, StatusTag, TeamStatus};

    fn event(case: CaseId, team: TeamSide, action: ActionType, xg: f32) -> MatchEvent {
        MatchEvent {
            possession_id: case,
            timestamp: default_kickoff(),
            step: 1,
            minute: 0,
            second: 10,
            team,
            player_id: 9,
            action,
            zone: Zone::D3,
            pressure: 0,
            team_status: StatusTag::Live(TeamStatus::Tied),
            outcome: Outcome::Success,
            xg_change: xg,
            details: Default::default(),
        }
    }

    #[test]
    fn test_stats_breakdown() {
        let p1 = CaseId::Possession(PossessionId { step: 0, team: TeamSide::Home, seq: 1 });
        let p2 = CaseId::Possession(PossessionId { step: 3, team: TeamSide::Away, seq: 2 });
        let mut log = EventLog::new();
        log.record(event(CaseId::MatchStart, TeamSide::Home, ActionType::KickOff, 0.0));
        log.record(event(p1, TeamSide::Home, ActionType::Shot, 0.25));
        log.record(event(p1, TeamSide::Home, ActionType::Shot, 0.5));
        log.record(event(p2, TeamSide::Away, ActionType::Shot, 0.125));

        let stats = log.stats();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.unique_possessions, 3);
        assert_eq!(stats.actions_breakdown.get(&ActionType::Shot), Some(&3));
        assert_eq!(stats.teams, vec![TeamSide::Home, TeamSide::Away]);
        assert!((stats.total_xg_home - 0.75).abs() < 1e-6);
        assert!((stats.total_xg_away - 0.125).abs() < 1e-6);
        assert_eq!(log.possession_events(&p1).count(), 2);
    }

    #[test]
    fn test_digest_tracks_content() {
        let mut a = EventLog::new();
        let mut b = EventLog::new();
        assert_eq!(a.digest(), b.digest());
        // SHA-256 of no input, zero-padded lowercase hex
        assert_eq!(
            a.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        a.record(event(CaseId::MatchStart, TeamSide::Home, ActionType::KickOff, 0.0));
        assert_ne!(a.digest(), b.digest());
        b.record(event(CaseId::MatchStart, TeamSide::Home, ActionType::KickOff, 0.0));
        assert_eq!(a.digest(), b.digest());
        assert_eq!(a.digest().len(), 64);
    }

    #[test]
    fn test_null_and_vec_sinks() {
        let mut null = NullSink;
        null.record(event(CaseId::MatchEnd, TeamSide::Home, ActionType::MatchEnd, 0.0));
        fn push_through<S: EventSink>(mut sink: S, event: MatchEvent) {
            sink.record(event);
        }
        let mut buffer: Vec<MatchEvent> = Vec::new();
        push_through(&mut buffer, event(CaseId::MatchEnd, TeamSide::Home, ActionType::MatchEnd, 0.0));
        assert_eq!(buffer.len(), 1);
    }
}
