//! Match Contract Tests
//!
//! Whole-match rules checked through the public API:
//! 1. Ball ownership (zero or one holder, carrier points at it)
//! 2. Case ids on every non-boundary event
//! 3. Determinism per seed
//! 4. Step budget and terminal events

use fpm_core::engine::MatchClock;
use fpm_core::{
    ActionType, CaseId, EventLog, MatchConfig, MatchEngine, MatchOutcome, NullSink, Outcome,
    TacticalPreset, TeamSide,
};
use proptest::prelude::*;

fn run_to_end(config: MatchConfig) -> MatchEngine<EventLog> {
    let mut engine = MatchEngine::with_event_log(config).unwrap();
    while engine.tick() {
        engine.check_invariants().unwrap();
    }
    engine
}

#[test]
fn test_zero_duration_is_kickoff_then_end() {
    let engine = run_to_end(MatchConfig::default().with_seed(42).with_duration(0));
    let actions: Vec<ActionType> = engine.sink().events().iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![ActionType::KickOff, ActionType::MatchEnd]);

    let summary = engine.summary();
    assert_eq!(summary.final_score.home, 0);
    assert_eq!(summary.final_score.away, 0);
    assert_eq!(summary.result, MatchOutcome::Draw);
    assert_eq!(summary.total_possessions, 0);
    assert!(summary.finished);
}

#[test]
fn test_full_match_runs_540_ticks() {
    let mut engine = MatchEngine::new(MatchConfig::default().with_seed(7), NullSink).unwrap();
    let mut ticks = 0u64;
    loop {
        ticks += 1;
        if !engine.tick() {
            break;
        }
    }
    // The 540th tick reaches minute 90 and ends the match
    assert_eq!(ticks, 540);
    assert_eq!(engine.clock(), MatchClock { minute: 90, second: 0, step: 540 });
    assert!(engine.is_finished());
    assert!(!engine.tick());
    assert_eq!(engine.clock().step, 540);
}

#[test]
fn test_ball_invariants_hold_every_tick() {
    for seed in [1, 2, 3] {
        let engine = run_to_end(MatchConfig::default().with_seed(seed).with_duration(30));
        assert!(engine.ball_carrier().map_or(true, |p| p.has_ball));
    }
}

#[test]
fn test_events_carry_case_ids() {
    let engine = run_to_end(MatchConfig::default().with_seed(99).with_duration(45));
    let events = engine.sink().events();

    assert_eq!(events.first().map(|e| e.action), Some(ActionType::KickOff));
    assert_eq!(events.last().map(|e| e.action), Some(ActionType::MatchEnd));
    for event in events {
        if event.action.is_match_boundary() {
            assert!(event.possession_id.possession().is_none());
            assert_eq!(event.player_id, 0);
        } else {
            let id = event.possession_id.possession();
            assert!(id.is_some(), "{} without a possession id", event.action);
            assert!(event.pressure <= 3);
        }
    }
    assert_eq!(events.last().map(|e| e.possession_id), Some(CaseId::MatchEnd));
}

#[test]
fn test_possessions_open_and_close_in_order() {
    let engine = run_to_end(MatchConfig::default().with_seed(5).with_duration(45));
    let events = engine.sink().events();

    let starts = events.iter().filter(|e| e.action == ActionType::PossessionStart).count();
    assert_eq!(starts as u32, engine.possession_count());

    // Each PossessionEnd is followed by a start for the other side
    for pair in events.windows(2) {
        if pair[0].action == ActionType::PossessionEnd {
            let next = &pair[1];
            assert_eq!(next.action, ActionType::PossessionStart);
            assert_eq!(next.team, pair[0].team.opponent());
        }
    }

    // Goals end their possession with reason Goal
    for (i, event) in events.iter().enumerate() {
        if event.action == ActionType::Goal {
            assert_eq!(events[i + 1].action, ActionType::PossessionEnd);
            assert_eq!(events[i + 1].outcome, Outcome::Goal);
        }
    }
}

#[test]
fn test_summary_matches_event_log() {
    let engine = run_to_end(MatchConfig::default().with_seed(21));
    let summary = engine.summary();
    let log_stats = engine.sink().stats();

    assert_eq!(summary.stats.total_events as usize, log_stats.total_events);
    assert_eq!(summary.stats.count(ActionType::Goal), summary.final_score.home + summary.final_score.away);
    assert_eq!(summary.stats.home.goals, summary.final_score.home);
    assert!((summary.stats.home.xg - log_stats.total_xg_home).abs() < 1e-3);
    assert!((summary.stats.away.xg - log_stats.total_xg_away).abs() < 1e-3);
    assert_eq!(summary.duration_minutes, 90);
    assert_eq!(summary.result, summary.final_score.outcome());
}

#[test]
fn test_same_seed_same_stream() {
    let a = run_to_end(MatchConfig::default().with_seed(1234).with_duration(45));
    let b = run_to_end(MatchConfig::default().with_seed(1234).with_duration(45));
    assert_eq!(a.sink().digest(), b.sink().digest());
    assert_eq!(a.sink().events(), b.sink().events());

    let c = run_to_end(MatchConfig::default().with_seed(1235).with_duration(45));
    assert_ne!(a.sink().digest(), c.sink().digest());
}

#[test]
fn test_counter_team_only_relabels_with_counter_profile() {
    let mut config = MatchConfig::default().with_seed(8);
    config.home.tactics = TacticalPreset::Standard;
    config.away.tactics = TacticalPreset::Possession;
    let engine = run_to_end(config);
    assert!(engine.sink().events().iter().all(|e| !e.action.is_counter_attack()));
    assert!(engine
        .sink()
        .events()
        .iter()
        .all(|e| e.action != ActionType::FinalThirdEntry));
}

#[test]
fn test_timestamps_follow_clock() {
    let config = MatchConfig::default().with_seed(3).with_duration(5);
    let kickoff = config.kickoff_time;
    let engine = run_to_end(config);
    for event in engine.sink().events() {
        let elapsed = (event.timestamp - kickoff).num_seconds();
        assert_eq!(elapsed, event.minute as i64 * 60 + event.second as i64);
    }
    let home_events = engine.sink().events().iter().filter(|e| e.team == TeamSide::Home).count();
    assert!(home_events > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_any_seed_keeps_invariants(seed in any::<u64>(), minutes in 0u32..20) {
        let mut engine = MatchEngine::with_event_log(
            MatchConfig::default().with_seed(seed).with_duration(minutes),
        ).unwrap();
        while engine.tick() {
            prop_assert!(engine.check_invariants().is_ok());
        }
        prop_assert!(engine.is_finished());
        let events = engine.sink().events();
        prop_assert_eq!(events.last().map(|e| e.action), Some(ActionType::MatchEnd));
        for p in engine.roster() {
            prop_assert!((0.1..=1.0).contains(&p.confidence));
            prop_assert!((0.0..=100.0).contains(&p.energy));
        }
    }
}
