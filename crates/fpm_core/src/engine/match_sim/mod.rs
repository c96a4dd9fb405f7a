//! Match Simulation Engine
//!
//! Time-stepped orchestration of one match. `MatchEngine` owns the clock,
//! score, roster, ball carrier, current possession, RNG and event sink;
//! player behaviour is implemented as further `impl MatchEngine` blocks in the
//! sibling files, each taking a roster index.
//!
//! ## Architecture
//!
//! - L1: `probability.rs` - stateless weights and probabilities
//! - L2: `actions.rs` - pure action resolution (Context + Rolls -> Result)
//! - L3: `match_sim/` - stateful tick loop, possession bookkeeping, events
//!
//! ## Tick order
//!
//! ```text
//! tick()
//!   ├─ advance clock (seconds_per_step, whole minutes carried)
//!   ├─ minute >= duration ─▶ MatchEnd, stop
//!   ├─ step every player in roster order (Home then Away)
//!   ├─ p=0.05  exogenous event (Foul / Interception / Clearance / BallRecovery)
//!   └─ p=0.10  defensive challenge on the carrier (Tackle / Interception)
//! ```
//!
//! Everything runs on one thread in a fixed order, so a seed and a
//! configuration fully determine the event stream.

mod action_decision;
mod dribbling;
mod movement;
mod passing;
mod possession;
mod shooting;
mod tackle;


pub use action_decision::OnBallAction;

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

use super::agent::PlayerAgent;
use super::config::MatchConfig;
use super::field::FIELD;
use super::sink::{EventLog, EventSink};
use super::zone::Zone;
use crate::error::Result;
use crate::models::{
    ActionType, CaseId, EventDetails, MatchEvent, MatchStats, MatchSummary, Outcome,
    PossessionId, Score, Skills, StatusTag, TeamSide,
};
use crate::tactics::modifiers::confidence_update;

/// Chance per tick of a random Foul / Interception / Clearance / BallRecovery
pub const EXOGENOUS_EVENT_PROBABILITY: f32 = 0.05;
/// Chance per tick of a defensive challenge on the ball carrier
pub const CHALLENGE_PROBABILITY: f32 = 0.10;

// ============================================================================
// State types
// ============================================================================

/// Match clock. `minute` never exceeds the configured duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchClock {
    pub minute: u32,
    pub second: u32,
    pub step: u64,
}

impl MatchClock {
    pub fn elapsed_seconds(&self) -> i64 {
        self.minute as i64 * 60 + self.second as i64
    }

    fn advance(&mut self, seconds: u32) {
        self.second += seconds;
        while self.second >= 60 {
            self.minute += 1;
            self.second -= 60;
        }
        self.step += 1;
    }
}

/// The possession currently in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Possession {
    pub id: PossessionId,
    pub team: TeamSide,
    /// Pass/Dribble/Shot actions taken so far
    pub chain_length: u32,
}

// ============================================================================
// MatchEngine
// ============================================================================

/// One match: clock, score, roster, ball and possession state plus the sink
/// that receives every event.
pub struct MatchEngine<S: EventSink = EventLog> {
    config: MatchConfig,
    roster: Vec<PlayerAgent>,
    clock: MatchClock,
    score: Score,
    ball_zone: Zone,
    ball_carrier: Option<usize>,
    possession: Option<Possession>,
    possession_count: u32,
    rng: ChaCha8Rng,
    sink: S,
    stats: MatchStats,
    running: bool,
    finished: bool,
}

/// Shorthand used by the CLI and batch runner
pub type Match<S = EventLog> = MatchEngine<S>;

impl MatchEngine<EventLog> {
    /// Engine recording into an in-memory [`EventLog`]
    pub fn with_event_log(config: MatchConfig) -> Result<Self> {
        Self::new(config, EventLog::new())
    }
}

impl<S: EventSink> MatchEngine<S> {
    /// Validate the configuration, build both rosters and kick off.
    ///
    /// Kick-off emits `KickOff` and, unless the step budget is zero, starts
    /// the first possession for a randomly chosen team.
    pub fn new(config: MatchConfig, sink: S) -> Result<Self> {
        config.check()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut roster = Vec::new();
        for side in TeamSide::BOTH {
            let team = config.team(side);
            let lineup = team.lineup()?;
            let profile = Arc::new(team.profile());
            for slot in &lineup.slots {
                let skills = Skills::for_position(slot.position, &mut rng);
                roster.push(PlayerAgent::new(roster.len(), side, slot, skills, profile.clone()));
            }
        }

        log::debug!(
            "match {} built: {} players, seed {:?}, {} steps",
            config.match_label,
            roster.len(),
            config.seed,
            config.step_budget()
        );

        let mut engine = Self {
            config,
            roster,
            clock: MatchClock::default(),
            score: Score::default(),
            ball_zone: Zone::CENTER,
            ball_carrier: None,
            possession: None,
            possession_count: 0,
            rng,
            sink,
            stats: MatchStats::default(),
            running: true,
            finished: false,
        };
        engine.kick_off();
        Ok(engine)
    }

    fn kick_off(&mut self) {
        let starting = if self.rng.gen_bool(0.5) { TeamSide::Home } else { TeamSide::Away };
        let event = self.boundary_event(
            CaseId::MatchStart,
            starting,
            ActionType::KickOff,
            StatusTag::Live(self.score.status_for(starting)),
            Outcome::Success,
        );
        self.emit_event(event);

        if self.config.step_budget() == 0 {
            self.end_match();
            return;
        }
        self.start_possession(starting, None);
    }

    // ========================================================================
    // Tick loop
    // ========================================================================

    /// Advance one step. Returns `false` once the match is over.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.clock.advance(self.config.seconds_per_step);
        if self.clock.minute >= self.config.duration_minutes {
            self.end_match();
            return false;
        }

        for idx in 0..self.roster.len() {
            self.step_player(idx);
        }

        if self.rng.gen::<f32>() < EXOGENOUS_EVENT_PROBABILITY {
            self.exogenous_event();
        }

        if self.rng.gen::<f32>() < CHALLENGE_PROBABILITY && self.ball_carrier.is_some() {
            self.defensive_challenge();
        }

        true
    }

    /// Tick until the match ends or is stopped
    pub fn run(&mut self) -> MatchSummary {
        while self.tick() {}
        self.summary()
    }

    /// External stop: later ticks are no-ops and no `MatchEnd` is emitted
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("match {} stopped at step {}", self.config.match_label, self.clock.step);
        }
        self.running = false;
    }

    fn end_match(&mut self) {
        self.running = false;
        self.finished = true;
        let result = self.score.outcome();
        let event = self.boundary_event(
            CaseId::MatchEnd,
            TeamSide::Home,
            ActionType::MatchEnd,
            StatusTag::Final(result),
            Outcome::Complete,
        );
        self.emit_event(event);

        log::info!(
            "match {} finished: Home {} - {} Away ({}), {} possessions, {} steps",
            self.config.match_label,
            self.score.home,
            self.score.away,
            result.as_str(),
            self.possession_count,
            self.clock.step
        );
    }

    /// Per-tick entry point of one agent
    fn step_player(&mut self, idx: usize) {
        if !self.running {
            return;
        }

        let energy_loss = self.rng.gen_range(0.1f32..=0.3);
        let chain = self.chain_length_for(self.roster[idx].side);
        let agent = &mut self.roster[idx];
        agent.spend_energy(energy_loss);
        if let Some(success) = agent.last_success {
            let update =
                confidence_update(success, chain, agent.last_shot_reward, &agent.tactics);
            agent.apply_confidence(update);
        }

        if self.roster[idx].has_ball {
            self.decide_with_ball(idx);
        } else {
            self.decide_without_ball(idx);
        }
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub(crate) fn emit_event(&mut self, event: MatchEvent) {
        log::trace!(
            "[{:02}:{:02}] {} {} #{} {} {} {}",
            event.minute,
            event.second,
            event.possession_id,
            event.team,
            event.player_id,
            event.action,
            event.zone,
            event.outcome
        );
        self.stats.record(&event);
        self.sink.record(event);
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.config.kickoff_time + Duration::seconds(self.clock.elapsed_seconds())
    }

    fn current_case(&self) -> CaseId {
        match &self.possession {
            Some(p) => CaseId::Possession(p.id),
            None => CaseId::MatchStart,
        }
    }

    fn boundary_event(
        &self,
        case: CaseId,
        team: TeamSide,
        action: ActionType,
        team_status: StatusTag,
        outcome: Outcome,
    ) -> MatchEvent {
        MatchEvent {
            possession_id: case,
            timestamp: self.timestamp(),
            step: self.clock.step,
            minute: self.clock.minute,
            second: self.clock.second,
            team,
            player_id: 0,
            action,
            zone: Zone::CENTER,
            pressure: 0,
            team_status,
            outcome,
            xg_change: 0.0,
            details: EventDetails::default(),
        }
    }

    /// Event by roster player `idx` in the current possession.
    pub(crate) fn player_event(
        &self,
        idx: usize,
        action: ActionType,
        zone: Zone,
        pressure: u8,
        outcome: Outcome,
        xg_change: f32,
    ) -> MatchEvent {
        let agent = &self.roster[idx];
        MatchEvent {
            possession_id: self.current_case(),
            timestamp: self.timestamp(),
            step: self.clock.step,
            minute: self.clock.minute,
            second: self.clock.second,
            team: agent.side,
            player_id: agent.jersey,
            action,
            zone,
            pressure,
            team_status: StatusTag::Live(self.score.status_for(agent.side)),
            outcome,
            xg_change,
            details: EventDetails::default(),
        }
    }

    /// Emit an on-ball action and count it into the possession chain
    pub(crate) fn emit_action(&mut self, event: MatchEvent) {
        if event.action.is_on_ball_action() {
            if let Some(possession) = self.possession.as_mut() {
                if possession.team == event.team {
                    possession.chain_length += 1;
                }
            }
        }
        self.emit_event(event);
    }

    // ========================================================================
    // Shared queries
    // ========================================================================

    pub(crate) fn chain_length_for(&self, side: TeamSide) -> u32 {
        match &self.possession {
            Some(p) if p.team == side => p.chain_length,
            _ => 0,
        }
    }

    pub(crate) fn opponent_zones(&self, side: TeamSide) -> impl Iterator<Item = Zone> + '_ {
        self.roster.iter().filter(move |p| p.side != side).map(|p| p.zone)
    }

    /// Pressure reading at player `idx`'s zone
    pub(crate) fn pressure_at(&self, idx: usize) -> u8 {
        let agent = &self.roster[idx];
        FIELD.pressure_level(agent.zone, self.opponent_zones(agent.side))
    }

    /// Whether any player other than `except` stands in `zone`
    pub(crate) fn is_occupied(&self, zone: Zone, except: Option<usize>) -> bool {
        self.roster.iter().any(|p| p.zone == zone && Some(p.id) != except)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn roster(&self) -> &[PlayerAgent] {
        &self.roster
    }

    pub fn clock(&self) -> MatchClock {
        self.clock
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn ball_zone(&self) -> Zone {
        self.ball_zone
    }

    pub fn ball_carrier(&self) -> Option<&PlayerAgent> {
        self.ball_carrier.map(|idx| &self.roster[idx])
    }

    pub fn possession(&self) -> Option<&Possession> {
        self.possession.as_ref()
    }

    pub fn possession_count(&self) -> u32 {
        self.possession_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> &MatchStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            final_score: self.score,
            duration_minutes: self.clock.minute,
            total_possessions: self.possession_count,
            total_steps: self.clock.step,
            result: self.score.outcome(),
            finished: self.finished,
            stats: self.stats.clone(),
        }
    }

    /// Ball and clock invariants, for tests and debug assertions
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let holders: Vec<usize> =
            self.roster.iter().filter(|p| p.has_ball).map(|p| p.id).collect();
        if holders.len() > 1 {
            return Err(format!("{} players hold the ball: {:?}", holders.len(), holders));
        }
        match (self.ball_carrier, holders.first()) {
            (Some(carrier), Some(&holder)) if carrier != holder => {
                return Err(format!("carrier {} but holder {}", carrier, holder));
            }
            (Some(carrier), None) => {
                return Err(format!("carrier {} does not hold the ball", carrier));
            }
            (None, Some(&holder)) => {
                return Err(format!("player {} holds the ball without being carrier", holder));
            }
            _ => {}
        }
        if self.clock.minute > self.config.duration_minutes {
            return Err(format!(
                "minute {} beyond duration {}",
                self.clock.minute, self.config.duration_minutes
            ));
        }
        for p in &self.roster {
            if !(0.1..=1.0).contains(&p.confidence) {
                return Err(format!("player {} confidence {}", p.id, p.confidence));
            }
            if !(0.0..=100.0).contains(&p.energy) {
                return Err(format!("player {} energy {}", p.id, p.energy));
            }
        }
        Ok(())
    }
}
