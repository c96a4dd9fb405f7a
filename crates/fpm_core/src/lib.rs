//! # fpm_core - Zone-Based Football Match Simulation
//!
//! Discrete-time multi-agent football simulation whose output is a
//! process-mining event log: one case per possession, one activity per
//! on-ball action.
//!
//! ## Features
//! - 100% deterministic simulation (same seed = same event stream)
//! - 4x5 zone grid with pressure and adjacency queries
//! - Data-driven team tactics (build-up, final-third penetration, counter-attacks)
//! - Parallel batch runner for multi-game logs
//!
//! ```no_run
//! use fpm_core::{MatchConfig, MatchEngine};
//!
//! let mut engine = MatchEngine::with_event_log(MatchConfig::default().with_seed(42))?;
//! let summary = engine.run();
//! println!("{} ({} events)", summary.scoreline(), engine.sink().len());
//! # Ok::<(), fpm_core::MatchError>(())
//! ```

pub mod batch;
pub mod engine;
pub mod error;
pub mod models;
pub mod tactics;

pub use batch::{run_batch, BatchConfig, BatchReport, BatchTotals, GameResult};
pub use engine::{
    EventLog, EventSink, Formation, Match, MatchConfig, MatchEngine, NullSink, TeamConfig, Zone,
    FIELD,
};
pub use error::{MatchError, Result};
pub use models::{
    ActionType, CaseId, MatchEvent, MatchOutcome, MatchSummary, Outcome, Score, TeamSide,
};
pub use tactics::{DribbleModel, TacticalPreset, TacticalProfile, TacticalTuning};
