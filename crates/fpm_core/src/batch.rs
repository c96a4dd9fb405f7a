//! Batch simulation
//!
//! Runs independent matches in parallel with rayon. Game `i` (1-based) uses
//! seed `base_seed + i - 1` and match id `M{i:02}`; results come back in game
//! order whatever the scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::{EventLog, MatchConfig, MatchEngine};
use crate::error::Result;
use crate::models::{MatchEvent, MatchOutcome, MatchSummary};

pub const DEFAULT_BATCH_GAMES: u32 = 30;
pub const DEFAULT_BASE_SEED: u64 = 42;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BatchConfig {
    #[validate(range(min = 1, max = 10000))]
    pub games: u32,
    pub base_seed: u64,
    /// Per-game config; `seed` and `match_label` are overwritten per game
    #[validate]
    pub template: MatchConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_BATCH_GAMES,
            base_seed: DEFAULT_BASE_SEED,
            template: MatchConfig::default(),
        }
    }
}

impl BatchConfig {
    pub fn seed_for(&self, game_number: u32) -> u64 {
        self.base_seed.wrapping_add(game_number as u64 - 1)
    }

    /// Config for one game (1-based)
    pub fn game_config(&self, game_number: u32) -> MatchConfig {
        let mut config = self.template.clone();
        config.seed = Some(self.seed_for(game_number));
        config.match_label = match_id(game_number);
        config
    }
}

pub fn match_id(game_number: u32) -> String {
    format!("M{:02}", game_number)
}

/// One finished game of a batch
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub game_number: u32,
    pub match_id: String,
    pub seed: u64,
    pub summary: MatchSummary,
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

/// Aggregates over a whole batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchTotals {
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub draws: u32,
    pub home_goals: u32,
    pub away_goals: u32,
    pub total_events: u64,
    pub total_possessions: u64,
}

impl BatchTotals {
    pub fn total_goals(&self) -> u32 {
        self.home_goals + self.away_goals
    }

    pub fn average_events(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_events as f64 / self.games as f64
    }

    pub fn average_possessions(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_possessions as f64 / self.games as f64
    }

    fn add(&mut self, game: &GameResult) {
        let summary = &game.summary;
        self.games += 1;
        match summary.result {
            MatchOutcome::HomeWin => self.home_wins += 1,
            MatchOutcome::AwayWin => self.away_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
        self.home_goals += summary.final_score.home;
        self.away_goals += summary.final_score.away;
        self.total_events += game.events.len() as u64;
        self.total_possessions += summary.total_possessions as u64;
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub games: Vec<GameResult>,
    pub totals: BatchTotals,
}

impl BatchReport {
    /// All events of the batch, game order, tagged with their game
    pub fn events(&self) -> impl Iterator<Item = (&GameResult, &MatchEvent)> {
        self.games.iter().flat_map(|game| game.events.iter().map(move |e| (game, e)))
    }
}

/// Run a single game of the batch to completion
pub fn run_game(config: &BatchConfig, game_number: u32) -> Result<GameResult> {
    let game_config = config.game_config(game_number);
    let seed = config.seed_for(game_number);
    let mut engine = MatchEngine::new(game_config, EventLog::new())?;
    let summary = engine.run();
    Ok(GameResult {
        game_number,
        match_id: match_id(game_number),
        seed,
        summary,
        events: engine.into_sink().into_events(),
    })
}

pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    config.validate()?;
    log::info!("running {} games from seed {}", config.games, config.base_seed);

    let games: Vec<GameResult> = (1..=config.games)
        .into_par_iter()
        .map(|game_number| run_game(config, game_number))
        .collect::<Result<Vec<_>>>()?;

    let mut totals = BatchTotals::default();
    for game in &games {
        totals.add(game);
    }
    log::info!(
        "batch done: {} home wins, {} away wins, {} draws, {} goals",
        totals.home_wins,
        totals.away_wins,
        totals.draws,
        totals.total_goals()
    );

    Ok(BatchReport { games, totals })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_batch(games: u32) -> BatchConfig {
        BatchConfig {
            games,
            base_seed: 42,
            template: MatchConfig::default().with_duration(10),
        }
    }

    #[test]
    fn test_batch_preserves_game_order() {
        let report = run_batch(&small_batch(6)).unwrap();
        let numbers: Vec<u32> = report.games.iter().map(|g| g.game_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(report.games[0].seed, 42);
        assert_eq!(report.games[5].seed, 47);
        assert_eq!(report.games[2].match_id, "M03");
        assert_eq!(report.totals.games, 6);
        assert_eq!(
            report.totals.home_wins + report.totals.away_wins + report.totals.draws,
            6
        );
    }

    #[test]
    fn test_batch_matches_sequential_runs() {
        let config = small_batch(3);
        let report = run_batch(&config).unwrap();
        for game in &report.games {
            let single = run_game(&config, game.game_number).unwrap();
            assert_eq!(single.events, game.events);
            assert_eq!(single.summary.final_score, game.summary.final_score);
        }
        let events: u64 = report.games.iter().map(|g| g.events.len() as u64).sum();
        assert_eq!(report.totals.total_events, events);
        assert_eq!(report.events().count() as u64, events);
    }

    #[test]
    fn test_zero_games_rejected() {
        assert!(run_batch(&small_batch(0)).is_err());
    }
}
