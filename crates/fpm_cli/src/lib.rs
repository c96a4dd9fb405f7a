//! fpm exporters
//!
//! Config loading (YAML or JSON by extension), the event-trace CSV consumed by
//! process-mining tools, and the per-batch results CSV / JSON summary.

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fpm_core::{
    BatchConfig, BatchReport, BatchTotals, GameResult, MatchConfig, MatchEvent, TacticalPreset,
};

/// Column order of the single-match trace
pub const EVENT_COLUMNS: [&str; 10] = [
    "possession_id",
    "timestamp",
    "team",
    "player_id",
    "action",
    "zone",
    "pressure",
    "team_status",
    "outcome",
    "xg_change",
];

/// Extra columns appended in batch traces
pub const BATCH_COLUMNS: [&str; 2] = ["match_id", "game_number"];

// ============================================================================
// Config loading
// ============================================================================

/// Load a `MatchConfig` from `.yaml`/`.yml` or JSON and validate it
pub fn load_match_config(path: &Path) -> Result<MatchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: MatchConfig = if is_yaml(path) {
        serde_yaml::from_str(&text)
            .with_context(|| format!("Invalid YAML config: {}", path.display()))?
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON config: {}", path.display()))?
    };

    config
        .check()
        .with_context(|| format!("Config rejected: {}", path.display()))?;
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// One line per tactical preset: name and what it does
pub fn preset_lines() -> Vec<String> {
    TacticalPreset::ALL
        .iter()
        .map(|preset| format!("{:<12} {}", preset.display_name(), preset.description()))
        .collect()
}

// ============================================================================
// Event traces
// ============================================================================

fn event_record(event: &MatchEvent) -> Vec<String> {
    vec![
        event.possession_id.to_string(),
        event
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        event.team.to_string(),
        event.player_id.to_string(),
        event.action.to_string(),
        event.zone.to_string(),
        event.pressure.to_string(),
        event.team_status.to_string(),
        event.outcome.to_string(),
        format!("{:.4}", event.xg_change),
    ]
}

/// Write one match's events as CSV
pub fn write_events_csv<W: Write>(out: W, events: &[MatchEvent]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(EVENT_COLUMNS)?;
    for event in events {
        writer.write_record(event_record(event))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write every game of a batch into one CSV, tagged with match id and game number
pub fn write_batch_events_csv<W: Write>(out: W, report: &BatchReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(EVENT_COLUMNS.iter().chain(BATCH_COLUMNS.iter()))?;
    for (game, event) in report.events() {
        let mut record = event_record(event);
        record.push(game.match_id.clone());
        record.push(game.game_number.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_events_csv(path: &Path, events: &[MatchEvent]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_events_csv(file, events)
}

pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

// ============================================================================
// Batch results
// ============================================================================

/// One line of the per-game results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub game: u32,
    pub seed: u64,
    pub home_goals: u32,
    pub away_goals: u32,
    pub total_events: usize,
    pub total_possessions: u32,
    pub result: &'static str,
}

impl From<&GameResult> for ResultRow {
    fn from(game: &GameResult) -> Self {
        Self {
            game: game.game_number,
            seed: game.seed,
            home_goals: game.summary.final_score.home,
            away_goals: game.summary.final_score.away,
            total_events: game.events.len(),
            total_possessions: game.summary.total_possessions,
            result: game.summary.result.as_str(),
        }
    }
}

pub fn write_results_csv<W: Write>(out: W, report: &BatchReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for game in &report.games {
        writer.serialize(ResultRow::from(game))?;
    }
    writer.flush()?;
    Ok(())
}

/// JSON document written next to the batch CSVs
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummaryFile {
    pub games: u32,
    pub base_seed: u64,
    pub duration_minutes: u32,
    pub totals: BatchTotals,
    pub total_goals: u32,
    pub average_events: f64,
    pub average_possessions: f64,
    pub results: Vec<ResultRow>,
}

impl BatchSummaryFile {
    pub fn new(config: &BatchConfig, report: &BatchReport) -> Self {
        Self {
            games: config.games,
            base_seed: config.base_seed,
            duration_minutes: config.template.duration_minutes,
            totals: report.totals.clone(),
            total_goals: report.totals.total_goals(),
            average_events: report.totals.average_events(),
            average_possessions: report.totals.average_possessions(),
            results: report.games.iter().map(ResultRow::from).collect(),
        }
    }
}

/// Paths written by [`save_batch_outputs`]
#[derive(Debug, Clone)]
pub struct BatchOutputs {
    pub events_csv: PathBuf,
    pub results_csv: PathBuf,
    pub summary_json: PathBuf,
}

/// Write the combined trace, results table and summary into `out_dir`.
/// `stamp` distinguishes runs (e.g. `20250101_150000`).
pub fn save_batch_outputs(
    out_dir: &Path,
    stamp: &str,
    config: &BatchConfig,
    report: &BatchReport,
) -> Result<BatchOutputs> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output dir: {}", out_dir.display()))?;

    let outputs = BatchOutputs {
        events_csv: out_dir.join(format!("football_{}games_{}.csv", config.games, stamp)),
        results_csv: out_dir.join(format!("match_results_{}.csv", stamp)),
        summary_json: out_dir.join(format!("batch_summary_{}.json", stamp)),
    };

    let file = fs::File::create(&outputs.events_csv)
        .with_context(|| format!("Failed to create {}", outputs.events_csv.display()))?;
    write_batch_events_csv(file, report)?;

    let file = fs::File::create(&outputs.results_csv)
        .with_context(|| format!("Failed to create {}", outputs.results_csv.display()))?;
    write_results_csv(file, report)?;

    save_json(&outputs.summary_json, &BatchSummaryFile::new(config, report))?;
    log::debug!("batch outputs written to {}", out_dir.display());

    Ok(outputs)
}
