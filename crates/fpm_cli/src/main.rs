//! fpm CLI
//!
//! Single matches and seeded batches, exported as process-mining traces.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use fpm_core::{run_batch, BatchConfig, MatchConfig, MatchEngine};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "fpm")]
#[command(about = "Zone-based football simulation producing event logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate one match
    Match {
        /// Match length in minutes (overrides the config file)
        #[arg(long)]
        minutes: Option<u32>,

        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Output event CSV path
        #[arg(long)]
        events: Option<PathBuf>,

        /// Output summary JSON path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Match config (.yaml/.yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Simulate a batch of games with consecutive seeds
    Batch {
        /// Number of games
        #[arg(long, default_value_t = fpm_core::batch::DEFAULT_BATCH_GAMES)]
        games: u32,

        /// Match length in minutes (overrides the config file)
        #[arg(long)]
        minutes: Option<u32>,

        /// Seed of game 1; game N uses base_seed + N - 1
        #[arg(long, default_value_t = fpm_core::batch::DEFAULT_BASE_SEED)]
        base_seed: u64,

        /// Output directory
        #[arg(long, default_value = "batch_outputs")]
        out_dir: PathBuf,

        /// Per-game match config (.yaml/.yml or .json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the tactical presets usable in a config file
    Tactics,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            minutes,
            seed,
            events,
            summary,
            config,
        } => {
            let mut match_config = load_config(config.as_deref())?;
            if let Some(minutes) = minutes {
                match_config.duration_minutes = minutes;
            }
            if seed.is_some() {
                match_config.seed = seed;
            }

            println!("⚽ Simulating match...");
            println!(
                "   {} ({}) vs {} ({})",
                match_config.home.name,
                match_config.home.formation,
                match_config.away.name,
                match_config.away.formation
            );
            println!("   Minutes: {}", match_config.duration_minutes);
            if let Some(seed) = match_config.seed {
                println!("   Seed:    {}", seed);
            }

            let mut engine = MatchEngine::with_event_log(match_config)?;
            let result = engine.run();

            println!("\n✅ {}: {}", result.result.as_str(), result.scoreline());
            println!("   Events:      {}", engine.sink().len());
            println!("   Possessions: {}", result.total_possessions);
            println!(
                "   xG:          {:.2} - {:.2}",
                result.stats.home.xg, result.stats.away.xg
            );

            if let Some(path) = events {
                fpm_cli::save_events_csv(&path, engine.sink().events())?;
                println!("\n📄 Events saved to: {}", path.display());
            }
            if let Some(path) = summary {
                fpm_cli::save_json(&path, &result)?;
                println!("📄 Summary saved to: {}", path.display());
            }
        }

        Commands::Batch {
            games,
            minutes,
            base_seed,
            out_dir,
            config,
        } => {
            let mut template = load_config(config.as_deref())?;
            if let Some(minutes) = minutes {
                template.duration_minutes = minutes;
            }
            let batch = BatchConfig {
                games,
                base_seed,
                template,
            };

            println!("🚀 Running {} games (seeds {}..)", batch.games, batch.base_seed);
            let started = std::time::Instant::now();
            let report = run_batch(&batch)?;

            for game in &report.games {
                println!(
                    "   Game {:>3} (seed {}): {} {} | Events: {} | Possessions: {}",
                    game.game_number,
                    game.seed,
                    game.summary.result.as_str(),
                    game.summary.scoreline(),
                    game.events.len(),
                    game.summary.total_possessions
                );
            }
            println!(
                "\n✅ All {} games completed in {:.1} seconds!",
                batch.games,
                started.elapsed().as_secs_f64()
            );

            let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
            let outputs = fpm_cli::save_batch_outputs(&out_dir, &stamp, &batch, &report)?;
            println!("📄 Combined CSV:  {}", outputs.events_csv.display());
            println!("🏆 Match results: {}", outputs.results_csv.display());
            println!("📄 Summary JSON:  {}", outputs.summary_json.display());

            print_totals(&report.totals);
        }

        Commands::Tactics => {
            println!("📋 Tactical presets:");
            for line in fpm_cli::preset_lines() {
                println!("   {}", line);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&std::path::Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => {
            println!("🔧 Loading config: {}", path.display());
            fpm_cli::load_match_config(path)
        }
        None => Ok(MatchConfig::default()),
    }
}

#[cfg(feature = "cli")]
fn print_totals(totals: &fpm_core::BatchTotals) {
    println!("\n📊 BATCH SUMMARY");
    println!("   Total events:      {}", totals.total_events);
    println!("   Total possessions: {}", totals.total_possessions);
    println!("   Avg events/game:   {:.1}", totals.average_events());
    println!("   Avg possessions:   {:.1}", totals.average_possessions());
    println!(
        "   Results: {} Home, {} Away, {} Draws",
        totals.home_wins, totals.away_wins, totals.draws
    );
    println!("   Total goals: {}", totals.total_goals());
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("fpm CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
