//! Simulate command implementation.

use super::output::{JsonSimulationResult, format_simulation_csv, format_simulation_text};
use super::{CliError, SimulateFormat};
use delve::GameConfig;
use delve::game::clock_seed;
use delve::simulate::{SimulationConfig, SimulationStats, StrategyKind, run_simulation};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::info;

/// Games per progress bar update.
const BATCH_SIZE: u64 = 256;

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the board configuration is invalid.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    game: GameConfig,
    strategy: StrategyKind,
    max_moves: u32,
    format: SimulateFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Fail once up front instead of once per game
    game.validate()?;

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(clock_seed);
    let config = SimulationConfig {
        game,
        max_moves,
        strategy,
    };
    info!(games, base_seed, ?strategy, "starting simulation");

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Each batch is a parallel fold/reduce; batches only exist to move the bar
    let mut stats = SimulationStats::new();
    let mut done = 0;
    while done < games {
        let batch = BATCH_SIZE.min(games - done);
        stats.merge(&run_simulation(base_seed.wrapping_add(done), batch, &config));
        done += batch;
        if let Some(pb) = &pb {
            pb.set_position(done);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    info!(wins = stats.wins, losses = stats.losses, elapsed = ?duration, "simulation finished");

    #[allow(clippy::cast_precision_loss)]
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        SimulateFormat::Text => {
            println!();
            print!("{}", format_simulation_text(&stats, &config, base_seed));
            println!();
            println!("Duration: {:.2}s ({games_per_sec:.0} games/sec)", duration.as_secs_f64());
        }
        SimulateFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(&stats, &config, base_seed, duration);
            println!("{}", serde_json::to_string_pretty(&json_result)?);
        }
        SimulateFormat::Csv => {
            print!("{}", format_simulation_csv(&stats, &config));
        }
    }

    Ok(())
}
