//! Delve CLI - play, replay and simulate dungeon crawls.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{ArgAction, Parser, Subcommand};
use delve::GameConfig;
use delve::config::{DEFAULT_BOMBS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use delve::simulate::StrategyKind;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::Level;

/// Delve - find the exit, avoid the bombs
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Write log events to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More detailed logs (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a game in the terminal
    Play {
        /// Board width (prompted if missing)
        #[arg(long)]
        width: Option<u16>,

        /// Board height (prompted if missing)
        #[arg(long)]
        height: Option<u16>,

        /// Number of bombs (prompted if missing)
        #[arg(short, long)]
        bombs: Option<u32>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Line-based input instead of the full-screen UI
        #[arg(long)]
        plain: bool,

        /// Use defaults for anything not given instead of prompting
        #[arg(short, long)]
        yes: bool,

        /// Summary format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Show a recorded game at a given turn
    Replay {
        /// Recording file (.json)
        #[arg(required = true)]
        recording: PathBuf,

        /// Turn to show (default: last)
        #[arg(short, long)]
        turn: Option<usize>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Run many bot-played games in parallel and aggregate statistics
    Simulate {
        /// Number of games to run
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Board width
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u16,

        /// Board height
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u16,

        /// Number of bombs
        #[arg(short, long, default_value_t = DEFAULT_BOMBS)]
        bombs: u32,

        /// Bot strategy
        #[arg(long, value_enum, default_value_t = StrategyKind::Cautious)]
        strategy: StrategyKind,

        /// Moves before a game counts as a timeout
        #[arg(short, long, default_value = "1000")]
        max_moves: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SimulateFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

/// Send tracing output to `path`.
///
/// Nothing is installed without a log file, so the TUI never gets
/// interleaved log lines.
fn init_logging(path: &Path, verbose: u8) -> Result<(), cli::CliError> {
    let file = File::create(path).map_err(|e| {
        cli::CliError::new(format!("Failed to create log file {}: {e}", path.display()))
    })?;
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| cli::CliError::new(format!("Failed to install logger: {e}")))
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose)
    {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Play {
            width,
            height,
            bombs,
            seed,
            save,
            plain,
            yes,
            format,
        } => cli::play::execute(width, height, bombs, seed, save, plain, yes, format),

        Commands::Replay {
            recording,
            turn,
            format,
        } => cli::replay::execute(recording, turn, format),

        Commands::Simulate {
            games,
            seed,
            threads,
            width,
            height,
            bombs,
            strategy,
            max_moves,
            format,
            progress,
        } => cli::simulate::execute(
            games,
            seed,
            threads,
            GameConfig::new(width, height, bombs),
            strategy,
            max_moves,
            format,
            progress,
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
