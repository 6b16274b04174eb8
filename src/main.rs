use anyhow::{Context, Result};
use chess::Color;
use clap::{Parser, ValueEnum};
use rand::Rng;
use salmon_search::{board, SearchConfig, SearchSupervisor, SessionController};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
    Random,
}

/// Play chess against a fixed-depth alpha-beta searcher.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Search depth in plies
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Time budget per engine move, in seconds
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Color the engine plays
    #[arg(long, value_enum, default_value_t = Side::Random)]
    color: Side,

    /// Seed for the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Starting position instead of the standard one
    #[arg(long)]
    fen: Option<String>,

    /// Where to write timing and move statistics after the game
    #[arg(long, default_value = "game_data.txt")]
    stats_file: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut config = SearchConfig::new();
    config.set_max_depth(args.depth);
    config.set_max_time(args.timeout_secs);
    if let Some(seed) = args.seed {
        config.set_seed(seed);
    }

    let start = match &args.fen {
        Some(fen) => board::from_fen(fen).context("could not load the starting position")?,
        None => board::starting_position(),
    };

    let engine_color = match args.color {
        Side::White => Color::White,
        Side::Black => Color::Black,
        Side::Random => {
            if rand::thread_rng().gen_bool(0.5) {
                Color::White
            } else {
                Color::Black
            }
        }
    };
    info!(?engine_color, depth = config.depth, timeout = ?config.timeout, "starting game");

    let stats = {
        let mut session = SessionController::new(
            SearchSupervisor::new(config),
            engine_color,
            start,
            io::stdin().lock(),
            io::stdout().lock(),
        );
        session.run().context("game aborted")?.clone()
    };

    if !stats.engine_times.is_empty() {
        print!("\n{}", stats.summary());
        stats
            .save(&args.stats_file)
            .with_context(|| format!("could not write {}", args.stats_file.display()))?;
    }
    Ok(())
}
