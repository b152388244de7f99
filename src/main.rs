//! Tristack: placement engine for a 9×9 tile-stacking puzzle.
//!
//! ## Usage
//!
//! - `tristack` - Serve the JSON-lines placement channel on stdin/stdout
//! - `tristack serve` - Same as above
//! - `tristack selfplay --games 10` - Play games against a random piece supply

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tristack::config::EngineConfig;
use tristack::game::{mean_score, self_play};
use tristack::protocol::Session;
use tristack::strategy::Strength;

/// Tristack: a tile-stacking puzzle engine
#[derive(Parser)]
#[command(name = "tristack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Strategy to play with
    #[arg(long, global = true, value_enum)]
    strength: Option<Strength>,

    /// Seed for every random choice
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Milliseconds to wait before each placement reply
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer pieces on stdin with placements on stdout
    Serve,
    /// Play full games against a random piece supply
    Selfplay {
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Serve) | None => Session::new(&config).run(),
        Some(Commands::Selfplay { games }) => run_selfplay(&config, games),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(strength) = cli.strength {
        config.strength = strength;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(delay) = cli.delay_ms {
        config.reply_delay_ms = delay;
    }
    Ok(config)
}

fn run_selfplay(config: &EngineConfig, games: usize) -> Result<()> {
    let results = self_play(config, games).context("self-play stopped")?;
    for (i, game) in results.iter().enumerate() {
        println!("=== Game {} ===", i + 1);
        println!("{}", game.board);
        println!("Score: {}\n", game.score);
    }
    println!(
        "Mean score over {} game(s): {:.2}",
        results.len(),
        mean_score(&results)
    );
    Ok(())
}
