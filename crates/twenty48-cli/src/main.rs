mod config;
mod play;
mod selfplay;
mod strategies;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use config::SelfplayConfig;
use strategies::StrategyKind;

#[derive(Debug, Parser)]
#[command(author, version, about = "2048 in the terminal: play interactively or run self-play batches")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Play interactively on stdin/stdout
    Play {
        /// Seed for the tile RNG (random if omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run unattended games and report summary statistics
    Selfplay {
        /// Optional TOML config file; flags below override its values
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Number of games to run
        #[arg(long)]
        games: Option<u32>,
        /// Master seed; per-game seeds derive from it
        #[arg(long)]
        seed: Option<u64>,
        /// Move-selection strategy
        #[arg(long, value_enum)]
        strategy: Option<StrategyKind>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Play { seed } => play::run(seed),
        Command::Selfplay {
            config,
            games,
            seed,
            strategy,
        } => {
            let base = match config {
                Some(path) => SelfplayConfig::from_toml(path)?,
                None => SelfplayConfig::default(),
            };
            selfplay::run(base.with_overrides(games, seed, strategy))
        }
    }
}
