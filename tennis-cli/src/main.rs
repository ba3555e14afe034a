//! Tennis CLI - Command-line interface
//!
//! Commands:
//! - play: Run one tournament from a roster file or the built-in sample
//! - roster: Write the sample roster or a seeded random one to disk
//! - sweep: Run many random tournaments in parallel and tally the champions

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod play_cmd;
mod roster_cmd;
mod sweep_cmd;

#[derive(Parser)]
#[command(name = "tennis")]
#[command(about = "Single-elimination tennis tournament simulator")]
struct Cli {
    /// Random seed for reproducible rosters
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single tournament
    Play(play_cmd::PlayArgs),
    /// Write a roster file
    Roster(roster_cmd::RosterArgs),
    /// Run many random tournaments in parallel
    Sweep(sweep_cmd::SweepArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        (Commands::Sweep(_), false) => "error",
        _ => "info",
    };
    init_logging(default_level);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Roster(args) => roster_cmd::run(args, cli.seed),
        Commands::Sweep(args) => sweep_cmd::run(args, cli.seed),
    }
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
