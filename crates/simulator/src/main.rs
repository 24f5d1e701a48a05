//! Command-line front-end for the combat simulator.
//!
//! Run with: `combat-sim <command>`; set `RUST_LOG` to adjust verbosity.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Simulate, Stats};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Turn-based combat balance simulator
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Batch simulation and balance inspection for the combat core", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run seeded battle batches and report win rates
    Simulate(Simulate),

    /// Print derived enemy stats per archetype and level
    Stats(Stats),
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Stats(cmd) => cmd.execute(),
    }
}

/// Logs go to stderr so table and JSON output stay clean on stdout.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
