use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::tty::IsTty;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eight_puzzle::script;
use eight_puzzle::session::{Session, SessionConfig, DEFAULT_SEED};
use eight_puzzle::NodeBudget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Solve 8-puzzles with A* or beam search from a command script.
#[derive(Parser, Debug)]
#[command(name = "eight-puzzle", version, about, long_about = None)]
struct Cli {
    /// Command script to run; reads stdin when omitted
    script: Option<PathBuf>,

    /// Initial node budget, a positive number or "unbounded"
    #[arg(long, default_value = "unbounded")]
    max_nodes: NodeBudget,

    /// Seed for randomizeState
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Style printState output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = io::stdout();
    let color = match cli.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => stdout.is_tty(),
    };

    let mut session = Session::new(SessionConfig {
        max_nodes: cli.max_nodes,
        seed: cli.seed,
        color,
    });

    let mut out = stdout.lock();
    let summary = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            script::run(&mut session, BufReader::new(file), &mut out)?
        }
        None => script::run(&mut session, io::stdin().lock(), &mut out)?,
    };

    info!(
        executed = summary.executed,
        failed = summary.failed,
        "script finished"
    );
    Ok(())
}
