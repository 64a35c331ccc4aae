//! prowl CLI - grid-world tiger hunt driven by per-tick Q-learning
//!
//! This CLI provides:
//! - Running a full hunt simulation with a configurable layout
//! - Inspecting the greedy path a single trained engine extracts

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "prowl")]
#[command(version, about = "Grid-world tiger hunt driven by per-tick Q-learning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full hunt to completion
    Run(prowl::cli::commands::run::RunArgs),

    /// Train one engine on a static layout and print its greedy path
    Plan(prowl::cli::commands::plan::PlanArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => prowl::cli::commands::run::execute(args),
        Commands::Plan(args) => prowl::cli::commands::plan::execute(args),
    }
}
