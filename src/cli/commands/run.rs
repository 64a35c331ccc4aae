//! Run command - drive a full hunt to completion

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::{
        commands::parse_coord,
        output::{ConsoleObserver, ProgressObserver, print_kv, print_section},
    },
    config::SimulationConfig,
    ports::Observer,
    q_learning::TrainingParams,
    simulation::{Outcome, Simulation},
    types::Coord,
};

#[derive(Debug, Serialize)]
struct RunSummaryFile {
    outcome: Outcome,
    steps: usize,
    cols: usize,
    rows: usize,
    rabbits_remaining: usize,
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
#[command(about = "Run the hunt simulation")]
pub struct RunArgs {
    /// Grid width
    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Grid height
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Rabbit position as "x,y" (repeatable; omit all layout flags for the
    /// reference layout)
    #[arg(long = "rabbit", value_parser = parse_coord)]
    pub rabbits: Vec<Coord>,

    /// Squirrel position as "x,y" (repeatable)
    #[arg(long = "squirrel", value_parser = parse_coord)]
    pub squirrels: Vec<Coord>,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of tiger moves before the run is cut off
    #[arg(long, default_value_t = 500)]
    pub max_steps: usize,

    /// Training episodes per tick
    #[arg(long, default_value_t = 1000)]
    pub epochs: usize,

    /// Greedy-action probability during training
    #[arg(long, default_value_t = 0.9)]
    pub epsilon: f64,

    /// Discount factor for future rewards
    #[arg(long, default_value_t = 0.9)]
    pub discount: f64,

    /// TD update step size
    #[arg(long, default_value_t = 0.9)]
    pub learning_rate: f64,

    /// Wait for Enter between ticks
    #[arg(long)]
    pub pause: bool,

    /// Show a progress bar instead of per-tick field dumps
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl RunArgs {
    fn config(&self) -> Result<SimulationConfig> {
        let (rabbits, squirrels) = if self.rabbits.is_empty() && self.squirrels.is_empty() {
            let reference = SimulationConfig::default();
            (reference.rabbits, reference.squirrels)
        } else if self.rabbits.is_empty() {
            bail!("at least one --rabbit is required (or omit all layout flags for the reference layout)");
        } else {
            (self.rabbits.clone(), self.squirrels.clone())
        };

        let mut config = SimulationConfig::new(self.cols, self.rows)
            .with_rabbits(rabbits)
            .with_squirrels(squirrels)
            .with_training(TrainingParams {
                epochs: self.epochs,
                epsilon: self.epsilon,
                discount_factor: self.discount,
                learning_rate: self.learning_rate,
            })
            .with_max_steps(self.max_steps);
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

pub fn execute(args: RunArgs) -> Result<()> {
    let config = args.config()?;
    let seed = config.seed;
    let mut simulation = Simulation::new(config).context("failed to build simulation")?;

    let mut observers: Vec<Box<dyn Observer>> = if args.quiet {
        vec![Box::new(ProgressObserver::new(args.max_steps))]
    } else {
        vec![Box::new(ConsoleObserver::new(args.pause))]
    };
    let outcome = simulation
        .start_with(&mut observers)
        .context("simulation failed")?;

    print_section("Run summary");
    print_kv("Outcome", &outcome.to_string());
    print_kv("Steps", &outcome.steps().to_string());
    print_kv(
        "Rabbits remaining",
        &simulation.animals().rabbit_count().to_string(),
    );
    if let Some(seed) = seed {
        print_kv("Seed", &seed.to_string());
    }

    if let Some(path) = &args.summary {
        let summary = RunSummaryFile {
            outcome,
            steps: outcome.steps(),
            cols: args.cols,
            rows: args.rows,
            rabbits_remaining: simulation.animals().rabbit_count(),
            seed,
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary).context("failed to write run summary")?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}
