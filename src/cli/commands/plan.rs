//! Plan command - train a single engine against a static layout and print
//! the greedy path it extracts

use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cli::{
        commands::parse_coord,
        output::{print_kv, print_section},
    },
    entities::{Critter, Menagerie, Rabbit, Squirrel},
    error::Error,
    q_learning::{QLearningEngine, TrainingParams},
    rewards::RewardGrid,
    types::{Coord, GridSize},
};

#[derive(Parser, Debug)]
#[command(about = "Train one engine on a static layout and print its path")]
pub struct PlanArgs {
    /// Grid width
    #[arg(long, default_value_t = 10)]
    pub cols: usize,

    /// Grid height
    #[arg(long, default_value_t = 10)]
    pub rows: usize,

    /// Rabbit position as "x,y" (repeatable)
    #[arg(long = "rabbit", value_parser = parse_coord)]
    pub rabbits: Vec<Coord>,

    /// Squirrel position as "x,y" (repeatable)
    #[arg(long = "squirrel", value_parser = parse_coord)]
    pub squirrels: Vec<Coord>,

    /// Tiger coordinate to plan from
    #[arg(long, default_value = "0,0", value_parser = parse_coord)]
    pub from: Coord,

    /// Plan for a sated tiger (rabbits repel, home attracts)
    #[arg(long)]
    pub sated: bool,

    /// Random seed for reproducible training
    #[arg(long)]
    pub seed: Option<u64>,

    /// Training episodes
    #[arg(long, default_value_t = 1000)]
    pub epochs: usize,

    /// Greedy-action probability during training
    #[arg(long, default_value_t = 0.9)]
    pub epsilon: f64,

    /// Also print the reward grid
    #[arg(long)]
    pub show_rewards: bool,
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let size = GridSize::new(args.cols, args.rows);
    if !size.contains(args.from) {
        return Err(Error::OutOfBounds {
            x: args.from.x,
            y: args.from.y,
            cols: size.cols,
            rows: size.rows,
        }
        .into());
    }
    let home = Coord::new(0, 0);

    let mut animals = Menagerie::new(size, home).context("failed to place tiger")?;
    animals.tiger_mut().position = args.from;
    animals.tiger_mut().is_hungry = !args.sated;
    for (i, &coord) in args.squirrels.iter().enumerate() {
        animals
            .insert(
                format!("Squirrel #{}", i + 1),
                Critter::Squirrel(Squirrel::new(coord)),
            )
            .context("invalid squirrel position")?;
    }
    for (i, &coord) in args.rabbits.iter().enumerate() {
        animals
            .insert(format!("Rabbit #{}", i + 1), Critter::Rabbit(Rabbit::new(coord)))
            .context("invalid rabbit position")?;
    }

    let mut rewards = RewardGrid::new(size, home);
    rewards.update(&animals, !args.sated);

    if args.show_rewards {
        print_section("Reward grid");
        for y in 0..size.rows {
            let row: Vec<String> = (0..size.cols)
                .map(|x| format!("{:>5}", rewards.at(Coord::new(x, y))))
                .collect();
            println!("  {}", row.join(" "));
        }
    }

    let params = TrainingParams {
        epochs: args.epochs,
        epsilon: args.epsilon,
        ..TrainingParams::default()
    };
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let mut engine = QLearningEngine::new(args.from, rewards);
    engine.train(&params, &mut rng);
    let path = engine.shortest_path();

    print_section("Greedy path");
    print_kv("From", &args.from.to_string());
    print_kv("Length", &path.len().to_string());
    if path.is_empty() {
        println!("  start cell is terminal; no path");
    } else {
        for coord in &path {
            println!("  {coord}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(from: Coord) -> PlanArgs {
        PlanArgs {
            cols: 10,
            rows: 10,
            rabbits: vec![Coord::new(1, 0)],
            squirrels: Vec::new(),
            from,
            sated: false,
            seed: Some(3),
            epochs: 50,
            epsilon: 0.9,
            show_rewards: false,
        }
    }

    #[test]
    fn off_grid_start_is_rejected() {
        // Past the row extent, and past the column extent: both must fail
        // before any reward-grid indexing happens.
        for from in [Coord::new(0, 15), Coord::new(15, 5)] {
            let err = execute(args(from)).expect_err("off-grid start must be rejected");
            assert!(err.to_string().contains("out of bounds"), "got: {err}");
        }
    }

    #[test]
    fn in_bounds_start_plans() {
        assert!(execute(args(Coord::new(0, 0))).is_ok());
    }
}
