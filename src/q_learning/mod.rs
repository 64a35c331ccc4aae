//! Per-tick tabular Q-learning
//!
//! This module implements the temporal difference (TD) learning engine that
//! produces the tiger's movement policy. The engine is deliberately
//! throwaway: the simulation constructs a fresh one against the current
//! reward grid every tick, trains it from a zeroed table, extracts one greedy
//! path, and discards it. Nothing learned survives a tick.
//!
//! ## Algorithm
//!
//! Off-policy TD control over grid cells with four directional actions:
//!
//! ```text
//! Q(s,a) += alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))
//! ```
//!
//! Episodes always start from the engine's fixed start coordinate and run
//! until a terminal cell (any cell whose reward differs from the open
//! default). Actions that would leave the grid are no-ops: the state stays
//! put and the current cell's reward is received again.
//!
//! ## Usage Example
//!
//! ```no_run
//! use prowl::q_learning::{QLearningEngine, TrainingParams};
//! use prowl::rewards::RewardGrid;
//! use prowl::types::{Coord, GridSize};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let rewards = RewardGrid::new(GridSize::new(10, 10), Coord::new(0, 0));
//! let mut engine = QLearningEngine::new(Coord::new(0, 0), rewards);
//! let mut rng = StdRng::seed_from_u64(42);
//! engine.train(&TrainingParams::default(), &mut rng);
//! let path = engine.shortest_path();
//! ```

pub mod engine;
pub mod q_table;

// Public re-exports
pub use engine::QLearningEngine;
pub use q_table::QTable;

use serde::{Deserialize, Serialize};

/// Hyperparameters for one per-tick training run.
///
/// `epsilon` is the probability of taking the *greedy* action during
/// training (the remaining probability explores uniformly at random).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Number of independent training episodes.
    pub epochs: usize,
    /// Greedy-action probability during training.
    pub epsilon: f64,
    /// Discount factor for future rewards.
    pub discount_factor: f64,
    /// Step size of the TD update.
    pub learning_rate: f64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 1000,
            epsilon: 0.9,
            discount_factor: 0.9,
            learning_rate: 0.9,
        }
    }
}
