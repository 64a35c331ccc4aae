//! Configuration for building a simulation.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::TrainingParams,
    types::{Coord, GridSize},
};

/// Complete description of a simulation run.
///
/// The tiger always starts at the home cell `(0, 0)`; everything else is
/// configurable. The default reproduces the reference layout: a 10x10 grid,
/// a wall of four squirrels, and three rabbits beyond it.
///
/// # Examples
///
/// ```
/// use prowl::config::SimulationConfig;
/// use prowl::types::Coord;
///
/// let config = SimulationConfig::new(10, 10)
///     .with_rabbits(vec![Coord::new(7, 8)])
///     .with_squirrels(vec![Coord::new(3, 5)])
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub cols: usize,
    pub rows: usize,
    /// Rabbit starting positions; named "Rabbit #1", "Rabbit #2", ... in order.
    pub rabbits: Vec<Coord>,
    /// Squirrel positions; named "Squirrel #1", "Squirrel #2", ... in order.
    pub squirrels: Vec<Coord>,
    pub training: TrainingParams,
    /// Upper bound on tiger moves before the run is cut off.
    pub max_steps: usize,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Create a configuration with an empty layout and default knobs.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            rabbits: Vec::new(),
            squirrels: Vec::new(),
            training: TrainingParams::default(),
            max_steps: 500,
            seed: None,
        }
    }

    pub fn with_rabbits(mut self, rabbits: Vec<Coord>) -> Self {
        self.rabbits = rabbits;
        self
    }

    pub fn with_squirrels(mut self, squirrels: Vec<Coord>) -> Self {
        self.squirrels = squirrels;
        self
    }

    pub fn with_training(mut self, training: TrainingParams) -> Self {
        self.training = training;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.cols, self.rows)
    }

    /// Check dimensions, layout bounds, and training knobs.
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(Error::InvalidConfiguration {
                message: format!("grid dimensions must be positive, got {}x{}", self.cols, self.rows),
            });
        }
        let size = self.grid_size();
        for &coord in self.rabbits.iter().chain(self.squirrels.iter()) {
            if !size.contains(coord) {
                return Err(Error::OutOfBounds {
                    x: coord.x,
                    y: coord.y,
                    cols: size.cols,
                    rows: size.rows,
                });
            }
        }
        if self.training.epochs == 0 {
            return Err(Error::InvalidConfiguration {
                message: "training epochs must be at least 1".to_string(),
            });
        }
        for (name, value) in [
            ("epsilon", self.training.epsilon),
            ("discount factor", self.training.discount_factor),
            ("learning rate", self.training.learning_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    /// The reference hunt: 10x10 grid, squirrel wall at row 5, rabbits at
    /// row 8.
    fn default() -> Self {
        Self::new(10, 10)
            .with_squirrels(vec![
                Coord::new(3, 5),
                Coord::new(4, 5),
                Coord::new(5, 5),
                Coord::new(6, 5),
            ])
            .with_rabbits(vec![Coord::new(7, 8), Coord::new(8, 8), Coord::new(9, 8)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_dimension_rejected() {
        let config = SimulationConfig::new(0, 10);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn out_of_bounds_layout_rejected() {
        let config = SimulationConfig::new(5, 5).with_rabbits(vec![Coord::new(5, 0)]);
        assert!(matches!(config.validate(), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn bad_training_knobs_rejected() {
        let mut config = SimulationConfig::new(5, 5);
        config.training.epsilon = 1.5;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
