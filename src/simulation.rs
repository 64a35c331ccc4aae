//! The simulation loop: a tick-based state machine over the hunt.
//!
//! Each tick updates world state (home check, catch check, escape check),
//! rebuilds the reward grid, trains a fresh [`QLearningEngine`] at the
//! tiger's coordinate, and moves the tiger one cell along the extracted
//! greedy path. The loop ends when the tiger is home and no longer hungry,
//! when no move is available, or when the step limit is hit.

use std::fmt;

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;

use crate::{
    config::SimulationConfig,
    entities::{Critter, Menagerie, Rabbit, Squirrel},
    error::Result,
    ports::Observer,
    q_learning::{QLearningEngine, TrainingParams},
    render::FieldSnapshot,
    rewards::RewardGrid,
    types::{Action, Coord, GridSize},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// How a run ended. `steps` counts tiger moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The tiger ate and made it back home.
    Completed { steps: usize },
    /// The tiger stood on a terminal cell with no move available.
    Stalled { steps: usize },
    /// The configured step limit was reached first.
    StepLimitReached { steps: usize },
}

impl Outcome {
    pub fn steps(&self) -> usize {
        match *self {
            Outcome::Completed { steps }
            | Outcome::Stalled { steps }
            | Outcome::StepLimitReached { steps } => steps,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Completed { steps } => write!(f, "completed in {steps} steps"),
            Outcome::Stalled { steps } => write!(f, "stalled after {steps} steps"),
            Outcome::StepLimitReached { steps } => {
                write!(f, "step limit reached after {steps} steps")
            }
        }
    }
}

/// Result of one tick, private to the loop.
enum TickOutcome {
    /// Termination test passed: home and fed.
    Finished,
    /// The tiger moved one cell.
    Advanced,
    /// The greedy path had no second element.
    Stalled,
}

/// The hunt simulation.
///
/// Build one from a [`SimulationConfig`] and drive it with [`start`] (or
/// [`start_with`] to attach observers). A simulation runs at most once;
/// repeated calls return the recorded outcome.
///
/// [`start`]: Simulation::start
/// [`start_with`]: Simulation::start_with
#[derive(Debug)]
pub struct Simulation {
    size: GridSize,
    home: Coord,
    animals: Menagerie,
    rewards: RewardGrid,
    training: TrainingParams,
    max_steps: usize,
    steps: usize,
    rng: StdRng,
    outcome: Option<Outcome>,
}

impl Simulation {
    /// Validate the configuration and place the animals.
    ///
    /// The tiger starts hungry at home `(0, 0)`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let size = config.grid_size();
        let home = Coord::new(0, 0);

        let mut animals = Menagerie::new(size, home)?;
        for (i, &coord) in config.squirrels.iter().enumerate() {
            animals.insert(
                format!("Squirrel #{}", i + 1),
                Critter::Squirrel(Squirrel::new(coord)),
            )?;
        }
        for (i, &coord) in config.rabbits.iter().enumerate() {
            animals.insert(format!("Rabbit #{}", i + 1), Critter::Rabbit(Rabbit::new(coord)))?;
        }

        let mut rewards = RewardGrid::new(size, home);
        rewards.update(&animals, animals.tiger().is_hungry);

        Ok(Self {
            size,
            home,
            animals,
            rewards,
            training: config.training,
            max_steps: config.max_steps,
            steps: 0,
            rng: build_rng(config.seed),
            outcome: None,
        })
    }

    pub fn animals(&self) -> &Menagerie {
        &self.animals
    }

    /// Tiger moves made so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    /// Capture the current field as kind codes.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot::capture(&self.animals, self.size)
    }

    /// Run the simulation to completion without observers.
    pub fn start(&mut self) -> Result<Outcome> {
        self.start_with(&mut [])
    }

    /// Run the simulation to completion, reporting events to the observers.
    pub fn start_with(&mut self, observers: &mut [Box<dyn Observer>]) -> Result<Outcome> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }

        let snapshot = self.snapshot();
        for observer in observers.iter_mut() {
            observer.on_start(&snapshot)?;
        }

        let outcome = loop {
            match self.tick(observers)? {
                TickOutcome::Finished => break Outcome::Completed { steps: self.steps },
                TickOutcome::Stalled => break Outcome::Stalled { steps: self.steps },
                TickOutcome::Advanced => {
                    if self.steps >= self.max_steps {
                        break Outcome::StepLimitReached { steps: self.steps };
                    }
                }
            }
        };

        self.outcome = Some(outcome);
        for observer in observers.iter_mut() {
            observer.on_finish(&outcome)?;
        }
        Ok(outcome)
    }

    /// One tick of the state machine, in the fixed order: home check, catch
    /// check, escape check, reward refresh, render, termination test,
    /// advance.
    fn tick(&mut self, observers: &mut [Box<dyn Observer>]) -> Result<TickOutcome> {
        let tiger_position = self.animals.tiger().position;

        // 1. Home check.
        self.animals.tiger_mut().at_home = tiger_position == self.home;

        // 2. Catch check.
        let caught: Option<String> = self
            .animals
            .rabbits()
            .find(|(_, rabbit)| rabbit.position == tiger_position)
            .map(|(name, _)| name.to_string());
        if let Some(name) = caught {
            self.animals.tiger_mut().is_hungry = false;
            self.animals.remove(&name);
            for observer in observers.iter_mut() {
                observer.on_catch(&name)?;
            }
        }

        // 3. Escape check: untired rabbits one cardinal step away try to jump.
        let threatened: Vec<String> = self
            .animals
            .rabbits()
            .filter(|(_, rabbit)| {
                !rabbit.is_tired && rabbit.position.is_cardinal_neighbor(tiger_position)
            })
            .map(|(name, _)| name.to_string())
            .collect();
        for name in threatened {
            self.attempt_escape(&name, observers)?;
        }

        // 4. Reward refresh.
        let hungry = self.animals.tiger().is_hungry;
        self.rewards.update(&self.animals, hungry);

        // 5. Render.
        let snapshot = self.snapshot();
        for observer in observers.iter_mut() {
            observer.on_tick(self.steps, &snapshot)?;
        }

        // 6. Termination test.
        let tiger = self.animals.tiger();
        if tiger.at_home && !tiger.is_hungry {
            return Ok(TickOutcome::Finished);
        }

        // 7. Advance one cell along a freshly trained greedy path.
        let mut engine = QLearningEngine::new(tiger.position, self.rewards.clone());
        engine.train(&self.training, &mut self.rng);
        match engine.shortest_path().get(1) {
            Some(&next) => {
                self.animals.tiger_mut().position = next;
                self.steps += 1;
                Ok(TickOutcome::Advanced)
            }
            None => Ok(TickOutcome::Stalled),
        }
    }

    /// One escape attempt: a uniform random direction, rejected if the
    /// target is off-grid or occupied by any animal. A successful jump
    /// tires the rabbit permanently.
    fn attempt_escape(&mut self, name: &str, observers: &mut [Box<dyn Observer>]) -> Result<()> {
        let position = match self.animals.rabbit_mut(name) {
            Some(rabbit) => rabbit.position,
            None => return Ok(()),
        };

        let direction = {
            use rand::seq::IndexedRandom;
            *Action::ALL.choose(&mut self.rng).unwrap_or(&Action::Up)
        };

        let escaped = match self.size.step(position, direction) {
            Some(target) if !self.animals.occupied(target) => {
                if let Some(rabbit) = self.animals.rabbit_mut(name) {
                    rabbit.position = target;
                    rabbit.is_tired = true;
                }
                true
            }
            _ => false,
        };

        for observer in observers.iter_mut() {
            observer.on_escape(name, escaped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(cols: usize, rows: usize) -> SimulationConfig {
        SimulationConfig::new(cols, rows).with_seed(42)
    }

    #[test]
    fn catch_clears_hunger_and_removes_rabbit() {
        // Rabbit right next to the tiger: one move to catch it.
        let mut sim = Simulation::new(
            config(5, 5)
                .with_rabbits(vec![Coord::new(1, 0)])
                .with_max_steps(50),
        )
        .unwrap();
        let outcome = sim.start().unwrap();

        assert!(matches!(outcome, Outcome::Completed { .. }));
        assert!(!sim.animals().tiger().is_hungry);
        assert_eq!(sim.animals().rabbit_count(), 0);
        assert_eq!(sim.animals().tiger().position, Coord::new(0, 0));
        assert!(sim.animals().tiger().at_home);
    }

    #[test]
    fn stalls_when_start_cell_is_terminal() {
        // A squirrel shares the tiger's start cell, making it terminal while
        // the tiger is still hungry: no move is available.
        let mut sim = Simulation::new(
            config(3, 3)
                .with_squirrels(vec![Coord::new(0, 0)])
                .with_rabbits(vec![Coord::new(2, 2)]),
        )
        .unwrap();
        let outcome = sim.start().unwrap();

        assert_eq!(outcome, Outcome::Stalled { steps: 0 });
    }

    #[test]
    fn step_limit_cuts_off_the_hunt() {
        let mut sim = Simulation::new(
            config(8, 8)
                .with_rabbits(vec![Coord::new(7, 7)])
                .with_max_steps(2),
        )
        .unwrap();
        let outcome = sim.start().unwrap();

        assert_eq!(outcome, Outcome::StepLimitReached { steps: 2 });
        assert!(sim.animals().tiger().is_hungry);
    }

    #[test]
    fn completed_only_when_home_and_fed() {
        let mut sim = Simulation::new(
            config(6, 6)
                .with_rabbits(vec![Coord::new(3, 0)])
                .with_max_steps(100),
        )
        .unwrap();
        let outcome = sim.start().unwrap();

        if let Outcome::Completed { .. } = outcome {
            let tiger = sim.animals().tiger();
            assert!(tiger.at_home);
            assert!(!tiger.is_hungry);
        } else {
            panic!("expected completion, got {outcome}");
        }
    }

    #[test]
    fn restarting_a_done_simulation_returns_recorded_outcome() {
        let mut sim = Simulation::new(
            config(5, 5)
                .with_rabbits(vec![Coord::new(1, 0)])
                .with_max_steps(50),
        )
        .unwrap();
        let first = sim.start().unwrap();
        let second = sim.start().unwrap();
        assert_eq!(first, second);
        assert!(sim.is_done());
    }
}
