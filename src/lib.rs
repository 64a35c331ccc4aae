//! prowl: a grid-world predator/prey simulation driven by per-tick tabular
//! Q-learning
//!
//! This crate provides:
//! - A tick-based hunt simulation (tiger eats a rabbit, returns home,
//!   avoids squirrels)
//! - A throwaway tabular Q-learning engine retrained from scratch every tick
//! - Reward shaping that flips the goal from prey to home once the tiger
//!   has eaten
//! - Observer ports for rendering, pacing, and progress reporting

pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod render;
pub mod rewards;
pub mod simulation;
pub mod types;

pub use config::SimulationConfig;
pub use entities::{AnimalKind, Critter, Menagerie, Rabbit, Squirrel, Tiger};
pub use error::{Error, Result};
pub use ports::Observer;
pub use q_learning::{QLearningEngine, QTable, TrainingParams};
pub use render::FieldSnapshot;
pub use rewards::RewardGrid;
pub use simulation::{Outcome, Simulation};
pub use types::{Action, Coord, GridSize};
