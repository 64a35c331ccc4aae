//! Reward grid shaping the learned policy.
//!
//! Each tick the whole buffer is overwritten from current animal positions
//! and the tiger's hunger. While the tiger is hungry rabbits are the only
//! positive terminals; once it has eaten, rabbits turn mildly negative and
//! the home cell becomes the goal. No explicit goal parameter exists anywhere
//! else in the system.

use crate::{
    entities::{AnimalKind, Menagerie},
    types::{Coord, GridSize},
};

/// Reward of an open, non-terminal cell.
pub const OPEN_REWARD: f64 = -1.0;
/// Reward of a cell holding a squirrel.
pub const SQUIRREL_REWARD: f64 = -100.0;
/// Reward of a rabbit's cell while the tiger is hungry.
pub const RABBIT_REWARD: f64 = 100.0;
/// Reward of a rabbit's cell once the tiger has eaten.
pub const SATED_RABBIT_REWARD: f64 = -10.0;
/// Reward of the home cell once the tiger has eaten.
pub const HOME_REWARD: f64 = 100.0;

/// Per-cell scalar rewards for the whole grid.
#[derive(Debug, Clone)]
pub struct RewardGrid {
    size: GridSize,
    home: Coord,
    cells: Vec<f64>,
}

impl RewardGrid {
    pub fn new(size: GridSize, home: Coord) -> Self {
        Self {
            size,
            home,
            cells: vec![OPEN_REWARD; size.area()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Rebuild every cell from current animal positions.
    ///
    /// The buffer is reset to [`OPEN_REWARD`] first, so rewards never linger
    /// on cells an animal has left. Writes happen in menagerie iteration
    /// order (tiger first, then critters by name); when positions coincide
    /// the last write wins, so a squirrel sharing the tiger's cell keeps its
    /// `-100`. The home override runs after the per-animal pass so it beats
    /// the tiger's own `-1` when the tiger is standing at home.
    pub fn update(&mut self, animals: &Menagerie, tiger_is_hungry: bool) {
        self.cells.fill(OPEN_REWARD);
        for (kind, position) in animals.kinds_and_positions() {
            let reward = match kind {
                AnimalKind::Squirrel => SQUIRREL_REWARD,
                AnimalKind::Rabbit => {
                    if tiger_is_hungry {
                        RABBIT_REWARD
                    } else {
                        SATED_RABBIT_REWARD
                    }
                }
                AnimalKind::Tiger => OPEN_REWARD,
            };
            self.cells[self.size.index_of(position)] = reward;
        }
        if !tiger_is_hungry {
            self.cells[self.size.index_of(self.home)] = HOME_REWARD;
        }
    }

    pub fn at(&self, coord: Coord) -> f64 {
        self.cells[self.size.index_of(coord)]
    }

    /// A cell is terminal iff its reward differs from the open default.
    ///
    /// Both goals and squirrel cells are terminal; only the reward magnitude
    /// tells them apart.
    pub fn is_terminal(&self, coord: Coord) -> bool {
        self.at(coord) != OPEN_REWARD
    }
}
