//! Shared value types: grid dimensions, bounded coordinates, and actions.
//!
//! Coordinates are only ever moved through [`GridSize::step`], which returns
//! `None` for moves that would leave the grid. Code downstream never has to
//! range-check a coordinate that came out of this module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate: `0 <= x < cols`, `0 <= y < rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    pub fn manhattan(self, other: Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if `other` is exactly one cell away along one axis.
    pub fn is_cardinal_neighbor(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub cols: usize,
    pub rows: usize,
}

impl GridSize {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cols * self.rows
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    /// Apply an action to a coordinate, or `None` if it would leave the grid.
    pub fn step(&self, coord: Coord, action: Action) -> Option<Coord> {
        match action {
            Action::Up => (coord.y > 0).then(|| Coord::new(coord.x, coord.y - 1)),
            Action::Right => (coord.x + 1 < self.cols).then(|| Coord::new(coord.x + 1, coord.y)),
            Action::Down => (coord.y + 1 < self.rows).then(|| Coord::new(coord.x, coord.y + 1)),
            Action::Left => (coord.x > 0).then(|| Coord::new(coord.x - 1, coord.y)),
        }
    }

    /// Flat buffer index for a coordinate.
    pub(crate) fn index_of(&self, coord: Coord) -> usize {
        coord.y * self.cols + coord.x
    }
}

/// The four directional moves.
///
/// The declaration order is the action-index order (0..3), which doubles as
/// the argmax tie-break order in the Q-table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    pub fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_inside_grid() {
        let size = GridSize::new(3, 3);
        let corner = Coord::new(0, 0);
        assert_eq!(size.step(corner, Action::Up), None);
        assert_eq!(size.step(corner, Action::Left), None);
        assert_eq!(size.step(corner, Action::Right), Some(Coord::new(1, 0)));
        assert_eq!(size.step(corner, Action::Down), Some(Coord::new(0, 1)));

        let far = Coord::new(2, 2);
        assert_eq!(size.step(far, Action::Right), None);
        assert_eq!(size.step(far, Action::Down), None);
    }

    #[test]
    fn cardinal_neighbors() {
        let c = Coord::new(4, 4);
        assert!(c.is_cardinal_neighbor(Coord::new(3, 4)));
        assert!(c.is_cardinal_neighbor(Coord::new(4, 5)));
        assert!(!c.is_cardinal_neighbor(Coord::new(3, 3)));
        assert!(!c.is_cardinal_neighbor(c));
    }
}
