//! Dense Q-table over grid cells and directional actions

use crate::types::{Action, Coord, GridSize};

/// Q-values for every `(cell, action)` pair, stored as a flat buffer.
///
/// Zero-initialized on construction; the engine retrains it from scratch
/// every tick rather than carrying values over.
#[derive(Debug, Clone)]
pub struct QTable {
    size: GridSize,
    values: Vec<f64>,
}

impl QTable {
    /// Create a zeroed table for the given grid.
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            values: vec![0.0; size.area() * Action::ALL.len()],
        }
    }

    fn index_of(&self, cell: Coord, action: Action) -> usize {
        self.size.index_of(cell) * Action::ALL.len() + action.index()
    }

    pub fn get(&self, cell: Coord, action: Action) -> f64 {
        self.values[self.index_of(cell, action)]
    }

    pub fn set(&mut self, cell: Coord, action: Action, value: f64) {
        let index = self.index_of(cell, action);
        self.values[index] = value;
    }

    /// Maximum Q-value over the four actions at a cell.
    pub fn max_q(&self, cell: Coord) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.get(cell, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Action with the highest Q-value at a cell.
    ///
    /// Ties break toward the lowest action index (Up, Right, Down, Left).
    pub fn greedy_action(&self, cell: Coord) -> Action {
        let mut best = Action::Up;
        let mut best_q = self.get(cell, best);
        for &action in &Action::ALL[1..] {
            let q = self.get(cell, action);
            if q > best_q {
                best = action;
                best_q = q;
            }
        }
        best
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) <- Q(s,a) + alpha * [r + gamma * max_a' Q(s',a') - Q(s,a)]
    pub fn update(
        &mut self,
        cell: Coord,
        action: Action,
        reward: f64,
        next_cell: Coord,
        discount_factor: f64,
        learning_rate: f64,
    ) {
        let current_q = self.get(cell, action);
        let td_target = reward + discount_factor * self.max_q(next_cell);
        let td_error = td_target - current_q;
        self.set(cell, action, current_q + learning_rate * td_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_starts_zeroed() {
        let table = QTable::new(GridSize::new(4, 4));
        for &action in &Action::ALL {
            assert_eq!(table.get(Coord::new(2, 3), action), 0.0);
        }
    }

    #[test]
    fn set_get_roundtrip() {
        let mut table = QTable::new(GridSize::new(4, 4));
        table.set(Coord::new(1, 2), Action::Left, 1.5);
        assert_eq!(table.get(Coord::new(1, 2), Action::Left), 1.5);
        assert_eq!(table.get(Coord::new(1, 2), Action::Up), 0.0);
    }

    #[test]
    fn max_q_over_actions() {
        let mut table = QTable::new(GridSize::new(4, 4));
        let cell = Coord::new(0, 0);
        table.set(cell, Action::Up, 0.5);
        table.set(cell, Action::Right, 1.5);
        table.set(cell, Action::Down, 0.8);
        assert_eq!(table.max_q(cell), 1.5);
    }

    #[test]
    fn greedy_action_breaks_ties_by_first_index() {
        let mut table = QTable::new(GridSize::new(4, 4));
        let cell = Coord::new(0, 0);
        // All zeros: Up wins as the first index.
        assert_eq!(table.greedy_action(cell), Action::Up);
        // Equal best values at Right and Left: Right wins.
        table.set(cell, Action::Right, 2.0);
        table.set(cell, Action::Left, 2.0);
        assert_eq!(table.greedy_action(cell), Action::Right);
    }

    #[test]
    fn td_update_arithmetic() {
        let mut table = QTable::new(GridSize::new(4, 4));
        let cell = Coord::new(0, 0);
        let next = Coord::new(1, 0);
        table.set(next, Action::Down, 2.0);

        table.update(cell, Action::Right, -1.0, next, 0.9, 0.9);

        // Q = 0 + 0.9 * (-1 + 0.9 * 2 - 0) = 0.72
        assert!((table.get(cell, Action::Right) - 0.72).abs() < 1e-12);
    }
}
