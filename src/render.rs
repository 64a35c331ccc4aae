//! Console-facing field snapshots.
//!
//! A snapshot is a `cols x rows` grid of kind codes (0 empty, 1 tiger,
//! 2 rabbit, 3 squirrel) captured at a point in time. Nothing in the core
//! algorithm reads one back; observers consume them for display.

use std::fmt;

use crate::{
    entities::Menagerie,
    types::{Coord, GridSize},
};

/// A point-in-time grid of animal kind codes.
#[derive(Debug, Clone)]
pub struct FieldSnapshot {
    size: GridSize,
    codes: Vec<u8>,
}

impl FieldSnapshot {
    /// Capture the current animal positions as kind codes.
    pub fn capture(animals: &Menagerie, size: GridSize) -> Self {
        let mut codes = vec![0u8; size.area()];
        for (kind, position) in animals.kinds_and_positions() {
            codes[size.index_of(position)] = kind.code();
        }
        Self { size, codes }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Kind code at a coordinate (0 = empty).
    pub fn code_at(&self, coord: Coord) -> u8 {
        self.codes[self.size.index_of(coord)]
    }
}

impl fmt::Display for FieldSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size.rows {
            for x in 0..self.size.cols {
                if x > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", self.code_at(Coord::new(x, y)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Critter, Rabbit, Squirrel};

    #[test]
    fn snapshot_codes_match_animal_kinds() {
        let size = GridSize::new(3, 2);
        let mut animals = Menagerie::new(size, Coord::new(0, 0)).unwrap();
        animals
            .insert("Rabbit #1", Critter::Rabbit(Rabbit::new(Coord::new(2, 0))))
            .unwrap();
        animals
            .insert("Squirrel #1", Critter::Squirrel(Squirrel::new(Coord::new(1, 1))))
            .unwrap();

        let snapshot = FieldSnapshot::capture(&animals, size);
        assert_eq!(snapshot.code_at(Coord::new(0, 0)), 1);
        assert_eq!(snapshot.code_at(Coord::new(2, 0)), 2);
        assert_eq!(snapshot.code_at(Coord::new(1, 1)), 3);
        assert_eq!(snapshot.code_at(Coord::new(1, 0)), 0);

        assert_eq!(snapshot.to_string(), "1 0 2\n0 3 0\n");
    }
}
