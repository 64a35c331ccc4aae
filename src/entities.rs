//! Animal records and the name-keyed menagerie that holds them.
//!
//! The tiger is a singleton and lives in its own field; rabbits and squirrels
//! are removable entries in a name-keyed map. Every membership question is
//! answered by the [`AnimalKind`] tag, never by inspecting names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    types::{Coord, GridSize},
};

/// Kind tag shared by all animals.
///
/// The discriminants are the render codes consumed by field snapshots
/// (0 is reserved for an empty cell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimalKind {
    Tiger = 1,
    Rabbit = 2,
    Squirrel = 3,
}

impl AnimalKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// The hunting agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tiger {
    pub position: Coord,
    /// Starts true; cleared when a rabbit is caught, never set again.
    pub is_hungry: bool,
    /// Derived each tick from the position, not updated on movement.
    pub at_home: bool,
}

impl Tiger {
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            is_hungry: true,
            at_home: true,
        }
    }
}

/// An escaping prey animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rabbit {
    pub position: Coord,
    /// Set permanently on the first successful jump; a tired rabbit never
    /// attempts another escape.
    pub is_tired: bool,
}

impl Rabbit {
    pub fn new(position: Coord) -> Self {
        Self {
            position,
            is_tired: false,
        }
    }
}

/// A stationary lethal obstacle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squirrel {
    pub position: Coord,
}

impl Squirrel {
    pub fn new(position: Coord) -> Self {
        Self { position }
    }
}

/// A removable (non-tiger) animal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Critter {
    Rabbit(Rabbit),
    Squirrel(Squirrel),
}

impl Critter {
    pub fn kind(&self) -> AnimalKind {
        match self {
            Critter::Rabbit(_) => AnimalKind::Rabbit,
            Critter::Squirrel(_) => AnimalKind::Squirrel,
        }
    }

    pub fn position(&self) -> Coord {
        match self {
            Critter::Rabbit(rabbit) => rabbit.position,
            Critter::Squirrel(squirrel) => squirrel.position,
        }
    }
}

/// All animals on the grid: the singleton tiger plus name-keyed critters.
///
/// Critters are kept in a `BTreeMap` so iteration order (and therefore escape
/// processing and reward-write order) is deterministic under a fixed seed.
#[derive(Debug, Clone)]
pub struct Menagerie {
    size: GridSize,
    tiger: Tiger,
    critters: BTreeMap<String, Critter>,
}

impl Menagerie {
    pub fn new(size: GridSize, tiger_start: Coord) -> Result<Self> {
        if !size.contains(tiger_start) {
            return Err(Error::OutOfBounds {
                x: tiger_start.x,
                y: tiger_start.y,
                cols: size.cols,
                rows: size.rows,
            });
        }
        Ok(Self {
            size,
            tiger: Tiger::new(tiger_start),
            critters: BTreeMap::new(),
        })
    }

    pub fn tiger(&self) -> &Tiger {
        &self.tiger
    }

    pub fn tiger_mut(&mut self) -> &mut Tiger {
        &mut self.tiger
    }

    /// Add a named critter, rejecting off-grid positions and duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, critter: Critter) -> Result<()> {
        let name = name.into();
        let position = critter.position();
        if !self.size.contains(position) {
            return Err(Error::OutOfBounds {
                x: position.x,
                y: position.y,
                cols: self.size.cols,
                rows: self.size.rows,
            });
        }
        if self.critters.contains_key(&name) {
            return Err(Error::DuplicateAnimal { name });
        }
        self.critters.insert(name, critter);
        Ok(())
    }

    /// Remove a critter by name, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Critter> {
        self.critters.remove(name)
    }

    /// Named rabbits, in map order.
    pub fn rabbits(&self) -> impl Iterator<Item = (&str, &Rabbit)> {
        self.critters.iter().filter_map(|(name, critter)| match critter {
            Critter::Rabbit(rabbit) => Some((name.as_str(), rabbit)),
            Critter::Squirrel(_) => None,
        })
    }

    pub fn rabbit_mut(&mut self, name: &str) -> Option<&mut Rabbit> {
        match self.critters.get_mut(name) {
            Some(Critter::Rabbit(rabbit)) => Some(rabbit),
            _ => None,
        }
    }

    pub fn rabbit_count(&self) -> usize {
        self.rabbits().count()
    }

    /// Kind and position of every animal: the tiger first, then critters in
    /// name order. Consumers that resolve coinciding positions by last write
    /// rely on this order.
    pub fn kinds_and_positions(&self) -> impl Iterator<Item = (AnimalKind, Coord)> + '_ {
        std::iter::once((AnimalKind::Tiger, self.tiger.position)).chain(
            self.critters
                .values()
                .map(|critter| (critter.kind(), critter.position())),
        )
    }

    /// True if any animal (tiger included) stands on the coordinate.
    pub fn occupied(&self, coord: Coord) -> bool {
        self.kinds_and_positions().any(|(_, position)| position == coord)
    }
}
