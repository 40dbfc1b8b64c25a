//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a player or faction
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Owner(pub String);

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The owner of objects that belong to nobody, such as rocks
    pub fn none() -> Self {
        Self(String::new())
    }

    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Owner {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A cell on the integer lattice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn plus(&self, d: Direction) -> Self {
        Self {
            x: self.x + d.dx,
            y: self.y + d.dy,
        }
    }

    /// Chebyshev distance, the number of king moves between two cells
    pub fn chebyshev_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A step on the lattice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const STAY: Direction = Direction { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_stay(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// Draw a direction uniformly from the given set
    pub fn random<R: Rng + ?Sized>(set: DirectionSet, rng: &mut R) -> Self {
        let members = set.members();
        members[rng.gen_range(0..members.len())]
    }
}

const ADJACENT: [Direction; 8] = [
    Direction::new(0, -1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
    Direction::new(0, 1),
    Direction::new(-1, 1),
    Direction::new(-1, 0),
    Direction::new(-1, -1),
];

const AROUND: [Direction; 9] = [
    Direction::STAY,
    Direction::new(0, -1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
    Direction::new(0, 1),
    Direction::new(-1, 1),
    Direction::new(-1, 0),
    Direction::new(-1, -1),
];

/// Fixed policy sets that random directions are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionSet {
    /// The eight neighbours plus staying put
    Around,
    /// The eight neighbours only
    Adjacent,
}

impl DirectionSet {
    pub fn members(&self) -> &'static [Direction] {
        match self {
            DirectionSet::Around => &AROUND,
            DirectionSet::Adjacent => &ADJACENT,
        }
    }
}

/// Starting stats for a freshly produced unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub speed: i32,
    pub strength: i32,
    pub endurance: i32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            speed: 5,
            strength: 2,
            endurance: 10,
        }
    }
}
