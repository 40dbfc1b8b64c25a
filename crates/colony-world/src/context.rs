//! Read-only inputs handed to a unit when it decides where to move.

use crate::occupancy::OccupancyMap;
use colony_core::{Owner, Point};
use std::collections::HashSet;

/// Cells marked by one owner's trail
pub type Pheromones = HashSet<Point>;

/// Owners allied with a given owner
pub type Friends = HashSet<Owner>;

/// Everything a movement decision may look at.
///
/// The occupancy map is the live one: moves made earlier in the same tick
/// are already visible.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub occupancy: &'a OccupancyMap,
    pub pheromones: Option<&'a Pheromones>,
    pub friends: Option<&'a Friends>,
}

impl<'a> MoveContext<'a> {
    pub fn new(
        occupancy: &'a OccupancyMap,
        pheromones: Option<&'a Pheromones>,
        friends: Option<&'a Friends>,
    ) -> Self {
        Self {
            occupancy,
            pheromones,
            friends,
        }
    }

    pub fn has_pheromone(&self, point: Point) -> bool {
        self.pheromones.is_some_and(|p| p.contains(&point))
    }

    pub fn is_friend(&self, owner: &Owner) -> bool {
        self.friends.is_some_and(|f| f.contains(owner))
    }

    /// True when a unit owned by `me` could step onto `point`: the cell is
    /// empty, or holds a unit of a foreign, non-allied owner.
    pub fn is_open_to(&self, me: &Owner, point: Point) -> bool {
        match self.occupancy.object_at(point) {
            None => !self.occupancy.is_occupied(point),
            Some(other) => {
                other.as_animate().is_some()
                    && other.owner() != me
                    && !self.is_friend(other.owner())
            }
        }
    }
}
