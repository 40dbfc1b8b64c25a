//! Stationary production facilities.

use crate::ant::Ant;
use crate::codec::ObjectRecord;
use crate::object::{Object, ObjectKind, ObjectView};
use crate::occupancy::OccupancyMap;
use colony_core::{Direction, DirectionSet, Owner, Point, UnitStats};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// A colony spawns ants onto its own cell. Its point never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colony {
    owner: Owner,
    point: Point,
    ready: bool,
    unit: UnitStats,
    cooldown: Option<u64>,
    since_production: u64,
    produced: u64,
}

impl Colony {
    /// New colonies start ready to produce. With a `cooldown` the colony
    /// re-arms itself that many ticks after each production; without one it
    /// stays idle until [`rearm`](Self::rearm) is called.
    pub fn new(owner: Owner, point: Point, unit: UnitStats, cooldown: Option<u64>) -> Self {
        Self {
            owner,
            point,
            ready: true,
            unit,
            cooldown,
            since_production: 0,
            produced: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Ants produced over the colony's life
    pub fn produced(&self) -> u64 {
        self.produced
    }

    pub fn rearm(&mut self) {
        self.ready = true;
    }

    /// Spawn an ant if ready and the home cell is free.
    ///
    /// A blocked attempt leaves the colony ready for the next tick.
    pub fn produce(&mut self, occupancy: &OccupancyMap, rng: &mut dyn RngCore) -> Option<Ant> {
        if !self.ready || occupancy.is_occupied(self.point) {
            return None;
        }
        self.ready = false;
        self.since_production = 0;
        self.produced += 1;
        Some(Ant::new(
            self.owner.clone(),
            self.point,
            Direction::random(DirectionSet::Around, rng),
            self.unit,
        ))
    }
}

impl Object for Colony {
    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn point(&self) -> Point {
        self.point
    }

    fn is_dead(&self) -> bool {
        false
    }

    fn view(&self, requester: &Owner) -> ObjectView {
        let view = ObjectView::new(ObjectKind::Colony)
            .with_owner(&self.owner)
            .with_point(self.point);
        if *requester == self.owner {
            ObjectView {
                ready: Some(self.ready),
                ..view
            }
        } else {
            view
        }
    }

    fn tick(&mut self) {
        if self.ready {
            return;
        }
        self.since_production += 1;
        if let Some(cooldown) = self.cooldown {
            if self.since_production >= cooldown {
                self.ready = true;
            }
        }
    }

    fn record(&self) -> Option<ObjectRecord> {
        Some(ObjectRecord::Colony(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rock::Rock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn colony(cooldown: Option<u64>) -> Colony {
        Colony::new(Owner::from("red"), Point::new(2, 2), UnitStats::default(), cooldown)
    }

    #[test]
    fn test_ready_colony_produces_once() {
        let map = OccupancyMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colony = colony(None);

        let ant = colony.produce(&map, &mut rng).expect("ready colony on a free cell");
        assert_eq!(ant.owner(), &Owner::from("red"));
        assert_eq!(ant.point(), Point::new(2, 2));
        assert_eq!(ant.stats(), UnitStats::default());
        assert!(!colony.is_ready());

        assert!(colony.produce(&map, &mut rng).is_none());
        assert!(!colony.is_ready());
        assert_eq!(colony.produced(), 1);
    }

    #[test]
    fn test_blocked_colony_stays_ready() {
        let mut map = OccupancyMap::new();
        map.insert(Box::new(Rock::new(Point::new(2, 2), 5))).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colony = colony(None);

        for _ in 0..3 {
            assert!(colony.produce(&map, &mut rng).is_none());
            assert!(colony.is_ready());
        }
        assert_eq!(colony.produced(), 0);
    }

    #[test]
    fn test_without_cooldown_colony_waits_for_rearm() {
        let map = OccupancyMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colony = colony(None);

        colony.produce(&map, &mut rng).unwrap();
        for _ in 0..100 {
            colony.tick();
        }
        assert!(!colony.is_ready());

        colony.rearm();
        assert!(colony.produce(&map, &mut rng).is_some());
    }

    #[test]
    fn test_cooldown_rearms() {
        let map = OccupancyMap::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut colony = colony(Some(3));

        colony.produce(&map, &mut rng).unwrap();
        colony.tick();
        colony.tick();
        assert!(!colony.is_ready());
        colony.tick();
        assert!(colony.is_ready());
    }

    #[test]
    fn test_colony_view() {
        let colony = colony(None);
        let own = colony.view(&Owner::from("red"));
        assert_eq!(own.ready, Some(true));

        let other = colony.view(&Owner::from("black"));
        assert_eq!(other.kind, ObjectKind::Colony);
        assert_eq!(other.owner, Some(Owner::from("red")));
        assert!(other.is_redacted());
    }
}
