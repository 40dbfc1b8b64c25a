//! Pluggable movement heuristics for ants.

use crate::ant::Ant;
use crate::context::MoveContext;
use crate::object::Object;
use colony_core::{Direction, DirectionSet, Point};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::fmt;
use std::sync::Arc;

/// Decides where an ant wants to go next
pub trait MovePolicy: fmt::Debug + Send + Sync {
    fn choose(&self, ant: &Ant, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> Point;
}

pub fn default_policy() -> Arc<dyn MovePolicy> {
    Arc::new(Wander::default())
}

/// Random walk that keeps heading, follows its own trail and never steps
/// onto friends or obstacles.
#[derive(Debug, Clone)]
pub struct Wander {
    /// Chance of taking a marked neighbour when one exists
    pub trail_bias: f64,
    /// Chance of continuing in the current facing
    pub momentum: f64,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            trail_bias: 0.75,
            momentum: 0.5,
        }
    }
}

impl MovePolicy for Wander {
    fn choose(&self, ant: &Ant, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> Point {
        let here = ant.point();
        let open: Vec<Point> = DirectionSet::Adjacent
            .members()
            .iter()
            .map(|d| here.plus(*d))
            .filter(|p| ctx.is_open_to(ant.owner(), *p))
            .collect();
        if open.is_empty() {
            return here;
        }

        let trail: Vec<Point> = open
            .iter()
            .copied()
            .filter(|p| ctx.has_pheromone(*p))
            .collect();
        if !trail.is_empty() && rng.gen_bool(self.trail_bias) {
            if let Some(p) = trail.choose(rng) {
                return *p;
            }
        }

        let facing = ant.direction();
        let ahead = here.plus(facing);
        if !facing.is_stay() && open.contains(&ahead) && rng.gen_bool(self.momentum) {
            return ahead;
        }

        let step = Direction::random(DirectionSet::Around, rng);
        let target = here.plus(step);
        if open.contains(&target) {
            target
        } else {
            here
        }
    }
}

/// Never moves. Useful for sentries and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hold;

impl MovePolicy for Hold {
    fn choose(&self, ant: &Ant, _ctx: &MoveContext<'_>, _rng: &mut dyn RngCore) -> Point {
        ant.point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Friends, Pheromones};
    use crate::occupancy::OccupancyMap;
    use crate::rock::Rock;
    use colony_core::{Owner, UnitStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ant_at(owner: &str, p: Point) -> Ant {
        Ant::new(Owner::from(owner), p, Direction::STAY, UnitStats::default())
    }

    #[test]
    fn test_wander_stays_adjacent() {
        let map = OccupancyMap::new();
        let ctx = MoveContext::new(&map, None, None);
        let ant = ant_at("red", Point::ORIGIN);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..200 {
            let p = Wander::default().choose(&ant, &ctx, &mut rng);
            assert!(p.chebyshev_distance(&Point::ORIGIN) <= 1);
        }
    }

    #[test]
    fn test_wander_avoids_rocks_and_friends() {
        let mut map = OccupancyMap::new();
        for d in DirectionSet::Adjacent.members() {
            let p = Point::ORIGIN.plus(*d);
            if p.x < 0 {
                map.insert(Box::new(Rock::new(p, 10))).unwrap();
            } else {
                map.insert(Box::new(ant_at("red", p))).unwrap();
            }
        }
        let ctx = MoveContext::new(&map, None, None);
        let ant = ant_at("red", Point::ORIGIN);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..100 {
            assert_eq!(Wander::default().choose(&ant, &ctx, &mut rng), Point::ORIGIN);
        }
    }

    #[test]
    fn test_wander_respects_alliances() {
        let mut map = OccupancyMap::new();
        map.insert(Box::new(ant_at("blue", Point::new(1, 0)))).unwrap();
        let ant = ant_at("red", Point::ORIGIN);

        let hostile = MoveContext::new(&map, None, None);
        assert!(hostile.is_open_to(ant.owner(), Point::new(1, 0)));

        let friends: Friends = [Owner::from("blue")].into_iter().collect();
        let allied = MoveContext::new(&map, None, Some(&friends));
        assert!(!allied.is_open_to(ant.owner(), Point::new(1, 0)));
    }

    #[test]
    fn test_wander_follows_trail() {
        let map = OccupancyMap::new();
        let trail: Pheromones = [Point::new(0, 1)].into_iter().collect();
        let ctx = MoveContext::new(&map, Some(&trail), None);
        let ant = ant_at("red", Point::ORIGIN);
        let policy = Wander {
            trail_bias: 1.0,
            momentum: 0.0,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        for _ in 0..20 {
            assert_eq!(policy.choose(&ant, &ctx, &mut rng), Point::new(0, 1));
        }
    }

    #[test]
    fn test_hold_never_moves() {
        let map = OccupancyMap::new();
        let ctx = MoveContext::new(&map, None, None);
        let ant = ant_at("red", Point::new(5, 5));
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(Hold.choose(&ant, &ctx, &mut rng), Point::new(5, 5));
    }
}
