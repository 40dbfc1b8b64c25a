//! Inert obstacles that crumble after a fixed number of ticks.

use crate::codec::ObjectRecord;
use crate::object::{Object, ObjectKind, ObjectView, NOBODY};
use colony_core::{Owner, Point};
use serde::{Deserialize, Serialize};

/// Default rock lifetime in ticks
pub const ROCK_LIFETIME: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rock {
    point: Point,
    lifetime: i32,
}

impl Rock {
    pub fn new(point: Point, lifetime: i32) -> Self {
        Self { point, lifetime }
    }

    pub fn lifetime(&self) -> i32 {
        self.lifetime
    }
}

impl Object for Rock {
    fn owner(&self) -> &Owner {
        &NOBODY
    }

    fn point(&self) -> Point {
        self.point
    }

    // `<=` so a rock ticked past zero is still collected
    fn is_dead(&self) -> bool {
        self.lifetime <= 0
    }

    fn view(&self, _requester: &Owner) -> ObjectView {
        ObjectView::new(ObjectKind::Rock).with_point(self.point)
    }

    fn tick(&mut self) {
        self.lifetime = (self.lifetime - 1).max(0);
    }

    fn record(&self) -> Option<ObjectRecord> {
        Some(ObjectRecord::Rock(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_dies_when_lifetime_runs_out() {
        let mut rock = Rock::new(Point::new(0, 0), 3);
        rock.tick();
        rock.tick();
        assert!(!rock.is_dead());
        rock.tick();
        assert!(rock.is_dead());
        assert_eq!(rock.lifetime(), 0);
    }

    #[test]
    fn test_dead_check_is_idempotent() {
        let mut rock = Rock::new(Point::new(0, 0), 1);
        rock.tick();
        rock.tick();
        rock.tick();
        assert!(rock.is_dead());
        assert_eq!(rock.lifetime(), 0);

        assert!(Rock::new(Point::new(0, 0), -4).is_dead());
    }

    #[test]
    fn test_rock_view_is_the_same_for_everyone() {
        let rock = Rock::new(Point::new(4, -1), ROCK_LIFETIME);
        let a = rock.view(&Owner::from("red"));
        let b = rock.view(&Owner::none());
        assert_eq!(a, b);
        assert_eq!(a.kind, ObjectKind::Rock);
        assert!(a.owner.is_none());
        assert!(rock.owner().is_none());
        assert!(rock.as_animate().is_none());
    }
}
