//! Mobile units produced by colonies.

use crate::codec::ObjectRecord;
use crate::context::MoveContext;
use crate::object::{AnimateObject, Object, ObjectKind, ObjectView, LETHAL_DAMAGE};
use crate::policy::{default_policy, MovePolicy};
use colony_core::{Direction, Owner, Point, UnitStats};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// A unit owned by a colony
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ant {
    owner: Owner,
    point: Point,
    direction: Direction,
    stats: UnitStats,
    health: i32,
    kills: u32,
    #[serde(skip, default = "default_policy")]
    policy: Arc<dyn MovePolicy>,
}

impl Ant {
    pub fn new(owner: Owner, point: Point, direction: Direction, stats: UnitStats) -> Self {
        Self {
            owner,
            point,
            direction,
            stats,
            health: stats.endurance,
            kills: 0,
            policy: default_policy(),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn MovePolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn stats(&self) -> UnitStats {
        self.stats
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }
}

impl Object for Ant {
    fn owner(&self) -> &Owner {
        &self.owner
    }

    fn point(&self) -> Point {
        self.point
    }

    fn is_dead(&self) -> bool {
        self.health <= 0
    }

    fn view(&self, requester: &Owner) -> ObjectView {
        let view = ObjectView::new(ObjectKind::Ant)
            .with_owner(&self.owner)
            .with_point(self.point);
        if *requester != self.owner {
            return view;
        }
        ObjectView {
            direction: Some(self.direction),
            stats: Some(self.stats),
            health: Some(self.health),
            ..view
        }
    }

    fn as_animate(&self) -> Option<&dyn AnimateObject> {
        Some(self)
    }

    fn as_animate_mut(&mut self) -> Option<&mut dyn AnimateObject> {
        Some(self)
    }

    fn record(&self) -> Option<ObjectRecord> {
        Some(ObjectRecord::Ant(self.clone()))
    }
}

impl AnimateObject for Ant {
    fn next_point(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> Point {
        self.policy.choose(self, ctx, rng)
    }

    /// Win odds are proportional to strength. The loser takes lethal damage,
    /// the winner takes the loser's strength. Inanimate obstacles always win.
    fn attack(&mut self, opponent: &mut dyn Object, rng: &mut dyn RngCore) -> bool {
        let Some(opponent) = opponent.as_animate_mut() else {
            self.take_damage(LETHAL_DAMAGE);
            return false;
        };

        let mine = self.strength().max(0);
        let theirs = opponent.strength().max(0);
        let won = if mine + theirs == 0 {
            rng.gen_bool(0.5)
        } else {
            rng.gen_range(0..mine + theirs) < mine
        };

        trace!(
            attacker = %self.owner,
            defender = %opponent.owner(),
            attacker_strength = mine,
            defender_strength = theirs,
            won,
            "Ant fight"
        );

        if won {
            opponent.take_damage(LETHAL_DAMAGE);
            self.take_damage(theirs);
            self.kills += 1;
        } else {
            self.take_damage(LETHAL_DAMAGE);
            opponent.take_damage(mine);
        }
        won
    }

    fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0));
    }

    fn strength(&self) -> i32 {
        self.stats.strength
    }

    fn move_to(&mut self, point: Point) {
        let step = Direction::new(
            (point.x - self.point.x).signum(),
            (point.y - self.point.y).signum(),
        );
        if !step.is_stay() {
            self.direction = step;
        }
        self.point = point;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rock::Rock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ant(owner: &str, x: i32, y: i32) -> Ant {
        Ant::new(
            Owner::from(owner),
            Point::new(x, y),
            Direction::new(1, 0),
            UnitStats::default(),
        )
    }

    #[test]
    fn test_ant_creation() {
        let ant = ant("red", 3, 4);
        assert_eq!(ant.owner(), &Owner::from("red"));
        assert_eq!(ant.point(), Point::new(3, 4));
        assert_eq!(ant.health(), 10);
        assert_eq!(ant.strength(), 2);
        assert_eq!(ant.kills(), 0);
        assert!(!ant.is_dead());
    }

    #[test]
    fn test_damage_kills() {
        let mut ant = ant("red", 0, 0);
        ant.take_damage(4);
        assert_eq!(ant.health(), 6);
        assert!(!ant.is_dead());

        ant.take_damage(LETHAL_DAMAGE);
        assert!(ant.is_dead());

        // negative damage never heals
        ant.take_damage(-50);
        assert!(ant.is_dead());
    }

    #[test]
    fn test_move_updates_facing() {
        let mut ant = ant("red", 0, 0);
        ant.move_to(Point::new(-1, 1));
        assert_eq!(ant.point(), Point::new(-1, 1));
        assert_eq!(ant.direction(), Direction::new(-1, 1));

        ant.move_to(Point::new(-1, 1));
        assert_eq!(ant.direction(), Direction::new(-1, 1));
    }

    #[test]
    fn test_fight_leaves_exactly_one_loser_dead() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let mut attacker = ant("red", 0, 0);
            let mut defender = ant("black", 1, 0);
            let won = attacker.attack(&mut defender, &mut rng);
            assert_eq!(won, defender.is_dead());
            assert_eq!(won, !attacker.is_dead());
        }
    }

    #[test]
    fn test_strength_decides_odds() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let strong = UnitStats {
            strength: 9,
            ..UnitStats::default()
        };
        let weak = UnitStats {
            strength: 1,
            ..UnitStats::default()
        };

        let wins = (0..1000)
            .filter(|_| {
                let mut a = Ant::new(Owner::from("a"), Point::ORIGIN, Direction::STAY, strong);
                let mut b = Ant::new(Owner::from("b"), Point::new(1, 0), Direction::STAY, weak);
                a.attack(&mut b, &mut rng)
            })
            .count();

        assert!(wins > 820 && wins < 980, "strong ant won {wins}/1000");
    }

    #[test]
    fn test_attacking_a_rock_is_fatal() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut attacker = ant("red", 0, 0);
        let mut rock = Rock::new(Point::new(1, 0), 10);
        assert!(!attacker.attack(&mut rock, &mut rng));
        assert!(attacker.is_dead());
        assert!(!rock.is_dead());
    }

    #[test]
    fn test_view_redacts_for_strangers() {
        let ant = ant("red", 2, 2);

        let own = ant.view(&Owner::from("red"));
        assert_eq!(own.kind, ObjectKind::Ant);
        assert_eq!(own.health, Some(10));
        assert_eq!(own.stats, Some(UnitStats::default()));

        let other = ant.view(&Owner::from("black"));
        assert_eq!(other.owner, Some(Owner::from("red")));
        assert_eq!(other.point, Some(Point::new(2, 2)));
        assert!(other.is_redacted());
    }
}
