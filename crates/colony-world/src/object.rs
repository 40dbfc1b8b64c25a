//! Capability contracts shared by everything that lives on the grid.

use crate::codec::ObjectRecord;
use crate::context::MoveContext;
use colony_core::{Direction, Owner, Point, UnitStats};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Owner reported by objects that belong to nobody
pub static NOBODY: Owner = Owner(String::new());

/// Damage large enough to kill any unit outright
pub const LETHAL_DAMAGE: i32 = i32::MAX;

/// Handle into the world's object arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Type tag carried by every view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Ant,
    Colony,
    Rock,
}

/// What one owner is allowed to see of an object.
///
/// Only `kind` is guaranteed; every other field is filled in or left out
/// depending on who asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectView {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Owner>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<UnitStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
}

impl ObjectView {
    pub fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            owner: None,
            point: None,
            direction: None,
            stats: None,
            health: None,
            ready: None,
        }
    }

    pub fn with_owner(mut self, owner: &Owner) -> Self {
        self.owner = Some(owner.clone());
        self
    }

    pub fn with_point(mut self, point: Point) -> Self {
        self.point = Some(point);
        self
    }

    /// True when the view carries nothing beyond what any requester may see
    pub fn is_redacted(&self) -> bool {
        self.direction.is_none()
            && self.stats.is_none()
            && self.health.is_none()
            && self.ready.is_none()
    }
}

/// Any entity occupying at most one point at a time
pub trait Object: fmt::Debug + Send + Sync {
    fn owner(&self) -> &Owner;

    fn point(&self) -> Point;

    fn is_dead(&self) -> bool;

    /// Projection of this object as seen by `requester`
    fn view(&self, requester: &Owner) -> ObjectView;

    /// Called by the world exactly once per tick
    fn tick(&mut self) {}

    fn as_animate(&self) -> Option<&dyn AnimateObject> {
        None
    }

    fn as_animate_mut(&mut self) -> Option<&mut dyn AnimateObject> {
        None
    }

    /// Self-describing record for the codec, if this variant is registered
    fn record(&self) -> Option<ObjectRecord> {
        None
    }
}

/// An object that can move and fight
pub trait AnimateObject: Object {
    /// Where this object wants to be next tick. Returning the current point
    /// means stay.
    fn next_point(&self, ctx: &MoveContext<'_>, rng: &mut dyn RngCore) -> Point;

    /// Resolve an encounter with the occupant of the destination cell.
    ///
    /// Returns true when this object wins. The loser must report
    /// `is_dead()` afterwards. The world only calls this against animate
    /// opponents; running into an obstacle kills the mover without a fight.
    fn attack(&mut self, opponent: &mut dyn Object, rng: &mut dyn RngCore) -> bool;

    fn take_damage(&mut self, amount: i32);

    fn strength(&self) -> i32;

    /// The world has placed this object at `point`
    fn move_to(&mut self, point: Point);
}
