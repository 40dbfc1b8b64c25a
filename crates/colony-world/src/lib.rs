//! World simulation engine.
//!
//! Colonies produce ants onto a shared 2D grid; ants wander, fight and die.
//! [`World::advance`] resolves one tick in a freshly shuffled order so no
//! object wins contested cells just by having been inserted first.

pub mod alliance;
pub mod ant;
pub mod codec;
pub mod colony;
pub mod context;
pub mod object;
pub mod occupancy;
pub mod policy;
pub mod rock;
pub mod shared;
pub mod world;

pub use alliance::Alliances;
pub use ant::Ant;
pub use codec::ObjectRecord;
pub use colony::Colony;
pub use context::{Friends, MoveContext, Pheromones};
pub use object::{AnimateObject, Object, ObjectId, ObjectKind, ObjectView};
pub use occupancy::OccupancyMap;
pub use policy::{Hold, MovePolicy, Wander};
pub use rock::Rock;
pub use shared::SharedWorld;
pub use world::{TickReport, World};
