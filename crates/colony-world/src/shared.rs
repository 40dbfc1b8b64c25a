//! Thread-safe handle around a world.

use crate::world::{TickReport, World};
use parking_lot::RwLock;
use std::sync::Arc;

/// A world behind one lock. A tick holds the write lock from start to
/// finish, so readers never see a half-resolved occupancy map and two ticks
/// never overlap.
#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    pub fn advance(&self) -> TickReport {
        self.inner.write().advance()
    }

    pub fn read<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut self.inner.write())
    }
}
