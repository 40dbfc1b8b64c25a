//! Arena of grid objects plus the point index over it.

use crate::object::{Object, ObjectId};
use colony_core::{Error, Point, Result};
use std::collections::HashMap;

/// Authoritative table of who stands where.
///
/// Objects live in an id-keyed arena; `cells` maps each occupied point to
/// the id standing on it. At most one object per point.
#[derive(Debug, Default)]
pub struct OccupancyMap {
    objects: HashMap<ObjectId, Box<dyn Object>>,
    cells: HashMap<Point, ObjectId>,
    next_id: u64,
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object at its own reported point
    pub fn insert(&mut self, object: Box<dyn Object>) -> Result<ObjectId> {
        let point = object.point();
        if self.cells.contains_key(&point) {
            return Err(Error::Occupied(point));
        }
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.cells.insert(point, id);
        self.objects.insert(id, object);
        Ok(id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn Object> {
        self.objects.get(&id).map(|o| &**o)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Object> {
        let object: &mut dyn Object = &mut **self.objects.get_mut(&id)?;
        Some(object)
    }

    pub fn id_at(&self, point: Point) -> Option<ObjectId> {
        self.cells.get(&point).copied()
    }

    pub fn object_at(&self, point: Point) -> Option<&dyn Object> {
        self.id_at(point).and_then(|id| self.get(id))
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.cells.contains_key(&point)
    }

    /// All ids, ascending
    pub fn ids(&self) -> Vec<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &(dyn Object + 'static))> + '_ {
        self.objects.iter().map(|(id, o)| (*id, &**o))
    }

    pub(crate) fn objects_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Object>> + '_ {
        self.objects.values_mut()
    }

    /// Move an object from its current cell to a free one
    pub(crate) fn relocate(&mut self, id: ObjectId, to: Point) {
        debug_assert!(!self.cells.contains_key(&to), "relocating onto occupied {to}");
        let Some(object) = self.objects.get_mut(&id) else {
            return;
        };
        let from = object.point();
        if self.cells.get(&from) == Some(&id) {
            self.cells.remove(&from);
        }
        if let Some(animate) = object.as_animate_mut() {
            animate.move_to(to);
        }
        self.cells.insert(to, id);
    }

    /// Lift an object out of the arena while keeping its cell reserved
    pub(crate) fn take(&mut self, id: ObjectId) -> Option<Box<dyn Object>> {
        self.objects.remove(&id)
    }

    /// Put back an object lifted with [`take`](Self::take)
    pub(crate) fn restore(&mut self, id: ObjectId, object: Box<dyn Object>) {
        self.objects.insert(id, object);
    }

    /// Remove an object and free its cell
    pub(crate) fn evict(&mut self, id: ObjectId) -> Option<Box<dyn Object>> {
        let object = self.objects.remove(&id)?;
        self.vacate(id, object.point());
        Some(object)
    }

    /// Free `point` if `id` holds it
    pub(crate) fn vacate(&mut self, id: ObjectId, point: Point) {
        if self.cells.get(&point) == Some(&id) {
            self.cells.remove(&point);
        }
    }

    /// Every object sits on exactly the cell it reports, and every cell
    /// points at a live arena entry.
    pub fn check(&self) -> Result<()> {
        if self.cells.len() != self.objects.len() {
            return Err(Error::InvalidState(format!(
                "{} cells for {} objects",
                self.cells.len(),
                self.objects.len()
            )));
        }
        for (point, id) in &self.cells {
            match self.objects.get(id) {
                Some(object) if object.point() == *point => {}
                Some(object) => {
                    return Err(Error::InvalidState(format!(
                        "{id} indexed at {point} but reports {}",
                        object.point()
                    )))
                }
                None => {
                    return Err(Error::InvalidState(format!(
                        "cell {point} points at missing {id}"
                    )))
                }
            }
        }
        Ok(())
    }
}
