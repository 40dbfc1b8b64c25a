//! The world: every per-tick piece of state and the tick algorithm.

use crate::alliance::Alliances;
use crate::codec::ObjectRecord;
use crate::colony::Colony;
use crate::context::{MoveContext, Pheromones};
use crate::object::{Object, ObjectId, ObjectKind, ObjectView, LETHAL_DAMAGE};
use crate::occupancy::OccupancyMap;
use crate::policy::{default_policy, MovePolicy};
use crate::rock::Rock;
use colony_core::{Error, Owner, Point, Result, WorldConfig};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// What happened during one call to [`World::advance`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub moves: usize,
    pub fights: usize,
    pub produced: usize,
    pub removed: usize,
    pub population: usize,
}

pub struct World {
    config: WorldConfig,
    owners: HashMap<Owner, Colony>,
    pheromones: HashMap<Owner, Pheromones>,
    occupancy: OccupancyMap,
    colonies: HashMap<Point, Owner>,
    alliances: Alliances,
    policy: Arc<dyn MovePolicy>,
    rng: ChaCha8Rng,
    tick: u64,
}

impl World {
    pub fn new(config: WorldConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// A world whose randomness is reproducible from `seed`
    pub fn with_seed(config: WorldConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: WorldConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            owners: HashMap::new(),
            pheromones: HashMap::new(),
            occupancy: OccupancyMap::new(),
            colonies: HashMap::new(),
            alliances: Alliances::new(),
            policy: default_policy(),
            rng,
            tick: 0,
        }
    }

    /// Movement policy handed to newly produced ants
    pub fn with_policy(mut self, policy: Arc<dyn MovePolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    pub fn object_at(&self, point: Point) -> Option<&dyn Object> {
        self.occupancy.object_at(point)
    }

    pub fn colony(&self, owner: &Owner) -> Option<&Colony> {
        self.owners.get(owner)
    }

    pub fn colony_at(&self, point: Point) -> Option<&Colony> {
        self.colonies.get(&point).and_then(|o| self.owners.get(o))
    }

    pub fn colony_count(&self) -> usize {
        self.owners.len()
    }

    pub fn alliances(&self) -> &Alliances {
        &self.alliances
    }

    pub fn pheromones(&self, owner: &Owner) -> Option<&Pheromones> {
        self.pheromones.get(owner)
    }

    /// Found a colony for `owner` on a random free cell, each axis drawn
    /// from `[-extent, extent)`.
    pub fn new_colony(&mut self, owner: impl Into<Owner>) -> Result<Point> {
        let owner = owner.into();
        if self.owners.contains_key(&owner) {
            return Err(Error::AlreadyExists(owner));
        }

        self.config.validate()?;
        for _ in 0..self.config.placement_attempts {
            let point = self.random_point();
            if !self.colonies.contains_key(&point) && !self.occupancy.is_occupied(point) {
                self.found_colony(owner, point);
                return Ok(point);
            }
        }

        Err(Error::NoFreeCell {
            attempts: self.config.placement_attempts,
        })
    }

    /// Found a colony at a chosen point
    pub fn new_colony_at(&mut self, owner: impl Into<Owner>, point: Point) -> Result<()> {
        let owner = owner.into();
        if self.owners.contains_key(&owner) {
            return Err(Error::AlreadyExists(owner));
        }
        if self.colonies.contains_key(&point) {
            return Err(Error::Occupied(point));
        }
        self.found_colony(owner, point);
        Ok(())
    }

    fn found_colony(&mut self, owner: Owner, point: Point) {
        let colony = Colony::new(
            owner.clone(),
            point,
            self.config.unit,
            self.config.production_cooldown,
        );
        self.owners.insert(owner.clone(), colony);
        self.pheromones.insert(owner.clone(), Pheromones::new());
        self.colonies.insert(point, owner.clone());
        info!(
            event = "colony_created",
            owner = %owner,
            x = point.x,
            y = point.y,
            "Created new colony"
        );
    }

    /// Remove an owner's colony, trail and index entry. Units already in
    /// the field are left alone. Returns false when there was nothing to do.
    pub fn kill_colony(&mut self, owner: &Owner) -> bool {
        let Some(colony) = self.owners.remove(owner) else {
            return false;
        };
        self.pheromones.remove(owner);
        self.colonies.remove(&colony.point());
        info!(
            event = "colony_killed",
            owner = %owner,
            produced = colony.produced(),
            "Colony removed"
        );
        true
    }

    pub fn friend(&mut self, a: &Owner, b: &Owner) {
        self.alliances.friend(a, b);
        debug!(a = %a, b = %b, "Alliance formed");
    }

    pub fn unfriend(&mut self, a: &Owner, b: &Owner) {
        self.alliances.unfriend(a, b);
        debug!(a = %a, b = %b, "Alliance broken");
    }

    /// Mark a cell on an owner's trail. Owners without a colony have no
    /// trail, and the call returns false.
    pub fn mark_pheromone(&mut self, owner: &Owner, point: Point) -> bool {
        match self.pheromones.get_mut(owner) {
            Some(trail) => {
                trail.insert(point);
                true
            }
            None => false,
        }
    }

    pub fn clear_pheromone(&mut self, owner: &Owner, point: Point) -> bool {
        self.pheromones
            .get_mut(owner)
            .is_some_and(|trail| trail.remove(&point))
    }

    /// Let an owner's colony produce again
    pub fn rearm_production(&mut self, owner: &Owner) -> bool {
        match self.owners.get_mut(owner) {
            Some(colony) => {
                colony.rearm();
                true
            }
            None => false,
        }
    }

    pub fn rearm_all(&mut self) {
        for colony in self.owners.values_mut() {
            colony.rearm();
        }
    }

    /// Put an object on the grid at the point it reports
    pub fn place(&mut self, object: Box<dyn Object>) -> Result<ObjectId> {
        self.occupancy.insert(object)
    }

    pub fn place_rock(&mut self, point: Point) -> Result<ObjectId> {
        self.place(Box::new(Rock::new(point, self.config.rock_lifetime)))
    }

    /// Scatter rocks on free, non-colony cells inside the placement region
    pub fn scatter_rocks(&mut self, count: usize) -> Result<usize> {
        self.config.validate()?;
        let mut placed = 0;
        for _ in 0..self.config.placement_attempts {
            if placed == count {
                break;
            }
            let point = self.random_point();
            if self.colonies.contains_key(&point) || self.occupancy.is_occupied(point) {
                continue;
            }
            self.place_rock(point)?;
            placed += 1;
        }
        if placed < count {
            warn!(requested = count, placed, "Ran out of attempts scattering rocks");
        }
        Ok(placed)
    }

    /// Uniform cell in `[-extent, extent)` per axis. Callers validate the
    /// config first so the range is never empty.
    fn random_point(&mut self) -> Point {
        let extent = self.config.extent;
        Point::new(
            self.rng.gen_range(-extent..extent),
            self.rng.gen_range(-extent..extent),
        )
    }

    /// Run one tick: move and fight, produce, age, sweep the dead.
    pub fn advance(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        // Sorted first so a seeded world replays, then shuffled for fairness
        let mut order = self.occupancy.ids();
        order.shuffle(&mut self.rng);

        for id in order {
            self.resolve(id, &mut report);
        }

        self.produce(&mut report);
        self.age();
        report.removed = self.sweep_dead();
        report.population = self.occupancy.len();

        debug_assert!(
            self.check_invariants().is_ok(),
            "occupancy invariant broken: {:?}",
            self.check_invariants()
        );

        debug!(
            event = "tick",
            tick = report.tick,
            moves = report.moves,
            fights = report.fights,
            produced = report.produced,
            removed = report.removed,
            population = report.population,
            "Tick complete"
        );
        report
    }

    fn resolve(&mut self, id: ObjectId, report: &mut TickReport) {
        let (from, owner) = match self.occupancy.get(id) {
            Some(object) if !object.is_dead() => (object.point(), object.owner().clone()),
            _ => return,
        };

        let to = {
            let Some(mover) = self.occupancy.get(id).and_then(|o| o.as_animate()) else {
                return;
            };
            let ctx = MoveContext::new(
                &self.occupancy,
                self.pheromones.get(&owner),
                self.alliances.friends_of(&owner),
            );
            mover.next_point(&ctx, &mut self.rng)
        };

        if to == from {
            return;
        }

        let Some(target_id) = self.occupancy.id_at(to) else {
            self.occupancy.relocate(id, to);
            report.moves += 1;
            trace!(object = %id, from = %from, to = %to, "Moved");
            return;
        };

        report.fights += 1;
        let Some(mut attacker) = self.occupancy.take(id) else {
            return;
        };
        // Obstacles take no damage, so bumping into one is always a loss
        let won = match (attacker.as_animate_mut(), self.occupancy.get_mut(target_id)) {
            (Some(animate), Some(target)) if target.as_animate().is_some() => {
                animate.attack(target, &mut self.rng)
            }
            (Some(animate), Some(_)) => {
                animate.take_damage(LETHAL_DAMAGE);
                false
            }
            _ => false,
        };

        if won {
            if let Some(loser) = self.occupancy.evict(target_id) {
                debug_assert!(loser.is_dead(), "losing target {target_id} still alive");
                debug!(
                    event = "kill",
                    winner = %owner,
                    loser = %loser.owner(),
                    x = to.x,
                    y = to.y,
                    "{} kills an ant of {}",
                    owner,
                    loser.owner()
                );
            }
            self.occupancy.restore(id, attacker);
            self.occupancy.relocate(id, to);
        } else {
            self.occupancy.vacate(id, from);
            let killer = self
                .occupancy
                .object_at(to)
                .map(|o| o.owner().to_string())
                .unwrap_or_default();
            debug!(
                event = "killed",
                loser = %owner,
                killer = %killer,
                x = from.x,
                y = from.y,
                "{} ant is killed by {}",
                owner,
                killer
            );
        }
    }

    fn produce(&mut self, report: &mut TickReport) {
        let mut owners: Vec<Owner> = self.owners.keys().cloned().collect();
        owners.sort_unstable();

        for owner in owners {
            let Some(colony) = self.owners.get_mut(&owner) else {
                continue;
            };
            let Some(ant) = colony.produce(&self.occupancy, &mut self.rng) else {
                continue;
            };
            let point = ant.point();
            match self.occupancy.insert(Box::new(ant.with_policy(self.policy.clone()))) {
                Ok(id) => {
                    report.produced += 1;
                    trace!(owner = %owner, object = %id, at = %point, "Produced ant");
                }
                Err(e) => warn!(owner = %owner, error = %e, "Produced ant could not be placed"),
            }
        }
    }

    fn age(&mut self) {
        for object in self.occupancy.objects_mut() {
            object.tick();
        }
        for colony in self.owners.values_mut() {
            colony.tick();
        }
    }

    fn sweep_dead(&mut self) -> usize {
        let dead: Vec<ObjectId> = self
            .occupancy
            .iter()
            .filter(|(_, o)| o.is_dead())
            .map(|(id, _)| id)
            .collect();

        for id in &dead {
            if let Some(object) = self.occupancy.evict(*id) {
                trace!(object = %id, owner = %object.owner(), at = %object.point(), "Removed dead object");
            }
        }
        dead.len()
    }

    /// No two objects share a point and each object sits where it says
    pub fn check_invariants(&self) -> Result<()> {
        self.occupancy.check()?;
        for (point, owner) in &self.colonies {
            match self.owners.get(owner) {
                Some(colony) if colony.point() == *point => {}
                _ => {
                    return Err(Error::InvalidState(format!(
                        "colony index {point} -> {owner} is stale"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Animate objects per owner
    pub fn population_by_owner(&self) -> BTreeMap<Owner, usize> {
        let mut counts = BTreeMap::new();
        for (_, object) in self.occupancy.iter() {
            if object.as_animate().is_some() {
                *counts.entry(object.owner().clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Every colony and object as `requester` is allowed to see it
    pub fn views_for(&self, requester: &Owner) -> Vec<ObjectView> {
        let mut colonies: Vec<&Colony> = self.owners.values().collect();
        colonies.sort_by(|a, b| a.owner().cmp(b.owner()));

        let mut views: Vec<ObjectView> = colonies.iter().map(|c| c.view(requester)).collect();
        views.extend(self.occupancy.ids().into_iter().filter_map(|id| {
            self.occupancy.get(id).map(|o| o.view(requester))
        }));
        views
    }

    pub fn count_kind(&self, kind: ObjectKind) -> usize {
        self.occupancy
            .iter()
            .filter(|(_, o)| o.view(&Owner::none()).kind == kind)
            .count()
    }

    /// Codec records for every colony and object, colonies first
    pub fn records(&self) -> Vec<ObjectRecord> {
        let mut colonies: Vec<&Colony> = self.owners.values().collect();
        colonies.sort_by(|a, b| a.owner().cmp(b.owner()));

        let mut records: Vec<ObjectRecord> = colonies.iter().filter_map(|c| c.record()).collect();
        records.extend(
            self.occupancy
                .ids()
                .into_iter()
                .filter_map(|id| self.occupancy.get(id).and_then(|o| o.record())),
        );
        records
    }
}
