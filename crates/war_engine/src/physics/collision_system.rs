//! Level-scoped collision system
//!
//! Owns the one [`SpatialGrid`] bound to the loaded level and exposes the
//! register / unregister / move / query protocol to entities. There is no
//! global instance: the game owns a `CollisionSystem` and passes it to the
//! components that need it.

use log::{debug, info, warn};

use crate::core::config::{CollisionConfig, LevelDimensions};
use crate::ecs::components::{Body, BodyLookup, BodyStore, CollideComponent};
use crate::ecs::EntityId;
use crate::error::CollisionResult;
use crate::foundation::math::Vec2;
use crate::spatial::{Cell, SpatialGrid};

/// A detected overlap, seen from `entity`'s point of view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The entity being notified
    pub entity: EntityId,
    /// The entity it touched
    pub other: EntityId,
    /// Translation that would move `entity` out of `other`
    pub push: Vec2,
}

impl Contact {
    /// Create a contact
    pub fn new(entity: EntityId, other: EntityId, push: Vec2) -> Self {
        Self { entity, other, push }
    }

    /// The same contact from the other participant's point of view
    pub fn reversed(&self) -> Self {
        Self {
            entity: self.other,
            other: self.entity,
            push: -self.push,
        }
    }

    /// Penetration depth
    pub fn depth(&self) -> f32 {
        self.push.magnitude()
    }
}

/// Collision system bound to the current level
pub struct CollisionSystem {
    config: CollisionConfig,
    level: LevelDimensions,
    grid: SpatialGrid,
}

impl CollisionSystem {
    /// Build a system with a fresh grid sized to `level`
    pub fn new(level: LevelDimensions, config: CollisionConfig) -> CollisionResult<Self> {
        let grid = SpatialGrid::from_config(level, &config)?;
        Ok(Self { config, level, grid })
    }

    /// Discard the current grid and build a fresh one for a newly loaded level
    ///
    /// On error the previous grid is kept. Components registered with the
    /// discarded grid must forget their registration; the entity world does
    /// that for the entities it owns.
    pub fn initialize_for_level(&mut self, level: LevelDimensions) -> CollisionResult<()> {
        self.grid = SpatialGrid::from_config(level, &self.config)?;
        self.level = level;
        info!("Collision system initialized for {}x{} level", level.width, level.height);
        Ok(())
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Dimensions of the loaded level
    pub fn level(&self) -> LevelDimensions {
        self.level
    }

    /// The active grid
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Add a component's entity to the grid; no-op if already registered
    pub fn register(&mut self, component: &mut CollideComponent, body: &Body) {
        if component.is_registered() {
            return;
        }
        self.grid.add(component, body);
        component.set_registered(true);
        debug!("{:?} registered as {:?}", component.entity(), component.behavior());
    }

    /// Remove a component's entity from the grid; no-op if not registered
    pub fn unregister(&mut self, component: &mut CollideComponent) {
        if !component.is_registered() {
            return;
        }
        self.grid.remove(component);
        component.set_registered(false);
        debug!("{:?} unregistered", component.entity());
    }

    /// Re-bucket a registered entity after its body changed
    pub fn reseat(&mut self, component: &mut CollideComponent, body: &Body) {
        if component.is_registered() {
            self.grid.reseat(component, body);
        }
    }

    /// Apply `delta`, re-bucket, and run a collision pass for active movers
    ///
    /// Unregistered entities only have the delta applied; they stay off the
    /// grid until the next registration update.
    pub fn move_entity<B: BodyStore + ?Sized>(
        &mut self,
        component: &mut CollideComponent,
        bodies: &mut B,
        delta: Vec2,
    ) -> Vec<Contact> {
        let entity = component.entity();
        let Some(body) = bodies.body_mut(entity) else {
            warn!("move requested for {entity:?} which has no body");
            return Vec::new();
        };
        body.position += delta;
        let body = *body;

        if !component.is_registered() {
            return Vec::new();
        }
        self.grid.reseat(component, &body);

        if !component.behavior().initiates_checks() || !body.enabled {
            return Vec::new();
        }
        let contacts = self.grid.collide(component, &*bodies);
        if !contacts.is_empty() {
            debug!("{entity:?} touched {} entities", contacts.len());
        }
        contacts
    }

    /// Collision pass for a registered entity at its current position
    pub fn collide<L: BodyLookup + ?Sized>(&self, component: &CollideComponent, bodies: &L) -> Vec<Contact> {
        self.grid.collide(component, bodies)
    }

    /// Cells overlapping an entity's current bounds
    pub fn relevant_cells(&self, body: &Body) -> Vec<&Cell> {
        self.grid.relevant_cells(body)
    }

    /// Coarse, cell-granular radius query around a world point
    pub fn cells_within_radius(&self, x: f32, y: f32, radius: f32) -> Vec<&Cell> {
        self.grid.cells_within_radius(x, y, radius)
    }
}
