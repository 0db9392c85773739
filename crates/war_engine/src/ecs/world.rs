//! Entity world
//!
//! Owns every entity's body, collide component, per-frame contact state and
//! gameplay payload, together with the [`CollisionSystem`] for the loaded
//! level. Bodies live in an [`EntityMap`]; everything else is keyed by the same
//! handle in secondary maps so a move can borrow the bodies mutably while the
//! mover's component is borrowed on its own.

use std::collections::HashSet;

use log::{debug, info, trace};
use crate::core::config::{CollisionConfig, LevelDimensions};
use crate::ecs::components::{Body, CollideComponent, CollisionResponse, CollisionState};
use crate::ecs::EntityId;
use crate::error::{CollisionError, CollisionResult};
use crate::foundation::collections::{ComponentMap, EntityMap};
use crate::foundation::math::{utils, Vec2};
use crate::physics::collision::Bounds;
use crate::physics::{CollideBehavior, CollisionSystem, Contact};

/// Entities plus the collision system for the current level
pub struct World<T = ()> {
    system: CollisionSystem,
    bodies: EntityMap<Body>,
    colliders: ComponentMap<CollideComponent>,
    states: ComponentMap<CollisionState>,
    data: ComponentMap<T>,
}

impl<T: CollisionResponse> World<T> {
    /// Create an empty world for `level`
    pub fn new(level: LevelDimensions, config: CollisionConfig) -> CollisionResult<Self> {
        Ok(Self {
            system: CollisionSystem::new(level, config)?,
            bodies: EntityMap::with_key(),
            colliders: ComponentMap::new(),
            states: ComponentMap::new(),
            data: ComponentMap::new(),
        })
    }

    /// Switch to a new level
    ///
    /// The grid is rebuilt and every entity forgets its registration; enabled
    /// entities re-register on the next [`update`](Self::update).
    pub fn load_level(&mut self, level: LevelDimensions) -> CollisionResult<()> {
        self.system.initialize_for_level(level)?;
        for collider in self.colliders.values_mut() {
            collider.reset_registration();
        }
        info!("Loaded level {}x{} with {} entities", level.width, level.height, self.bodies.len());
        Ok(())
    }

    /// The collision system
    pub fn system(&self) -> &CollisionSystem {
        &self.system
    }

    /// Add an entity; it joins the grid on the next update or an explicit [`register`](Self::register)
    pub fn spawn(&mut self, body: Body, behavior: CollideBehavior, data: T) -> EntityId {
        let id = self.bodies.insert(body);
        self.colliders.insert(id, CollideComponent::new(id, behavior));
        self.states.insert(id, CollisionState::default());
        self.data.insert(id, data);
        trace!("Spawned {id:?} as {behavior:?}");
        id
    }

    /// Remove an entity, unregistering it first
    pub fn despawn(&mut self, id: EntityId) -> Option<(Body, T)> {
        if let Some(mut collider) = self.colliders.remove(id) {
            collider.unregister(&mut self.system);
        }
        self.states.remove(id);
        let data = self.data.remove(id);
        let body = self.bodies.remove(id)?;
        trace!("Despawned {id:?}");
        data.map(|data| (body, data))
    }

    /// Whether `id` refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.bodies.contains_key(id)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no entities
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body of an entity
    pub fn get(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(id)
    }

    /// Mutable body of an entity
    ///
    /// Position edits made here are re-bucketed on the next update.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    /// Gameplay payload of an entity
    pub fn data(&self, id: EntityId) -> Option<&T> {
        self.data.get(id)
    }

    /// Mutable gameplay payload of an entity
    pub fn data_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.data.get_mut(id)
    }

    /// Collide component of an entity
    pub fn collider(&self, id: EntityId) -> Option<&CollideComponent> {
        self.colliders.get(id)
    }

    /// Contacts the entity took part in this frame
    pub fn state(&self, id: EntityId) -> Option<&CollisionState> {
        self.states.get(id)
    }

    /// All entities in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Body)> {
        self.bodies.iter()
    }

    /// Enable an entity; it registers on the next update
    pub fn enable(&mut self, id: EntityId) -> CollisionResult<()> {
        self.bodies.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?.enable();
        Ok(())
    }

    /// Disable an entity; it leaves the grid on the next update
    pub fn disable(&mut self, id: EntityId) -> CollisionResult<()> {
        self.bodies.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?.disable();
        Ok(())
    }

    /// Change how an entity takes part in collision
    pub fn set_behavior(&mut self, id: EntityId, behavior: CollideBehavior) -> CollisionResult<()> {
        let body = self.bodies.get(id).ok_or(CollisionError::EntityNotFound(id))?;
        let collider = self.colliders.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?;
        collider.set_behavior(behavior, &mut self.system, body);
        Ok(())
    }

    /// Register an entity with the grid now
    pub fn register(&mut self, id: EntityId) -> CollisionResult<()> {
        let body = self.bodies.get(id).ok_or(CollisionError::EntityNotFound(id))?;
        let collider = self.colliders.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?;
        collider.register(&mut self.system, body);
        Ok(())
    }

    /// Remove an entity from the grid now
    pub fn unregister(&mut self, id: EntityId) -> CollisionResult<()> {
        let collider = self.colliders.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?;
        collider.unregister(&mut self.system);
        Ok(())
    }

    /// Move an entity and dispatch the contacts its collision pass finds
    pub fn move_entity(&mut self, id: EntityId, delta: Vec2) -> CollisionResult<Vec<Contact>> {
        let contacts = self.move_collider(id, delta)?;
        for contact in &contacts {
            self.dispatch(contact);
        }
        Ok(contacts)
    }

    /// Advance one frame
    ///
    /// Clears last frame's contacts, reconciles every entity's registration
    /// with its enabled flag, then moves every enabled entity by
    /// `velocity * dt`. Each pair of entities is dispatched at most once per
    /// frame. Returns the contacts dispatched.
    pub fn update(&mut self, dt: f32) -> Vec<Contact> {
        for state in self.states.values_mut() {
            state.clear();
        }

        for (id, collider) in self.colliders.iter_mut() {
            let Some(body) = self.bodies.get(id) else {
                continue;
            };
            collider.update_registration(&mut self.system, body);
            self.system.reseat(collider, body);
        }

        let movers: Vec<(EntityId, Vec2)> = self
            .bodies
            .iter()
            .filter(|(_, body)| body.enabled && body.velocity != Vec2::zeros())
            .map(|(id, body)| (id, body.velocity * dt))
            .collect();

        let mut seen: HashSet<(EntityId, EntityId)> = HashSet::new();
        let mut dispatched = Vec::new();
        for (id, delta) in movers {
            // An earlier response may have disabled or despawned this mover
            if !self.bodies.get(id).is_some_and(|body| body.enabled) {
                continue;
            }
            let Ok(contacts) = self.move_collider(id, delta) else {
                continue;
            };
            for contact in contacts {
                let pair = if contact.entity < contact.other {
                    (contact.entity, contact.other)
                } else {
                    (contact.other, contact.entity)
                };
                if seen.insert(pair) {
                    self.dispatch(&contact);
                    dispatched.push(contact);
                }
            }
        }

        if !dispatched.is_empty() {
            debug!("Frame dispatched {} contacts", dispatched.len());
        }
        dispatched
    }

    /// Enabled entities whose centers lie within `radius` of `(x, y)`, nearest first
    pub fn entities_within_radius(&self, x: f32, y: f32, radius: f32) -> Vec<EntityId> {
        let center = Vec2::new(x, y);
        let radius = radius.max(0.0);
        let bounds = Bounds::from_circle(center, radius);

        let mut found: Vec<(EntityId, f32)> = Vec::new();
        for cell in self.system.grid().cells_overlapping(&bounds) {
            for &id in cell.entities() {
                if found.iter().any(|(seen, _)| *seen == id) {
                    continue;
                }
                let Some(body) = self.bodies.get(id).filter(|body| body.enabled) else {
                    continue;
                };
                let distance_sq = utils::distance_squared(body.position, center);
                if distance_sq <= radius * radius {
                    found.push((id, distance_sq));
                }
            }
        }

        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found.into_iter().map(|(id, _)| id).collect()
    }

    fn move_collider(&mut self, id: EntityId, delta: Vec2) -> CollisionResult<Vec<Contact>> {
        let collider = self.colliders.get_mut(id).ok_or(CollisionError::EntityNotFound(id))?;
        if !self.bodies.contains_key(id) {
            return Err(CollisionError::EntityNotFound(id));
        }
        Ok(collider.move_by(&mut self.system, &mut self.bodies, delta))
    }

    /// Record the contact on both participants and run both responses
    fn dispatch(&mut self, contact: &Contact) {
        let reversed = contact.reversed();
        for contact in [*contact, reversed] {
            if let Some(state) = self.states.get_mut(contact.entity) {
                state.record(contact);
            }
            self.respond(&contact);
        }
    }

    fn respond(&mut self, contact: &Contact) {
        let id = contact.entity;
        let Some(mut payload) = self.data.remove(id) else {
            return;
        };
        if let Some(body) = self.bodies.get_mut(id) {
            payload.on_collision(body, self.data.get(contact.other), contact);
        }
        self.data.insert(id, payload);

        // The response may have pushed the body into other cells
        if let (Some(collider), Some(body)) = (self.colliders.get_mut(id), self.bodies.get(id)) {
            self.system.reseat(collider, body);
        }
    }
}
