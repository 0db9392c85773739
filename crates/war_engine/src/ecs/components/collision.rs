//! Collision components
//!
//! [`CollideComponent`] binds one entity to the collision grid under a
//! [`CollideBehavior`]. It owns the registration flag and the list of cells the
//! entity was placed in; the grid itself is reached through the
//! [`CollisionSystem`] passed to each operation.

use log::debug;

use crate::ecs::components::{Body, BodyStore};
use crate::ecs::EntityId;
use crate::foundation::math::Vec2;
use crate::physics::{CollideBehavior, CollisionSystem, Contact};
use crate::spatial::CellIndex;

/// Per-entity binding to the collision grid
#[derive(Debug, Clone)]
pub struct CollideComponent {
    entity: EntityId,
    behavior: CollideBehavior,
    /// Cells the entity currently occupies; at most one for single-cell behaviors
    cells: Vec<CellIndex>,
    registered: bool,
}

impl CollideComponent {
    /// Bind a component to `entity`
    pub fn new(entity: EntityId, behavior: CollideBehavior) -> Self {
        Self {
            entity,
            behavior,
            cells: Vec::with_capacity(1),
            registered: false,
        }
    }

    /// The owning entity
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Behavior currently in effect
    pub fn behavior(&self) -> CollideBehavior {
        self.behavior
    }

    /// Whether the entity is registered with the collision system
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Cells the entity currently occupies
    pub fn cells(&self) -> &[CellIndex] {
        &self.cells
    }

    /// The single owning cell of a single-cell entity
    pub fn current_cell(&self) -> Option<CellIndex> {
        self.cells.first().copied()
    }

    pub(crate) fn set_cells(&mut self, cells: Vec<CellIndex>) {
        self.cells = cells;
    }

    pub(crate) fn take_cells(&mut self) -> Vec<CellIndex> {
        std::mem::take(&mut self.cells)
    }

    pub(crate) fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    /// Forget all grid state; used when the grid it lived in was discarded
    pub(crate) fn reset_registration(&mut self) {
        self.cells.clear();
        self.registered = false;
    }

    /// Swap the behavior
    ///
    /// A registered entity is unregistered under the old behavior before the
    /// swap and registered again under the new one, so it is never laid out
    /// under two behaviors at once.
    pub fn set_behavior(&mut self, behavior: CollideBehavior, system: &mut CollisionSystem, body: &Body) {
        if self.behavior == behavior {
            return;
        }
        if !self.registered {
            self.behavior = behavior;
            return;
        }

        debug!("{:?} behavior {:?} -> {:?}", self.entity, self.behavior, behavior);
        self.unregister(system);
        self.behavior = behavior;
        self.register(system, body);
    }

    /// Register with the collision system; no-op if already registered
    pub fn register(&mut self, system: &mut CollisionSystem, body: &Body) {
        system.register(self, body);
    }

    /// Unregister from the collision system; no-op if not registered
    pub fn unregister(&mut self, system: &mut CollisionSystem) {
        system.unregister(self);
    }

    /// Reconcile registration with the entity's enabled flag; call once per frame
    pub fn update_registration(&mut self, system: &mut CollisionSystem, body: &Body) {
        if body.enabled && !self.registered {
            self.register(system, body);
        } else if !body.enabled && self.registered {
            self.unregister(system);
        }
    }

    /// Move the entity by `delta`
    ///
    /// With [`CollideBehavior::None`] the delta is applied directly. Otherwise
    /// the system applies it, re-buckets the entity and runs a collision pass
    /// before returning the contacts found.
    pub fn move_by<B: BodyStore + ?Sized>(
        &mut self,
        system: &mut CollisionSystem,
        bodies: &mut B,
        delta: Vec2,
    ) -> Vec<Contact> {
        if self.behavior == CollideBehavior::None {
            if let Some(body) = bodies.body_mut(self.entity) {
                body.position += delta;
            }
            return Vec::new();
        }
        system.move_entity(self, bodies, delta)
    }
}

/// Contacts an entity took part in during the current frame
///
/// Cleared at the start of every frame by the world update.
#[derive(Debug, Default, Clone)]
pub struct CollisionState {
    contacts: Vec<Contact>,
}

impl CollisionState {
    /// Record a contact seen from this entity's point of view
    pub fn record(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Contacts recorded this frame
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Check if we're currently colliding with any entity
    pub fn is_colliding(&self) -> bool {
        !self.contacts.is_empty()
    }

    /// Check if we're colliding with a specific entity
    pub fn is_colliding_with(&self, entity: EntityId) -> bool {
        self.contacts.iter().any(|c| c.other == entity)
    }

    /// Clear per-frame data
    pub(crate) fn clear(&mut self) {
        self.contacts.clear();
    }
}

/// Gameplay reaction to a contact
///
/// Called once for each participant. `contact.push` is the translation that
/// would move `body` out of the other entity; whether to apply it, deal
/// damage, or ignore the hit is up to the implementor.
pub trait CollisionResponse {
    /// React to touching `contact.other`, whose payload is `other` if it has one
    fn on_collision(&mut self, _body: &mut Body, _other: Option<&Self>, _contact: &Contact) {}
}

impl CollisionResponse for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CollisionConfig, LevelDimensions};
    use slotmap::SlotMap;

    fn setup() -> (CollisionSystem, SlotMap<EntityId, Body>) {
        let system = CollisionSystem::new(LevelDimensions::new(320.0, 320.0), CollisionConfig::new(32.0)).unwrap();
        (system, SlotMap::with_key())
    }

    #[test]
    fn test_register_is_idempotent() {
        let (mut system, mut bodies) = setup();
        let id = bodies.insert(Body::new(16.0, 16.0, 10.0));
        let mut component = CollideComponent::new(id, CollideBehavior::Active);

        component.register(&mut system, &bodies[id]);
        component.register(&mut system, &bodies[id]);
        assert!(component.is_registered());
        assert_eq!(system.grid().occupancy(id), vec![CellIndex::new(0, 0)]);

        component.unregister(&mut system);
        component.unregister(&mut system);
        assert!(!component.is_registered());
        assert!(system.grid().occupancy(id).is_empty());
    }

    #[test]
    fn test_set_behavior_unregistered_swaps_only() {
        let (mut system, mut bodies) = setup();
        let id = bodies.insert(Body::new(32.0, 32.0, 50.0));
        let mut component = CollideComponent::new(id, CollideBehavior::Active);

        component.set_behavior(CollideBehavior::ReceiveOnly, &mut system, &bodies[id]);
        assert_eq!(component.behavior(), CollideBehavior::ReceiveOnly);
        assert!(!component.is_registered());
        assert_eq!(system.grid().entity_count(), 0);
    }

    #[test]
    fn test_set_behavior_registered_relays_out() {
        let (mut system, mut bodies) = setup();
        let id = bodies.insert(Body::new(32.0, 32.0, 50.0));
        let mut component = CollideComponent::new(id, CollideBehavior::ReceiveOnly);
        component.register(&mut system, &bodies[id]);
        assert_eq!(system.grid().occupancy(id).len(), 9);

        component.set_behavior(CollideBehavior::Active, &mut system, &bodies[id]);
        assert!(component.is_registered());
        assert_eq!(system.grid().occupancy(id), vec![CellIndex::new(1, 1)]);

        component.set_behavior(CollideBehavior::None, &mut system, &bodies[id]);
        assert!(system.grid().occupancy(id).is_empty());

        component.set_behavior(CollideBehavior::ReceiveOnly, &mut system, &bodies[id]);
        assert_eq!(system.grid().occupancy(id).len(), 9);
    }

    #[test]
    fn test_update_registration_follows_enabled_flag() {
        let (mut system, mut bodies) = setup();
        let id = bodies.insert(Body::new(16.0, 16.0, 10.0));
        let mut component = CollideComponent::new(id, CollideBehavior::Active);

        component.update_registration(&mut system, &bodies[id]);
        assert!(component.is_registered());

        bodies[id].disable();
        component.update_registration(&mut system, &bodies[id]);
        assert!(!component.is_registered());
        assert!(system.grid().occupancy(id).is_empty());
    }

    #[test]
    fn test_move_with_no_behavior_bypasses_grid() {
        let (mut system, mut bodies) = setup();
        let id = bodies.insert(Body::new(16.0, 16.0, 10.0));
        let other = bodies.insert(Body::new(60.0, 16.0, 10.0));
        let mut component = CollideComponent::new(id, CollideBehavior::None);
        let mut other_component = CollideComponent::new(other, CollideBehavior::ReceiveOnly);
        component.register(&mut system, &bodies[id]);
        other_component.register(&mut system, &bodies[other]);

        let contacts = component.move_by(&mut system, &mut bodies, Vec2::new(40.0, 0.0));
        assert!(contacts.is_empty());
        assert_eq!(bodies[id].x(), 56.0);
        assert!(system.grid().occupancy(id).is_empty());
    }

    #[test]
    fn test_collision_state_queries() {
        let mut bodies: SlotMap<EntityId, Body> = SlotMap::with_key();
        let a = bodies.insert(Body::new(0.0, 0.0, 1.0));
        let b = bodies.insert(Body::new(0.0, 0.0, 1.0));
        let c = bodies.insert(Body::new(0.0, 0.0, 1.0));

        let mut state = CollisionState::default();
        assert!(!state.is_colliding());
        state.record(Contact::new(a, b, Vec2::new(1.0, 0.0)));
        assert!(state.is_colliding());
        assert!(state.is_colliding_with(b));
        assert!(!state.is_colliding_with(c));

        state.clear();
        assert!(state.contacts().is_empty());
    }
}
