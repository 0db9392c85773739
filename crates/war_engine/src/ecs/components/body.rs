//! Spatial body component
//!
//! The minimal view of a game entity the collision core depends on: where it
//! is, how big it is, and whether it is alive.

use crate::ecs::EntityId;
use crate::foundation::math::Vec2;
use crate::physics::collision::{Bounds, Circle};
use crate::foundation::collections::EntityMap;

/// Position, velocity and bounding radius of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// World position of the center
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Bounding radius
    pub radius: f32,
    /// Disabled bodies are removed from the grid on the next frame
    pub enabled: bool,
}

impl Body {
    /// Create an enabled, stationary body
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::zeros(),
            radius,
            enabled: true,
        }
    }

    /// Builder-style velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder-style disabled flag
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Center x
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Center y
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Left edge of the bounding box
    pub fn left(&self) -> f32 {
        self.position.x - self.radius
    }

    /// Right edge of the bounding box
    pub fn right(&self) -> f32 {
        self.position.x + self.radius
    }

    /// Top edge of the bounding box
    pub fn top(&self) -> f32 {
        self.position.y - self.radius
    }

    /// Bottom edge of the bounding box
    pub fn bottom(&self) -> f32 {
        self.position.y + self.radius
    }

    /// Axis-aligned bounds
    pub fn bounds(&self) -> Bounds {
        Bounds::from_circle(self.position, self.radius)
    }

    /// Bounding circle used by the narrow phase
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    /// Mark the body alive
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Mark the body dead
    pub fn disable(&mut self) {
        self.enabled = false;
    }
}

/// Read access to entity bodies by handle
pub trait BodyLookup {
    /// Body of `entity`, if it still exists
    fn body(&self, entity: EntityId) -> Option<&Body>;
}

/// Read/write access to entity bodies by handle
pub trait BodyStore: BodyLookup {
    /// Mutable body of `entity`, if it still exists
    fn body_mut(&mut self, entity: EntityId) -> Option<&mut Body>;
}

impl BodyLookup for EntityMap<Body> {
    fn body(&self, entity: EntityId) -> Option<&Body> {
        self.get(entity)
    }
}

impl BodyStore for EntityMap<Body> {
    fn body_mut(&mut self, entity: EntityId) -> Option<&mut Body> {
        self.get_mut(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_accessors() {
        let body = Body::new(16.0, 20.0, 10.0);
        assert_eq!(body.left(), 6.0);
        assert_eq!(body.right(), 26.0);
        assert_eq!(body.top(), 10.0);
        assert_eq!(body.bottom(), 30.0);
        assert_eq!(body.bounds(), Bounds::new(6.0, 10.0, 26.0, 30.0));
    }

    #[test]
    fn test_enable_disable() {
        let mut body = Body::new(0.0, 0.0, 1.0).disabled();
        assert!(!body.enabled);
        body.enable();
        assert!(body.enabled);
        body.disable();
        assert!(!body.enabled);
    }

    #[test]
    fn test_slotmap_lookup() {
        let mut bodies: EntityMap<Body> = EntityMap::with_key();
        let id = bodies.insert(Body::new(1.0, 2.0, 3.0));
        bodies.body_mut(id).unwrap().position.x = 5.0;
        assert_eq!(bodies.body(id).unwrap().x(), 5.0);

        bodies.remove(id);
        assert!(bodies.body(id).is_none());
    }
}
