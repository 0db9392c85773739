//! Primitive collision shapes and intersection algorithms
//!
//! Everything here is a circle or an axis-aligned box in world pixels.
//! Narrow-phase tests are circle-circle only.

use crate::foundation::math::{utils, Vec2};

/// Axis-aligned bounding box in world space (`top` is the smaller `y`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x
    pub left: f32,
    /// Smallest y
    pub top: f32,
    /// Largest x
    pub right: f32,
    /// Largest y
    pub bottom: f32,
}

impl Bounds {
    /// Creates bounds from the four edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Square bounds enclosing a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self {
            left: center.x - radius,
            top: center.y - radius,
            right: center.x + radius,
            bottom: center.y + radius,
        }
    }

    /// Width of the box
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the box
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Inclusive point containment
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Inclusive overlap test
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    /// The center position of the circle in world space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

impl Circle {
    /// Creates a new circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Bounds enclosing this circle
    pub fn bounds(&self) -> Bounds {
        Bounds::from_circle(self.center, self.radius)
    }

    /// Two circles collide when their centers are closer than the sum of their radii.
    /// Touching circles do not collide.
    pub fn intersects(&self, other: &Circle) -> bool {
        let radius_sum = self.radius + other.radius;
        utils::distance_squared(self.center, other.center) < radius_sum * radius_sum
    }

    /// Get the penetration depth if intersecting (0.0 if not intersecting)
    pub fn penetration_depth(&self, other: &Circle) -> f32 {
        let distance = (self.center - other.center).magnitude();
        let radius_sum = self.radius + other.radius;
        if distance < radius_sum {
            radius_sum - distance
        } else {
            0.0
        }
    }

    /// Minimum translation that moves `self` out of `other`
    ///
    /// Points from `other` toward `self`; coincident centers push along +x.
    /// Zero when the circles do not intersect.
    pub fn push_vector(&self, other: &Circle) -> Vec2 {
        let depth = self.penetration_depth(other);
        if depth <= 0.0 {
            return Vec2::zeros();
        }
        utils::normalize_or(self.center - other.center, Vec2::x()) * depth
    }
}
