//! Math utilities and types
//!
//! The world is a flat 2D plane with screen-style axes: `x` grows to the
//! right and `y` grows downward, so `top` is the smaller `y`.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec2;

    /// Normalize `v`, falling back to `fallback` when `v` has no usable length
    pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
        let length = v.magnitude();
        if length > f32::EPSILON {
            v / length
        } else {
            fallback
        }
    }

    /// Squared distance between two points
    pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
        (a - b).magnitude_squared()
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
