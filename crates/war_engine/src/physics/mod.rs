//! Physics module for collision detection
//!
//! Broad phase on a uniform grid, circle-circle narrow phase, and the
//! behavior policies that decide how entities take part.

pub mod behavior;
pub mod collision;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use behavior::{CollideBehavior, Occupancy};
pub use collision::{Bounds, Circle};
pub use collision_system::{CollisionSystem, Contact};
