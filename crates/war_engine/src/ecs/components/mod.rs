//! ECS Components module
//!
//! Components the collision core attaches to every entity

pub mod body;
pub mod collision;

pub use body::{Body, BodyLookup, BodyStore};
pub use collision::{CollideComponent, CollisionResponse, CollisionState};
