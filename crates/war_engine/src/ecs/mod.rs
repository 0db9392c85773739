//! Entity storage and collision components
//!
//! Entities are generational handles into a [`World`], which owns their
//! bodies, collide components and gameplay payloads.

pub mod components;
pub mod entity;
pub mod world;

pub use entity::EntityId;
pub use world::World;
