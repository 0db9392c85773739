//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

use crate::ecs::EntityId;

/// Dense entity-keyed storage; the owning side of every entity relation
pub type EntityMap<T> = SlotMap<EntityId, T>;

/// Sparse per-entity attachment keyed by a handle issued by an [`EntityMap`]
pub type ComponentMap<T> = SecondaryMap<EntityId, T>;
