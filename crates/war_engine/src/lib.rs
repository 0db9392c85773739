//! # War Engine
//!
//! Grid-based collision detection for 2D arcade games.
//!
//! ## Features
//!
//! - **Uniform spatial grid**: broad-phase bucketing sized to the loaded level
//! - **Behavior policies**: single-cell movers, multi-cell static receivers, or no collision at all
//! - **Coupled move and collide**: every move re-buckets the entity and checks what it now overlaps
//! - **Entity world**: slot-map storage with per-frame registration and contact dispatch
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use war_engine::prelude::*;
//!
//! fn main() -> Result<(), CollisionError> {
//!     let mut world: World = World::new(LevelDimensions::new(320.0, 320.0), CollisionConfig::default())?;
//!     let ship = world.spawn(
//!         Body::new(16.0, 16.0, 10.0).with_velocity(Vec2::new(60.0, 0.0)),
//!         CollideBehavior::Active,
//!         (),
//!     );
//!     world.spawn(Body::new(80.0, 16.0, 20.0), CollideBehavior::ReceiveOnly, ());
//!
//!     for _ in 0..60 {
//!         world.update(1.0 / 60.0);
//!     }
//!     println!("ship now at {:?}", world.get(ship).map(Body::x));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

// Core engine modules
pub mod config;
pub mod core;
pub mod error;

pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod spatial;

pub use error::{CollisionError, CollisionResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{CollisionConfig, LevelDimensions},
        ecs::{
            components::{Body, CollideComponent, CollisionResponse, CollisionState},
            EntityId, World,
        },
        error::{CollisionError, CollisionResult},
        foundation::math::Vec2,
        physics::{Bounds, Circle, CollideBehavior, CollisionSystem, Contact},
        spatial::{Cell, CellIndex, SpatialGrid},
    };
}
