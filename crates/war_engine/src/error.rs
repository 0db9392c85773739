//! Collision engine errors

use crate::config::ConfigError;
use crate::ecs::EntityId;
use thiserror::Error;

/// Errors raised by the collision engine
///
/// Out-of-range grid lookups are not errors; they resolve to `None`.
#[derive(Error, Debug)]
pub enum CollisionError {
    /// Cell size must be a finite, strictly positive number of pixels
    #[error("invalid cell size {0}: must be finite and greater than zero")]
    InvalidCellSize(f32),

    /// Level dimensions must be finite and strictly positive
    #[error("invalid level dimensions {width}x{height}: both must be finite and greater than zero")]
    InvalidLevelDimensions {
        /// Level width in pixels
        width: f32,
        /// Level height in pixels
        height: f32,
    },

    /// The entity was despawned or never existed in this world
    #[error("entity {0:?} not found")]
    EntityNotFound(EntityId),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CollisionError {
    /// Whether this error aborts a level load (bad grid configuration)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidCellSize(_) | Self::InvalidLevelDimensions { .. } | Self::Config(_)
        )
    }
}

/// Convenience alias: a `Result` using [`CollisionError`]
pub type CollisionResult<T> = Result<T, CollisionError>;
