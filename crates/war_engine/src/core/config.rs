//! # Collision Configuration
//!
//! Tuning parameters for the collision grid and the pixel dimensions of the
//! level it is laid over. Both are serializable so a game can ship them in
//! its TOML/RON configuration files.
//!
//! ## Cell size
//!
//! The cell size should sit a little above the radius of a typical moving
//! entity. Too small and large bodies span many cells; too large and each
//! cell degrades into a brute-force list.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{CollisionError, CollisionResult};

/// Default edge length of a grid cell in pixels
pub const DEFAULT_CELL_SIZE: f32 = 64.0;

/// Configuration for the collision system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Edge length of a square grid cell in pixels
    pub cell_size: f32,
}

impl CollisionConfig {
    /// Create a configuration with the given cell size
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// Reject non-positive or non-finite cell sizes
    pub fn validate(&self) -> CollisionResult<()> {
        if self.cell_size.is_finite() && self.cell_size > 0.0 {
            Ok(())
        } else {
            Err(CollisionError::InvalidCellSize(self.cell_size))
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl Config for CollisionConfig {}

/// Pixel dimensions of a loaded level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelDimensions {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl LevelDimensions {
    /// Create level dimensions from a pixel size
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Dimensions of a tile map with `rows` x `cols` tiles of `tile_size` pixels
    pub fn from_tiles(rows: u32, cols: u32, tile_size: f32) -> Self {
        Self {
            width: cols as f32 * tile_size,
            height: rows as f32 * tile_size,
        }
    }

    /// Reject empty or non-finite levels
    pub fn validate(&self) -> CollisionResult<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(CollisionError::InvalidLevelDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    #[test]
    fn test_default_cell_size_is_valid() {
        assert!(CollisionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_cell_size_rejected() {
        for size in [0.0, -32.0, f32::NAN, f32::INFINITY] {
            let err = CollisionConfig::new(size).validate().unwrap_err();
            assert!(err.is_configuration());
        }
    }

    #[test]
    fn test_level_from_tiles() {
        let level = LevelDimensions::from_tiles(10, 20, 32.0);
        assert_eq!(level.width, 640.0);
        assert_eq!(level.height, 320.0);
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_empty_level_rejected() {
        assert!(LevelDimensions::new(0.0, 100.0).validate().is_err());
        assert!(LevelDimensions::new(100.0, -1.0).validate().is_err());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: CollisionConfig = toml::from_str("").unwrap();
        assert_eq!(config, CollisionConfig::default());

        let config: CollisionConfig = toml::from_str("cell_size = 32.0").unwrap();
        assert_eq!(config.cell_size, 32.0);
    }

    #[test]
    fn test_config_ron_round_trip() {
        let config = CollisionConfig::new(48.0);
        let text = config.render(ConfigFormat::Ron).unwrap();
        let parsed = CollisionConfig::parse(&text, ConfigFormat::Ron).unwrap();
        assert_eq!(parsed, config);
    }
}
