//! # Core Engine Module
//!
//! Shared abstractions used by the collision subsystems.
//!
//! ## Organization
//!
//! - **Config**: collision tuning and level dimensions

pub mod config;

pub use config::{CollisionConfig, LevelDimensions};
pub use crate::config::{Config, ConfigError, ConfigFormat};
