//! Spatial partitioning data structures
//!
//! A uniform grid of cells over the level, used for broad-phase collision
//! detection and proximity queries.

pub mod cell;
pub mod grid;

pub use cell::{Cell, CellIndex};
pub use grid::SpatialGrid;
