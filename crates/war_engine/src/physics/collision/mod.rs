//! Collision primitives
//!
//! - [`primitives`] - circles and axis-aligned bounds used by the grid and the narrow phase

pub mod primitives;

pub use primitives::{Bounds, Circle};
