//! Collision behavior policies
//!
//! A behavior decides how an entity occupies the grid and whether its own
//! movement triggers collision checks. The grid matches on [`Occupancy`]
//! once per operation instead of testing the behavior everywhere.

use serde::{Deserialize, Serialize};

/// Per-entity collision policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollideBehavior {
    /// Bypasses the grid entirely; movement is applied directly
    None,

    /// Static or very large bodies (map borders, planets). Occupies every
    /// cell its bounds overlap and is only discovered by other entities.
    ReceiveOnly,

    /// Ordinary movers (ships, projectiles). Occupies the single cell
    /// holding its center and is checked against its neighbors on every move.
    #[default]
    Active,
}

/// How a registered entity is laid into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Exactly the cell containing the entity's center
    SingleCell,
    /// Every cell the entity's bounds overlap
    MultiCell,
}

impl CollideBehavior {
    /// Grid occupancy, or `None` if the entity never touches the grid
    pub fn occupancy(self) -> Option<Occupancy> {
        match self {
            Self::None => None,
            Self::ReceiveOnly => Some(Occupancy::MultiCell),
            Self::Active => Some(Occupancy::SingleCell),
        }
    }

    /// Whether moving this entity runs a collision pass
    pub fn initiates_checks(self) -> bool {
        matches!(self, Self::Active)
    }
}
