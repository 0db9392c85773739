//! Invasion paths
//!
//! Enemies enter at the first waypoint and fly straight from one waypoint to
//! the next until they run out of path.

use war_engine::foundation::math::Vec2;

/// Ordered waypoints an enemy follows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvadePath {
    points: Vec<Vec2>,
}

impl InvadePath {
    /// Path through `points` in order
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Path from `[x, y]` pairs as written in configuration
    pub fn from_pairs(pairs: &[[f32; 2]]) -> Self {
        Self::new(pairs.iter().map(|&[x, y]| Vec2::new(x, y)).collect())
    }

    /// Entry point
    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Waypoint `index`
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    /// Number of waypoints
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no waypoints
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Progress of one enemy along an [`InvadePath`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathFollower {
    /// Pixels per second
    pub speed: f32,
    next: usize,
    reached: bool,
}

impl PathFollower {
    /// Follower placed on the first waypoint, heading for the second
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            next: 1,
            reached: false,
        }
    }

    /// Whether the last waypoint has been reached
    pub fn reached(&self) -> bool {
        self.reached
    }

    /// Velocity that carries `position` toward the next waypoint over `dt`
    ///
    /// A waypoint closer than one frame of travel is landed on exactly and
    /// the follower moves on to the one after it. Returns `None` once the
    /// path is used up.
    pub fn steer(&mut self, path: &InvadePath, position: Vec2, dt: f32) -> Option<Vec2> {
        while let Some(waypoint) = path.waypoint(self.next) {
            let to = waypoint - position;
            let distance = to.magnitude();
            if distance <= f32::EPSILON {
                self.next += 1;
                continue;
            }
            if distance < self.speed * dt {
                self.next += 1;
                return Some(to / dt);
            }
            return Some(to * (self.speed / distance));
        }
        self.reached = true;
        None
    }
}
