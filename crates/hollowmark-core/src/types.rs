//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D world position (meters, Cartesian). x = East, y = Up on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec2);

/// Axis-aligned visual bounds of an entity, relative to its position.
///
/// The sprite/collider silhouette is usually not centered exactly on the
/// transform position, so anchor computations prefer the bounds center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Offset of the bounds center from the entity position.
    pub center_offset: DVec2,
    /// Half-extents along each axis.
    pub half_extents: DVec2,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self(DVec2::new(x, y))
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.0.distance(other.0)
    }
}

impl Bounds {
    /// World-space bounds center for an entity at `pos`.
    pub fn center(&self, pos: &Position) -> DVec2 {
        pos.0 + self.center_offset
    }

    /// World-space y of the top edge (for above-the-head markers).
    pub fn top(&self, pos: &Position) -> f64 {
        self.center(pos).y + self.half_extents.y
    }

    /// Whether a world-space point lies inside the bounds of an entity at `pos`.
    pub fn contains(&self, pos: &Position, point: DVec2) -> bool {
        let d = (point - self.center(pos)).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}

impl SimTime {
    /// Seconds per tick at the fixed tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
