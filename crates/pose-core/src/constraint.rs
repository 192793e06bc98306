//! Grid snap and bounds clamp applied when a drag is released.
//!
//! - Snap: X and Z rounded to the nearest multiple of `grid_size`, Y untouched
//! - Clamp: X and Z restricted to a rectangle of `half_extents` around the start position
//!
//! Snap always runs before clamp. A rectangle edge that is not grid-aligned
//! can therefore leave the final position off-grid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Grid cell size and allowed region around the start position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConstraint {
    /// Grid cell size in world units.
    pub grid_size: f32,
    /// Half width (world X) and half depth (world Z) of the allowed rectangle.
    pub half_extents: Vec2,
}

impl Default for GridConstraint {
    fn default() -> Self {
        Self::new(0.25, Vec2::new(2.0, 2.0))
    }
}

impl GridConstraint {
    pub fn new(grid_size: f32, half_extents: Vec2) -> Self {
        Self {
            grid_size,
            half_extents,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_size.is_finite() {
            return Err(ConfigError::NonFinite { name: "grid_size" });
        }
        if self.grid_size <= 0.0 {
            return Err(ConfigError::NonPositiveGridSize(self.grid_size));
        }
        if !self.half_extents.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "half_extents",
            });
        }
        if self.half_extents.x < 0.0 || self.half_extents.y < 0.0 {
            return Err(ConfigError::NegativeBounds {
                x: self.half_extents.x,
                y: self.half_extents.y,
            });
        }
        Ok(())
    }

    /// Rounds X and Z onto the grid.
    pub fn snap(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            snap_scalar(position.x, self.grid_size),
            position.y,
            snap_scalar(position.z, self.grid_size),
        )
    }

    /// Restricts X and Z to the rectangle anchored at `start`.
    pub fn clamp(&self, position: Vec3, start: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(
                start.x - self.half_extents.x,
                start.x + self.half_extents.x,
            ),
            position.y,
            position.z.clamp(
                start.z - self.half_extents.y,
                start.z + self.half_extents.y,
            ),
        )
    }

    /// Snap, then clamp.
    pub fn apply(&self, position: Vec3, start: Vec3) -> Vec3 {
        self.clamp(self.snap(position), start)
    }
}

fn snap_scalar(value: f32, interval: f32) -> f32 {
    (value / interval).round() * interval
}
