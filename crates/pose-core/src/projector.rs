//! Screen-to-ground projection.
//!
//! A [`RayCaster`] turns a screen point into a world ray, and the
//! [`GroundProjector`] intersects that ray with the configured
//! [`GroundPlane`]. When there is no forward intersection (the ray is
//! parallel to the plane or points away from it) the projector returns the
//! caller's fallback point, so a drag tick degrades to a zero delta.

use bevy::math::primitives::InfinitePlane3d;
use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Plane of points `p` with `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPlane {
    pub normal: Vec3,
    pub offset: f32,
}

impl Default for GroundPlane {
    /// Horizontal plane through the world origin.
    fn default() -> Self {
        Self::new(Vec3::Y, 0.0)
    }
}

impl GroundPlane {
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self { normal, offset }
    }

    /// Horizontal plane at height `y`.
    pub fn horizontal(y: f32) -> Self {
        Self::new(Vec3::Y, y)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.offset.is_finite() {
            return Err(ConfigError::NonFinite {
                name: "ground_plane.offset",
            });
        }
        Dir3::new(self.normal).map_err(|_| ConfigError::DegenerateGroundNormal)?;
        Ok(())
    }

    /// Distance along `ray` to the plane, if the ray hits it in front of its origin.
    pub fn intersect(&self, ray: Ray3d) -> Option<f32> {
        let normal = Dir3::new(self.normal).ok()?;
        // Offset is measured along the raw normal; rescale to the unit one.
        let origin = self.normal * self.offset / self.normal.length_squared();
        ray.intersect_plane(origin, InfinitePlane3d { normal })
    }
}

/// Camera abstraction: screen point to world ray.
pub trait RayCaster {
    /// Returns `None` when the point cannot be converted (no viewport, bad input).
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray3d>;
}

/// Ray caster for hosts without a camera: every projection falls back.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRayCaster;

impl RayCaster for NoRayCaster {
    fn screen_point_to_ray(&self, _screen: Vec2) -> Option<Ray3d> {
        None
    }
}

/// Top-down orthographic camera looking along -Y.
///
/// Screen X maps to world +X, screen Y (downwards) maps to world +Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicRayCaster {
    /// World XZ point under the viewport center.
    pub center: Vec2,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// World units per pixel.
    pub units_per_pixel: f32,
    /// Height of the camera plane.
    pub height: f32,
}

impl RayCaster for OrthographicRayCaster {
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray3d> {
        let offset = (screen - self.viewport * 0.5) * self.units_per_pixel;
        let origin = Vec3::new(
            self.center.x + offset.x,
            self.height,
            self.center.y + offset.y,
        );
        Some(Ray3d::new(origin, Dir3::NEG_Y))
    }
}

/// Pinhole perspective camera looking along its local -Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveRayCaster {
    pub transform: Transform,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl RayCaster for PerspectiveRayCaster {
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray3d> {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return None;
        }
        let ndc = Vec2::new(
            2.0 * screen.x / self.viewport.x - 1.0,
            1.0 - 2.0 * screen.y / self.viewport.y,
        );
        let half_height = (self.fov_y * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let local = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
        let direction = Dir3::new(self.transform.rotation * local).ok()?;
        Some(Ray3d::new(self.transform.translation, direction))
    }
}

/// Projects screen points onto a ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GroundProjector {
    pub plane: GroundPlane,
}

impl GroundProjector {
    pub fn new(plane: GroundPlane) -> Self {
        Self { plane }
    }

    /// Ground point under `screen`, if the ray hits the plane.
    pub fn try_project(&self, caster: &impl RayCaster, screen: Vec2) -> Option<Vec3> {
        let Some(ray) = caster.screen_point_to_ray(screen) else {
            tracing::trace!("[projector] no ray for screen point {screen}");
            return None;
        };
        let hit = self.plane.intersect(ray).map(|distance| ray.get_point(distance));
        if hit.is_none() {
            tracing::trace!("[projector] ray misses ground plane");
        }
        hit
    }

    /// Ground point under `screen`, or `fallback` when there is no hit.
    pub fn project(&self, caster: &impl RayCaster, screen: Vec2, fallback: Vec3) -> Vec3 {
        self.try_project(caster, screen).unwrap_or(fallback)
    }
}
