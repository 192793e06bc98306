//! Object pose (position, rotation, scale) and the mutations gestures apply to it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RotationSpace;

/// Position, orientation and scale of the controlled object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Translates the pose by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Multiplies the scale by `factor`, clamping every axis into `[min, max]`.
    pub fn scale_clamped(&mut self, factor: f32, min: f32, max: f32) {
        self.scale = (self.scale * factor).clamp(Vec3::splat(min), Vec3::splat(max));
    }

    /// Rotates about the vertical axis.
    ///
    /// Positive degrees turn clockwise when seen from above (+Y looking down).
    pub fn yaw(&mut self, degrees: f32, space: RotationSpace) {
        let turn = Quat::from_rotation_y(-degrees.to_radians());
        self.rotation = match space {
            RotationSpace::World => turn * self.rotation,
            RotationSpace::Local => self.rotation * turn,
        }
        .normalize();
    }

    /// Writes the pose into a Bevy transform.
    pub fn apply_to(&self, transform: &mut Transform) {
        transform.translation = self.position;
        transform.rotation = self.rotation;
        transform.scale = self.scale;
    }
}

impl From<Transform> for Pose {
    fn from(transform: Transform) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
            scale: transform.scale,
        }
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Transform {
            translation: pose.position,
            rotation: pose.rotation,
            scale: pose.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_clamped_every_axis() {
        let mut pose = Pose {
            scale: Vec3::new(1.0, 1.5, 0.625),
            ..Pose::IDENTITY
        };
        pose.scale_clamped(3.0, 0.5, 2.0);
        assert!((pose.scale - Vec3::new(2.0, 2.0, 1.875)).abs().max_element() < 1e-5);

        pose.scale_clamped(0.01, 0.5, 2.0);
        assert_eq!(pose.scale, Vec3::splat(0.5));
    }

    #[test]
    fn test_yaw_world_vs_local() {
        let tilted = Quat::from_rotation_x(0.5);

        let mut world = Pose {
            rotation: tilted,
            ..Pose::IDENTITY
        };
        world.yaw(90.0, RotationSpace::World);

        let mut local = Pose {
            rotation: tilted,
            ..Pose::IDENTITY
        };
        local.yaw(90.0, RotationSpace::Local);

        let turn = Quat::from_rotation_y(-90f32.to_radians());
        assert!(world.rotation.angle_between(turn * tilted) < 1e-5);
        assert!(local.rotation.angle_between(tilted * turn) < 1e-5);
        assert!(world.rotation.angle_between(local.rotation) > 1e-3);
    }

    #[test]
    fn test_positive_yaw_is_clockwise_from_above() {
        let mut pose = Pose::IDENTITY;
        pose.yaw(90.0, RotationSpace::World);
        // Clockwise from above sends +X towards +Z.
        let forward = pose.rotation * Vec3::X;
        assert!((forward - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_transform_conversion() {
        let transform = Transform::from_xyz(1.0, 2.0, 3.0)
            .with_rotation(Quat::from_rotation_y(0.3))
            .with_scale(Vec3::splat(1.2));
        let pose = Pose::from(transform);

        let mut out = Transform::IDENTITY;
        pose.apply_to(&mut out);
        assert_eq!(out, transform);
        assert_eq!(Transform::from(pose), transform);
    }
}
