//! ECS Messages for pose control.

use bevy::prelude::*;

/// Message to reset controlled entities to their start pose.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetPose {
    /// Target entity, or every controlled entity when `None`.
    pub entity: Option<Entity>,
}

impl ResetPose {
    pub fn all() -> Self {
        Self { entity: None }
    }

    pub fn entity(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
        }
    }
}

/// Message fired when a drag release snapped and clamped an entity.
#[derive(Message, Debug, Clone, Copy)]
pub struct PoseConstrained {
    pub entity: Entity,
    /// Position after snap and clamp.
    pub position: Vec3,
}
