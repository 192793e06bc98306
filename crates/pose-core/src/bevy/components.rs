//! ECS Components for pose-controlled entities.

use bevy::prelude::*;

use crate::config::ControllerConfig;
use crate::controller::PoseController;

/// Requests gesture control for an entity.
///
/// The entity's `Transform` at the time this component is added becomes the
/// start pose. An invalid configuration is logged and the entity is left
/// uncontrolled.
#[derive(Component, Debug, Clone)]
pub struct PoseControlTarget {
    pub config: ControllerConfig,
    /// Key that resets this entity to its start pose.
    pub reset_key: Option<KeyCode>,
}

impl PoseControlTarget {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            config,
            reset_key: Some(KeyCode::KeyR),
        }
    }

    pub fn with_reset_key(mut self, key: Option<KeyCode>) -> Self {
        self.reset_key = key;
        self
    }
}

impl Default for PoseControlTarget {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

/// Live controller attached to a `PoseControlTarget` entity.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct PoseControl(pub PoseController);

/// Marker for the camera used to project pointer input onto the ground.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PoseCamera;
