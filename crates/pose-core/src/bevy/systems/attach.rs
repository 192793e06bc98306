//! Controller attachment.

use bevy::prelude::*;

use crate::bevy::{PoseControl, PoseControlTarget};
use crate::controller::PoseController;
use crate::pose::Pose;

/// System to attach a controller to every new or replaced `PoseControlTarget`.
///
/// The current `Transform` becomes the start pose. Entities with an invalid
/// configuration are left without a controller until a valid target replaces it.
pub fn attach_pose_controllers(
    mut commands: Commands,
    targets: Query<(Entity, &PoseControlTarget, &Transform), Changed<PoseControlTarget>>,
) {
    for (entity, target, transform) in &targets {
        match PoseController::initialize(target.config.clone(), Pose::from(*transform)) {
            Ok(controller) => {
                tracing::info!(
                    "[attach] controlling {:?} from {} (grid={})",
                    entity,
                    transform.translation,
                    target.config.constraint.is_some()
                );
                commands.entity(entity).insert(PoseControl(controller));
            }
            Err(err) => {
                tracing::error!("[attach] rejected config for {:?}: {}", entity, err);
                commands.entity(entity).remove::<PoseControl>();
            }
        }
    }
}
