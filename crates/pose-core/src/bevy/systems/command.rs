//! Command processing system.
//!
//! Processes commands pushed to the `PoseCommandQueue` from outside the ECS.

use bevy::prelude::*;

use crate::bevy::{PoseCommand, PoseCommandQueue, PoseControl, ResetPose};

/// System to process all pending commands.
pub fn process_pose_commands(
    command_queue: Res<PoseCommandQueue>,
    mut controllers: Query<&mut PoseControl>,
    mut reset_events: MessageWriter<ResetPose>,
) {
    for command in command_queue.drain() {
        match command {
            PoseCommand::ResetToStart { entity } => {
                tracing::info!("[command] ResetToStart {:?}", entity);
                reset_events.write(ResetPose { entity });
            }
            PoseCommand::Reconfigure { entity, config } => {
                let Ok(mut control) = controllers.get_mut(entity) else {
                    tracing::warn!("[command] Reconfigure: {:?} is not controlled", entity);
                    continue;
                };
                match control.reconfigure(config) {
                    Ok(()) => tracing::info!("[command] Reconfigure {:?}", entity),
                    Err(err) => {
                        tracing::warn!("[command] Reconfigure {:?} rejected: {}", entity, err);
                    }
                }
            }
        }
    }
}
