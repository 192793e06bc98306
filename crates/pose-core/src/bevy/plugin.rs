//! Bevy plugin for gesture pose control.
//!
//! `PoseControlPlugin` carries no rendering or window dependencies, so the
//! same plugin runs in headless tests (`MinimalPlugins` + `InputPlugin`) and
//! in windowed hosts (`DefaultPlugins`).

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::pose_store::PoseStore;
use crate::bevy::resources::PoseCommandQueue;
use crate::bevy::systems;

/// Plugin wiring controllers, commands, messages and the pose store.
///
/// Requires Bevy's `InputPlugin` (part of `DefaultPlugins`). Pass a queue or
/// store to share them with code outside the ECS; fresh ones are created
/// otherwise.
#[derive(Default)]
pub struct PoseControlPlugin {
    pub command_queue: Option<PoseCommandQueue>,
    pub store: Option<PoseStore>,
}

impl Plugin for PoseControlPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(self.command_queue.clone().unwrap_or_default());
        app.insert_resource(self.store.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<ResetPose>();
        app.add_message::<PoseConstrained>();

        // ====================================================================
        // Systems
        // ====================================================================
        app.add_systems(
            Update,
            (
                systems::attach_pose_controllers,
                systems::process_pose_commands,
                systems::drive_pose_controllers,
                systems::sync_pose_store,
            )
                .chain(),
        );
    }
}
