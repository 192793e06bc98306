//! Pose store synchronization.
//!
//! Syncs controller state to the shared `PoseStore` for readers outside the ECS.

use bevy::prelude::*;

use crate::bevy::{PoseControl, PoseSnapshot, PoseStore};

/// System to publish every controlled entity's pose.
///
/// Runs every frame after the controllers tick. Entities that lost their
/// controller are dropped from the store.
pub fn sync_pose_store(store: Res<PoseStore>, controlled: Query<(Entity, &PoseControl)>) {
    for (entity, control) in &controlled {
        store.update(
            entity,
            PoseSnapshot {
                pose: *control.current_pose(),
                start: *control.start_pose(),
                mode: control.gesture().mode,
                dragging: control.gesture().dragging,
            },
        );
    }
    store.retain(|entity| controlled.contains(entity));
}
