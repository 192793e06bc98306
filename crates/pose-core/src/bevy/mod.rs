//! Bevy integration for pose control.
//!
//! Attach a `PoseControlTarget` to any entity with a `Transform`, mark the
//! scene camera with `PoseCamera` and add `PoseControlPlugin`. Touches, the
//! mouse and the reset key then drive the entity every frame.

pub mod components;
pub mod events;
pub mod plugin;
pub mod pose_store;
pub mod resources;
pub mod sampler;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use components::*;
pub use events::*;
pub use plugin::PoseControlPlugin;
pub use pose_store::{PoseSnapshot, PoseStore};
pub use resources::*;
pub use sampler::{CameraRayCaster, DesktopSampler, TouchSampler};
pub use systems::{
    attach_pose_controllers, drive_pose_controllers, process_pose_commands, sync_pose_store,
};
