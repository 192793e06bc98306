//! ECS Resources for pose control.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::ControllerConfig;

/// Commands pushed from outside the ECS (UI, scripting, network).
#[derive(Debug, Clone)]
pub enum PoseCommand {
    /// Reset one entity, or all controlled entities when `entity` is `None`.
    ResetToStart { entity: Option<Entity> },
    /// Replace an entity's configuration. Invalid configs are rejected.
    Reconfigure {
        entity: Entity,
        config: ControllerConfig,
    },
}

/// Thread-safe command queue.
///
/// Commands pushed here are processed by Bevy systems on the next frame.
#[derive(Resource, Clone, Default)]
pub struct PoseCommandQueue {
    inner: Arc<Mutex<VecDeque<PoseCommand>>>,
}

impl PoseCommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command to be processed.
    pub fn push(&self, command: PoseCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain all pending commands.
    pub fn drain(&self) -> Vec<PoseCommand> {
        self.inner.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
