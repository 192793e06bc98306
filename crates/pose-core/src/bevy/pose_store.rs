//! Shared pose store for readers outside the ECS.
//!
//! The store is cheap to clone and can be handed to UI or networking code
//! that polls poses without access to the Bevy world. Each write that
//! changes a snapshot bumps the version so pollers can skip unchanged frames.

use std::collections::HashMap;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureMode;
use crate::pose::Pose;

/// Pose and gesture summary of one controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    pub pose: Pose,
    pub start: Pose,
    pub mode: GestureMode,
    pub dragging: bool,
}

#[derive(Debug, Default)]
struct PoseStoreInner {
    snapshots: RwLock<HashMap<Entity, PoseSnapshot>>,
    version: RwLock<u64>,
}

/// Store of the latest pose snapshot per controlled entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct PoseStore {
    inner: Arc<PoseStoreInner>,
}

impl PoseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity: Entity) -> Option<PoseSnapshot> {
        self.inner.snapshots.read().get(&entity).copied()
    }

    pub fn get_all(&self) -> Vec<(Entity, PoseSnapshot)> {
        self.inner
            .snapshots
            .read()
            .iter()
            .map(|(entity, snapshot)| (*entity, *snapshot))
            .collect()
    }

    pub fn get_version(&self) -> u64 {
        *self.inner.version.read()
    }

    /// Stores `snapshot`, bumping the version only if it changed.
    pub fn update(&self, entity: Entity, snapshot: PoseSnapshot) {
        let mut snapshots = self.inner.snapshots.write();
        if snapshots.get(&entity) != Some(&snapshot) {
            snapshots.insert(entity, snapshot);
            *self.inner.version.write() += 1;
        }
    }

    /// Drops entities that are no longer controlled.
    pub fn retain(&self, mut keep: impl FnMut(Entity) -> bool) {
        let mut snapshots = self.inner.snapshots.write();
        let before = snapshots.len();
        snapshots.retain(|entity, _| keep(*entity));
        if snapshots.len() != before {
            *self.inner.version.write() += 1;
        }
    }
}
