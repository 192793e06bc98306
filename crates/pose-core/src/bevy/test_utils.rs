//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `InputPlugin` + `PoseControlPlugin` for testing
//! controller systems without a rendering or windowing backend.

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;

use crate::bevy::plugin::PoseControlPlugin;
use crate::bevy::{PoseConstrained, PoseControl, PoseControlTarget, drive_pose_controllers};
use crate::config::ControllerConfig;
use crate::controller::PoseController;

/// Every `PoseConstrained` message seen so far.
#[derive(Resource, Default)]
struct RecordedConstraints(Vec<PoseConstrained>);

fn record_constraints(
    mut events: MessageReader<PoseConstrained>,
    mut recorded: ResMut<RecordedConstraints>,
) {
    recorded.0.extend(events.read().copied());
}

/// A headless Bevy app wrapper for testing.
pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(PoseControlPlugin::default());
        app.init_resource::<RecordedConstraints>();
        app.add_systems(Update, record_constraints.after(drive_pose_controllers));
        // Controllers are frame-based; paused virtual time keeps runs deterministic.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();
        app.update();
        Self { app }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Spawn an entity with a pose target and run an update so the controller attaches.
    pub fn spawn_controlled(&mut self, config: ControllerConfig, transform: Transform) -> Entity {
        let entity = self
            .app
            .world_mut()
            .spawn((PoseControlTarget::new(config), transform))
            .id();
        self.update();
        entity
    }

    /// Run only the drive system, with input resources exactly as they are now.
    pub fn run_drive_system(&mut self) {
        self.app
            .world_mut()
            .run_system_once(drive_pose_controllers)
            .expect("drive system should run");
    }

    pub fn controller(&self, entity: Entity) -> &PoseController {
        self.app
            .world()
            .get::<PoseControl>(entity)
            .expect("entity should be controlled")
    }

    pub fn transform(&self, entity: Entity) -> &Transform {
        self.app
            .world()
            .get::<Transform>(entity)
            .expect("entity should have a transform")
    }

    /// All constraint messages written since the app was created.
    pub fn constrained(&self) -> &[PoseConstrained] {
        &self.app.world().resource::<RecordedConstraints>().0
    }

    pub fn world(&self) -> &World {
        self.app.world()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
