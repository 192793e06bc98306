//! Per-frame controller ticks.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::{
    CameraRayCaster, DesktopSampler, PoseCamera, PoseConstrained, PoseControl, PoseControlTarget,
    ResetPose, TouchSampler,
};
use crate::controller::{PoseController, TickOutcome};
use crate::input::InputSampler;
use crate::projector::NoRayCaster;

/// Raw device state shared by every controller this frame.
#[derive(bevy::ecs::system::SystemParam)]
pub struct PoseInput<'w, 's> {
    touches: Res<'w, Touches>,
    mouse_buttons: Res<'w, ButtonInput<MouseButton>>,
    keyboard: Res<'w, ButtonInput<KeyCode>>,
    mouse_motion: Res<'w, AccumulatedMouseMotion>,
    mouse_scroll: Res<'w, AccumulatedMouseScroll>,
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
}

/// System to run one controller tick per controlled entity and write the pose back.
///
/// Touch-only or desktop sampling is chosen per entity from its configuration.
/// Without a `PoseCamera` every projection falls back, so drags become no-ops.
pub fn drive_pose_controllers(
    input: PoseInput,
    cameras: Query<(&Camera, &GlobalTransform), With<PoseCamera>>,
    mut reset_events: MessageReader<ResetPose>,
    mut constrained_events: MessageWriter<PoseConstrained>,
    mut controlled: Query<(Entity, &PoseControlTarget, &mut PoseControl, &mut Transform)>,
) {
    let resets: Vec<Option<Entity>> = reset_events.read().map(|event| event.entity).collect();
    let reset_all = resets.contains(&None);

    let camera = cameras.iter().find(|(camera, _)| camera.is_active);
    let cursor = input
        .windows
        .single()
        .ok()
        .and_then(Window::cursor_position);

    for (entity, target, mut control, mut transform) in &mut controlled {
        let reset_requested = reset_all
            || resets.contains(&Some(entity))
            || target
                .reset_key
                .is_some_and(|key| input.keyboard.just_pressed(key));

        let touch = TouchSampler::new(&input.touches, reset_requested);
        let outcome = if control.config().desktop.enabled {
            let sampler = DesktopSampler::new(
                touch,
                &input.mouse_buttons,
                &input.mouse_motion,
                &input.mouse_scroll,
                cursor,
            );
            tick_with(&mut control, &sampler, camera)
        } else {
            tick_with(&mut control, &touch, camera)
        };

        if outcome.reset {
            tracing::info!("[drive] reset {:?} to start pose", entity);
        }
        if outcome.constrained {
            constrained_events.write(PoseConstrained {
                entity,
                position: control.current_pose().position,
            });
        }

        let pose = *control.current_pose();
        if Transform::from(pose) != *transform {
            pose.apply_to(&mut transform);
        }
    }
}

fn tick_with(
    controller: &mut PoseController,
    sampler: &impl InputSampler,
    camera: Option<(&Camera, &GlobalTransform)>,
) -> TickOutcome {
    match camera {
        Some((camera, transform)) => {
            controller.tick(sampler, &CameraRayCaster::new(camera, transform))
        }
        None => controller.tick(sampler, &NoRayCaster),
    }
}

#[cfg(test)]
mod tests {
    use bevy::input::touch::{TouchInput, TouchPhase};

    use super::*;
    use crate::bevy::test_utils::TestApp;
    use crate::config::ControllerConfig;
    use crate::gesture::{DragSource, GestureMode};

    fn touch(app: &mut TestApp, phase: TouchPhase, position: Vec2) {
        app.world_mut().write_message(TouchInput {
            phase,
            position,
            window: Entity::PLACEHOLDER,
            force: None,
            id: 0,
        });
        app.update();
    }

    #[test]
    fn test_touch_drag_without_camera_is_zero_delta() {
        let mut app = TestApp::new();
        let entity = app.spawn_controlled(
            ControllerConfig::free_form(),
            Transform::from_xyz(1.0, 0.0, 1.0),
        );

        touch(&mut app, TouchPhase::Started, Vec2::new(100.0, 100.0));
        touch(&mut app, TouchPhase::Moved, Vec2::new(300.0, 250.0));

        let control = app.controller(entity);
        assert_eq!(control.gesture().mode, GestureMode::Drag(DragSource::Touch));
        assert!(control.gesture().dragging);
        assert_eq!(app.transform(entity).translation, Vec3::new(1.0, 0.0, 1.0));

        touch(&mut app, TouchPhase::Ended, Vec2::new(300.0, 250.0));
        assert!(!app.controller(entity).gesture().dragging);
    }

    #[test]
    fn test_touch_release_snaps_grid_variant() {
        let mut app = TestApp::new();
        let entity = app.spawn_controlled(
            ControllerConfig::grid(0.25, Vec2::new(2.0, 2.0)),
            Transform::from_xyz(0.37, 0.5, 0.12),
        );

        touch(&mut app, TouchPhase::Started, Vec2::new(100.0, 100.0));
        touch(&mut app, TouchPhase::Ended, Vec2::new(100.0, 100.0));

        let translation = app.transform(entity).translation;
        assert!((translation - Vec3::new(0.25, 0.5, 0.0)).length() < 1e-5);
        assert_eq!(app.constrained().len(), 1);
    }

    #[test]
    fn test_reset_message_restores_transform() {
        let mut app = TestApp::new();
        let start = Transform::from_xyz(0.5, 0.0, -0.5);
        let entity = app.spawn_controlled(
            ControllerConfig::grid(1.0, Vec2::splat(4.0)),
            start,
        );

        // A snap on release moves the entity away from its start pose.
        touch(&mut app, TouchPhase::Started, Vec2::ZERO);
        touch(&mut app, TouchPhase::Ended, Vec2::ZERO);
        assert_ne!(*app.transform(entity), start);

        app.world_mut().write_message(ResetPose::entity(entity));
        app.update();
        assert_eq!(*app.transform(entity), start);
    }

    #[test]
    fn test_reset_message_for_other_entity_is_ignored() {
        let mut app = TestApp::new();
        let entity = app.spawn_controlled(
            ControllerConfig::grid(1.0, Vec2::splat(4.0)),
            Transform::from_xyz(0.5, 0.0, -0.5),
        );
        let other = app.world_mut().spawn_empty().id();

        touch(&mut app, TouchPhase::Started, Vec2::ZERO);
        touch(&mut app, TouchPhase::Ended, Vec2::ZERO);
        let snapped = *app.transform(entity);

        app.world_mut().write_message(ResetPose::entity(other));
        app.update();
        assert_eq!(*app.transform(entity), snapped);
    }

    #[test]
    fn test_scroll_scales_desktop_entity() {
        let mut app = TestApp::new();
        let entity = app.spawn_controlled(ControllerConfig::free_form(), Transform::IDENTITY);

        // The input plugin recomputes the accumulator each frame, so run the system directly.
        app.world_mut()
            .resource_mut::<AccumulatedMouseScroll>()
            .delta = Vec2::new(0.0, 2.0);
        app.run_drive_system();

        let scale = app.transform(entity).scale;
        assert!((scale - Vec3::splat(1.2)).length() < 1e-5);
    }
}
