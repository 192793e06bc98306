//! The pose controller: one gesture classification and pose update per tick.
//!
//! Order within a tick:
//! 1. reset request
//! 2. classification
//! 3. touch (or mouse) drag / pinch-twist mutation, with snap+clamp on release
//! 4. desktop extras (right-button yaw, scroll scale)

use bevy::prelude::*;

use crate::config::{ConfigError, ControllerConfig, RotationSpace};
use crate::gesture::{
    DragSource, GestureMode, GestureState, classify, delta_angle, pinch_metrics, pinch_ratio,
};
use crate::input::{InputSampler, MouseSample, Pointer, PointerPhase};
use crate::pose::Pose;
use crate::projector::{GroundProjector, RayCaster};

/// Scroll deltas at or below this magnitude are ignored.
const MIN_SCROLL: f32 = 0.001;

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub mode: GestureMode,
    /// The pose was reset to the start pose.
    pub reset: bool,
    /// A drag was released and the grid constraint applied.
    pub constrained: bool,
}

/// Gesture-driven controller for a single object's pose.
#[derive(Debug, Clone)]
pub struct PoseController {
    config: ControllerConfig,
    projector: GroundProjector,
    start: Pose,
    pose: Pose,
    gesture: GestureState,
}

impl PoseController {
    /// Validates `config` and captures `current` as the start pose.
    pub fn initialize(config: ControllerConfig, current: Pose) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            projector: GroundProjector::new(config.ground_plane),
            config,
            start: current,
            pose: current,
            gesture: GestureState::default(),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn current_pose(&self) -> &Pose {
        &self.pose
    }

    pub fn start_pose(&self) -> &Pose {
        &self.start
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Replaces the configuration. An invalid config leaves the current one in place.
    pub fn reconfigure(&mut self, config: ControllerConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.projector = GroundProjector::new(config.ground_plane);
        self.config = config;
        Ok(())
    }

    /// Restores the start pose.
    ///
    /// An in-progress drag stays active but loses its reference point, so the
    /// next move re-anchors instead of jumping by the pre-reset offset.
    pub fn reset_to_start(&mut self) {
        self.pose = self.start;
        self.gesture.last_ground_point = None;
        tracing::debug!("[pose] reset to start pose");
    }

    /// Runs one classification and update pass.
    pub fn tick(&mut self, input: &impl InputSampler, caster: &impl RayCaster) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if input.reset_requested() {
            self.reset_to_start();
            outcome.reset = true;
        }

        let desktop = self.config.desktop.enabled;
        let mode = match classify(input) {
            GestureMode::Drag(DragSource::Mouse) if !desktop => GestureMode::Idle,
            mode => mode,
        };
        let previous = self.gesture.mode;

        match mode {
            GestureMode::Idle => {
                if self.gesture.dragging {
                    outcome.constrained = self.release_drag();
                }
            }
            GestureMode::Drag(source) => {
                let (pointer, gain) = match source {
                    DragSource::Touch => (input.pointer(0), self.config.drag_gain),
                    DragSource::Mouse => (
                        input.mouse().and_then(|mouse| mouse.left_pointer()),
                        self.config.desktop.mouse_drag_gain,
                    ),
                };
                if previous != mode {
                    self.gesture.last_ground_point = None;
                }
                match pointer {
                    Some(pointer) => {
                        outcome.constrained = self.handle_drag(pointer, gain, caster);
                    }
                    // Cursor outside the viewport: no move this tick, but a release still ends the drag.
                    None => {
                        let released = input
                            .mouse()
                            .and_then(|mouse| mouse.left)
                            .is_some_and(PointerPhase::is_release);
                        if released && self.gesture.dragging {
                            outcome.constrained = self.release_drag();
                        }
                    }
                }
            }
            GestureMode::PinchTwist => {
                if let (Some(a), Some(b)) = (input.pointer(0), input.pointer(1)) {
                    self.handle_pinch_twist(a, b, previous != GestureMode::PinchTwist);
                }
            }
        }
        self.gesture.mode = mode;

        if desktop && let Some(mouse) = input.mouse() {
            self.handle_desktop_extras(&mouse);
        }

        outcome.mode = mode;
        outcome
    }

    /// Single-pointer drag on the ground plane. Returns true if the release applied a constraint.
    fn handle_drag(&mut self, pointer: Pointer, gain: f32, caster: &impl RayCaster) -> bool {
        match pointer.phase {
            PointerPhase::Begin => {
                self.gesture.dragging = true;
                self.gesture.last_ground_point =
                    self.projector.try_project(caster, pointer.position);
                tracing::debug!("[pose] drag begin at {}", pointer.position);
                false
            }
            PointerPhase::Moved if self.gesture.dragging => {
                match self.gesture.last_ground_point {
                    Some(reference) => {
                        // A missed projection returns the reference: zero delta.
                        let current = self.projector.project(caster, pointer.position, reference);
                        self.gesture.last_ground_point = Some(current);
                        self.pose.translate((current - reference) * gain);
                    }
                    None => {
                        self.gesture.last_ground_point =
                            self.projector.try_project(caster, pointer.position);
                    }
                }
                false
            }
            PointerPhase::Moved => false,
            PointerPhase::Ended | PointerPhase::Canceled => {
                self.gesture.dragging && self.release_drag()
            }
        }
    }

    /// Ends the drag, applying snap+clamp in the grid variant.
    fn release_drag(&mut self) -> bool {
        let constrained = match &self.config.constraint {
            Some(constraint) => {
                self.pose.position = constraint.apply(self.pose.position, self.start.position);
                true
            }
            None => false,
        };
        self.gesture.release();
        tracing::debug!(
            "[pose] drag released at {} (constrained={})",
            self.pose.position,
            constrained
        );
        constrained
    }

    fn handle_pinch_twist(&mut self, a: Pointer, b: Pointer, entering: bool) {
        let (distance, angle) = pinch_metrics(a.position, b.position);
        self.gesture.last_ground_point = None;

        if entering || a.phase == PointerPhase::Begin || b.phase == PointerPhase::Begin {
            self.gesture.last_pinch_distance = distance;
            self.gesture.last_twist_angle = angle;
            return;
        }

        if self.config.enable_scaling {
            let ratio = pinch_ratio(self.gesture.last_pinch_distance, distance);
            self.pose
                .scale_clamped(ratio, self.config.min_scale, self.config.max_scale);
        }
        self.gesture.last_pinch_distance = distance;

        let twist = delta_angle(self.gesture.last_twist_angle, angle);
        self.gesture.last_twist_angle = angle;
        self.pose
            .yaw(twist * self.config.twist_speed, self.config.twist_space);
    }

    fn handle_desktop_extras(&mut self, mouse: &MouseSample) {
        let desktop = &self.config.desktop;

        if mouse.right_held && mouse.axis_x != 0.0 {
            self.pose
                .yaw(mouse.axis_x * desktop.mouse_rotate_speed, RotationSpace::World);
        }

        if self.config.enable_scaling && mouse.scroll.abs() > MIN_SCROLL {
            let factor = 1.0 + mouse.scroll * desktop.scroll_scale_factor;
            self.pose
                .scale_clamped(factor, self.config.min_scale, self.config.max_scale);
        }
    }
}
