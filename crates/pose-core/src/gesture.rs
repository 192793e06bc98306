//! Gesture classification and the per-controller gesture state.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::input::InputSampler;

/// Pinch baselines shorter than this (in pixels) never scale.
pub const MIN_PINCH_DISTANCE: f32 = 0.001;

/// Input device driving a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragSource {
    Touch,
    Mouse,
}

/// Gesture selected for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureMode {
    #[default]
    Idle,
    Drag(DragSource),
    PinchTwist,
}

impl GestureMode {
    pub fn is_drag(self) -> bool {
        matches!(self, Self::Drag(_))
    }
}

/// Gesture state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Mode selected on the most recent tick.
    pub mode: GestureMode,
    /// A drag began and has not been released yet.
    pub dragging: bool,
    /// Ground point of the previous drag sample; `None` forces a re-anchor.
    pub last_ground_point: Option<Vec3>,
    /// Inter-pointer distance on the previous pinch tick, in pixels.
    pub last_pinch_distance: f32,
    /// Inter-pointer angle on the previous twist tick, in degrees.
    pub last_twist_angle: f32,
}

impl GestureState {
    /// Ends any drag and forgets every baseline.
    pub fn release(&mut self) {
        self.dragging = false;
        self.last_ground_point = None;
    }
}

/// Selects the gesture for this tick.
///
/// Two touches pinch, one touch drags. Otherwise the desktop left button
/// drags while it has a phase, even with the cursor outside the viewport.
pub fn classify(input: &impl InputSampler) -> GestureMode {
    match input.active_pointer_count() {
        2 => GestureMode::PinchTwist,
        1 => GestureMode::Drag(DragSource::Touch),
        _ => {
            let mouse_drag = input.mouse().is_some_and(|mouse| mouse.left.is_some());
            if mouse_drag {
                GestureMode::Drag(DragSource::Mouse)
            } else {
                GestureMode::Idle
            }
        }
    }
}

/// Signed shortest difference `to - from` in degrees, in `[-180, 180)`.
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let wrapped = (to - from + 180.0).rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    let wrapped = if wrapped >= 360.0 { 0.0 } else { wrapped };
    wrapped - 180.0
}

/// Distance and angle (degrees) of the vector from `a` to `b`.
///
/// Screen y grows downward, so the angle is flipped to read counter-clockwise
/// as seen on screen.
pub fn pinch_metrics(a: Vec2, b: Vec2) -> (f32, f32) {
    let d = b - a;
    (d.length(), (-d.y).atan2(d.x).to_degrees())
}

/// Scale ratio between two pinch distances; 1 when the previous one is degenerate.
pub fn pinch_ratio(previous: f32, current: f32) -> f32 {
    if previous > MIN_PINCH_DISTANCE {
        current / previous
    } else {
        1.0
    }
}
