//! Per-tick input samples.
//!
//! The controller never talks to an input backend directly. Hosts hand it an
//! [`InputSampler`] each tick: a recorded/synthetic [`InputSample`], or one of
//! the Bevy-backed samplers in [`crate::bevy`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Phase of a pointer (touch or mouse button) during the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    /// Pointer went down this tick.
    Begin,
    /// Pointer is still down (moved or stationary).
    Moved,
    /// Pointer was lifted this tick.
    Ended,
    /// Pointer was interrupted by the platform this tick.
    Canceled,
}

impl PointerPhase {
    /// Returns true for `Ended` and `Canceled`.
    pub fn is_release(self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }
}

/// One active pointer in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub position: Vec2,
    pub phase: PointerPhase,
}

impl Pointer {
    pub fn new(position: Vec2, phase: PointerPhase) -> Self {
        Self { position, phase }
    }
}

/// Desktop mouse state for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseSample {
    /// Cursor position, if the cursor is inside the viewport.
    pub position: Option<Vec2>,
    /// Left button phase this tick, `None` while the button is up.
    pub left: Option<PointerPhase>,
    /// Right button held.
    pub right_held: bool,
    /// Horizontal mouse axis this tick, in axis units of ten pixels each.
    pub axis_x: f32,
    /// Scroll this tick, in wheel lines.
    pub scroll: f32,
}

impl MouseSample {
    /// The left button as a drag pointer, when it has a phase and a position.
    pub fn left_pointer(&self) -> Option<Pointer> {
        Some(Pointer::new(self.position?, self.left?))
    }
}

/// Everything the controller reads from the outside world in one tick.
pub trait InputSampler {
    /// Number of active touch pointers, including those released this tick.
    fn active_pointer_count(&self) -> usize;

    /// The `index`-th active touch pointer.
    fn pointer(&self, index: usize) -> Option<Pointer>;

    /// Desktop mouse state, `None` when the sampler has no mouse.
    fn mouse(&self) -> Option<MouseSample> {
        None
    }

    /// Discrete reset trigger.
    fn reset_requested(&self) -> bool {
        false
    }
}

/// Owned input sample, used for recorded or synthetic input and by tests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSample {
    pub pointers: Vec<Pointer>,
    #[serde(default)]
    pub mouse: Option<MouseSample>,
    #[serde(default)]
    pub reset_requested: bool,
}

impl InputSample {
    /// A tick with no input at all.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn touch(position: Vec2, phase: PointerPhase) -> Self {
        Self {
            pointers: vec![Pointer::new(position, phase)],
            ..Self::default()
        }
    }

    pub fn two_touches(a: Pointer, b: Pointer) -> Self {
        Self {
            pointers: vec![a, b],
            ..Self::default()
        }
    }

    pub fn with_mouse(mut self, mouse: MouseSample) -> Self {
        self.mouse = Some(mouse);
        self
    }

    pub fn with_reset(mut self) -> Self {
        self.reset_requested = true;
        self
    }
}

impl InputSampler for InputSample {
    fn active_pointer_count(&self) -> usize {
        self.pointers.len()
    }

    fn pointer(&self, index: usize) -> Option<Pointer> {
        self.pointers.get(index).copied()
    }

    fn mouse(&self) -> Option<MouseSample> {
        self.mouse
    }

    fn reset_requested(&self) -> bool {
        self.reset_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_pointer_requires_position_and_phase() {
        let mut mouse = MouseSample {
            left: Some(PointerPhase::Moved),
            ..MouseSample::default()
        };
        assert_eq!(mouse.left_pointer(), None);

        mouse.position = Some(Vec2::new(10.0, 20.0));
        assert_eq!(
            mouse.left_pointer(),
            Some(Pointer::new(Vec2::new(10.0, 20.0), PointerPhase::Moved))
        );

        mouse.left = None;
        assert_eq!(mouse.left_pointer(), None);
    }

    #[test]
    fn test_recorded_sample_parsing() {
        let json = r#"{
            "pointers": [
                { "position": [100.0, 200.0], "phase": "begin" },
                { "position": [150.0, 200.0], "phase": "moved" }
            ],
            "reset_requested": true
        }"#;

        let sample: InputSample = serde_json::from_str(json).expect("Failed to parse JSON");
        assert_eq!(sample.active_pointer_count(), 2);
        assert_eq!(
            sample.pointer(0).map(|p| p.phase),
            Some(PointerPhase::Begin)
        );
        assert!(sample.pointer(2).is_none());
        assert!(sample.mouse().is_none());
        assert!(sample.reset_requested());
    }
}
