//! Bevy-backed input samplers and ray caster.
//!
//! - `TouchSampler`: touches only (mobile hosts)
//! - `DesktopSampler`: touches plus mouse buttons, motion and scroll
//! - `CameraRayCaster`: screen point to ray through a Bevy `Camera`

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::input::touch::Touches;
use bevy::math::Ray3d;
use bevy::prelude::*;

use crate::input::{InputSampler, MouseSample, Pointer, PointerPhase};
use crate::projector::RayCaster;

/// Horizontal mouse axis units per pixel of motion.
pub const MOUSE_AXIS_PER_PIXEL: f32 = 0.1;

/// Pixels of precise (trackpad) scrolling that count as one wheel line.
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Touch-only sampler built from Bevy's `Touches` resource.
///
/// Pointers are ordered by touch id. Touches released or canceled this frame
/// are still reported, with an `Ended`/`Canceled` phase.
#[derive(Debug, Clone, Default)]
pub struct TouchSampler {
    pointers: Vec<Pointer>,
    reset_requested: bool,
}

impl TouchSampler {
    pub fn new(touches: &Touches, reset_requested: bool) -> Self {
        let mut tracked: Vec<(u64, Pointer)> = touches
            .iter()
            .map(|touch| {
                let phase = if touches.just_pressed(touch.id()) {
                    PointerPhase::Begin
                } else {
                    PointerPhase::Moved
                };
                (touch.id(), Pointer::new(touch.position(), phase))
            })
            .chain(
                touches
                    .iter_just_released()
                    .map(|touch| (touch.id(), Pointer::new(touch.position(), PointerPhase::Ended))),
            )
            .chain(touches.iter_just_canceled().map(|touch| {
                (
                    touch.id(),
                    Pointer::new(touch.position(), PointerPhase::Canceled),
                )
            }))
            .collect();
        tracked.sort_by_key(|(id, _)| *id);

        Self {
            pointers: tracked.into_iter().map(|(_, pointer)| pointer).collect(),
            reset_requested,
        }
    }
}

impl InputSampler for TouchSampler {
    fn active_pointer_count(&self) -> usize {
        self.pointers.len()
    }

    fn pointer(&self, index: usize) -> Option<Pointer> {
        self.pointers.get(index).copied()
    }

    fn reset_requested(&self) -> bool {
        self.reset_requested
    }
}

/// Touch and mouse sampler for desktop hosts.
#[derive(Debug, Clone, Default)]
pub struct DesktopSampler {
    touch: TouchSampler,
    mouse: MouseSample,
}

impl DesktopSampler {
    pub fn new(
        touch: TouchSampler,
        buttons: &ButtonInput<MouseButton>,
        motion: &AccumulatedMouseMotion,
        scroll: &AccumulatedMouseScroll,
        cursor: Option<Vec2>,
    ) -> Self {
        Self {
            touch,
            mouse: MouseSample {
                position: cursor,
                left: left_button_phase(buttons),
                right_held: buttons.pressed(MouseButton::Right),
                axis_x: motion.delta.x * MOUSE_AXIS_PER_PIXEL,
                scroll: scroll_lines(scroll),
            },
        }
    }
}

/// Vertical scroll in wheel lines, whatever unit the device reported.
fn scroll_lines(scroll: &AccumulatedMouseScroll) -> f32 {
    match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_SCROLL_LINE,
    }
}

/// Maps the left button onto pointer phases.
fn left_button_phase(buttons: &ButtonInput<MouseButton>) -> Option<PointerPhase> {
    if buttons.just_pressed(MouseButton::Left) {
        Some(PointerPhase::Begin)
    } else if buttons.just_released(MouseButton::Left) {
        Some(PointerPhase::Ended)
    } else if buttons.pressed(MouseButton::Left) {
        Some(PointerPhase::Moved)
    } else {
        None
    }
}

impl InputSampler for DesktopSampler {
    fn active_pointer_count(&self) -> usize {
        self.touch.active_pointer_count()
    }

    fn pointer(&self, index: usize) -> Option<Pointer> {
        self.touch.pointer(index)
    }

    fn mouse(&self) -> Option<MouseSample> {
        Some(self.mouse)
    }

    fn reset_requested(&self) -> bool {
        self.touch.reset_requested()
    }
}

/// Ray caster backed by a Bevy camera.
pub struct CameraRayCaster<'a> {
    camera: &'a Camera,
    transform: &'a GlobalTransform,
}

impl<'a> CameraRayCaster<'a> {
    pub fn new(camera: &'a Camera, transform: &'a GlobalTransform) -> Self {
        Self { camera, transform }
    }
}

impl RayCaster for CameraRayCaster<'_> {
    fn screen_point_to_ray(&self, screen: Vec2) -> Option<Ray3d> {
        self.camera.viewport_to_world(self.transform, screen).ok()
    }
}
