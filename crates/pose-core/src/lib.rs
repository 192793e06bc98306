//! Pose-Core Library
//!
//! Gesture-driven pose control for 3D objects: one-finger (or mouse) drag
//! across a ground plane, two-finger pinch-scale and twist-rotate, optional
//! grid snap with bounds clamping on release, and reset to the start pose.
//!
//! The controller itself is engine-agnostic and consumes input through the
//! [`input::InputSampler`] and [`projector::RayCaster`] traits. The
//! [`bevy`](crate::bevy) module wires it into Bevy ECS.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod constraint;
pub mod controller;
pub mod gesture;
pub mod input;
pub mod pose;
pub mod projector;

// Bevy integration
pub mod bevy;

pub use config::{ConfigError, ControllerConfig, DesktopInputConfig, RotationSpace};
pub use constraint::GridConstraint;
pub use controller::{PoseController, TickOutcome};
pub use gesture::{DragSource, GestureMode, GestureState};
pub use input::{InputSample, InputSampler, MouseSample, Pointer, PointerPhase};
pub use pose::Pose;
pub use projector::{GroundPlane, GroundProjector, RayCaster};
