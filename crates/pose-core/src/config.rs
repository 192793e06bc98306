//! Controller configuration.
//!
//! A [`ControllerConfig`] describes one pose controller: gesture gains, the
//! scale range, the ground plane used for projection, the optional grid
//! constraint and the desktop (mouse) input mapping. Configurations are
//! plain serde data so hosts can ship them as JSON next to their scenes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constraint::GridConstraint;
use crate::projector::GroundPlane;

/// Error type for rejected configurations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be greater than zero, got {0}")]
    NonPositiveGridSize(f32),
    #[error("bounds half-extents must be non-negative, got ({x}, {y})")]
    NegativeBounds { x: f32, y: f32 },
    #[error("scale range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidScaleRange { min: f32, max: f32 },
    #[error("{name} must be non-negative, got {value}")]
    NegativeFactor { name: &'static str, value: f32 },
    #[error("{name} must be finite")]
    NonFinite { name: &'static str },
    #[error("ground plane normal must be a non-zero finite vector")]
    DegenerateGroundNormal,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Space in which twist rotations are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationSpace {
    /// Rotate about the world vertical axis.
    #[default]
    World,
    /// Rotate about the object's own up axis.
    Local,
}

/// Desktop (mouse) input mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopInputConfig {
    /// Sample the mouse alongside touches.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Degrees of yaw per unit of horizontal mouse axis while the right button is held.
    /// One axis unit is ten pixels of motion.
    #[serde(default = "default_mouse_rotate_speed")]
    pub mouse_rotate_speed: f32,
    /// Gain applied to left-button drag deltas.
    #[serde(default = "default_mouse_drag_gain")]
    pub mouse_drag_gain: f32,
    /// Scale multiplier per scroll line (`1 + scroll * factor`). Pixel scrolling
    /// is converted to lines before it reaches the controller.
    #[serde(default = "default_scroll_scale_factor")]
    pub scroll_scale_factor: f32,
}

fn default_true() -> bool {
    true
}

fn default_mouse_rotate_speed() -> f32 {
    5.0
}

fn default_mouse_drag_gain() -> f32 {
    2.0
}

fn default_scroll_scale_factor() -> f32 {
    0.1
}

impl Default for DesktopInputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mouse_rotate_speed: default_mouse_rotate_speed(),
            mouse_drag_gain: default_mouse_drag_gain(),
            scroll_scale_factor: default_scroll_scale_factor(),
        }
    }
}

/// Full configuration of a pose controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Gain applied to touch drag deltas on the ground plane.
    #[serde(default = "default_drag_gain")]
    pub drag_gain: f32,
    /// Multiplier from twist degrees to yaw degrees.
    #[serde(default = "default_twist_speed")]
    pub twist_speed: f32,
    #[serde(default)]
    pub twist_space: RotationSpace,
    #[serde(default = "default_min_scale")]
    pub min_scale: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f32,
    /// Whether pinch and scroll drive scale. Twist is always active.
    #[serde(default = "default_true")]
    pub enable_scaling: bool,
    #[serde(default)]
    pub ground_plane: GroundPlane,
    /// Grid snap and bounds clamp applied on drag release.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<GridConstraint>,
    #[serde(default)]
    pub desktop: DesktopInputConfig,
}

fn default_drag_gain() -> f32 {
    1.5
}

fn default_twist_speed() -> f32 {
    0.2
}

fn default_min_scale() -> f32 {
    0.5
}

fn default_max_scale() -> f32 {
    2.0
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::free_form()
    }
}

impl ControllerConfig {
    /// Continuous controller: drag, pinch-scale, twist and desktop input, no grid.
    pub fn free_form() -> Self {
        Self {
            drag_gain: default_drag_gain(),
            twist_speed: default_twist_speed(),
            twist_space: RotationSpace::World,
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            enable_scaling: true,
            ground_plane: GroundPlane::default(),
            constraint: None,
            desktop: DesktopInputConfig::default(),
        }
    }

    /// Grid-constrained controller: unit drag gain, no scaling, snap+clamp on release.
    pub fn grid(grid_size: f32, half_extents: Vec2) -> Self {
        Self {
            drag_gain: 1.0,
            twist_speed: 0.25,
            enable_scaling: false,
            constraint: Some(GridConstraint::new(grid_size, half_extents)),
            desktop: DesktopInputConfig {
                mouse_drag_gain: 1.0,
                ..DesktopInputConfig::default()
            },
            ..Self::free_form()
        }
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every invariant the controller relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = [
            ("drag_gain", self.drag_gain),
            ("twist_speed", self.twist_speed),
            ("desktop.mouse_drag_gain", self.desktop.mouse_drag_gain),
        ];
        for (name, value) in factors {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeFactor { name, value });
            }
        }

        // Signed factors: direction is a host choice.
        for (name, value) in [
            ("desktop.mouse_rotate_speed", self.desktop.mouse_rotate_speed),
            ("desktop.scroll_scale_factor", self.desktop.scroll_scale_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name });
            }
        }

        if !(self.min_scale.is_finite() && self.max_scale.is_finite())
            || self.min_scale <= 0.0
            || self.min_scale > self.max_scale
        {
            return Err(ConfigError::InvalidScaleRange {
                min: self.min_scale,
                max: self.max_scale,
            });
        }

        self.ground_plane.validate()?;

        if let Some(constraint) = &self.constraint {
            constraint.validate()?;
        }

        Ok(())
    }
}
