//! Controller and simulation configuration parsing from TOML files

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::game::constants::{defaults, physics as consts};

/// Walking section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walk speed in m/s
    pub move_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: defaults::MOVE_SPEED,
        }
    }
}

/// Mouse look section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees per second per unit of mouse axis
    pub mouse_sensitivity: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: defaults::MOUSE_SENSITIVITY,
        }
    }
}

/// Dash section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Dash impulse speed in m/s
    pub dash_speed: f32,
    /// Seconds the dash impulse is left untouched by the integrator
    pub dash_duration: f32,
    /// Seconds after a dash ends before another can start
    pub dash_cooldown: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            dash_speed: defaults::DASH_SPEED,
            dash_duration: defaults::DASH_DURATION,
            dash_cooldown: defaults::DASH_COOLDOWN,
        }
    }
}

/// Slide section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Horizontal boost applied to the velocity snapshot at slide start
    pub slide_speed_multiplier: f32,
    /// Per fixed tick horizontal decay factor
    pub slide_speed_decay: f32,
    /// Seconds after a slide ends before another can start
    pub slide_cooldown: f32,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            slide_speed_multiplier: defaults::SLIDE_SPEED_MULTIPLIER,
            slide_speed_decay: defaults::SLIDE_SPEED_DECAY,
            slide_cooldown: defaults::SLIDE_COOLDOWN,
        }
    }
}

/// Jump and gravity section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Base vertical launch speed in m/s
    pub jump_force: f32,
    /// Extra launch speed per m/s of current speed
    pub momentum_jump_multiplier: f32,
    /// Extra gravity scale applied by the controller while airborne
    pub gravity_multiplier: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_force: defaults::JUMP_FORCE,
            momentum_jump_multiplier: defaults::MOMENTUM_JUMP_MULTIPLIER,
            gravity_multiplier: defaults::GRAVITY_MULTIPLIER,
        }
    }
}

/// Momentum tuning section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Horizontal speed cap while sliding
    pub max_slide_speed: f32,
    /// Steering authority while sliding (0 = none)
    pub air_control: f32,
    /// Dash speed multiplier when dashing out of a slide
    pub dash_during_slide_boost: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            max_slide_speed: defaults::MAX_SLIDE_SPEED,
            air_control: defaults::AIR_CONTROL,
            dash_during_slide_boost: defaults::DASH_DURING_SLIDE_BOOST,
        }
    }
}

/// Ground probe section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Downward ray length from the body origin
    pub probe_distance: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            probe_distance: defaults::GROUND_PROBE_DISTANCE,
        }
    }
}

/// Full controller tuning, one section per concern.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub dash: DashConfig,
    pub slide: SlideConfig,
    pub jump: JumpConfig,
    pub momentum: MomentumConfig,
    pub ground: GroundConfig,
}

impl ControllerConfig {
    /// Load controller configuration from a TOML file and validate it
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| match e {
                ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
                other => other,
            })?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML (used by the `defaults` subcommand)
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Reject tunings the controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("movement.move_speed", self.movement.move_speed)?;
        non_negative("look.mouse_sensitivity", self.look.mouse_sensitivity)?;

        non_negative("dash.dash_speed", self.dash.dash_speed)?;
        positive("dash.dash_duration", self.dash.dash_duration)?;
        non_negative("dash.dash_cooldown", self.dash.dash_cooldown)?;

        non_negative("slide.slide_speed_multiplier", self.slide.slide_speed_multiplier)?;
        if !(self.slide.slide_speed_decay > 0.0 && self.slide.slide_speed_decay <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "slide.slide_speed_decay",
                reason: format!("must be in (0, 1], got {}", self.slide.slide_speed_decay),
            });
        }
        non_negative("slide.slide_cooldown", self.slide.slide_cooldown)?;

        non_negative("jump.jump_force", self.jump.jump_force)?;
        non_negative("jump.momentum_jump_multiplier", self.jump.momentum_jump_multiplier)?;
        non_negative("jump.gravity_multiplier", self.jump.gravity_multiplier)?;

        non_negative("momentum.max_slide_speed", self.momentum.max_slide_speed)?;
        non_negative("momentum.air_control", self.momentum.air_control)?;
        non_negative("momentum.dash_during_slide_boost", self.momentum.dash_during_slide_boost)?;

        positive("ground.probe_distance", self.ground.probe_distance)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite value >= 0, got {}", value),
        })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite value > 0, got {}", value),
        })
    }
}

/// Host scheduler settings for the headless harness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed physics step in seconds
    pub fixed_timestep: f32,
    /// Input/render frames per second
    pub frame_rate: f32,
    /// Downward gravity magnitude in m/s²
    pub gravity: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: consts::TIMESTEP,
            frame_rate: consts::DEFAULT_FRAME_RATE,
            gravity: consts::DEFAULT_GRAVITY,
        }
    }
}

impl SimConfig {
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("simulation.fixed_timestep", self.fixed_timestep)?;
        positive("simulation.frame_rate", self.frame_rate)?;
        non_negative("simulation.gravity", self.gravity)?;
        Ok(())
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("No player body spawned in the physics world")]
    MissingPlayerBody,
}
