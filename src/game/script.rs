//! Scripted input for headless runs.
//!
//! A script is a list of timed segments. Axes hold for the whole segment;
//! button presses/releases happen on the segment's first frame and stay
//! held until released by a later segment.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::input::{Button, ButtonEdges, ButtonState, InputFrame};

/// One timed stretch of input.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScriptSegment {
    /// Seconds this segment lasts (at least one frame).
    pub duration: f32,
    pub horizontal: f32,
    pub vertical: f32,
    /// Unsmoothed axes; default to the smoothed ones.
    pub raw_horizontal: Option<f32>,
    pub raw_vertical: Option<f32>,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub press: Vec<Button>,
    pub release: Vec<Button>,
    /// Free-form label shown in logs.
    pub label: Option<String>,
}

/// Ordered input segments loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputScript {
    #[serde(default, rename = "segment")]
    pub segments: Vec<ScriptSegment>,
}

impl InputScript {
    /// Load an input script from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScriptError::Io(path.to_path_buf(), e))?;
        let script: Self = toml::from_str(&content)
            .map_err(|e| ScriptError::Parse(path.to_path_buf(), e))?;
        script.validate()?;
        Ok(script)
    }

    /// Parse an input script from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self =
            toml::from_str(content).map_err(|e| ScriptError::Parse(PathBuf::new(), e))?;
        script.validate()?;
        Ok(script)
    }

    pub fn validate(&self) -> Result<(), ScriptError> {
        for (index, segment) in self.segments.iter().enumerate() {
            if !segment.duration.is_finite() || segment.duration < 0.0 {
                return Err(ScriptError::InvalidSegment {
                    index,
                    reason: format!("duration must be >= 0, got {}", segment.duration),
                });
            }
        }
        Ok(())
    }

    /// Sum of segment durations in seconds.
    pub fn total_duration(&self) -> f32 {
        self.segments.iter().map(|s| s.duration).sum()
    }

    /// Frame-by-frame playback at a fixed frame dt.
    pub fn play(&self, frame_dt: f32) -> ScriptPlayer<'_> {
        ScriptPlayer {
            script: self,
            frame_dt,
            segment: 0,
            frame_in_segment: 0,
            buttons: ButtonState::new(),
        }
    }
}

/// Iterator over the input frames of a script.
pub struct ScriptPlayer<'a> {
    script: &'a InputScript,
    frame_dt: f32,
    segment: usize,
    frame_in_segment: u32,
    buttons: ButtonState,
}

impl ScriptPlayer<'_> {
    /// Label of the segment the next frame comes from.
    pub fn current_label(&self) -> Option<&str> {
        self.script
            .segments
            .get(self.segment)
            .and_then(|s| s.label.as_deref())
    }

    fn segment_frames(&self, segment: &ScriptSegment) -> u32 {
        if self.frame_dt <= 0.0 {
            return 1;
        }
        ((segment.duration / self.frame_dt).round() as u32).max(1)
    }
}

impl Iterator for ScriptPlayer<'_> {
    type Item = InputFrame;

    fn next(&mut self) -> Option<InputFrame> {
        let script = self.script;
        let segment = script.segments.get(self.segment)?;

        let mut frame = InputFrame {
            horizontal: segment.horizontal,
            vertical: segment.vertical,
            raw_horizontal: segment.raw_horizontal.unwrap_or(segment.horizontal),
            raw_vertical: segment.raw_vertical.unwrap_or(segment.vertical),
            mouse_x: segment.mouse_x,
            mouse_y: segment.mouse_y,
            ..Default::default()
        };

        if self.frame_in_segment == 0 {
            let mut edges = ButtonEdges::default();
            for &button in &segment.press {
                edges = edges.merge(self.buttons.set(button, true));
            }
            for &button in &segment.release {
                edges = edges.merge(self.buttons.set(button, false));
            }
            edges.apply(&mut frame);
        }

        self.frame_in_segment += 1;
        if self.frame_in_segment >= self.segment_frames(segment) {
            self.segment += 1;
            self.frame_in_segment = 0;
        }
        Some(frame)
    }
}

/// Errors that can occur when loading an input script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Failed to parse {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),
    #[error("Invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },
}
