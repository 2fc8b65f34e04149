//! Per-frame input signals consumed by the controller.

use serde::{Deserialize, Serialize};

/// Buttons the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    Dash,
    Slide,
    Jump,
}

/// Input snapshot for one rendered frame.
///
/// Button fields are edges: they are true only on the frame the key changed.
/// Axes are conventionally in [-1, 1]; `raw_*` are the unsmoothed axis values
/// used to pick a dash direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    pub dash_down: bool,
    pub slide_down: bool,
    pub slide_up: bool,
    pub jump_down: bool,

    pub horizontal: f32,
    pub vertical: f32,
    pub raw_horizontal: f32,
    pub raw_vertical: f32,

    pub mouse_x: f32,
    pub mouse_y: f32,
}

impl InputFrame {
    /// Frame with the same smoothed and raw movement axes.
    pub fn with_axes(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
            raw_horizontal: horizontal,
            raw_vertical: vertical,
            ..Default::default()
        }
    }

    /// True if any movement axis is deflected.
    #[inline]
    pub fn has_raw_movement(&self) -> bool {
        self.raw_horizontal != 0.0 || self.raw_vertical != 0.0
    }
}

/// Turns held-button samples into press/release edges.
///
/// Hosts that only poll levels feed `sample` once per frame; holding a
/// button yields a single press edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    dash: bool,
    slide: bool,
    jump: bool,
}

/// Press/release edges produced by one `ButtonState::sample`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdges {
    pub dash_down: bool,
    pub slide_down: bool,
    pub slide_up: bool,
    pub jump_down: bool,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's held state and return the edges since the last sample.
    pub fn sample(&mut self, dash: bool, slide: bool, jump: bool) -> ButtonEdges {
        let edges = ButtonEdges {
            dash_down: dash && !self.dash,
            slide_down: slide && !self.slide,
            slide_up: !slide && self.slide,
            jump_down: jump && !self.jump,
        };
        self.dash = dash;
        self.slide = slide;
        self.jump = jump;
        edges
    }

    /// Apply a single press or release, keeping the other buttons as they are.
    pub fn set(&mut self, button: Button, held: bool) -> ButtonEdges {
        let (mut dash, mut slide, mut jump) = (self.dash, self.slide, self.jump);
        match button {
            Button::Dash => dash = held,
            Button::Slide => slide = held,
            Button::Jump => jump = held,
        }
        self.sample(dash, slide, jump)
    }
}

impl ButtonEdges {
    /// Merge two edge sets produced within the same frame.
    pub fn merge(self, other: ButtonEdges) -> ButtonEdges {
        ButtonEdges {
            dash_down: self.dash_down || other.dash_down,
            slide_down: self.slide_down || other.slide_down,
            slide_up: self.slide_up || other.slide_up,
            jump_down: self.jump_down || other.jump_down,
        }
    }

    /// Copy the edges into an input frame.
    pub fn apply(self, frame: &mut InputFrame) {
        frame.dash_down = self.dash_down;
        frame.slide_down = self.slide_down;
        frame.slide_up = self.slide_up;
        frame.jump_down = self.jump_down;
    }
}
