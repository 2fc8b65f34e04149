use super::constants::movement as move_consts;

/// Camera pitch plus the yaw delta produced by the last look update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookState {
    /// Absolute camera pitch in degrees, positive looks down.
    pub pitch_deg: f32,
    /// Yaw to rotate the body by this tick, in degrees.
    pub yaw_delta_deg: f32,
}

impl LookState {
    /// Apply one tick of mouse movement.
    ///
    /// Yaw is unbounded and incremental; pitch is absolute and clamped to
    /// straight up/down.
    pub fn apply_mouse(&mut self, mouse_x: f32, mouse_y: f32, sensitivity: f32, dt: f32) {
        let yaw = mouse_x * sensitivity * dt;
        let pitch = mouse_y * sensitivity * dt;

        self.pitch_deg = (self.pitch_deg - pitch)
            .clamp(-move_consts::PITCH_LIMIT_DEG, move_consts::PITCH_LIMIT_DEG);
        self.yaw_delta_deg = yaw;
    }
}
