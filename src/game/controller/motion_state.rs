use nalgebra::Vector3;

/// Which velocity rule the controller is running.
///
/// Sliding and dashing are independent; both may be active at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Normal,
    Sliding,
    Dashing,
    SlidingAndDashing,
}

impl MotionState {
    pub fn from_flags(sliding: bool, dashing: bool) -> Self {
        match (sliding, dashing) {
            (false, false) => MotionState::Normal,
            (true, false) => MotionState::Sliding,
            (false, true) => MotionState::Dashing,
            (true, true) => MotionState::SlidingAndDashing,
        }
    }
}

/// Active slide. Momentum only exists while sliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideState {
    pub momentum: Vector3<f32>,
}

/// Active dash, resolved once the controller clock passes `expires_at`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    pub started_at: f64,
    pub expires_at: f64,
}

impl DashState {
    pub fn new(now: f64, duration: f32) -> Self {
        Self {
            started_at: now,
            expires_at: now + duration as f64,
        }
    }

    /// A dash never resolves in the tick it started.
    #[inline]
    pub fn has_expired(&self, now: f64) -> bool {
        now > self.started_at && now >= self.expires_at
    }
}
