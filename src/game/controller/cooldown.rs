/// Countdown gate for re-entering a movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// True once the timer has run out.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Restart the countdown.
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    /// Advance by `dt`, never going below zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }
}
