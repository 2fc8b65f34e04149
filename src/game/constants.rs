//! Movement and physics constants.
//! Tunable values live in `ControllerConfig`; these are the fixed ones.

/// Physics constants
pub mod physics {
    /// Downward gravity in m/s² (applied by the physics world and scaled by the controller)
    pub const DEFAULT_GRAVITY: f32 = 9.81;

    /// Fixed timestep for the motion integration loop (50 Hz)
    pub const TIMESTEP: f32 = 0.02;

    /// Longest frame the scheduler will integrate in one go
    pub const MAX_FRAME_DT: f32 = 1.0 / 3.0;

    /// Render/input frame rate used by the headless harness
    pub const DEFAULT_FRAME_RATE: f32 = 144.0;

    /// Player capsule radius
    pub const PLAYER_RADIUS: f32 = 0.5;

    /// Player capsule total height (origin sits at the capsule center)
    pub const PLAYER_HEIGHT: f32 = 2.0;

    /// Vectors shorter than this normalize to zero
    pub const NORMALIZE_EPSILON: f32 = 1.0e-5;
}

/// Fixed movement behavior
pub mod movement {
    /// Pitch limit in degrees (looking straight up/down)
    pub const PITCH_LIMIT_DEG: f32 = 90.0;

    /// Velocity scale applied when a dash ends outside a slide
    pub const DASH_EXIT_SLOWDOWN: f32 = 0.8;

    /// Fraction of move speed available for steering while sliding
    pub const SLIDE_STEERING_FACTOR: f32 = 0.5;

    /// m/s to km/h for the speed readout
    pub const MPS_TO_KMH: f32 = 3.6;
}

/// Controller defaults
pub mod defaults {
    pub const MOVE_SPEED: f32 = 5.0;
    pub const MOUSE_SENSITIVITY: f32 = 100.0;

    pub const DASH_SPEED: f32 = 20.0;
    pub const DASH_DURATION: f32 = 0.2;
    pub const DASH_COOLDOWN: f32 = 1.0;

    pub const SLIDE_SPEED_MULTIPLIER: f32 = 1.2;
    pub const SLIDE_SPEED_DECAY: f32 = 0.98;
    pub const SLIDE_COOLDOWN: f32 = 0.5;

    pub const JUMP_FORCE: f32 = 5.0;
    pub const MOMENTUM_JUMP_MULTIPLIER: f32 = 1.5;
    pub const GRAVITY_MULTIPLIER: f32 = 2.0;

    pub const MAX_SLIDE_SPEED: f32 = 50.0;
    pub const AIR_CONTROL: f32 = 0.3;
    pub const DASH_DURING_SLIDE_BOOST: f32 = 1.5;

    /// Ray length below the body origin that still counts as standing on ground
    pub const GROUND_PROBE_DISTANCE: f32 = 1.1;
}
