//! Velocity rules for each movement state and transition.
//! Pure functions over the velocity register value; the controller decides when to apply them.

use nalgebra::Vector3;

use crate::game::constants::movement as move_consts;
use crate::game::constants::physics as consts;
use crate::game::rig::BodyBasis;

/// Parameters for one fixed tick of slide motion.
#[derive(Debug, Clone, Copy)]
pub struct SlideTuning {
    pub decay: f32,
    pub air_control: f32,
    pub move_speed: f32,
    pub max_slide_speed: f32,
}

/// Parameters for the dash impulse.
#[derive(Debug, Clone, Copy)]
pub struct DashTuning {
    pub dash_speed: f32,
    pub slide_boost: f32,
}

/// Unit vector, or zero for vectors too short to have a direction.
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(consts::NORMALIZE_EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

/// Clamp the X/Z magnitude to `max`, leaving Y untouched.
pub fn clamp_horizontal(v: Vector3<f32>, max: f32) -> Vector3<f32> {
    let horizontal = Vector3::new(v.x, 0.0, v.z);
    let clamped = if horizontal.magnitude_squared() > max * max {
        normalize_or_zero(horizontal) * max
    } else {
        horizontal
    };
    Vector3::new(clamped.x, v.y, clamped.z)
}

/// Normal walking: input drives X/Z, the register's vertical speed is kept.
pub fn walk_velocity(
    current: Vector3<f32>,
    basis: BodyBasis,
    horizontal: f32,
    vertical: f32,
    move_speed: f32,
) -> Vector3<f32> {
    basis.project(horizontal, vertical) * move_speed + Vector3::new(0.0, current.y, 0.0)
}

/// Slide snapshot: horizontal speed boosted, vertical speed carried as-is.
pub fn slide_entry_momentum(current: Vector3<f32>, multiplier: f32) -> Vector3<f32> {
    let mut momentum = current * multiplier;
    momentum.y = current.y;
    momentum
}

/// One fixed tick of slide momentum: decay, steer, clamp.
pub fn advance_slide_momentum(
    momentum: Vector3<f32>,
    basis: BodyBasis,
    horizontal: f32,
    vertical: f32,
    tuning: SlideTuning,
) -> Vector3<f32> {
    let decayed = Vector3::new(
        momentum.x * tuning.decay,
        momentum.y,
        momentum.z * tuning.decay,
    );

    let steer = basis.project(horizontal * tuning.air_control, vertical * tuning.air_control);
    let steered = decayed + steer * tuning.move_speed * move_consts::SLIDE_STEERING_FACTOR;

    clamp_horizontal(steered, tuning.max_slide_speed)
}

/// Jump keeps the full velocity and replaces Y with a launch speed that grows with current speed.
pub fn jump_velocity(current: Vector3<f32>, jump_force: f32, momentum_multiplier: f32) -> Vector3<f32> {
    let mut launched = current;
    launched.y = jump_force + current.magnitude() * momentum_multiplier;
    launched
}

/// Dash impulse.
///
/// Out of a slide the dash follows the slide direction (bent by forward input)
/// and replaces the whole velocity. Otherwise it follows the raw input
/// direction, or forward with no input, and keeps the vertical speed.
pub fn dash_velocity(
    current: Vector3<f32>,
    basis: BodyBasis,
    raw_horizontal: f32,
    raw_vertical: f32,
    slide_momentum: Option<Vector3<f32>>,
    tuning: DashTuning,
) -> Vector3<f32> {
    match slide_momentum {
        Some(momentum) => {
            let direction =
                normalize_or_zero(normalize_or_zero(momentum) + basis.forward * raw_vertical);
            direction * tuning.dash_speed * tuning.slide_boost
        }
        None => {
            let direction = if raw_horizontal != 0.0 || raw_vertical != 0.0 {
                normalize_or_zero(basis.project(raw_horizontal, raw_vertical))
            } else {
                basis.forward
            };
            direction * tuning.dash_speed + Vector3::new(0.0, current.y, 0.0)
        }
    }
}

/// Soft slowdown applied when a dash ends outside a slide.
pub fn dash_exit_velocity(current: Vector3<f32>) -> Vector3<f32> {
    current * move_consts::DASH_EXIT_SLOWDOWN
}
