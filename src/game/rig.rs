//! Collaborator seams between the movement controller and its host.

use nalgebra::Vector3;

use super::constants::movement as move_consts;

/// Horizontal body axes the movement input is projected onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyBasis {
    pub right: Vector3<f32>,
    pub forward: Vector3<f32>,
}

impl BodyBasis {
    /// Basis for a body turned `yaw` radians about +Y.
    /// Yaw 0 faces +Z with +X to the right; positive yaw turns right.
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        Self {
            right: Vector3::new(cos, 0.0, -sin),
            forward: Vector3::new(sin, 0.0, cos),
        }
    }

    /// World-space direction for the given strafe/forward axes.
    #[inline]
    pub fn project(&self, horizontal: f32, vertical: f32) -> Vector3<f32> {
        self.right * horizontal + self.forward * vertical
    }
}

impl Default for BodyBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

/// The physics body and camera mount the controller drives.
///
/// The velocity register is owned by the physics collaborator; the
/// controller reads it before every overwrite.
pub trait CharacterRig {
    /// Current linear velocity of the body.
    fn linear_velocity(&self) -> Vector3<f32>;

    /// Overwrite the body's linear velocity.
    fn set_linear_velocity(&mut self, velocity: Vector3<f32>);

    /// Vertical gravity acceleration (negative pulls down).
    fn gravity_y(&self) -> f32;

    /// True if a surface lies within `max_distance` straight below the body origin.
    fn probe_ground(&self, max_distance: f32) -> bool;

    /// Current right/forward axes of the body.
    fn basis(&self) -> BodyBasis;

    /// Rotate the body about the vertical axis by `degrees`.
    fn rotate_yaw(&mut self, degrees: f32);

    /// Set the camera's absolute local pitch in degrees.
    fn set_camera_pitch(&mut self, degrees: f32);

    /// Capture the pointer for mouse look. Hosts without a cursor ignore it.
    fn lock_pointer(&mut self) {}
}

/// Optional text sink for the speed readout.
pub trait SpeedReadout {
    fn set_text(&mut self, text: &str);
}

/// Speed in km/h for a velocity in m/s.
pub fn speed_kmh(velocity: &Vector3<f32>) -> f32 {
    velocity.magnitude() * move_consts::MPS_TO_KMH
}

/// Readout text for a velocity, one decimal place.
pub fn format_speed(velocity: &Vector3<f32>) -> String {
    format!("Speed: {:.1} km/h", speed_kmh(velocity))
}
