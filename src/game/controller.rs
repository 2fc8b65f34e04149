//! First-person movement controller.
//!
//! Two entry points are driven by the host scheduler:
//! - [`PlayerController::input_tick`] once per rendered frame (variable dt):
//!   look, dash/slide/jump triggers, cooldowns, grounding, gravity, readout
//!   and dash expiry.
//! - [`PlayerController::fixed_tick`] once per physics step: writes the
//!   velocity for the current movement state.
//!
//! # Example
//!
//! ```ignore
//! let mut controller = PlayerController::new(ControllerConfig::default())?;
//! controller.attach(&mut rig);
//!
//! // Each physics step:
//! controller.fixed_tick(&mut rig, &input);
//! // Each frame:
//! let report = controller.input_tick(&mut rig, &input, frame_dt);
//! ```

mod cooldown;
mod motion_state;
mod velocity;

pub use cooldown::Cooldown;
pub use motion_state::{DashState, MotionState, SlideState};
pub use velocity::{
    advance_slide_momentum, clamp_horizontal, dash_exit_velocity, dash_velocity,
    jump_velocity, normalize_or_zero, slide_entry_momentum, walk_velocity, DashTuning,
    SlideTuning,
};

use log::{debug, trace, warn};
use nalgebra::Vector3;

use crate::config::{ConfigError, ControllerConfig};

use super::input::InputFrame;
use super::look::LookState;
use super::rig::{format_speed, speed_kmh, CharacterRig, SpeedReadout};

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionEvent {
    SlideStarted { momentum: Vector3<f32> },
    SlideStopped,
    DashStarted { velocity: Vector3<f32> },
    DashEnded { slowed: bool },
    Jumped { velocity: Vector3<f32> },
}

/// Result of one input tick.
///
/// `velocity` and `speed_kmh` are read after dash resolution, so on the tick a
/// dash ends they already include the slowdown. The readout sink is written
/// before that and still shows the dash speed.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub state: MotionState,
    pub grounded: bool,
    pub pitch_deg: f32,
    pub velocity: Vector3<f32>,
    pub speed_kmh: f32,
    pub events: Vec<MotionEvent>,
}

impl FrameReport {
    pub fn speed_text(&self) -> String {
        format_speed(&self.velocity)
    }
}

/// Momentum-preserving walk/slide/dash/jump state machine.
pub struct PlayerController {
    config: ControllerConfig,
    look: LookState,
    slide: Option<SlideState>,
    dash: Option<DashState>,
    dash_cooldown: Cooldown,
    slide_cooldown: Cooldown,
    grounded: bool,
    /// Scaled seconds accumulated from input ticks; dash expiry is measured against it.
    clock: f64,
    readout: Option<Box<dyn SpeedReadout>>,
}

impl PlayerController {
    /// Create a controller, rejecting tunings it cannot run with.
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!("rejected controller config: {}", e);
            return Err(e);
        }
        Ok(Self {
            config,
            look: LookState::default(),
            slide: None,
            dash: None,
            dash_cooldown: Cooldown::default(),
            slide_cooldown: Cooldown::default(),
            grounded: false,
            clock: 0.0,
            readout: None,
        })
    }

    /// Bind to a rig: capture the pointer and reset the camera pitch.
    pub fn attach<R: CharacterRig>(&mut self, rig: &mut R) {
        rig.lock_pointer();
        rig.set_camera_pitch(self.look.pitch_deg);
        debug!("controller attached");
    }

    /// Attach a speed readout sink.
    pub fn with_readout(mut self, readout: Box<dyn SpeedReadout>) -> Self {
        self.readout = Some(readout);
        self
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn state(&self) -> MotionState {
        MotionState::from_flags(self.slide.is_some(), self.dash.is_some())
    }

    pub fn is_sliding(&self) -> bool {
        self.slide.is_some()
    }

    pub fn is_dashing(&self) -> bool {
        self.dash.is_some()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn look(&self) -> LookState {
        self.look
    }

    /// Slide momentum, only while sliding.
    pub fn slide_momentum(&self) -> Option<Vector3<f32>> {
        self.slide.map(|s| s.momentum)
    }

    pub fn dash_cooldown(&self) -> &Cooldown {
        &self.dash_cooldown
    }

    pub fn slide_cooldown(&self) -> &Cooldown {
        &self.slide_cooldown
    }

    /// Variable-rate update: look, triggers, cooldowns, grounding, gravity, readout, dash expiry.
    pub fn input_tick<R: CharacterRig>(
        &mut self,
        rig: &mut R,
        input: &InputFrame,
        dt: f32,
    ) -> FrameReport {
        let dt = dt.max(0.0);
        self.clock += dt as f64;
        let mut events = Vec::new();

        self.look.apply_mouse(
            input.mouse_x,
            input.mouse_y,
            self.config.look.mouse_sensitivity,
            dt,
        );
        rig.set_camera_pitch(self.look.pitch_deg);
        if self.look.yaw_delta_deg != 0.0 {
            rig.rotate_yaw(self.look.yaw_delta_deg);
        }

        if input.dash_down && self.dash.is_none() && self.dash_cooldown.is_ready() {
            events.push(self.start_dash(rig, input));
        }

        if input.slide_down && self.slide.is_none() && self.slide_cooldown.is_ready() {
            events.push(self.start_slide(rig));
        }
        if input.slide_up && self.slide.is_some() {
            events.push(self.stop_slide());
        }

        // Uses the grounded flag from the previous tick's probe.
        if input.jump_down && self.grounded {
            events.extend(self.jump(rig));
        }

        self.dash_cooldown.tick(dt);
        self.slide_cooldown.tick(dt);

        self.grounded = rig.probe_ground(self.config.ground.probe_distance);
        if !self.grounded {
            let mut v = rig.linear_velocity();
            v.y += rig.gravity_y() * self.config.jump.gravity_multiplier * dt;
            rig.set_linear_velocity(v);
        }

        let velocity = rig.linear_velocity();
        if let Some(readout) = self.readout.as_mut() {
            readout.set_text(&format_speed(&velocity));
        }

        if self.dash.is_some_and(|d| d.has_expired(self.clock)) {
            events.push(self.finish_dash(rig));
        }

        let velocity = rig.linear_velocity();
        trace!(
            "input tick dt={:.4} state={:?} grounded={} v=({:.2}, {:.2}, {:.2})",
            dt,
            self.state(),
            self.grounded,
            velocity.x,
            velocity.y,
            velocity.z
        );

        FrameReport {
            state: self.state(),
            grounded: self.grounded,
            pitch_deg: self.look.pitch_deg,
            velocity,
            speed_kmh: speed_kmh(&velocity),
            events,
        }
    }

    /// Fixed-rate update: write the velocity for the current movement state.
    pub fn fixed_tick<R: CharacterRig>(&mut self, rig: &mut R, input: &InputFrame) {
        let basis = rig.basis();

        if let Some(slide) = self.slide.as_mut() {
            let tuning = SlideTuning {
                decay: self.config.slide.slide_speed_decay,
                air_control: self.config.momentum.air_control,
                move_speed: self.config.movement.move_speed,
                max_slide_speed: self.config.momentum.max_slide_speed,
            };
            slide.momentum =
                advance_slide_momentum(slide.momentum, basis, input.horizontal, input.vertical, tuning);
            rig.set_linear_velocity(slide.momentum);
        } else if self.dash.is_none() {
            let v = walk_velocity(
                rig.linear_velocity(),
                basis,
                input.horizontal,
                input.vertical,
                self.config.movement.move_speed,
            );
            rig.set_linear_velocity(v);
        }
        // Dashing outside a slide leaves the impulse untouched.
    }

    fn start_dash<R: CharacterRig>(&mut self, rig: &mut R, input: &InputFrame) -> MotionEvent {
        let tuning = DashTuning {
            dash_speed: self.config.dash.dash_speed,
            slide_boost: self.config.momentum.dash_during_slide_boost,
        };
        let velocity = dash_velocity(
            rig.linear_velocity(),
            rig.basis(),
            input.raw_horizontal,
            input.raw_vertical,
            self.slide_momentum(),
            tuning,
        );
        rig.set_linear_velocity(velocity);
        self.dash = Some(DashState::new(self.clock, self.config.dash.dash_duration));

        debug!(
            "dash started, sliding={} steered={} v={:?}",
            self.slide.is_some(),
            input.has_raw_movement(),
            velocity
        );
        MotionEvent::DashStarted { velocity }
    }

    fn finish_dash<R: CharacterRig>(&mut self, rig: &mut R) -> MotionEvent {
        let slowed = self.slide.is_none();
        if slowed {
            rig.set_linear_velocity(dash_exit_velocity(rig.linear_velocity()));
        }
        self.dash = None;
        self.dash_cooldown.arm(self.config.dash.dash_cooldown);

        debug!("dash ended, slowed={}", slowed);
        MotionEvent::DashEnded { slowed }
    }

    fn start_slide<R: CharacterRig>(&mut self, rig: &R) -> MotionEvent {
        let momentum =
            slide_entry_momentum(rig.linear_velocity(), self.config.slide.slide_speed_multiplier);
        self.slide = Some(SlideState { momentum });

        debug!("slide started, momentum={:?}", momentum);
        MotionEvent::SlideStarted { momentum }
    }

    fn stop_slide(&mut self) -> MotionEvent {
        self.slide = None;
        self.slide_cooldown.arm(self.config.slide.slide_cooldown);

        debug!("slide stopped");
        MotionEvent::SlideStopped
    }

    fn jump<R: CharacterRig>(&mut self, rig: &mut R) -> Vec<MotionEvent> {
        let velocity = jump_velocity(
            rig.linear_velocity(),
            self.config.jump.jump_force,
            self.config.jump.momentum_jump_multiplier,
        );
        rig.set_linear_velocity(velocity);
        debug!("jump, v={:?}", velocity);

        let mut events = vec![MotionEvent::Jumped { velocity }];
        if self.slide.is_some() {
            events.push(self.stop_slide());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::rig::BodyBasis;
    use std::cell::RefCell;
    use std::rc::Rc;

    const GRAVITY: f32 = -9.81;

    /// Rig with a scripted ground flag and no physics integration.
    struct MockRig {
        velocity: Vector3<f32>,
        grounded: bool,
        yaw_deg: f32,
        pitch_deg: f32,
        pointer_locked: bool,
    }

    impl MockRig {
        fn grounded() -> Self {
            Self {
                velocity: Vector3::zeros(),
                grounded: true,
                yaw_deg: 0.0,
                pitch_deg: 0.0,
                pointer_locked: false,
            }
        }

        fn airborne() -> Self {
            Self {
                grounded: false,
                ..Self::grounded()
            }
        }
    }

    impl CharacterRig for MockRig {
        fn linear_velocity(&self) -> Vector3<f32> {
            self.velocity
        }
        fn set_linear_velocity(&mut self, velocity: Vector3<f32>) {
            self.velocity = velocity;
        }
        fn gravity_y(&self) -> f32 {
            GRAVITY
        }
        fn probe_ground(&self, _max_distance: f32) -> bool {
            self.grounded
        }
        fn basis(&self) -> BodyBasis {
            BodyBasis::from_yaw(self.yaw_deg.to_radians())
        }
        fn rotate_yaw(&mut self, degrees: f32) {
            self.yaw_deg += degrees;
        }
        fn set_camera_pitch(&mut self, degrees: f32) {
            self.pitch_deg = degrees;
        }
        fn lock_pointer(&mut self) {
            self.pointer_locked = true;
        }
    }

    #[derive(Clone, Default)]
    struct SharedText(Rc<RefCell<String>>);

    impl SpeedReadout for SharedText {
        fn set_text(&mut self, text: &str) {
            *self.0.borrow_mut() = text.to_string();
        }
    }

    fn approx(a: Vector3<f32>, b: Vector3<f32>) -> bool {
        (a - b).magnitude() < 1e-4
    }

    fn controller() -> PlayerController {
        PlayerController::new(ControllerConfig::default()).unwrap()
    }

    /// Controller that has already seen the ground once, so jumps are allowed.
    fn grounded_controller(rig: &mut MockRig) -> PlayerController {
        let mut c = controller();
        c.input_tick(rig, &InputFrame::default(), 0.0);
        assert!(c.is_grounded());
        c
    }

    fn press(f: impl FnOnce(&mut InputFrame)) -> InputFrame {
        let mut frame = InputFrame::default();
        f(&mut frame);
        frame
    }

    #[test]
    fn test_attach_locks_pointer() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        c.attach(&mut rig);
        assert!(rig.pointer_locked);
    }

    #[test]
    fn test_invalid_config_is_rejected_at_init() {
        let mut config = ControllerConfig::default();
        config.dash.dash_duration = 0.0;
        assert!(PlayerController::new(config).is_err());
    }

    #[test]
    fn test_normal_fixed_tick_walks_right() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, -0.5, 0.0);
        let mut c = controller();
        c.fixed_tick(&mut rig, &InputFrame::with_axes(1.0, 0.0));
        assert!(approx(rig.velocity, Vector3::new(5.0, -0.5, 0.0)));
        assert_eq!(c.state(), MotionState::Normal);
    }

    #[test]
    fn test_look_rotates_body_and_pitches_camera() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        let input = press(|f| {
            f.mouse_x = 1.0;
            f.mouse_y = 2.0;
        });
        let report = c.input_tick(&mut rig, &input, 0.1);
        assert!((rig.yaw_deg - 10.0).abs() < 1e-4);
        assert!((rig.pitch_deg + 20.0).abs() < 1e-4);
        assert_eq!(report.pitch_deg, rig.pitch_deg);
    }

    #[test]
    fn test_slide_entry_snapshot() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(3.0, 0.0, 4.0);
        let mut c = controller();
        let report = c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);

        let momentum = c.slide_momentum().unwrap();
        assert!(approx(momentum, Vector3::new(3.6, 0.0, 4.8)));
        assert_eq!(report.state, MotionState::Sliding);
        assert!(matches!(report.events[0], MotionEvent::SlideStarted { .. }));
    }

    #[test]
    fn test_slide_entry_keeps_vertical_unscaled() {
        let mut rig = MockRig::airborne();
        rig.velocity = Vector3::new(3.0, -7.25, 4.0);
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.0);
        assert_eq!(c.slide_momentum().unwrap().y, -7.25);
    }

    #[test]
    fn test_slide_horizontal_speed_stays_clamped() {
        let mut config = ControllerConfig::default();
        config.momentum.max_slide_speed = 8.0;
        config.slide.slide_speed_decay = 1.0;
        let mut c = PlayerController::new(config).unwrap();

        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, 0.0, 20.0);
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.0);

        let steer = InputFrame::with_axes(1.0, 1.0);
        for _ in 0..200 {
            c.fixed_tick(&mut rig, &steer);
            let m = c.slide_momentum().unwrap();
            let horizontal = Vector3::new(m.x, 0.0, m.z).magnitude();
            assert!(horizontal <= 8.0 + 1e-4, "horizontal slide speed {horizontal}");
            assert_eq!(rig.velocity, m);
        }
    }

    #[test]
    fn test_slide_release_arms_cooldown_and_blocks_reentry() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, 0.0, 5.0);
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);
        let report = c.input_tick(&mut rig, &press(|f| f.slide_up = true), 0.01);
        assert_eq!(report.events, vec![MotionEvent::SlideStopped]);
        assert!(!c.is_sliding());
        assert!(c.slide_momentum().is_none());
        // Armed before this tick's countdown step.
        assert!((c.slide_cooldown().remaining() - 0.49).abs() < 1e-6);

        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.1);
        assert!(!c.is_sliding(), "slide must wait for its cooldown");

        c.input_tick(&mut rig, &InputFrame::default(), 0.5);
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);
        assert!(c.is_sliding());
    }

    #[test]
    fn test_slide_up_without_slide_is_ignored() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        let report = c.input_tick(&mut rig, &press(|f| f.slide_up = true), 0.01);
        assert!(report.events.is_empty());
        assert_eq!(c.slide_cooldown().remaining(), 0.0);
    }

    #[test]
    fn test_jump_uses_speed_bonus() {
        let mut rig = MockRig::grounded();
        let mut c = grounded_controller(&mut rig);
        rig.velocity = Vector3::new(3.0, 0.0, 4.0);
        c.input_tick(&mut rig, &press(|f| f.jump_down = true), 0.0);
        assert!(approx(rig.velocity, Vector3::new(3.0, 5.0 + 5.0 * 1.5, 4.0)));
    }

    #[test]
    fn test_jump_requires_ground_seen_last_tick() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        // First tick has not probed yet.
        let report = c.input_tick(&mut rig, &press(|f| f.jump_down = true), 0.0);
        assert!(report.events.is_empty());
        assert_eq!(rig.velocity, Vector3::zeros());
    }

    #[test]
    fn test_jump_refused_in_air() {
        let mut rig = MockRig::airborne();
        let mut c = controller();
        c.input_tick(&mut rig, &InputFrame::default(), 0.0);
        let report = c.input_tick(&mut rig, &press(|f| f.jump_down = true), 0.0);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_jump_while_sliding_ends_slide() {
        let mut rig = MockRig::grounded();
        let mut c = grounded_controller(&mut rig);
        rig.velocity = Vector3::new(0.0, 0.0, 10.0);
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);

        let report = c.input_tick(&mut rig, &press(|f| f.jump_down = true), 0.01);
        assert!(!c.is_sliding());
        assert!((c.slide_cooldown().remaining() - 0.49).abs() < 1e-6);
        assert!(matches!(report.events[0], MotionEvent::Jumped { .. }));
        assert_eq!(report.events[1], MotionEvent::SlideStopped);
        assert!((rig.velocity.y - (5.0 + 10.0 * 1.5)).abs() < 1e-4);
    }

    #[test]
    fn test_airborne_gravity_accumulates() {
        let mut rig = MockRig::airborne();
        rig.velocity = Vector3::new(1.0, 2.0, 0.0);
        let mut c = controller();
        c.input_tick(&mut rig, &InputFrame::default(), 0.1);
        c.input_tick(&mut rig, &InputFrame::default(), 0.1);
        let expected_y = 2.0 + 2.0 * GRAVITY * 2.0 * 0.1;
        assert!((rig.velocity.y - expected_y).abs() < 1e-4);
        assert_eq!(rig.velocity.x, 1.0);
    }

    #[test]
    fn test_grounded_has_no_extra_gravity() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, -1.0, 0.0);
        let mut c = controller();
        c.input_tick(&mut rig, &InputFrame::default(), 0.1);
        assert_eq!(rig.velocity.y, -1.0);
    }

    #[test]
    fn test_dash_forward_then_slowdown_on_expiry() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, 0.0, 0.0);
        let mut c = controller();

        let report = c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        assert_eq!(report.state, MotionState::Dashing);
        assert!(approx(rig.velocity, Vector3::new(0.0, 0.0, 20.0)));

        // The integrator leaves the impulse alone while dashing.
        c.fixed_tick(&mut rig, &InputFrame::with_axes(1.0, 0.0));
        assert!(approx(rig.velocity, Vector3::new(0.0, 0.0, 20.0)));

        c.input_tick(&mut rig, &InputFrame::default(), 0.1);
        assert!(c.is_dashing());
        let report = c.input_tick(&mut rig, &InputFrame::default(), 0.15);
        assert!(!c.is_dashing());
        assert_eq!(report.events, vec![MotionEvent::DashEnded { slowed: true }]);
        assert!(approx(rig.velocity, Vector3::new(0.0, 0.0, 16.0)));
        assert_eq!(c.dash_cooldown().remaining(), 1.0);
    }

    #[test]
    fn test_dash_keeps_prior_vertical() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(4.0, 3.0, -2.0);
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.0);
        assert!(approx(rig.velocity, Vector3::new(0.0, 3.0, 20.0)));
    }

    #[test]
    fn test_dash_refused_while_dashing_or_cooling_down() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);

        let again = c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        assert!(again.events.is_empty(), "no retrigger while dashing");

        // Let the dash expire.
        c.input_tick(&mut rig, &InputFrame::default(), 0.3);
        assert!(!c.is_dashing());
        assert!(c.dash_cooldown().remaining() > 0.0);

        let blocked = c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.5);
        assert!(blocked.events.is_empty(), "dash cooldown still running");

        c.input_tick(&mut rig, &InputFrame::default(), 0.6);
        assert!(c.dash_cooldown().is_ready());
        let allowed = c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        assert!(matches!(allowed.events[0], MotionEvent::DashStarted { .. }));
    }

    #[test]
    fn test_dash_during_slide_keeps_slide_and_speed() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(10.0, 0.0, 0.0);
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);

        let report = c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        assert_eq!(report.state, MotionState::SlidingAndDashing);
        assert!(approx(rig.velocity, Vector3::new(30.0, 0.0, 0.0)));
        assert_eq!(c.slide_cooldown().remaining(), 0.0);

        // Slide integration still runs while dashing.
        c.fixed_tick(&mut rig, &InputFrame::default());
        assert_eq!(rig.velocity, c.slide_momentum().unwrap());

        let before = rig.velocity;
        let report = c.input_tick(&mut rig, &InputFrame::default(), 0.25);
        assert_eq!(report.events, vec![MotionEvent::DashEnded { slowed: false }]);
        assert_eq!(rig.velocity, before);
        assert_eq!(report.state, MotionState::Sliding);
    }

    #[test]
    fn test_slide_ending_mid_dash_leaves_dash_impulse() {
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(0.0, 0.0, 6.0);
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.slide_down = true), 0.01);
        c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        c.input_tick(&mut rig, &press(|f| f.slide_up = true), 0.01);
        assert_eq!(c.state(), MotionState::Dashing);

        let impulse = rig.velocity;
        c.fixed_tick(&mut rig, &InputFrame::with_axes(1.0, 0.0));
        assert_eq!(rig.velocity, impulse);

        c.input_tick(&mut rig, &InputFrame::default(), 0.3);
        assert!(approx(rig.velocity, impulse * 0.8));
    }

    #[test]
    fn test_cooldowns_never_negative() {
        let mut rig = MockRig::grounded();
        let mut c = controller();
        c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        for dt in [0.5, 3.0, 0.0, 0.016, 10.0] {
            c.input_tick(&mut rig, &InputFrame::default(), dt);
            assert!(c.dash_cooldown().remaining() >= 0.0);
            assert!(c.slide_cooldown().remaining() >= 0.0);
        }
    }

    #[test]
    fn test_readout_receives_speed_text() {
        let text = SharedText::default();
        let mut c = controller().with_readout(Box::new(text.clone()));
        let mut rig = MockRig::grounded();
        rig.velocity = Vector3::new(3.0, 0.0, 4.0);
        let report = c.input_tick(&mut rig, &InputFrame::default(), 0.01);
        assert_eq!(text.0.borrow().as_str(), "Speed: 18.0 km/h");
        assert_eq!(report.speed_text(), "Speed: 18.0 km/h");
        assert!((report.speed_kmh - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_readout_shows_dash_speed_on_expiry_tick() {
        let text = SharedText::default();
        let mut c = controller().with_readout(Box::new(text.clone()));
        let mut rig = MockRig::grounded();
        c.input_tick(&mut rig, &press(|f| f.dash_down = true), 0.01);
        assert_eq!(text.0.borrow().as_str(), "Speed: 72.0 km/h");

        let report = c.input_tick(&mut rig, &InputFrame::default(), 0.25);
        assert!(report.events.contains(&MotionEvent::DashEnded { slowed: true }));
        assert_eq!(text.0.borrow().as_str(), "Speed: 72.0 km/h");
        assert_eq!(report.speed_text(), "Speed: 57.6 km/h");
    }
}
