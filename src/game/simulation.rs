use log::{debug, info};

use crate::config::{ConfigError, ControllerConfig, SimConfig};

use super::constants::physics as consts;
use super::controller::{FrameReport, PlayerController};
use super::input::InputFrame;
use super::physics::{CameraMount, PhysicsWorld, PlayerRig};

/// Host scheduler: one variable-rate input tick per frame, fixed-rate motion
/// ticks and physics steps in between.
pub struct Simulation {
    pub world: PhysicsWorld,
    pub camera: CameraMount,
    pub controller: PlayerController,
    config: SimConfig,
    accumulator: f32,
    frames: u64,
    fixed_steps: u64,
}

impl Simulation {
    /// Wrap an already populated world. The player body must exist.
    pub fn new(
        world: PhysicsWorld,
        mut controller: PlayerController,
        config: SimConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if world.player.is_none() {
            return Err(ConfigError::MissingPlayerBody);
        }

        let mut world = world;
        world.set_gravity(config.gravity);
        world.refresh_queries();

        let mut camera = CameraMount::default();
        controller.attach(&mut PlayerRig::new(&mut world, &mut camera));

        info!(
            "simulation ready: fixed step {:.4}s, frame rate {:.1} Hz",
            config.fixed_timestep, config.frame_rate
        );
        Ok(Self {
            world,
            camera,
            controller,
            config,
            accumulator: 0.0,
            frames: 0,
            fixed_steps: 0,
        })
    }

    /// Large flat floor with its top at Y=0 and the player standing on it.
    pub fn flat_ground(
        controller_config: ControllerConfig,
        config: SimConfig,
    ) -> Result<Self, ConfigError> {
        let mut world = PhysicsWorld::with_gravity(config.gravity);
        world.add_static_box([0.0, -0.5, 0.0], [400.0, 1.0, 400.0]);
        world.spawn_player(
            [0.0, consts::PLAYER_HEIGHT / 2.0, 0.0],
            consts::PLAYER_RADIUS,
            consts::PLAYER_HEIGHT,
        );
        let controller = PlayerController::new(controller_config)?;
        Self::new(world, controller, config)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }

    /// Advance one rendered frame: fixed ticks first, then the input tick.
    pub fn frame(&mut self, input: &InputFrame, dt: f32) -> FrameReport {
        // A non-finite dt would poison the accumulator for good.
        let dt = if dt.is_finite() {
            dt.clamp(0.0, consts::MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let step = self.config.fixed_timestep;
        while self.accumulator >= step {
            let mut rig = PlayerRig::new(&mut self.world, &mut self.camera);
            self.controller.fixed_tick(&mut rig, input);
            self.world.step(step);
            self.accumulator -= step;
            self.fixed_steps += 1;
        }

        let mut rig = PlayerRig::new(&mut self.world, &mut self.camera);
        let report = self.controller.input_tick(&mut rig, input, dt);
        self.frames += 1;

        for event in &report.events {
            debug!("frame {}: {:?}", self.frames, event);
        }
        report
    }

    /// Advance using the configured frame rate.
    pub fn frame_at_rate(&mut self, input: &InputFrame) -> FrameReport {
        let dt = self.config.frame_dt();
        self.frame(input, dt)
    }

    pub fn player_position(&self) -> Option<[f32; 3]> {
        self.world.player_position()
    }
}
