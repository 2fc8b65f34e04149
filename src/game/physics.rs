use nalgebra::{UnitQuaternion, Vector3};
use rapier3d::prelude::*;

use super::constants::physics as consts;
use super::rig::{BodyBasis, CharacterRig};

// Collision groups: the player only collides with level geometry.
const GROUP_STATIC: Group = Group::GROUP_1;
const GROUP_CHARACTER: Group = Group::GROUP_2;

/// Camera attachment state written by the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraMount {
    /// Absolute local pitch in degrees.
    pub pitch_deg: f32,
    pub pointer_locked: bool,
}

/// Wrapper around a Rapier3D pipeline holding static level geometry and one
/// dynamic player body whose velocity the controller drives.
pub struct PhysicsWorld {
    pub gravity: Vector<Real>,
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub integration_parameters: IntegrationParameters,
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub query_pipeline: QueryPipeline,

    /// Player rigid body, once spawned
    pub player: Option<RigidBodyHandle>,
}

impl PhysicsWorld {
    /// Creates a new physics world with default gravity
    pub fn new() -> Self {
        Self::with_gravity(consts::DEFAULT_GRAVITY)
    }

    /// Creates a new physics world pulling down with `gravity_y` m/s²
    pub fn with_gravity(gravity_y: f32) -> Self {
        Self {
            gravity: vector![0.0, -gravity_y, 0.0],
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            player: None,
        }
    }

    /// Sets the gravity for the physics world
    pub fn set_gravity(&mut self, gravity_y: f32) {
        self.gravity = vector![0.0, -gravity_y, 0.0];
    }

    /// Steps the physics simulation forward by dt seconds
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Rebuild the query pipeline so ray casts see geometry added since the last step.
    pub fn refresh_queries(&mut self) {
        self.query_pipeline.update(&self.collider_set);
    }

    /// Adds a fixed box of level geometry centered at `position`
    pub fn add_static_box(&mut self, position: [f32; 3], size: [f32; 3]) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![position[0], position[1], position[2]])
            .build();
        let handle = self.rigid_body_set.insert(body);

        let collider = ColliderBuilder::cuboid(size[0] / 2.0, size[1] / 2.0, size[2] / 2.0)
            .collision_groups(InteractionGroups::new(GROUP_STATIC, Group::ALL))
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        handle
    }

    /// Spawns the dynamic player capsule. Rotation is locked against the solver;
    /// yaw is only changed through [`PhysicsWorld::rotate_player_yaw`].
    pub fn spawn_player(&mut self, position: [f32; 3], radius: f32, height: f32) -> RigidBodyHandle {
        if let Some(previous) = self.player.take() {
            self.remove_body(previous);
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![position[0], position[1], position[2]])
            .lock_rotations()
            .build();
        let handle = self.rigid_body_set.insert(body);

        // Total height = 2 * half_height + 2 * radius
        let half_height = (height - 2.0 * radius).max(0.0) / 2.0;
        let collider = ColliderBuilder::capsule_y(half_height, radius)
            .friction(0.0)
            .friction_combine_rule(CoefficientCombineRule::Min)
            .collision_groups(InteractionGroups::new(GROUP_CHARACTER, GROUP_STATIC))
            .build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);

        self.player = Some(handle);
        handle
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true,
        );
    }

    fn player_body(&self) -> Option<&RigidBody> {
        self.rigid_body_set.get(self.player?)
    }

    fn player_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(self.player?)
    }

    /// Gets the player's position
    pub fn player_position(&self) -> Option<[f32; 3]> {
        self.player_body().map(|body| {
            let pos = body.translation();
            [pos.x, pos.y, pos.z]
        })
    }

    /// Gets the player's linear velocity
    pub fn player_velocity(&self) -> Option<Vector3<f32>> {
        self.player_body().map(|body| *body.linvel())
    }

    /// Sets the player's linear velocity
    pub fn set_player_velocity(&mut self, velocity: Vector3<f32>) {
        if let Some(body) = self.player_body_mut() {
            body.set_linvel(velocity, true);
        }
    }

    /// Gets the player's orientation
    pub fn player_rotation(&self) -> Option<UnitQuaternion<f32>> {
        self.player_body().map(|body| *body.rotation())
    }

    /// Turns the player about +Y by `degrees` (positive turns right).
    pub fn rotate_player_yaw(&mut self, degrees: f32) {
        if let Some(body) = self.player_body_mut() {
            let turn = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), degrees.to_radians());
            let rotation = turn * *body.rotation();
            body.set_rotation(rotation, true);
        }
    }

    /// Right/forward axes of the player body
    pub fn player_basis(&self) -> BodyBasis {
        self.player_rotation()
            .map(|rot| basis_from_rotation(&rot))
            .unwrap_or_default()
    }

    /// Casts a ray downward from a position to detect ground
    /// Returns (hit_distance, hit_y) if ground is found within max_distance
    pub fn raycast_down(
        &self,
        origin: [f32; 3],
        max_distance: f32,
        exclude_body: Option<RigidBodyHandle>,
    ) -> Option<(f32, f32)> {
        let ray = Ray::new(
            point![origin[0], origin[1], origin[2]],
            vector![0.0, -1.0, 0.0],
        );

        let filter = if let Some(body_handle) = exclude_body {
            QueryFilter::default()
                .exclude_rigid_body(body_handle)
                .exclude_sensors()
        } else {
            QueryFilter::default().exclude_sensors()
        };

        if let Some((_, hit)) = self.query_pipeline.cast_ray(
            &self.rigid_body_set,
            &self.collider_set,
            &ray,
            max_distance,
            true, // solid
            filter,
        ) {
            let hit_point = ray.point_at(hit);
            Some((hit, hit_point.y))
        } else {
            None
        }
    }

    /// True if level geometry lies within `max_distance` below the player origin.
    pub fn player_grounded(&self, max_distance: f32) -> bool {
        let Some(origin) = self.player_position() else {
            return false;
        };
        self.raycast_down(origin, max_distance, self.player).is_some()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Body axes from an orientation: local +X is right, local +Z is forward.
pub fn basis_from_rotation(rotation: &UnitQuaternion<f32>) -> BodyBasis {
    BodyBasis {
        right: rotation * Vector3::x(),
        forward: rotation * Vector3::z(),
    }
}

/// The player body plus camera, seen through the controller's rig interface.
pub struct PlayerRig<'a> {
    pub world: &'a mut PhysicsWorld,
    pub camera: &'a mut CameraMount,
}

impl<'a> PlayerRig<'a> {
    pub fn new(world: &'a mut PhysicsWorld, camera: &'a mut CameraMount) -> Self {
        Self { world, camera }
    }
}

impl CharacterRig for PlayerRig<'_> {
    fn linear_velocity(&self) -> Vector3<f32> {
        self.world.player_velocity().unwrap_or_else(Vector3::zeros)
    }

    fn set_linear_velocity(&mut self, velocity: Vector3<f32>) {
        self.world.set_player_velocity(velocity);
    }

    fn gravity_y(&self) -> f32 {
        self.world.gravity.y
    }

    fn probe_ground(&self, max_distance: f32) -> bool {
        self.world.player_grounded(max_distance)
    }

    fn basis(&self) -> BodyBasis {
        self.world.player_basis()
    }

    fn rotate_yaw(&mut self, degrees: f32) {
        self.world.rotate_player_yaw(degrees);
    }

    fn set_camera_pitch(&mut self, degrees: f32) {
        self.camera.pitch_deg = degrees;
    }

    fn lock_pointer(&mut self) {
        self.camera.pointer_locked = true;
    }
}
