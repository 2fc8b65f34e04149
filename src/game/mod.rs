//! Movement controller, its physics collaborator and the host scheduler.

pub mod constants;
pub mod controller;
pub mod input;
pub mod look;
pub mod physics;
pub mod rig;
pub mod script;
pub mod simulation;

pub use controller::{FrameReport, MotionEvent, MotionState, PlayerController};
pub use input::{Button, ButtonState, InputFrame};
pub use physics::{CameraMount, PhysicsWorld, PlayerRig};
pub use rig::{BodyBasis, CharacterRig, SpeedReadout};
pub use script::InputScript;
pub use simulation::Simulation;
