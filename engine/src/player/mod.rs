//! Player Module
//!
//! First-person locomotion for the walkthrough.
//!
//! # Components
//!
//! - [`MovementStrategy`] - Per-frame movement against a [`crate::physics::CollisionField`]
//! - [`DesktopMovement`] - Keyboard capsule with gravity, jump and wall push-back
//! - [`VrMovement`] - Thumbstick rig locomotion with smooth turning
//! - [`PhysicsConfig`] - Desktop and VR constants

pub mod desktop;
pub mod movement;
pub mod vr;

pub use desktop::DesktopMovement;
pub use movement::{
    MovementConfig, MovementStrategy, PhysicsConfig, PlayerPose, VrMovementConfig, WALL_PROBES,
};
pub use vr::VrMovement;
