//! Shared movement types
//!
//! Both locomotion modes advance a [`PlayerPose`] once per frame and resolve
//! it against the static [`CollisionField`]. They differ in input source,
//! subject (pointer-lock camera vs. VR rig) and probe geometry, so each is a
//! separate [`MovementStrategy`] implementation.
//!
//! # Physics Model (desktop defaults)
//!
//! - Player height: 1.6 m, radius: 0.35 m
//! - Gravity: -30 m/s^2, jump impulse: 10 m/s
//! - Base speed: 40, sprint multiplier: 2.0, friction: 10 /s
//!
//! With friction `f` and speed `s` the horizontal speed settles at `s / f`.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::physics::CollisionField;

/// Cardinal directions probed for walls, in resolution order.
pub const WALL_PROBES: [Vec3; 4] = [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z];

/// Simulated state of the player for one locomotion mode.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerPose {
    /// Desktop: eye position. VR: rig origin.
    pub position: Vec3,
    /// Positive is upward
    pub vertical_velocity: f32,
    /// Desktop: `x` along right, `y` along forward, in the inverted sign
    /// convention of the move primitives. VR: world X/Z.
    pub horizontal_velocity: Vec2,
    pub grounded: bool,
}

impl PlayerPose {
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity.length()
    }
}

/// Per-frame locomotion against static collision geometry.
pub trait MovementStrategy {
    /// Input consumed each frame
    type Input;
    /// What the strategy moves (a camera or a rig)
    type Subject;

    /// Advance one frame. The collision field is never modified.
    fn update(
        &mut self,
        dt: f32,
        input: &mut Self::Input,
        field: &CollisionField,
        subject: &mut Self::Subject,
    );

    fn pose(&self) -> &PlayerPose;

    /// Drop all velocity and grounded state.
    fn reset(&mut self);
}

/// Desktop physics constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub player_height: f32,
    pub player_radius: f32,
    /// Negative: pulls downward
    pub gravity: f32,
    pub jump_impulse: f32,
    pub base_move_speed: f32,
    pub sprint_multiplier: f32,
    pub friction: f32,
    /// Extra probe length beyond `player_height` that still counts as grounded
    pub ground_tolerance: f32,
    /// Added to wall push-back so the player ends up just outside `player_radius`
    pub wall_epsilon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            player_height: 1.6,
            player_radius: 0.35,
            gravity: -30.0,
            jump_impulse: 10.0,
            base_move_speed: 40.0,
            sprint_multiplier: 2.0,
            friction: 10.0,
            ground_tolerance: 0.1,
            wall_epsilon: 0.01,
        }
    }
}

/// VR locomotion constants. Gravity, radius and friction come from [`MovementConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VrMovementConfig {
    /// Ground probe starts this far above the rig origin
    pub ground_probe_offset: f32,
    /// Grounded when the floor is closer than this to the probe origin
    pub ground_snap: f32,
    /// Wall probes start this far above the rig origin
    pub chest_height: f32,
    pub move_speed: f32,
    /// Radians per second at full stick deflection
    pub turn_speed: f32,
    pub stick_deadzone: f32,
    pub sprint_trigger_threshold: f32,
    pub eye_height: f32,
}

impl Default for VrMovementConfig {
    fn default() -> Self {
        Self {
            ground_probe_offset: 0.1,
            ground_snap: 0.15,
            chest_height: 1.0,
            move_speed: 20.0,
            turn_speed: 2.0,
            stick_deadzone: 0.1,
            sprint_trigger_threshold: 0.5,
            eye_height: 1.6,
        }
    }
}

/// All physics constants, loadable from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub desktop: MovementConfig,
    pub vr: VrMovementConfig,
}

/// Damp a velocity by `friction` for `dt` seconds.
#[inline]
pub(crate) fn damp(velocity: Vec2, friction: f32, dt: f32) -> Vec2 {
    velocity - velocity * friction * dt
}
