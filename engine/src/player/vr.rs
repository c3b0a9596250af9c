//! VR Movement
//!
//! Thumbstick locomotion for the walkthrough in VR. The subject is the
//! [`VrRig`] that carries the head camera: the left stick moves the rig
//! relative to where the user is looking, the right stick turns it.
//! There is no jump.
//!
//! Probes are taken near the floor rather than from the eye: the ground
//! probe starts just above the rig origin and walls are probed at chest
//! height.

use glam::{Vec2, Vec3};

use super::movement::{
    MovementConfig, MovementStrategy, PlayerPose, VrMovementConfig, WALL_PROBES, damp,
};
use crate::camera::VrRig;
use crate::input::XrInput;
use crate::physics::CollisionField;

/// Dual-controller movement strategy.
#[derive(Debug, Clone, Default)]
pub struct VrMovement {
    config: VrMovementConfig,
    /// Gravity, radius, friction and sprint multiplier are shared with desktop
    physics: MovementConfig,
    pose: PlayerPose,
}

impl VrMovement {
    pub fn new(config: VrMovementConfig, physics: MovementConfig) -> Self {
        Self {
            config,
            physics,
            pose: PlayerPose::default(),
        }
    }

    pub fn config(&self) -> &VrMovementConfig {
        &self.config
    }

    pub fn is_grounded(&self) -> bool {
        self.pose.grounded
    }

    fn apply_gravity(&mut self, dt: f32, field: &CollisionField, rig: &mut VrRig) {
        let probe = rig.position + Vec3::Y * self.config.ground_probe_offset;
        let floor = field.raycast(probe, Vec3::NEG_Y, f32::INFINITY);

        match floor {
            Some(hit) if hit.distance < self.config.ground_snap => {
                self.pose.grounded = true;
                self.pose.vertical_velocity = 0.0;
                rig.position.y = hit.point.y;
            }
            _ => {
                self.pose.grounded = false;
                self.pose.vertical_velocity += self.physics.gravity * dt;
                rig.position.y += self.pose.vertical_velocity * dt;

                // Land instead of dropping through a floor seen this frame
                if let Some(hit) = floor.filter(|hit| rig.position.y < hit.point.y) {
                    rig.position.y = hit.point.y;
                    self.pose.vertical_velocity = 0.0;
                    self.pose.grounded = true;
                }
            }
        }
    }

    fn apply_turn(&self, dt: f32, input: &XrInput, rig: &mut VrRig) {
        if let Some(stick) = input.turn_controller().map(|c| c.thumbstick) {
            if stick.x.abs() > self.config.stick_deadzone {
                rig.turn(-stick.x * self.config.turn_speed * dt);
            }
        }
    }

    fn apply_stick(&mut self, dt: f32, input: &XrInput, rig: &VrRig) {
        self.pose.horizontal_velocity = damp(self.pose.horizontal_velocity, self.physics.friction, dt);

        let Some(controller) = input.movement_controller() else {
            return;
        };
        let stick = controller.thumbstick;
        let deadzone = self.config.stick_deadzone;
        if stick.x.abs() <= deadzone && stick.y.abs() <= deadzone {
            return;
        }

        let mut forward = rig.camera_forward();
        forward.y = 0.0;
        let forward = forward.normalize_or_zero();
        let right = Vec3::new(-forward.z, 0.0, forward.x);

        // Stick y is negative when pushed away from the user
        let wish = forward * -stick.y + right * stick.x;

        let mut speed = self.config.move_speed;
        if controller.trigger > self.config.sprint_trigger_threshold {
            speed *= self.physics.sprint_multiplier;
        }
        self.pose.horizontal_velocity += Vec2::new(wish.x, wish.z) * speed * dt;
    }

    fn resolve_walls(&mut self, field: &CollisionField, rig: &mut VrRig) {
        let radius = self.physics.player_radius;
        let origin = rig.position + Vec3::Y * self.config.chest_height;

        for dir in WALL_PROBES {
            let Some(hit) = field.raycast(origin, dir, radius) else {
                continue;
            };
            if hit.distance >= radius {
                continue;
            }
            rig.position -= dir * (radius - hit.distance + self.physics.wall_epsilon);
            if dir.x != 0.0 {
                self.pose.horizontal_velocity.x = 0.0;
            } else {
                self.pose.horizontal_velocity.y = 0.0;
            }
        }
    }
}

impl MovementStrategy for VrMovement {
    type Input = XrInput;
    type Subject = VrRig;

    fn update(&mut self, dt: f32, input: &mut XrInput, field: &CollisionField, rig: &mut VrRig) {
        rig.head_rotation = input.head_rotation;

        self.apply_gravity(dt, field, rig);
        self.apply_turn(dt, input, rig);
        self.apply_stick(dt, input, rig);

        let v = self.pose.horizontal_velocity;
        rig.position += Vec3::new(v.x, 0.0, v.y) * dt;

        self.resolve_walls(field, rig);
        self.pose.position = rig.position;
    }

    fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    fn reset(&mut self) {
        self.pose = PlayerPose::default();
    }
}
