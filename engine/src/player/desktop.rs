//! Desktop Movement
//!
//! Keyboard locomotion for the walkthrough while pointer capture is engaged.
//! The player is a vertical capsule whose eye sits at the pointer-lock
//! camera position. Every frame runs, in this order:
//!
//! 1. ground probe straight down from the eye
//! 2. vertical integration (jump consumed only while grounded, floor
//!    penetration pushed out)
//! 3. apply vertical velocity
//! 4. friction damping
//! 5. input direction
//! 6. horizontal acceleration
//! 7. relative move through the camera
//! 8. four-way wall push-back at half height
//! 9. final ground snap
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut movement = DesktopMovement::new(MovementConfig::default());
//! movement.set_sprint(input.sprint);
//! movement.update(dt, &mut input, &field, &mut controls);
//! ```

use glam::{Vec2, Vec3};

use super::movement::{MovementConfig, MovementStrategy, PlayerPose, WALL_PROBES, damp};
use crate::camera::PointerLockControls;
use crate::input::InputState;
use crate::physics::CollisionField;

/// Keyboard-and-mouse movement strategy.
#[derive(Debug, Clone)]
pub struct DesktopMovement {
    config: MovementConfig,
    pose: PlayerPose,
    /// Base or sprint speed, switched on sprint key down/up
    current_speed: f32,
}

impl Default for DesktopMovement {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl DesktopMovement {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            config,
            pose: PlayerPose::default(),
            current_speed: config.base_move_speed,
        }
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    pub fn is_grounded(&self) -> bool {
        self.pose.grounded
    }

    /// Sprint key went down (`true`) or up (`false`).
    pub fn set_sprint(&mut self, held: bool) {
        self.current_speed = if held {
            self.config.base_move_speed * self.config.sprint_multiplier
        } else {
            self.config.base_move_speed
        };
    }

    /// Distance from the eye to the floor below, if any.
    fn probe_floor(&self, field: &CollisionField, eye: Vec3) -> Option<f32> {
        field
            .raycast(eye, Vec3::NEG_Y, f32::INFINITY)
            .map(|hit| hit.distance)
    }

    /// Push the capsule out of any wall closer than the radius.
    ///
    /// All four directions are checked from the same origin; each hit zeroes
    /// the velocity component along its axis.
    fn resolve_walls(&mut self, field: &CollisionField, controls: &mut PointerLockControls) {
        let radius = self.config.player_radius;
        let origin = controls.position - Vec3::Y * (self.config.player_height * 0.5);

        for dir in WALL_PROBES {
            let Some(hit) = field.raycast(origin, dir, radius) else {
                continue;
            };
            if hit.distance >= radius {
                continue;
            }

            let push = radius - hit.distance + self.config.wall_epsilon;
            controls.position -= dir * push;

            // Velocity is stored along the camera's right/forward axes
            let right = controls.right();
            let forward = controls.horizontal_forward();
            let mut world = right * self.pose.horizontal_velocity.x
                + forward * self.pose.horizontal_velocity.y;
            if dir.x != 0.0 {
                world.x = 0.0;
            } else {
                world.z = 0.0;
            }
            self.pose.horizontal_velocity = Vec2::new(world.dot(right), world.dot(forward));
        }
    }
}

impl MovementStrategy for DesktopMovement {
    type Input = InputState;
    type Subject = PointerLockControls;

    fn update(
        &mut self,
        dt: f32,
        input: &mut InputState,
        field: &CollisionField,
        controls: &mut PointerLockControls,
    ) {
        let height = self.config.player_height;
        let reach = height + self.config.ground_tolerance;

        let floor = self.probe_floor(field, controls.position);
        self.pose.grounded = floor.is_some_and(|d| d < reach);

        if self.pose.grounded {
            self.pose.vertical_velocity = self.pose.vertical_velocity.max(0.0);
            if input.take_jump() {
                self.pose.vertical_velocity = self.config.jump_impulse;
            }
            if let Some(distance) = floor.filter(|&d| d < height) {
                controls.position.y += height - distance;
            }
        } else {
            self.pose.vertical_velocity += self.config.gravity * dt;
        }

        controls.position.y += self.pose.vertical_velocity * dt;

        self.pose.horizontal_velocity = damp(self.pose.horizontal_velocity, self.config.friction, dt);

        let direction = input.direction();
        self.pose.horizontal_velocity -= direction * self.current_speed * dt;

        controls.move_right(-self.pose.horizontal_velocity.x * dt);
        controls.move_forward(-self.pose.horizontal_velocity.y * dt);

        self.resolve_walls(field, controls);

        match field.raycast(controls.position, Vec3::NEG_Y, f32::INFINITY) {
            Some(hit) if hit.distance < reach => {
                self.pose.grounded = true;
                if hit.distance < height {
                    controls.position.y = hit.point.y + height;
                    if self.pose.vertical_velocity < 0.0 {
                        self.pose.vertical_velocity = 0.0;
                    }
                }
            }
            _ => self.pose.grounded = false,
        }

        self.pose.position = controls.position;
    }

    fn pose(&self) -> &PlayerPose {
        &self.pose
    }

    fn reset(&mut self) {
        self.pose = PlayerPose::default();
        self.current_speed = self.config.base_move_speed;
    }
}
