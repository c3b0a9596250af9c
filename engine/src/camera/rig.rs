//! VR camera rig.
//!
//! In VR the head camera is parented to a movable rig. Locomotion moves and
//! turns the rig; the headset pose is applied on top of it.

use glam::{Mat4, Quat, Vec3};

/// Default standing eye height above the rig origin.
pub const DEFAULT_EYE_HEIGHT: f32 = 1.6;

#[derive(Debug, Clone, PartialEq)]
pub struct VrRig {
    /// Rig origin (the user's feet)
    pub position: Vec3,
    /// Rotation about +Y in radians; 0 faces -Z
    pub yaw: f32,
    /// Headset orientation relative to the rig
    pub head_rotation: Quat,
    pub eye_height: f32,
}

impl Default for VrRig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            head_rotation: Quat::IDENTITY,
            eye_height: DEFAULT_EYE_HEIGHT,
        }
    }
}

impl VrRig {
    pub fn new(eye_height: f32) -> Self {
        Self {
            eye_height,
            ..Default::default()
        }
    }

    /// Put the eyes at `eye` with the rig facing `target` horizontally.
    pub fn place(&mut self, eye: Vec3, target: Vec3) {
        self.position = eye - Vec3::Y * self.eye_height;
        self.face(target);
    }

    /// Turn the rig so it faces `target` in the ground plane.
    pub fn face(&mut self, target: Vec3) {
        let d = target - self.eye_position();
        if d.x.abs() > f32::EPSILON || d.z.abs() > f32::EPSILON {
            self.yaw = (-d.x).atan2(-d.z);
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Rotate about the vertical axis.
    pub fn turn(&mut self, radians: f32) {
        self.yaw += radians;
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.eye_height
    }

    /// World orientation of the head camera.
    pub fn camera_rotation(&self) -> Quat {
        self.rotation() * self.head_rotation
    }

    /// Head camera look direction in world space.
    pub fn camera_forward(&self) -> Vec3 {
        self.camera_rotation() * Vec3::NEG_Z
    }

    pub fn camera_right(&self) -> Vec3 {
        self.camera_rotation() * Vec3::X
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.camera_rotation(), self.eye_position()).inverse()
    }
}
