//! Pointer-Lock Controls
//!
//! First-person look for the walkthrough. While the pointer is captured,
//! mouse movement rotates the camera directly with no smoothing, and the
//! desktop movement strategy translates the camera through the relative
//! move primitives.
//!
//! Key features:
//! - Mouse delta → yaw/pitch at 0.002 rad/pixel by default
//! - Pitch clamped to ±89 degrees
//! - `move_forward` / `move_right` stay in the horizontal plane

use glam::Vec3;

/// Pitch limit constant: -89 degrees in radians
const PITCH_LIMIT_MIN: f32 = -89.0 * std::f32::consts::PI / 180.0;
/// Pitch limit constant: +89 degrees in radians
const PITCH_LIMIT_MAX: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// First-person camera driven by a captured pointer.
///
/// ## Usage
/// ```rust,ignore
/// let mut controls = PointerLockControls::with_position(Vec3::new(0.0, 1.6, 5.0));
/// controls.apply_look_delta(mouse_dx, mouse_dy);
/// controls.move_forward(0.1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PointerLockControls {
    /// Eye position in world space
    pub position: Vec3,
    /// Horizontal angle (radians), 0 looks toward -Z
    pub yaw: f32,
    /// Vertical angle (radians), clamped to the pitch limits
    pub pitch: f32,
    /// Radians per pixel of mouse movement
    pub sensitivity: f32,
    pitch_limits: (f32, f32),
}

impl Default for PointerLockControls {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: 0.002,
            pitch_limits: (PITCH_LIMIT_MIN, PITCH_LIMIT_MAX),
        }
    }
}

impl PointerLockControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the pitch (radians), clamped to the limits.
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.pitch_limits.0, self.pitch_limits.1);
    }

    pub fn pitch_limits(&self) -> (f32, f32) {
        self.pitch_limits
    }

    /// Rotate by a mouse delta in pixels.
    ///
    /// Positive `dx` turns right, positive `dy` (mouse moved down) looks down.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.set_pitch(self.pitch - dy * self.sensitivity);
    }

    /// Look direction including pitch.
    ///
    /// When yaw=0 and pitch=0 the camera looks toward -Z.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Look direction flattened onto the ground plane.
    #[inline]
    pub fn horizontal_forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Right vector in the ground plane.
    #[inline]
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Move along the horizontal look direction. Negative moves backward.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.horizontal_forward() * distance;
    }

    /// Strafe along the horizontal right vector. Negative moves left.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Point the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        let distance = to_target.length();

        if distance > 0.001 {
            self.yaw = to_target.x.atan2(-to_target.z);
            self.set_pitch((to_target.y / distance).asin());
        }
    }

    pub fn view_matrix(&self) -> glam::Mat4 {
        glam::Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let controls = PointerLockControls::new();
        assert_eq!(controls.position, Vec3::ZERO);
        assert_eq!(controls.sensitivity, 0.002);
        let limit = 89.0_f32.to_radians();
        assert!((controls.pitch_limits().1 - limit).abs() < 1e-4);
    }

    #[test]
    fn test_look_delta() {
        let mut controls = PointerLockControls::new();
        controls.apply_look_delta(100.0, 0.0);
        assert!((controls.yaw - 0.2).abs() < 1e-4);

        controls.apply_look_delta(0.0, 100.0);
        assert!((controls.pitch + 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut controls = PointerLockControls::new();
        controls.apply_look_delta(0.0, -100_000.0);
        assert!((controls.pitch - PITCH_LIMIT_MAX).abs() < 1e-4);
        controls.apply_look_delta(0.0, 100_000.0);
        assert!((controls.pitch - PITCH_LIMIT_MIN).abs() < 1e-4);
    }

    #[test]
    fn test_move_forward_ignores_pitch() {
        let mut controls = PointerLockControls::with_position(Vec3::new(0.0, 1.6, 0.0));
        controls.set_pitch(0.8);
        controls.move_forward(2.0);
        assert!((controls.position.y - 1.6).abs() < 1e-6);
        assert!((controls.position.z + 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_move_right_is_perpendicular() {
        let mut controls = PointerLockControls::new();
        controls.yaw = 0.7;
        assert!(controls.right().dot(controls.horizontal_forward()).abs() < 1e-6);

        controls.move_right(1.0);
        assert!((controls.position - controls.right()).length() < 1e-6);
    }

    #[test]
    fn test_right_at_zero_yaw_is_plus_x() {
        let controls = PointerLockControls::new();
        assert!((controls.right() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_look_at() {
        let mut controls = PointerLockControls::with_position(Vec3::new(0.0, 0.0, 10.0));
        controls.look_at(Vec3::new(10.0, 0.0, 10.0));
        let forward = controls.forward();
        assert!((forward - Vec3::X).length() < 1e-4);
    }

    #[test]
    fn test_direction_vectors_orthonormal() {
        let mut controls = PointerLockControls::new();
        controls.apply_look_delta(120.0, 45.0);
        let (f, r, u) = (controls.forward(), controls.right(), controls.up());
        assert!(f.dot(r).abs() < 1e-4);
        assert!(f.dot(u).abs() < 1e-4);
        assert!((u.length() - 1.0).abs() < 1e-4);
    }
}
