//! Orbit Controls
//!
//! A spherical-coordinate camera that circles a target point. Used for every
//! overview step of the tour. Each interaction axis (rotate, zoom, pan) can
//! be switched off independently, and the camera can spin on its own.
//!
//! # Coordinate System
//! - Azimuth: angle around +Y in radians, 0 looks from +Z toward the target
//! - Polar: angle from +Y in radians (0 = straight above)
//! - Distance: radius from the target
//! - Y is up

use std::f32::consts::{PI, TAU};

use glam::Vec3;

/// Minimum zoom distance.
const MIN_DISTANCE: f32 = 0.5;
/// Maximum zoom distance.
const MAX_DISTANCE: f32 = 1000.0;
/// Keeps the polar angle off the poles so look-at stays well defined.
const POLE_EPSILON: f32 = 1e-4;
/// Orbit sensitivity in radians per pixel.
const ROTATE_SENSITIVITY: f32 = 0.005;
/// Pan sensitivity, multiplied by distance for depth-proportional panning.
const PAN_SENSITIVITY: f32 = 0.002;

/// Orbit-style camera controls.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,

    pub auto_rotate: bool,
    /// 1.0 is one full revolution every 60 seconds
    pub auto_rotate_speed: f32,

    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,

    /// Polar clamp `(min, max)` in radians
    pub polar_limits: (f32, f32),
    /// Azimuth clamp `(min, max)` in radians, unbounded when `None`
    pub azimuth_limits: Option<(f32, f32)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 10.0,
            azimuth: 0.0,
            polar: PI / 3.0,
            auto_rotate: false,
            auto_rotate_speed: 1.0,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            polar_limits: (0.0, PI),
            azimuth_limits: None,
        }
    }
}

impl OrbitControls {
    /// Place the camera at `position` looking at `target`.
    pub fn from_placement(position: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            ..Default::default()
        };
        controls.set_position(position);
        controls
    }

    /// Re-derive the spherical coordinates from a world position.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.target;
        let distance = offset.length();
        if distance < f32::EPSILON {
            return;
        }
        self.distance = distance;
        self.polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        self.azimuth = offset.x.atan2(offset.z);
        self.clamp();
    }

    /// Camera position in world space.
    pub fn eye_position(&self) -> Vec3 {
        let sin_polar = self.polar.sin();
        self.target
            + Vec3::new(
                sin_polar * self.azimuth.sin(),
                self.polar.cos(),
                sin_polar * self.azimuth.cos(),
            ) * self.distance
    }

    /// Advance auto-rotation. Call once per frame.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate {
            self.azimuth -= TAU / 60.0 * self.auto_rotate_speed * dt;
            self.clamp();
        }
    }

    /// User drag in pixels. Ignored unless rotation is enabled.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enable_rotate {
            return;
        }
        self.azimuth -= dx * ROTATE_SENSITIVITY;
        self.polar -= dy * ROTATE_SENSITIVITY;
        self.clamp();
    }

    /// Multiply the distance by `factor` (< 1 moves closer). Ignored unless zoom is enabled.
    pub fn zoom(&mut self, factor: f32) {
        if !self.enable_zoom || factor <= 0.0 {
            return;
        }
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Slide target and camera sideways/up by a pixel delta. Ignored unless pan is enabled.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.enable_pan {
            return;
        }
        let forward = (self.target - self.eye_position()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward).normalize_or_zero();
        let scale = self.distance * PAN_SENSITIVITY;
        self.target += (-right * dx + up * dy) * scale;
    }

    fn clamp(&mut self) {
        self.azimuth = wrap_angle(self.azimuth);
        if let Some((min, max)) = self.azimuth_limits {
            self.azimuth = self.azimuth.clamp(min, max);
        }
        let (min_polar, max_polar) = self.polar_limits;
        self.polar = self
            .polar
            .clamp(min_polar, max_polar)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
    }
}

/// Wrap an angle into `[-π, π]`.
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
