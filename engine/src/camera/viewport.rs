//! Viewport Module
//!
//! Owns the active projection and the interactive controls bound to it.
//! A scene step describes the camera it wants with a [`CameraIntent`];
//! [`Viewport::configure_camera`] swaps projection and controls together so
//! there is never a frame with one step's projection and another's controls.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::fps_controller::PointerLockControls;
use super::orbit::OrbitControls;
use super::projection::{Projection, ProjectionKind};
use super::rig::VrRig;

/// Desktop (pointer capture) or VR (rig + tracked controllers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    #[default]
    Desktop,
    Vr,
}

/// Which interactive controller a camera intent binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigKind {
    #[default]
    Orbit,
    Fixed,
    FirstPerson,
}

/// Declarative camera configuration for one scene step or camera stop.
///
/// Angles are stored in degrees so catalog files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraIntent {
    pub rig: RigKind,
    pub projection: ProjectionKind,
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees (perspective only)
    pub fov: f32,
    /// Orthographic zoom
    pub zoom: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    /// Polar clamp in degrees from +Y
    pub polar_range: [f32; 2],
    /// Azimuth clamp in degrees, unbounded when absent
    pub azimuth_range: Option<[f32; 2]>,
}

impl Default for CameraIntent {
    fn default() -> Self {
        Self {
            rig: RigKind::Orbit,
            projection: ProjectionKind::Perspective,
            position: Vec3::new(0.0, 20.0, 40.0),
            target: Vec3::ZERO,
            fov: 50.0,
            zoom: 1.0,
            auto_rotate: false,
            auto_rotate_speed: 1.0,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            polar_range: [0.0, 180.0],
            azimuth_range: None,
        }
    }
}

impl CameraIntent {
    /// A fixed perspective placement, as used by camera stops.
    pub fn fixed(position: Vec3, target: Vec3, fov: f32) -> Self {
        Self {
            rig: RigKind::Fixed,
            position,
            target,
            fov,
            enable_rotate: false,
            enable_zoom: false,
            enable_pan: false,
            ..Default::default()
        }
    }

    fn orbit_controls(&self) -> OrbitControls {
        let mut orbit = OrbitControls::from_placement(self.position, self.target);
        orbit.auto_rotate = self.auto_rotate;
        orbit.auto_rotate_speed = self.auto_rotate_speed;
        orbit.enable_rotate = self.enable_rotate;
        orbit.enable_zoom = self.enable_zoom;
        orbit.enable_pan = self.enable_pan;
        orbit.polar_limits = (
            self.polar_range[0].to_radians(),
            self.polar_range[1].to_radians(),
        );
        orbit.azimuth_limits = self
            .azimuth_range
            .map(|[min, max]| (min.to_radians(), max.to_radians()));
        // Re-derive with the limits in place
        orbit.set_position(self.position);
        orbit
    }
}

/// The interactive controller bound to the active projection.
#[derive(Debug, Clone, PartialEq)]
pub enum Controls {
    Orbit(OrbitControls),
    Fixed { position: Vec3, target: Vec3 },
    FirstPerson(PointerLockControls),
}

impl Controls {
    pub fn kind(&self) -> RigKind {
        match self {
            Controls::Orbit(_) => RigKind::Orbit,
            Controls::Fixed { .. } => RigKind::Fixed,
            Controls::FirstPerson(_) => RigKind::FirstPerson,
        }
    }

    pub fn eye_position(&self) -> Vec3 {
        match self {
            Controls::Orbit(orbit) => orbit.eye_position(),
            Controls::Fixed { position, .. } => *position,
            Controls::FirstPerson(fp) => fp.position,
        }
    }

    fn view_matrix(&self) -> Mat4 {
        match self {
            Controls::Orbit(orbit) => Mat4::look_at_rh(orbit.eye_position(), orbit.target, Vec3::Y),
            Controls::Fixed { position, target } => Mat4::look_at_rh(*position, *target, Vec3::Y),
            Controls::FirstPerson(fp) => fp.view_matrix(),
        }
    }
}

/// Camera state for the whole viewer.
#[derive(Debug, Clone)]
pub struct Viewport {
    projection: Projection,
    controls: Controls,
    mode: PresentationMode,
    rig: VrRig,
    aspect: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

impl Viewport {
    pub fn new(aspect: f32) -> Self {
        let intent = CameraIntent::default();
        Self {
            projection: Projection::perspective(intent.fov, aspect),
            controls: Controls::Orbit(intent.orbit_controls()),
            mode: PresentationMode::Desktop,
            rig: VrRig::default(),
            aspect,
        }
    }

    /// Replace projection and controls from an intent.
    ///
    /// VR always renders in perspective; the rig is moved so the head sits
    /// at the intent position facing its target.
    pub fn configure_camera(&mut self, intent: &CameraIntent, mode: PresentationMode) {
        let projection = match (mode, intent.projection) {
            (PresentationMode::Desktop, ProjectionKind::Orthographic) => {
                Projection::orthographic(intent.zoom, self.aspect)
            }
            _ => Projection::perspective(intent.fov, self.aspect),
        };

        let controls = match intent.rig {
            RigKind::Orbit => Controls::Orbit(intent.orbit_controls()),
            RigKind::Fixed => Controls::Fixed {
                position: intent.position,
                target: intent.target,
            },
            RigKind::FirstPerson => {
                let mut fp = PointerLockControls::with_position(intent.position);
                fp.look_at(intent.target);
                Controls::FirstPerson(fp)
            }
        };

        if mode == PresentationMode::Vr {
            self.rig.place(intent.position, intent.target);
        }

        log::debug!(
            "camera configured: {:?} {:?} at {} ({:?})",
            controls.kind(),
            projection.kind(),
            intent.position,
            mode
        );
        self.projection = projection;
        self.controls = controls;
        self.mode = mode;
    }

    /// Per-frame controller update (auto-rotation).
    pub fn update(&mut self, dt: f32) {
        if let Controls::Orbit(orbit) = &mut self.controls {
            orbit.update(dt);
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
            self.projection.set_aspect(aspect);
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    pub fn orbit_mut(&mut self) -> Option<&mut OrbitControls> {
        match &mut self.controls {
            Controls::Orbit(orbit) => Some(orbit),
            _ => None,
        }
    }

    pub fn first_person(&self) -> Option<&PointerLockControls> {
        match &self.controls {
            Controls::FirstPerson(fp) => Some(fp),
            _ => None,
        }
    }

    pub fn first_person_mut(&mut self) -> Option<&mut PointerLockControls> {
        match &mut self.controls {
            Controls::FirstPerson(fp) => Some(fp),
            _ => None,
        }
    }

    pub fn rig(&self) -> &VrRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut VrRig {
        &mut self.rig
    }

    pub fn eye_position(&self) -> Vec3 {
        match self.mode {
            PresentationMode::Vr => self.rig.eye_position(),
            PresentationMode::Desktop => self.controls.eye_position(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self.mode {
            PresentationMode::Vr => self.rig.view_matrix(),
            PresentationMode::Desktop => self.controls.view_matrix(),
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overview() -> CameraIntent {
        CameraIntent {
            projection: ProjectionKind::Orthographic,
            position: Vec3::new(60.0, 60.0, 60.0),
            zoom: 1.5,
            auto_rotate: true,
            enable_rotate: false,
            enable_zoom: false,
            enable_pan: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_configure_orthographic_orbit() {
        let mut viewport = Viewport::new(1.0);
        viewport.configure_camera(&overview(), PresentationMode::Desktop);

        assert_eq!(viewport.projection().kind(), ProjectionKind::Orthographic);
        match viewport.controls() {
            Controls::Orbit(orbit) => {
                assert!(orbit.auto_rotate);
                assert!(!orbit.enable_rotate && !orbit.enable_zoom && !orbit.enable_pan);
            }
            other => panic!("expected orbit controls, got {other:?}"),
        }
    }

    #[test]
    fn test_vr_forces_perspective_and_places_rig() {
        let mut viewport = Viewport::new(1.0);
        viewport.configure_camera(&overview(), PresentationMode::Vr);

        assert_eq!(viewport.projection().kind(), ProjectionKind::Perspective);
        assert!((viewport.eye_position() - Vec3::new(60.0, 60.0, 60.0)).length() < 1e-4);
        assert!((viewport.rig().position.y - (60.0 - viewport.rig().eye_height)).abs() < 1e-4);
    }

    #[test]
    fn test_first_person_faces_target() {
        let mut viewport = Viewport::new(1.0);
        let intent = CameraIntent {
            rig: RigKind::FirstPerson,
            position: Vec3::new(0.0, 1.6, 5.0),
            target: Vec3::new(0.0, 1.6, 0.0),
            ..Default::default()
        };
        viewport.configure_camera(&intent, PresentationMode::Desktop);

        let fp = viewport.first_person().unwrap();
        assert!((fp.forward() - Vec3::NEG_Z).length() < 1e-4);
        assert!(viewport.orbit_mut().is_none());
    }

    #[test]
    fn test_fixed_camera_uses_intent_fov() {
        let mut viewport = Viewport::new(1.0);
        let intent = CameraIntent::fixed(Vec3::new(1.0, 1.5, 2.0), Vec3::ZERO, 72.0);
        viewport.configure_camera(&intent, PresentationMode::Desktop);

        assert_eq!(viewport.projection().fov_deg(), Some(72.0));
        assert_eq!(viewport.controls().kind(), RigKind::Fixed);
        assert_eq!(viewport.eye_position(), Vec3::new(1.0, 1.5, 2.0));
    }

    #[test]
    fn test_update_auto_rotates_orbit_only() {
        let mut viewport = Viewport::new(1.0);
        viewport.configure_camera(&overview(), PresentationMode::Desktop);
        let before = viewport.eye_position();
        viewport.update(5.0);
        assert!(viewport.eye_position().distance(before) > 0.1);

        viewport.configure_camera(&CameraIntent::fixed(before, Vec3::ZERO, 50.0), PresentationMode::Desktop);
        viewport.update(5.0);
        assert_eq!(viewport.eye_position(), before);
    }

    #[test]
    fn test_intent_deserializes_with_defaults() {
        let intent: CameraIntent =
            serde_json::from_str(r#"{"rig":"fixed","position":[1,2,3],"fov":65}"#).unwrap();
        assert_eq!(intent.rig, RigKind::Fixed);
        assert_eq!(intent.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(intent.fov, 65.0);
        assert_eq!(intent.zoom, 1.0);
    }
}
