//! Camera Tests - Projection Switching, Controls and the VR Rig
//!
//! Exercises the viewport as the sequencer drives it: camera intents in,
//! projection and controls out.

use glam::{Vec3, Vec4};

use archviz_engine::camera::{
    CameraIntent, Controls, OrbitControls, PointerLockControls, PresentationMode, Projection,
    ProjectionKind, RigKind, Viewport, VrRig,
};
use archviz_engine::physics::{ColliderMesh, CollisionField};

fn close(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    (a - b).length() < tolerance
}

// ============================================================================
// Viewport
// ============================================================================

#[test]
fn test_configure_replaces_projection_and_controls() {
    let mut viewport = Viewport::new(2.0);

    let ortho = CameraIntent {
        projection: ProjectionKind::Orthographic,
        position: Vec3::new(10.0, 10.0, 10.0),
        ..Default::default()
    };
    viewport.configure_camera(&ortho, PresentationMode::Desktop);
    assert_eq!(viewport.projection().kind(), ProjectionKind::Orthographic);
    assert_eq!(viewport.controls().kind(), RigKind::Orbit);

    let fixed = CameraIntent::fixed(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 40.0);
    viewport.configure_camera(&fixed, PresentationMode::Desktop);
    assert_eq!(viewport.projection().kind(), ProjectionKind::Perspective);
    assert_eq!(viewport.projection().fov_deg(), Some(40.0));
    assert_eq!(viewport.controls().kind(), RigKind::Fixed);
    assert_eq!(viewport.eye_position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_vr_places_rig_under_the_eye() {
    let mut viewport = Viewport::default();
    let intent = CameraIntent {
        rig: RigKind::FirstPerson,
        projection: ProjectionKind::Orthographic,
        position: Vec3::new(0.0, 1.6, 4.0),
        target: Vec3::new(0.0, 1.6, 0.0),
        ..Default::default()
    };
    viewport.configure_camera(&intent, PresentationMode::Vr);

    assert_eq!(viewport.projection().kind(), ProjectionKind::Perspective);
    let rig = viewport.rig();
    assert!(close(rig.position, Vec3::new(0.0, 0.0, 4.0), 1e-5));
    assert!(close(rig.eye_position(), intent.position, 1e-5));
    // Target is straight down -Z
    assert!(close(rig.camera_forward(), Vec3::NEG_Z, 1e-5));
}

#[test]
fn test_update_spins_only_auto_rotating_orbits() {
    let mut viewport = Viewport::default();
    let spinning = CameraIntent {
        auto_rotate: true,
        ..Default::default()
    };
    viewport.configure_camera(&spinning, PresentationMode::Desktop);
    let before = viewport.eye_position();
    viewport.update(1.0);
    assert!(!close(viewport.eye_position(), before, 1e-3));

    let fixed = CameraIntent::fixed(Vec3::new(0.0, 1.6, 3.0), Vec3::ZERO, 60.0);
    viewport.configure_camera(&fixed, PresentationMode::Desktop);
    let before = viewport.eye_position();
    viewport.update(1.0);
    assert_eq!(viewport.eye_position(), before);
}

#[test]
fn test_aspect_follows_resize() {
    let mut viewport = Viewport::new(1.0);
    viewport.set_aspect(2.0);
    viewport.set_aspect(0.0);
    match viewport.projection() {
        Projection::Perspective(p) => assert_eq!(p.aspect, 2.0),
        other => panic!("expected perspective, got {other:?}"),
    }
}

#[test]
fn test_view_projection_puts_target_in_front() {
    let mut viewport = Viewport::new(16.0 / 9.0);
    let intent = CameraIntent::fixed(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, 60.0);
    viewport.configure_camera(&intent, PresentationMode::Desktop);

    let clip = viewport.projection_matrix() * viewport.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    let ndc = clip.truncate() / clip.w;
    assert!(clip.w > 0.0);
    assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
    assert!((0.0..=1.0).contains(&ndc.z));
}

// ============================================================================
// Orbit
// ============================================================================

#[test]
fn test_auto_rotate_one_revolution_per_minute() {
    let mut orbit = OrbitControls::from_placement(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
    orbit.auto_rotate = true;
    let start = orbit.eye_position();

    for _ in 0..300 {
        orbit.update(0.1);
    }
    // Half a revolution: opposite side
    assert!(close(orbit.eye_position(), Vec3::new(0.0, 10.0, -20.0), 1e-2));

    for _ in 0..300 {
        orbit.update(0.1);
    }
    assert!(close(orbit.eye_position(), start, 1e-2));
}

#[test]
fn test_disabled_axes_ignore_user_input() {
    let mut orbit = OrbitControls::from_placement(Vec3::new(0.0, 10.0, 20.0), Vec3::ZERO);
    orbit.enable_rotate = false;
    orbit.enable_zoom = false;
    orbit.enable_pan = false;
    let before = orbit.clone();

    orbit.rotate(100.0, 50.0);
    orbit.zoom(0.5);
    orbit.pan(30.0, 30.0);
    assert_eq!(orbit, before);
}

#[test]
fn test_polar_clamp_from_intent() {
    let mut viewport = Viewport::default();
    let intent = CameraIntent {
        polar_range: [0.0, 85.0],
        ..Default::default()
    };
    viewport.configure_camera(&intent, PresentationMode::Desktop);

    let orbit = viewport.orbit_mut().unwrap();
    orbit.rotate(0.0, -10_000.0);
    assert!(orbit.polar <= 85f32.to_radians() + 1e-5);
    assert!(orbit.eye_position().y > 0.0);
}

// ============================================================================
// First person
// ============================================================================

#[test]
fn test_pointer_lock_pitch_is_clamped() {
    let mut controls = PointerLockControls::new();
    controls.apply_look_delta(0.0, -1_000_000.0);
    let (_, max) = controls.pitch_limits();
    assert_eq!(controls.pitch, max);
    assert!(max < 90f32.to_radians());
}

#[test]
fn test_relative_moves_stay_horizontal() {
    let mut controls = PointerLockControls::with_position(Vec3::new(0.0, 1.6, 0.0));
    controls.set_pitch(0.8);
    controls.move_forward(2.0);
    controls.move_right(1.0);

    assert!((controls.position.y - 1.6).abs() < 1e-6);
    assert!(close(controls.position, Vec3::new(1.0, 1.6, -2.0), 1e-5));
}

#[test]
fn test_first_person_intent_looks_at_target() {
    let mut viewport = Viewport::default();
    let intent = CameraIntent {
        rig: RigKind::FirstPerson,
        position: Vec3::new(0.0, 1.6, 4.0),
        target: Vec3::new(4.0, 1.6, 4.0),
        ..Default::default()
    };
    viewport.configure_camera(&intent, PresentationMode::Desktop);

    match viewport.controls() {
        Controls::FirstPerson(fp) => assert!(close(fp.forward(), Vec3::X, 1e-5)),
        other => panic!("expected first person, got {other:?}"),
    }
}

// ============================================================================
// VR rig
// ============================================================================

#[test]
fn test_rig_turn_rotates_forward() {
    let mut rig = VrRig::new(1.7);
    rig.turn(std::f32::consts::FRAC_PI_2);
    // Positive yaw turns left, toward -X
    assert!(close(rig.camera_forward(), Vec3::NEG_X, 1e-5));
    assert!(close(rig.eye_position(), Vec3::new(0.0, 1.7, 0.0), 1e-6));
}

// ============================================================================
// Collision field as the walkthrough sees it
// ============================================================================

#[test]
fn test_field_returns_nearest_hit() {
    let mut field = CollisionField::new();
    field.insert(ColliderMesh::floor(Vec3::ZERO, 10.0));
    field.insert(ColliderMesh::floor(Vec3::new(0.0, 1.0, 0.0), 1.0));

    let hit = field
        .raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, f32::INFINITY)
        .unwrap();
    assert!((hit.distance - 4.0).abs() < 1e-5);

    let far = field
        .raycast(Vec3::new(5.0, 5.0, 0.0), Vec3::NEG_Y, f32::INFINITY)
        .unwrap();
    assert!((far.distance - 5.0).abs() < 1e-5);

    assert!(field.raycast(Vec3::new(5.0, 5.0, 0.0), Vec3::NEG_Y, 2.0).is_none());
}
