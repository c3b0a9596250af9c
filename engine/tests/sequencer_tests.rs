//! Sequencer Tests - Step Order, Restart and Variants
//!
//! Drives the full six-step tour against the in-memory asset stage.

use glam::Vec3;
use pollster::block_on;

use archviz_engine::camera::{Controls, PresentationMode, ProjectionKind, RigKind, Viewport};
use archviz_engine::tour::config::catalog::{
    CITY, COLLIDER, GHOST, INTERIOR, INTERIOR_SOLO, KOPUK, M1, M3, M4, M5, SECTION,
};
use archviz_engine::tour::config::{PanelPair, SceneCatalog};
use archviz_engine::tour::{
    AssetError, AssetStage, MemoryAssetStage, SequenceError, Sequencer, StepOutcome, UiState,
};

fn sequencer() -> Sequencer<MemoryAssetStage, UiState> {
    Sequencer::new(
        SceneCatalog::default(),
        MemoryAssetStage::demo(),
        UiState::new(),
        Viewport::default(),
    )
}

fn advance_to(sequencer: &mut Sequencer<MemoryAssetStage, UiState>, step: usize) {
    for expected in 0..=step {
        let outcome = block_on(sequencer.advance()).unwrap();
        assert_eq!(outcome, StepOutcome::Entered(expected));
    }
}

fn ids(indices: &[usize]) -> Vec<String> {
    let catalog = SceneCatalog::default();
    indices.iter().map(|&i| catalog.models[i].id.clone()).collect()
}

fn loaded(sequencer: &Sequencer<MemoryAssetStage, UiState>) -> Vec<String> {
    let mut ids = sequencer.assets().loaded_model_ids();
    ids.sort();
    ids
}

fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}

// ============================================================================
// Sequence order
// ============================================================================

#[test]
fn test_each_step_loads_exactly_its_models() {
    let expected: [&[usize]; 6] = [
        &[CITY, KOPUK],
        &[CITY, KOPUK],
        &[M1, M3, M4, M5],
        &[GHOST, SECTION],
        &[INTERIOR_SOLO],
        &[INTERIOR],
    ];

    for (step, models) in expected.iter().enumerate() {
        let mut sequencer = sequencer();
        advance_to(&mut sequencer, step);
        assert_eq!(sequencer.current_step_index(), step as i32);
        assert_eq!(loaded(&sequencer), sorted(ids(models)), "step {step}");
    }
}

#[test]
fn test_concept_step_reuses_models() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 0);
    let requests_before = sequencer.assets().requests().len();
    let unloads_before = sequencer.assets().unload_count();

    block_on(sequencer.advance()).unwrap();
    assert_eq!(sequencer.assets().requests().len(), requests_before);
    assert_eq!(sequencer.assets().unload_count(), unloads_before);
}

#[test]
fn test_only_walkthrough_has_collision() {
    let mut sequencer = sequencer();
    for step in 0..6 {
        block_on(sequencer.advance()).unwrap();
        let field = sequencer.assets().collision_field();
        assert_eq!(field.is_empty(), step != 5, "step {step}");
    }
    let url = &SceneCatalog::default().models[COLLIDER].url;
    assert!(sequencer.assets().requests().contains(url));
}

#[test]
fn test_ui_after_each_step() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 0);
    assert!(!sequencer.ui().loading);
    assert!(sequencer.ui().info_controls_visible);
    assert_eq!(sequencer.ui().affordance.as_deref(), Some("Start"));
    assert!(sequencer.ui().buttons.is_empty());

    block_on(sequencer.advance()).unwrap();
    assert_eq!(
        sequencer.ui().button_labels(),
        vec!["Surrounding", "Transportation", "Units"]
    );
    assert_eq!(sequencer.ui().highlighted, Some(0));
    assert_eq!(
        sequencer.ui().panels,
        Some(PanelPair::from_prefix("html_scene1_opt1"))
    );
    assert_eq!(sequencer.ui().affordance.as_deref(), Some("Next"));

    for _ in 2..=5 {
        block_on(sequencer.advance()).unwrap();
    }
    assert_eq!(sequencer.ui().affordance.as_deref(), Some("Restart"));
    assert!(sequencer.ui().buttons.is_empty());
}

// ============================================================================
// Restart
// ============================================================================

#[test]
fn test_seventh_advance_restarts() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 5);

    let outcome = block_on(sequencer.advance()).unwrap();
    assert_eq!(outcome, StepOutcome::Restarted);
    assert_eq!(sequencer.current_step_index(), -1);
    assert!(sequencer.assets().loaded_model_ids().is_empty());
    assert!(sequencer.assets().collision_field().is_empty());
    assert_eq!(sequencer.assets().playing_sound(), None);
    assert_eq!(sequencer.ui().affordance.as_deref(), Some("Start"));
    assert!(sequencer.ui().background_visible);
    assert!(!sequencer.ui().loading);

    // The tour runs again from the top
    assert_eq!(block_on(sequencer.advance()).unwrap(), StepOutcome::Entered(0));
    assert_eq!(loaded(&sequencer), sorted(ids(&[CITY, KOPUK])));
}

// ============================================================================
// Variants
// ============================================================================

#[test]
fn test_overview_camera() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 0);

    let viewport = sequencer.viewport();
    assert_eq!(viewport.projection().kind(), ProjectionKind::Orthographic);
    match viewport.controls() {
        Controls::Orbit(orbit) => {
            assert!(orbit.auto_rotate);
            assert!(!orbit.enable_rotate);
            assert!(!orbit.enable_zoom);
            assert!(!orbit.enable_pan);
        }
        other => panic!("expected orbit controls, got {other:?}"),
    }
}

#[test]
fn test_design_option_two_swaps_pairs() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 2);

    // Initial variant is option 1
    for id in ids(&[M1, M4]) {
        assert_eq!(sequencer.assets().is_visible(&id), Some(true));
    }
    for id in ids(&[M3, M5]) {
        assert_eq!(sequencer.assets().is_visible(&id), Some(false));
    }

    assert!(sequencer.select_variant(1));
    for id in ids(&[M3, M5]) {
        assert_eq!(sequencer.assets().is_visible(&id), Some(true));
    }
    for id in ids(&[M1, M4]) {
        assert_eq!(sequencer.assets().is_visible(&id), Some(false));
    }
    let panels = sequencer.ui().panels.clone().unwrap();
    assert_eq!(panels.left, "html_scene2_opt2_left");
    assert_eq!(panels.right, "html_scene2_opt2_right");
    assert_eq!(sequencer.ui().highlighted, Some(1));
}

#[test]
fn test_interior_camera_stop() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 4);

    assert!(sequencer.select_variant(3));
    let viewport = sequencer.viewport();
    match viewport.controls() {
        Controls::Fixed { position, target } => {
            assert_eq!(*position, Vec3::new(3.0, 1.6, -4.0));
            assert_eq!(*target, Vec3::new(4.0, 1.2, -6.0));
        }
        other => panic!("expected a fixed camera, got {other:?}"),
    }
    assert_eq!(viewport.projection().fov_deg(), Some(75.0));
    assert_eq!(
        sequencer.ui().panels,
        Some(PanelPair::from_prefix("html_scene4_cam4"))
    );
}

#[test]
fn test_select_variant_twice_is_idempotent() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 2);
    sequencer.select_variant(1);
    let visible_once: Vec<_> = ids(&[M1, M3, M4, M5])
        .iter()
        .map(|id| sequencer.assets().is_visible(id))
        .collect();
    let ui_once = sequencer.ui().clone();

    sequencer.select_variant(1);
    let visible_twice: Vec<_> = ids(&[M1, M3, M4, M5])
        .iter()
        .map(|id| sequencer.assets().is_visible(id))
        .collect();
    assert_eq!(visible_once, visible_twice);
    assert_eq!(&ui_once, sequencer.ui());

    let mut sequencer = self::sequencer();
    advance_to(&mut sequencer, 4);
    sequencer.select_variant(2);
    let eye_once = sequencer.viewport().eye_position();
    let fov_once = sequencer.viewport().projection().fov_deg();
    sequencer.select_variant(2);
    assert_eq!(sequencer.viewport().eye_position(), eye_once);
    assert_eq!(sequencer.viewport().projection().fov_deg(), fov_once);
}

#[test]
fn test_out_of_range_variant_is_ignored() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 2);
    let ui_before = sequencer.ui().clone();

    assert!(!sequencer.select_variant(2));
    assert!(!sequencer.select_variant(usize::MAX));
    assert_eq!(&ui_before, sequencer.ui());
    assert_eq!(sequencer.session().variant, Some(0));
}

#[test]
fn test_steps_without_variants_ignore_selection() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 3);
    let eye = sequencer.viewport().eye_position();
    assert!(!sequencer.select_variant(0));
    assert_eq!(sequencer.viewport().eye_position(), eye);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_failed_load_still_clears_loading() {
    let mut stage = MemoryAssetStage::demo();
    stage.fail_url("models/ghost.glb");
    let mut sequencer = Sequencer::new(
        SceneCatalog::default(),
        stage,
        UiState::new(),
        Viewport::default(),
    );
    advance_to(&mut sequencer, 2);

    let err = block_on(sequencer.advance()).unwrap_err();
    match &err {
        SequenceError::Asset { step, source } => {
            assert_eq!(*step, 3);
            assert!(matches!(source, AssetError::NotFound(_)));
        }
    }
    assert_eq!(sequencer.current_step_index(), 3);
    assert!(!sequencer.ui().loading);
    assert!(sequencer.ui().info_controls_visible);
}

#[test]
fn test_failed_step_leaves_no_partial_models() {
    let mut stage = MemoryAssetStage::demo();
    let url = SceneCatalog::default().models[M4].url.clone();
    stage.fail_url(&url);
    let mut sequencer = Sequencer::new(
        SceneCatalog::default(),
        stage,
        UiState::new(),
        Viewport::default(),
    );
    advance_to(&mut sequencer, 1);

    // m1 and m3 load fine, m4 does not: none of the batch is kept
    assert!(block_on(sequencer.advance()).is_err());
    assert!(loaded(&sequencer).is_empty());
    assert_eq!(sequencer.assets().is_visible(&ids(&[M1])[0]), None);
}

#[test]
fn test_advance_after_failure_moves_on() {
    let mut stage = MemoryAssetStage::demo();
    stage.fail_url("models/city.glb");
    let mut sequencer = Sequencer::new(
        SceneCatalog::default(),
        stage,
        UiState::new(),
        Viewport::default(),
    );

    assert!(block_on(sequencer.advance()).is_err());
    sequencer.assets_mut().clear_failures();

    // No automatic retry: the next advance enters step 1
    assert_eq!(block_on(sequencer.advance()).unwrap(), StepOutcome::Entered(1));
}

#[test]
fn test_unknown_model_index_is_reported() {
    let mut catalog = SceneCatalog::default();
    catalog.steps[0].models[1].model = 99;
    let mut sequencer = Sequencer::new(
        catalog,
        MemoryAssetStage::demo(),
        UiState::new(),
        Viewport::default(),
    );

    let err = block_on(sequencer.advance()).unwrap_err();
    assert_eq!(err.step(), 0);
    assert!(err.to_string().contains("99"));
    assert!(!sequencer.ui().loading);
}

// ============================================================================
// Presentation
// ============================================================================

#[test]
fn test_vr_forces_perspective() {
    let mut sequencer = sequencer();
    sequencer.set_presentation(PresentationMode::Vr);
    advance_to(&mut sequencer, 0);

    assert_eq!(sequencer.viewport().projection().kind(), ProjectionKind::Perspective);
    assert_eq!(sequencer.viewport().mode(), PresentationMode::Vr);
}

#[test]
fn test_walkthrough_uses_first_person() {
    let mut sequencer = sequencer();
    advance_to(&mut sequencer, 5);
    assert_eq!(sequencer.viewport().controls().kind(), RigKind::FirstPerson);
    let eye = sequencer.viewport().eye_position();
    assert!((eye - Vec3::new(0.0, 1.6, 4.0)).length() < 1e-4);
}
