//! Scene Catalog
//!
//! The static description of the six-step tour: which models exist, which
//! sounds exist, and what each step loads, shows and lets the user toggle.
//! `Default` returns the shipped tour; a JSON file with the same shape can
//! replace it at startup.

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraIntent, ProjectionKind, RigKind};
use crate::tour::error::CatalogError;

/// Number of content steps in a tour.
pub const STEP_COUNT: usize = 6;

/// Upper bound on toggle buttons a step may show.
pub const MAX_BUTTONS: usize = 6;

/// World placement applied to a loaded model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub position: Vec3,
    /// Rotation about +Y in degrees
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Placement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.rotation_y.to_radians()),
            self.position,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    /// Path relative to the asset root
    pub url: String,
    #[serde(default)]
    pub placement: Placement,
}

impl ModelEntry {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            url: format!("models/{id}.glb"),
            placement: Placement::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEntry {
    pub id: String,
    pub url: String,
}

/// A model a step loads, by catalog index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelLoad {
    pub model: usize,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

fn visible_by_default() -> bool {
    true
}

impl ModelLoad {
    pub fn visible(model: usize) -> Self {
        Self { model, visible: true }
    }

    pub fn hidden(model: usize) -> Self {
        Self { model, visible: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleButton {
    pub label: String,
    pub id: String,
}

/// Identifiers of the left/right content panels shown together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPair {
    pub left: String,
    pub right: String,
}

impl PanelPair {
    /// `{prefix}_left` / `{prefix}_right`
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            left: format!("{prefix}_left"),
            right: format!("{prefix}_right"),
        }
    }
}

/// One entry of a visibility split: catalog indices to show and hide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityVariant {
    pub show: Vec<usize>,
    pub hide: Vec<usize>,
    pub panels: PanelPair,
}

/// A fixed camera placement selectable by a toggle button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraStop {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub panels: PanelPair,
}

/// What the toggle buttons of a step switch between.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum VariantSet {
    #[default]
    None,
    /// Content panels only
    Panels(Vec<PanelPair>),
    /// Mutually exclusive model visibility
    Visibility(Vec<VisibilityVariant>),
    /// Fixed camera placements
    CameraStops(Vec<CameraStop>),
}

impl VariantSet {
    pub fn len(&self) -> usize {
        match self {
            VariantSet::None => 0,
            VariantSet::Panels(v) => v.len(),
            VariantSet::Visibility(v) => v.len(),
            VariantSet::CameraStops(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One ordinal stage of the tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStep {
    pub name: String,
    /// Loaded in order after the previous step's models are discarded
    pub models: Vec<ModelLoad>,
    /// Keep the previous step's models instead of loading `models`
    pub reuse_previous_models: bool,
    /// Invisible collision geometry, by model catalog index
    pub colliders: Vec<usize>,
    pub camera: CameraIntent,
    pub buttons: Vec<ToggleButton>,
    /// Panels shown on entry when no variant is selected
    pub panels: Option<PanelPair>,
    pub description: Option<String>,
    /// Label of the start/next/restart affordance
    pub affordance: String,
    pub audio_track: Option<usize>,
    pub variants: VariantSet,
    /// Variant applied automatically on entry
    pub initial_variant: Option<usize>,
    pub background_visible: bool,
}

impl Default for SceneStep {
    fn default() -> Self {
        Self {
            name: String::new(),
            models: Vec::new(),
            reuse_previous_models: false,
            colliders: Vec::new(),
            camera: CameraIntent::default(),
            buttons: Vec::new(),
            panels: None,
            description: None,
            affordance: "Next".to_string(),
            audio_track: None,
            variants: VariantSet::None,
            initial_variant: None,
            background_visible: false,
        }
    }
}

/// The whole tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCatalog {
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub sounds: Vec<SoundEntry>,
    pub steps: Vec<SceneStep>,
}

impl SceneCatalog {
    /// Load and validate a catalog from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        let catalog: SceneCatalog = serde_json::from_str(&text)?;
        catalog.validate()?;
        log::info!(
            "loaded scene catalog from {} ({} models, {} sounds)",
            path.display(),
            catalog.models.len(),
            catalog.sounds.len()
        );
        Ok(catalog)
    }

    pub fn step(&self, index: usize) -> Option<&SceneStep> {
        self.steps.get(index)
    }

    pub fn model(&self, index: usize) -> Option<&ModelEntry> {
        self.models.get(index)
    }

    /// Check structural consistency.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |msg: String| Err(CatalogError::Invalid(msg));

        if self.steps.len() != STEP_COUNT {
            return invalid(format!(
                "expected {STEP_COUNT} steps, found {}",
                self.steps.len()
            ));
        }

        let model_count = self.models.len();
        let check_model = |step: usize, index: usize| -> Result<(), CatalogError> {
            if index >= model_count {
                return Err(CatalogError::Invalid(format!(
                    "step {step} references model {index}, catalog has {model_count}"
                )));
            }
            Ok(())
        };

        for (i, step) in self.steps.iter().enumerate() {
            if i == 0 && step.reuse_previous_models {
                return invalid("step 0 has no previous models to reuse".to_string());
            }
            for load in &step.models {
                check_model(i, load.model)?;
            }
            for &collider in &step.colliders {
                check_model(i, collider)?;
            }
            if let Some(track) = step.audio_track {
                if track >= self.sounds.len() {
                    return invalid(format!("step {i} references sound {track}"));
                }
            }
            if step.buttons.len() > MAX_BUTTONS {
                return invalid(format!("step {i} has more than {MAX_BUTTONS} buttons"));
            }

            match &step.variants {
                VariantSet::None => {
                    if !step.buttons.is_empty() {
                        return invalid(format!("step {i} has buttons but no variants"));
                    }
                }
                variants => {
                    if variants.len() != step.buttons.len() {
                        return invalid(format!(
                            "step {i} has {} buttons for {} variants",
                            step.buttons.len(),
                            variants.len()
                        ));
                    }
                }
            }

            match &step.variants {
                VariantSet::Visibility(entries) => {
                    for entry in entries {
                        for &model in entry.show.iter().chain(&entry.hide) {
                            if !step.models.iter().any(|load| load.model == model) {
                                return invalid(format!(
                                    "step {i} toggles model {model} it does not load"
                                ));
                            }
                        }
                    }
                }
                VariantSet::CameraStops(_) => {
                    if step.camera.rig == RigKind::FirstPerson {
                        return invalid(format!(
                            "step {i} mixes camera stops with first-person controls"
                        ));
                    }
                }
                VariantSet::None | VariantSet::Panels(_) => {}
            }

            if let Some(initial) = step.initial_variant {
                if initial >= step.variants.len() {
                    return invalid(format!("step {i} starts on missing variant {initial}"));
                }
            }
        }
        Ok(())
    }
}

// Catalog indices of the shipped models
pub const CITY: usize = 0;
pub const KOPUK: usize = 1;
pub const M1: usize = 2;
pub const M3: usize = 3;
pub const M4: usize = 4;
pub const M5: usize = 5;
pub const GHOST: usize = 6;
pub const SECTION: usize = 7;
pub const INTERIOR_SOLO: usize = 8;
pub const INTERIOR: usize = 9;
pub const COLLIDER: usize = 10;

fn buttons(labels: &[&str], prefix: &str) -> Vec<ToggleButton> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| ToggleButton {
            label: label.to_string(),
            id: format!("{prefix}{}", i + 1),
        })
        .collect()
}

fn camera_stop(position: [f32; 3], target: [f32; 3], fov: f32, n: usize) -> CameraStop {
    CameraStop {
        position: Vec3::from_array(position),
        target: Vec3::from_array(target),
        fov,
        panels: PanelPair::from_prefix(&format!("html_scene4_cam{n}")),
    }
}

impl Default for SceneCatalog {
    fn default() -> Self {
        let models = [
            "city",
            "kopuk",
            "m1",
            "m3",
            "m4",
            "m5",
            "ghost",
            "section",
            "interior_solo",
            "interior",
            "collider",
        ]
        .into_iter()
        .map(ModelEntry::new)
        .collect();

        let sounds = vec![
            SoundEntry {
                id: "city_ambience".to_string(),
                url: "sounds/city_ambience.ogg".to_string(),
            },
            SoundEntry {
                id: "interior_ambience".to_string(),
                url: "sounds/interior_ambience.ogg".to_string(),
            },
        ];

        let overview = SceneStep {
            name: "Overview".to_string(),
            models: vec![ModelLoad::visible(CITY), ModelLoad::visible(KOPUK)],
            camera: CameraIntent {
                rig: RigKind::Orbit,
                projection: ProjectionKind::Orthographic,
                position: Vec3::new(80.0, 70.0, 80.0),
                target: Vec3::ZERO,
                zoom: 1.0,
                auto_rotate: true,
                auto_rotate_speed: 1.0,
                enable_rotate: false,
                enable_zoom: false,
                enable_pan: false,
                ..Default::default()
            },
            description: Some("The site in its city context.".to_string()),
            affordance: "Start".to_string(),
            audio_track: Some(0),
            background_visible: true,
            ..Default::default()
        };

        let concept = SceneStep {
            name: "Concept".to_string(),
            reuse_previous_models: true,
            camera: CameraIntent {
                rig: RigKind::Orbit,
                projection: ProjectionKind::Orthographic,
                position: Vec3::new(80.0, 70.0, 80.0),
                target: Vec3::ZERO,
                zoom: 1.2,
                auto_rotate: false,
                enable_rotate: true,
                enable_zoom: true,
                enable_pan: false,
                polar_range: [0.0, 85.0],
                ..Default::default()
            },
            buttons: buttons(&["Surrounding", "Transportation", "Units"], "scene1_opt"),
            panels: Some(PanelPair::from_prefix("html_scene1_opt1")),
            description: Some("How the building meets its surroundings.".to_string()),
            audio_track: Some(0),
            variants: VariantSet::Panels(
                (1..=3)
                    .map(|n| PanelPair::from_prefix(&format!("html_scene1_opt{n}")))
                    .collect(),
            ),
            initial_variant: Some(0),
            ..Default::default()
        };

        let comparison = SceneStep {
            name: "Design Options".to_string(),
            models: vec![
                ModelLoad::hidden(M1),
                ModelLoad::hidden(M3),
                ModelLoad::hidden(M4),
                ModelLoad::hidden(M5),
            ],
            camera: CameraIntent {
                position: Vec3::new(40.0, 30.0, 40.0),
                target: Vec3::new(0.0, 5.0, 0.0),
                fov: 45.0,
                enable_pan: false,
                polar_range: [0.0, 85.0],
                ..Default::default()
            },
            buttons: buttons(&["Option 1", "Option 2"], "scene2_opt"),
            description: Some("Two massing options side by side.".to_string()),
            variants: VariantSet::Visibility(vec![
                VisibilityVariant {
                    show: vec![M1, M4],
                    hide: vec![M3, M5],
                    panels: PanelPair::from_prefix("html_scene2_opt1"),
                },
                VisibilityVariant {
                    show: vec![M3, M5],
                    hide: vec![M1, M4],
                    panels: PanelPair::from_prefix("html_scene2_opt2"),
                },
            ]),
            initial_variant: Some(0),
            ..Default::default()
        };

        let structure = SceneStep {
            name: "Structure".to_string(),
            models: vec![ModelLoad::visible(GHOST), ModelLoad::visible(SECTION)],
            camera: CameraIntent {
                position: Vec3::new(25.0, 20.0, 25.0),
                target: Vec3::new(0.0, 4.0, 0.0),
                fov: 50.0,
                enable_pan: false,
                ..Default::default()
            },
            description: Some("A section through the structure.".to_string()),
            ..Default::default()
        };

        let stops = vec![
            camera_stop([0.0, 1.6, 3.0], [0.0, 1.4, -2.0], 60.0, 1),
            camera_stop([4.0, 1.6, 2.0], [6.0, 1.2, -1.0], 55.0, 2),
            camera_stop([-4.0, 1.6, -3.0], [-6.0, 1.2, -5.0], 65.0, 3),
            camera_stop([3.0, 1.6, -4.0], [4.0, 1.2, -6.0], 75.0, 4),
            camera_stop([0.0, 1.6, -7.0], [0.0, 1.5, -12.0], 50.0, 5),
            camera_stop([-3.0, 1.6, 3.0], [-5.0, 1.2, 4.0], 60.0, 6),
        ];
        let first_stop = CameraIntent::fixed(stops[0].position, stops[0].target, stops[0].fov);
        let interior_tour = SceneStep {
            name: "Interior".to_string(),
            models: vec![ModelLoad::visible(INTERIOR_SOLO)],
            camera: first_stop,
            buttons: buttons(
                &["Living Room", "Kitchen", "Bedroom", "Bathroom", "Balcony", "Study"],
                "scene4_cam",
            ),
            description: Some("Step through the rooms.".to_string()),
            audio_track: Some(1),
            variants: VariantSet::CameraStops(stops),
            initial_variant: Some(0),
            ..Default::default()
        };

        let walkthrough = SceneStep {
            name: "Walkthrough".to_string(),
            models: vec![ModelLoad::visible(INTERIOR)],
            colliders: vec![COLLIDER],
            camera: CameraIntent {
                rig: RigKind::FirstPerson,
                position: Vec3::new(0.0, 1.6, 4.0),
                target: Vec3::new(0.0, 1.6, 0.0),
                fov: 70.0,
                enable_rotate: false,
                enable_zoom: false,
                enable_pan: false,
                ..Default::default()
            },
            description: Some(
                "Click to walk. WASD to move, Space to jump, Shift to run. \
                 Press Restart to start over."
                    .to_string(),
            ),
            affordance: "Restart".to_string(),
            audio_track: Some(1),
            ..Default::default()
        };

        Self {
            models,
            sounds,
            steps: vec![overview, concept, comparison, structure, interior_tour, walkthrough],
        }
    }
}
