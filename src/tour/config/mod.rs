//! Config Module
//!
//! Scene catalog and viewer startup configuration.

pub mod catalog;
pub mod viewer_config;

pub use catalog::{
    CameraStop, ModelEntry, ModelLoad, PanelPair, Placement, SceneCatalog, SceneStep, SoundEntry,
    ToggleButton, VariantSet, VisibilityVariant, STEP_COUNT,
};
pub use viewer_config::{ViewerConfig, load_physics};
