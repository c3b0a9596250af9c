//! Tour Module
//!
//! The architectural tour built on the engine modules: scene catalog and
//! configuration, asset stages, the UI port, the scene sequencer and the
//! orchestrator that ties them to window events.
//!
//! # Components
//!
//! - [`config`] - Scene catalog, physics overrides and viewer settings
//! - [`asset_stage`] - Async boundary for model, collider and sound loading
//! - [`sequencer`] - Six-step scene state machine
//! - [`orchestrator`] - Input routing and the per-frame tick

pub mod asset_stage;
pub mod config;
pub mod error;
pub mod gltf_stage;
pub mod memory_stage;
pub mod orchestrator;
pub mod sequencer;
pub mod sound;
pub mod ui;

pub use asset_stage::{AssetStage, ModelHandle, ModelRequest, SoundBuffer};
pub use config::{SceneCatalog, SceneStep, ViewerConfig};
pub use error::{AssetError, CatalogError, SequenceError};
pub use gltf_stage::GltfAssetStage;
pub use memory_stage::MemoryAssetStage;
pub use orchestrator::{InputResponse, Orchestrator, WALKTHROUGH_STEP, detect_presentation};
pub use sequencer::{LoadingGuard, Sequencer, SessionState, StepOutcome};
pub use sound::SoundBank;
pub use ui::{UiPort, UiState};
