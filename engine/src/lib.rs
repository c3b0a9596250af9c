//! Archviz Engine Library
//!
//! Camera, input, collision and locomotion for an architectural
//! visualization viewer, plus the guided tour that drives them.
//!
//! # Modules
//!
//! - [`camera`] - Projections, orbit / fixed / first-person controls and the VR rig
//! - [`input`] - Platform-agnostic key bindings, movement intents and pointer capture
//! - [`physics`] - Triangle colliders and raycasts
//! - [`player`] - Desktop and VR movement against the collision field
//! - [`tour`] - Scene catalog, sequencer and orchestrator
//!
//! # Example
//!
//! ```ignore
//! use archviz_engine::tour::{MemoryAssetStage, Orchestrator, UiState, ViewerConfig};
//! use archviz_engine::camera::PresentationMode;
//!
//! let mut tour = Orchestrator::new(
//!     ViewerConfig::default(),
//!     MemoryAssetStage::demo(),
//!     UiState::new(),
//!     PresentationMode::Desktop,
//! );
//! pollster::block_on(tour.load_sounds());
//! pollster::block_on(tour.advance_scene())?;
//!
//! // Every frame
//! tour.update(1.0 / 60.0);
//! ```

pub mod camera;
pub mod input;
pub mod physics;
pub mod player;

// Tour-specific modules (located in src/tour/ directory)
#[path = "../../src/tour/mod.rs"]
pub mod tour;

// Re-export commonly used input types
pub use input::{InputState, KeyCode};
// Re-export player types
pub use player::{DesktopMovement, MovementStrategy, VrMovement};
