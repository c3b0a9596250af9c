//! Asset Stage
//!
//! The boundary between the sequencer and whatever actually holds scene
//! geometry and audio. Loads are async so a stage may fetch from disk or
//! the network; the sequencer awaits them in order.

use std::sync::Arc;

use crate::physics::CollisionField;
use crate::tour::config::{ModelEntry, SoundEntry};
use crate::tour::error::AssetError;

/// A model that finished loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelHandle {
    pub id: String,
    pub triangle_count: usize,
}

/// Raw audio bytes. Decoding happens in the audio backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundBuffer {
    pub id: String,
    pub bytes: Arc<[u8]>,
}

/// One model to load as part of a batch.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub entry: &'a ModelEntry,
    pub visible: bool,
}

/// Loads, shows and releases the geometry and sounds of a scene step.
#[allow(async_fn_in_trait)]
pub trait AssetStage {
    /// Load one renderable model with its placement applied.
    async fn load_model(&mut self, entry: &ModelEntry, visible: bool)
    -> Result<ModelHandle, AssetError>;

    /// Load a batch. Either every model is loaded or the first failure (in
    /// request order) is returned and nothing from the batch is kept.
    async fn load_models(
        &mut self,
        requests: &[ModelRequest<'_>],
    ) -> Result<Vec<ModelHandle>, AssetError>;

    /// Load invisible geometry into the collision field.
    async fn load_collider(&mut self, entry: &ModelEntry) -> Result<(), AssetError>;

    /// Release every model and collider of the previous step.
    async fn unload_all_models(&mut self);

    /// Show or hide a loaded model. Returns `false` for unknown ids.
    fn set_model_visibility(&mut self, id: &str, visible: bool) -> bool;

    fn is_visible(&self, id: &str) -> Option<bool>;

    /// Ids of the loaded models in load order.
    fn loaded_model_ids(&self) -> Vec<String>;

    fn collision_field(&self) -> &CollisionField;

    async fn load_sound(&mut self, entry: &SoundEntry) -> Result<SoundBuffer, AssetError>;

    fn play_sound(&mut self, buffer: &SoundBuffer);

    fn stop_sounds(&mut self);

    /// Id of the sound currently playing.
    fn playing_sound(&self) -> Option<&str>;
}
