//! In-memory asset stage.
//!
//! Serves synthetic geometry instead of reading files. Used by the tests and
//! by the viewer when no asset directory is available. Individual urls can
//! be marked as failing to exercise error paths.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use glam::Vec3;

use crate::physics::{ColliderMesh, CollisionField};
use crate::tour::asset_stage::{AssetStage, ModelHandle, ModelRequest, SoundBuffer};
use crate::tour::config::{ModelEntry, SoundEntry};
use crate::tour::error::AssetError;

#[derive(Debug, Clone)]
struct LoadedModel {
    id: String,
    visible: bool,
    mesh: ColliderMesh,
}

#[derive(Debug, Clone)]
pub struct MemoryAssetStage {
    geometry: HashMap<String, ColliderMesh>,
    sounds: HashMap<String, Arc<[u8]>>,
    failing: HashSet<String>,
    models: Vec<LoadedModel>,
    collision: CollisionField,
    playing: Option<String>,
    /// Every url requested, in order
    requests: Vec<String>,
    unload_count: usize,
}

impl Default for MemoryAssetStage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAssetStage {
    /// Empty stage: every model is a unit cube unless registered.
    pub fn new() -> Self {
        Self {
            geometry: HashMap::new(),
            sounds: HashMap::new(),
            failing: HashSet::new(),
            models: Vec::new(),
            collision: CollisionField::new(),
            playing: None,
            requests: Vec::new(),
            unload_count: 0,
        }
    }

    /// Stage with a walkable room registered for the shipped collider url.
    pub fn demo() -> Self {
        let mut stage = Self::new();
        stage.register_mesh("models/collider.glb", demo_room());
        stage
    }

    pub fn register_mesh(&mut self, url: &str, mesh: ColliderMesh) {
        self.geometry.insert(url.to_string(), mesh);
    }

    pub fn register_sound(&mut self, url: &str, bytes: &[u8]) {
        self.sounds.insert(url.to_string(), Arc::from(bytes));
    }

    /// Make every later load of `url` fail.
    pub fn fail_url(&mut self, url: &str) {
        self.failing.insert(url.to_string());
    }

    pub fn clear_failures(&mut self) {
        self.failing.clear();
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn unload_count(&self) -> usize {
        self.unload_count
    }

    fn fetch(&mut self, url: &str) -> Result<ColliderMesh, AssetError> {
        self.requests.push(url.to_string());
        if self.failing.contains(url) {
            return Err(AssetError::NotFound(PathBuf::from(url)));
        }
        Ok(self
            .geometry
            .get(url)
            .cloned()
            .unwrap_or_else(|| ColliderMesh::cuboid(Vec3::splat(-0.5), Vec3::splat(0.5))))
    }

    fn build_model(
        &mut self,
        entry: &ModelEntry,
        visible: bool,
    ) -> Result<LoadedModel, AssetError> {
        let mesh = self.fetch(&entry.url)?.transformed(&entry.placement.matrix());
        if mesh.is_empty() {
            return Err(AssetError::EmptyModel(entry.url.clone()));
        }
        Ok(LoadedModel {
            id: entry.id.clone(),
            visible,
            mesh,
        })
    }

    fn commit(&mut self, model: LoadedModel) -> ModelHandle {
        let handle = ModelHandle {
            id: model.id.clone(),
            triangle_count: model.mesh.triangles().len(),
        };
        log::debug!("loaded model {} ({} triangles)", handle.id, handle.triangle_count);
        self.models.push(model);
        handle
    }
}

impl AssetStage for MemoryAssetStage {
    async fn load_model(
        &mut self,
        entry: &ModelEntry,
        visible: bool,
    ) -> Result<ModelHandle, AssetError> {
        let model = self.build_model(entry, visible)?;
        Ok(self.commit(model))
    }

    async fn load_models(
        &mut self,
        requests: &[ModelRequest<'_>],
    ) -> Result<Vec<ModelHandle>, AssetError> {
        // Build the whole batch before touching the loaded set
        let mut staged = Vec::with_capacity(requests.len());
        for request in requests {
            staged.push(self.build_model(request.entry, request.visible)?);
        }
        Ok(staged.into_iter().map(|model| self.commit(model)).collect())
    }

    async fn load_collider(&mut self, entry: &ModelEntry) -> Result<(), AssetError> {
        let mesh = self.fetch(&entry.url)?.transformed(&entry.placement.matrix());
        if mesh.is_empty() {
            return Err(AssetError::EmptyModel(entry.url.clone()));
        }
        log::debug!("loaded collider {} ({} triangles)", entry.id, mesh.triangles().len());
        self.collision.insert(mesh);
        Ok(())
    }

    async fn unload_all_models(&mut self) {
        log::debug!("unloading {} models", self.models.len());
        self.models.clear();
        self.collision.clear();
        self.unload_count += 1;
    }

    fn set_model_visibility(&mut self, id: &str, visible: bool) -> bool {
        match self.models.iter_mut().find(|m| m.id == id) {
            Some(model) => {
                model.visible = visible;
                true
            }
            None => false,
        }
    }

    fn is_visible(&self, id: &str) -> Option<bool> {
        self.models.iter().find(|m| m.id == id).map(|m| m.visible)
    }

    fn loaded_model_ids(&self) -> Vec<String> {
        self.models.iter().map(|m| m.id.clone()).collect()
    }

    fn collision_field(&self) -> &CollisionField {
        &self.collision
    }

    async fn load_sound(&mut self, entry: &SoundEntry) -> Result<SoundBuffer, AssetError> {
        self.requests.push(entry.url.clone());
        if self.failing.contains(&entry.url) {
            return Err(AssetError::NotFound(PathBuf::from(&entry.url)));
        }
        let bytes = self
            .sounds
            .get(&entry.url)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()));
        Ok(SoundBuffer {
            id: entry.id.clone(),
            bytes,
        })
    }

    fn play_sound(&mut self, buffer: &SoundBuffer) {
        self.playing = Some(buffer.id.clone());
    }

    fn stop_sounds(&mut self) {
        self.playing = None;
    }

    fn playing_sound(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}

/// A 12 x 12 m room with 3 m walls and one interior partition.
pub fn demo_room() -> ColliderMesh {
    let mut triangles = Vec::new();
    let pieces = [
        ColliderMesh::floor(Vec3::ZERO, 6.0),
        ColliderMesh::cuboid(Vec3::new(-6.2, 0.0, -6.2), Vec3::new(6.2, 3.0, -6.0)),
        ColliderMesh::cuboid(Vec3::new(-6.2, 0.0, 6.0), Vec3::new(6.2, 3.0, 6.2)),
        ColliderMesh::cuboid(Vec3::new(-6.2, 0.0, -6.0), Vec3::new(-6.0, 3.0, 6.0)),
        ColliderMesh::cuboid(Vec3::new(6.0, 0.0, -6.0), Vec3::new(6.2, 3.0, 6.0)),
        ColliderMesh::cuboid(Vec3::new(-6.0, 0.0, -0.1), Vec3::new(2.0, 3.0, 0.1)),
    ];
    for piece in &pieces {
        triangles.extend_from_slice(piece.triangles());
    }
    ColliderMesh::from_triangles(triangles)
}
