//! glTF asset stage.
//!
//! Reads `.glb` / `.gltf` files from an asset root. Each model is flattened
//! into world-space triangles: node transforms are applied while walking the
//! scene graph, then the catalog placement on top. Colliders feed the
//! collision field and are never shown.
//!
//! Batch loads parse every file on its own scoped thread and commit nothing
//! unless all of them succeed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::{Mat4, Vec3};

use crate::physics::{ColliderMesh, CollisionField, Triangle};
use crate::tour::asset_stage::{AssetStage, ModelHandle, ModelRequest, SoundBuffer};
use crate::tour::config::{ModelEntry, SoundEntry};
use crate::tour::error::AssetError;

#[derive(Debug)]
struct LoadedModel {
    id: String,
    visible: bool,
    mesh: ColliderMesh,
}

#[derive(Debug)]
pub struct GltfAssetStage {
    root: PathBuf,
    models: Vec<LoadedModel>,
    collision: CollisionField,
    playing: Option<String>,
}

impl GltfAssetStage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            models: Vec::new(),
            collision: CollisionField::new(),
            playing: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> PathBuf {
        self.root.join(url)
    }

    /// World-space geometry of a loaded model.
    pub fn model_mesh(&self, id: &str) -> Option<&ColliderMesh> {
        self.models.iter().find(|m| m.id == id).map(|m| &m.mesh)
    }

    fn commit(&mut self, entry: &ModelEntry, visible: bool, mesh: ColliderMesh) -> ModelHandle {
        let handle = ModelHandle {
            id: entry.id.clone(),
            triangle_count: mesh.triangles().len(),
        };
        log::debug!(
            "loaded model {} from {} ({} triangles)",
            entry.id,
            entry.url,
            handle.triangle_count
        );
        self.models.push(LoadedModel {
            id: entry.id.clone(),
            visible,
            mesh,
        });
        handle
    }
}

/// Parse a glTF file into world-space triangles with `placement` applied.
pub fn parse_model(path: &Path, placement: Mat4) -> Result<ColliderMesh, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }
    let (document, buffers, _images) = gltf::import(path)?;

    let mut triangles = Vec::new();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next());
    match scene {
        Some(scene) => {
            for node in scene.nodes() {
                collect_node(&node, placement, &buffers, &mut triangles);
            }
        }
        // No scene graph: take every mesh untransformed
        None => {
            for mesh in document.meshes() {
                collect_mesh(&mesh, placement, &buffers, &mut triangles);
            }
        }
    }

    if triangles.is_empty() {
        return Err(AssetError::EmptyModel(path.display().to_string()));
    }
    Ok(ColliderMesh::from_triangles(triangles))
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Triangle>,
) {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, world, buffers, out);
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out);
    }
}

fn collect_mesh(
    mesh: &gltf::Mesh<'_>,
    transform: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<Triangle>,
) {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));

        let positions: Vec<Vec3> = match reader.read_positions() {
            Some(iter) => iter
                .map(|p| transform.transform_point3(Vec3::from_array(p)))
                .collect(),
            None => continue,
        };
        let indices: Vec<u32> = reader
            .read_indices()
            .map(|iter| iter.into_u32().collect())
            .unwrap_or_else(|| (0..positions.len() as u32).collect());

        out.extend_from_slice(ColliderMesh::from_indexed(&positions, &indices).triangles());
    }
}

impl AssetStage for GltfAssetStage {
    async fn load_model(
        &mut self,
        entry: &ModelEntry,
        visible: bool,
    ) -> Result<ModelHandle, AssetError> {
        let mesh = parse_model(&self.resolve(&entry.url), entry.placement.matrix())?;
        Ok(self.commit(entry, visible, mesh))
    }

    async fn load_models(
        &mut self,
        requests: &[ModelRequest<'_>],
    ) -> Result<Vec<ModelHandle>, AssetError> {
        let jobs: Vec<(PathBuf, Mat4)> = requests
            .iter()
            .map(|r| (self.resolve(&r.entry.url), r.entry.placement.matrix()))
            .collect();

        let parsed: Vec<Result<ColliderMesh, AssetError>> = std::thread::scope(|scope| {
            let workers: Vec<_> = jobs
                .iter()
                .map(|(path, placement)| scope.spawn(move || parse_model(path, *placement)))
                .collect();
            workers
                .into_iter()
                .map(|worker| {
                    worker.join().unwrap_or_else(|_| {
                        Err(AssetError::Io(std::io::Error::other("model loader thread panicked")))
                    })
                })
                .collect()
        });

        // First failure in request order wins; nothing is committed on failure
        let meshes = parsed.into_iter().collect::<Result<Vec<_>, _>>()?;

        Ok(requests
            .iter()
            .zip(meshes)
            .map(|(request, mesh)| self.commit(request.entry, request.visible, mesh))
            .collect())
    }

    async fn load_collider(&mut self, entry: &ModelEntry) -> Result<(), AssetError> {
        let mesh = parse_model(&self.resolve(&entry.url), entry.placement.matrix())?;
        log::debug!(
            "loaded collider {} ({} triangles)",
            entry.id,
            mesh.triangles().len()
        );
        self.collision.insert(mesh);
        Ok(())
    }

    async fn unload_all_models(&mut self) {
        log::debug!("unloading {} models", self.models.len());
        self.models.clear();
        self.collision.clear();
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
        let path = self.resolve(&entry.url);
        if !path.exists() {
            return Err(AssetError::NotFound(path));
        }
        let bytes = std::fs::read(&path)?;
        log::debug!("loaded sound {} ({} bytes)", entry.id, bytes.len());
        Ok(SoundBuffer {
            id: entry.id.clone(),
            bytes: Arc::from(bytes),
        })
    }

    fn play_sound(&mut self, buffer: &SoundBuffer) {
        log::debug!("playing sound {}", buffer.id);
        self.playing = Some(buffer.id.clone());
    }

    fn stop_sounds(&mut self) {
        self.playing = None;
    }

    fn playing_sound(&self) -> Option<&str> {
        self.playing.as_deref()
    }
}
