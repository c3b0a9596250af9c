//! Viewer Configuration
//!
//! Everything the viewer needs at startup, gathered in one place: the tour
//! catalog, physics constants, key bindings, where assets live and whether
//! VR presentation was asked for.

use std::path::{Path, PathBuf};

use crate::input::KeyBindings;
use crate::player::PhysicsConfig;
use crate::tour::error::CatalogError;

use super::catalog::SceneCatalog;

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub catalog: SceneCatalog,
    pub physics: PhysicsConfig,
    pub bindings: KeyBindings,
    /// Directory model and sound urls are resolved against
    pub asset_root: PathBuf,
    pub vr_requested: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            catalog: SceneCatalog::default(),
            physics: PhysicsConfig::default(),
            bindings: KeyBindings::new(),
            asset_root: PathBuf::from("assets"),
            vr_requested: false,
        }
    }
}

impl ViewerConfig {
    /// Build from startup options. Missing override files are errors.
    pub fn load(
        asset_root: impl Into<PathBuf>,
        catalog: Option<&Path>,
        physics: Option<&Path>,
        vr_requested: bool,
    ) -> Result<Self, CatalogError> {
        let catalog = match catalog {
            Some(path) => SceneCatalog::from_json_file(path)?,
            None => SceneCatalog::default(),
        };
        let physics = match physics {
            Some(path) => load_physics(path)?,
            None => PhysicsConfig::default(),
        };
        Ok(Self {
            catalog,
            physics,
            bindings: KeyBindings::new(),
            asset_root: asset_root.into(),
            vr_requested,
        })
    }
}

/// Read physics overrides. Fields left out keep their defaults.
pub fn load_physics(path: &Path) -> Result<PhysicsConfig, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    let physics: PhysicsConfig = serde_json::from_str(&text)?;
    let desktop = &physics.desktop;
    if desktop.player_height <= 0.0 || desktop.player_radius <= 0.0 || desktop.friction < 0.0 {
        return Err(CatalogError::Invalid(format!(
            "{}: player height and radius must be positive",
            path.display()
        )));
    }
    log::info!("loaded physics overrides from {}", path.display());
    Ok(physics)
}
