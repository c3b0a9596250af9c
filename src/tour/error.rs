//! Error types for asset loading, catalog loading and step sequencing.

use std::path::PathBuf;

/// A model, collider or sound could not be loaded.
#[derive(Debug)]
pub enum AssetError {
    /// File does not exist under the asset root.
    NotFound(PathBuf),
    /// Standard I/O error.
    Io(std::io::Error),
    /// The file is not a readable glTF/GLB document.
    Gltf(gltf::Error),
    /// The document parsed but contains no triangles.
    EmptyModel(String),
    /// A step referenced a model index the catalog does not have.
    UnknownModel(usize),
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::NotFound(path) => write!(f, "asset not found: {}", path.display()),
            AssetError::Io(e) => write!(f, "IO error: {e}"),
            AssetError::Gltf(e) => write!(f, "glTF error: {e}"),
            AssetError::EmptyModel(url) => write!(f, "model has no geometry: {url}"),
            AssetError::UnknownModel(index) => write!(f, "no model with catalog index {index}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(e) => Some(e),
            AssetError::Gltf(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AssetError {
    fn from(e: std::io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl From<gltf::Error> for AssetError {
    fn from(e: gltf::Error) -> Self {
        AssetError::Gltf(e)
    }
}

/// The scene catalog or physics file could not be loaded or is inconsistent.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Parsed, but fails validation.
    Invalid(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "IO error: {e}"),
            CatalogError::Json(e) => write!(f, "JSON error: {e}"),
            CatalogError::Invalid(msg) => write!(f, "invalid catalog: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Json(e) => Some(e),
            CatalogError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Json(e)
    }
}

/// Setting up a scene step failed.
///
/// The step index has already moved to `step`; the caller decides how to
/// recover (typically by telling the user to reload).
#[derive(Debug)]
pub enum SequenceError {
    Asset { step: usize, source: AssetError },
}

impl SequenceError {
    pub fn step(&self) -> usize {
        match self {
            SequenceError::Asset { step, .. } => *step,
        }
    }
}

impl std::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceError::Asset { step, source } => {
                write!(f, "failed to set up scene {step}: {source}")
            }
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SequenceError::Asset { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_step_and_cause() {
        let err = SequenceError::Asset {
            step: 2,
            source: AssetError::NotFound(PathBuf::from("models/m1.glb")),
        };
        let text = err.to_string();
        assert!(text.contains("scene 2"));
        assert!(text.contains("models/m1.glb"));
        assert_eq!(err.step(), 2);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err = SequenceError::Asset {
            step: 0,
            source: AssetError::Io(std::io::Error::other("boom")),
        };
        let asset = err.source().unwrap();
        assert!(asset.source().is_some());
    }
}
