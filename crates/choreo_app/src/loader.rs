//! Asset loader collaborator
//!
//! Loading is a one-shot operation producing an entity handle plus the
//! model's material descriptors; it never touches choreography state. A
//! failed load means the entity is permanently absent — the core then
//! skips its steps rather than crashing.

use choreo_core::SceneEntity;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
#[cfg(feature = "gltf")]
use tracing::warn;

/// Error type for asset loading operations
#[derive(Error, Debug)]
pub enum LoadError {
    /// File not found
    #[error("file not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Unsupported format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Material descriptor carried alongside a loaded entity
///
/// The core never reads these; they exist so the render host receives
/// normalized materials (see [`normalize_materials`]).
#[derive(Clone, Debug)]
pub struct MaterialDesc {
    pub name: Option<String>,
    pub double_sided: bool,
    pub transparent: bool,
    pub opacity: f32,
    pub depth_write: bool,
}

/// Result of loading one model file
#[derive(Clone, Debug)]
pub struct LoadedModel {
    /// Transform/visibility handle for the registry
    pub entity: SceneEntity,
    /// Materials found in the file
    pub materials: Vec<MaterialDesc>,
    /// Mesh primitive count, for diagnostics
    pub mesh_count: usize,
}

impl LoadedModel {
    /// A model with no geometry, scaled uniformly
    pub fn empty(scale: f32) -> Self {
        Self {
            entity: SceneEntity::new().with_uniform_scale(scale),
            materials: Vec::new(),
            mesh_count: 0,
        }
    }
}

/// Force every material into the render-friendly shape the viewer expects
///
/// Double-sided, fully opaque, depth-writing. Purely cosmetic; applied
/// once per loaded model before it participates in any choreography.
pub fn normalize_materials(model: &mut LoadedModel) {
    for material in &mut model.materials {
        material.double_sided = true;
        material.transparent = false;
        material.opacity = 1.0;
        material.depth_write = true;
    }
}

/// Loader collaborator interface
pub trait AssetLoader {
    /// Load a model file, returning a handle scaled by `scale`
    fn load(&self, path: &Path, scale: f32) -> Result<LoadedModel, LoadError>;
}

/// Loader that produces empty handles without touching the filesystem
///
/// Used headless and in tests, where only transforms matter.
pub struct NullLoader;

impl AssetLoader for NullLoader {
    fn load(&self, path: &Path, scale: f32) -> Result<LoadedModel, LoadError> {
        debug!(path = %path.display(), scale, "null loader: empty model");
        Ok(LoadedModel::empty(scale))
    }
}

/// glTF 2.0 asset loader
#[cfg(feature = "gltf")]
pub struct GltfLoader;

#[cfg(feature = "gltf")]
impl AssetLoader for GltfLoader {
    fn load(&self, path: &Path, scale: f32) -> Result<LoadedModel, LoadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if extension != "gltf" && extension != "glb" {
            return Err(LoadError::UnsupportedFormat(extension));
        }
        if !path.exists() {
            return Err(LoadError::NotFound(path.display().to_string()));
        }

        let doc = gltf::Gltf::open(path).map_err(|e| LoadError::Parse(e.to_string()))?;

        let materials = doc
            .materials()
            .map(|m| {
                let pbr = m.pbr_metallic_roughness();
                MaterialDesc {
                    name: m.name().map(str::to_string),
                    double_sided: m.double_sided(),
                    transparent: !matches!(m.alpha_mode(), gltf::material::AlphaMode::Opaque),
                    opacity: pbr.base_color_factor()[3],
                    depth_write: true,
                }
            })
            .collect::<Vec<_>>();

        let mesh_count = doc
            .meshes()
            .map(|mesh| mesh.primitives().count())
            .sum::<usize>();
        if mesh_count == 0 {
            warn!(path = %path.display(), "glTF file contains no mesh primitives");
        }
        debug!(
            path = %path.display(),
            meshes = mesh_count,
            materials = materials.len(),
            "glTF model loaded"
        );

        Ok(LoadedModel {
            entity: SceneEntity::new().with_uniform_scale(scale),
            materials,
            mesh_count,
        })
    }
}
