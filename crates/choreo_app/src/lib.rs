//! Choreo App
//!
//! Composition root for the Choreo viewer. Owns the scene state from
//! `choreo_core` and the sequencer from `choreo_sequencer`, and wires in
//! the external collaborators:
//!
//! - an [`AssetLoader`] producing entity handles (glTF behind the `gltf`
//!   feature, or [`NullLoader`] for headless use)
//! - a [`RenderHost`] that draws the scene and absorbs window resizes
//!
//! Scenes are described by [`SceneConfig`] toml files: which models to
//! load, which entities spin, and which choreography each trigger runs.
//! The three historical viewer variants ship as presets in [`presets`].

pub mod app;
pub mod config;
pub mod error;
pub mod frame;
pub mod loader;
pub mod presets;

pub use app::SceneApp;
pub use config::{ChoreographyConfig, ModelConfig, RotationConfig, SceneConfig};
pub use error::{AppError, Result};
pub use frame::{FrameLoop, NoopRenderHost, RenderHost};
pub use loader::{normalize_materials, AssetLoader, LoadError, LoadedModel, MaterialDesc, NullLoader};

#[cfg(feature = "gltf")]
pub use loader::GltfLoader;
