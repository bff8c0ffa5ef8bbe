//! Scene configuration
//!
//! A scene is a toml file: the models to load, the spin set, and one
//! choreography per trigger. Per-variant behavior lives entirely in these
//! files — the sequencer is variant-agnostic.
//!
//! ```toml
//! [[models]]
//! name = "thingy"
//! path = "thingy.gltf"
//! scale = 4.0
//! position = { x = 10.0, y = 0.0, z = 0.0 }
//!
//! [rotation]
//! rate = 0.05
//! spinning = ["model", "spiral"]
//!
//! [[choreographies]]
//! trigger = "cleaningjet"
//!
//! [[choreographies.steps]]
//! op = "set_transform"
//! entity = "thingy"
//! field = "position"
//! value = { x = 10.0, y = 3.0, z = 0.0 }
//! ```

use anyhow::{Context, Result};
use choreo_core::{RotationState, Vec3};
use choreo_sequencer::ChoreographyStep;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full description of a viewer scene
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub choreographies: Vec<ChoreographyConfig>,
}

/// One model to load and place
#[derive(Debug, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Stable entity name used by choreography steps
    pub name: String,
    /// Asset path handed to the loader
    pub path: String,
    /// Uniform load scale
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Initial position, applied after load
    #[serde(default)]
    pub position: Option<Vec3>,
    /// Initial Euler rotation in radians
    #[serde(default)]
    pub rotation: Option<Vec3>,
    /// Non-uniform scale override, applied after the load scale
    #[serde(default)]
    pub stretch: Option<Vec3>,
    /// Initial visibility (overlays start hidden)
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// Idle rotation settings
#[derive(Debug, Deserialize, Serialize)]
pub struct RotationConfig {
    /// Radians per tick
    #[serde(default = "default_rate")]
    pub rate: f32,
    /// Entities advanced every frame while visible
    #[serde(default)]
    pub spinning: Vec<String>,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            spinning: Vec::new(),
        }
    }
}

/// Choreography bound to one trigger id
#[derive(Debug, Deserialize, Serialize)]
pub struct ChoreographyConfig {
    pub trigger: String,
    #[serde(default)]
    pub steps: Vec<ChoreographyStep>,
}

fn default_scale() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

fn default_rate() -> f32 {
    RotationState::DEFAULT_RATE
}

impl SceneConfig {
    /// Read a scene description from a toml file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse scene config: {}", path.display()))
    }
}
