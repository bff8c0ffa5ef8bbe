//! Viewer composition root
//!
//! [`SceneApp`] owns the entity registry, rotation state, sequencer, and
//! trigger dispatcher, and is the single place they are wired together.
//! There are no ambient globals: collaborators receive the state by
//! reference.

use crate::config::SceneConfig;
use crate::error::{AppError, Result};
use crate::frame::{FrameLoop, RenderHost};
use crate::loader::{normalize_materials, AssetLoader};
use choreo_core::{EntityRegistry, RotationState};
use choreo_sequencer::{Choreography, Sequencer, TriggerDispatcher};
use std::path::Path;
use tracing::{info, warn};

/// The assembled viewer
pub struct SceneApp {
    registry: EntityRegistry,
    rotation: RotationState,
    sequencer: Sequencer,
    dispatcher: TriggerDispatcher,
    frame_loop: FrameLoop,
    host: Box<dyn RenderHost>,
}

impl SceneApp {
    /// Create an empty scene with no models or choreographies
    pub fn new(host: Box<dyn RenderHost>) -> Self {
        Self {
            registry: EntityRegistry::new(),
            rotation: RotationState::new(),
            sequencer: Sequencer::new(),
            dispatcher: TriggerDispatcher::new(),
            frame_loop: FrameLoop::new(),
            host,
        }
    }

    /// Assemble a scene: load, place, normalize, snapshot, register
    ///
    /// Models that fail to load are reported and left permanently absent;
    /// their choreography steps will be skipped. Origin snapshots are
    /// captured only after every model has been placed, so restores always
    /// target the settled layout.
    pub fn from_config(
        config: &SceneConfig,
        loader: &dyn AssetLoader,
        host: Box<dyn RenderHost>,
    ) -> Self {
        let mut app = Self::new(host);
        app.rotation = RotationState::with_rate(config.rotation.rate);

        for model in &config.models {
            match loader.load(Path::new(&model.path), model.scale) {
                Ok(mut loaded) => {
                    normalize_materials(&mut loaded);

                    let mut entity = loaded.entity;
                    if let Some(position) = model.position {
                        entity.position = position;
                    }
                    if let Some(rotation) = model.rotation {
                        entity.rotation = rotation;
                    }
                    if let Some(stretch) = model.stretch {
                        entity.scale = stretch;
                    }
                    entity.visible = model.visible;

                    app.registry.insert(model.name.clone(), entity);
                    info!(entity = %model.name, path = %model.path, "model loaded");
                }
                Err(err) => {
                    warn!(entity = %model.name, path = %model.path, %err, "model absent");
                }
            }
        }

        app.settle();

        for name in &config.rotation.spinning {
            app.rotation.mark_spinning(name.clone());
        }
        for choreography in &config.choreographies {
            app.dispatcher.register(
                choreography.trigger.clone(),
                Choreography {
                    steps: choreography.steps.clone(),
                },
            );
        }

        app
    }

    /// As [`SceneApp::from_config`], reading the config from a toml file
    pub fn from_config_file(
        path: impl AsRef<Path>,
        loader: &dyn AssetLoader,
        host: Box<dyn RenderHost>,
    ) -> Result<Self> {
        let config =
            SceneConfig::load(path).map_err(|err| AppError::Config(format!("{err:#}")))?;
        Ok(Self::from_config(&config, loader, host))
    }

    /// Capture origin snapshots for every loaded entity
    ///
    /// First capture wins, so calling this again later changes nothing.
    pub fn settle(&mut self) {
        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        for name in names {
            let _ = self.registry.snapshot_origin(&name);
        }
    }

    /// Register a choreography for a trigger
    pub fn register(&mut self, trigger: impl Into<String>, choreography: Choreography) {
        self.dispatcher.register(trigger, choreography);
    }

    /// Fire a trigger (button press)
    pub fn fire(&mut self, trigger: &str) {
        self.dispatcher
            .fire(trigger, &mut self.sequencer, &mut self.registry, &mut self.rotation);
    }

    /// Advance one frame of simulated time
    pub fn tick(&mut self, dt_ms: f32) {
        self.frame_loop.tick(
            dt_ms,
            &mut self.sequencer,
            &mut self.registry,
            &mut self.rotation,
            self.host.as_mut(),
        );
    }

    /// Window resize passthrough to the render host
    pub fn resize(&mut self, width: u32, height: u32) {
        self.host.resize(width, height);
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut RotationState {
        &mut self.rotation
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn dispatcher(&self) -> &TriggerDispatcher {
        &self.dispatcher
    }

    pub fn frame(&self) -> u64 {
        self.frame_loop.frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::NoopRenderHost;
    use crate::loader::{LoadError, LoadedModel, NullLoader};
    use choreo_core::{RotationSign, Vec3};

    fn cleaning_scene() -> SceneConfig {
        toml::from_str(
            r#"
            [[models]]
            name = "model"
            path = "model.gltf"
            scale = 0.6
            position = { x = 38.0, y = -17.0, z = -20.0 }

            [[models]]
            name = "thingy"
            path = "thingy.gltf"
            scale = 4.0
            position = { x = 10.0, y = 0.0, z = 0.0 }

            [rotation]
            spinning = ["model"]

            [[choreographies]]
            trigger = "cleaningjet"

            [[choreographies.steps]]
            op = "set_transform"
            entity = "thingy"
            field = "position"
            value = { x = 10.0, y = 3.0, z = 0.0 }

            [[choreographies.steps]]
            op = "delay"
            ms = 2000.0

            [[choreographies.steps]]
            op = "restore_origin"
            entity = "thingy"
            field = "position"

            [[choreographies]]
            trigger = "rotateotherdir"

            [[choreographies.steps]]
            op = "toggle_rotation_sign"

            [[choreographies]]
            trigger = "vizualize"
        "#,
        )
        .unwrap()
    }

    #[test]
    fn test_cleaning_jet_end_to_end() {
        let mut app =
            SceneApp::from_config(&cleaning_scene(), &NullLoader, Box::new(NoopRenderHost::new()));

        app.fire("cleaningjet");
        assert_eq!(
            app.registry().get("thingy").unwrap().position,
            Vec3::new(10.0, 3.0, 0.0)
        );

        // 2 seconds of 16 ms frames puts the jet back at its origin
        for _ in 0..125 {
            app.tick(16.0);
        }
        assert_eq!(
            app.registry().get("thingy").unwrap().position,
            Vec3::new(10.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_reverse_trigger_and_spin() {
        let mut app =
            SceneApp::from_config(&cleaning_scene(), &NullLoader, Box::new(NoopRenderHost::new()));

        app.tick(16.0);
        let forward = app.registry().get("model").unwrap().rotation.y;
        assert!(forward > 0.0);

        app.fire("rotateotherdir");
        assert_eq!(app.rotation().sign(), RotationSign::Negative);
        app.tick(16.0);
        let reversed = app.registry().get("model").unwrap().rotation.y;
        assert!(reversed < forward);
    }

    #[test]
    fn test_stub_trigger_is_registered_and_harmless() {
        let mut app =
            SceneApp::from_config(&cleaning_scene(), &NullLoader, Box::new(NoopRenderHost::new()));
        assert!(app.dispatcher().is_registered("vizualize"));
        app.fire("vizualize");
        assert!(app.sequencer().is_idle());
    }

    #[test]
    fn test_unregistered_trigger_is_logged_not_fatal() {
        let mut app =
            SceneApp::from_config(&cleaning_scene(), &NullLoader, Box::new(NoopRenderHost::new()));
        app.fire("no_such_button");
        assert!(app.sequencer().is_idle());
    }

    struct FailingLoader;

    impl AssetLoader for FailingLoader {
        fn load(&self, path: &Path, _scale: f32) -> std::result::Result<LoadedModel, LoadError> {
            Err(LoadError::NotFound(path.display().to_string()))
        }
    }

    #[test]
    fn test_failed_loads_degrade_not_crash() {
        let mut app = SceneApp::from_config(
            &cleaning_scene(),
            &FailingLoader,
            Box::new(NoopRenderHost::new()),
        );
        assert!(app.registry().is_empty());

        // Every step targets an absent entity; nothing panics
        app.fire("cleaningjet");
        for _ in 0..200 {
            app.tick(16.0);
        }
    }
}
