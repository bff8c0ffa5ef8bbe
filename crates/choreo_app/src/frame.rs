//! Frame loop and render host seam
//!
//! The loop owns no scene state. Each tick it advances the sequencer's
//! simulated time, applies the idle rotation, then hands the registry to
//! the render host for drawing. Step mutations happen entirely inside
//! `Sequencer::tick`, so the host never observes a half-updated transform.

use choreo_core::{EntityRegistry, RotationState};
use choreo_sequencer::Sequencer;

/// Rendering collaborator: draws the scene and absorbs window resizes
///
/// Resize only adjusts camera aspect and viewport on the host side; it has
/// no interaction with the choreography core.
pub trait RenderHost {
    /// Draw the current scene state
    fn draw(&mut self, registry: &EntityRegistry);

    /// Window resized
    fn resize(&mut self, width: u32, height: u32);
}

/// Host that draws nothing, for headless runs and tests
#[derive(Debug, Default)]
pub struct NoopRenderHost {
    frames_drawn: u64,
}

impl NoopRenderHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl RenderHost for NoopRenderHost {
    fn draw(&mut self, _registry: &EntityRegistry) {
        self.frames_drawn += 1;
    }

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Per-frame driver for the viewer
pub struct FrameLoop {
    frame: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    /// Frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame: sequencer time, idle rotation, draw
    pub fn tick(
        &mut self,
        dt_ms: f32,
        sequencer: &mut Sequencer,
        registry: &mut EntityRegistry,
        rotation: &mut RotationState,
        host: &mut dyn RenderHost,
    ) {
        sequencer.tick(dt_ms, registry, rotation);
        rotation.tick(registry);
        host.draw(registry);
        self.frame += 1;
    }
}
