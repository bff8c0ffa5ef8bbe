//! Built-in choreography sets
//!
//! The three historical viewer variants, expressed as data against the
//! standard scene (entities `model`, `model_container`, `thingy`,
//! `spiral`; `model` rests at (38, -17, -20), `model_container` at
//! (0, 0, -2), `thingy` at (10, 0, 0)). Delays in a step list are
//! sequential, so the variants' parallel timers at absolute offsets appear
//! here as deltas in firing order.

use crate::app::SceneApp;
use choreo_core::Vec3;
use choreo_sequencer::{Choreography, TransformField};

/// Trigger id: reverse / main action button
pub const ROTATE_OTHER_DIR: &str = "rotateotherdir";
/// Trigger id: cleaning jet button
pub const CLEANING_JET: &str = "cleaningjet";
/// Trigger id: ice visualization button (stub)
pub const VIZUALIZE: &str = "vizualize";

/// Raise the jet for two seconds, then settle it back
pub fn cleaning_jet() -> Choreography {
    Choreography::new()
        .set_position("thingy", Vec3::new(10.0, 3.0, 0.0))
        .delay(2000.0)
        .restore_origin("thingy", TransformField::Position)
}

/// The ice visualization stub: registered, zero steps
pub fn vizualize_stub() -> Choreography {
    Choreography::new()
}

/// Variant 1: full jet sweep
///
/// Shift the model and its container aside, bring up the jet and the
/// spiral overlay at two seconds, reverse the idle spin at seven, and
/// settle everything back at twenty.
pub fn jet_sweep() -> Choreography {
    Choreography::new()
        .set_position("model", Vec3::new(48.0, -17.0, -20.0))
        .set_position("model_container", Vec3::new(10.0, 0.0, -2.0))
        .delay(2000.0)
        .set_position("thingy", Vec3::new(10.0, 3.0, 0.0))
        .set_visible("spiral", true)
        .set_position("spiral", Vec3::new(49.0, -5.0, -20.0))
        .set_scale("spiral", Vec3::splat(1.7))
        .delay(5000.0)
        .toggle_rotation_sign()
        .delay(13000.0)
        .restore_origin("model", TransformField::Position)
        .restore_origin("model_container", TransformField::Position)
        .restore_origin("thingy", TransformField::Position)
        .set_visible("spiral", false)
}

/// Variant 3: spiral spin
///
/// Pull the model and container to x = 10 and show the spiral for one
/// second; it spins with the scene while visible. Hiding it reverses the
/// idle rotation.
pub fn spiral_spin() -> Choreography {
    Choreography::new()
        .set_position("model", Vec3::new(10.0, -17.0, -20.0))
        .set_position("model_container", Vec3::new(10.0, 0.0, -2.0))
        .set_visible("spiral", true)
        .delay(1000.0)
        .set_visible("spiral", false)
        .toggle_rotation_sign()
}

/// Variant 1 trigger set: the jet sweep on the main button
pub fn register_jet_sweep_variant(app: &mut SceneApp) {
    app.register(ROTATE_OTHER_DIR, jet_sweep());
}

/// Variant 2 trigger set: plain reverse, cleaning jet, stub
pub fn register_reverse_variant(app: &mut SceneApp) {
    app.register(ROTATE_OTHER_DIR, Choreography::new().toggle_rotation_sign());
    app.register(CLEANING_JET, cleaning_jet());
    app.register(VIZUALIZE, vizualize_stub());
}

/// Variant 3 trigger set: spiral spin, cleaning jet, stub
pub fn register_spiral_variant(app: &mut SceneApp) {
    app.register(ROTATE_OTHER_DIR, spiral_spin());
    app.register(CLEANING_JET, cleaning_jet());
    app.register(VIZUALIZE, vizualize_stub());
}
