//! Headless viewer demo
//!
//! Assembles the standard scene with the null loader, fires the cleaning
//! jet, and steps a simulated clock — no window, no GPU. Shows the
//! cancel-on-refire behavior by pressing the button twice.
//!
//! Run with: cargo run -p choreo_app --example headless

use anyhow::Result;
use choreo_app::presets::{self, CLEANING_JET, ROTATE_OTHER_DIR};
use choreo_app::{NoopRenderHost, NullLoader, SceneApp, SceneConfig};
use tracing::info;

const SCENE: &str = r#"
    [[models]]
    name = "model"
    path = "model.gltf"
    scale = 0.6
    position = { x = 38.0, y = -17.0, z = -20.0 }
    stretch = { x = 0.7, y = 1.8, z = 0.7 }

    [[models]]
    name = "model_container"
    path = "model_container.gltf"
    scale = 4.0
    position = { x = 0.0, y = 0.0, z = -2.0 }

    [[models]]
    name = "thingy"
    path = "thingy.gltf"
    scale = 4.0
    position = { x = 10.0, y = 0.0, z = 0.0 }

    [[models]]
    name = "spiral"
    path = "spiral.gltf"
    visible = false

    [rotation]
    spinning = ["model", "spiral"]
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config: SceneConfig = toml::from_str(SCENE)?;
    let mut app = SceneApp::from_config(&config, &NullLoader, Box::new(NoopRenderHost::new()));
    presets::register_reverse_variant(&mut app);

    info!("pressing {CLEANING_JET}");
    app.fire(CLEANING_JET);
    log_thingy(&app, "right after press");

    // 500 ms later, press again: the first run is cancelled and the
    // two-second countdown starts over.
    run_for(&mut app, 500.0);
    app.fire(CLEANING_JET);
    log_thingy(&app, "after re-press at 500 ms");

    run_for(&mut app, 1900.0);
    log_thingy(&app, "1.9 s into the second run");

    run_for(&mut app, 200.0);
    log_thingy(&app, "second run elapsed");

    info!("pressing {ROTATE_OTHER_DIR} twice");
    app.fire(ROTATE_OTHER_DIR);
    app.fire(ROTATE_OTHER_DIR);
    info!(sign = ?app.rotation().sign(), frame = app.frame(), "back to the idle direction");

    Ok(())
}

/// Step 16 ms frames until `ms` of simulated time has passed
fn run_for(app: &mut SceneApp, ms: f32) {
    let mut remaining = ms;
    while remaining > 0.0 {
        let dt = remaining.min(16.0);
        app.tick(dt);
        remaining -= dt;
    }
}

fn log_thingy(app: &SceneApp, label: &str) {
    if let Ok(thingy) = app.registry().get("thingy") {
        info!(y = thingy.position.y, "{label}");
    }
}
