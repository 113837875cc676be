//! Sandbox demo application
//!
//! Loads the demo project headlessly, drives the player with a scripted key
//! sequence and switches between the two scenes. Draw calls go to a
//! [`RecordingBackend`] so the run can be inspected from the log.

mod behaviors;

use std::path::PathBuf;

use engine2d::foundation::logging;
use engine2d::prelude::*;

/// Frame at which a synthetic key event is sent
struct ScriptedKey {
    frame: u64,
    key: KeyCode,
    pressed: bool,
}

const fn key(frame: u64, key: KeyCode, pressed: bool) -> ScriptedKey {
    ScriptedKey { frame, key, pressed }
}

const KEY_SCRIPT: &[ScriptedKey] = &[
    key(10, KeyCode::D, true),
    key(70, KeyCode::D, false),
    key(80, KeyCode::S, true),
    key(110, KeyCode::S, false),
    key(120, KeyCode::Tab, true),
    key(125, KeyCode::Tab, false),
    key(160, KeyCode::Tab, true),
    key(165, KeyCode::Tab, false),
];

const SCENES: [&str; 2] = ["Main", "Overview"];

struct SandboxApp {
    frame: u64,
    scene_index: usize,
    switch_held: bool,
}

impl SandboxApp {
    fn new() -> Self {
        Self {
            frame: 0,
            scene_index: 0,
            switch_held: false,
        }
    }

    fn send_scripted_keys(&self, engine: &mut Engine) {
        for event in KEY_SCRIPT.iter().filter(|e| e.frame == self.frame) {
            log::debug!("Frame {}: {:?} {}", self.frame, event.key, if event.pressed { "down" } else { "up" });
            engine.handle_event(AppEvent::KeyInput {
                key: event.key,
                pressed: event.pressed,
            });
        }
    }

    fn log_player(engine: &Engine) {
        let Some(scene) = engine.scene() else {
            return;
        };
        let graph = scene.graph();
        let player = graph
            .roots()
            .iter()
            .copied()
            .find(|&id| graph.get(id).is_some_and(|e| e.name() == "Player"));
        if let Some(transform) = player.and_then(|id| graph.transform(id)) {
            log::info!("Player at {:?}", transform.global_translation());
        }
    }
}

impl Application for SandboxApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Initializing sandbox...");
        behaviors::register_all(&mut engine.scripts)?;
        log::info!("Project: {}", engine.projects.info().name);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        self.send_scripted_keys(engine);
        self.frame += 1;

        // Signals reflect events applied during the previous frame
        let switch = engine.input.boolean("switch_scene");
        if switch && !self.switch_held {
            self.scene_index = (self.scene_index + 1) % SCENES.len();
            let name = SCENES[self.scene_index];
            log::info!("Switching to scene '{}'", name);
            engine.activate_scene(name)?;
        }
        self.switch_held = switch;

        if engine.input.boolean("quit") {
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Sandbox ran {} frames, {} textures loaded",
            engine.timer().frame_count(),
            engine.assets.texture_count()
        );
        Self::log_player(engine);
    }
}

fn demo_project() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../resources/demo_project")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = EngineSettings::load_or_default("sandbox.toml")?
        .with_project(demo_project())
        .with_start_scene(SCENES[0])
        .with_max_frames(200)
        .with_fixed_timestep(1.0 / 60.0);
    logging::init(&settings.log_level);

    let mut app = SandboxApp::new();
    let mut backend = RecordingBackend::new();
    Engine::run(settings, &mut app, &mut backend)?;

    log::info!(
        "Last frame recorded {} draw calls over {} frames",
        backend.commands().len(),
        backend.frames()
    );
    Ok(())
}
