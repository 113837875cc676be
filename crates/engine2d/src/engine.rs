//! Core engine implementation
//!
//! The engine owns every subsystem and is passed by reference to whoever needs
//! it; there are no global singletons.

use crate::{
    application::{AppEvent, Application},
    assets::{AssetManager, TextureLoader},
    config::ConfigError,
    core::config::EngineSettings,
    foundation::{math::Mat4, time::Timer},
    input::InputManager,
    project::{ProjectError, ProjectInfo, ProjectManager},
    render::{RenderBackend, Viewport},
    scene::{FrameInput, Scene},
    scripting::ScriptRegistry,
};
use std::path::Path;
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates all subsystems and drives the frame loop.
pub struct Engine {
    /// Texture store
    pub assets: AssetManager,

    /// Input handling system
    pub input: InputManager,

    /// Loaded project and its scenes
    pub projects: ProjectManager,

    /// Behaviour factories used when building scenes
    pub scripts: ScriptRegistry,

    settings: EngineSettings,
    timer: Timer,
    viewport: Viewport,
    active_scene: Option<Scene>,
    running: bool,
}

impl Engine {
    /// Create a new engine instance reading textures from disk
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let assets = AssetManager::new(&settings.assets);
        Self::build(settings, assets)
    }

    /// Create a new engine instance with a custom texture loader
    pub fn with_loader(settings: EngineSettings, loader: Box<dyn TextureLoader>) -> Result<Self, EngineError> {
        let assets = AssetManager::with_loader(&settings.assets, loader);
        Self::build(settings, assets)
    }

    fn build(settings: EngineSettings, assets: AssetManager) -> Result<Self, EngineError> {
        settings.validate()?;
        log::info!(
            "Initializing engine ({}x{})",
            settings.window.width,
            settings.window.height
        );

        let timer = match settings.fixed_timestep {
            Some(step) => Timer::fixed(step),
            None => Timer::new(),
        };
        Ok(Self {
            assets,
            input: InputManager::new(),
            projects: ProjectManager::new(),
            scripts: ScriptRegistry::new(),
            viewport: settings.window.viewport(),
            settings,
            timer,
            active_scene: None,
            running: true,
        })
    }

    /// Run the frame loop with the given application
    ///
    /// Loads the configured project and start scene, then runs frames until
    /// the engine is asked to quit or `max_frames` is reached.
    pub fn run<T: Application>(
        settings: EngineSettings,
        app: &mut T,
        backend: &mut dyn RenderBackend,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(settings)?;
        engine.run_with(app, backend)
    }

    /// Run the frame loop on an already constructed engine
    pub fn run_with<T: Application>(&mut self, app: &mut T, backend: &mut dyn RenderBackend) -> Result<(), EngineError> {
        if let Some(project) = self.settings.project.clone() {
            self.load_project(project)?;
        }

        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        if self.active_scene.is_none() {
            if let Some(scene) = self.settings.start_scene.clone() {
                self.activate_scene(&scene)?;
            }
        }

        log::info!("Starting main loop...");
        while self.running {
            let delta_time = self.timer.delta_time();
            app.update(self, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

            self.frame(backend);

            if self.settings.max_frames.is_some_and(|max| self.timer.frame_count() >= max) {
                log::info!("Reached frame limit of {}", self.timer.frame_count());
                self.quit();
            }
        }

        app.cleanup(self);
        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Advance and draw one frame
    ///
    /// Order: timer, input, scene update, then draw between `begin_frame` and
    /// `end_frame`.
    pub fn frame(&mut self, backend: &mut dyn RenderBackend) {
        self.timer.update();
        self.input.update();

        let frame = FrameInput {
            input: &self.input,
            viewport: self.viewport,
            delta_time: self.timer.delta_time(),
        };
        if let Some(scene) = self.active_scene.as_mut() {
            scene.update(&frame);
        }

        backend.begin_frame();
        if let Some(scene) = self.active_scene.as_ref() {
            scene.draw(backend, &self.viewport.projection());
        }
        backend.end_frame();
    }

    /// Load a project directory and register its input bindings
    pub fn load_project(&mut self, dir: impl AsRef<Path>) -> Result<&ProjectInfo, EngineError> {
        if let Some(previous) = self.active_scene.take() {
            log::debug!("Dropping scene '{}' of the previous project", previous.name());
        }
        let previous = self
            .projects
            .root()
            .is_some()
            .then(|| self.projects.input_bindings().clone());
        self.projects.load_project(dir)?;
        if let Some(previous) = previous {
            let removed = previous.remove(&mut self.input);
            log::debug!("Removed {} input signals of the previous project", removed);
        }
        let registered = self.projects.input_bindings().apply(&mut self.input);
        log::debug!("Registered {} input signals", registered);
        Ok(self.projects.info())
    }

    /// Make a project scene current, building it first if needed
    ///
    /// The scene previously current goes back to the project manager, so
    /// switching back later resumes it where it was.
    pub fn activate_scene(&mut self, name: &str) -> Result<(), EngineError> {
        if self.active_scene.as_ref().is_some_and(|scene| scene.name() == name) {
            log::debug!("Scene '{}' is already current", name);
            return Ok(());
        }

        self.projects.load_scene(name, &mut self.assets, &self.scripts)?;
        let scene = self
            .projects
            .take_scene(name)
            .ok_or_else(|| ProjectError::UnknownScene(name.to_string()))?;
        self.set_scene(scene);
        Ok(())
    }

    /// Make `scene` current and run its one-time activation
    pub fn set_scene(&mut self, scene: Scene) {
        if let Some(previous) = self.active_scene.replace(scene) {
            log::debug!("Suspending scene '{}'", previous.name());
            self.projects.restore_scene(previous);
        }

        let frame = FrameInput {
            input: &self.input,
            viewport: self.viewport,
            delta_time: 0.0,
        };
        if let Some(scene) = self.active_scene.as_mut() {
            if !scene.is_activated() {
                scene.on_activate(&frame);
            }
        }
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => self.quit(),
            AppEvent::WindowResized { width, height } if width == 0 || height == 0 => {
                log::debug!("Ignoring resize to {}x{}, keeping the previous viewport", width, height);
            }
            AppEvent::WindowResized { width, height } => {
                log::debug!("Viewport resized to {}x{}", width, height);
                self.viewport = Viewport::new(width as f32, height as f32);
            }
            AppEvent::KeyInput { key, pressed } => self.input.handle_key_input(key, pressed),
            AppEvent::MouseButton { button, pressed } => self.input.handle_mouse_button(button, pressed),
            AppEvent::MouseMoved { x, y } => self.input.handle_mouse_move(x, y),
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the frame loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Settings the engine was built with
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Current scene
    pub fn scene(&self) -> Option<&Scene> {
        self.active_scene.as_ref()
    }

    /// Current scene, mutably
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.active_scene.as_mut()
    }

    /// Render target size
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen-space projection of the current viewport
    pub fn projection(&self) -> Mat4 {
        self.viewport.projection()
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("viewport", &self.viewport)
            .field("scene", &self.active_scene.as_ref().map(Scene::name))
            .field("frames", &self.timer.frame_count())
            .field("running", &self.running)
            .finish()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Settings failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Project or scene loading failed
    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
