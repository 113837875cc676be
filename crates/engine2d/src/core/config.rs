//! # Engine Settings
//!
//! Everything the engine needs before a project is loaded: the target window
//! size, logging, asset search paths and the project to start with. Settings
//! are plain serde structs so they load from `engine.toml` or `engine.ron`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::render::Viewport;

/// # Window Settings
///
/// Size of the render target. Headless runs still use it for projection and
/// camera centring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl WindowSettings {
    /// Create window settings
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    /// Viewport covering the whole window
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self::new("engine2d", 800, 600)
    }
}

/// # Asset Settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directories searched, in order, when resolving relative asset paths
    pub search_paths: Vec<String>,
}

impl AssetSettings {
    /// Append a search path
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_paths.push(path.into());
        self
    }
}

/// # Engine Settings
///
/// Top-level settings handed to [`Engine::new`](crate::engine::Engine::new).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Render target
    pub window: WindowSettings,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Asset resolution
    pub assets: AssetSettings,
    /// Project directory loaded at startup
    pub project: Option<PathBuf>,
    /// Scene activated once the project is loaded
    pub start_scene: Option<String>,
    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,
    /// Use a constant frame step instead of wall-clock time
    pub fixed_timestep: Option<f32>,
}

impl EngineSettings {
    /// Default settings
    pub fn new() -> Self {
        Self {
            window: WindowSettings::default(),
            log_level: "info".to_string(),
            assets: AssetSettings::default(),
            project: None,
            start_scene: None,
            max_frames: None,
            fixed_timestep: None,
        }
    }

    /// Set the window
    pub fn with_window(mut self, window: WindowSettings) -> Self {
        self.window = window;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set asset settings
    pub fn with_assets(mut self, assets: AssetSettings) -> Self {
        self.assets = assets;
        self
    }

    /// Load this project at startup
    pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Activate this scene at startup
    pub fn with_start_scene(mut self, scene: impl Into<String>) -> Self {
        self.start_scene = Some(scene.into());
        self
    }

    /// Stop after `frames` frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Advance time by `step` seconds every frame
    pub fn with_fixed_timestep(mut self, step: f32) -> Self {
        self.fixed_timestep = Some(step);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if let Some(step) = self.fixed_timestep {
            if !(step.is_finite() && step > 0.0) {
                return Err(ConfigError::Invalid(format!("Fixed timestep must be positive, got {}", step)));
            }
        }
        if self.start_scene.is_some() && self.project.is_none() {
            return Err(ConfigError::Invalid("A start scene needs a project".to_string()));
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineSettings {}
