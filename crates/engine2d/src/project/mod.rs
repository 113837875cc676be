//! Project loading
//!
//! A project is a directory holding `project.toml` plus the scene files,
//! textures and tilemaps it references. Loading a project only reads its
//! manifest; scenes are built on first request and kept afterwards.

pub mod manifest;
pub mod scene_file;

pub use manifest::{AxisBinding, BooleanBinding, InputBindings, ProjectInfo, ProjectManifest, SceneDeclaration};
pub use scene_file::{
    ComponentDescription, EntityDescription, SceneBuilder, SceneDescription, TilesetDescription,
    TransformDescription,
};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::{AssetError, AssetManager};
use crate::foundation::time::Stopwatch;
use crate::scene::{Scene, SceneError};
use crate::scripting::{ScriptError, ScriptRegistry};

/// Manifest file name inside a project directory
pub const MANIFEST_FILE: &str = "project.toml";

/// Project loading errors
#[derive(Error, Debug)]
pub enum ProjectError {
    /// No project has been loaded yet
    #[error("No project loaded")]
    NoProject,

    /// A project file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// `project.toml` is malformed
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    /// A scene file is malformed
    #[error("Invalid scene file {path:?}: {message}")]
    SceneFile {
        /// Scene file
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The scene is not declared in the manifest
    #[error("Unknown scene: {0}")]
    UnknownScene(String),

    /// A transform in a scene file holds unusable numbers
    #[error("Invalid transform on entity '{entity}': {message}")]
    InvalidTransform {
        /// Entity carrying the transform
        entity: String,
        /// What is wrong
        message: String,
    },

    /// A tileset in a scene file describes an impossible atlas
    #[error("Invalid tileset on entity '{entity}': {message}")]
    InvalidTileset {
        /// Entity carrying the tilemap renderer
        entity: String,
        /// What is wrong
        message: String,
    },

    /// Texture loading failed
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Behaviour instantiation failed
    #[error(transparent)]
    Script(#[from] ScriptError),

    /// Scene construction failed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Loaded project: manifest plus the scenes built so far
#[derive(Debug, Default)]
pub struct ProjectManager {
    root: Option<PathBuf>,
    manifest: ProjectManifest,
    loaded: HashMap<String, Scene>,
}

impl ProjectManager {
    /// Manager with no project
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `project.toml` from `dir`, replacing any previous project
    pub fn load_project(&mut self, dir: impl AsRef<Path>) -> Result<&ProjectInfo, ProjectError> {
        let dir = dir.as_ref();
        let path = dir.join(MANIFEST_FILE);
        let text = std::fs::read_to_string(&path).map_err(|source| ProjectError::Io {
            path: path.clone(),
            source,
        })?;

        self.manifest = ProjectManifest::parse(&text)?;
        self.root = Some(dir.to_path_buf());
        self.loaded.clear();

        log::info!(
            "Loaded project '{}' from {:?} ({} scenes)",
            self.manifest.info.name,
            dir,
            self.manifest.scenes.len()
        );
        Ok(&self.manifest.info)
    }

    /// Project directory
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Project metadata
    pub fn info(&self) -> &ProjectInfo {
        &self.manifest.info
    }

    /// Declared scenes in manifest order
    pub fn scenes(&self) -> &[SceneDeclaration] {
        &self.manifest.scenes
    }

    /// Input bindings declared by the project
    pub fn input_bindings(&self) -> &InputBindings {
        &self.manifest.input
    }

    /// Whether the named scene has been built and is held here
    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains_key(name)
    }

    /// Build the named scene, or return the copy built earlier
    pub fn load_scene(
        &mut self,
        name: &str,
        assets: &mut AssetManager,
        scripts: &ScriptRegistry,
    ) -> Result<&mut Scene, ProjectError> {
        if !self.loaded.contains_key(name) {
            let scene = self.build_scene(name, assets, scripts)?;
            self.loaded.insert(name.to_string(), scene);
        }
        self.loaded
            .get_mut(name)
            .ok_or_else(|| ProjectError::UnknownScene(name.to_string()))
    }

    /// Move a built scene out of the manager
    pub fn take_scene(&mut self, name: &str) -> Option<Scene> {
        self.loaded.remove(name)
    }

    /// Hand a scene back so later loads reuse it
    pub fn restore_scene(&mut self, scene: Scene) {
        self.loaded.insert(scene.name().to_string(), scene);
    }

    fn build_scene(&self, name: &str, assets: &mut AssetManager, scripts: &ScriptRegistry) -> Result<Scene, ProjectError> {
        let root = self.root.as_deref().ok_or(ProjectError::NoProject)?;
        let declaration = self
            .manifest
            .scene(name)
            .ok_or_else(|| ProjectError::UnknownScene(name.to_string()))?;

        let stopwatch = Stopwatch::start_new();
        let path = root.join(&declaration.path);
        let text = std::fs::read_to_string(&path).map_err(|source| ProjectError::Io {
            path: path.clone(),
            source,
        })?;
        let description = SceneDescription::parse(&text).map_err(|e| ProjectError::SceneFile {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let scene = SceneBuilder::new(root, assets, scripts).build(name, &description)?;
        log::info!(
            "Built scene '{}' ({} entities) in {:.2}ms",
            name,
            scene.graph().len(),
            stopwatch.elapsed_millis()
        );
        Ok(scene)
    }
}
