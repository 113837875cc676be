//! `project.toml`: project metadata, scene declarations and input bindings

use serde::{Deserialize, Serialize};

use crate::input::{AxisInput, BooleanInput, InputManager, KeyCode};

fn unknown() -> String {
    "Unknown".to_string()
}

/// Descriptive project metadata
///
/// Missing fields read as `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project name
    #[serde(default = "unknown")]
    pub name: String,
    /// Engine version the project was made with
    #[serde(default = "unknown")]
    pub engine_version: String,
    /// Game version
    #[serde(default = "unknown")]
    pub game_version: String,
    /// Creation date, free form
    #[serde(default = "unknown")]
    pub date_created: String,
    /// Last modification date, free form
    #[serde(default = "unknown")]
    pub date_modified: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: unknown(),
            engine_version: unknown(),
            game_version: unknown(),
            date_created: unknown(),
            date_modified: unknown(),
        }
    }
}

/// A scene name and the project-relative path of its description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDeclaration {
    /// Scene name
    pub name: String,
    /// Path relative to the project directory
    pub path: String,
}

/// Boolean signal bound to keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanBinding {
    /// Signal name
    pub name: String,
    /// Keys activating the signal
    #[serde(default)]
    pub keys: Vec<KeyCode>,
}

/// Axis signal bound to keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisBinding {
    /// Signal name
    pub name: String,
    /// Keys pushing towards +1
    #[serde(default)]
    pub positive: Vec<KeyCode>,
    /// Keys pushing towards -1
    #[serde(default)]
    pub negative: Vec<KeyCode>,
}

/// Named input signals declared by the project
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputBindings {
    /// Boolean signals
    #[serde(default)]
    pub booleans: Vec<BooleanBinding>,
    /// Axis signals
    #[serde(default)]
    pub axes: Vec<AxisBinding>,
}

impl InputBindings {
    /// Register every binding, returning how many were accepted
    pub fn apply(&self, input: &mut InputManager) -> usize {
        let booleans = self
            .booleans
            .iter()
            .filter(|b| input.add_boolean_input(BooleanInput::with_keys(b.name.clone(), &b.keys)))
            .count();
        let axes = self
            .axes
            .iter()
            .filter(|a| input.add_axis_input(AxisInput::with_keys(a.name.clone(), &a.positive, &a.negative)))
            .count();
        booleans + axes
    }

    /// Unregister every signal named by these bindings, returning how many existed
    pub fn remove(&self, input: &mut InputManager) -> usize {
        let booleans = self
            .booleans
            .iter()
            .filter(|b| input.remove_boolean_input(&b.name))
            .count();
        let axes = self.axes.iter().filter(|a| input.remove_axis_input(&a.name)).count();
        booleans + axes
    }
}

/// Parsed `project.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Metadata
    #[serde(default)]
    pub info: ProjectInfo,
    /// Scene declarations in file order
    #[serde(default)]
    pub scenes: Vec<SceneDeclaration>,
    /// Input bindings
    #[serde(default)]
    pub input: InputBindings,
}

impl ProjectManifest {
    /// Parse manifest text
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let mut manifest: Self = toml::from_str(text)?;
        manifest.dedup_scenes();
        Ok(manifest)
    }

    /// Declaration for a scene name
    pub fn scene(&self, name: &str) -> Option<&SceneDeclaration> {
        self.scenes.iter().find(|s| s.name == name)
    }

    // The first declaration of a name wins
    fn dedup_scenes(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.scenes.retain(|scene| {
            let first = seen.insert(scene.name.clone());
            if !first {
                log::warn!("Ignoring duplicate declaration of scene '{}' ({})", scene.name, scene.path);
            }
            first
        });
    }
}
