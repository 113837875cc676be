//! Scene description files (`.ron`)
//!
//! A description is plain data. [`SceneBuilder`] turns it into a live
//! [`Scene`], loading textures and tilemaps and instantiating behaviours on
//! the way. Numbers are validated here: once values reach the transform API
//! they are trusted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ProjectError;
use crate::assets::AssetManager;
use crate::components::{FixedCamera, FollowCamera, Script, SpriteRenderer, TilemapRenderer};
use crate::foundation::collections::EntityId;
use crate::foundation::math::Vec2;
use crate::scene::{ComponentRef, Pose, Scene, Transform, Transformable};
use crate::scripting::ScriptRegistry;
use crate::tiling::{Tilemap, Tileset};

fn one() -> f32 {
    1.0
}

/// Local pose as written in scene files, rotation in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformDescription {
    /// Translation X
    #[serde(default)]
    pub x: f32,
    /// Translation Y
    #[serde(default)]
    pub y: f32,
    /// Rotation in radians
    #[serde(default)]
    pub r: f32,
    /// Scale X
    #[serde(default = "one")]
    pub sx: f32,
    /// Scale Y
    #[serde(default = "one")]
    pub sy: f32,
}

impl Default for TransformDescription {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            r: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }
}

impl TransformDescription {
    /// Check every field is a finite number
    pub fn validate(&self) -> Result<(), String> {
        let fields = [("x", self.x), ("y", self.y), ("r", self.r), ("sx", self.sx), ("sy", self.sy)];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(format!("{} must be finite, got {}", field, value)),
            None => Ok(()),
        }
    }

    /// Local pose described by the fields
    pub fn to_pose(&self) -> Pose {
        Pose {
            translation: Vec2::new(self.x, self.y),
            scale: Vec2::new(self.sx, self.sy),
            rotation: self.r,
        }
    }

    fn to_transform(&self) -> Transform {
        let mut transform = Transform::new();
        transform.set_local(self.to_pose());
        transform
    }
}

/// Tileset atlas layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetDescription {
    /// Atlas texture path
    pub texture: String,
    /// Tiles per atlas row
    pub row_length: u32,
    /// Tiles per atlas column
    pub col_length: u32,
    /// Usable tiles, defaults to the full atlas
    #[serde(default)]
    pub num_tiles: Option<u32>,
}

impl TilesetDescription {
    /// Check the atlas layout, returning the number of usable tiles
    ///
    /// Both dimensions must be non-zero and `num_tiles` may not exceed the
    /// atlas size.
    pub fn validate(&self) -> Result<u32, String> {
        if self.row_length == 0 || self.col_length == 0 {
            return Err(format!(
                "atlas dimensions must be non-zero, got {}x{}",
                self.row_length, self.col_length
            ));
        }
        let capacity = self.row_length.checked_mul(self.col_length).ok_or_else(|| {
            format!("atlas of {}x{} tiles is too large", self.row_length, self.col_length)
        })?;
        match self.num_tiles {
            Some(num_tiles) if num_tiles > capacity => Err(format!(
                "num_tiles {} exceeds the {} tiles of the atlas",
                num_tiles, capacity
            )),
            Some(num_tiles) => Ok(num_tiles),
            None => Ok(capacity),
        }
    }
}

/// A component and its settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentDescription {
    /// Textured quad
    SpriteRenderer {
        /// Texture path
        texture: String,
    },
    /// Tile grid
    TilemapRenderer {
        /// Tilemap text file path
        tilemap: String,
        /// Atlas layout
        tileset: TilesetDescription,
    },
    /// Behaviour host
    Script {
        /// File the behaviour is declared in
        source_file: String,
        /// Registered behaviour type
        class_name: String,
    },
    /// Camera following the entity
    FollowCamera {
        /// Offset applied after centring
        #[serde(default)]
        offset: Option<TransformDescription>,
        /// Make this the scene's camera
        #[serde(default)]
        active: bool,
    },
    /// Camera with a constant view
    FixedCamera {
        /// View transform
        #[serde(default)]
        transform: Option<TransformDescription>,
        /// Make this the scene's camera
        #[serde(default)]
        active: bool,
    },
}

/// One entity and its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescription {
    /// Entity name
    pub name: String,
    /// Local pose, identity when absent
    #[serde(default)]
    pub transform: Option<TransformDescription>,
    /// Child entities in order
    #[serde(default)]
    pub children: Vec<EntityDescription>,
    /// Components in attachment order
    #[serde(default)]
    pub components: Vec<ComponentDescription>,
}

/// Root entities of a scene file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Root entities in order
    #[serde(default)]
    pub entities: Vec<EntityDescription>,
}

impl SceneDescription {
    /// Parse RON text
    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

/// Builds a [`Scene`] from a description
pub struct SceneBuilder<'a> {
    base_dir: &'a Path,
    assets: &'a mut AssetManager,
    scripts: &'a ScriptRegistry,
}

impl<'a> SceneBuilder<'a> {
    /// Builder resolving file paths against `base_dir`
    pub fn new(base_dir: &'a Path, assets: &'a mut AssetManager, scripts: &'a ScriptRegistry) -> Self {
        Self {
            base_dir,
            assets,
            scripts,
        }
    }

    /// Build the scene
    pub fn build(&mut self, name: &str, description: &SceneDescription) -> Result<Scene, ProjectError> {
        let mut scene = Scene::new(name);
        for entity in &description.entities {
            let id = scene.add_entity(entity.name.clone());
            self.populate(&mut scene, id, entity)?;
        }
        Ok(scene)
    }

    fn populate(&mut self, scene: &mut Scene, id: EntityId, description: &EntityDescription) -> Result<(), ProjectError> {
        if let Some(transform) = &description.transform {
            transform.validate().map_err(|message| ProjectError::InvalidTransform {
                entity: description.name.clone(),
                message,
            })?;
            if let Some(mut handle) = scene.transform_mut(id) {
                handle.set_local(transform.to_pose());
            }
        }

        for component in &description.components {
            self.attach(scene, id, &description.name, component)?;
        }

        for child in &description.children {
            let child_id = scene.add_child(id, child.name.clone())?;
            self.populate(scene, child_id, child)?;
        }
        Ok(())
    }

    fn attach(
        &mut self,
        scene: &mut Scene,
        id: EntityId,
        entity: &str,
        component: &ComponentDescription,
    ) -> Result<(), ProjectError> {
        match component {
            ComponentDescription::SpriteRenderer { texture } => {
                let path = self.resolve(texture);
                let texture = self.assets.load_texture(path)?;
                scene.add_component(id, SpriteRenderer::with_texture(texture))?;
            }
            ComponentDescription::TilemapRenderer { tilemap, tileset } => {
                let num_tiles = tileset.validate().map_err(|message| ProjectError::InvalidTileset {
                    entity: entity.to_string(),
                    message,
                })?;
                let path = self.resolve(tilemap);
                let text = std::fs::read_to_string(&path).map_err(|source| ProjectError::Io { path, source })?;
                let atlas = self.resolve(&tileset.texture);
                let texture = self.assets.load_texture(atlas)?;
                let tileset = Tileset {
                    texture,
                    row_length: tileset.row_length,
                    col_length: tileset.col_length,
                    num_tiles,
                };
                scene.add_component(id, TilemapRenderer::with(Tilemap::parse(&text), tileset))?;
            }
            ComponentDescription::Script {
                source_file,
                class_name,
            } => {
                let mut script = Script::new(source_file.clone(), class_name.clone());
                script.on_script_load(self.scripts.instantiate(class_name)?);
                scene.add_component(id, script)?;
            }
            ComponentDescription::FollowCamera { offset, active } => {
                let offset = Self::checked_transform(entity, offset.as_ref())?;
                let camera = scene.add_component(id, FollowCamera::with_offset(offset))?;
                Self::activate_camera(scene, camera, *active)?;
            }
            ComponentDescription::FixedCamera { transform, active } => {
                let transform = Self::checked_transform(entity, transform.as_ref())?;
                let camera = scene.add_component(id, FixedCamera::new(transform))?;
                Self::activate_camera(scene, camera, *active)?;
            }
        }
        Ok(())
    }

    fn checked_transform(entity: &str, description: Option<&TransformDescription>) -> Result<Transform, ProjectError> {
        let description = description.copied().unwrap_or_default();
        description.validate().map_err(|message| ProjectError::InvalidTransform {
            entity: entity.to_string(),
            message,
        })?;
        Ok(description.to_transform())
    }

    fn activate_camera(scene: &mut Scene, camera: ComponentRef, active: bool) -> Result<(), ProjectError> {
        if !active {
            return Ok(());
        }
        if scene.active_camera().is_some() {
            log::warn!("Scene '{}' declares more than one active camera, the last one wins", scene.name());
        }
        scene.set_active_camera(camera)?;
        Ok(())
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.base_dir.join(relative)
    }
}
