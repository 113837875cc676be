//! # engine2d
//!
//! A small 2D game engine built around a scene graph.
//!
//! ## Features
//!
//! - **Scene Graph**: Entity tree with hierarchical transforms, propagated eagerly
//! - **Components**: Capability-based dispatch for update, draw, init and cameras
//! - **Sprites and Tilemaps**: Textured quads and atlas tile grids
//! - **Input Signals**: Named boolean and axis inputs bound to keys
//! - **Projects**: TOML manifests and RON scene files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use engine2d::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let mut scene = Scene::new("Main");
//!         let player = scene.add_entity("Player");
//!         if let Some(mut transform) = scene.transform_mut(player) {
//!             transform.set_translation(100.0, 100.0);
//!         }
//!         engine.set_scene(scene);
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = EngineSettings::default().with_max_frames(60);
//!     let mut backend = RecordingBackend::new();
//!     Engine::run(settings, &mut MyApp, &mut backend)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod components;
pub mod assets;
pub mod render;
pub mod tiling;
pub mod input;
pub mod scripting;
pub mod project;

mod application;
mod engine;

pub use application::{AppError, AppEvent, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, AppEvent, Application, Engine, EngineError,
        assets::{AssetManager, TextureHandle},
        components::{FixedCamera, FollowCamera, Script, SpriteRenderer, TilemapRenderer},
        core::config::{AssetSettings, EngineSettings, WindowSettings},
        config::Config,
        foundation::{
            collections::EntityId,
            math::{Mat4, Vec2},
            time::{Stopwatch, Timer},
        },
        input::{AxisInput, BooleanInput, InputManager, KeyCode, MouseButton},
        render::{RecordingBackend, RenderBackend, Viewport},
        scene::{
            Camera, Component, ComponentRef, Drawable, Initializable, Scene, SceneError, SceneGraph,
            Transform, Transformable, Updatable, UpdateContext,
        },
        scripting::{Behavior, ScriptRegistry},
        tiling::{Tilemap, Tileset},
    };
}
