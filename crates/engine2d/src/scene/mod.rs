//! Scene management system
//!
//! Entity tree, hierarchical transforms and component dispatch.
//!
//! ## Architecture
//!
//! ```text
//! Scene
//!   └─ SceneGraph (slot map arena)
//!        └─ Entity ── Transform (local + cached global + world matrix)
//!             ├─ children (ids, insertion order)
//!             └─ components (Box<dyn Component>, attachment order)
//! ```
//!
//! Per frame:
//! - `Scene::update` walks roots depth-first; each entity updates its children,
//!   then its updatable components.
//! - `Scene::draw` builds the view-projection from the active camera and walks
//!   the tree again; drawable components receive `view_proj * world_matrix`.
//! - Transform mutations propagate eagerly to the whole subtree.

mod component;
mod entity;
mod scene_graph;
mod scene_root;
mod transform;

#[cfg(test)]
mod tests;

pub use component::{
    Camera, Component, DrawContext, Drawable, FrameInput, Initializable, Updatable, UpdateContext,
};
pub use entity::Entity;
pub use scene_graph::{SceneError, SceneGraph, TransformMut};
pub use scene_root::{ComponentRef, Scene};
pub use transform::{Pose, Transform, Transformable};
