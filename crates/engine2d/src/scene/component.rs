//! Component trait and capability dispatch
//!
//! A component is attached to exactly one entity and may expose any subset of
//! the capabilities below. The scene graph asks each component for the
//! capability it needs during a traversal instead of filtering on concrete
//! types, so new component kinds plug in without touching the traversal code.

use std::any::Any;

use super::scene_graph::{SceneGraph, TransformMut};
use super::transform::Transform;
use crate::foundation::collections::EntityId;
use crate::foundation::math::Mat4;
use crate::input::InputManager;
use crate::render::{RenderBackend, Viewport};

/// Behaviour or data unit attached to an entity
pub trait Component: Any {
    /// Display name
    fn name(&self) -> &str;

    /// Upcast for type-based lookup
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for type-based lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Per-tick update capability
    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        None
    }

    /// Per-frame draw capability
    fn as_drawable(&self) -> Option<&dyn Drawable> {
        None
    }

    /// One-time initialization on scene activation
    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        None
    }

    /// View matrix provider
    fn as_camera(&self) -> Option<&dyn Camera> {
        None
    }
}

/// Components that run once per tick
pub trait Updatable {
    /// Advance one tick
    fn update(&mut self, ctx: &mut UpdateContext<'_>);
}

/// Components that run once when their scene becomes current
pub trait Initializable {
    /// Run one-time setup
    fn initialize(&mut self, ctx: &mut UpdateContext<'_>);
}

/// Components that submit draw calls
pub trait Drawable {
    /// Draw with the entity's fully composed world-view-projection matrix
    fn draw(&self, ctx: &mut DrawContext<'_>, world_view_proj: &Mat4);
}

/// Components that supply a view matrix
pub trait Camera {
    /// The camera's own transform, independent of its entity's
    fn transform(&self) -> &Transform;

    /// View matrix used to build the scene's view-projection
    fn view_matrix(&self) -> Mat4 {
        *self.transform().world_matrix()
    }
}

/// Per-frame inputs shared by every component hook
#[derive(Clone, Copy)]
pub struct FrameInput<'a> {
    /// Input signals polled for this frame
    pub input: &'a InputManager,
    /// Size of the render target in pixels
    pub viewport: Viewport,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

/// Context handed to update and initialize hooks
///
/// Sibling components on `entity` stay reachable through `graph`; only the
/// running component itself is out of its slot until its hook returns.
pub struct UpdateContext<'a> {
    /// Entity owning the running component
    pub entity: EntityId,
    /// Scene graph, for transform mutation and entity lookup
    pub graph: &'a mut SceneGraph,
    /// Input signals polled for this frame
    pub input: &'a InputManager,
    /// Size of the render target in pixels
    pub viewport: Viewport,
    /// Seconds since the previous frame
    pub delta_time: f32,
}

impl<'a> UpdateContext<'a> {
    pub(crate) fn new(entity: EntityId, graph: &'a mut SceneGraph, frame: &FrameInput<'a>) -> Self {
        Self {
            entity,
            graph,
            input: frame.input,
            viewport: frame.viewport,
            delta_time: frame.delta_time,
        }
    }

    /// Transform of the owning entity
    pub fn transform(&self) -> Option<&Transform> {
        self.graph.transform(self.entity)
    }

    /// Mutable transform of the owning entity, propagating to its subtree
    pub fn transform_mut(&mut self) -> Option<TransformMut<'_>> {
        self.graph.transform_mut(self.entity)
    }
}

/// Context handed to draw hooks
pub struct DrawContext<'a> {
    /// Backend receiving draw calls
    pub backend: &'a mut dyn RenderBackend,
}
