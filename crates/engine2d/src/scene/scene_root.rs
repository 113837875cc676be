//! Scene: root container driving per-frame update and draw

use super::component::{Component, DrawContext, FrameInput};
use super::scene_graph::{SceneError, SceneGraph, TransformMut};
use crate::foundation::collections::EntityId;
use crate::foundation::math::Mat4;
use crate::render::RenderBackend;

/// Position of a component inside an entity's component list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    /// Owning entity
    pub entity: EntityId,
    /// Attachment index
    pub index: usize,
}

/// A tree of entities plus the active camera
///
/// Update and draw both visit root entities in insertion order, depth-first.
/// There is no z-ordering.
#[derive(Debug, Default)]
pub struct Scene {
    name: String,
    graph: SceneGraph,
    active_camera: Option<ComponentRef>,
    activated: bool,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a root entity
    pub fn add_entity(&mut self, name: impl Into<String>) -> EntityId {
        self.graph.create_root(name)
    }

    /// Append a child entity under `parent`
    pub fn add_child(&mut self, parent: EntityId, name: impl Into<String>) -> Result<EntityId, SceneError> {
        self.graph.add_child(parent, name)
    }

    /// Attach a component, returning a reference usable as camera handle
    pub fn add_component<C: Component>(&mut self, entity: EntityId, component: C) -> Result<ComponentRef, SceneError> {
        let index = self.graph.add_component(entity, component)?;
        Ok(ComponentRef { entity, index })
    }

    /// Root entities in insertion order
    pub fn roots(&self) -> &[EntityId] {
        self.graph.roots()
    }

    /// The entity tree
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The entity tree, mutably
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Shorthand for `graph_mut().transform_mut(id)`
    pub fn transform_mut(&mut self, id: EntityId) -> Option<TransformMut<'_>> {
        self.graph.transform_mut(id)
    }

    /// Use the camera component at `camera` for view composition
    pub fn set_active_camera(&mut self, camera: ComponentRef) -> Result<(), SceneError> {
        let entity = self
            .graph
            .get(camera.entity)
            .ok_or(SceneError::EntityNotFound(camera.entity))?;
        let component = entity.component_at(camera.index).ok_or(SceneError::ComponentNotFound {
            entity: camera.entity,
            index: camera.index,
        })?;
        if component.as_camera().is_none() {
            return Err(SceneError::NotACamera(component.name().to_string()));
        }

        log::debug!("Scene '{}' active camera: '{}' on '{}'", self.name, component.name(), entity.name());
        self.active_camera = Some(camera);
        Ok(())
    }

    /// Draw without a camera from now on
    pub fn clear_active_camera(&mut self) {
        self.active_camera = None;
    }

    /// The active camera, if any
    pub fn active_camera(&self) -> Option<ComponentRef> {
        self.active_camera
    }

    /// View matrix of the active camera
    pub fn camera_view_matrix(&self) -> Option<Mat4> {
        let camera = self.active_camera?;
        self.graph
            .get(camera.entity)?
            .component_at(camera.index)?
            .as_camera()
            .map(|c| c.view_matrix())
    }

    /// Whether [`Scene::on_activate`] already ran
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// One-time initialization when the scene becomes current
    pub fn on_activate(&mut self, frame: &FrameInput<'_>) {
        if self.activated {
            log::warn!("Scene '{}' is already active, skipping initialization", self.name);
            return;
        }
        self.activated = true;

        log::info!("Activating scene '{}' ({} entities)", self.name, self.graph.len());
        for root in self.graph.roots().to_vec() {
            self.graph.initialize_entity(root, frame);
        }
    }

    /// Update every root entity in insertion order
    pub fn update(&mut self, frame: &FrameInput<'_>) {
        for root in self.graph.roots().to_vec() {
            self.graph.update_entity(root, frame);
        }
    }

    /// Draw every root entity in insertion order
    ///
    /// With a camera the view-projection is `projection * view`, otherwise
    /// the projection is used unmodified.
    pub fn draw(&self, backend: &mut dyn RenderBackend, projection: &Mat4) {
        let view_proj = match self.camera_view_matrix() {
            Some(view) => projection * view,
            None => *projection,
        };

        let mut ctx = DrawContext { backend };
        for &root in self.graph.roots() {
            self.graph.draw_entity(root, &mut ctx, &view_proj);
        }
    }
}
