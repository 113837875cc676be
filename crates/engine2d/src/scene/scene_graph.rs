//! Scene graph arena
//!
//! Entities are stored in a slot map and linked by id: a parent owns the ids of
//! its children, a child only keeps a non-owning back-reference to its parent.
//! Every global pose is cached on its transform, which makes world matrix
//! reads O(1) at draw time and costs O(subtree) per transform mutation.
//!
//! The invariant maintained here: after any public call returns, every cached
//! global pose equals `compose(parent.global, local)` (or `local` for roots).

use std::ops::Deref;

use thiserror::Error;

use super::component::{Component, DrawContext, FrameInput, UpdateContext};
use super::entity::Entity;
use super::transform::{Pose, Transform, Transformable};
use crate::foundation::collections::{EntityId, SlotMap};
use crate::foundation::math::Mat4;

/// Scene graph errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a live entity
    #[error("Entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// No component at the given position
    #[error("Entity {entity:?} has no component at index {index}")]
    ComponentNotFound {
        /// Entity that was searched
        entity: EntityId,
        /// Requested component index
        index: usize,
    },

    /// The component exists but does not expose the camera capability
    #[error("Component '{0}' is not a camera")]
    NotACamera(String),
}

/// Arena of entities plus the ordered list of scene-owned roots
#[derive(Default)]
pub struct SceneGraph {
    entities: SlotMap<EntityId, Entity>,
    roots: Vec<EntityId>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity owned directly by the scene
    pub fn create_root(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.entities.insert(Entity::new(name, None));
        self.roots.push(id);
        id
    }

    /// Create an entity as the last child of `parent`
    ///
    /// The child's global pose is derived from the parent chain immediately, so
    /// it inherits whatever the ancestors look like at attach time.
    pub fn add_child(&mut self, parent: EntityId, name: impl Into<String>) -> Result<EntityId, SceneError> {
        let parent_global = self
            .entities
            .get(parent)
            .map(|p| *p.transform.global())
            .ok_or(SceneError::EntityNotFound(parent))?;

        let mut child = Entity::new(name, Some(parent));
        child.transform.recompute(Some(&parent_global));
        let id = self.entities.insert(child);

        if let Some(parent_entity) = self.entities.get_mut(parent) {
            parent_entity.children.push(id);
        }
        Ok(id)
    }

    /// Attach a component to the end of the entity's component list
    pub fn add_component<C: Component>(&mut self, entity: EntityId, component: C) -> Result<usize, SceneError> {
        self.add_boxed_component(entity, Box::new(component))
    }

    /// Attach an already boxed component, returning its index
    pub fn add_boxed_component(&mut self, entity: EntityId, component: Box<dyn Component>) -> Result<usize, SceneError> {
        let node = self
            .entities
            .get_mut(entity)
            .ok_or(SceneError::EntityNotFound(entity))?;
        log::trace!("Attaching component '{}' to '{}'", component.name(), node.name);
        node.components.push(component);
        Ok(node.components.len() - 1)
    }

    /// Root entities in insertion order
    pub fn roots(&self) -> &[EntityId] {
        &self.roots
    }

    /// Look up an entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity mutably
    ///
    /// Only the name and components are mutable through [`Entity`]; transforms
    /// go through [`SceneGraph::transform_mut`].
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Whether `id` refers to a live entity
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(id)
    }

    /// Total number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the graph holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity name
    pub fn name(&self, id: EntityId) -> Option<&str> {
        self.entities.get(id).map(Entity::name)
    }

    /// Parent of an entity
    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(id).and_then(Entity::parent)
    }

    /// Children of an entity, empty for unknown ids
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities.get(id).map(Entity::children).unwrap_or(&[])
    }

    /// Ancestors from the direct parent up to the root
    pub fn ancestors(&self, id: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            chain.push(ancestor);
            current = self.parent(ancestor);
        }
        chain
    }

    /// Depth in the tree, roots are at depth 0
    pub fn depth(&self, id: EntityId) -> usize {
        self.ancestors(id).len()
    }

    /// Transform of an entity
    pub fn transform(&self, id: EntityId) -> Option<&Transform> {
        self.entities.get(id).map(Entity::transform)
    }

    /// Mutable handle to an entity's transform
    ///
    /// Each mutator called on the handle updates the entity and its whole
    /// subtree before returning.
    pub fn transform_mut(&mut self, id: EntityId) -> Option<TransformMut<'_>> {
        if self.entities.contains_key(id) {
            Some(TransformMut { graph: self, entity: id })
        } else {
            None
        }
    }

    /// First component of type `T` on an entity
    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        self.entities.get(id)?.get_component::<T>()
    }

    /// First component of type `T` on an entity, mutably
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        self.entities.get_mut(id)?.get_component_mut::<T>()
    }

    /// All components of type `T` on an entity
    pub fn get_components<T: Component>(&self, id: EntityId) -> Vec<&T> {
        self.entities
            .get(id)
            .map(|entity| entity.get_components::<T>())
            .unwrap_or_default()
    }

    /// Recompute global state for `start` and every descendant
    ///
    /// Pre-order with an explicit stack: a node is always recomputed before its
    /// children read its global pose.
    fn propagate_from(&mut self, start: EntityId) {
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let parent_global: Option<Pose> = self
                .entities
                .get(id)
                .and_then(Entity::parent)
                .and_then(|parent| self.entities.get(parent))
                .map(|parent| *parent.transform.global());

            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            entity.transform.recompute(parent_global.as_ref());
            stack.extend(entity.children.iter().rev().copied());
        }
    }

    /// Update an entity: children first, then its own updatable components
    pub(crate) fn update_entity(&mut self, id: EntityId, frame: &FrameInput<'_>) {
        let children = match self.entities.get(id) {
            Some(entity) => entity.children.clone(),
            None => return,
        };
        for child in children {
            self.update_entity(child, frame);
        }

        self.run_component_hooks(id, frame, |component, ctx| {
            if let Some(updatable) = component.as_updatable() {
                updatable.update(ctx);
            }
        });
    }

    /// Initialize an entity in the same order as [`SceneGraph::update_entity`]
    pub(crate) fn initialize_entity(&mut self, id: EntityId, frame: &FrameInput<'_>) {
        let children = match self.entities.get(id) {
            Some(entity) => entity.children.clone(),
            None => return,
        };
        for child in children {
            self.initialize_entity(child, frame);
        }

        self.run_component_hooks(id, frame, |component, ctx| {
            if let Some(initializable) = component.as_initializable() {
                initializable.initialize(ctx);
            }
        });
    }

    /// Draw an entity and its subtree
    ///
    /// Children receive the incoming `view_proj`, not this entity's composed
    /// matrix: their cached world matrices already contain every ancestor.
    pub(crate) fn draw_entity(&self, id: EntityId, ctx: &mut DrawContext<'_>, view_proj: &Mat4) {
        let Some(entity) = self.entities.get(id) else {
            return;
        };
        let world_view_proj = view_proj * entity.transform.world_matrix();

        for &child in &entity.children {
            self.draw_entity(child, ctx, view_proj);
        }

        for component in &entity.components {
            if let Some(drawable) = component.as_drawable() {
                drawable.draw(ctx, &world_view_proj);
            }
        }
    }

    /// Run `hook` on every component of `id` with the graph mutably available
    ///
    /// Only the running component is taken out of its slot; its siblings stay
    /// attached and can be looked up from the hook. Components attached while
    /// the hooks run are appended and first run on the next traversal.
    fn run_component_hooks<F>(&mut self, id: EntityId, frame: &FrameInput<'_>, mut hook: F)
    where
        F: FnMut(&mut dyn Component, &mut UpdateContext<'_>),
    {
        let count = match self.entities.get(id) {
            Some(entity) => entity.components.len(),
            None => return,
        };

        for index in 0..count {
            let Some(mut component) = self.swap_component(id, index, Box::new(RunningSlot)) else {
                return;
            };
            {
                let mut ctx = UpdateContext::new(id, self, frame);
                hook(component.as_mut(), &mut ctx);
            }
            self.swap_component(id, index, component);
        }
    }

    fn swap_component(&mut self, id: EntityId, index: usize, component: Box<dyn Component>) -> Option<Box<dyn Component>> {
        let slot = self.entities.get_mut(id)?.components.get_mut(index)?;
        Some(std::mem::replace(slot, component))
    }
}

/// Stands in for a component while its own hook runs
struct RunningSlot;

impl Component for RunningSlot {
    fn name(&self) -> &str {
        "RunningSlot"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for SceneGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneGraph")
            .field("entities", &self.entities.len())
            .field("roots", &self.roots)
            .finish()
    }
}

/// Mutable access to one entity's transform
///
/// Dereferences to the [`Transform`] for reads; every [`Transformable`]
/// mutator propagates to the entity's descendants before returning.
pub struct TransformMut<'a> {
    graph: &'a mut SceneGraph,
    entity: EntityId,
}

impl TransformMut<'_> {
    /// Entity whose transform this handle edits
    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl Deref for TransformMut<'_> {
    type Target = Transform;

    fn deref(&self) -> &Transform {
        // The handle holds the graph mutably and entities are never removed,
        // so the id checked at construction stays valid.
        &self.graph.entities[self.entity].transform
    }
}

impl Transformable for TransformMut<'_> {
    fn edit_local<F: FnOnce(&mut Pose)>(&mut self, edit: F) {
        if let Some(entity) = self.graph.entities.get_mut(self.entity) {
            edit(entity.transform.local_mut());
        }
        self.graph.propagate_from(self.entity);
    }
}
