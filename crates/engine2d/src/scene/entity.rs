//! Entity node

use super::component::Component;
use super::transform::Transform;
use crate::foundation::collections::EntityId;

/// A node in the scene tree
///
/// Owns its child list (by id), its components and exactly one transform. The
/// parent link is fixed at construction.
pub struct Entity {
    pub(super) name: String,
    pub(super) parent: Option<EntityId>,
    pub(super) children: Vec<EntityId>,
    pub(super) components: Vec<Box<dyn Component>>,
    pub(super) transform: Transform,
}

impl Entity {
    pub(super) fn new(name: impl Into<String>, parent: Option<EntityId>) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            components: Vec::new(),
            transform: Transform::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity (names are not unique)
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent entity, `None` when the entity is owned by the scene
    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    /// Children in insertion order
    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    /// Components in attachment order
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(|c| c.as_ref())
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The entity's transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// First component of type `T`
    pub fn get_component<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// First component of type `T`, mutably
    pub fn get_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// All components of type `T`, in attachment order
    pub fn get_components<T: Component>(&self) -> Vec<&T> {
        self.components
            .iter()
            .filter_map(|c| c.as_any().downcast_ref::<T>())
            .collect()
    }

    /// Component at `index` in attachment order
    pub fn component_at(&self, index: usize) -> Option<&dyn Component> {
        self.components.get(index).map(|c| c.as_ref())
    }
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("components", &self.components.iter().map(|c| c.name()).collect::<Vec<_>>())
            .field("transform", &self.transform)
            .finish()
    }
}
