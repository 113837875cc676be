//! Gameplay behaviours and the registry that instantiates them by name
//!
//! Scene files name a behaviour by type; the application registers a factory
//! for every type it ships before loading a project.

use std::collections::HashMap;

use thiserror::Error;

use crate::scene::UpdateContext;

/// Gameplay logic driven by a [`Script`](crate::components::Script) component
pub trait Behavior {
    /// Called once when the owning scene is activated
    fn start(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Called once per tick
    fn update(&mut self, ctx: &mut UpdateContext<'_>);
}

/// Scripting errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// A factory with this name is already registered
    #[error("Behavior type already registered: {0}")]
    DuplicateType(String),

    /// No factory with this name
    #[error("Unknown behavior type: {0}")]
    UnknownType(String),
}

type BehaviorFactory = Box<dyn Fn() -> Box<dyn Behavior>>;

/// Name to factory table for behaviours
#[derive(Default)]
pub struct ScriptRegistry {
    factories: HashMap<String, BehaviorFactory>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `type_name`
    pub fn register<F>(&mut self, type_name: impl Into<String>, factory: F) -> Result<(), ScriptError>
    where
        F: Fn() -> Box<dyn Behavior> + 'static,
    {
        let type_name = type_name.into();
        if self.factories.contains_key(&type_name) {
            return Err(ScriptError::DuplicateType(type_name));
        }
        log::debug!("Registered behavior type '{}'", type_name);
        self.factories.insert(type_name, Box::new(factory));
        Ok(())
    }

    /// Register a behaviour type built with [`Default`]
    pub fn register_default<B>(&mut self, type_name: impl Into<String>) -> Result<(), ScriptError>
    where
        B: Behavior + Default + 'static,
    {
        self.register(type_name, || Box::new(B::default()))
    }

    /// Build a fresh behaviour of the named type
    pub fn instantiate(&self, type_name: &str) -> Result<Box<dyn Behavior>, ScriptError> {
        self.factories
            .get(type_name)
            .map(|factory| factory())
            .ok_or_else(|| ScriptError::UnknownType(type_name.to_string()))
    }

    /// Whether a factory is registered under `type_name`
    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ScriptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRegistry")
            .field("types", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
