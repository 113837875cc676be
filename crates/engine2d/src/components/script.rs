//! Script component hosting a [`Behavior`]

use std::any::Any;

use crate::scene::{Component, Initializable, Updatable, UpdateContext};
use crate::scripting::Behavior;

/// Runs a behaviour's hooks on behalf of its entity
///
/// Until a behaviour is loaded both hooks do nothing.
pub struct Script {
    source_file: String,
    class_name: String,
    behavior: Option<Box<dyn Behavior>>,
}

impl Script {
    /// Script naming the behaviour type it expects
    pub fn new(source_file: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            source_file: source_file.into(),
            class_name: class_name.into(),
            behavior: None,
        }
    }

    /// File the behaviour was declared in
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    /// Behaviour type name
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Install the behaviour instance
    pub fn on_script_load(&mut self, behavior: Box<dyn Behavior>) {
        if self.behavior.is_some() {
            log::warn!("Replacing loaded behavior '{}'", self.class_name);
        }
        self.behavior = Some(behavior);
    }

    /// Whether a behaviour is installed
    pub fn is_loaded(&self) -> bool {
        self.behavior.is_some()
    }
}

impl std::fmt::Debug for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Script")
            .field("source_file", &self.source_file)
            .field("class_name", &self.class_name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Component for Script {
    fn name(&self) -> &str {
        "Script"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_initializable(&mut self) -> Option<&mut dyn Initializable> {
        Some(self)
    }
}

impl Initializable for Script {
    fn initialize(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.start(ctx);
        }
    }
}

impl Updatable for Script {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(behavior) = self.behavior.as_mut() {
            behavior.update(ctx);
        }
    }
}
