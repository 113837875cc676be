//! Scene-level tests shared by the hierarchy and traversal suites

mod hierarchy_scenarios;
mod traversal;

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Mat4;
use crate::input::InputManager;
use crate::render::Viewport;
use crate::scene::{Component, DrawContext, Drawable, FrameInput, Initializable, Updatable, UpdateContext};

pub(super) type Log = Rc<RefCell<Vec<String>>>;

/// Component recording every hook it receives
pub(super) struct Probe {
    pub label: String,
    pub log: Log,
}

impl Probe {
    pub fn new(label: &str, log: &Log) -> Self {
        Self {
            label: label.to_string(),
            log: log.clone(),
        }
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{}:{}", hook, self.label));
    }
}

impl Component for Probe {
    fn name(&self) -> &str {
        "Probe"
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

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }
}

impl Updatable for Probe {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {
        self.record("update");
    }
}

impl Initializable for Probe {
    fn initialize(&mut self, _ctx: &mut UpdateContext<'_>) {
        self.record("init");
    }
}

impl Drawable for Probe {
    fn draw(&self, _ctx: &mut DrawContext<'_>, _world_view_proj: &Mat4) {
        self.record("draw");
    }
}

pub(super) fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub(super) fn entries(log: &Log, hook: &str) -> Vec<String> {
    let prefix = format!("{}:", hook);
    log.borrow()
        .iter()
        .filter_map(|entry| entry.strip_prefix(&prefix).map(str::to_string))
        .collect()
}

/// Run `f` with a frame of the default viewport and no input
pub(super) fn with_frame<R>(f: impl FnOnce(&FrameInput<'_>) -> R) -> R {
    let input = InputManager::new();
    let frame = FrameInput {
        input: &input,
        viewport: Viewport::new(800.0, 600.0),
        delta_time: 1.0 / 60.0,
    };
    f(&frame)
}
