//! Input sources and the named signals built from them

use super::KeyCode;

/// A physical input that is either active or not
pub trait InputSource {
    /// Feed one key event; sources ignore keys they are not bound to
    fn update_state(&mut self, key: KeyCode, pressed: bool);

    /// Whether the source is currently active
    fn state(&self) -> bool;
}

/// A single keyboard key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardInput {
    key: KeyCode,
    pressed: bool,
}

impl KeyboardInput {
    /// Source bound to `key`, initially released
    pub fn new(key: KeyCode) -> Self {
        Self { key, pressed: false }
    }

    /// Bound key
    pub fn key(&self) -> KeyCode {
        self.key
    }
}

impl InputSource for KeyboardInput {
    fn update_state(&mut self, key: KeyCode, pressed: bool) {
        if key == self.key {
            self.pressed = pressed;
        }
    }

    fn state(&self) -> bool {
        self.pressed
    }
}

/// Named on/off signal, active while any of its sources is
pub struct BooleanInput {
    name: String,
    sources: Vec<Box<dyn InputSource>>,
    state: bool,
}

impl BooleanInput {
    /// Signal with no sources
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            state: false,
        }
    }

    /// Signal driven by a set of keys
    pub fn with_keys(name: impl Into<String>, keys: &[KeyCode]) -> Self {
        let mut input = Self::new(name);
        for &key in keys {
            input.add_source(KeyboardInput::new(key));
        }
        input
    }

    /// Signal name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a source
    pub fn add_source(&mut self, source: impl InputSource + 'static) {
        self.sources.push(Box::new(source));
    }

    /// Number of sources
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// State as of the last [`BooleanInput::refresh`]
    pub fn state(&self) -> bool {
        self.state
    }

    pub(super) fn on_key(&mut self, key: KeyCode, pressed: bool) {
        for source in &mut self.sources {
            source.update_state(key, pressed);
        }
    }

    pub(super) fn refresh(&mut self) {
        self.state = self.sources.iter().any(|s| s.state());
    }
}

/// Named axis in `{-1, 0, 1}`: positive sources minus negative sources
pub struct AxisInput {
    name: String,
    positive: Vec<Box<dyn InputSource>>,
    negative: Vec<Box<dyn InputSource>>,
    value: f32,
}

impl AxisInput {
    /// Axis with no sources
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: Vec::new(),
            negative: Vec::new(),
            value: 0.0,
        }
    }

    /// Axis driven by positive and negative keys
    pub fn with_keys(name: impl Into<String>, positive: &[KeyCode], negative: &[KeyCode]) -> Self {
        let mut axis = Self::new(name);
        for &key in positive {
            axis.add_positive(KeyboardInput::new(key));
        }
        for &key in negative {
            axis.add_negative(KeyboardInput::new(key));
        }
        axis
    }

    /// Axis name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a source pushing towards +1
    pub fn add_positive(&mut self, source: impl InputSource + 'static) {
        self.positive.push(Box::new(source));
    }

    /// Add a source pushing towards -1
    pub fn add_negative(&mut self, source: impl InputSource + 'static) {
        self.negative.push(Box::new(source));
    }

    /// Value as of the last [`AxisInput::refresh`]
    pub fn value(&self) -> f32 {
        self.value
    }

    pub(super) fn on_key(&mut self, key: KeyCode, pressed: bool) {
        for source in self.positive.iter_mut().chain(self.negative.iter_mut()) {
            source.update_state(key, pressed);
        }
    }

    pub(super) fn refresh(&mut self) {
        let positive = if self.positive.iter().any(|s| s.state()) { 1.0 } else { 0.0 };
        let negative = if self.negative.iter().any(|s| s.state()) { 1.0 } else { 0.0 };
        self.value = positive - negative;
    }
}
