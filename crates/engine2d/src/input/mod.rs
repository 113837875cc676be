//! Input management system
//!
//! Raw key events are buffered as they arrive and applied once per frame in
//! [`InputManager::update`]. Game code polls named signals instead of keys, so
//! rebinding never touches gameplay code.

pub mod sources;

pub use sources::{AxisInput, BooleanInput, InputSource, KeyboardInput};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec2;

/// Input manager
#[derive(Default)]
pub struct InputManager {
    booleans: HashMap<String, BooleanInput>,
    axes: HashMap<String, AxisInput>,
    pending_keys: Vec<(KeyCode, bool)>,
    mouse_position: Vec2,
    mouse_buttons: HashMap<MouseButton, bool>,
}

impl InputManager {
    /// Create an input manager with no signals
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a boolean signal, `false` if the name is taken
    pub fn add_boolean_input(&mut self, input: BooleanInput) -> bool {
        if self.booleans.contains_key(input.name()) {
            log::warn!("Boolean input '{}' already exists", input.name());
            return false;
        }
        self.booleans.insert(input.name().to_string(), input);
        true
    }

    /// Remove a boolean signal, `true` if it existed
    pub fn remove_boolean_input(&mut self, name: &str) -> bool {
        self.booleans.remove(name).is_some()
    }

    /// Register an axis signal, `false` if the name is taken
    pub fn add_axis_input(&mut self, input: AxisInput) -> bool {
        if self.axes.contains_key(input.name()) {
            log::warn!("Axis input '{}' already exists", input.name());
            return false;
        }
        self.axes.insert(input.name().to_string(), input);
        true
    }

    /// Remove an axis signal, `true` if it existed
    pub fn remove_axis_input(&mut self, name: &str) -> bool {
        self.axes.remove(name).is_some()
    }

    /// Buffer a key event until the next [`InputManager::update`]
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        self.pending_keys.push((key, pressed));
    }

    /// Record a mouse button change
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        self.mouse_buttons.insert(button, pressed);
    }

    /// Record the cursor position in pixels
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.mouse_position = Vec2::new(x as f32, y as f32);
    }

    /// Apply buffered events and recompute every signal
    pub fn update(&mut self) {
        for (key, pressed) in self.pending_keys.drain(..) {
            for input in self.booleans.values_mut() {
                input.on_key(key, pressed);
            }
            for axis in self.axes.values_mut() {
                axis.on_key(key, pressed);
            }
        }

        for input in self.booleans.values_mut() {
            input.refresh();
        }
        for axis in self.axes.values_mut() {
            axis.refresh();
        }
    }

    /// State of a boolean signal, `false` if unknown
    pub fn boolean(&self, name: &str) -> bool {
        self.booleans.get(name).is_some_and(BooleanInput::state)
    }

    /// Value of an axis signal, `0.0` if unknown
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).map_or(0.0, AxisInput::value)
    }

    /// Whether a signal of either kind is registered under `name`
    pub fn has_input(&self, name: &str) -> bool {
        self.booleans.contains_key(name) || self.axes.contains_key(name)
    }

    /// Last reported cursor position
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Whether a mouse button is held
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).copied().unwrap_or(false)
    }
}

impl std::fmt::Debug for InputManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputManager")
            .field("booleans", &self.booleans.keys().collect::<Vec<_>>())
            .field("axes", &self.axes.keys().collect::<Vec<_>>())
            .field("pending_keys", &self.pending_keys.len())
            .finish()
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Left shift
    LeftShift,
    /// Left control
    LeftControl,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}
