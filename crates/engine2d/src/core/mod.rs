//! # Core Engine Module
//!
//! Engine-wide settings shared by the engine loop and its subsystems.

pub mod config;

pub use config::{AssetSettings, EngineSettings, WindowSettings};
pub use crate::config::{Config, ConfigError};
