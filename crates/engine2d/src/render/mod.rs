//! Rendering abstraction
//!
//! The scene never talks to a graphics API directly. Drawable components hand
//! fully composed matrices and texture ids to a [`RenderBackend`]; a real GPU
//! backend lives outside this crate, [`RecordingBackend`] keeps the calls for
//! headless runs and tests.

pub mod backend;
pub mod commands;
pub mod tile_grid;

pub use backend::RenderBackend;
pub use commands::{DrawCommand, RecordingBackend};
pub use tile_grid::{TileGridGeometry, TileVertex};

use crate::foundation::math::{Mat4, Mat4Ext};

/// Size of the render target in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Viewport {
    /// Create a viewport
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen-space projection with the origin in the top-left corner
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_2d(self.width, self.height)
    }

    /// Half the viewport, i.e. the screen centre
    pub fn half_extent(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
