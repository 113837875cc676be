//! Backend abstraction trait for the rendering system

use super::tile_grid::TileGridGeometry;
use crate::foundation::collections::TextureId;
use crate::foundation::math::Mat4;

/// Sink for draw calls
///
/// Matrices arrive fully composed (`projection * view * world`); a backend
/// only has to upload them. Calls are made in scene traversal order.
pub trait RenderBackend {
    /// Called once before any draw call of a frame
    fn begin_frame(&mut self) {}

    /// Draw a unit quad textured with `texture`
    fn draw_quad(&mut self, world_view_proj: &Mat4, texture: TextureId);

    /// Draw a prebuilt tile grid textured with the tileset atlas
    fn draw_tile_grid(&mut self, world_view_proj: &Mat4, texture: TextureId, grid: &TileGridGeometry);

    /// Called once after the last draw call of a frame
    fn end_frame(&mut self) {}
}
