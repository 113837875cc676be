//! Tilemap renderer component

use std::any::Any;

use crate::foundation::math::Mat4;
use crate::render::TileGridGeometry;
use crate::scene::{Component, DrawContext, Drawable};
use crate::tiling::{Tilemap, Tileset};

/// Draws a tilemap with one tile grid call
///
/// Geometry is rebuilt whenever the map or the tileset changes while both are
/// present.
#[derive(Debug, Clone, Default)]
pub struct TilemapRenderer {
    tilemap: Option<Tilemap>,
    tileset: Option<Tileset>,
    geometry: Option<TileGridGeometry>,
}

impl TilemapRenderer {
    /// Renderer with neither map nor tileset
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with both inputs set
    pub fn with(tilemap: Tilemap, tileset: Tileset) -> Self {
        let mut renderer = Self::new();
        renderer.tilemap = Some(tilemap);
        renderer.set_tileset(Some(tileset));
        renderer
    }

    /// Current tilemap
    pub fn tilemap(&self) -> Option<&Tilemap> {
        self.tilemap.as_ref()
    }

    /// Current tileset
    pub fn tileset(&self) -> Option<&Tileset> {
        self.tileset.as_ref()
    }

    /// Built geometry, present once both inputs are set
    pub fn geometry(&self) -> Option<&TileGridGeometry> {
        self.geometry.as_ref()
    }

    /// Replace or clear the tilemap
    pub fn set_tilemap(&mut self, tilemap: Option<Tilemap>) {
        self.tilemap = tilemap;
        self.rebuild();
    }

    /// Replace or clear the tileset
    pub fn set_tileset(&mut self, tileset: Option<Tileset>) {
        self.tileset = tileset;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.geometry = match (&self.tilemap, &self.tileset) {
            (Some(tilemap), Some(tileset)) => Some(TileGridGeometry::build(tilemap, tileset)),
            _ => None,
        };
    }
}

impl Component for TilemapRenderer {
    fn name(&self) -> &str {
        "TilemapRenderer"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_drawable(&self) -> Option<&dyn Drawable> {
        Some(self)
    }
}

impl Drawable for TilemapRenderer {
    fn draw(&self, ctx: &mut DrawContext<'_>, world_view_proj: &Mat4) {
        let (Some(geometry), Some(tileset)) = (&self.geometry, &self.tileset) else {
            return;
        };
        if geometry.vertex_count() == 0 {
            return;
        }
        ctx.backend.draw_tile_grid(world_view_proj, tileset.texture.id, geometry);
    }
}
