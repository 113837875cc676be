//! Vertex data for tilemaps
//!
//! A whole tilemap is drawn with one call: every valid cell becomes a quad of
//! two triangles whose UVs select the cell's tile in the tileset atlas.
//! Positions are in pixels with `(0, 0)` at the top-left corner of the map.

use bytemuck::{Pod, Zeroable};

use crate::tiling::{Tilemap, Tileset};

/// Position plus texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TileVertex {
    /// Pixel position inside the map
    pub position: [f32; 2],
    /// Atlas texture coordinate
    pub uv: [f32; 2],
}

/// Triangle list covering every valid cell of a tilemap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileGridGeometry {
    vertices: Vec<TileVertex>,
}

impl TileGridGeometry {
    /// Vertices per drawn cell
    pub const VERTICES_PER_TILE: usize = 6;

    /// Build the triangle list for `tilemap` using the atlas of `tileset`
    ///
    /// Cells outside `0..num_tiles` are skipped. UVs are inset by half a
    /// texel so neighbouring atlas tiles never bleed in.
    pub fn build(tilemap: &Tilemap, tileset: &Tileset) -> Self {
        let row_length = tileset.row_length.max(1);
        let col_length = tileset.col_length.max(1);
        let (tile_width, tile_height) = tileset.tile_size();
        let (tile_width, tile_height) = (tile_width as f32, tile_height as f32);
        let half_texel_u = 0.5 / tileset.texture.width.max(1) as f32;
        let half_texel_v = 0.5 / tileset.texture.height.max(1) as f32;

        let mut vertices = Vec::with_capacity(Self::VERTICES_PER_TILE * tilemap.width() * tilemap.height());
        for y in 0..tilemap.height() {
            for x in 0..tilemap.width() {
                let Some(value) = tilemap.get(x, y).filter(|&v| tileset.contains(v)) else {
                    continue;
                };
                let value = value as u32;
                let atlas_x = value % row_length;
                let atlas_y = value / row_length;

                let u0 = atlas_x as f32 / row_length as f32 + half_texel_u;
                let u1 = (atlas_x + 1) as f32 / row_length as f32 - half_texel_u;
                let v0 = atlas_y as f32 / col_length as f32 + half_texel_v;
                let v1 = (atlas_y + 1) as f32 / col_length as f32 - half_texel_v;

                let x0 = x as f32 * tile_width;
                let x1 = (x + 1) as f32 * tile_width;
                let y0 = y as f32 * tile_height;
                let y1 = (y + 1) as f32 * tile_height;

                let corner = |px: f32, py: f32, u: f32, v: f32| TileVertex {
                    position: [px, py],
                    uv: [u, v],
                };
                vertices.extend_from_slice(&[
                    corner(x0, y1, u0, v1),
                    corner(x1, y1, u1, v1),
                    corner(x1, y0, u1, v0),
                    corner(x1, y0, u1, v0),
                    corner(x0, y0, u0, v0),
                    corner(x0, y1, u0, v1),
                ]);
            }
        }

        log::debug!(
            "Built tile grid {}x{}: {} vertices",
            tilemap.width(),
            tilemap.height(),
            vertices.len()
        );
        Self { vertices }
    }

    /// Triangle list vertices
    pub fn vertices(&self) -> &[TileVertex] {
        &self.vertices
    }

    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of drawn cells
    pub fn tile_count(&self) -> usize {
        self.vertices.len() / Self::VERTICES_PER_TILE
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
