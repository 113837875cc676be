//! Grid tilemaps and tileset atlases

use crate::assets::TextureHandle;

/// Value stored for cells that could not be parsed
pub const INVALID_TILE: i32 = -1;

/// Rectangular grid of tile indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    width: usize,
    height: usize,
    // Row major: index = y * width + x
    cells: Vec<i32>,
}

impl Tilemap {
    /// Parse a tilemap from text
    ///
    /// One row per line (`\r\n`, `\n` or `\r`), cells separated by whitespace.
    /// The first row fixes the width. Cells that are missing or not integers
    /// are stored as [`INVALID_TILE`].
    pub fn parse(text: &str) -> Self {
        let rows: Vec<&str> = text
            .split("\r\n")
            .flat_map(|chunk| chunk.split(|c: char| c == '\n' || c == '\r'))
            .collect();
        // A trailing newline does not start another row
        let rows = match rows.split_last() {
            Some((last, rest)) if last.trim().is_empty() && !rest.is_empty() => rest,
            _ => &rows[..],
        };

        let width = rows.first().map_or(0, |row| row.split_whitespace().count());
        let height = if width == 0 { 0 } else { rows.len() };

        let mut cells = vec![INVALID_TILE; width * height];
        for (y, row) in rows.iter().take(height).enumerate() {
            let mut tokens = row.split_whitespace();
            for x in 0..width {
                cells[y * width + x] = match tokens.next() {
                    Some(token) => token.parse().unwrap_or_else(|e| {
                        log::warn!("Tilemap cell ({}, {}) '{}' is not a tile index: {}", x, y, token, e);
                        INVALID_TILE
                    }),
                    None => {
                        log::warn!("Tilemap row {} is missing cell {}", y, x);
                        INVALID_TILE
                    }
                };
            }
        }

        Self { width, height, cells }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Tile index at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<i32> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x).copied()
        } else {
            None
        }
    }
}

/// Texture atlas split into equally sized tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tileset {
    /// Atlas texture
    pub texture: TextureHandle,
    /// Tiles per atlas row
    pub row_length: u32,
    /// Tiles per atlas column
    pub col_length: u32,
    /// Number of usable tiles in the atlas
    pub num_tiles: u32,
}

impl Tileset {
    /// Whether `value` names a tile of this atlas
    pub fn contains(&self, value: i32) -> bool {
        value >= 0 && (value as u32) < self.num_tiles
    }

    /// Tile size in pixels
    pub fn tile_size(&self) -> (u32, u32) {
        (
            self.texture.width / self.row_length.max(1),
            self.texture.height / self.col_length.max(1),
        )
    }
}
