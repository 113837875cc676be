//! Recorded draw commands

use super::backend::RenderBackend;
use super::tile_grid::TileGridGeometry;
use crate::foundation::collections::TextureId;
use crate::foundation::math::Mat4;

/// One draw call as seen by a backend
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Textured quad
    Quad {
        /// Composed world-view-projection matrix
        world_view_proj: Mat4,
        /// Texture to sample
        texture: TextureId,
    },
    /// Tile grid drawn in one call
    TileGrid {
        /// Composed world-view-projection matrix
        world_view_proj: Mat4,
        /// Atlas texture
        texture: TextureId,
        /// Number of vertices submitted
        vertex_count: usize,
    },
}

impl DrawCommand {
    /// Matrix the command was submitted with
    pub fn world_view_proj(&self) -> &Mat4 {
        match self {
            DrawCommand::Quad { world_view_proj, .. } | DrawCommand::TileGrid { world_view_proj, .. } => {
                world_view_proj
            }
        }
    }

    /// Texture the command samples
    pub fn texture(&self) -> TextureId {
        match self {
            DrawCommand::Quad { texture, .. } | DrawCommand::TileGrid { texture, .. } => *texture,
        }
    }
}

/// Backend that stores every call of the current frame
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    frames: u64,
    in_frame: bool,
}

impl RecordingBackend {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last `begin_frame`
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drop recorded commands
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn record(&mut self, command: DrawCommand) {
        log::trace!("Recorded {:?}", command);
        self.commands.push(command);
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self) {
        if self.in_frame {
            log::warn!("begin_frame called twice without end_frame");
        }
        self.in_frame = true;
        self.commands.clear();
    }

    fn draw_quad(&mut self, world_view_proj: &Mat4, texture: TextureId) {
        self.record(DrawCommand::Quad {
            world_view_proj: *world_view_proj,
            texture,
        });
    }

    fn draw_tile_grid(&mut self, world_view_proj: &Mat4, texture: TextureId, grid: &TileGridGeometry) {
        self.record(DrawCommand::TileGrid {
            world_view_proj: *world_view_proj,
            texture,
            vertex_count: grid.vertex_count(),
        });
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
        self.frames += 1;
        log::trace!("Frame {} finished with {} draw calls", self.frames, self.commands.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::collections::SlotMap;

    #[test]
    fn test_begin_frame_clears_previous_commands() {
        let mut textures: SlotMap<TextureId, ()> = SlotMap::with_key();
        let texture = textures.insert(());
        let mut backend = RecordingBackend::new();

        backend.begin_frame();
        backend.draw_quad(&Mat4::identity(), texture);
        backend.end_frame();
        assert_eq!(backend.commands().len(), 1);
        assert_eq!(backend.commands()[0].texture(), texture);

        backend.begin_frame();
        assert!(backend.commands().is_empty());
        backend.end_frame();
        assert_eq!(backend.frames(), 2);
    }
}
