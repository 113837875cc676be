//! Textured quad renderer

use std::any::Any;

use crate::assets::TextureHandle;
use crate::foundation::math::Mat4;
use crate::scene::{Component, DrawContext, Drawable};

/// Draws the entity as a quad the size of its texture
#[derive(Debug, Clone)]
pub struct SpriteRenderer {
    texture: Option<TextureHandle>,
    visible: bool,
}

impl SpriteRenderer {
    /// Visible renderer without a texture
    pub fn new() -> Self {
        Self {
            texture: None,
            visible: true,
        }
    }

    /// Visible renderer using `texture`
    pub fn with_texture(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            visible: true,
        }
    }

    /// Current texture
    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    /// Replace or clear the texture
    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        self.texture = texture;
    }

    /// Whether the sprite is drawn
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the sprite
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for SpriteRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SpriteRenderer {
    fn name(&self) -> &str {
        "SpriteRenderer"
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

impl Drawable for SpriteRenderer {
    fn draw(&self, ctx: &mut DrawContext<'_>, world_view_proj: &Mat4) {
        let Some(texture) = self.texture.filter(|_| self.visible) else {
            return;
        };
        ctx.backend.draw_quad(&(world_view_proj * texture.base_scale()), texture.id);
    }
}
