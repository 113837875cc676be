//! Built-in components

pub mod camera;
pub mod script;
pub mod sprite_renderer;
pub mod tilemap_renderer;

pub use camera::{FixedCamera, FollowCamera};
pub use script::Script;
pub use sprite_renderer::SpriteRenderer;
pub use tilemap_renderer::TilemapRenderer;
