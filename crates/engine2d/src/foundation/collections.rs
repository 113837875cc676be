//! Handle types for arena-backed storage
//!
//! Entities and textures live in slot maps; their keys stay valid for the
//! lifetime of the stored value and are never reused for a different value
//! while it is alive.

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to an entity inside a scene graph
    pub struct EntityId;

    /// Stable handle to a texture owned by the asset manager
    pub struct TextureId;
}
