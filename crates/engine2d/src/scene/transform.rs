//! Hierarchical 2D transforms
//!
//! A [`Transform`] stores the local pose of an entity together with a cached
//! global (world-space) pose and the world matrix derived from it. The cache is
//! refreshed eagerly on every mutation; reading it never recomputes anything.
//!
//! Composition along the hierarchy is deliberately simple:
//! - translation: componentwise add
//! - scale: componentwise multiply
//! - rotation: add, wrapped into `[0, 2π)`
//!
//! Free-standing transforms (camera transforms, offsets) are mutated directly
//! through [`Transformable`] and behave as roots. Entity-owned transforms are
//! only reachable mutably through [`TransformMut`](super::TransformMut), which
//! propagates every change to the whole subtree.

use crate::foundation::math::{Mat4, Mat4Ext, Vec2};
use crate::foundation::math::utils::{deg_to_rad, wrap_angle};

/// Translation, scale and rotation of one node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in pixels
    pub translation: Vec2,
    /// Independent X/Y scale factors
    pub scale: Vec2,
    /// Rotation in radians, kept in `[0, 2π)`
    pub rotation: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Origin, unit scale, no rotation
    pub fn identity() -> Self {
        Self {
            translation: Vec2::zeros(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }

    /// Compose a local pose with the global pose of its parent
    pub fn compose(parent_global: &Pose, local: &Pose) -> Pose {
        Pose {
            translation: parent_global.translation + local.translation,
            scale: parent_global.scale.component_mul(&local.scale),
            rotation: wrap_angle(parent_global.rotation + local.rotation),
        }
    }

    /// Affine matrix: scale first, then rotate about Z, then translate
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation_2d(&self.translation)
            * Mat4::rotation_z(self.rotation)
            * Mat4::scale_2d(&self.scale)
    }
}

/// Local and cached global state of one node
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    local: Pose,
    global: Pose,
    world_matrix: Mat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Identity transform
    pub fn new() -> Self {
        Self::from_pose(Pose::identity())
    }

    /// Root transform with the given local pose
    pub fn from_pose(local: Pose) -> Self {
        let local = Pose {
            rotation: wrap_angle(local.rotation),
            ..local
        };
        Self {
            local,
            global: local,
            world_matrix: local.to_matrix(),
        }
    }

    /// Local translation
    pub fn translation(&self) -> Vec2 {
        self.local.translation
    }

    /// Local scale
    pub fn scale(&self) -> Vec2 {
        self.local.scale
    }

    /// Local rotation in radians
    pub fn rotation(&self) -> f32 {
        self.local.rotation
    }

    /// Global (world-space) translation
    pub fn global_translation(&self) -> Vec2 {
        self.global.translation
    }

    /// Global scale
    pub fn global_scale(&self) -> Vec2 {
        self.global.scale
    }

    /// Global rotation in radians
    pub fn global_rotation(&self) -> f32 {
        self.global.rotation
    }

    /// Local pose
    pub fn local(&self) -> &Pose {
        &self.local
    }

    /// Global pose
    pub fn global(&self) -> &Pose {
        &self.global
    }

    /// Cached world matrix, always consistent with the global pose
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub(crate) fn local_mut(&mut self) -> &mut Pose {
        &mut self.local
    }

    /// Recompute the global pose against `parent_global` (`None` for roots)
    pub(crate) fn recompute(&mut self, parent_global: Option<&Pose>) {
        self.global = match parent_global {
            Some(parent) => Pose::compose(parent, &self.local),
            None => self.local,
        };
        self.world_matrix = self.global.to_matrix();
    }
}

/// Mutator API shared by free-standing transforms and entity transforms
///
/// Implementors only provide [`edit_local`](Transformable::edit_local), which
/// must apply the edit and then bring all cached global state up to date.
pub trait Transformable {
    /// Apply `edit` to the local pose and refresh derived state
    fn edit_local<F: FnOnce(&mut Pose)>(&mut self, edit: F);

    /// Replace the whole local pose
    fn set_local(&mut self, pose: Pose) {
        self.edit_local(|local| {
            *local = Pose {
                rotation: wrap_angle(pose.rotation),
                ..pose
            };
        });
    }

    /// Set the local translation
    fn set_translation(&mut self, x: f32, y: f32) {
        self.set_translation_vec(Vec2::new(x, y));
    }

    /// Set the local translation from a vector
    fn set_translation_vec(&mut self, translation: Vec2) {
        self.edit_local(|local| local.translation = translation);
    }

    /// Set the local scale
    fn set_scale(&mut self, sx: f32, sy: f32) {
        self.set_scale_vec(Vec2::new(sx, sy));
    }

    /// Set the local scale from a vector
    fn set_scale_vec(&mut self, scale: Vec2) {
        self.edit_local(|local| local.scale = scale);
    }

    /// Set the local rotation in radians
    fn set_rotation(&mut self, radians: f32) {
        self.edit_local(|local| local.rotation = wrap_angle(radians));
    }

    /// Set the local rotation in degrees
    fn set_rotation_degrees(&mut self, degrees: f32) {
        self.set_rotation(deg_to_rad(degrees));
    }

    /// Translate by an offset
    fn translate(&mut self, dx: f32, dy: f32) {
        self.translate_vec(Vec2::new(dx, dy));
    }

    /// Translate by a vector
    fn translate_vec(&mut self, delta: Vec2) {
        self.edit_local(|local| local.translation += delta);
    }

    /// Multiply the local scale componentwise
    fn scale_by(&mut self, sx: f32, sy: f32) {
        self.scale_by_vec(Vec2::new(sx, sy));
    }

    /// Multiply the local scale componentwise by a vector
    fn scale_by_vec(&mut self, factor: Vec2) {
        self.edit_local(|local| local.scale = local.scale.component_mul(&factor));
    }

    /// Rotate by an angle in radians
    fn rotate(&mut self, radians: f32) {
        self.edit_local(|local| local.rotation = wrap_angle(local.rotation + radians));
    }

    /// Rotate by an angle in degrees
    fn rotate_degrees(&mut self, degrees: f32) {
        self.rotate(deg_to_rad(degrees));
    }
}

impl Transformable for Transform {
    fn edit_local<F: FnOnce(&mut Pose)>(&mut self, edit: F) {
        edit(&mut self.local);
        self.recompute(None);
    }
}
