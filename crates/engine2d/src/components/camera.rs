//! Camera components
//!
//! A camera's transform is its own free-standing [`Transform`]; it is never
//! composed with the transform of the entity it is attached to. The scene
//! multiplies the projection by the active camera's world matrix.

use std::any::Any;

use crate::foundation::math::Vec2;
use crate::scene::{Camera, Component, Transform, Transformable, Updatable, UpdateContext};

/// Camera with a transform that only changes when edited directly
#[derive(Debug, Clone, Default)]
pub struct FixedCamera {
    transform: Transform,
}

impl FixedCamera {
    /// Camera with the given view transform
    pub fn new(transform: Transform) -> Self {
        Self { transform }
    }

    /// Edit the view transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

impl Camera for FixedCamera {
    fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Updatable for FixedCamera {
    fn update(&mut self, _ctx: &mut UpdateContext<'_>) {}
}

impl Component for FixedCamera {
    fn name(&self) -> &str {
        "FixedCamera"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        Some(self)
    }
}

/// Camera that keeps its entity in the middle of the viewport
///
/// Every tick the view is rebuilt from the entity's global pose, centred on
/// the viewport, then adjusted by `offset`.
#[derive(Debug, Clone, Default)]
pub struct FollowCamera {
    transform: Transform,
    offset: Transform,
}

impl FollowCamera {
    /// Follow camera without offset
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow camera with an offset applied after centring
    pub fn with_offset(offset: Transform) -> Self {
        Self {
            transform: Transform::new(),
            offset,
        }
    }

    /// Offset applied after centring
    pub fn offset(&self) -> &Transform {
        &self.offset
    }

    /// Edit the offset
    pub fn offset_mut(&mut self) -> &mut Transform {
        &mut self.offset
    }
}

impl Camera for FollowCamera {
    fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Updatable for FollowCamera {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let Some(target) = ctx.transform() else {
            return;
        };
        let (translation, scale, rotation) = (
            target.global_translation(),
            target.global_scale(),
            target.global_rotation(),
        );
        let (half_width, half_height) = ctx.viewport.half_extent();

        let view = &mut self.transform;
        view.set_translation_vec(-translation);
        view.set_scale_vec(scale);
        view.set_rotation(-rotation);
        view.translate_vec(Vec2::new(half_width, half_height));

        view.translate_vec(self.offset.translation());
        view.scale_by_vec(self.offset.scale());
        view.rotate(self.offset.rotation());
    }
}

impl Component for FollowCamera {
    fn name(&self) -> &str {
        "FollowCamera"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_camera(&self) -> Option<&dyn Camera> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use crate::input::InputManager;
    use crate::render::Viewport;
    use crate::scene::{FrameInput, SceneGraph};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn follow(graph: &mut SceneGraph, target: crate::foundation::collections::EntityId, camera: &mut FollowCamera) {
        let input = InputManager::new();
        let frame = FrameInput {
            input: &input,
            viewport: Viewport::new(800.0, 600.0),
            delta_time: 0.016,
        };
        let mut ctx = UpdateContext::new(target, graph, &frame);
        camera.update(&mut ctx);
    }

    #[test]
    fn test_follow_camera_centres_entity() {
        let mut graph = SceneGraph::new();
        let player = graph.create_root("player");
        graph.transform_mut(player).unwrap().set_translation(100.0, 50.0);

        let mut camera = FollowCamera::new();
        follow(&mut graph, player, &mut camera);

        let view = camera.transform();
        assert_relative_eq!(view.translation(), Vec2::new(300.0, 250.0), epsilon = EPSILON);
        assert_relative_eq!(view.scale(), Vec2::new(1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(view.rotation(), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_follow_camera_uses_global_pose() {
        let mut graph = SceneGraph::new();
        let ship = graph.create_root("ship");
        let pilot = graph.add_child(ship, "pilot").unwrap();
        {
            let mut ship_transform = graph.transform_mut(ship).unwrap();
            ship_transform.set_translation(40.0, 0.0);
            ship_transform.set_rotation(PI / 2.0);
        }
        graph.transform_mut(pilot).unwrap().set_translation(10.0, 10.0);

        let mut camera = FollowCamera::new();
        follow(&mut graph, pilot, &mut camera);

        let view = camera.transform();
        assert_relative_eq!(view.translation(), Vec2::new(350.0, 290.0), epsilon = EPSILON);
        assert_relative_eq!(view.rotation(), 1.5 * PI, epsilon = EPSILON);
    }

    #[test]
    fn test_follow_camera_applies_offset_last() {
        let mut graph = SceneGraph::new();
        let player = graph.create_root("player");

        let mut offset = Transform::new();
        offset.set_translation(0.0, -20.0);
        offset.set_scale(2.0, 2.0);
        let mut camera = FollowCamera::with_offset(offset);
        follow(&mut graph, player, &mut camera);

        let view = camera.transform();
        assert_relative_eq!(view.translation(), Vec2::new(400.0, 280.0), epsilon = EPSILON);
        assert_relative_eq!(view.scale(), Vec2::new(2.0, 2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_fixed_camera_view_is_its_world_matrix() {
        let mut transform = Transform::new();
        transform.set_translation(-10.0, 5.0);
        let camera = FixedCamera::new(transform.clone());

        assert_eq!(camera.view_matrix(), *transform.world_matrix());
    }
}
