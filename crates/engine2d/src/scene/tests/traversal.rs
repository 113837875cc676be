//! Update, initialize and draw traversal through a whole scene

use std::any::Any;

use super::{entries, new_log, with_frame, Log, Probe};
use crate::assets::TextureHandle;
use crate::components::{FixedCamera, SpriteRenderer};
use crate::foundation::collections::{SlotMap, TextureId};
use crate::foundation::math::{Mat4, Vec2};
use crate::render::{RecordingBackend, Viewport};
use crate::scene::{Component, Scene, SceneError, Transform, Transformable, Updatable, UpdateContext};

fn textures(count: usize) -> Vec<TextureHandle> {
    let mut ids: SlotMap<TextureId, ()> = SlotMap::with_key();
    (0..count)
        .map(|_| TextureHandle {
            id: ids.insert(()),
            width: 8,
            height: 8,
        })
        .collect()
}

/// Scene with roots [A, B]; A has children [A1, A2]; A2 has child A2a
fn probed_scene(log: &Log) -> Scene {
    let mut scene = Scene::new("probes");
    let a = scene.add_entity("A");
    let b = scene.add_entity("B");
    let a1 = scene.add_child(a, "A1").unwrap();
    let a2 = scene.add_child(a, "A2").unwrap();
    let a2a = scene.add_child(a2, "A2a").unwrap();

    for (id, label) in [(b, "B"), (a, "A"), (a2a, "A2a"), (a1, "A1"), (a2, "A2")] {
        scene.add_component(id, Probe::new(label, log)).unwrap();
    }
    scene
}

#[test]
fn test_update_visits_children_before_own_components() {
    let log = new_log();
    let mut scene = probed_scene(&log);
    with_frame(|frame| scene.update(frame));

    assert_eq!(entries(&log, "update"), vec!["A1", "A2a", "A2", "A", "B"]);
}

#[test]
fn test_draw_uses_update_order() {
    let log = new_log();
    let scene = probed_scene(&log);
    scene.draw(&mut RecordingBackend::new(), &Mat4::identity());

    assert_eq!(entries(&log, "draw"), vec!["A1", "A2a", "A2", "A", "B"]);
}

#[test]
fn test_components_run_in_attachment_order() {
    let log = new_log();
    let mut scene = Scene::new("order");
    let entity = scene.add_entity("E");
    scene.add_component(entity, Probe::new("first", &log)).unwrap();
    scene.add_component(entity, Probe::new("second", &log)).unwrap();

    with_frame(|frame| scene.update(frame));
    assert_eq!(entries(&log, "update"), vec!["first", "second"]);
}

#[test]
fn test_activation_initializes_once() {
    let log = new_log();
    let mut scene = probed_scene(&log);

    with_frame(|frame| {
        scene.on_activate(frame);
        scene.on_activate(frame);
    });

    assert!(scene.is_activated());
    assert_eq!(entries(&log, "init"), vec!["A1", "A2a", "A2", "A", "B"]);
}

#[test]
fn test_sprites_share_composed_matrix() {
    let tex = textures(2);
    let mut scene = Scene::new("sprites");
    let entity = scene.add_entity("E");
    scene.transform_mut(entity).unwrap().set_translation(30.0, 40.0);
    scene.add_component(entity, SpriteRenderer::with_texture(tex[0])).unwrap();
    scene.add_component(entity, SpriteRenderer::with_texture(tex[1])).unwrap();

    let projection = Viewport::new(800.0, 600.0).projection();
    let mut backend = RecordingBackend::new();
    scene.draw(&mut backend, &projection);

    let world = *scene.graph().transform(entity).unwrap().world_matrix();
    let expected = projection * world * tex[0].base_scale();
    let commands = backend.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].texture(), tex[0].id);
    assert_eq!(commands[1].texture(), tex[1].id);
    assert_eq!(commands[0].world_view_proj(), &expected);
    assert_eq!(commands[1].world_view_proj(), &expected);
}

#[test]
fn test_child_draw_matrix_includes_parent_once() {
    let tex = textures(1);
    let mut scene = Scene::new("nested");
    let parent = scene.add_entity("parent");
    let child = scene.add_child(parent, "child").unwrap();
    scene.transform_mut(parent).unwrap().set_translation(100.0, 0.0);
    scene.add_component(child, SpriteRenderer::with_texture(tex[0])).unwrap();

    let mut backend = RecordingBackend::new();
    scene.draw(&mut backend, &Mat4::identity());

    let wvp = backend.commands()[0].world_view_proj();
    // Translation column carries the parent offset exactly once
    assert_eq!(wvp[(0, 3)], 100.0);
}

#[test]
fn test_active_camera_view_is_applied() {
    let tex = textures(1);
    let mut scene = Scene::new("camera");
    let camera_entity = scene.add_entity("camera");
    let mut view = Transform::new();
    view.set_translation(-10.0, 5.0);
    let camera = scene.add_component(camera_entity, FixedCamera::new(view.clone())).unwrap();
    scene.set_active_camera(camera).unwrap();

    let sprite = scene.add_entity("sprite");
    scene.transform_mut(sprite).unwrap().set_translation(50.0, 0.0);
    scene.add_component(sprite, SpriteRenderer::with_texture(tex[0])).unwrap();

    let projection = Viewport::new(200.0, 100.0).projection();
    let mut backend = RecordingBackend::new();
    scene.draw(&mut backend, &projection);

    let world = *scene.graph().transform(sprite).unwrap().world_matrix();
    let expected = projection * view.world_matrix() * world * tex[0].base_scale();
    assert_eq!(backend.commands()[0].world_view_proj(), &expected);
    assert_eq!(scene.camera_view_matrix(), Some(*view.world_matrix()));
}

#[test]
fn test_camera_must_be_a_camera_component() {
    let log = new_log();
    let mut scene = Scene::new("cameras");
    let entity = scene.add_entity("E");
    let probe = scene.add_component(entity, Probe::new("p", &log)).unwrap();

    assert_eq!(
        scene.set_active_camera(probe),
        Err(SceneError::NotACamera("Probe".to_string()))
    );

    let mut missing = probe;
    missing.index = 5;
    assert_eq!(
        scene.set_active_camera(missing),
        Err(SceneError::ComponentNotFound { entity, index: 5 })
    );
    assert!(scene.active_camera().is_none());
}

/// Attaches a probe to its own entity on the first tick
struct Spawner {
    log: Log,
    spawned: bool,
}

impl Component for Spawner {
    fn name(&self) -> &str {
        "Spawner"
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
}

impl Updatable for Spawner {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        self.log.borrow_mut().push("update:spawner".to_string());
        if !self.spawned {
            self.spawned = true;
            ctx.graph
                .add_component(ctx.entity, Probe::new("spawned", &self.log))
                .unwrap();
        }
    }
}

#[test]
fn test_component_added_during_update_goes_last() {
    let log = new_log();
    let mut scene = Scene::new("spawn");
    let entity = scene.add_entity("E");
    scene
        .add_component(
            entity,
            Spawner {
                log: log.clone(),
                spawned: false,
            },
        )
        .unwrap();

    with_frame(|frame| {
        scene.update(frame);
        scene.update(frame);
    });

    assert_eq!(entries(&log, "update"), vec!["spawner", "spawner", "spawned"]);
    let graph = scene.graph();
    assert_eq!(graph.get(entity).unwrap().component_count(), 2);
    assert!(graph.get_component::<Spawner>(entity).is_some());
}

#[test]
fn test_update_can_move_other_entities() {
    struct Pusher {
        target: crate::foundation::collections::EntityId,
    }

    impl Component for Pusher {
        fn name(&self) -> &str {
            "Pusher"
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
    }

    impl Updatable for Pusher {
        fn update(&mut self, ctx: &mut UpdateContext<'_>) {
            if let Some(mut transform) = ctx.graph.transform_mut(self.target) {
                transform.translate(1.0, 0.0);
            }
        }
    }

    let mut scene = Scene::new("push");
    let target = scene.add_entity("target");
    let child = scene.add_child(target, "child").unwrap();
    let pusher = scene.add_entity("pusher");
    scene.add_component(pusher, Pusher { target }).unwrap();

    with_frame(|frame| scene.update(frame));

    assert_eq!(scene.graph().transform(child).unwrap().global_translation(), Vec2::new(1.0, 0.0));
}

#[test]
fn test_script_can_edit_sibling_sprite() {
    use crate::components::Script;
    use crate::scripting::Behavior;

    #[derive(Default)]
    struct Hider {
        saw_sprite: bool,
        saw_self: bool,
    }

    impl Behavior for Hider {
        fn update(&mut self, ctx: &mut UpdateContext<'_>) {
            self.saw_self = ctx.graph.get_component::<Script>(ctx.entity).is_some();
            if let Some(sprite) = ctx.graph.get_component_mut::<SpriteRenderer>(ctx.entity) {
                self.saw_sprite = true;
                sprite.set_visible(false);
            }
            assert!(self.saw_sprite);
            assert!(!self.saw_self);
        }
    }

    let tex = textures(1);
    let mut scene = Scene::new("hide");
    let entity = scene.add_entity("E");
    scene.add_component(entity, SpriteRenderer::with_texture(tex[0])).unwrap();
    let mut script = Script::new("hider.rs", "Hider");
    script.on_script_load(Box::new(Hider::default()));
    scene.add_component(entity, script).unwrap();

    with_frame(|frame| scene.update(frame));

    let graph = scene.graph();
    assert!(!graph.get_component::<SpriteRenderer>(entity).unwrap().is_visible());
    assert!(graph.get_component::<Script>(entity).is_some());
    assert_eq!(graph.get(entity).unwrap().component_count(), 2);

    let mut backend = RecordingBackend::new();
    scene.draw(&mut backend, &Mat4::identity());
    assert!(backend.commands().is_empty());
}

#[test]
fn test_add_component_to_foreign_entity_fails() {
    let mut scene = Scene::new("home");
    let local = scene.add_entity("local");
    let mut other = Scene::new("other");
    let foreign = other.add_entity("foreign");

    let result = scene.add_component(foreign, SpriteRenderer::new());
    assert_eq!(result.err(), Some(SceneError::EntityNotFound(foreign)));
    assert_eq!(scene.graph().get(local).unwrap().component_count(), 0);
    assert_eq!(other.graph().get(foreign).unwrap().component_count(), 0);
    assert_eq!(scene.graph().len(), 1);
}
