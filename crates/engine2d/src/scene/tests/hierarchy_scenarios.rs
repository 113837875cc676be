//! Transform properties checked across whole hierarchies

use approx::assert_relative_eq;

use crate::foundation::collections::EntityId;
use crate::foundation::math::utils::deg_to_rad;
use crate::foundation::math::{Mat4, Mat4Ext, Vec2};
use crate::scene::{Pose, SceneGraph, Transform, Transformable};

const EPSILON: f32 = 1e-4;

/// Deterministic pseudo-random numbers for mutation sequences
struct Lcg(u32);

impl Lcg {
    fn next_f32(&mut self, min: f32, max: f32) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        min + (self.0 >> 8) as f32 / (1u32 << 24) as f32 * (max - min)
    }

    fn pick(&mut self, len: usize) -> usize {
        (self.next_f32(0.0, len as f32) as usize).min(len - 1)
    }
}

fn mutate(transform: &mut impl Transformable, rng: &mut Lcg) {
    match rng.pick(6) {
        0 => transform.set_translation(rng.next_f32(-100.0, 100.0), rng.next_f32(-100.0, 100.0)),
        1 => transform.translate(rng.next_f32(-10.0, 10.0), rng.next_f32(-10.0, 10.0)),
        2 => transform.set_scale(rng.next_f32(0.5, 2.0), rng.next_f32(0.5, 2.0)),
        3 => transform.scale_by(rng.next_f32(0.8, 1.25), rng.next_f32(0.8, 1.25)),
        4 => transform.set_rotation(rng.next_f32(-10.0, 10.0)),
        _ => transform.rotate(rng.next_f32(-4.0, 4.0)),
    }
}

fn assert_angle_eq(actual: f32, expected: f32) {
    let diff = (actual - expected).rem_euclid(std::f32::consts::TAU);
    assert!(
        diff < EPSILON || std::f32::consts::TAU - diff < EPSILON,
        "angle {} != {}",
        actual,
        expected
    );
}

fn assert_pose_eq(actual: &Pose, expected: &Pose) {
    assert_relative_eq!(actual.translation, expected.translation, epsilon = EPSILON, max_relative = EPSILON);
    assert_relative_eq!(actual.scale, expected.scale, epsilon = EPSILON, max_relative = EPSILON);
    assert_angle_eq(actual.rotation, expected.rotation);
}

fn expected_matrix(global: &Pose) -> Mat4 {
    Mat4::translation_2d(&global.translation) * Mat4::rotation_z(global.rotation) * Mat4::scale_2d(&global.scale)
}

/// Every cached global pose and world matrix agrees with its parent chain
fn assert_consistent(graph: &SceneGraph) {
    let mut stack: Vec<EntityId> = graph.roots().to_vec();
    while let Some(id) = stack.pop() {
        let transform = graph.transform(id).unwrap();
        match graph.parent(id) {
            None => assert_pose_eq(transform.global(), transform.local()),
            Some(parent) => {
                let parent_global = graph.transform(parent).unwrap().global();
                assert_pose_eq(transform.global(), &Pose::compose(parent_global, transform.local()));
            }
        }
        assert_relative_eq!(
            *transform.world_matrix(),
            expected_matrix(transform.global()),
            epsilon = EPSILON
        );
        stack.extend_from_slice(graph.children(id));
    }
}

/// root -> (a -> (a1, a2 -> a2x), b)
fn sample_tree() -> (SceneGraph, Vec<EntityId>) {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("root");
    let a = graph.add_child(root, "a").unwrap();
    let a1 = graph.add_child(a, "a1").unwrap();
    let a2 = graph.add_child(a, "a2").unwrap();
    let a2x = graph.add_child(a2, "a2x").unwrap();
    let b = graph.add_child(root, "b").unwrap();
    let lone = graph.create_root("lone");
    (graph, vec![root, a, a1, a2, a2x, b, lone])
}

#[test]
fn test_free_standing_root_global_equals_local() {
    let mut rng = Lcg(7);
    let mut transform = Transform::new();
    for _ in 0..200 {
        mutate(&mut transform, &mut rng);
        assert_eq!(transform.global(), transform.local());
    }
}

#[test]
fn test_random_mutations_keep_hierarchy_consistent() {
    let (mut graph, ids) = sample_tree();
    let mut rng = Lcg(42);

    for _ in 0..300 {
        let id = ids[rng.pick(ids.len())];
        let mut handle = graph.transform_mut(id).unwrap();
        mutate(&mut handle, &mut rng);
        assert_consistent(&graph);
    }
}

#[test]
fn test_mutating_middle_node_updates_deep_descendants() {
    let (mut graph, ids) = sample_tree();
    let (a, a2x, b) = (ids[1], ids[4], ids[5]);
    let b_before = *graph.transform(b).unwrap().global();

    graph.transform_mut(a).unwrap().set_translation(5.0, -5.0);

    assert_relative_eq!(graph.transform(a2x).unwrap().global_translation(), Vec2::new(5.0, -5.0), epsilon = EPSILON);
    // Sibling subtree untouched
    assert_eq!(graph.transform(b).unwrap().global(), &b_before);
}

#[test]
fn test_parent_translation_reaches_child_with_untouched_local() {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("R");
    let child = graph.add_child(root, "C").unwrap();

    graph.transform_mut(root).unwrap().set_translation(10.0, 0.0);

    let child_transform = graph.transform(child).unwrap();
    assert_relative_eq!(child_transform.global_translation(), Vec2::new(10.0, 0.0), epsilon = EPSILON);
    assert_eq!(child_transform.translation(), Vec2::new(0.0, 0.0));
}

#[test]
fn test_rotation_wraps_instead_of_accumulating() {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("R");
    let child = graph.add_child(root, "C").unwrap();

    let mut handle = graph.transform_mut(root).unwrap();
    handle.set_rotation(deg_to_rad(350.0));
    handle.rotate(deg_to_rad(20.0));

    let root_transform = graph.transform(root).unwrap();
    assert_relative_eq!(root_transform.global_rotation(), deg_to_rad(10.0), epsilon = EPSILON);
    assert_relative_eq!(graph.transform(child).unwrap().global_rotation(), deg_to_rad(10.0), epsilon = EPSILON);
}

#[test]
fn test_scale_multiplies_along_whole_chain() {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("R");
    let child = graph.add_child(root, "C").unwrap();
    let grandchild = graph.add_child(child, "G").unwrap();

    graph.transform_mut(root).unwrap().set_scale(2.0, 2.0);
    graph.transform_mut(child).unwrap().set_scale(3.0, 3.0);

    let g = graph.transform(grandchild).unwrap();
    assert_relative_eq!(g.global_scale(), Vec2::new(6.0, 6.0), epsilon = EPSILON);
    assert_eq!(g.scale(), Vec2::new(1.0, 1.0));
}

#[test]
fn test_composition_uses_direct_parent_not_grandparent() {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("R");
    let child = graph.add_child(root, "C").unwrap();
    let grandchild = graph.add_child(child, "G").unwrap();

    graph.transform_mut(root).unwrap().set_translation(1.0, 0.0);
    graph.transform_mut(child).unwrap().set_translation(0.0, 2.0);
    graph.transform_mut(grandchild).unwrap().set_translation(4.0, 4.0);

    assert_relative_eq!(
        graph.transform(grandchild).unwrap().global_translation(),
        Vec2::new(5.0, 6.0),
        epsilon = EPSILON
    );
}

#[test]
fn test_world_matrix_tracks_inherited_changes() {
    let (mut graph, ids) = sample_tree();
    let (root, a1) = (ids[0], ids[2]);

    graph.transform_mut(root).unwrap().set_rotation(0.3);
    graph.transform_mut(a1).unwrap().set_translation(2.0, 1.0);

    let transform = graph.transform(a1).unwrap();
    assert_relative_eq!(*transform.world_matrix(), expected_matrix(transform.global()), epsilon = EPSILON);
}
