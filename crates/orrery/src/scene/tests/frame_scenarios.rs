//! Rotating and propagating the reference scene frame by frame

use approx::assert_relative_eq;

use crate::config::OrreryConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::scene::{Scene, SceneGraph};

const EPSILON: f32 = 1e-3;

fn assert_world_is_parent_times_local(graph: &SceneGraph) {
    for (id, node) in graph.iter() {
        if id == graph.root() {
            assert_relative_eq!(*node.world_matrix(), *node.local_matrix(), epsilon = EPSILON);
        }
        for &child in node.children() {
            let child_node = graph.get(child).unwrap();
            if child_node.kind() == crate::scene::NodeKind::Transform {
                let expected = node.world_matrix() * child_node.local_matrix();
                assert_relative_eq!(*child_node.world_matrix(), expected, epsilon = EPSILON);
            }
        }
    }
}

#[test]
fn test_world_matrices_hold_after_many_frames() {
    let mut scene = Scene::solar_system(&OrreryConfig::default()).unwrap();
    for frame in 0..120 {
        let fps_adjust = if frame % 2 == 0 { 1.0 } else { 2.5 };
        scene.frame(fps_adjust).unwrap();
    }
    assert_world_is_parent_times_local(scene.graph());
}

#[test]
fn test_instances_read_live_matrices() {
    let mut scene = Scene::solar_system(&OrreryConfig::default()).unwrap();
    let earth = scene.instances()[1].owner;

    scene.frame(1.0).unwrap();
    let first = *scene.instance_world_matrix(1).unwrap();
    scene.frame(1.0).unwrap();
    let second = *scene.instance_world_matrix(1).unwrap();

    assert_ne!(first, second);
    assert_eq!(second, *scene.graph().world_matrix(earth).unwrap());
}

#[test]
fn test_sphere_world_matrix_is_never_written() {
    let mut scene = Scene::solar_system(&OrreryConfig::default()).unwrap();
    for _ in 0..10 {
        scene.frame(1.0).unwrap();
    }
    let sphere = scene.sphere();
    assert_eq!(*scene.graph().world_matrix(sphere).unwrap(), Mat4::identity());
}

#[test]
fn test_earth_orbit_turns_at_base_rate() {
    let mut scene = Scene::solar_system(&OrreryConfig::default()).unwrap();
    let earth_orbit = scene.solar_system_nodes().unwrap().earth_orbit;

    scene.frame(2.0).unwrap();

    let expected = Mat4::rotation_y(0.003 * 2.0) * Mat4::translation(110.0, 0.0, 0.0);
    assert_relative_eq!(*scene.graph().world_matrix(earth_orbit).unwrap(), expected, epsilon = EPSILON);
}

#[test]
fn test_binary_pair_stays_symmetric_about_pivot() {
    let mut scene = Scene::solar_system(&OrreryConfig::default()).unwrap();
    for _ in 0..37 {
        scene.frame(1.0).unwrap();
    }
    let nodes = *scene.solar_system_nodes().unwrap();
    let graph = scene.graph();
    let pivot = utils::translation_of(graph.world_matrix(nodes.binary).unwrap());
    let b1 = utils::translation_of(graph.world_matrix(nodes.b1).unwrap());
    let b2 = utils::translation_of(graph.world_matrix(nodes.b2).unwrap());

    assert_relative_eq!((b1 + b2) / 2.0, pivot, epsilon = EPSILON);
    assert_relative_eq!((b1 - pivot).norm(), 20.0, epsilon = EPSILON);
    // The pivot itself swings about X, staying 105 from the root
    assert_relative_eq!(pivot.norm(), 105.0, epsilon = EPSILON);
    assert_relative_eq!(pivot.x, 0.0, epsilon = EPSILON);
}
