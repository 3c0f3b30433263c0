//! The reference solar system
//!
//! A sun, an earth with two moons, and a pair of binary planetoids orbiting
//! each other above the ecliptic. Every visible body is a Transform carrying
//! colour uniforms whose only Drawable child is the shared sphere, so the
//! scene expands to six instances of one geometry.

use super::error::SceneError;
use super::graph::SceneGraph;
use super::node::{DrawInfo, Node, NodeId};
use super::rotation::{RotationAxis, RotationRule};
use crate::foundation::math::{
    constants::{HALF_PI, PI},
    utils, Mat4, Mat4Ext, UnitVec3, Vec3,
};

/// Handles to the nodes of the reference scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarSystem {
    /// The sun body
    pub sun: NodeId,
    /// Earth's orbit around the root
    pub earth_orbit: NodeId,
    /// The earth body
    pub earth: NodeId,
    /// Moon orbit, tilted out of the ecliptic
    pub moon_orbit: NodeId,
    /// The moon body
    pub moon: NodeId,
    /// Second moon orbit, starting opposite the first
    pub moon2_orbit: NodeId,
    /// The second moon body
    pub moon2: NodeId,
    /// Pivot of the binary pair
    pub binary: NodeId,
    /// First binary orbit
    pub b1_orbit: NodeId,
    /// Second binary orbit
    pub b2_orbit: NodeId,
    /// First binary body
    pub b1: NodeId,
    /// Second binary body
    pub b2: NodeId,
    /// Axis perpendicular to the moon orbit plane
    pub moon_axis: UnitVec3,
}

fn body(name: &str, local: Mat4, offset: [f32; 4], mult: [f32; 4]) -> Node {
    Node::transform(name, local).with_draw_info(DrawInfo::colors(offset, mult))
}

impl SolarSystem {
    /// Build the scene under `graph`'s root, instancing `sphere` under every body
    pub fn build(graph: &mut SceneGraph, sphere: NodeId) -> Result<Self, SceneError> {
        graph.get(sphere)?;
        let root = graph.root();

        let sun = graph.add_node(body(
            "sun",
            Mat4::scaling(6.0, 6.0, 6.0),
            [1.5, 1.5, 0.7, 1.0],
            [1.0, 1.0, 0.0, 1.0],
        ));

        let earth_orbit = graph.add_node(Node::transform("earth orbit", Mat4::translation(110.0, 0.0, 0.0)));
        let earth = graph.add_node(body(
            "earth",
            Mat4::scaling(3.0, 3.0, 3.0),
            [0.1, 0.4, 0.7, 1.0],
            [0.8, 0.6, 0.3, 1.0],
        ));

        // The moon orbit plane leans out of the ecliptic; its axis is the
        // plane direction turned a quarter turn about Z
        let moon_plane = utils::normalize(&Vec3::new(1.0, 0.3, 0.0));
        let moon_axis = utils::axis(&utils::transform_point(&Mat4::rotation_z(HALF_PI), &moon_plane));
        let moon_offset = utils::scale_vector(&moon_plane, 30.0);
        let moon_orbit = graph.add_node(Node::transform(
            "moon orbit",
            Mat4::translation(moon_offset.x, moon_offset.y, moon_offset.z),
        ));
        let moon = graph.add_node(body(
            "moon",
            Mat4::scaling(1.2, 1.2, 1.2),
            [0.4, 0.4, 0.4, 1.0],
            [0.3, 0.3, 0.3, 1.0],
        ));

        let moon2_orbit = graph.add_node(Node::transform(
            "moon2 orbit",
            Mat4::rotation_y(PI) * Mat4::translation(40.0, 0.0, 0.0),
        ));
        let moon2 = graph.add_node(body(
            "moon2",
            Mat4::scaling(0.5, 0.6, 0.5),
            [0.5, 0.3, 0.2, 1.0],
            [0.3, 0.3, 0.3, 1.0],
        ));

        // Orbits in the YZ plane
        let binary = graph.add_node(Node::transform(
            "binary planetoids",
            Mat4::translation(0.0, 105.0, 0.0) * Mat4::rotation_x(HALF_PI),
        ));
        let b1_orbit = graph.add_node(Node::transform("b1 orbit", Mat4::translation(20.0, 0.0, 0.0)));
        let b2_orbit = graph.add_node(Node::transform("b2 orbit", Mat4::translation(-20.0, 0.0, 0.0)));
        let b1 = graph.add_node(body(
            "b1",
            Mat4::scaling(1.5, 1.5, 2.5),
            [0.3, 0.2, 0.0, 1.0],
            [0.4, 0.6, 0.0, 1.0],
        ));
        let b2 = graph.add_node(body(
            "b2",
            Mat4::scaling(1.5, 1.5, 2.5),
            [0.0, 0.2, 0.3, 1.0],
            [0.0, 0.6, 0.4, 1.0],
        ));

        let edges = [
            (root, sun),
            (root, earth_orbit),
            (root, binary),
            (earth_orbit, earth),
            (earth_orbit, moon_orbit),
            (moon_orbit, moon),
            (earth_orbit, moon2_orbit),
            (moon2_orbit, moon2),
            (binary, b1_orbit),
            (binary, b2_orbit),
            (b1_orbit, b1),
            (b2_orbit, b2),
            (sun, sphere),
            (earth, sphere),
            (moon, sphere),
            (moon2, sphere),
            (b1, sphere),
            (b2, sphere),
        ];
        for (parent, child) in edges {
            graph.add_child(parent, child)?;
        }

        Ok(Self {
            sun,
            earth_orbit,
            earth,
            moon_orbit,
            moon,
            moon2_orbit,
            moon2,
            binary,
            b1_orbit,
            b2_orbit,
            b1,
            b2,
            moon_axis,
        })
    }

    /// The built-in rotation rules, in application order
    pub fn rotation_rules(&self) -> Vec<RotationRule> {
        let moon_axis = RotationAxis::Arbitrary(self.moon_axis);
        vec![
            RotationRule::new(self.earth_orbit, RotationAxis::Y, 1.0),
            RotationRule::new(self.earth, moon_axis, 6.0),
            RotationRule::new(self.moon_orbit, moon_axis, 2.0),
            RotationRule::new(self.moon2_orbit, RotationAxis::Y, 6.0),
            RotationRule::new(self.moon, moon_axis, 2.0),
            RotationRule::new(self.sun, RotationAxis::Y, 2.0),
            RotationRule::new(self.binary, RotationAxis::X, 1.0),
            RotationRule::new(self.b1_orbit, RotationAxis::Z, 3.0),
            RotationRule::new(self.b2_orbit, RotationAxis::Z, 3.0),
            RotationRule::new(self.b1, RotationAxis::Z, 3.0),
            RotationRule::new(self.b2, RotationAxis::Z, 3.0),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::node::NodeKind;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn build() -> (SceneGraph, NodeId, SolarSystem) {
        let mut graph = SceneGraph::new("solar system");
        let sphere = graph.add_node(Node::new("sphere", NodeKind::Drawable));
        let system = SolarSystem::build(&mut graph, sphere).unwrap();
        (graph, sphere, system)
    }

    #[test]
    fn test_topology() {
        let (graph, sphere, system) = build();
        let root = graph.get(graph.root()).unwrap();
        assert_eq!(root.children(), &[system.sun, system.earth_orbit, system.binary]);
        assert_eq!(
            graph.get(system.earth_orbit).unwrap().children(),
            &[system.earth, system.moon_orbit, system.moon2_orbit]
        );
        assert_eq!(graph.node_count(), 14);
        assert_eq!(graph.edge_count(), 18);
        assert_eq!(graph.get(system.b2).unwrap().children(), &[sphere]);
    }

    #[test]
    fn test_moon_axis_is_perpendicular_to_its_plane() {
        let (graph, _, system) = build();
        let moon_offset = utils::translation_of(graph.get(system.moon_orbit).unwrap().local_matrix());
        assert_relative_eq!(moon_offset.norm(), 30.0, epsilon = 1e-4);
        assert_relative_eq!(moon_offset.dot(&system.moon_axis), 0.0, epsilon = 1e-4);
        assert_relative_eq!(system.moon_axis.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_moon2_starts_opposite() {
        let (graph, _, system) = build();
        let start = utils::translation_of(graph.get(system.moon2_orbit).unwrap().local_matrix());
        assert_relative_eq!(start, Vec3::new(-40.0, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_rules_target_every_moving_node() {
        let (_, _, system) = build();
        let rules = system.rotation_rules();
        assert_eq!(rules.len(), 11);
        assert_eq!(rules[0], RotationRule::new(system.earth_orbit, RotationAxis::Y, 1.0));
        assert!(rules.iter().all(|rule| rule.rate > 0.0));
    }
}
