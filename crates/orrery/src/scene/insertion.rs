//! Runtime body insertion
//!
//! A body request is validated in full before anything is built. A valid
//! request becomes an orbit Transform under the root, a planet Transform
//! under the orbit carrying the body's colours, and an edge from the planet
//! to the shared sphere Drawable. Two rotation rules are registered for it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::error::{SceneError, ValidationError};
use super::graph::SceneGraph;
use super::node::{DrawInfo, Node, NodeId};
use super::rotation::{RotationAxis, RotationDriver, RotationRule};
use crate::foundation::math::{constants::HALF_PI, utils, Mat4, Mat4Ext, UnitVec3, Vec3};

/// Raw text form of a request, field wire name to input text
pub type BodyForm = HashMap<String, String>;

/// Field wire names, in validation order
pub const FIELDS: [&str; 9] = [
    "dxSun",
    "size",
    "orbitRotation",
    "planetRotation",
    "orbitTheta",
    "orbitPhi",
    "red",
    "green",
    "blue",
];

/// Orbital description of a new body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySpec {
    /// Orbital radius from the root
    pub dx_sun: f32,
    /// Uniform scale
    pub size: f32,
    /// Orbit angular rate, in multiples of the base rotation
    pub orbit_rotation: f32,
    /// Spin angular rate, in multiples of the base rotation
    pub planet_rotation: f32,
    /// Polar tilt of the orbit axis, radians
    pub orbit_theta: f32,
    /// Azimuth of the orbit axis tilt, radians
    pub orbit_phi: f32,
    /// Red channel
    pub red: f32,
    /// Green channel
    pub green: f32,
    /// Blue channel
    pub blue: f32,
}

/// Where a body starts and what its orbit spins about
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPlacement {
    /// Translation of the orbit node
    pub displacement: Vec3,
    /// Orbit rotation axis
    pub axis: UnitVec3,
}

/// Handles of the nodes built for an inserted body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertedBody {
    /// Orbit Transform, child of the root
    pub orbit: NodeId,
    /// Planet Transform, child of the orbit and parent of the sphere
    pub planet: NodeId,
}

impl BodySpec {
    fn values(&self) -> [f32; 9] {
        [
            self.dx_sun,
            self.size,
            self.orbit_rotation,
            self.planet_rotation,
            self.orbit_theta,
            self.orbit_phi,
            self.red,
            self.green,
            self.blue,
        ]
    }

    fn from_values(values: [f32; 9]) -> Self {
        let [dx_sun, size, orbit_rotation, planet_rotation, orbit_theta, orbit_phi, red, green, blue] = values;
        Self {
            dx_sun,
            size,
            orbit_rotation,
            planet_rotation,
            orbit_theta,
            orbit_phi,
            red,
            green,
            blue,
        }
    }

    /// Check that every field is finite
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in FIELDS.into_iter().zip(self.values()) {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// Parse and validate a text form
    ///
    /// Fails on the first field, in [`FIELDS`] order, that is missing, does
    /// not parse as a number or is not finite.
    pub fn from_form(form: &BodyForm) -> Result<Self, ValidationError> {
        let mut values = [0.0; 9];
        for (slot, field) in values.iter_mut().zip(FIELDS) {
            let raw = form.get(field).ok_or(ValidationError::MissingField(field))?;
            let value: f32 = raw.trim().parse().map_err(|_| ValidationError::NotANumber {
                field,
                value: raw.clone(),
            })?;
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field, value });
            }
            *slot = value;
        }
        Ok(Self::from_values(values))
    }

    /// Starting displacement and orbit axis
    ///
    /// With `orbitTheta` zero the body starts at `(dxSun, 0, 0)` and orbits
    /// about +Y, whatever `orbitPhi` holds. Otherwise the axis is the
    /// spherical direction `(sinθ cosφ, cosθ, sinθ sinφ)` and the body starts
    /// `dxSun` along the direction a quarter turn further in θ, which lies in
    /// the orbit plane.
    pub fn orbit(&self) -> OrbitPlacement {
        if self.orbit_theta == 0.0 {
            return OrbitPlacement {
                displacement: Vec3::new(self.dx_sun, 0.0, 0.0),
                axis: Vec3::y_axis(),
            };
        }

        let axis = spherical(self.orbit_theta, self.orbit_phi);
        let plane = spherical(self.orbit_theta + HALF_PI, self.orbit_phi);
        OrbitPlacement {
            displacement: utils::scale_vector(&utils::normalize(&plane), self.dx_sun),
            axis: utils::axis(&axis),
        }
    }

    /// `u_colorOffset` value, half the colour
    pub fn color_offset(&self) -> [f32; 4] {
        [self.red / 2.0, self.green / 2.0, self.blue / 2.0, 1.0]
    }

    /// `u_colorMult` value, the colour itself
    pub fn color_mult(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, 1.0]
    }
}

fn spherical(theta: f32, phi: f32) -> Vec3 {
    Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
}

/// Build and link the nodes for a body and register its rotation rules
///
/// `index` numbers the nodes ("new Orbit N", "new Planet N"). Validates
/// `spec` first; on error the graph and driver are untouched. The caller is
/// responsible for re-expanding afterwards.
pub fn attach_body(
    graph: &mut SceneGraph,
    driver: &mut RotationDriver,
    sphere: NodeId,
    spec: &BodySpec,
    index: usize,
) -> Result<InsertedBody, SceneError> {
    spec.validate()?;
    graph.get(sphere)?;

    let placement = spec.orbit();
    let d = placement.displacement;
    let orbit = graph.add_node(Node::transform(format!("new Orbit {index}"), Mat4::translation(d.x, d.y, d.z)));
    let planet = graph.add_node(
        Node::transform(
            format!("new Planet {index}"),
            Mat4::scaling(spec.size, spec.size, spec.size),
        )
        .with_draw_info(DrawInfo::colors(spec.color_offset(), spec.color_mult())),
    );

    let root = graph.root();
    graph.add_child(root, orbit)?;
    graph.add_child(orbit, planet)?;
    graph.add_child(planet, sphere)?;

    driver.register(RotationRule::new(
        orbit,
        RotationAxis::Arbitrary(placement.axis),
        spec.orbit_rotation,
    ));
    driver.register(RotationRule::new(planet, RotationAxis::Y, spec.planet_rotation));

    Ok(InsertedBody { orbit, planet })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn form(pairs: &[(&str, &str)]) -> BodyForm {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn valid_form() -> BodyForm {
        form(&[
            ("dxSun", "60"),
            ("size", "2.5"),
            ("orbitRotation", "1.5"),
            ("planetRotation", "4"),
            ("orbitTheta", "0"),
            ("orbitPhi", "0"),
            ("red", "0.2"),
            ("green", " 0.8 "),
            ("blue", "1"),
        ])
    }

    #[test]
    fn test_from_form_parses_all_fields() {
        let spec = BodySpec::from_form(&valid_form()).unwrap();
        assert_eq!(spec.dx_sun, 60.0);
        assert_eq!(spec.size, 2.5);
        assert_eq!(spec.green, 0.8);
        assert_eq!(spec.color_offset(), [0.1, 0.4, 0.5, 1.0]);
        assert_eq!(spec.color_mult(), [0.2, 0.8, 1.0, 1.0]);
    }

    #[test]
    fn test_from_form_names_offending_field() {
        let mut bad = valid_form();
        bad.insert("size".to_string(), "abc".to_string());
        let err = BodySpec::from_form(&bad).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotANumber {
                field: "size",
                value: "abc".to_string()
            }
        );
        assert_eq!(err.field(), "size");

        let mut missing = valid_form();
        missing.remove("blue");
        assert_eq!(BodySpec::from_form(&missing), Err(ValidationError::MissingField("blue")));

        let mut nan = valid_form();
        nan.insert("orbitPhi".to_string(), "NaN".to_string());
        assert_eq!(BodySpec::from_form(&nan).unwrap_err().field(), "orbitPhi");
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut spec = BodySpec::from_form(&valid_form()).unwrap();
        spec.orbit_rotation = f32::INFINITY;
        assert_eq!(spec.validate().unwrap_err().field(), "orbitRotation");
    }

    #[test]
    fn test_untilted_orbit_lies_on_x() {
        let placement = BodySpec::from_form(&valid_form()).unwrap().orbit();
        assert_relative_eq!(placement.displacement, Vec3::new(60.0, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(placement.axis, Vec3::y_axis());
    }

    #[test]
    fn test_azimuth_alone_keeps_default_orbit() {
        let mut spec = BodySpec::from_form(&valid_form()).unwrap();
        spec.orbit_phi = 1.2;
        let placement = spec.orbit();

        assert_relative_eq!(placement.displacement, Vec3::new(60.0, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(placement.axis, Vec3::y_axis());
    }

    #[test]
    fn test_tilted_orbit_starts_in_its_plane() {
        let mut spec = BodySpec::from_form(&valid_form()).unwrap();
        spec.orbit_theta = PI / 6.0;
        spec.orbit_phi = PI / 3.0;
        let placement = spec.orbit();

        assert_relative_eq!(placement.displacement.norm(), 60.0, epsilon = 1e-3);
        assert_relative_eq!(placement.displacement.dot(&placement.axis), 0.0, epsilon = 1e-3);
        assert_relative_eq!(placement.axis.y, (PI / 6.0).cos(), epsilon = EPSILON);
    }

    #[test]
    fn test_attach_body_wires_nodes_and_rules() {
        let mut graph = SceneGraph::new("root");
        let mut driver = RotationDriver::default();
        let sphere = graph.add_node(Node::new("sphere", crate::scene::node::NodeKind::Drawable));
        let spec = BodySpec::from_form(&valid_form()).unwrap();

        let body = attach_body(&mut graph, &mut driver, sphere, &spec, 1).unwrap();

        assert_eq!(graph.get(graph.root()).unwrap().children(), &[body.orbit]);
        assert_eq!(graph.get(body.orbit).unwrap().children(), &[body.planet]);
        assert_eq!(graph.get(body.planet).unwrap().children(), &[sphere]);
        assert_eq!(graph.get(body.orbit).unwrap().name(), "new Orbit 1");
        assert_eq!(graph.get(body.planet).unwrap().name(), "new Planet 1");
        assert_eq!(driver.len(), 2);
    }

    #[test]
    fn test_attach_body_rejects_without_mutation() {
        let mut graph = SceneGraph::new("root");
        let mut driver = RotationDriver::default();
        let sphere = graph.add_node(Node::new("sphere", crate::scene::node::NodeKind::Drawable));
        let mut spec = BodySpec::from_form(&valid_form()).unwrap();
        spec.size = f32::NAN;

        let err = attach_body(&mut graph, &mut driver, sphere, &spec, 1).unwrap_err();

        assert!(matches!(err, SceneError::Validation(ValidationError::NonFinite { field: "size", .. })));
        assert_eq!(graph.node_count(), 2);
        assert!(driver.is_empty());
    }
}
