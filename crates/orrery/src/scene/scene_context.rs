//! Scene context
//!
//! Owns everything a frame needs: the graph, the current render instances,
//! the rotation rules and the shared sphere geometry. All mutation goes
//! through `&mut Scene`, so insertion can never interleave with a rotation,
//! propagation or expansion pass.

use super::error::SceneError;
use super::expander;
use super::graph::SceneGraph;
use super::insertion::{self, BodyForm, BodySpec, InsertedBody};
use super::node::{Node, NodeId};
use super::propagation;
use super::render_instance::RenderInstance;
use super::rotation::RotationDriver;
use super::solar_system::SolarSystem;
use crate::config::OrreryConfig;
use crate::foundation::math::Mat4;
use crate::render::geometry::{GeometryHandle, GeometryLibrary, ProgramDesc, ProgramHandle};
use crate::render::mesh::MeshData;

/// Name of the graph root
pub const ROOT_NAME: &str = "solar system";

/// Name of the shared sphere Drawable
pub const SPHERE_NAME: &str = "sphere";

/// An animated, instanced scene
#[derive(Debug)]
pub struct Scene {
    graph: SceneGraph,
    library: GeometryLibrary,
    rotation: RotationDriver,
    instances: Vec<RenderInstance>,
    sphere: NodeId,
    geometry: GeometryHandle,
    program: ProgramHandle,
    solar_system: Option<SolarSystem>,
    inserted_bodies: usize,
}

impl Scene {
    /// Create a scene holding only the root and an unattached sphere
    ///
    /// Nothing is drawn until bodies are attached and the scene is expanded.
    pub fn new(config: &OrreryConfig) -> Self {
        let mut library = GeometryLibrary::new();
        let geometry = library.add_mesh(MeshData::sphere(
            config.sphere.radius,
            config.sphere.subdivisions_axis,
            config.sphere.subdivisions_height,
        ));
        let program = library.add_program(ProgramDesc::vertex_color_lit());

        let mut graph = SceneGraph::new(ROOT_NAME).with_max_depth(config.expansion.max_depth);
        let sphere = graph.add_node(Node::drawable(SPHERE_NAME, geometry, program));

        Self {
            graph,
            library,
            rotation: RotationDriver::new(config.rotation.base_rate),
            instances: Vec::new(),
            sphere,
            geometry,
            program,
            solar_system: None,
            inserted_bodies: 0,
        }
    }

    /// Build the reference solar system, insert the configured bodies and
    /// expand
    pub fn solar_system(config: &OrreryConfig) -> Result<Self, SceneError> {
        let mut scene = Self::new(config);
        let system = SolarSystem::build(&mut scene.graph, scene.sphere)?;
        scene.rotation = RotationDriver::new(config.rotation.base_rate).with_builtin(system.rotation_rules());
        scene.solar_system = Some(system);

        for spec in &config.bodies {
            scene.attach(spec)?;
        }
        scene.expand()?;
        log::info!(
            "Built solar system: {} nodes, {} edges, {} rotation rules",
            scene.graph.node_count(),
            scene.graph.edge_count(),
            scene.rotation.len()
        );
        Ok(scene)
    }

    /// Rebuild the render instances from the current topology
    ///
    /// On error the previous instance list stays in place.
    pub fn expand(&mut self) -> Result<usize, SceneError> {
        let instances = expander::expand(&mut self.graph)?;
        for instance in &instances {
            log::debug!("Render instance '{}'", instance.name);
        }
        self.instances = instances;
        log::info!("Expanded scene into {} render instances", self.instances.len());
        Ok(self.instances.len())
    }

    fn attach(&mut self, spec: &BodySpec) -> Result<InsertedBody, SceneError> {
        let index = self.inserted_bodies + 1;
        let body = insertion::attach_body(&mut self.graph, &mut self.rotation, self.sphere, spec, index)?;
        self.inserted_bodies = index;
        Ok(body)
    }

    /// Insert a body and re-expand
    ///
    /// An invalid request is rejected before anything changes.
    pub fn insert_body(&mut self, spec: &BodySpec) -> Result<InsertedBody, SceneError> {
        let body = self.attach(spec).inspect_err(|e| log::warn!("Rejected body: {e}"))?;
        self.expand()?;
        log::info!(
            "Inserted body {} at {:.1} from the root",
            self.inserted_bodies,
            spec.dx_sun
        );
        Ok(body)
    }

    /// Parse, validate and insert a body given as text fields
    pub fn insert_body_form(&mut self, form: &BodyForm) -> Result<InsertedBody, SceneError> {
        let spec = BodySpec::from_form(form).inspect_err(|e| log::warn!("Rejected body form: {e}"))?;
        self.insert_body(&spec)
    }

    /// Run the rotation rules once
    pub fn advance(&mut self, fps_adjust: f32) -> Result<(), SceneError> {
        self.rotation.advance(&mut self.graph, fps_adjust)
    }

    /// Recompute world matrices
    pub fn propagate(&mut self) {
        propagation::propagate(&mut self.graph);
    }

    /// One animation tick: rotate, then propagate
    ///
    /// Instances read after this call see this frame's matrices.
    pub fn frame(&mut self, fps_adjust: f32) -> Result<&[RenderInstance], SceneError> {
        self.advance(fps_adjust)?;
        self.propagate();
        Ok(&self.instances)
    }

    /// Current render instances
    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    /// World matrix of the instance at `index`
    pub fn instance_world_matrix(&self, index: usize) -> Option<&Mat4> {
        self.instances.get(index)?.world_matrix(&self.graph)
    }

    /// The graph
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The graph, mutably; call [`Scene::expand`] after changing topology
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// Meshes and programs behind the instance handles
    pub fn library(&self) -> &GeometryLibrary {
        &self.library
    }

    /// Rotation rules
    pub fn rotation(&self) -> &RotationDriver {
        &self.rotation
    }

    /// The shared sphere Drawable
    pub fn sphere(&self) -> NodeId {
        self.sphere
    }

    /// Shared sphere geometry
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    /// Shared program
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Handles of the reference scene, if it was built
    pub fn solar_system_nodes(&self) -> Option<&SolarSystem> {
        self.solar_system.as_ref()
    }

    /// Number of bodies inserted so far
    pub fn inserted_bodies(&self) -> usize {
        self.inserted_bodies
    }
}
