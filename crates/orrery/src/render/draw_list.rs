//! Per-frame draw list
//!
//! Turns the scene's render instances into commands a graphics backend can
//! replay in order. Each command carries the clip-space matrix
//! (`view_projection * world`) under `u_matrix` next to the instance's colour
//! uniforms, plus flags saying whether the program or geometry differs from
//! the previous command. Switching program always rebinds geometry.
//!
//! The list is rebuilt every frame; it is only valid for the frame whose
//! propagation ran just before [`DrawList::build`].

use super::geometry::{GeometryHandle, ProgramHandle};
use crate::foundation::math::{Mat4, Vec4};
use crate::scene::{uniforms, RenderInstance, Scene, UniformValue, Uniforms};

/// One draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    /// Index into [`Scene::instances`]
    pub instance: usize,

    /// Geometry to draw
    pub geometry: GeometryHandle,

    /// Program to draw with
    pub program: ProgramHandle,

    /// `view_projection * world`
    pub matrix: Mat4,

    /// Instance uniforms with `u_matrix` set
    pub uniforms: Uniforms,

    /// Program differs from the previous command
    pub bind_program: bool,

    /// Geometry differs from the previous command, or the program changed
    pub bind_geometry: bool,
}

/// Packed per-instance data for instanced upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceRaw {
    /// Clip-space matrix, column-major
    pub matrix: [[f32; 4]; 4],
    /// `u_colorOffset`
    pub color_offset: [f32; 4],
    /// `u_colorMult`
    pub color_mult: [f32; 4],
}

// Only f32 arrays, no padding
unsafe impl bytemuck::Pod for InstanceRaw {}
unsafe impl bytemuck::Zeroable for InstanceRaw {}

fn color(uniforms: &Uniforms, name: &str, default: Vec4) -> [f32; 4] {
    match uniforms.get(name) {
        Some(UniformValue::Vec4(value)) => (*value).into(),
        _ => default.into(),
    }
}

/// Ordered draw calls for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Build the draw list for the scene's current instances
    ///
    /// Instances whose owner is missing from the scene graph are skipped.
    pub fn build(scene: &Scene, view_projection: &Mat4) -> Self {
        let mut commands = Vec::with_capacity(scene.instances().len());
        let mut last_program = None;
        let mut last_geometry = None;

        for (index, instance) in scene.instances().iter().enumerate() {
            let Some(world) = instance.world_matrix(scene.graph()) else {
                log::warn!("Skipping instance '{}' with no owner in the graph", instance.name);
                continue;
            };
            let bind_program = last_program != Some(instance.program);
            let bind_geometry = bind_program || last_geometry != Some(instance.geometry);
            last_program = Some(instance.program);
            last_geometry = Some(instance.geometry);

            commands.push(Self::command(index, instance, view_projection * world, bind_program, bind_geometry));
        }

        log::trace!("Built draw list with {} commands", commands.len());
        Self { commands }
    }

    fn command(
        index: usize,
        instance: &RenderInstance,
        matrix: Mat4,
        bind_program: bool,
        bind_geometry: bool,
    ) -> DrawCommand {
        let mut uniforms = instance.uniforms.clone();
        uniforms.insert(uniforms::MATRIX.to_string(), UniformValue::Mat4(matrix));
        DrawCommand {
            instance: index,
            geometry: instance.geometry,
            program: instance.program,
            matrix,
            uniforms,
            bind_program,
            bind_geometry,
        }
    }

    /// Commands in draw order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of program binds the list needs
    pub fn program_binds(&self) -> usize {
        self.commands.iter().filter(|c| c.bind_program).count()
    }

    /// Number of geometry binds the list needs
    pub fn geometry_binds(&self) -> usize {
        self.commands.iter().filter(|c| c.bind_geometry).count()
    }

    /// Pack the commands for instanced upload
    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.commands
            .iter()
            .map(|command| InstanceRaw {
                matrix: command.matrix.into(),
                color_offset: color(&command.uniforms, uniforms::COLOR_OFFSET, Vec4::zeros()),
                color_mult: color(&command.uniforms, uniforms::COLOR_MULT, Vec4::repeat(1.0)),
            })
            .collect()
    }
}
