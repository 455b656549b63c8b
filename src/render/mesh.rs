use super::helpers;
use crate::core::{Geometry, MeshVertex, SpawnedObject};
use wgpu;
use wgpu::util::DeviceExt;

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct GlobalUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) light_dir: [f32; 4],
    pub(crate) ambient: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) normal_mat: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

impl ObjectUniforms {
    pub(crate) fn from_object(obj: &SpawnedObject) -> Self {
        let model = obj.model_matrix();
        Self {
            model: model.to_cols_array_2d(),
            normal_mat: model.inverse().transpose().to_cols_array_2d(),
            color: obj.material.rgba(),
        }
    }
}

pub(crate) struct MeshResources {
    pub(crate) fill_pipeline: wgpu::RenderPipeline,
    pub(crate) wire_pipeline: wgpu::RenderPipeline,
    pub(crate) object_bgl: wgpu::BindGroupLayout,
    pub(crate) globals_buffer: wgpu::Buffer,
    pub(crate) globals_bg: wgpu::BindGroup,
}

pub(crate) fn create_mesh_resources(
    device: &wgpu::Device,
    color_format: wgpu::TextureFormat,
) -> MeshResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("mesh_shader"),
        source: wgpu::ShaderSource::Wgsl(crate::core::MESH_WGSL.into()),
    });
    let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("globals_bgl"),
        entries: &[helpers::uniform_layout_entry(
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("object_bgl"),
        entries: &[helpers::uniform_layout_entry(
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        )],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("mesh_pl"),
        bind_group_layouts: &[&globals_bgl, &object_bgl],
        push_constant_ranges: &[],
    });
    let vertex_layout = || wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    };
    let fill_pipeline = helpers::make_mesh_pipeline(
        device,
        "mesh_fill_pipeline",
        &pl,
        &shader,
        vertex_layout(),
        wgpu::PrimitiveTopology::TriangleList,
        color_format,
    );
    let wire_pipeline = helpers::make_mesh_pipeline(
        device,
        "mesh_wire_pipeline",
        &pl,
        &shader,
        vertex_layout(),
        wgpu::PrimitiveTopology::LineList,
        color_format,
    );
    let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("globals_uniforms"),
        size: std::mem::size_of::<GlobalUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("globals_bg"),
        layout: &globals_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: globals_buffer.as_entire_binding(),
        }],
    });

    MeshResources {
        fill_pipeline,
        wire_pipeline,
        object_bgl,
        globals_buffer,
        globals_bg,
    }
}

/// Vertex buffer plus triangle and edge-line index buffers for one geometry.
pub(crate) struct GpuMesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) tri_buffer: wgpu::Buffer,
    pub(crate) tri_count: u32,
    pub(crate) line_buffer: wgpu::Buffer,
    pub(crate) line_count: u32,
}

impl GpuMesh {
    pub(crate) fn upload(device: &wgpu::Device, geometry: &Geometry) -> Self {
        let tris: Vec<u32> = match &geometry.indices {
            Some(idx) => idx.clone(),
            None => (0..geometry.vertices.len() as u32).collect(),
        };
        let lines = geometry.edge_line_indices();
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knot_vertices"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let tri_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knot_triangles"),
            contents: bytemuck::cast_slice(&tris),
            usage: wgpu::BufferUsages::INDEX,
        });
        let line_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("knot_lines"),
            contents: bytemuck::cast_slice(&lines),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            tri_buffer,
            tri_count: tris.len() as u32,
            line_buffer,
            line_count: lines.len() as u32,
        }
    }
}

/// Per-knot uniform buffer and its bind group.
pub(crate) struct ObjectSlot {
    pub(crate) buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
}

impl ObjectSlot {
    pub(crate) fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("object_uniforms"),
            size: std::mem::size_of::<ObjectUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bg"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}
