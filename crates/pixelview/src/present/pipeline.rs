//! Shader compilation and pipeline (link) setup.

use crate::error::PresentError;

use super::common::validation_scope;
use super::quad;

/// Vertex + fragment shader sources, each carrying a stable identifier.
///
/// The identifiers exist so a compile failure can name the stage that was
/// rejected. The defaults, `"vs"` and `"fs"`, ship with the crate and blit
/// the frame texture across the quad unchanged.
#[derive(Debug, Clone)]
pub struct ShaderSet {
    vertex_id: String,
    vertex_src: String,
    fragment_id: String,
    fragment_src: String,
}

impl ShaderSet {
    /// Builds a shader set from explicit WGSL sources.
    ///
    /// The vertex stage must expose `vs_main` with positions at location 0
    /// and texcoords at location 1; the fragment stage must expose
    /// `fs_main` sampling bindings 0 (texture) and 1 (sampler) of group 0.
    pub fn new(
        vertex_id: impl Into<String>,
        vertex_src: impl Into<String>,
        fragment_id: impl Into<String>,
        fragment_src: impl Into<String>,
    ) -> Self {
        Self {
            vertex_id: vertex_id.into(),
            vertex_src: vertex_src.into(),
            fragment_id: fragment_id.into(),
            fragment_src: fragment_src.into(),
        }
    }
}

impl Default for ShaderSet {
    fn default() -> Self {
        Self::new(
            "vs",
            include_str!("shaders/vs.wgsl"),
            "fs",
            include_str!("shaders/fs.wgsl"),
        )
    }
}

pub(super) struct Pipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

/// Compiles both stages and links them into a render pipeline.
///
/// Each stage compiles under its own validation scope so a rejection is
/// attributed to the right identifier; pipeline creation gets a scope of
/// its own for link-time failures (missing entry points, interface
/// mismatches).
pub(super) fn build_pipeline(
    device: &wgpu::Device,
    target_format: wgpu::TextureFormat,
    shaders: &ShaderSet,
) -> Result<Pipeline, PresentError> {
    let vertex_module = compile_stage(device, &shaders.vertex_id, &shaders.vertex_src)?;
    let fragment_module = compile_stage(device, &shaders.fragment_id, &shaders.fragment_src)?;

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("pixelview blit bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pixelview blit pipeline layout"),
        bind_group_layouts: &[&bind_group_layout],
        immediate_size: 0,
    });

    let pipeline = validation_scope(device, || {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pixelview blit pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[quad::position_layout(), quad::texcoord_layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),

            multiview_mask: None,
            cache: None,
        })
    })
    .map_err(PresentError::ProgramLink)?;

    Ok(Pipeline {
        pipeline,
        bind_group_layout,
    })
}

fn compile_stage(
    device: &wgpu::Device,
    identifier: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, PresentError> {
    validation_scope(device, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(identifier),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    })
    .map_err(|message| PresentError::ShaderCompile {
        identifier: identifier.to_string(),
        message,
    })
}
