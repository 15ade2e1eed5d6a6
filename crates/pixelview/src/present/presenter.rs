//! The presenters: windowed and offscreen.

use winit::window::Window;

use crate::device::Gpu;
use crate::error::PresentError;

use super::common::validation_scope;
use super::pipeline::{self, ShaderSet};
use super::{frame, quad, readback};

/// Presents raw RGB frames on a window surface.
///
/// One call to [`present`](Self::present) configures the surface to the
/// frame's exact size, draws the frame as a full-surface textured quad, and
/// returns. The drawn frame stays visible until the next present. Every
/// per-call GPU object (pipeline, texture, buffers) is dropped when the
/// call returns; only the device, queue, and surface persist.
///
/// `present` is a pure function of its inputs and the shader set: repeated
/// calls with the same arguments produce the same output. Concurrent use is
/// ruled out by `&mut self`.
pub struct ImagePresenter<'w> {
    gpu: Gpu<'w>,
    shaders: ShaderSet,
}

impl<'w> ImagePresenter<'w> {
    /// Creates a presenter bound to a window, with the built-in shaders.
    pub fn new(window: &'w Window) -> Result<Self, PresentError> {
        Self::with_shaders(window, ShaderSet::default())
    }

    /// Creates a presenter bound to a window, with caller-supplied shaders.
    pub fn with_shaders(window: &'w Window, shaders: ShaderSet) -> Result<Self, PresentError> {
        let gpu = pollster::block_on(Gpu::for_window(window))?;
        Ok(Self { gpu, shaders })
    }

    /// Renders `pixels` (RGB, row-major, top row first) onto the surface.
    ///
    /// The surface is resized to exactly `width` x `height` first.
    /// `pixels.len()` must equal `width * height * 3`. Any rejection from
    /// the GPU at any step aborts the whole call.
    pub fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
        frame::validate(pixels, width, height)?;

        self.gpu.resize(width, height);

        let mut gpu_frame = self.gpu.begin_frame()?;
        draw_frame(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.target_format(),
            &mut gpu_frame.encoder,
            &gpu_frame.view,
            &self.shaders,
            pixels,
            width,
            height,
        )?;
        self.gpu.submit(gpu_frame);

        log::debug!("presented {width}x{height} frame");
        Ok(())
    }
}

/// Presents raw RGB frames into an offscreen texture.
///
/// Same drawing path as [`ImagePresenter`], but the target is a readable
/// texture instead of a window, so a harness can assert on the rendered
/// pixels via [`read_pixels`](Self::read_pixels).
pub struct OffscreenPresenter {
    gpu: Gpu<'static>,
    shaders: ShaderSet,
    target: Option<Target>,
}

struct Target {
    texture: wgpu::Texture,
    width: u32,
    height: u32,
}

impl OffscreenPresenter {
    /// Creates a headless presenter with the built-in shaders.
    pub fn new() -> Result<Self, PresentError> {
        Self::with_shaders(ShaderSet::default())
    }

    /// Creates a headless presenter with caller-supplied shaders.
    pub fn with_shaders(shaders: ShaderSet) -> Result<Self, PresentError> {
        let gpu = pollster::block_on(Gpu::headless())?;
        Ok(Self {
            gpu,
            shaders,
            target: None,
        })
    }

    /// Renders `pixels` into a fresh `width` x `height` RGBA8 target.
    pub fn present(&mut self, pixels: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
        frame::validate(pixels, width, height)?;

        let device = self.gpu.device();

        let texture = validation_scope(device, || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("pixelview offscreen target"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
        })
        .map_err(PresentError::ContextSetup)?;

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("pixelview offscreen encoder"),
        });

        draw_frame(
            device,
            self.gpu.queue(),
            wgpu::TextureFormat::Rgba8Unorm,
            &mut encoder,
            &view,
            &self.shaders,
            pixels,
            width,
            height,
        )?;

        self.gpu.queue().submit(std::iter::once(encoder.finish()));

        self.target = Some(Target {
            texture,
            width,
            height,
        });
        log::debug!("rendered {width}x{height} frame offscreen");
        Ok(())
    }

    /// Returns the size of the last rendered target, if any.
    pub fn target_size(&self) -> Option<(u32, u32)> {
        self.target.as_ref().map(|t| (t.width, t.height))
    }

    /// Reads the last rendered target back as tightly packed RGBA bytes,
    /// top row first.
    pub fn read_pixels(&self) -> Result<Vec<u8>, PresentError> {
        let target = self
            .target
            .as_ref()
            .ok_or_else(|| PresentError::Readback("no frame has been presented".into()))?;

        readback::read_rgba(
            self.gpu.device(),
            self.gpu.queue(),
            &target.texture,
            target.width,
            target.height,
        )
    }
}

/// The linear draw procedure shared by both presenters.
///
/// Compile shaders, link the pipeline, upload the frame texture, upload the
/// two quad buffers, record one draw: full viewport, cleared to opaque
/// black, two triangles covering the quad. No step is retried; the first
/// rejection aborts the call.
#[allow(clippy::too_many_arguments)]
fn draw_frame(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    target_format: wgpu::TextureFormat,
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    shaders: &ShaderSet,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), PresentError> {
    let linked = pipeline::build_pipeline(device, target_format, shaders)?;
    let texture = frame::upload(device, queue, pixels, width, height)?;

    let bind_group = validation_scope(device, || {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pixelview frame bind group"),
            layout: &linked.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        })
    })
    .map_err(PresentError::TextureUpload)?;

    let buffers = quad::upload_quad(device)?;

    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("pixelview blit pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
    rpass.set_pipeline(&linked.pipeline);
    rpass.set_bind_group(0, &bind_group, &[]);
    rpass.set_vertex_buffer(0, buffers.positions.slice(..));
    rpass.set_vertex_buffer(1, buffers.texcoords.slice(..));
    rpass.set_index_buffer(buffers.indices.slice(..), wgpu::IndexFormat::Uint16);
    rpass.draw_indexed(0..6, 0, 0..1);

    Ok(())
}
