use winit::window::Window;

use crate::error::PresentError;

use super::surface;

/// Owns wgpu core objects and, for windowed use, the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface when bound to a window
/// - acquires frames and provides an encoder + view for rendering
///
/// A headless `Gpu` has no surface and renders into caller-supplied
/// texture views instead.
pub struct Gpu<'w> {
    /// wgpu instance used to create the adapter and surface.
    #[allow(dead_code)]
    instance: wgpu::Instance,

    /// Surface bound to the window, if any.
    ///
    /// Surface lifetime is tied to the window; the window must outlive
    /// the `Gpu` instance.
    surface: Option<wgpu::Surface<'w>>,

    /// Selected adapter.
    #[allow(dead_code)]
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration, present only when windowed.
    config: Option<wgpu::SurfaceConfiguration>,
}

/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the
/// surface texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu; callers block
    /// on this with `pollster`. The surface is configured FIFO, so a
    /// presented frame stays visible until the next present.
    pub async fn for_window(window: &'w Window) -> Result<Self, PresentError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| PresentError::ContextCreation(e.to_string()))?;

        let (adapter, device, queue) = request_core(&instance, Some(&surface)).await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps)
            .ok_or_else(|| PresentError::ContextCreation("no supported surface formats".into()))?;
        let alpha_mode = surface::choose_alpha_mode(&surface_caps);

        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        Ok(Self {
            instance,
            surface: Some(surface),
            adapter,
            device,
            queue,
            config: Some(config),
        })
    }

    /// Returns the render target format.
    ///
    /// Windowed: the configured surface format. Headless: the fixed
    /// offscreen format.
    pub fn target_format(&self) -> wgpu::TextureFormat {
        self.config
            .as_ref()
            .map_or(wgpu::TextureFormat::Rgba8Unorm, |c| c.format)
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Reconfigures the surface to exactly the given size.
    ///
    /// No-op when headless or when the size is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (Some(surface), Some(config)) = (self.surface.as_ref(), self.config.as_mut()) else {
            return;
        };
        surface::apply_resize(surface, &self.device, config, width, height);
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, PresentError> {
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| PresentError::ContextSetup("no surface attached".into()))?;

        let surface_texture = surface
            .get_current_texture()
            .map_err(|e| PresentError::ContextSetup(e.to_string()))?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("pixelview frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }
}

impl Gpu<'static> {
    /// Creates a GPU context with no surface attached.
    ///
    /// Used for offscreen rendering into textures; read-back is the only
    /// way out.
    pub async fn headless() -> Result<Self, PresentError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let (adapter, device, queue) = request_core(&instance, None).await?;

        Ok(Self {
            instance,
            surface: None,
            adapter,
            device,
            queue,
            config: None,
        })
    }
}

async fn request_core(
    instance: &wgpu::Instance,
    compatible_surface: Option<&wgpu::Surface<'_>>,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue), PresentError> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| PresentError::ContextCreation(e.to_string()))?;

    log::debug!("adapter: {:?}", adapter.get_info().name);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("pixelview device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|e| PresentError::ContextCreation(e.to_string()))?;

    Ok((adapter, device, queue))
}
