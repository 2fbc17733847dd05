//! wgpu presentation of the cell image
//!
//! The grid lives in a single RGBA8 texture drawn as one screen-space quad.
//! The quad's corners come from [`ViewportUniform`], so panning and zooming
//! never touch the texture.

use std::{iter, sync::Arc};

use anyhow::{bail, Context};
use log::{debug, info, warn};
use winit::window::Window;

use super::{resources::TextureResource, traits::RenderAdapter, viewport::ViewportRect};
use crate::wgpu_utils::{binding_types, UniformBuffer};

/// Quad bounds in normalized device coordinates: left, top, right, bottom
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewportUniform {
    pub bounds: [f32; 4],
}

impl ViewportUniform {
    /// Map a pixel rectangle on a `surface_width` x `surface_height` surface
    /// to clip space (y up)
    pub fn from_rect(rect: ViewportRect, surface_width: u32, surface_height: u32) -> Self {
        let sw = surface_width.max(1) as f32;
        let sh = surface_height.max(1) as f32;
        let to_x = |px: f32| px / sw * 2.0 - 1.0;
        let to_y = |py: f32| 1.0 - py / sh * 2.0;

        let left = rect.x as f32;
        let top = rect.y as f32;
        Self {
            bounds: [
                to_x(left),
                to_y(top),
                to_x(left + rect.width as f32),
                to_y(top + rect.height as f32),
            ],
        }
    }
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    grid_texture: TextureResource,
    viewport_ubo: UniformBuffer<ViewportUniform>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    /// Set up a surface on `window` and a texture sized for a
    /// `grid_width` x `grid_height` grid
    pub async fn new(window: Arc<Window>, grid_width: u32, grid_height: u32) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("Failed to create a surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to request adapter")?;
        info!("Using adapter: {}", adapter.get_info().name);

        let required_limits =
            wgpu::Limits::downlevel_defaults().using_resolution(adapter.limits());
        let max_texture = required_limits.max_texture_dimension_2d;
        if grid_width > max_texture || grid_height > max_texture {
            bail!(
                "grid {}x{} exceeds the adapter's {} texel texture limit",
                grid_width,
                grid_height,
                max_texture
            );
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits,
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("Failed to request a device")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let Some(&first_format) = surface_capabilities.formats.first() else {
            bail!("Surface is not supported by the adapter");
        };
        // Palette bytes are display values; keep the swapchain linear
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .unwrap_or(first_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        debug!("Surface configured: {:?} {}x{}", format, config.width, config.height);

        let grid_texture = TextureResource::create_rgba_with_filter(
            &device,
            grid_width,
            grid_height,
            "Grid Texture",
            wgpu::FilterMode::Nearest,
        );
        let viewport_ubo = UniformBuffer::new_with_data(
            &device,
            &ViewportUniform::from_rect(
                ViewportRect::new(0, 0, grid_width, grid_height),
                config.width,
                config.height,
            ),
        );

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Grid Bind Group Layout"),
            entries: &[
                binding_types::layout_entry(0, binding_types::uniform()),
                binding_types::layout_entry(1, binding_types::texture_2d()),
                binding_types::layout_entry(
                    2,
                    binding_types::sampler(wgpu::SamplerBindingType::Filtering),
                ),
            ],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Grid Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.binding_resource(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&grid_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&grid_texture.sampler),
                },
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Grid Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grid Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
                unclipped_depth: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            multiview: None,
            cache: None,
        });

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group,
            grid_texture,
            viewport_ubo,
            clear_color: wgpu::Color::BLACK,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Upload the cell pixels and draw one frame
    pub fn render(
        &mut self,
        pixels: &[u8],
        pitch: usize,
        viewport: ViewportRect,
    ) -> Result<(), wgpu::SurfaceError> {
        if pixels.len() < self.grid_texture.required_len(pitch) {
            warn!(
                "Skipping upload: {} bytes is short for a {:?} texture at pitch {}",
                pixels.len(),
                self.grid_texture.size(),
                pitch
            );
        } else {
            self.grid_texture.write(&self.queue, pixels, pitch as u32);
        }
        self.viewport_ubo.update_content(
            &self.queue,
            ViewportUniform::from_rect(viewport, self.config.width, self.config.height),
        );

        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..6, 0..1);
        }

        self.queue.submit(iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

impl RenderAdapter for RenderEngine {
    fn present(&mut self, pixels: &[u8], pitch: usize, viewport: ViewportRect) {
        match self.render(pixels, pitch, viewport) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = self.surface_size();
                debug!("Surface lost or outdated, reconfiguring");
                self.resize(width, height);
            }
            Err(e) => warn!("Dropped frame: {}", e),
        }
    }
}
