//! wgpu render state
//!
//! Two pipelines (flat color and textured) and one draw target per scene
//! element. Every frame overwrites the targets' vertex buffers and redraws
//! all of them as triangle strips.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;
use winit::window::Window;

use super::targets::{Shading, TargetKind, TargetVertices, scene_targets};
use super::texture::{RgbaImage, Texture};
use super::vertex::{ColorVertex, TexturedVertex, colors};
use crate::error::Result;
use crate::settings::Settings;
use crate::sim::FrameState;

/// Per-target uniform (must match shaders)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct TransformUniform {
    scale: f32,
    _pad: [f32; 3],
}

/// GPU resources for one scene element
struct DrawTarget {
    kind: TargetKind,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    _scale_buffer: wgpu::Buffer,
    scale_bind_group: wgpu::BindGroup,
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    flat_pipeline: wgpu::RenderPipeline,
    textured_pipeline: wgpu::RenderPipeline,
    texture_bind_group: wgpu::BindGroup,
    // Kept alive for the bind group
    _water: Texture,
    /// Targets in draw order
    targets: Vec<DrawTarget>,
    /// Viewport size in pixels
    pub size: (u32, u32),
}

/// Clamp a requested surface size to the device's texture limit.
/// Returns `None` for a zero-sized (minimized) window.
pub fn clamp_surface_size(width: u32, height: u32, max_dimension: u32) -> Option<(u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    Some((width.min(max_dimension), height.min(max_dimension)))
}

impl RenderState {
    pub async fn new(
        window: Arc<Window>,
        settings: &Settings,
        water: &RgbaImage,
        initial: &FrameState,
    ) -> Result<Self> {
        let inner = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let info = adapter.get_info();
        log::info!("Using adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("soft-walls-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;
        let max_dimension = device.limits().max_texture_dimension_2d;
        log::info!("Max texture dimension: {}", max_dimension);

        let (width, height) =
            clamp_surface_size(inner.width.max(1), inner.height.max(1), max_dimension)
                .unwrap_or((1, 1));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);
        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: settings.present_mode.present_mode(),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "Surface configured: {}x{}, {} pacing",
            width,
            height,
            settings.present_mode.as_str()
        );

        let transform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
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

        water.check_fits(max_dimension)?;
        let water_texture = Texture::from_image(&device, &queue, water, "water_texture");
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("water_bind_group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&water_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&water_texture.sampler),
                },
            ],
        });

        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("flat.wgsl").into()),
        });
        let textured_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("textured_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("textured.wgsl").into()),
        });

        let flat_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("flat_pipeline_layout"),
            bind_group_layouts: &[&transform_layout],
            immediate_size: 0,
        });
        let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured_pipeline_layout"),
            bind_group_layouts: &[&transform_layout, &texture_layout],
            immediate_size: 0,
        });

        let flat_pipeline = create_strip_pipeline(
            &device,
            "flat_pipeline",
            &flat_layout,
            &flat_shader,
            ColorVertex::desc(),
            config.format,
        );
        let textured_pipeline = create_strip_pipeline(
            &device,
            "textured_pipeline",
            &textured_layout,
            &textured_shader,
            TexturedVertex::desc(),
            config.format,
        );

        let targets = scene_targets(initial)
            .into_iter()
            .map(|(kind, vertices)| {
                create_target(&device, &transform_layout, kind, &vertices, settings.scale)
            })
            .collect();

        Ok(Self {
            surface,
            device,
            queue,
            config,
            flat_pipeline,
            textured_pipeline,
            texture_bind_group,
            _water: water_texture,
            targets,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        let max_dimension = self.device.limits().max_texture_dimension_2d;
        if let Some((width, height)) = clamp_surface_size(new_width, new_height, max_dimension) {
            self.size = (width, height);
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Overwrite every target's vertices with this frame's geometry
    pub fn update(&mut self, frame: &FrameState) {
        for (target, (kind, vertices)) in self.targets.iter_mut().zip(scene_targets(frame)) {
            debug_assert_eq!(target.kind, kind);
            self.queue
                .write_buffer(&target.vertex_buffer, 0, vertices.as_bytes());
            target.vertex_count = vertices.len() as u32;
        }
    }

    /// Clear and draw all targets in order
    pub fn render(&mut self) -> std::result::Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(colors::CLEAR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            for target in &self.targets {
                match target.kind.shading() {
                    Shading::Flat => render_pass.set_pipeline(&self.flat_pipeline),
                    Shading::Textured => {
                        render_pass.set_pipeline(&self.textured_pipeline);
                        render_pass.set_bind_group(1, &self.texture_bind_group, &[]);
                    }
                }
                render_pass.set_bind_group(0, &target.scale_bind_group, &[]);
                render_pass.set_vertex_buffer(0, target.vertex_buffer.slice(..));
                render_pass.draw(0..target.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_strip_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'static>,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleStrip,
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
}

fn create_target(
    device: &wgpu::Device,
    transform_layout: &wgpu::BindGroupLayout,
    kind: TargetKind,
    vertices: &TargetVertices,
    scale: f32,
) -> DrawTarget {
    let label = kind.label();
    // Sizes are fixed per target, so the buffer is created once and
    // overwritten in place every frame.
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: vertices.as_bytes(),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let scale_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(&TransformUniform {
            scale,
            _pad: [0.0; 3],
        }),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });
    let scale_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: transform_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: scale_buffer.as_entire_binding(),
        }],
    });

    DrawTarget {
        kind,
        vertex_buffer,
        vertex_count: vertices.len() as u32,
        _scale_buffer: scale_buffer,
        scale_bind_group,
    }
}
