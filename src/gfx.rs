use std::path::Path;
use std::sync::Arc;

use crate::error::{RenderError, TextureError};
use crate::mesh::{Vertex, unit_cube};
use crate::render::{CubeRenderer, TextureId};
use crate::texture::decode_rgba;
use anyhow::Context;
use glam::Mat4;
use log::{error, info, warn};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

const MAT4_SIZE: u64 = std::mem::size_of::<[[f32; 4]; 4]>() as u64;
// Startgröße des Transform-Puffers (Anzahl Draws), wächst bei Bedarf
const INITIAL_DRAWS: usize = 64;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Tiefenpuffer in Fenstergröße; nach jedem Resize neu.
fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth buffer"),
        size: wgpu::Extent3d {
            // minimiert: 0x0 ist keine gültige Texturgröße
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Ein Uniform-Puffer für alle Transforms eines Frames, pro Draw ein dynamischer Offset.
struct Transforms {
    buf: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    stride: u64,
    capacity: usize,
}

impl Transforms {
    fn create(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        capacity: usize,
    ) -> Self {
        let buf = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("transform buffer"),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("transform bg"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buf,
                    offset: 0,
                    size: wgpu::BufferSize::new(MAT4_SIZE),
                }),
            }],
        });

        Self {
            buf,
            bind_group,
            stride,
            capacity,
        }
    }
}

pub struct Gfx {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    pipeline: wgpu::RenderPipeline,

    vertex_buf: wgpu::Buffer,
    index_buf: wgpu::Buffer,
    index_count: u32,

    transform_bgl: wgpu::BindGroupLayout,
    transforms: Transforms,

    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    textures: Vec<wgpu::BindGroup>,

    depth_view: wgpu::TextureView,

    // Draws des laufenden Frames, abgearbeitet in present()
    pending: Vec<(Mat4, TextureId)>,
}

impl Gfx {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        // Arc<Window> ist ok, Surface bekommt 'static
        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("request adapter")?;

        info!("adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("request device")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .context("surface has no supported format")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Fifo = vsync, immer verfügbar
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        // ----- Mesh -----
        let (verts, inds) = unit_cube();

        let vertex_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube vertex buffer"),
            contents: bytemuck::cast_slice(&verts),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cube index buffer"),
            contents: bytemuck::cast_slice(&inds),
            usage: wgpu::BufferUsages::INDEX,
        });

        let index_count = inds.len() as u32;

        // ----- Transform uniform (group 0) -----
        let transform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("transform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(MAT4_SIZE),
                },
                count: None,
            }],
        });

        let align = u64::from(device.limits().min_uniform_buffer_offset_alignment).max(1);
        let stride = MAT4_SIZE.div_ceil(align) * align;
        let transforms = Transforms::create(&device, &transform_bgl, stride, INITIAL_DRAWS);

        // ----- Textur + Sampler (group 1, Einheit 0) -----
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture bgl"),
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

        // Pixel-Look
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("block sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        // ----- Pipeline -----
        let depth_view = create_depth_view(&device, config.width, config.height);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline layout"),
            bind_group_layouts: &[&transform_bgl, &texture_bgl],
            immediate_size: 0,
        });

        let shader = compile_program(&device, "cube shader", include_str!("shaders/cube.wgsl"));

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("cube pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::layout()],
                compilation_options: Default::default(),
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },

            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),

            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let mut gfx = Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buf,
            index_buf,
            index_count,
            transform_bgl,
            transforms,
            texture_bgl,
            sampler,
            textures: Vec::new(),
            depth_view,
            pending: Vec::new(),
        };

        // Einheit 0 ist nie leer; das bleibt, falls die echte Textur nicht lädt
        let placeholder = gfx.upload_rgba(1, 1, &[255, 255, 255, 255], "placeholder texture");
        debug_assert_eq!(placeholder, TextureId::PLACEHOLDER);

        Ok(gfx)
    }

    pub fn load_texture(&mut self, path: &Path) -> Result<TextureId, TextureError> {
        let rgba = decode_rgba(path)?;
        let (width, height) = rgba.dimensions();

        let label = path.display().to_string();
        let id = self.upload_rgba(width, height, &rgba, &label);
        info!("loaded texture {} ({}x{})", label, width, height);
        Ok(id)
    }

    fn upload_rgba(&mut self, width: u32, height: u32, data: &[u8], label: &str) -> TextureId {
        let texture = self.device.create_texture_with_data(
            &self.queue,
            &wgpu::TextureDescriptor {
                label: Some(label),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8UnormSrgb,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            data,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });

        self.textures.push(bind_group);
        TextureId(self.textures.len() - 1)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.depth_view = create_depth_view(&self.device, new_size.width, new_size.height);
    }

    fn ensure_capacity(&mut self, draws: usize) {
        if draws <= self.transforms.capacity {
            return;
        }
        let capacity = draws.next_power_of_two();
        let stride = self.transforms.stride;
        self.transforms = Transforms::create(&self.device, &self.transform_bgl, stride, capacity);
    }

    fn render_pending(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.ensure_capacity(self.pending.len());

        let stride = self.transforms.stride as usize;
        let mut bytes = vec![0u8; stride * self.pending.len()];
        for (i, (transform, _)) in self.pending.iter().enumerate() {
            let cols = transform.to_cols_array();
            bytes[i * stride..i * stride + MAT4_SIZE as usize]
                .copy_from_slice(bytemuck::cast_slice(&cols));
        }
        if !bytes.is_empty() {
            self.queue.write_buffer(&self.transforms.buf, 0, &bytes);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.3,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            rp.set_pipeline(&self.pipeline);
            rp.set_vertex_buffer(0, self.vertex_buf.slice(..));
            rp.set_index_buffer(self.index_buf.slice(..), wgpu::IndexFormat::Uint16);

            for (i, (_, texture)) in self.pending.iter().enumerate() {
                // unbekannte Handles landen auf Einheit 0
                let Some(tex_bg) = self
                    .textures
                    .get(texture.0)
                    .or_else(|| self.textures.get(TextureId::PLACEHOLDER.0))
                else {
                    continue;
                };
                let offset = (i * stride) as wgpu::DynamicOffset;

                rp.set_bind_group(0, &self.transforms.bind_group, &[offset]);
                rp.set_bind_group(1, tex_bg, &[]);
                rp.draw_indexed(0..self.index_count, 0, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl CubeRenderer for Gfx {
    fn draw_unit_cube(&mut self, transform: Mat4, texture: TextureId) {
        self.pending.push((transform, texture));
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let result = self.render_pending();
        self.pending.clear();

        match result {
            Ok(()) => Ok(()),
            // Fenster verändert/verdeckt: neu konfigurieren, Frame auslassen
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                Ok(())
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("surface timeout, skipping frame");
                Ok(())
            }
            Err(e) => Err(RenderError::Surface(e)),
        }
    }
}

/// WGSL übersetzen. Fehler werden nur geloggt, das Modul wird trotzdem zurückgegeben.
fn compile_program(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    if let Some(err) = pollster::block_on(scope.pop()) {
        error!("{}: {}", label, err);
    }

    module
}
