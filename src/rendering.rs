//! Rendering system with wgpu pipeline and shader management.

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::params::RecordingConfig;
use crate::scene::{RenderState, MAX_LIGHTS};
use crate::terrain::{TerrainMesh, Vertex};
use crate::texture::Texture;

/// GPU-side material, padded to the shader's uniform layout
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub diffuse: [f32; 3],
    pub _pad0: f32,
    pub specular: [f32; 3],
    pub _pad1: f32,
    pub ambient: [f32; 3],
    pub shininess: f32,
}

/// GPU-side light, padded to the shader's uniform layout
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct LightUniform {
    pub ambient: [f32; 3],
    pub _pad0: f32,
    pub emitted: [f32; 3],
    pub _pad1: f32,
    pub position: [f32; 4],
}

/// Per-draw uniform block: transforms, material, eye, and the fixed
/// 8-light array. Layout must match `Uniforms` in shader.wgsl exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub model_inv: [[f32; 4]; 4],
    pub material: MaterialUniform,
    pub eye: [f32; 3],
    pub n_lights: u32,
    pub lights: [LightUniform; MAX_LIGHTS],
}

impl Uniforms {
    /// Pack a render state into the shader's uniform layout
    pub fn from_state(state: &RenderState) -> Self {
        let mut lights = [LightUniform::zeroed(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(state.lights.iter()) {
            *slot = LightUniform {
                ambient: light.ambient.to_array(),
                _pad0: 0.0,
                emitted: light.emitted.to_array(),
                _pad1: 0.0,
                position: light.position.to_array(),
            };
        }

        Self {
            mvp: state.mvp.to_cols_array_2d(),
            model: state.model.to_cols_array_2d(),
            model_inv: state.model_inv.to_cols_array_2d(),
            material: MaterialUniform {
                diffuse: state.material.diffuse.to_array(),
                _pad0: 0.0,
                specular: state.material.specular.to_array(),
                _pad1: 0.0,
                ambient: state.material.ambient.to_array(),
                shininess: state.material.shininess,
            },
            eye: state.eye.to_array(),
            n_lights: state.lights.len().min(MAX_LIGHTS) as u32,
            lights,
        }
    }
}

/// Dynamic-offset stride per draw; uniform offsets must be 256-aligned
const UNIFORM_STRIDE: u64 = 768;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Rendering system managing wgpu device, pipeline, and buffers.
///
/// Owns the GPU copy of the terrain's triangle-strip vertex buffer and
/// issues one strip draw per row band.
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    strips: u32,
    vertices_per_strip: u32,
    draw_capacity: u32,
    recording_config: Option<RecordingConfig>,
}

impl RenderSystem {
    /// Create the rendering system and upload the static mesh and texture.
    ///
    /// `draw_capacity` is the fixed number of objects the scene renders per
    /// frame; the uniform buffer is sized for that many dynamic offsets.
    pub async fn new(
        window: std::sync::Arc<winit::window::Window>,
        mesh: &TerrainMesh,
        texture: &Texture,
        draw_capacity: u32,
        recording_config: Option<RecordingConfig>,
    ) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Window must have 'static lifetime via Arc
        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow!("no suitable GPU adapter found"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("failed to request device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let mut usage = wgpu::TextureUsages::RENDER_ATTACHMENT;

        // COPY_SRC is needed for frame capture when recording
        if recording_config.is_some() {
            usage |= wgpu::TextureUsages::COPY_SRC;
        }

        let config = wgpu::SurfaceConfiguration {
            usage,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_view(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Terrain Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Terrain Vertex Buffer"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: UNIFORM_STRIDE * u64::from(draw_capacity.max(1)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // The checkerboard is part of the render-state contract; it stays
        // bound even though the fragment shader does not sample it.
        let checker = device.create_texture_with_data(
            &queue,
            &wgpu::TextureDescriptor {
                label: Some("Checkerboard Texture"),
                size: wgpu::Extent3d {
                    width: texture.width,
                    height: texture.height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING,
                view_formats: &[],
            },
            wgpu::util::TextureDataOrder::LayerMajor,
            &texture.pixels,
        );
        let checker_view = checker.create_view(&wgpu::TextureViewDescriptor::default());
        let checker_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Checkerboard Sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: true,
                            min_binding_size: wgpu::BufferSize::new(
                                std::mem::size_of::<Uniforms>() as u64,
                            ),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &uniform_buffer,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<Uniforms>() as u64),
                    }),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&checker_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&checker_sampler),
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Terrain Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                            shader_location: 2,
                            format: wgpu::VertexFormat::Float32,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // The strips are viewed from both sides as the terrain spins
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            vertex_buffer,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            strips: mesh.strips(),
            vertices_per_strip: mesh.vertices_per_strip(),
            draw_capacity: draw_capacity.max(1),
            recording_config,
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        depth.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Reconfigure the surface and depth buffer after a resize or a lost
    /// surface
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, &self.config);
    }

    /// Render one frame: one dynamic-offset uniform slot and one set of
    /// strip draws per render state, then capture if recording.
    pub fn render(
        &self,
        draws: &[Uniforms],
        frame_num: usize,
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let draw_count = draws.len().min(self.draw_capacity as usize);
        if draws.len() > draw_count {
            log::warn!(
                "frame has {} draws, capacity is {}; dropping the rest",
                draws.len(),
                self.draw_capacity
            );
        }

        for (i, uniforms) in draws[..draw_count].iter().enumerate() {
            self.queue.write_buffer(
                &self.uniform_buffer,
                i as u64 * UNIFORM_STRIDE,
                bytemuck::cast_slice(&[*uniforms]),
            );
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.2,
                            g: 0.2,
                            b: 0.2,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for i in 0..draw_count {
                let offset = (i as u64 * UNIFORM_STRIDE) as u32;
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[offset]);
                // One triangle-strip draw per row band
                for strip in 0..self.strips {
                    let start = strip * self.vertices_per_strip;
                    render_pass.draw(start..start + self.vertices_per_strip, 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));

        if let Some(ref config) = self.recording_config {
            self.capture_frame(frame_num, config, &output);
        }

        output.present();

        Ok(())
    }

    /// Capture a frame to disk (recording mode only)
    fn capture_frame(
        &self,
        frame_num: usize,
        config: &RecordingConfig,
        texture: &wgpu::SurfaceTexture,
    ) {
        let (width, height) = (self.config.width, self.config.height);
        let bytes_per_pixel = 4; // RGBA8
        let unpadded_bytes_per_row = width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = (unpadded_bytes_per_row + align - 1) / align * align;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Capture Buffer"),
            size: u64::from(padded_bytes_per_row * height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Capture Encoder"),
            });

        encoder.copy_texture_to_buffer(
            wgpu::ImageCopyTexture {
                texture: &texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::ImageCopyBuffer {
                buffer: &buffer,
                layout: wgpu::ImageDataLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );

        self.queue.submit(std::iter::once(encoder.finish()));

        let buffer_slice = buffer.slice(..);
        buffer_slice.map_async(wgpu::MapMode::Read, |_| {});
        self.device.poll(wgpu::Maintain::Wait);

        let data = buffer_slice.get_mapped_range();
        let mut image_data = vec![0u8; (width * height * bytes_per_pixel) as usize];

        // Remove row padding
        for y in 0..height {
            let padded_offset = (y * padded_bytes_per_row) as usize;
            let unpadded_offset = (y * unpadded_bytes_per_row) as usize;
            image_data[unpadded_offset..unpadded_offset + unpadded_bytes_per_row as usize]
                .copy_from_slice(
                    &data[padded_offset..padded_offset + unpadded_bytes_per_row as usize],
                );
        }

        drop(data);
        buffer.unmap();

        let frame_path = format!("{}/frame_{:05}.png", config.frames_dir(), frame_num);
        if let Err(e) = image::save_buffer(
            &frame_path,
            &image_data,
            width,
            height,
            image::ColorType::Rgba8,
        ) {
            log::error!("failed to save frame {}: {}", frame_num, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Light, Material};
    use glam::{Mat4, Vec3, Vec4};
    use std::sync::Arc;

    // The WGSL uniform block uses 16-byte-aligned vec3 fields, so the Rust
    // structs must land on the exact same byte sizes.
    #[test]
    fn test_uniform_layout_sizes() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 48);
        assert_eq!(std::mem::size_of::<LightUniform>(), 48);
        assert_eq!(std::mem::size_of::<Uniforms>(), 3 * 64 + 48 + 16 + 8 * 48);
        assert!(std::mem::size_of::<Uniforms>() as u64 <= UNIFORM_STRIDE);
        assert_eq!(UNIFORM_STRIDE % 256, 0);
    }

    #[test]
    fn test_vertex_layout_matches_attribute_offsets() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);
        assert_eq!(std::mem::size_of::<[f32; 3]>(), 12);
        assert_eq!(std::mem::size_of::<[f32; 6]>(), 24);
    }

    #[test]
    fn test_uniforms_pack_light_count_and_padding() {
        let state = RenderState {
            mvp: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            model_inv: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            material: Material {
                diffuse: Vec3::new(0.5, 0.25, 0.1),
                specular: Vec3::splat(0.2),
                ambient: Vec3::ZERO,
                shininess: 1.0,
            },
            lights: vec![
                Light {
                    ambient: Vec3::splat(0.1),
                    emitted: Vec3::ONE,
                    position: Vec4::new(5.0, 5.0, 4.0, 0.0),
                };
                3
            ],
            texture: Arc::new(crate::texture::Texture::checkerboard(2, 2)),
            eye: Vec3::new(0.0, -1.0, 4.0),
        };

        let uniforms = Uniforms::from_state(&state);
        assert_eq!(uniforms.n_lights, 3);
        assert_eq!(uniforms.lights[0].position, [5.0, 5.0, 4.0, 0.0]);
        // Unused slots stay zeroed
        assert_eq!(uniforms.lights[7].emitted, [0.0, 0.0, 0.0]);
        assert_eq!(uniforms.material.shininess, 1.0);
        assert_eq!(uniforms.eye, [0.0, -1.0, 4.0]);
    }
}
