use crate::constants::{CLEAR_COLOR, STAR_SIZE_MAX_PX, STAR_SIZE_MIN_PX};
use asterism_core::{Camera, StarLayer, Viewport};
use web_sys as web;

mod helpers;
pub mod scene;

use helpers::GrowableBuffer;
pub use scene::SceneGraph;

pub static SKY_WGSL: &str = include_str!("../shaders/sky.wgsl");

/// One billboard: a star (pixel size) or a marker (world size).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

impl SpriteInstance {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32, 2 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SkyUniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4],
    cam_up: [f32; 4],
    eye_px: [f32; 4],
}

/// Star sprites for every catalog layer; brighter stars are larger and more
/// opaque.
pub fn star_instances(layers: &[StarLayer]) -> Vec<SpriteInstance> {
    let mut out = Vec::with_capacity(layers.iter().map(StarLayer::len).sum());
    for layer in layers {
        for i in 0..layer.len() {
            let mag = layer.data[i].mag;
            let size = (STAR_SIZE_MAX_PX - (mag + 1.5) * 0.6).clamp(STAR_SIZE_MIN_PX, STAR_SIZE_MAX_PX);
            let alpha = (1.1 - mag * 0.12).clamp(0.35, 1.0);
            out.push(SpriteInstance {
                position: layer.position(i).to_array(),
                size,
                color: [0.85, 0.9, 1.0, alpha],
            });
        }
    }
    out
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    star_pipeline: wgpu::RenderPipeline,
    marker_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,

    stars: GrowableBuffer,
    markers: GrowableBuffer,
    lines: GrowableBuffer,
    glow_lines: GrowableBuffer,

    // scratch reused every frame
    marker_scratch: Vec<SpriteInstance>,
    line_scratch: Vec<LineVertex>,
    glow_scratch: Vec<LineVertex>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sky_shader"),
            source: wgpu::ShaderSource::Wgsl(SKY_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sky_bgl"),
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
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sky_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("sky_uniforms"),
            size: std::mem::size_of::<SkyUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sky_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let additive = helpers::additive_blend();
        let sprite = [SpriteInstance::layout()];
        let line = [LineVertex::layout()];
        let tri = wgpu::PrimitiveTopology::TriangleList;
        let lines = wgpu::PrimitiveTopology::LineList;
        let star_pipeline = helpers::make_pipeline(
            &device, "star_pipeline", &layout, &shader, "vs_star", "fs_star", &sprite, tri,
            format, additive,
        );
        let marker_pipeline = helpers::make_pipeline(
            &device, "marker_pipeline", &layout, &shader, "vs_marker", "fs_marker", &sprite, tri,
            format, additive,
        );
        let line_pipeline = helpers::make_pipeline(
            &device, "line_pipeline", &layout, &shader, "vs_line", "fs_line", &line, lines,
            format, wgpu::BlendState::ALPHA_BLENDING,
        );
        let glow_pipeline = helpers::make_pipeline(
            &device, "glow_pipeline", &layout, &shader, "vs_line", "fs_line", &line, lines,
            format, additive,
        );

        let vertex = wgpu::BufferUsages::VERTEX;
        let stars = GrowableBuffer::new(&device, "star_instances", vertex);
        let markers = GrowableBuffer::new(&device, "marker_instances", vertex);
        let line_buf = GrowableBuffer::new(&device, "line_vertices", vertex);
        let glow_lines = GrowableBuffer::new(&device, "glow_vertices", vertex);

        log::info!("[gpu] surface {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            uniform_buffer,
            bind_group,
            star_pipeline,
            marker_pipeline,
            line_pipeline,
            glow_pipeline,
            stars,
            markers,
            lines: line_buf,
            glow_lines,
            marker_scratch: Vec::new(),
            line_scratch: Vec::new(),
            glow_scratch: Vec::new(),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Upload the static star field.
    pub fn set_stars(&mut self, stars: &[SpriteInstance]) {
        self.stars.write(&self.device, &self.queue, stars);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Draw one frame. `viewport` is the canvas size in CSS pixels, the
    /// space star pixel sizes are given in.
    pub fn render(
        &mut self,
        camera: &Camera,
        viewport: Viewport,
        scene: &SceneGraph,
    ) -> Result<(), wgpu::SurfaceError> {
        let (right, up) = camera.basis();
        let eye = camera.world_position();
        let world_per_px = 2.0 * (camera.fovy_radians * 0.5).tan() / viewport.height.max(1.0);
        let uniforms = SkyUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            cam_right: right.extend(0.0).to_array(),
            cam_up: up.extend(0.0).to_array(),
            eye_px: eye.extend(world_per_px).to_array(),
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        scene.marker_instances(&mut self.marker_scratch);
        scene.line_vertices(&mut self.line_scratch, &mut self.glow_scratch);
        self.markers
            .write(&self.device, &self.queue, &self.marker_scratch);
        self.lines.write(&self.device, &self.queue, &self.line_scratch);
        self.glow_lines
            .write(&self.device, &self.queue, &self.glow_scratch);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sky_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.bind_group, &[]);

            // back to front: stars, authoring lines, markers, glow
            if !self.stars.is_empty() {
                rpass.set_pipeline(&self.star_pipeline);
                rpass.set_vertex_buffer(0, self.stars.buffer().slice(..));
                rpass.draw(0..6, 0..self.stars.len());
            }
            if !self.lines.is_empty() {
                rpass.set_pipeline(&self.line_pipeline);
                rpass.set_vertex_buffer(0, self.lines.buffer().slice(..));
                rpass.draw(0..self.lines.len(), 0..1);
            }
            if !self.markers.is_empty() {
                rpass.set_pipeline(&self.marker_pipeline);
                rpass.set_vertex_buffer(0, self.markers.buffer().slice(..));
                rpass.draw(0..6, 0..self.markers.len());
            }
            if !self.glow_lines.is_empty() {
                rpass.set_pipeline(&self.glow_pipeline);
                rpass.set_vertex_buffer(0, self.glow_lines.buffer().slice(..));
                rpass.draw(0..self.glow_lines.len(), 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
