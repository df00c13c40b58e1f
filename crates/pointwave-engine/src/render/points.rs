use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::effect::ColorShiftMaterial;
use crate::geometry::{GridVertex, PlaneGeometry};
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    alpha_blend, uniform_binding_size, QuadVertex, DEPTH_FORMAT, QUAD_INDICES, QUAD_VERTICES,
};

/// One point cloud to draw this frame.
pub struct PointCloudDraw<'a> {
    pub geometry: &'a PlaneGeometry,
    pub material: &'a ColorShiftMaterial,
    /// Node local to world.
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

/// Renderer for a point grid shaded by [`ColorShiftMaterial`].
///
/// Each grid vertex becomes one instance of a screen-aligned quad, sized in
/// framebuffer pixels by the vertex stage. GPU objects are created on first
/// use and rebuilt when the surface format or drawable size changes. The
/// grid is uploaded once; it never changes after the scene is composed.
#[derive(Default)]
pub struct PointCloudRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    uniform_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    point_vbo: Option<wgpu::Buffer>,
    point_count: u32,

    depth_size: (u32, u32),
    depth_view: Option<wgpu::TextureView>,
}

impl PointCloudRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw: &PointCloudDraw<'_>,
    ) {
        if !ctx.viewport.is_valid() || draw.geometry.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.ensure_points(ctx, draw.geometry);
        self.ensure_depth(ctx);

        self.write_uniforms(ctx, draw);

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };
        let Some(point_vbo) = self.point_vbo.as_ref() else { return };
        let Some(depth_view) = self.depth_view.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("pointwave points pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, point_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.point_count);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("pointwave color shift shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/color_shift.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("pointwave points bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: uniform_binding_size::<PointsUniform>(),
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("pointwave points pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("pointwave points pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), point_instance_layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(alpha_blend()),
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
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("points pipeline created for {:?}", ctx.surface_format);

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.uniform_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.uniform_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let uniform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("pointwave points ubo"),
            size: std::mem::size_of::<PointsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("pointwave points bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_ubo.as_entire_binding(),
            }],
        });

        self.uniform_ubo = Some(uniform_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pointwave quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pointwave quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn ensure_points(&mut self, ctx: &RenderCtx<'_>, geometry: &PlaneGeometry) {
        let count = geometry.len() as u32;
        if self.point_vbo.is_some() && self.point_count == count {
            return;
        }

        self.point_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("pointwave grid vbo"),
            contents: bytemuck::cast_slice(geometry.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.point_count = count;

        let (ws, hs) = geometry.segments();
        log::info!("uploaded {count} grid points ({ws}x{hs} segments)");
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        let size = (ctx.viewport.width as u32, ctx.viewport.height as u32);
        if self.depth_view.is_some() && self.depth_size == size {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("pointwave depth"),
            size: wgpu::Extent3d {
                width: size.0.max(1),
                height: size.1.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        self.depth_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.depth_size = size;
    }

    fn write_uniforms(&mut self, ctx: &RenderCtx<'_>, draw: &PointCloudDraw<'_>) {
        let Some(ubo) = self.uniform_ubo.as_ref() else { return };
        let uniform = PointsUniform::new(
            draw.material,
            draw.view * draw.model,
            draw.projection,
            ctx.viewport,
        );
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&uniform));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

fn point_instance_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x3, // position
        2 => Float32x2  // uv
    ];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<GridVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &ATTRS,
    }
}

/// Uniform block layout (192 bytes), mirrors `Uniforms` in the WGSL:
///
///  offset   0  model_view    mat4x4
///  offset  64  projection    mat4x4
///  offset 128  color_a       vec4
///  offset 144  color_b       vec4
///  offset 160  viewport      vec2
///  offset 168  time          f32
///  offset 172  point_size    f32
///  offset 176  x_wave        f32
///  offset 180  round_points  f32
///  offset 184  _pad          vec2
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointsUniform {
    model_view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    color_a: [f32; 4],
    color_b: [f32; 4],
    viewport: [f32; 2],
    time: f32,
    point_size: f32,
    x_wave: f32,
    round_points: f32,
    _pad: [f32; 2],
}

impl PointsUniform {
    fn new(
        material: &ColorShiftMaterial,
        model_view: Mat4,
        projection: Mat4,
        viewport: Viewport,
    ) -> Self {
        let u = material.uniforms();
        let toggles = material.toggles();
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            color_a: u.color_a.to_rgba(),
            color_b: u.color_b.to_rgba(),
            viewport: [viewport.width.max(1.0), viewport.height.max(1.0)],
            time: u.time,
            point_size: u.point_size,
            x_wave: flag(toggles.x_wave),
            round_points: flag(toggles.round_points),
            _pad: [0.0; 2],
        }
    }
}

#[inline]
fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}
