use std::collections::HashMap;

use anyhow::{ensure, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Vec2;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{grid_mesh, premul_alpha_blend, ubo_min_binding_size, CameraUniform, GridVertex};

/// Subdivisions per card edge. The warp is evaluated per vertex.
const GRID_SEGMENTS: u16 = 32;

/// Orthographic camera over world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardCamera {
    /// World point shown at the viewport center.
    pub position: Vec2,
    /// Screen px per world px.
    pub zoom: f32,
}

impl Default for CardCamera {
    fn default() -> Self {
        Self { position: Vec2::zero(), zoom: 1.0 }
    }
}

/// One card to draw this frame.
///
/// `pointer`/`prev_pointer` are card-local uv (`[0, 1]²`, +V up).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardDraw {
    pub card_key: u64,
    pub center: Vec2,
    pub size: Vec2,
    pub pointer: Vec2,
    pub prev_pointer: Vec2,
    pub intensity: f32,
    pub pull: f32,
    pub radius: f32,
    pub strength: f32,
    pub edge_mix: f32,
    pub alpha: f32,
    /// Draw order; higher values are drawn later (on top).
    pub depth: f32,
}

/// Textured, pointer-warped card renderer.
///
/// Textures are registered once per image (`ensure_texture`), then any number
/// of cards can reference them. Every `create_card` must be paired with a
/// `destroy_card`; creating an existing key replaces it.
#[derive(Default)]
pub struct CardRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    camera_bgl: Option<wgpu::BindGroupLayout>,
    card_bgl: Option<wgpu::BindGroupLayout>,
    sampler: Option<wgpu::Sampler>,

    camera_ubo: Option<wgpu::Buffer>,
    camera_bind_group: Option<wgpu::BindGroup>,

    grid_vbo: Option<wgpu::Buffer>,
    grid_ibo: Option<wgpu::Buffer>,
    grid_index_count: u32,

    textures: HashMap<u32, CardTexture>,
    cards: HashMap<u64, CardSlot>,
}

struct CardTexture {
    // Kept alive for `view`.
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

struct CardSlot {
    ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl CardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_texture(&self, key: u32) -> bool {
        self.textures.contains_key(&key)
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Uploads tightly packed sRGB RGBA8 pixels under `key`. No-op if `key` is present.
    pub fn ensure_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        key: u32,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<()> {
        if self.textures.contains_key(&key) {
            return Ok(());
        }
        ensure!(width > 0 && height > 0, "texture {key} has zero size");
        ensure!(
            width <= ctx.max_texture_dimension && height <= ctx.max_texture_dimension,
            "texture {key} is {width}x{height}, device limit is {}",
            ctx.max_texture_dimension
        );
        ensure!(
            rgba.len() as u64 == width as u64 * height as u64 * 4,
            "texture {key}: expected {} bytes, got {}",
            width as u64 * height as u64 * 4,
            rgba.len()
        );

        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };
        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("vitrine card texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        self.textures.insert(key, CardTexture { _texture: texture, view });
        log::debug!("card texture {key} uploaded ({width}x{height})");
        Ok(())
    }

    /// Allocates per-card GPU state bound to texture `texture_key`.
    ///
    /// Returns `false` (and creates nothing) if the texture is not registered.
    pub fn create_card(&mut self, ctx: &RenderCtx<'_>, card_key: u64, texture_key: u32) -> bool {
        self.ensure_layouts(ctx);

        let Some(texture) = self.textures.get(&texture_key) else {
            log::debug!("card {card_key:#x}: texture {texture_key} not registered");
            return false;
        };
        let Some(bgl) = self.card_bgl.as_ref() else { return false };
        let Some(sampler) = self.sampler.as_ref() else { return false };

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine card ubo"),
            size: std::mem::size_of::<CardUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine card bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.cards.insert(card_key, CardSlot { ubo, bind_group });
        true
    }

    /// Releases per-card GPU state. Unknown keys are ignored.
    pub fn destroy_card(&mut self, card_key: u64) {
        if let Some(slot) = self.cards.remove(&card_key) {
            slot.ubo.destroy();
        }
    }

    /// Draws `draws` in ascending `depth` order. Draws without a live card are skipped.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: CardCamera,
        draws: &[CardDraw],
    ) {
        self.ensure_layouts(ctx);
        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_camera_binding(ctx);

        let order = draw_order(draws);
        if order.is_empty() {
            return;
        }

        self.write_camera_uniform(ctx, camera);
        for &i in &order {
            let draw = &draws[i];
            if let Some(slot) = self.cards.get(&draw.card_key) {
                ctx.queue.write_buffer(&slot.ubo, 0, bytemuck::bytes_of(&CardUniform::from(draw)));
            }
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(camera_bg) = self.camera_bind_group.as_ref() else { return };
        let Some(grid_vbo) = self.grid_vbo.as_ref() else { return };
        let Some(grid_ibo) = self.grid_ibo.as_ref() else { return };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vitrine card pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, camera_bg, &[]);
        rpass.set_vertex_buffer(0, grid_vbo.slice(..));
        rpass.set_index_buffer(grid_ibo.slice(..), wgpu::IndexFormat::Uint16);

        for i in order {
            let Some(slot) = self.cards.get(&draws[i].card_key) else { continue };
            rpass.set_bind_group(1, &slot.bind_group, &[]);
            rpass.draw_indexed(0..self.grid_index_count, 0, 0..1);
        }
    }

    fn ensure_layouts(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bgl.is_some() && self.card_bgl.is_some() && self.sampler.is_some() {
            return;
        }

        let camera_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vitrine camera bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: ubo_min_binding_size::<CameraUniform>(),
                },
                count: None,
            }],
        });

        let card_bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vitrine card bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: ubo_min_binding_size::<CardUniform>(),
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

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("vitrine card sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        self.camera_bgl = Some(camera_bgl);
        self.card_bgl = Some(card_bgl);
        self.sampler = Some(sampler);

        // Anything built against the old layouts is stale.
        self.pipeline = None;
        self.pipeline_format = None;
        self.camera_ubo = None;
        self.camera_bind_group = None;
        self.cards.clear();
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }
        let (Some(camera_bgl), Some(card_bgl)) = (self.camera_bgl.as_ref(), self.card_bgl.as_ref())
        else {
            return;
        };

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vitrine card shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/card.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vitrine card pipeline layout"),
            bind_group_layouts: &[camera_bgl, card_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vitrine card pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GridVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
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
        });

        log::debug!("card pipeline built for {:?}", ctx.surface_format);
        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_camera_binding(&mut self, ctx: &RenderCtx<'_>) {
        if self.camera_bind_group.is_some() && self.camera_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.camera_bgl.as_ref() else { return };

        let camera_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vitrine camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vitrine camera bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_ubo.as_entire_binding(),
            }],
        });

        self.camera_ubo = Some(camera_ubo);
        self.camera_bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.grid_vbo.is_some() && self.grid_ibo.is_some() {
            return;
        }

        let (vertices, indices) = grid_mesh(GRID_SEGMENTS);

        self.grid_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vitrine card grid vbo"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        self.grid_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vitrine card grid ibo"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
        self.grid_index_count = indices.len() as u32;
    }

    fn write_camera_uniform(&self, ctx: &RenderCtx<'_>, camera: CardCamera) {
        let Some(ubo) = self.camera_ubo.as_ref() else { return };
        let u = CameraUniform {
            position: [camera.position.x, camera.position.y],
            viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
            zoom: camera.zoom,
            _pad: [0.0; 3],
        };
        ctx.queue.write_buffer(ubo, 0, bytemuck::bytes_of(&u));
    }
}

/// Indices of `draws` sorted by ascending depth; ties keep submission order.
fn draw_order(draws: &[CardDraw]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..draws.len()).filter(|&i| draws[i].alpha > 0.0).collect();
    order.sort_by(|&a, &b| draws[a].depth.total_cmp(&draws[b].depth));
    order
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CardUniform {
    center: [f32; 2],
    size: [f32; 2],
    pointer: [f32; 2],
    prev_pointer: [f32; 2],
    intensity: f32,
    pull: f32,
    radius: f32,
    strength: f32,
    edge_mix: f32,
    alpha: f32,
    depth: f32,
    _pad: f32,
}

impl From<&CardDraw> for CardUniform {
    fn from(d: &CardDraw) -> Self {
        Self {
            center: [d.center.x, d.center.y],
            size: [d.size.x, d.size.y],
            pointer: [d.pointer.x, d.pointer.y],
            prev_pointer: [d.prev_pointer.x, d.prev_pointer.y],
            intensity: d.intensity,
            pull: d.pull,
            radius: d.radius,
            strength: d.strength,
            edge_mix: d.edge_mix,
            alpha: d.alpha.clamp(0.0, 1.0),
            depth: d.depth,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(key: u64, depth: f32, alpha: f32) -> CardDraw {
        CardDraw {
            card_key: key,
            center: Vec2::zero(),
            size: Vec2::new(100.0, 50.0),
            pointer: Vec2::new(0.5, 0.5),
            prev_pointer: Vec2::new(0.5, 0.5),
            intensity: 0.0,
            pull: 0.0,
            radius: 0.3,
            strength: 1.0,
            edge_mix: 0.5,
            alpha,
            depth,
        }
    }

    #[test]
    fn card_uniform_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<CardUniform>(), 64);
    }

    #[test]
    fn selected_card_is_drawn_last() {
        let draws = [draw(1, 0.0, 1.0), draw(2, 1.0, 1.0), draw(3, 0.0, 1.0)];
        assert_eq!(draw_order(&draws), vec![0, 2, 1]);
    }

    #[test]
    fn invisible_cards_are_skipped() {
        let draws = [draw(1, 0.0, 0.0), draw(2, 0.0, 0.4)];
        assert_eq!(draw_order(&draws), vec![1]);
    }

    #[test]
    fn uniform_clamps_alpha() {
        let u = CardUniform::from(&draw(1, 0.0, 1.7));
        assert_eq!(u.alpha, 1.0);
        assert_eq!(u.size, [100.0, 50.0]);
    }
}
