//! WebGPU renderer executing the viewer's pass graph.

mod helpers;
mod mesh;
mod post;
mod targets;

use crate::constants::{
    BLOOM_STRENGTH, BLOOM_THRESHOLD, CLEAR_COLOR, DEPTH_FORMAT, GBUFFER_FORMAT, HDR_FORMAT,
    MAX_POST_SLOTS, RADIANCE_SCALE, UNIFORM_SLOT_STRIDE,
};
use glam::{Mat4, Vec3};
use mesh::GpuMesh;
use post::PostResources;
use showcase_core::{FrameSnapshot, MeshData, Pass, PassGraph};
use smallvec::SmallVec;
use targets::RenderTargets;
use web_sys as web;
use wgpu;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    eye: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    exposure: f32,
    adaptive: f32,
    clip_background: f32,
    blend: f32,
    threshold: f32,
    bloom_strength: f32,
    _pad: [f32; 2],
}

impl PostUniforms {
    fn at(width: u32, height: u32) -> Self {
        Self {
            resolution: [width as f32, height as f32],
            blur_dir: [0.0, 0.0],
            exposure: 1.0,
            adaptive: 0.0,
            clip_background: 0.0,
            blend: 1.0,
            threshold: BLOOM_THRESHOLD,
            bloom_strength: BLOOM_STRENGTH,
            _pad: [0.0; 2],
        }
    }
}

/// Which ping-pong texture currently holds the chain's output.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Chain {
    Hdr,
    A,
    B,
}

impl Chain {
    fn next(self) -> Chain {
        match self {
            Chain::A => Chain::B,
            Chain::Hdr | Chain::B => Chain::A,
        }
    }
}

/// Bind groups referencing size-dependent targets; rebuilt on resize.
struct PostGroups {
    src_hdr: wgpu::BindGroup,
    src_a: wgpu::BindGroup,
    src_b: wgpu::BindGroup,
    src_bloom_a: wgpu::BindGroup,
    src_bloom_b: wgpu::BindGroup,
    aux_gbuffer: wgpu::BindGroup,
    aux_history: wgpu::BindGroup,
    aux_bloom: wgpu::BindGroup,
}

impl PostGroups {
    fn new(
        device: &wgpu::Device,
        post: &PostResources,
        t: &RenderTargets,
        sampler: &wgpu::Sampler,
    ) -> Self {
        Self {
            src_hdr: post::source_group(device, post, "src_hdr", &t.hdr.view, sampler),
            src_a: post::source_group(device, post, "src_a", &t.chain_a.view, sampler),
            src_b: post::source_group(device, post, "src_b", &t.chain_b.view, sampler),
            src_bloom_a: post::source_group(device, post, "src_bloom_a", &t.bloom_a.view, sampler),
            src_bloom_b: post::source_group(device, post, "src_bloom_b", &t.bloom_b.view, sampler),
            aux_gbuffer: post::aux_group(device, post, "aux_gbuffer", &t.gbuffer.view, sampler),
            aux_history: post::aux_group(device, post, "aux_history", &t.history.view, sampler),
            aux_bloom: post::aux_group(device, post, "aux_bloom", &t.bloom_a.view, sampler),
        }
    }

    fn source(&self, chain: Chain) -> &wgpu::BindGroup {
        match chain {
            Chain::Hdr => &self.src_hdr,
            Chain::A => &self.src_a,
            Chain::B => &self.src_b,
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: PostResources,
    groups: PostGroups,
    mesh: Option<GpuMesh>,
    width: u32,
    height: u32,
    // last progressive sample drawn; converged frames are not redrawn
    last_sample: Option<u32>,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
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
        // gamma is applied in the pass graph, so present into a linear format
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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

        let targets = RenderTargets::new(&device, width, height);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::SCENE_WGSL.into()),
        });
        let scene_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let scene_pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&scene_bgl],
            push_constant_ranges: &[],
        });
        let scene_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&scene_pl),
            vertex: wgpu::VertexState {
                module: &scene_shader,
                entry_point: Some("vs_main"),
                buffers: &[mesh::vertex_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &scene_shader,
                entry_point: Some("fs_main"),
                targets: &[
                    Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    }),
                    Some(wgpu::ColorTargetState {
                        format: GBUFFER_FORMAT,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    }),
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &scene_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(showcase_core::POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, format);
        let groups = PostGroups::new(&device, &post, &targets, &linear_sampler);
        log::info!("[render] WebGPU ready: {:?} {}x{}", format, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_pipeline,
            scene_uniform_buffer,
            scene_bind_group,
            targets,
            linear_sampler,
            post,
            groups,
            mesh: None,
            width,
            height,
            last_sample: None,
        })
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
            self.targets.recreate(&self.device, width, height);
            self.groups =
                PostGroups::new(&self.device, &self.post, &self.targets, &self.linear_sampler);
            self.last_sample = None;
        }
    }

    /// Uploads `mesh` when its revision differs from what is resident.
    pub fn sync_mesh(&mut self, mesh: &MeshData, revision: u64) {
        if self.mesh.as_ref().map(|m| m.revision) != Some(revision) {
            self.mesh = Some(GpuMesh::upload(&self.device, mesh, revision));
            self.last_sample = None;
        }
    }

    /// True once progressive accumulation has converged and the image on
    /// screen is final.
    pub fn is_converged(&self, frame: &FrameSnapshot) -> bool {
        frame.sample_index >= frame.max_samples && self.last_sample == Some(frame.max_samples)
    }

    pub fn render(
        &mut self,
        frame: &FrameSnapshot,
        graph: &PassGraph,
    ) -> Result<(), wgpu::SurfaceError> {
        if self.is_converged(frame) {
            return Ok(());
        }
        let surface_tex = self.surface.get_current_texture()?;
        let swap_view = surface_tex
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.encode_scene(&mut encoder, frame);
        let slots = self.encode_post(&mut encoder, frame, graph, &swap_view);

        let mut staging = vec![0u8; (UNIFORM_SLOT_STRIDE as usize) * slots.len()];
        for (i, u) in slots.iter().enumerate() {
            let at = i * UNIFORM_SLOT_STRIDE as usize;
            staging[at..at + std::mem::size_of::<PostUniforms>()]
                .copy_from_slice(bytemuck::bytes_of(u));
        }
        self.queue
            .write_buffer(&self.post.uniform_buffer, 0, &staging);
        self.queue.submit(Some(encoder.finish()));
        surface_tex.present();
        self.last_sample = Some(frame.sample_index);
        Ok(())
    }

    fn encode_scene(&self, encoder: &mut wgpu::CommandEncoder, frame: &FrameSnapshot) {
        // sub-pixel jitter as a clip-space translation
        let jitter = Mat4::from_translation(Vec3::new(
            2.0 * frame.jitter.x / self.width as f32,
            2.0 * frame.jitter.y / self.height as f32,
            0.0,
        ));
        let u = SceneUniforms {
            view_proj: (jitter * frame.projection * frame.view).to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            model: frame.model.to_cols_array_2d(),
            eye: frame.eye.extend(1.0).to_array(),
            params: [RADIANCE_SCALE, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.scene_uniform_buffer, 0, bytemuck::bytes_of(&u));

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[
                Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                }),
                Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.gbuffer.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                }),
            ],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.targets.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        if let Some(mesh) = &self.mesh {
            rpass.set_pipeline(&self.scene_pipeline);
            rpass.set_bind_group(0, &self.scene_bind_group, &[]);
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }

    fn chain_target(&self, chain: Chain) -> &helpers::Target {
        match chain {
            Chain::A => &self.targets.chain_a,
            Chain::B | Chain::Hdr => &self.targets.chain_b,
        }
    }

    /// Encodes the post passes in graph order, then the present blit. Returns
    /// the uniform slots the encoded passes reference.
    fn encode_post(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame: &FrameSnapshot,
        graph: &PassGraph,
        swap_view: &wgpu::TextureView,
    ) -> SmallVec<[PostUniforms; 16]> {
        let mut slots: SmallVec<[PostUniforms; 16]> = SmallVec::new();
        let mut push = |u: PostUniforms| -> u32 {
            let slot = (slots.len() as u64).min(MAX_POST_SLOTS - 1) as u32;
            if (slots.len() as u64) < MAX_POST_SLOTS {
                slots.push(u);
            }
            slot
        };
        let full = PostUniforms::at(self.width, self.height);
        let half = PostUniforms::at((self.width / 2).max(1), (self.height / 2).max(1));
        let g = &self.groups;
        let p = &self.post;
        let mut src = Chain::Hdr;

        for pass in graph.passes.iter() {
            let dst = src.next();
            let target = &self.chain_target(dst).view;
            match *pass {
                Pass::Scene { .. } => continue,
                Pass::Ssao => {
                    let slot = push(full);
                    post::blit(
                        encoder,
                        "ssao",
                        target,
                        CLEAR_COLOR,
                        &p.ssao,
                        g.source(src),
                        slot,
                        &g.aux_gbuffer,
                    );
                }
                Pass::Ssr => {
                    let slot = push(full);
                    post::blit(
                        encoder,
                        "ssr",
                        target,
                        CLEAR_COLOR,
                        &p.ssr,
                        g.source(src),
                        slot,
                        &g.aux_gbuffer,
                    );
                }
                Pass::Progressive { .. } => {
                    let slot = push(PostUniforms {
                        blend: 1.0 / (frame.sample_index as f32 + 1.0),
                        ..full
                    });
                    post::blit(
                        encoder,
                        "progressive",
                        target,
                        CLEAR_COLOR,
                        &p.progressive,
                        g.source(src),
                        slot,
                        &g.aux_history,
                    );
                    encoder.copy_texture_to_texture(
                        self.chain_target(dst).tex.as_image_copy(),
                        self.targets.history.tex.as_image_copy(),
                        wgpu::Extent3d {
                            width: self.width,
                            height: self.height,
                            depth_or_array_layers: 1,
                        },
                    );
                }
                Pass::Tonemap(cfg) => {
                    let slot = push(PostUniforms {
                        exposure: cfg.exposure,
                        adaptive: if cfg.adaptive { 1.0 } else { 0.0 },
                        clip_background: if cfg.clip_background { 1.0 } else { 0.0 },
                        ..full
                    });
                    post::blit(
                        encoder,
                        "tonemap",
                        target,
                        CLEAR_COLOR,
                        &p.tonemap,
                        g.source(src),
                        slot,
                        &g.aux_gbuffer,
                    );
                }
                Pass::Gamma => {
                    let slot = push(full);
                    post::blit(
                        encoder,
                        "gamma",
                        target,
                        CLEAR_COLOR,
                        &p.gamma,
                        g.source(src),
                        slot,
                        &g.aux_gbuffer,
                    );
                }
                Pass::Bloom => {
                    let black = wgpu::Color::BLACK;
                    let slot = push(full);
                    post::blit(
                        encoder,
                        "bloom_bright",
                        &self.targets.bloom_a.view,
                        black,
                        &p.bright,
                        g.source(src),
                        slot,
                        &g.aux_gbuffer,
                    );
                    let slot = push(PostUniforms {
                        blur_dir: [1.0, 0.0],
                        ..half
                    });
                    post::blit(
                        encoder,
                        "bloom_blur_h",
                        &self.targets.bloom_b.view,
                        black,
                        &p.blur,
                        &g.src_bloom_a,
                        slot,
                        &g.aux_gbuffer,
                    );
                    let slot = push(PostUniforms {
                        blur_dir: [0.0, 1.0],
                        ..half
                    });
                    post::blit(
                        encoder,
                        "bloom_blur_v",
                        &self.targets.bloom_a.view,
                        black,
                        &p.blur,
                        &g.src_bloom_b,
                        slot,
                        &g.aux_gbuffer,
                    );
                    let slot = push(full);
                    post::blit(
                        encoder,
                        "bloom_add",
                        target,
                        CLEAR_COLOR,
                        &p.bloom_add,
                        g.source(src),
                        slot,
                        &g.aux_bloom,
                    );
                }
            }
            src = dst;
        }

        let slot = push(full);
        post::blit(
            encoder,
            "present",
            swap_view,
            CLEAR_COLOR,
            &p.present,
            g.source(src),
            slot,
            &g.aux_gbuffer,
        );
        slots
    }
}
