use super::helpers::{make_post_pipeline, texture_sampler_entries};
use super::PostUniforms;
use crate::constants::{HDR_FORMAT, MAX_POST_SLOTS, UNIFORM_SLOT_STRIDE};
use std::num::NonZeroU64;
use wgpu;

pub(crate) struct PostResources {
    pub(crate) bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform slot
    pub(crate) bgl1: wgpu::BindGroupLayout, // aux tex+sampler
    pub(crate) uniform_buffer: wgpu::Buffer,
    pub(crate) ssao: wgpu::RenderPipeline,
    pub(crate) ssr: wgpu::RenderPipeline,
    pub(crate) progressive: wgpu::RenderPipeline,
    pub(crate) tonemap: wgpu::RenderPipeline,
    pub(crate) gamma: wgpu::RenderPipeline,
    pub(crate) bright: wgpu::RenderPipeline,
    pub(crate) blur: wgpu::RenderPipeline,
    pub(crate) bloom_add: wgpu::RenderPipeline,
    pub(crate) present: wgpu::RenderPipeline,
}

pub(crate) fn create_post_resources(
    device: &wgpu::Device,
    post_shader: &wgpu::ShaderModule,
    swap_format: wgpu::TextureFormat,
) -> PostResources {
    let [tex0, samp0] = texture_sampler_entries(0);
    let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl0"),
        entries: &[
            tex0,
            samp0,
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<PostUniforms>() as u64),
                },
                count: None,
            },
        ],
    });
    let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("post_bgl1"),
        entries: &texture_sampler_entries(0),
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("post_uniforms"),
        size: UNIFORM_SLOT_STRIDE * MAX_POST_SLOTS,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pl_post"),
        bind_group_layouts: &[&bgl0, &bgl1],
        push_constant_ranges: &[],
    });
    let chain = |entry: &str| make_post_pipeline(device, &layout, post_shader, entry, HDR_FORMAT, None);

    PostResources {
        ssao: chain("fs_ssao"),
        ssr: chain("fs_ssr"),
        progressive: chain("fs_progressive"),
        tonemap: chain("fs_tonemap"),
        gamma: chain("fs_gamma"),
        bright: chain("fs_bright"),
        blur: chain("fs_blur"),
        bloom_add: chain("fs_bloom_add"),
        present: make_post_pipeline(
            device,
            &layout,
            post_shader,
            "fs_present",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        ),
        bgl0,
        bgl1,
        uniform_buffer,
    }
}

/// Group 0: a pass's primary input plus its uniform slot.
pub(crate) fn source_group(
    device: &wgpu::Device,
    post: &PostResources,
    label: &str,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &post.bgl0,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &post.uniform_buffer,
                    offset: 0,
                    size: NonZeroU64::new(std::mem::size_of::<PostUniforms>() as u64),
                }),
            },
        ],
    })
}

/// Group 1: the secondary input (g-buffer, history or bloom).
pub(crate) fn aux_group(
    device: &wgpu::Device,
    post: &PostResources,
    label: &str,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &post.bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    slot: u32,
    bg1: &wgpu::BindGroup,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[slot * UNIFORM_SLOT_STRIDE as u32]);
    r.set_bind_group(1, bg1, &[]);
    r.draw(0..3, 0..1);
}
