use super::helpers::{self, Target};
use crate::constants::{DEPTH_FORMAT, GBUFFER_FORMAT, HDR_FORMAT};
use wgpu;

/// Offscreen targets for the pass graph.
///
/// - `hdr` receives scene colour; alpha 0 marks background pixels.
/// - `gbuffer` holds view-space normal in xyz and linear depth in w.
/// - `chain_a`/`chain_b` ping-pong between post passes.
/// - `history` is the progressive accumulation buffer.
/// - `bloom_*` are half-resolution buffers for bright pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr: Target,
    pub(crate) gbuffer: Target,
    pub(crate) depth: Target,
    pub(crate) chain_a: Target,
    pub(crate) chain_b: Target,
    pub(crate) history: Target,
    pub(crate) bloom_a: Target,
    pub(crate) bloom_b: Target,
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let sampled = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let chain = sampled | wgpu::TextureUsages::COPY_SRC;
        let history = sampled | wgpu::TextureUsages::COPY_DST;
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        Self {
            hdr: helpers::create_color_texture(device, "hdr", width, height, HDR_FORMAT, sampled),
            gbuffer: helpers::create_color_texture(
                device,
                "gbuffer",
                width,
                height,
                GBUFFER_FORMAT,
                sampled,
            ),
            depth: helpers::create_color_texture(
                device,
                "depth",
                width,
                height,
                DEPTH_FORMAT,
                wgpu::TextureUsages::RENDER_ATTACHMENT,
            ),
            chain_a: helpers::create_color_texture(device, "chain_a", width, height, HDR_FORMAT, chain),
            chain_b: helpers::create_color_texture(device, "chain_b", width, height, HDR_FORMAT, chain),
            history: helpers::create_color_texture(device, "history", width, height, HDR_FORMAT, history),
            bloom_a: helpers::create_color_texture(device, "bloom_a", bw, bh, HDR_FORMAT, sampled),
            bloom_b: helpers::create_color_texture(device, "bloom_b", bw, bh, HDR_FORMAT, sampled),
        }
    }

    pub(crate) fn recreate(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        *self = Self::new(device, width, height);
    }
}
