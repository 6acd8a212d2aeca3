//! Renderer and page-wiring tuning constants.
//!
//! Values that shape the image (bloom, exposure pre-scale) live here so the
//! render code reads as plumbing only.

// Offscreen formats
pub const HDR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const GBUFFER_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// Scene lighting
pub const RADIANCE_SCALE: f32 = 1.0;

// Bloom
pub const BLOOM_THRESHOLD: f32 = 0.8;
pub const BLOOM_STRENGTH: f32 = 0.35;

// Uniform slots are bound with dynamic offsets; WebGPU requires 256-byte alignment
pub const UNIFORM_SLOT_STRIDE: u64 = 256;
// Enough for scene-independent post passes plus the bloom chain
pub const MAX_POST_SLOTS: u64 = 16;

// Background, transparent so the page shows through
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

// Overlay state classes
pub const LOADER_ERROR_CLASS: &str = "error";
