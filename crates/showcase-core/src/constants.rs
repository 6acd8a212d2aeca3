use glam::Vec3;

// Shared tuning constants for the showcase. Keyframe values are tuned against
// the bundled product asset and are absolute world-space coordinates.

// Asset
pub const ASSET_PATH: &str = "./assets/armfinal.glb";

// Pipeline extensions
pub const PROGRESSIVE_SAMPLES: u32 = 32;
pub const TONEMAP_ADAPTIVE: bool = true;
pub const TONEMAP_EXPOSURE: f32 = 1.0;

// Camera defaults (desktop, used when the asset carries no camera)
pub const DESKTOP_CAMERA_POSITION: Vec3 = Vec3::new(2.6, 0.9, 4.4);
pub const DESKTOP_CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.01;
pub const CAMERA_ZFAR: f32 = 100.0;

// Camera framing forced on phones and tablets, regardless of asset content
pub const MOBILE_CAMERA_POSITION: Vec3 = Vec3::new(-3.5, -1.1, 5.5);
pub const MOBILE_CAMERA_TARGET: Vec3 = Vec3::new(-0.8, 1.55, -0.7);
pub const MOBILE_FOV_DEGREES: f32 = 0.0; // orthographic framing

// Scroll keyframes
pub const SECOND_TRIGGER: &str = ".second";
pub const THIRD_TRIGGER: &str = ".third";
pub const SECOND_POSITION: Vec3 = Vec3::new(-0.58, -0.62, 0.29);
pub const SECOND_TARGET: Vec3 = Vec3::new(-0.08, -0.53, 0.011);
pub const THIRD_POSITION: Vec3 = Vec3::new(0.78, -0.75, 0.29);
pub const THIRD_TARGET: Vec3 = Vec3::new(-0.010, -0.808, 0.165);
pub const SEGMENT_START: &str = "top bottom";
pub const SEGMENT_END: &str = "top top";

// Field-of-view adjustment fired at the edges of every position scrub
pub const SCRUB_FOV_DEGREES: f32 = 20.0;
pub const FOV_TWEEN_SEC: f32 = 1.2;

// Pointer parallax
pub const PARALLAX_X_GAIN: f32 = 0.02;
pub const PARALLAX_Y_GAIN: f32 = 0.01;
pub const PARALLAX_Z_GAIN: f32 = 0.01;
pub const PARALLAX_POSITION_SEC: f32 = 2.2;
pub const PARALLAX_SCALE_SEC: f32 = 1.2;
pub const PARALLAX_HOVER_SCALE: f32 = 1.01;

// Loader overlay exit
pub const LOADER_EXIT_SEC: f32 = 0.8;
pub const LOADER_EXIT_DELAY_SEC: f32 = 1.0;

// Smooth scroll
pub const SCROLL_DURATION_SEC: f32 = 1.2;
pub const SCROLL_MOUSE_MULTIPLIER: f32 = 1.0;
pub const SCROLL_TOUCH_MULTIPLIER: f32 = 2.0;
pub const SCROLL_LINE_HEIGHT_PX: f32 = 100.0 / 6.0;
