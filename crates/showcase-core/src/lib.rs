pub mod asset;
pub mod camera;
pub mod choreo;
pub mod config;
pub mod constants;
pub mod device;
pub mod ease;
pub mod error;
pub mod gate;
pub mod loader;
pub mod parallax;
pub mod pipeline;
pub mod showcase;
pub mod smooth_scroll;
pub mod trigger;
pub mod tween;
pub mod viewer;
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use asset::{decode_glb, MeshData, MeshVertex};
pub use camera::{CameraOptions, CameraState};
pub use choreo::{CameraVector, Choreographer, Segment};
pub use config::ShowcaseConfig;
pub use device::DeviceMode;
pub use ease::Ease;
pub use error::*;
pub use gate::FrameGate;
pub use loader::{LoadProgress, LoadState};
pub use parallax::PointerParallax;
pub use pipeline::{Pass, PassGraph, Pipeline, Plugin, PluginKind, TonemapConfig};
pub use showcase::{FrameOutput, Showcase};
pub use smooth_scroll::{
    DeltaMode, InputOutcome, InputSource, ScrollInput, SmoothScroll, SmoothScrollOptions,
};
pub use trigger::{Anchor, ScrollLayout, ScrollRange, TriggerRegion};
pub use tween::{Animatable, Property, TweenSpec, Tweens};
pub use viewer::{FrameSnapshot, Viewer};
