use crate::choreo::{CameraVector, Segment, SegmentHooks};
use crate::constants::*;
use crate::error::TriggerError;
use crate::pipeline::{Plugin, TonemapConfig};
use crate::smooth_scroll::SmoothScrollOptions;
use glam::Vec3;

/// Page wiring and tuning for one showcase instance.
#[derive(Clone, Debug)]
pub struct ShowcaseConfig {
    pub canvas_id: String,
    pub asset_path: String,
    pub progress_selector: String,
    pub loader_selector: String,
    pub smooth_scroll: SmoothScrollOptions,
    pub progressive_samples: u32,
    pub tonemap_adaptive: bool,
    pub segments: Vec<Segment>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            canvas_id: "webgi-canvas".to_string(),
            asset_path: ASSET_PATH.to_string(),
            progress_selector: ".progress".to_string(),
            loader_selector: ".loader".to_string(),
            smooth_scroll: SmoothScrollOptions::default(),
            progressive_samples: PROGRESSIVE_SAMPLES,
            tonemap_adaptive: TONEMAP_ADAPTIVE,
            // literal anchors and triggers; cannot fail
            segments: default_segments().unwrap_or_default(),
        }
    }
}

impl ShowcaseConfig {
    pub fn with_asset_path(mut self, path: impl Into<String>) -> Self {
        self.asset_path = path.into();
        self
    }

    /// Pipeline extensions in registration order.
    pub fn plugins(&self) -> Vec<Plugin> {
        vec![
            Plugin::AssetManager,
            Plugin::GBuffer,
            Plugin::Progressive {
                max_samples: self.progressive_samples,
            },
            Plugin::Tonemap(TonemapConfig::new(self.tonemap_adaptive)),
            Plugin::GammaCorrection,
            Plugin::Ssr,
            Plugin::Ssao,
            Plugin::Bloom,
        ]
    }

    /// Distinct trigger selectors the page must measure.
    pub fn triggers(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if !out.contains(&seg.trigger.as_str()) {
                out.push(&seg.trigger);
            }
        }
        out
    }
}

/// The showcase's camera path: each section scrubs position and target
/// concurrently from the moment its top enters the viewport until it reaches
/// the viewport top.
pub fn default_segments() -> Result<Vec<Segment>, TriggerError> {
    let position_hooks = SegmentHooks {
        invalidate: true,
        edge_fov: Some(SCRUB_FOV_DEGREES),
    };
    let keyframes: [(&str, CameraVector, Vec3, SegmentHooks); 4] = [
        (SECOND_TRIGGER, CameraVector::Position, SECOND_POSITION, position_hooks),
        (SECOND_TRIGGER, CameraVector::Target, SECOND_TARGET, SegmentHooks::default()),
        (THIRD_TRIGGER, CameraVector::Position, THIRD_POSITION, position_hooks),
        (THIRD_TRIGGER, CameraVector::Target, THIRD_TARGET, SegmentHooks::default()),
    ];
    keyframes
        .into_iter()
        .map(|(trigger, vector, to, hooks)| {
            Segment::new(trigger, SEGMENT_START, SEGMENT_END, vector, to).map(|s| s.with_hooks(hooks))
        })
        .collect()
}
