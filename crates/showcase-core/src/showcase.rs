//! Orchestration of the scroll-driven showcase.
//!
//! [`Showcase`] owns the viewer and every per-frame collaborator. The host
//! forwards page events to it and calls [`Showcase::frame`] from its
//! animation-frame loop, then applies the returned [`FrameOutput`] to the page
//! and renders the snapshot.

use crate::asset::MeshData;
use crate::camera::{CameraOptions, CameraState};
use crate::choreo::Choreographer;
use crate::config::ShowcaseConfig;
use crate::constants::{
    DEFAULT_FOV_DEGREES, DESKTOP_CAMERA_POSITION, DESKTOP_CAMERA_TARGET, FOV_TWEEN_SEC,
    LOADER_EXIT_DELAY_SEC, LOADER_EXIT_SEC, MOBILE_CAMERA_POSITION, MOBILE_CAMERA_TARGET,
    MOBILE_FOV_DEGREES,
};
use crate::device::DeviceMode;
use crate::ease::Ease;
use crate::error::{AssetError, ShowcaseError};
use crate::gate::FrameGate;
use crate::loader::LoadProgress;
use crate::parallax::PointerParallax;
use crate::smooth_scroll::{InputOutcome, InputSource, ScrollInput, SmoothScroll};
use crate::trigger::ScrollLayout;
use crate::tween::{Animatable, Phase, Property, TweenSpec, TweenTag, Tweens};
use crate::viewer::{FrameSnapshot, Viewer};
use glam::Vec3;

/// Everything tweens may animate: the viewer plus the loader overlay.
pub struct Stage {
    pub viewer: Viewer,
    pub loader_offset: f32,
}

impl Animatable for Stage {
    fn read(&self, property: Property) -> Vec3 {
        match property {
            Property::LoaderOffset => Vec3::splat(self.loader_offset),
            _ => self.viewer.read(property),
        }
    }

    fn write(&mut self, property: Property, value: Vec3) {
        match property {
            Property::LoaderOffset => self.loader_offset = value.x,
            _ => self.viewer.write(property, value),
        }
    }
}

/// Page-side effects requested by one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameOutput {
    /// Scroll the window to this offset.
    pub scroll_to: Option<f32>,
    /// New loader overlay offset, as a fraction of its width.
    pub loader_offset: Option<f32>,
    /// Loader has left the screen: re-enable page scrolling.
    pub unlock_scroll: bool,
    /// The gated camera refresh ran this frame.
    pub camera_updated: bool,
    pub snapshot: FrameSnapshot,
}

pub struct Showcase {
    config: ShowcaseConfig,
    mode: DeviceMode,
    stage: Stage,
    tweens: Tweens,
    smooth: SmoothScroll,
    choreo: Option<Choreographer>,
    parallax: PointerParallax,
    gate: FrameGate,
    progress: LoadProgress,
    layout: ScrollLayout,
    last_time: Option<f64>,
    pending_scroll: Option<f32>,
    scroll: f32,
    scroll_unlocked: bool,
}

impl Showcase {
    /// Creates the viewer, registers the pipeline extensions in order and
    /// compiles the pipeline. The smooth-scroll adapter starts stopped.
    pub fn initialize(config: ShowcaseConfig, mode: DeviceMode) -> Result<Self, ShowcaseError> {
        let camera = CameraState::new(
            DESKTOP_CAMERA_POSITION,
            DESKTOP_CAMERA_TARGET,
            DEFAULT_FOV_DEGREES,
        );
        let mut viewer = Viewer::new(camera);
        for plugin in config.plugins() {
            viewer.add_plugin(plugin)?;
        }
        let passes = viewer.refresh_pipeline().passes.len();
        log::info!("[showcase] {:?} viewer ready, {} passes", mode, passes);

        let smooth = SmoothScroll::new(config.smooth_scroll.clone());
        Ok(Self {
            config,
            mode,
            stage: Stage {
                viewer,
                loader_offset: 0.0,
            },
            tweens: Tweens::new(),
            smooth,
            choreo: None,
            parallax: PointerParallax::new(),
            gate: FrameGate::new(),
            progress: LoadProgress::new(),
            layout: ScrollLayout::default(),
            last_time: None,
            pending_scroll: None,
            scroll: 0.0,
            scroll_unlocked: false,
        })
    }

    pub fn config(&self) -> &ShowcaseConfig {
        &self.config
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn viewer(&self) -> &Viewer {
        &self.stage.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut Viewer {
        &mut self.stage.viewer
    }

    pub fn camera(&self) -> &CameraState {
        &self.stage.viewer.camera
    }

    pub fn smooth_scroll(&self) -> &SmoothScroll {
        &self.smooth
    }

    pub fn progress(&self) -> &LoadProgress {
        &self.progress
    }

    pub fn choreographer(&self) -> Option<&Choreographer> {
        self.choreo.as_ref()
    }

    pub fn parallax(&self) -> &PointerParallax {
        &self.parallax
    }

    pub fn tweens(&self) -> &Tweens {
        &self.tweens
    }

    pub fn loader_offset(&self) -> f32 {
        self.stage.loader_offset
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    pub fn is_scroll_unlocked(&self) -> bool {
        self.scroll_unlocked
    }

    pub fn is_loaded(&self) -> bool {
        self.stage.viewer.has_asset()
    }

    /// Invalidate camera-derived state; coalesced to one refresh per frame.
    pub fn mark_dirty(&mut self) {
        self.gate.mark_dirty();
        self.stage.viewer.set_dirty();
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.stage.viewer.camera.set_aspect(width / height);
            self.stage.viewer.set_dirty();
        }
    }

    /// Applies freshly measured page geometry (initially and on resize).
    pub fn set_layout(&mut self, layout: ScrollLayout) {
        self.smooth.set_limit(layout.scroll_limit);
        if let Some(choreo) = &mut self.choreo {
            choreo.refresh(&layout);
        }
        self.layout = layout;
    }

    pub fn on_load_progress(&mut self, loaded: u64, total: u64) -> Option<f32> {
        self.progress.on_progress(loaded, total)
    }

    /// Installs the imported asset and everything that depends on the scene
    /// existing: camera defaults, the loader exit, scroll choreography and
    /// pointer parallax. Returns the final progress ratio.
    pub fn on_asset_loaded(&mut self, mesh: MeshData) -> Result<f32, ShowcaseError> {
        let asset_camera = mesh.camera;
        if let Err(e) = self.stage.viewer.add_asset(mesh) {
            self.on_asset_failed(&e);
            return Err(e.into());
        }
        let ratio = self.progress.complete().unwrap_or(1.0);

        self.tweens.to(
            TweenSpec::scalar(Property::LoaderOffset, 1.0, LOADER_EXIT_SEC)
                .ease(Ease::Power4InOut)
                .delay(LOADER_EXIT_DELAY_SEC)
                .tag(TweenTag::LoaderExit),
        );

        if let Some(tonemap) = self.stage.viewer.pipeline_mut().tonemap_mut() {
            tonemap.clip_background = false;
        }

        let camera = &mut self.stage.viewer.camera;
        match self.mode {
            DeviceMode::Mobile => {
                camera.position = MOBILE_CAMERA_POSITION;
                camera.target = MOBILE_CAMERA_TARGET;
                camera.set_options(CameraOptions {
                    controls_enabled: Some(false),
                    fov: Some(MOBILE_FOV_DEGREES),
                });
            }
            DeviceMode::Desktop => {
                if let Some(cam) = asset_camera {
                    camera.position = cam.position;
                    camera.target = cam.target;
                    camera.set_options(CameraOptions {
                        controls_enabled: None,
                        fov: Some(cam.fov),
                    });
                }
                camera.set_options(CameraOptions {
                    controls_enabled: Some(false),
                    fov: None,
                });
            }
        }
        self.mark_dirty();

        self.smooth.scroll_to(0.0, true);
        self.pending_scroll = Some(0.0);
        self.scroll = 0.0;

        let mut choreo = Choreographer::new(self.config.segments.clone(), &self.stage.viewer.camera);
        choreo.refresh(&self.layout);
        self.choreo = Some(choreo);

        log::info!(
            "[showcase] asset ready; camera at {:?} looking at {:?}",
            self.stage.viewer.camera.position,
            self.stage.viewer.camera.target
        );
        Ok(ratio)
    }

    /// The loader stays up; nothing that assumes a scene gets installed.
    pub fn on_asset_failed(&mut self, error: &AssetError) {
        log::error!("[showcase] asset import failed: {}", error);
        self.progress.fail(error.to_string());
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.parallax.on_pointer_move(x, y, width, height);
    }

    pub fn on_pointer_leave(&mut self) {
        if self.is_loaded() {
            self.parallax.on_pointer_leave(&mut self.tweens);
        }
    }

    pub fn on_scroll_input(&mut self, source: InputSource, input: ScrollInput) -> InputOutcome {
        self.smooth.on_input(source, input)
    }

    pub fn on_native_scroll(&mut self, offset: f32) {
        self.smooth.on_native_scroll(offset);
    }

    /// One animation frame. `time_ms` is the host's monotonically increasing
    /// frame timestamp and `page_scroll` the page's current scroll offset.
    pub fn frame(&mut self, time_ms: f64, page_scroll: f32) -> FrameOutput {
        let dt = match self.last_time {
            Some(prev) => ((time_ms - prev) * 0.001).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        let mut scroll_to = None;
        let eased = self.smooth.raf(time_ms);
        if let Some(y) = self.pending_scroll.take() {
            scroll_to = Some(y);
            self.scroll = y;
        } else if let Some(y) = eased {
            scroll_to = Some(y);
            self.scroll = y;
        } else {
            self.scroll = page_scroll;
        }

        self.scrub();

        if self.is_loaded() {
            self.parallax.pre_frame(&mut self.tweens);
        }

        let loader_before = self.stage.loader_offset;
        let scene_before = self.stage.viewer.scene;
        let mut unlock_scroll = false;
        for ev in self.tweens.advance(dt, &mut self.stage) {
            match (ev.tag, ev.phase) {
                (Some(TweenTag::FovAdjust), Phase::Update) => {
                    self.stage.viewer.camera.update_projection_matrix();
                    self.stage.viewer.set_dirty();
                }
                (Some(TweenTag::LoaderExit), Phase::Complete) => {
                    self.smooth.start();
                    self.scroll_unlocked = true;
                    unlock_scroll = true;
                    log::info!("[showcase] loader dismissed; scrolling enabled");
                }
                _ => {}
            }
        }
        if self.stage.viewer.scene != scene_before {
            self.mark_dirty();
        }
        let loader_offset = (self.stage.loader_offset != loader_before).then_some(self.stage.loader_offset);

        let camera = &mut self.stage.viewer.camera;
        let camera_updated = self.gate.consume(|| camera.position_target_updated());

        FrameOutput {
            scroll_to,
            loader_offset,
            unlock_scroll,
            camera_updated,
            snapshot: self.stage.viewer.begin_frame(),
        }
    }

    fn scrub(&mut self) {
        let Some(choreo) = &mut self.choreo else {
            return;
        };
        let events = choreo.scrub(self.scroll, &mut self.stage.viewer.camera);
        for ev in events {
            let Some(hooks) = choreo.segment(ev.segment).map(|s| s.hooks) else {
                continue;
            };
            match ev.phase {
                Phase::Start | Phase::Complete => {
                    if let Some(fov) = hooks.edge_fov {
                        self.tweens.to(
                            TweenSpec::scalar(Property::CameraFov, fov, FOV_TWEEN_SEC)
                                .tag(TweenTag::FovAdjust),
                        );
                    }
                }
                Phase::Update => {
                    if hooks.invalidate {
                        self.gate.mark_dirty();
                        self.stage.viewer.set_dirty();
                    }
                }
            }
        }
    }
}
