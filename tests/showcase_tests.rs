// End-to-end tests of the showcase state machine, driven the way the page
// drives it: events in, one `frame` call per animation frame.

use glam::Vec3;
use showcase_core::asset::{Aabb, AssetCamera, MeshData};
use showcase_core::constants::*;
use showcase_core::error::AssetError;
use showcase_core::pipeline::{Plugin, PluginKind};
use showcase_core::smooth_scroll::{InputOutcome, InputSource, ScrollInput};
use showcase_core::trigger::{ScrollLayout, TriggerRegion};
use showcase_core::tween::Property;
use showcase_core::{DeviceMode, LoadState, Showcase, ShowcaseConfig};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn mesh(camera: Option<AssetCamera>) -> MeshData {
    MeshData {
        vertices: Vec::new(),
        indices: vec![0, 1, 2],
        bounds: Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::ONE,
        },
        camera,
    }
}

fn asset_camera() -> AssetCamera {
    AssetCamera {
        position: Vec3::new(1.0, 2.0, 3.0),
        target: Vec3::new(0.0, 0.5, 0.0),
        fov: 35.0,
    }
}

fn layout() -> ScrollLayout {
    ScrollLayout::new(1000.0, 2000.0)
        .with_region(
            SECOND_TRIGGER,
            TriggerRegion {
                top: 1000.0,
                height: 1000.0,
            },
        )
        .with_region(
            THIRD_TRIGGER,
            TriggerRegion {
                top: 2000.0,
                height: 1000.0,
            },
        )
}

fn loaded(mode: DeviceMode, camera: Option<AssetCamera>) -> Showcase {
    let mut showcase = Showcase::initialize(ShowcaseConfig::default(), mode).unwrap();
    showcase.set_viewport(1600.0, 900.0);
    showcase.set_layout(layout());
    showcase.on_load_progress(10, 100);
    showcase.on_asset_loaded(mesh(camera)).unwrap();
    showcase
}

#[test]
fn initialize_registers_every_extension() {
    let showcase = Showcase::initialize(ShowcaseConfig::default(), DeviceMode::Desktop).unwrap();
    let pipeline = showcase.viewer().pipeline();
    assert_eq!(pipeline.plugins().len(), 8);
    assert!(pipeline.has(PluginKind::Bloom));
    assert!(showcase.smooth_scroll().is_stopped());
    assert!(!showcase.is_loaded());
    assert_eq!(showcase.progress().state(), &LoadState::Pending);
}

#[test]
fn mobile_camera_ignores_asset_camera() {
    let showcase = loaded(DeviceMode::Mobile, Some(asset_camera()));
    let cam = showcase.camera();
    assert_eq!(cam.position, MOBILE_CAMERA_POSITION);
    assert_eq!(cam.target, MOBILE_CAMERA_TARGET);
    assert_eq!(cam.fov, 0.0);
    assert!(cam.is_orthographic());
    assert!(!cam.controls_enabled);
}

#[test]
fn desktop_uses_asset_camera() {
    let showcase = loaded(DeviceMode::Desktop, Some(asset_camera()));
    let cam = showcase.camera();
    assert_eq!(cam.position, asset_camera().position);
    assert_eq!(cam.target, asset_camera().target);
    assert_eq!(cam.fov, 35.0);
    assert!(!cam.controls_enabled);
}

#[test]
fn desktop_without_asset_camera_keeps_default() {
    let showcase = loaded(DeviceMode::Desktop, None);
    assert_eq!(showcase.camera().position, DESKTOP_CAMERA_POSITION);
    assert_eq!(showcase.camera().fov, DEFAULT_FOV_DEGREES);
}

#[test]
fn background_is_not_clipped_after_load() {
    let showcase = loaded(DeviceMode::Desktop, None);
    match showcase.viewer().pipeline().get_plugin(PluginKind::Tonemap) {
        Some(Plugin::Tonemap(cfg)) => assert!(!cfg.clip_background),
        other => panic!("unexpected tonemap plugin {:?}", other),
    }
    assert_eq!(showcase.progress().ratio(), 1.0);
}

#[test]
fn first_frame_resets_page_scroll() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    let out = showcase.frame(0.0, 640.0);
    assert_eq!(out.scroll_to, Some(0.0));
    assert_eq!(showcase.scroll_offset(), 0.0);
    let out = showcase.frame(FRAME_MS, 0.0);
    assert_eq!(out.scroll_to, None);
}

#[test]
fn loader_exit_unlocks_scrolling() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    let wheel = ScrollInput {
        delta_y: 100.0,
        viewport: 1000.0,
        ..ScrollInput::default()
    };
    assert_eq!(
        showcase.on_scroll_input(InputSource::Wheel, wheel),
        InputOutcome::Blocked
    );

    let mut unlocks = 0;
    let mut t = 0.0;
    while t <= 3000.0 {
        let out = showcase.frame(t, 0.0);
        if out.unlock_scroll {
            unlocks += 1;
        }
        if t <= 1700.0 {
            assert!(showcase.smooth_scroll().is_stopped(), "started at {}", t);
        }
        if t >= 2000.0 {
            assert!(!showcase.smooth_scroll().is_stopped());
        }
        t += 100.0;
    }
    assert_eq!(unlocks, 1);
    assert!(showcase.is_scroll_unlocked());
    assert_eq!(showcase.loader_offset(), 1.0);
    assert_eq!(
        showcase.on_scroll_input(InputSource::Wheel, wheel),
        InputOutcome::Smoothed
    );
}

#[test]
fn loader_offset_is_reported_while_moving() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    let mut offsets = Vec::new();
    let mut t = 0.0;
    while t <= 2500.0 {
        if let Some(o) = showcase.frame(t, 0.0).loader_offset {
            offsets.push(o);
        }
        t += FRAME_MS;
    }
    assert!(!offsets.is_empty());
    assert!(offsets.windows(2).all(|w| w[1] >= w[0]));
    assert_eq!(offsets.last().copied(), Some(1.0));
}

#[test]
fn scroll_scrubs_to_second_keyframe() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    showcase.frame(0.0, 0.0);
    showcase.frame(FRAME_MS, 1000.0);
    assert_eq!(showcase.camera().position, SECOND_POSITION);
    assert_eq!(showcase.camera().target, SECOND_TARGET);

    showcase.frame(2.0 * FRAME_MS, 2000.0);
    assert_eq!(showcase.camera().position, THIRD_POSITION);
    assert_eq!(showcase.camera().target, THIRD_TARGET);

    // scrubbing back restores the start of the path
    showcase.frame(3.0 * FRAME_MS, 0.0);
    assert_eq!(showcase.camera().position, DESKTOP_CAMERA_POSITION);
}

#[test]
fn camera_refresh_is_gated_to_once_per_frame() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    let mut t = 0.0;
    for i in 0..60 {
        let before = showcase.camera().update_count();
        let out = showcase.frame(t, (i * 15) as f32);
        let after = showcase.camera().update_count();
        assert!(after - before <= 1);
        assert_eq!(out.camera_updated, after == before + 1);
        t += FRAME_MS;
    }
    // a still page with nothing animating publishes nothing
    let mut still = loaded(DeviceMode::Desktop, None);
    still.on_pointer_leave();
    still.frame(0.0, 0.0);
    let idle = still.frame(FRAME_MS, 0.0);
    assert!(!idle.camera_updated);
}

#[test]
fn scrub_edges_tween_fov() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    showcase.frame(0.0, 0.0);
    showcase.frame(FRAME_MS, 1000.0);
    assert!(showcase.tweens().is_animating(Property::CameraFov));

    let mut t = 2.0 * FRAME_MS;
    for _ in 0..90 {
        showcase.frame(t, 1000.0);
        t += FRAME_MS;
    }
    assert_eq!(showcase.camera().fov, SCRUB_FOV_DEGREES);
    assert!(!showcase.tweens().is_animating(Property::CameraFov));
}

#[test]
fn pointer_leave_before_load_is_ignored() {
    let mut showcase = Showcase::initialize(ShowcaseConfig::default(), DeviceMode::Desktop).unwrap();
    showcase.on_pointer_leave();
    assert_eq!(showcase.tweens().count(Property::SceneScale), 0);
    showcase.frame(0.0, 0.0);
    assert_eq!(showcase.tweens().count(Property::ScenePosition), 0);
}

#[test]
fn pointer_parallax_moves_scene_after_load() {
    let mut showcase = loaded(DeviceMode::Desktop, None);
    showcase.on_pointer_move(1600.0, 900.0, 1600.0, 900.0);
    let mut t = 0.0;
    for _ in 0..30 {
        showcase.frame(t, 0.0);
        t += FRAME_MS;
    }
    let scene = showcase.viewer().scene;
    assert!(scene.position.x > 0.0);
    assert!(scene.scale.x > 1.0);
}

#[test]
fn failed_import_leaves_camera_alone() {
    let mut showcase = Showcase::initialize(ShowcaseConfig::default(), DeviceMode::Desktop).unwrap();
    showcase.set_layout(layout());
    showcase.on_load_progress(30, 100);
    showcase.on_asset_failed(&AssetError::Http {
        status: 404,
        path: ASSET_PATH.to_string(),
    });
    assert!(matches!(showcase.progress().state(), LoadState::Failed(_)));

    let mut t = 0.0;
    for _ in 0..200 {
        let out = showcase.frame(t, 1000.0);
        assert!(!out.unlock_scroll);
        t += FRAME_MS;
    }
    assert_eq!(showcase.camera().position, DESKTOP_CAMERA_POSITION);
    assert!(showcase.smooth_scroll().is_stopped());
    assert!(showcase.choreographer().is_none());
}
