// Host-side tests for scroll-scrubbed camera keyframes.

use glam::Vec3;
use showcase_core::camera::CameraState;
use showcase_core::choreo::{CameraVector, Choreographer, Segment};
use showcase_core::config::default_segments;
use showcase_core::constants::*;
use showcase_core::trigger::{Anchor, Edge, ScrollLayout, TriggerRegion};
use showcase_core::tween::Phase;
use showcase_core::TriggerError;

const VH: f32 = 1000.0;

// Three full-viewport sections: hero, second, third.
fn layout() -> ScrollLayout {
    ScrollLayout::new(VH, 2000.0)
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

fn camera() -> CameraState {
    CameraState::new(
        DESKTOP_CAMERA_POSITION,
        DESKTOP_CAMERA_TARGET,
        DEFAULT_FOV_DEGREES,
    )
}

fn choreographer() -> Choreographer {
    let mut c = Choreographer::new(default_segments().expect("literal segments"), &camera());
    c.refresh(&layout());
    c
}

#[test]
fn anchors_parse_element_then_viewport_edge() {
    let a: Anchor = "top bottom".parse().expect("valid anchor");
    assert_eq!(
        a,
        Anchor {
            element: Edge::Top,
            viewport: Edge::Bottom
        }
    );
    let b: Anchor = "center top".parse().expect("valid anchor");
    assert_eq!(b.element, Edge::Center);
    assert_eq!(b.viewport, Edge::Top);
}

#[test]
fn malformed_anchor_is_a_typed_error() {
    let err = Segment::new(".x", "top middle", "top top", CameraVector::Position, Vec3::ZERO)
        .expect_err("middle is not an edge");
    assert_eq!(err, TriggerError::InvalidAnchor("top middle".to_string()));
    assert!("top".parse::<Anchor>().is_err());
    assert!("top top top".parse::<Anchor>().is_err());
}

#[test]
fn ranges_resolve_from_region_and_viewport() {
    let c = choreographer();
    // segment 0 is the `.second` position scrub
    let r = c.range(0).expect("second is measured");
    assert_eq!(r.start, 0.0);
    assert_eq!(r.end, 1000.0);
    let r3 = c.range(2).expect("third is measured");
    assert_eq!(r3.start, 1000.0);
    assert_eq!(r3.end, 2000.0);
}

#[test]
fn initial_vectors_hold_before_any_progress() {
    let c = choreographer();
    let s = c.sample(0.0);
    assert_eq!(s.position, DESKTOP_CAMERA_POSITION);
    assert_eq!(s.target, DESKTOP_CAMERA_TARGET);
}

#[test]
fn top_of_second_section_reaches_second_keyframe() {
    let c = choreographer();
    let s = c.sample(1000.0);
    assert_eq!(s.position, SECOND_POSITION);
    assert_eq!(s.target, SECOND_TARGET);
}

#[test]
fn past_top_of_third_section_reaches_third_keyframe() {
    let c = choreographer();
    for scroll in [2000.0, 2400.0, 5000.0] {
        let s = c.sample(scroll);
        assert_eq!(s.position, THIRD_POSITION);
        assert_eq!(s.target, THIRD_TARGET);
    }
}

#[test]
fn third_scrub_starts_from_second_keyframe() {
    let c = choreographer();
    let mid = c.sample(1500.0);
    // strictly between the two keyframes on x
    let lo = SECOND_POSITION.x.min(THIRD_POSITION.x);
    let hi = SECOND_POSITION.x.max(THIRD_POSITION.x);
    assert!(mid.position.x > lo && mid.position.x < hi);
}

#[test]
fn scrubbing_back_and_forth_is_reversible() {
    let mut c = choreographer();
    let mut cam = camera();

    c.scrub(640.0, &mut cam);
    let (pos, target) = (cam.position, cam.target);

    let mut scroll = 640.0;
    while scroll < 2600.0 {
        scroll += 37.0;
        c.scrub(scroll, &mut cam);
    }
    while scroll > -200.0 {
        scroll -= 53.0;
        c.scrub(scroll, &mut cam);
    }
    c.scrub(640.0, &mut cam);

    assert_eq!(cam.position, pos);
    assert_eq!(cam.target, target);
}

#[test]
fn position_is_monotonic_within_a_range() {
    let c = choreographer();
    let mut prev = c.sample(0.0).position;
    let mut scroll = 0.0;
    while scroll <= 1000.0 {
        let p = c.sample(scroll).position;
        // 2.6 -> -0.58 on x, 0.9 -> -0.62 on y: both decreasing
        assert!(p.x <= prev.x + 1e-6, "x rose at {}", scroll);
        assert!(p.y <= prev.y + 1e-6, "y rose at {}", scroll);
        prev = p;
        scroll += 10.0;
    }
}

#[test]
fn scrub_reports_start_update_complete() {
    let mut c = choreographer();
    let mut cam = camera();

    assert!(c.scrub(0.0, &mut cam).is_empty());

    let events = c.scrub(500.0, &mut cam);
    assert!(events.iter().any(|e| e.segment == 0 && e.phase == Phase::Start));
    assert!(events.iter().any(|e| e.segment == 1 && e.phase == Phase::Update));
    assert!(!events.iter().any(|e| e.phase == Phase::Complete));

    let events = c.scrub(1000.0, &mut cam);
    assert!(events.iter().any(|e| e.segment == 0 && e.phase == Phase::Complete));
    assert!(events.iter().any(|e| e.segment == 1 && e.phase == Phase::Complete));

    // same offset again: nothing to report
    assert!(c.scrub(1000.0, &mut cam).is_empty());
}

#[test]
fn scrub_writes_camera_vectors() {
    let mut c = choreographer();
    let mut cam = camera();
    c.scrub(1000.0, &mut cam);
    assert_eq!(cam.position, SECOND_POSITION);
    assert_eq!(cam.target, SECOND_TARGET);
}

#[test]
fn missing_trigger_never_starts() {
    let partial = ScrollLayout::new(VH, 2000.0).with_region(
        SECOND_TRIGGER,
        TriggerRegion {
            top: 1000.0,
            height: 1000.0,
        },
    );
    let mut c = Choreographer::new(default_segments().expect("literal segments"), &camera());
    c.refresh(&partial);
    assert!(c.range(2).is_none());
    let s = c.sample(2500.0);
    assert_eq!(s.position, SECOND_POSITION);
    assert_eq!(s.target, SECOND_TARGET);
}

#[test]
fn relayout_moves_ranges() {
    let mut c = choreographer();
    let taller = ScrollLayout::new(VH, 4000.0)
        .with_region(
            SECOND_TRIGGER,
            TriggerRegion {
                top: 2000.0,
                height: 1500.0,
            },
        )
        .with_region(
            THIRD_TRIGGER,
            TriggerRegion {
                top: 3500.0,
                height: 1500.0,
            },
        );
    c.refresh(&taller);
    assert_eq!(c.sample(1000.0).position, DESKTOP_CAMERA_POSITION);
    assert_eq!(c.sample(2000.0).position, SECOND_POSITION);
    assert_eq!(c.sample(3500.0).position, THIRD_POSITION);
}

// Short sections: `.third` starts scrubbing before `.second` has finished.
fn overlapping() -> Choreographer {
    let layout = ScrollLayout::new(800.0, 2000.0)
        .with_region(
            SECOND_TRIGGER,
            TriggerRegion {
                top: 1000.0,
                height: 500.0,
            },
        )
        .with_region(
            THIRD_TRIGGER,
            TriggerRegion {
                top: 1500.0,
                height: 500.0,
            },
        );
    let mut c = Choreographer::new(default_segments().expect("literal segments"), &camera());
    c.refresh(&layout);
    c
}

#[test]
fn overlapping_ranges_stay_continuous() {
    let c = overlapping();
    let third = c.range(2).expect("third is measured");
    let second = c.range(0).expect("second is measured");
    assert!(third.start < second.end);

    let before = c.sample(third.start - 0.1);
    let at = c.sample(third.start);
    assert!((at.position - before.position).length() < 5e-3);
    assert!((at.target - before.target).length() < 5e-3);

    // the third scrub still lands on its keyframe
    let end = c.sample(third.end);
    assert_eq!(end.position, THIRD_POSITION);
    assert_eq!(end.target, THIRD_TARGET);
}

#[test]
fn overlapping_ranges_scrub_back_to_same_values() {
    let mut c = overlapping();
    let mut cam = camera();
    let offsets: Vec<f32> = (0..=40).map(|i| i as f32 * 40.0).collect();

    let mut forward = Vec::new();
    for &s in &offsets {
        c.scrub(s, &mut cam);
        forward.push((cam.position, cam.target));
    }
    for (k, &s) in offsets.iter().enumerate().rev() {
        c.scrub(s, &mut cam);
        assert_eq!((cam.position, cam.target), forward[k], "at {}", s);
        let fresh = c.sample(s);
        assert_eq!(cam.position, fresh.position);
    }
}
