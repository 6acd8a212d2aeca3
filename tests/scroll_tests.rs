// Host-side tests for the smooth-scroll adapter.

use showcase_core::smooth_scroll::{
    DeltaMode, InputOutcome, InputSource, ScrollInput, SmoothScroll, SmoothScrollOptions,
};

fn wheel(delta_y: f32) -> ScrollInput {
    ScrollInput {
        delta_y,
        viewport: 800.0,
        ..ScrollInput::default()
    }
}

fn adapter() -> SmoothScroll {
    let mut s = SmoothScroll::new(SmoothScrollOptions::default());
    s.set_limit(5000.0);
    s
}

// Runs 60 Hz frames from `from_ms` for `secs`; returns the last timestamp.
fn run(s: &mut SmoothScroll, from_ms: f64, secs: f64) -> f64 {
    let mut t = from_ms;
    let end = from_ms + secs * 1000.0;
    while t < end {
        t += 1000.0 / 60.0;
        s.raf(t);
    }
    t
}

#[test]
fn starts_stopped_and_swallows_wheel() {
    let mut s = adapter();
    assert!(s.is_stopped());
    assert_eq!(s.on_input(InputSource::Wheel, wheel(120.0)), InputOutcome::Blocked);
    assert_eq!(s.on_input(InputSource::Touch, wheel(30.0)), InputOutcome::Blocked);
}

#[test]
fn never_advances_before_start() {
    let mut s = adapter();
    s.on_input(InputSource::Wheel, wheel(300.0));
    s.scroll_to(900.0, false);
    let mut t = 0.0;
    for _ in 0..240 {
        t += 16.0;
        assert_eq!(s.raf(t), None);
    }
    assert_eq!(s.position(), 0.0);
}

#[test]
fn wheel_eases_to_target_after_start() {
    let mut s = adapter();
    s.raf(0.0);
    s.start();
    assert_eq!(s.on_input(InputSource::Wheel, wheel(100.0)), InputOutcome::Smoothed);
    assert!(s.is_animating());

    let mut prev = 0.0;
    let mut t = 0.0;
    for _ in 0..90 {
        t += 1000.0 / 60.0;
        if let Some(y) = s.raf(t) {
            assert!(y >= prev);
            prev = y;
        }
    }
    assert_eq!(s.position(), 100.0);
    assert!(!s.is_animating());
}

#[test]
fn ctrl_wheel_is_left_to_the_browser() {
    let mut s = adapter();
    s.start();
    let input = ScrollInput {
        ctrl_key: true,
        ..wheel(100.0)
    };
    assert_eq!(s.on_input(InputSource::Wheel, input), InputOutcome::Native);
    assert_eq!(s.target(), 0.0);
}

#[test]
fn touch_is_native_without_smooth_touch() {
    let mut s = adapter();
    s.start();
    assert_eq!(s.on_input(InputSource::Touch, wheel(40.0)), InputOutcome::Native);
}

#[test]
fn line_and_page_deltas_are_scaled() {
    let mut s = adapter();
    s.start();
    let lines = ScrollInput {
        mode: DeltaMode::Line,
        ..wheel(3.0)
    };
    s.on_input(InputSource::Wheel, lines);
    assert!((s.target() - 50.0).abs() < 1e-3);

    let page = ScrollInput {
        mode: DeltaMode::Page,
        ..wheel(1.0)
    };
    s.on_input(InputSource::Wheel, page);
    assert!((s.target() - 850.0).abs() < 1e-3);
}

#[test]
fn target_is_clamped_to_limit() {
    let mut s = SmoothScroll::new(SmoothScrollOptions::default());
    s.set_limit(50.0);
    s.start();
    s.on_input(InputSource::Wheel, wheel(400.0));
    assert_eq!(s.target(), 50.0);
    s.on_input(InputSource::Wheel, wheel(-900.0));
    assert_eq!(s.target(), 0.0);
}

#[test]
fn stop_cancels_animation() {
    let mut s = adapter();
    s.start();
    s.on_input(InputSource::Wheel, wheel(500.0));
    let t = run(&mut s, 0.0, 0.2);
    let at = s.position();
    s.stop();
    assert!(!s.is_animating());
    assert_eq!(s.target(), at);
    run(&mut s, t, 1.0);
    assert_eq!(s.position(), at);
}

#[test]
fn immediate_scroll_to_jumps() {
    let mut s = adapter();
    s.scroll_to(700.0, true);
    assert_eq!(s.position(), 700.0);
    s.scroll_to(0.0, true);
    assert_eq!(s.position(), 0.0);
    assert!(!s.is_animating());
}

#[test]
fn native_scroll_resyncs_when_idle() {
    let mut s = adapter();
    s.start();
    s.on_native_scroll(1200.0);
    assert_eq!(s.position(), 1200.0);
    assert_eq!(s.target(), 1200.0);

    s.on_input(InputSource::Wheel, wheel(100.0));
    // an eased animation owns the page
    s.on_native_scroll(10.0);
    assert!((s.target() - 1300.0).abs() < 1e-3);
}
