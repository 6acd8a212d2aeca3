//! Eased, inertial page scrolling.
//!
//! Wheel deltas move a target offset; each animation frame eases the visible
//! offset towards it over a fixed duration. The host must call
//! [`SmoothScroll::raf`] every frame and apply the returned offset to the page.
//! The adapter is created stopped: while stopped it swallows input and never
//! advances.

use crate::constants::{
    SCROLL_DURATION_SEC, SCROLL_LINE_HEIGHT_PX, SCROLL_MOUSE_MULTIPLIER, SCROLL_TOUCH_MULTIPLIER,
};
use crate::ease::Ease;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScrollOptions {
    pub duration: f32,
    pub easing: Ease,
    pub direction: Orientation,
    pub gesture_direction: Orientation,
    pub smooth: bool,
    pub mouse_multiplier: f32,
    pub smooth_touch: bool,
    pub touch_multiplier: f32,
    pub infinite: bool,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration: SCROLL_DURATION_SEC,
            easing: Ease::ScrollExpo,
            direction: Orientation::Vertical,
            gesture_direction: Orientation::Vertical,
            smooth: true,
            mouse_multiplier: SCROLL_MOUSE_MULTIPLIER,
            smooth_touch: false,
            touch_multiplier: SCROLL_TOUCH_MULTIPLIER,
            infinite: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Wheel,
    Touch,
}

/// Units of a wheel delta, matching `WheelEvent.deltaMode`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScrollInput {
    pub delta_x: f32,
    pub delta_y: f32,
    pub mode: DeltaMode,
    pub ctrl_key: bool,
    /// Viewport extent along the scroll axis, used for page-mode deltas.
    pub viewport: f32,
}

/// What the host should do with the originating DOM event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    /// Let the browser scroll natively.
    Native,
    /// Prevent default; the adapter is stopped.
    Blocked,
    /// Prevent default; the adapter animates instead.
    Smoothed,
}

#[derive(Clone, Copy, Debug)]
struct Animation {
    from: f32,
    to: f32,
    elapsed: f32,
}

#[derive(Debug)]
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    stopped: bool,
    animated: f32,
    target: f32,
    limit: f32,
    animation: Option<Animation>,
    last_time: Option<f64>,
}

impl SmoothScroll {
    pub fn new(options: SmoothScrollOptions) -> Self {
        Self {
            options,
            stopped: true,
            animated: 0.0,
            target: 0.0,
            limit: 0.0,
            animation: None,
            last_time: None,
        }
    }

    pub fn options(&self) -> &SmoothScrollOptions {
        &self.options
    }

    pub fn start(&mut self) {
        if self.stopped {
            log::debug!("smooth scroll started at {:.1}", self.animated);
        }
        self.stopped = false;
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.animation = None;
        self.target = self.animated;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Eased offset last returned by [`SmoothScroll::raf`].
    pub fn position(&self) -> f32 {
        self.animated
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Maximum scroll offset (`scrollHeight - innerHeight`).
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        if !self.options.infinite {
            self.target = self.target.clamp(0.0, self.limit);
            self.animated = self.animated.clamp(0.0, self.limit);
        }
    }

    pub fn on_input(&mut self, source: InputSource, input: ScrollInput) -> InputOutcome {
        if input.ctrl_key {
            return InputOutcome::Native;
        }
        let raw = match self.options.gesture_direction {
            Orientation::Vertical => input.delta_y,
            Orientation::Horizontal => input.delta_x,
        };
        if raw == 0.0 && source == InputSource::Wheel {
            return InputOutcome::Native;
        }
        if self.stopped {
            return InputOutcome::Blocked;
        }
        let (smooth, multiplier) = match source {
            InputSource::Wheel => (self.options.smooth, self.options.mouse_multiplier),
            InputSource::Touch => (self.options.smooth_touch, self.options.touch_multiplier),
        };
        if !smooth {
            self.animation = None;
            return InputOutcome::Native;
        }
        let unit = match input.mode {
            DeltaMode::Pixel => 1.0,
            DeltaMode::Line => SCROLL_LINE_HEIGHT_PX,
            DeltaMode::Page => input.viewport,
        };
        self.scroll_to(self.target + raw * unit * multiplier, false);
        InputOutcome::Smoothed
    }

    /// Re-syncs to a native scroll offset (scrollbar drag, keyboard) when no
    /// eased animation owns the page.
    pub fn on_native_scroll(&mut self, offset: f32) {
        if self.animation.is_none() {
            self.animated = offset;
            self.target = offset;
        }
    }

    pub fn scroll_to(&mut self, offset: f32, immediate: bool) {
        let offset = if self.options.infinite {
            offset
        } else {
            offset.clamp(0.0, self.limit)
        };
        self.target = offset;
        if immediate {
            self.animated = offset;
            self.animation = None;
        } else {
            self.animation = Some(Animation {
                from: self.animated,
                to: offset,
                elapsed: 0.0,
            });
        }
    }

    /// Advances the eased offset. `time_ms` must be monotonically increasing.
    /// Returns the new offset to apply when it changed.
    pub fn raf(&mut self, time_ms: f64) -> Option<f32> {
        let dt = match self.last_time {
            Some(prev) => ((time_ms - prev) * 0.001).max(0.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);
        if self.stopped {
            return None;
        }
        let anim = self.animation.as_mut()?;
        let duration = self.options.duration.max(f32::EPSILON);
        anim.elapsed = (anim.elapsed + dt).min(duration);
        let linear = anim.elapsed / duration;
        let completed = linear >= 1.0;
        let eased = if completed {
            1.0
        } else {
            self.options.easing.apply(linear)
        };
        let value = anim.from + (anim.to - anim.from) * eased;
        if completed {
            self.animation = None;
        }
        if value == self.animated {
            return None;
        }
        self.animated = value;
        Some(value)
    }
}
