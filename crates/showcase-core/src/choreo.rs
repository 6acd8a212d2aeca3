//! Scroll-scrubbed camera keyframes.
//!
//! Camera vectors are a pure function of scroll offset: for each vector the
//! segments are chained in scroll order, and the latest segment whose range
//! has been reached interpolates to its own value from wherever the earlier
//! segments had taken the vector when its range started.
//! Scrubbing backwards therefore reproduces exactly the same vectors.

use crate::camera::CameraState;
use crate::ease::Ease;
use crate::error::TriggerError;
use crate::trigger::{Anchor, ScrollLayout, ScrollRange};
use crate::tween::Phase;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraVector {
    Position,
    Target,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SegmentHooks {
    /// Invalidate the frame gate on every progress change.
    pub invalidate: bool,
    /// Field of view requested when the scrub starts and when it completes.
    pub edge_fov: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub trigger: String,
    pub start: Anchor,
    pub end: Anchor,
    pub vector: CameraVector,
    pub to: Vec3,
    pub ease: Ease,
    pub hooks: SegmentHooks,
}

impl Segment {
    pub fn new(
        trigger: &str,
        start: &str,
        end: &str,
        vector: CameraVector,
        to: Vec3,
    ) -> Result<Self, TriggerError> {
        Ok(Self {
            trigger: trigger.to_string(),
            start: start.parse()?,
            end: end.parse()?,
            vector,
            to,
            ease: Ease::default(),
            hooks: SegmentHooks::default(),
        })
    }

    pub fn with_hooks(mut self, hooks: SegmentHooks) -> Self {
        self.hooks = hooks;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentEvent {
    pub segment: usize,
    pub phase: Phase,
}

pub type SegmentEvents = SmallVec<[SegmentEvent; 8]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSample {
    pub position: Vec3,
    pub target: Vec3,
}

#[derive(Debug)]
pub struct Choreographer {
    segments: Vec<Segment>,
    ranges: Vec<Option<ScrollRange>>,
    /// Per vector: segment indices sorted by range start.
    position_order: Vec<usize>,
    target_order: Vec<usize>,
    initial: CameraSample,
    progress: Vec<f32>,
    last_scroll: Option<f32>,
}

impl Choreographer {
    /// Captures the camera's current vectors as the values before any segment.
    pub fn new(segments: Vec<Segment>, camera: &CameraState) -> Self {
        let n = segments.len();
        Self {
            segments,
            ranges: vec![None; n],
            position_order: Vec::new(),
            target_order: Vec::new(),
            initial: CameraSample {
                position: camera.position,
                target: camera.target,
            },
            progress: vec![0.0; n],
            last_scroll: None,
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn range(&self, index: usize) -> Option<ScrollRange> {
        self.ranges.get(index).copied().flatten()
    }

    pub fn progress(&self, index: usize) -> f32 {
        self.progress.get(index).copied().unwrap_or(0.0)
    }

    /// Re-resolves every segment against freshly measured page geometry.
    pub fn refresh(&mut self, layout: &ScrollLayout) {
        for (i, seg) in self.segments.iter().enumerate() {
            let range = layout.resolve(&seg.trigger, seg.start, seg.end);
            if range.is_none() {
                log::warn!("scroll trigger {:?} not found; segment {} disabled", seg.trigger, i);
            }
            self.ranges[i] = range;
        }
        self.position_order = self.order_for(CameraVector::Position);
        self.target_order = self.order_for(CameraVector::Target);
        self.last_scroll = None;
    }

    fn order_for(&self, vector: CameraVector) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.segments.len())
            .filter(|&i| self.segments[i].vector == vector && self.ranges[i].is_some())
            .collect();
        // stable: registration order breaks ties
        order.sort_by(|&a, &b| {
            let sa = self.ranges[a].map(|r| r.start).unwrap_or(f32::MAX);
            let sb = self.ranges[b].map(|r| r.start).unwrap_or(f32::MAX);
            sa.total_cmp(&sb)
        });
        order
    }

    /// Value of the chain `order` at `scroll`. The latest reached segment wins;
    /// it starts from the rest of the chain evaluated at its own range start,
    /// so overlapping ranges stay continuous.
    fn sample_vector(&self, order: &[usize], initial: Vec3, scroll: f32) -> Vec3 {
        let reached = order
            .iter()
            .rposition(|&i| self.ranges[i].is_some_and(|r| scroll >= r.start));
        let Some(k) = reached else {
            return initial;
        };
        let i = order[k];
        let Some(range) = self.ranges[i] else {
            return initial;
        };
        let seg = &self.segments[i];
        let progress = range.progress(scroll);
        if progress >= 1.0 {
            return seg.to;
        }
        let from = self.sample_vector(&order[..k], initial, range.start);
        from + (seg.to - from) * seg.ease.apply(progress)
    }

    /// Camera vectors at `scroll`, independent of any previous call.
    pub fn sample(&self, scroll: f32) -> CameraSample {
        CameraSample {
            position: self.sample_vector(&self.position_order, self.initial.position, scroll),
            target: self.sample_vector(&self.target_order, self.initial.target, scroll),
        }
    }

    /// Writes the sampled vectors into `camera` when the scroll offset changed
    /// and reports per-segment lifecycle transitions.
    pub fn scrub(&mut self, scroll: f32, camera: &mut CameraState) -> SegmentEvents {
        let mut events = SegmentEvents::new();
        if self.last_scroll == Some(scroll) {
            return events;
        }
        self.last_scroll = Some(scroll);

        for i in 0..self.segments.len() {
            let Some(range) = self.ranges[i] else { continue };
            let before = self.progress[i];
            let after = range.progress(scroll);
            if after == before {
                continue;
            }
            if before == 0.0 && after > 0.0 {
                events.push(SegmentEvent {
                    segment: i,
                    phase: Phase::Start,
                });
            }
            events.push(SegmentEvent {
                segment: i,
                phase: Phase::Update,
            });
            if after >= 1.0 && before < 1.0 {
                events.push(SegmentEvent {
                    segment: i,
                    phase: Phase::Complete,
                });
            }
            self.progress[i] = after;
        }

        let sample = self.sample(scroll);
        camera.position = sample.position;
        camera.target = sample.target;
        events
    }
}
