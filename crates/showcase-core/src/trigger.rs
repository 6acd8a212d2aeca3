//! Scroll-linked trigger regions.
//!
//! A trigger is a page element measured in document coordinates. A pair of
//! anchors (`"top bottom"` → `"top top"`) resolves it into a scroll range;
//! progress through that range is clamped to [0, 1].

use crate::error::TriggerError;
use fnv::FnvHashMap;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

impl Edge {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "top" => Some(Edge::Top),
            "center" => Some(Edge::Center),
            "bottom" => Some(Edge::Bottom),
            _ => None,
        }
    }

    #[inline]
    fn offset(self, extent: f32) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
        }
    }
}

/// "When `element` edge of the trigger meets `viewport` edge of the window".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub element: Edge,
    pub viewport: Edge,
}

impl FromStr for Anchor {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let element = parts.next().and_then(Edge::parse);
        let viewport = parts.next().and_then(Edge::parse);
        match (element, viewport, parts.next()) {
            (Some(element), Some(viewport), None) => Ok(Anchor { element, viewport }),
            _ => Err(TriggerError::InvalidAnchor(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRegion {
    /// Document-space offset of the element's top edge.
    pub top: f32,
    pub height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    pub start: f32,
    pub end: f32,
}

impl ScrollRange {
    pub fn progress(&self, scroll: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll >= self.end { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Measured page geometry used to resolve trigger ranges.
#[derive(Clone, Debug, Default)]
pub struct ScrollLayout {
    pub viewport_height: f32,
    /// Maximum scroll offset of the document.
    pub scroll_limit: f32,
    regions: FnvHashMap<String, TriggerRegion>,
}

impl ScrollLayout {
    pub fn new(viewport_height: f32, scroll_limit: f32) -> Self {
        Self {
            viewport_height,
            scroll_limit,
            regions: FnvHashMap::default(),
        }
    }

    pub fn insert(&mut self, trigger: impl Into<String>, region: TriggerRegion) {
        self.regions.insert(trigger.into(), region);
    }

    pub fn with_region(mut self, trigger: impl Into<String>, region: TriggerRegion) -> Self {
        self.insert(trigger, region);
        self
    }

    pub fn region(&self, trigger: &str) -> Option<&TriggerRegion> {
        self.regions.get(trigger)
    }

    /// Scroll offset at which `anchor` is satisfied for `region`.
    pub fn anchor_offset(&self, region: &TriggerRegion, anchor: Anchor) -> f32 {
        region.top + anchor.element.offset(region.height)
            - anchor.viewport.offset(self.viewport_height)
    }

    pub fn resolve(&self, trigger: &str, start: Anchor, end: Anchor) -> Option<ScrollRange> {
        let region = self.region(trigger)?;
        Some(ScrollRange {
            start: self.anchor_offset(region, start),
            end: self.anchor_offset(region, end),
        })
    }
}
