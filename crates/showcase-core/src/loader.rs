//! Load-progress bookkeeping for the single showcase asset.
//!
//! Progress ratios shown to the user never decrease and never reach 1 before
//! the completion signal; completion reports exactly 1, once.

#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    Pending,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug)]
pub struct LoadProgress {
    ratio: f32,
    state: LoadState,
}

impl Default for LoadProgress {
    fn default() -> Self {
        Self {
            ratio: 0.0,
            state: LoadState::Pending,
        }
    }
}

// Largest ratio reported before completion.
const BELOW_ONE: f32 = 1.0 - f32::EPSILON;

/// Upper bound on the buffer reserved from a `Content-Length` header.
pub const MAX_RESERVE_BYTES: u64 = 64 << 20;

/// Bytes to reserve for a body announced as `content_length`. The header is
/// only a hint; larger bodies still grow the buffer as chunks arrive.
pub fn reserve_hint(content_length: u64) -> usize {
    usize::try_from(content_length.min(MAX_RESERVE_BYTES)).unwrap_or(0)
}

impl LoadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, LoadState::Loaded | LoadState::Failed(_))
    }

    /// Records a progress event. Returns the ratio to display when it advanced.
    pub fn on_progress(&mut self, loaded: u64, total: u64) -> Option<f32> {
        if self.is_finished() {
            return None;
        }
        self.state = LoadState::Loading;
        if total == 0 {
            return None;
        }
        let ratio = (loaded as f64 / total as f64).clamp(0.0, BELOW_ONE as f64) as f32;
        if ratio <= self.ratio {
            return None;
        }
        self.ratio = ratio;
        Some(ratio)
    }

    /// Marks the load complete. Returns `Some(1.0)` the first time only.
    pub fn complete(&mut self) -> Option<f32> {
        if self.is_finished() {
            return None;
        }
        self.state = LoadState::Loaded;
        self.ratio = 1.0;
        Some(1.0)
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        if !self.is_finished() {
            self.state = LoadState::Failed(reason.into());
        }
    }
}
