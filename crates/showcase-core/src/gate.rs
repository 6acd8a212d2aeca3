/// Frame-coalescing dirty flag.
///
/// Any number of mutators may call [`FrameGate::mark_dirty`] during a frame;
/// the single per-frame consumer runs its side effect at most once and clears
/// the flag.
#[derive(Debug)]
pub struct FrameGate {
    dirty: bool,
}

impl Default for FrameGate {
    fn default() -> Self {
        // first frame always publishes the initial camera
        Self { dirty: true }
    }
}

impl FrameGate {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Runs `side_effect` if the flag is set, then clears it. Returns whether
    /// the side effect ran.
    pub fn consume(&mut self, side_effect: impl FnOnce()) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        side_effect();
        true
    }
}
