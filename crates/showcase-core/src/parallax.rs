use crate::constants::{
    PARALLAX_HOVER_SCALE, PARALLAX_POSITION_SEC, PARALLAX_SCALE_SEC, PARALLAX_X_GAIN,
    PARALLAX_Y_GAIN, PARALLAX_Z_GAIN,
};
use crate::ease::Ease;
use crate::tween::{Overwrite, Property, TweenSpec, Tweens};
use glam::Vec3;

/// Scene-root offset for a pointer at (`x`, `y`) in a `width` × `height`
/// viewport. Bounded by half of each gain for in-viewport pointers.
#[inline]
pub fn target_offset(x: f32, y: f32, width: f32, height: f32) -> Vec3 {
    if width <= 0.0 || height <= 0.0 {
        return Vec3::ZERO;
    }
    let u = x / width - 0.5;
    let v = y / height - 0.5;
    Vec3::new(u * PARALLAX_X_GAIN, v * PARALLAX_Y_GAIN, u * PARALLAX_Z_GAIN)
}

#[derive(Debug)]
pub struct PointerParallax {
    target: Vec3,
    hovering: bool,
}

impl Default for PointerParallax {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            hovering: true,
        }
    }
}

impl PointerParallax {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.target = target_offset(x, y, width, height);
        self.hovering = true;
    }

    /// Per-frame easing of the scene root towards the pointer target and, while
    /// the pointer is over the page, a slight enlargement. Reissued every
    /// frame; each overwrites the last.
    pub fn pre_frame(&self, tweens: &mut Tweens) {
        tweens.to(
            TweenSpec::to(Property::ScenePosition, self.target, PARALLAX_POSITION_SEC)
                .ease(Ease::Power3Out)
                .overwrite(Overwrite::Auto),
        );
        if self.hovering {
            tweens.to(
                TweenSpec::scalar(Property::SceneScale, PARALLAX_HOVER_SCALE, PARALLAX_SCALE_SEC)
                    .ease(Ease::Power3Out)
                    .overwrite(Overwrite::Auto),
            );
        }
    }

    pub fn on_pointer_leave(&mut self, tweens: &mut Tweens) {
        self.hovering = false;
        tweens.to(
            TweenSpec::to(Property::SceneScale, Vec3::ONE, PARALLAX_SCALE_SEC)
                .ease(Ease::Power3Out)
                .overwrite(Overwrite::Auto),
        );
    }
}
