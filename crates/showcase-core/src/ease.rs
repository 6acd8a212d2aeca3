/// Easing curves mapping linear progress in [0, 1] to eased progress.
///
/// The `Power*` names follow the usual tween-library convention where
/// `power1` is quadratic, `power3` is quartic and `power4` is quintic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Tween default.
    #[default]
    Power1Out,
    Power3Out,
    Power4InOut,
    /// Exponential settle used by the smooth-scroll adapter:
    /// `min(1, 1.001 - 2^(-10 t))`.
    ScrollExpo,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::Power4InOut => {
                if t < 0.5 {
                    16.0 * t.powi(5)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(5) / 2.0
                }
            }
            Ease::ScrollExpo => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
        }
    }
}
