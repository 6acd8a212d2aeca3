//! Minimal time-based tween engine.
//!
//! Tweens animate a [`Property`] of an [`Animatable`] target towards a
//! destination. `from` is sampled when the tween first renders (after its
//! delay), so a tween issued every frame eases from wherever the previous one
//! left the property.

use crate::ease::Ease;
use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    ScenePosition,
    SceneScale,
    /// Scalar, stored in `x`.
    CameraFov,
    /// Scalar in [0, 1] of the overlay width, stored in `x`.
    LoaderOffset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Run alongside any in-flight tween on the same property.
    #[default]
    None,
    /// Kill in-flight tweens on the same property.
    Auto,
}

/// Identifies which callback a tween's lifecycle events belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenTag {
    FovAdjust,
    LoaderExit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Update,
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub property: Property,
    pub to: Vec3,
    pub duration: f32,
    pub ease: Ease,
    pub delay: f32,
    pub overwrite: Overwrite,
    pub tag: Option<TweenTag>,
}

impl TweenSpec {
    pub fn to(property: Property, to: Vec3, duration: f32) -> Self {
        Self {
            property,
            to,
            duration,
            ease: Ease::default(),
            delay: 0.0,
            overwrite: Overwrite::None,
            tag: None,
        }
    }

    pub fn scalar(property: Property, to: f32, duration: f32) -> Self {
        Self::to(property, Vec3::splat(to), duration)
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn tag(mut self, tag: TweenTag) -> Self {
        self.tag = Some(tag);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenEvent {
    pub property: Property,
    pub phase: Phase,
    pub tag: Option<TweenTag>,
}

pub type TweenEvents = SmallVec<[TweenEvent; 8]>;

pub trait Animatable {
    fn read(&self, property: Property) -> Vec3;
    fn write(&mut self, property: Property, value: Vec3);
}

#[derive(Debug)]
struct Tween {
    spec: TweenSpec,
    from: Option<Vec3>,
    elapsed: f32,
}

#[derive(Debug, Default)]
pub struct Tweens {
    active: Vec<Tween>,
}

impl Tweens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to(&mut self, spec: TweenSpec) {
        if spec.overwrite == Overwrite::Auto {
            self.active.retain(|t| t.spec.property != spec.property);
        }
        self.active.push(Tween {
            spec,
            from: None,
            elapsed: 0.0,
        });
    }

    /// Advances every tween by `dt` seconds, writing values into `target`.
    /// Tweens render in creation order, so the newest write wins.
    pub fn advance(&mut self, dt: f32, target: &mut impl Animatable) -> TweenEvents {
        let mut events = TweenEvents::new();
        let dt = dt.max(0.0);
        for tween in &mut self.active {
            tween.elapsed += dt;
            let local = tween.elapsed - tween.spec.delay;
            if local < 0.0 {
                continue;
            }
            let spec = tween.spec;
            let from = match tween.from {
                Some(f) => f,
                None => {
                    let f = target.read(spec.property);
                    tween.from = Some(f);
                    events.push(TweenEvent {
                        property: spec.property,
                        phase: Phase::Start,
                        tag: spec.tag,
                    });
                    f
                }
            };
            let t = if spec.duration <= 0.0 {
                1.0
            } else {
                (local / spec.duration).min(1.0)
            };
            let value = if t >= 1.0 {
                spec.to
            } else {
                from + (spec.to - from) * spec.ease.apply(t)
            };
            target.write(spec.property, value);
            events.push(TweenEvent {
                property: spec.property,
                phase: Phase::Update,
                tag: spec.tag,
            });
            if t >= 1.0 {
                events.push(TweenEvent {
                    property: spec.property,
                    phase: Phase::Complete,
                    tag: spec.tag,
                });
            }
        }
        self.active.retain(|t| {
            let local = t.elapsed - t.spec.delay;
            !(t.from.is_some() && (t.spec.duration <= 0.0 || local >= t.spec.duration))
        });
        events
    }

    pub fn is_animating(&self, property: Property) -> bool {
        self.active.iter().any(|t| t.spec.property == property)
    }

    pub fn count(&self, property: Property) -> usize {
        self.active
            .iter()
            .filter(|t| t.spec.property == property)
            .count()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
