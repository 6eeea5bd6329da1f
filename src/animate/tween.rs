//! One interpolation-in-progress record.
//!
//! A [`Tween`] remembers where it started, where it is going, when it
//! starts (after any delay), how long it runs and with which curve. Its value
//! at any time is a pure function of those fields, so evaluating it never
//! mutates anything.
//!
//! Times are `f64` seconds of scene time. Only the offset from `start` is
//! narrowed to `f32`, so a scene that has been open for days eases as
//! smoothly as a fresh one.
//!
//! Retargeting replaces the record in place, taking the new start value from
//! the old record sampled at the moment of replacement. There is never more
//! than one record per property, so two interpolations cannot fight.

use crate::math::{lerp, Easing, Euler, Vec3};
use crate::scene::TweenTiming;

/// Values a tween can interpolate.
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: f32, t: f32) -> f32 {
        lerp(self, to, t)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Vec3, t: f32) -> Vec3 {
        Vec3::lerp(self, to, t)
    }
}

impl Lerp for Euler {
    fn lerp(self, to: Euler, t: f32) -> Euler {
        Euler::lerp(self, to, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    /// Scene time at which motion begins (delay already applied)
    start: f64,
    duration: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// A tween that has already arrived at `value`.
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            start: f64::NEG_INFINITY,
            duration: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Value at scene time `now`.
    pub fn sample(&self, now: f64) -> T {
        if now <= self.start {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = (now - self.start) as f32 / self.duration;
        if t >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, self.easing.apply(t))
        }
    }

    /// Head for `to`, starting from wherever this tween is at `now`.
    pub fn retarget(&mut self, to: T, now: f64, delay: f32, timing: TweenTiming) {
        let current = self.sample(now);
        *self = Self {
            from: current,
            to,
            start: now + f64::from(delay.max(0.0)),
            duration: timing.duration.max(0.0),
            easing: timing.easing,
        };
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start + f64::from(self.duration)
    }
}
