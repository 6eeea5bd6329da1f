//! Easing curves for tweens.
//!
//! Every curve maps [0, 1] onto [0, 1], is monotonic and has no overshoot,
//! so a tween never leaves the segment between its start and target.
//! Inputs outside [0, 1] are clamped.

/// Cubic ease-out: fast start, slow finish
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Cubic ease-in-out
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quartic ease-out: snappier than cubic, long soft landing
#[inline]
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Quartic ease-in-out
#[inline]
pub fn ease_in_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        8.0 * t * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    #[default]
    CubicOut,
    CubicInOut,
    QuartOut,
    QuartInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicOut => ease_out_cubic(t),
            Easing::CubicInOut => ease_in_out_cubic(t),
            Easing::QuartOut => ease_out_quart(t),
            Easing::QuartInOut => ease_in_out_quart(t),
        }
    }
}
