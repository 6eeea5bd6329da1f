//! The star on top of the tree.
//!
//! Sits on the apex in tree mode. On explode it drifts up out of the cloud
//! and shrinks away; on collapse it comes back down and, after a beat,
//! regrows. Not selectable, no jitter.

use crate::animate::tween::Tween;
use crate::interaction::SceneMode;
use crate::math::{Easing, Vec3};
use crate::scene::TweenTiming;

const RISE: TweenTiming = TweenTiming::new(2.0, Easing::CubicInOut);
const SHRINK: TweenTiming = TweenTiming::new(1.0, Easing::CubicOut);
/// Height the star escapes to in galaxy mode
const ESCAPE_Y: f32 = 10.0;
/// Gap between the apex and the star
const APEX_GAP: f32 = 0.5;
/// Regrow waits for the tree to mostly re-form
const REGROW_DELAY: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct TopperAnimator {
    apex: Vec3,
    position: Tween<Vec3>,
    scale: Tween<f32>,
}

impl TopperAnimator {
    pub fn new(tree_height: f32, mode: SceneMode) -> Self {
        let apex = Vec3::new(0.0, tree_height * 0.5 + APEX_GAP, 0.0);
        let (pos, scale) = Self::target(apex, mode);
        Self {
            apex,
            position: Tween::settled(pos),
            scale: Tween::settled(scale),
        }
    }

    fn target(apex: Vec3, mode: SceneMode) -> (Vec3, f32) {
        match mode {
            SceneMode::Tree => (apex, 1.0),
            SceneMode::Galaxy => (Vec3::new(0.0, ESCAPE_Y, 0.0), 0.0),
        }
    }

    pub fn retarget(&mut self, mode: SceneMode, now: f64) {
        let (pos, scale) = Self::target(self.apex, mode);
        self.position.retarget(pos, now, 0.0, RISE);
        let delay = match mode {
            SceneMode::Tree => REGROW_DELAY,
            SceneMode::Galaxy => 0.0,
        };
        self.scale.retarget(scale, now, delay, SHRINK);
    }

    pub fn position(&self, now: f64) -> Vec3 {
        self.position.sample(now)
    }

    pub fn scale(&self, now: f64) -> f32 {
        self.scale.sample(now)
    }

    pub fn apex(&self) -> Vec3 {
        self.apex
    }
}
