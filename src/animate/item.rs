//! Item animator: tweens, start jitter and the idle bob.
//!
//! Target pose precedence for an item:
//! 1. galaxy mode and focused on this item → fixed focus pose (in front of
//!    the camera, identity rotation, enlarged)
//! 2. galaxy mode → the item's galaxy placement at rest scale
//! 3. tree mode → the item's tree placement at rest scale
//!
//! Position, rotation and scale each run their own [`Tween`]. On every
//! retrigger the item draws a fresh start delay in `[0, max_jitter)` so the
//! cloud does not move in lockstep; the delay is not stored anywhere else.
//!
//! Unfocused items in galaxy mode bob vertically:
//! `amplitude · sin(now · frequency + galaxy.x)`. The bob is scaled by its
//! own weight tween (0 ↔ 1), so it fades in once the item has arrived and
//! fades out when the item is focused or the tree re-forms. Because the bob
//! is a function of time rather than an accumulated offset, it leaves no
//! residue once its weight reaches zero.

use rand::Rng;

use crate::animate::tween::Tween;
use crate::interaction::{SceneMode, SceneState};
use crate::math::{Easing, Euler, Vec3};
use crate::scene::{AnimationConfig, ItemKind, PoseTimings, SceneItem, TweenTiming};

/// Position, rotation and uniform scale of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Euler,
    pub scale: f32,
}

impl Pose {
    /// Largest component-wise difference, for approximate comparisons.
    pub fn max_abs_diff(&self, other: &Pose) -> f32 {
        (self.position - other.position)
            .abs()
            .max_element()
            .max(self.rotation.max_abs_diff(other.rotation))
            .max((self.scale - other.scale).abs())
    }
}

/// Where `item` should come to rest for `state`.
pub fn target_pose(item: &SceneItem, state: &SceneState, anim: &AnimationConfig) -> Pose {
    if state.is_focused(&item.id) {
        return Pose {
            position: anim.focus_position,
            rotation: Euler::IDENTITY,
            scale: anim.focus_scale,
        };
    }
    let rest = item.resting(state.mode);
    Pose {
        position: rest.position,
        rotation: rest.rotation,
        scale: anim.rest_scale,
    }
}

/// Whether the idle bob should be running for `item` in `state`.
pub fn bobs(item: &SceneItem, state: &SceneState) -> bool {
    state.mode == SceneMode::Galaxy && !state.is_focused(&item.id)
}

#[derive(Debug, Clone)]
pub struct ItemAnimator {
    position: Tween<Vec3>,
    rotation: Tween<Euler>,
    scale: Tween<f32>,
    bob_weight: Tween<f32>,
    /// Phase offset of the bob, from the galaxy placement
    phase: f32,
}

impl ItemAnimator {
    /// Start at rest in the pose `state` calls for.
    pub fn new(item: &SceneItem, state: &SceneState, anim: &AnimationConfig) -> Self {
        let pose = target_pose(item, state, anim);
        Self {
            position: Tween::settled(pose.position),
            rotation: Tween::settled(pose.rotation),
            scale: Tween::settled(pose.scale),
            bob_weight: Tween::settled(if bobs(item, state) { 1.0 } else { 0.0 }),
            phase: item.galaxy.position.x,
        }
    }

    /// Head for the target `state` implies, from the pose at `now`.
    ///
    /// Returns the start delay that was drawn.
    pub fn retarget<R: Rng + ?Sized>(
        &mut self,
        item: &SceneItem,
        state: &SceneState,
        anim: &AnimationConfig,
        now: f64,
        rng: &mut R,
    ) -> f32 {
        let delay = if anim.max_jitter > 0.0 {
            rng.gen_range(0.0..anim.max_jitter)
        } else {
            0.0
        };
        let timings = timings_for(item, anim);
        let target = target_pose(item, state, anim);

        self.position.retarget(target.position, now, delay, timings.position);
        self.rotation.retarget(target.rotation, now, delay, timings.rotation);
        self.scale.retarget(target.scale, now, delay, timings.scale);

        let fade = TweenTiming::new(anim.bob_fade, Easing::CubicInOut);
        if bobs(item, state) {
            // Layer the bob on once the item has arrived.
            self.bob_weight.retarget(1.0, now, delay + timings.position.duration, fade);
        } else {
            self.bob_weight.retarget(0.0, now, delay, fade);
        }
        delay
    }

    /// Pose at scene time `now`, bob included.
    pub fn pose(&self, now: f64, anim: &AnimationConfig) -> Pose {
        let weight = self.bob_weight.sample(now);
        let mut position = self.position.sample(now);
        if weight > 0.0 {
            position += Vec3::Y * (weight * bob_offset(now, self.phase, anim));
        }
        Pose {
            position,
            rotation: self.rotation.sample(now),
            scale: self.scale.sample(now),
        }
    }

    /// Pose without the idle bob; the settled target once all tweens finish.
    pub fn base_pose(&self, now: f64) -> Pose {
        Pose {
            position: self.position.sample(now),
            rotation: self.rotation.sample(now),
            scale: self.scale.sample(now),
        }
    }

    /// All tweens, the bob fade included, have finished.
    pub fn is_settled(&self, now: f64) -> bool {
        self.position.is_finished(now)
            && self.rotation.is_finished(now)
            && self.scale.is_finished(now)
            && self.bob_weight.is_finished(now)
    }

    pub fn bob_weight(&self, now: f64) -> f32 {
        self.bob_weight.sample(now)
    }
}

fn timings_for(item: &SceneItem, anim: &AnimationConfig) -> PoseTimings {
    match item.kind {
        ItemKind::Photo(_) => anim.photo,
        ItemKind::Decoration(_) => anim.decoration,
    }
}

/// The phase is taken in `f64` so the bob stays smooth however long the
/// scene has been running.
fn bob_offset(now: f64, phase: f32, anim: &AnimationConfig) -> f32 {
    let angle = now * f64::from(anim.bob_frequency) + f64::from(phase);
    anim.bob_amplitude * angle.sin() as f32
}
