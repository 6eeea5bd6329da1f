//! Scene animator: one [`ItemAnimator`] per scene item plus the star.
//!
//! `SceneAnimator::sync` is called once per frame with the interaction
//! machine. When the machine's revision has moved since the last sync,
//! every item is retargeted from its current pose; otherwise nothing is
//! touched. Poses are then read with `poses(scene, now)`, which is pure.
//!
//! Animators never share state: each owns only its own tweens, and all
//! of them read the same `(mode, focused)` tuple.

pub mod item;
pub mod topper;
pub mod tween;

use rand::Rng;

pub use item::{target_pose, ItemAnimator, Pose};
pub use topper::TopperAnimator;
pub use tween::{Lerp, Tween};

use crate::interaction::InteractionMachine;
use crate::scene::Scene;

#[derive(Debug, Clone)]
pub struct SceneAnimator {
    items: Vec<ItemAnimator>,
    topper: TopperAnimator,
    revision: u64,
}

impl SceneAnimator {
    /// Everything starts at rest in the machine's current state.
    pub fn new(scene: &Scene, machine: &InteractionMachine) -> Self {
        let anim = &scene.config().animation;
        Self {
            items: scene
                .items()
                .iter()
                .map(|it| ItemAnimator::new(it, machine.state(), anim))
                .collect(),
            topper: TopperAnimator::new(scene.config().tree_height, machine.mode()),
            revision: machine.revision(),
        }
    }

    /// Retarget every item if the machine changed. Returns `true` if it did.
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        scene: &Scene,
        machine: &InteractionMachine,
        now: f64,
        rng: &mut R,
    ) -> bool {
        if machine.revision() == self.revision {
            return false;
        }
        self.revision = machine.revision();

        let anim = &scene.config().animation;
        for (animator, item) in self.items.iter_mut().zip(scene.items()) {
            animator.retarget(item, machine.state(), anim, now, rng);
        }
        self.topper.retarget(machine.mode(), now);
        log::debug!("retargeted {} items at t={:.3}", self.items.len(), now);
        true
    }

    /// Poses of all items, in scene order.
    pub fn poses(&self, scene: &Scene, now: f64) -> Vec<Pose> {
        let anim = &scene.config().animation;
        self.items.iter().map(|a| a.pose(now, anim)).collect()
    }

    pub fn item(&self, index: usize) -> Option<&ItemAnimator> {
        self.items.get(index)
    }

    pub fn topper(&self) -> &TopperAnimator {
        &self.topper
    }

    /// No tween anywhere is still running.
    pub fn is_settled(&self, now: f64) -> bool {
        self.items.iter().all(|a| a.is_settled(now))
    }
}
