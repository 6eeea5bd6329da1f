//! Stage — the scene, its state machine and its animators behind one clock.
//!
//! A viewer owns exactly one `Stage` and drives it with:
//! - `tick(dt)` once per frame
//! - `click(...)` for primary clicks, already converted to NDC
//! - `handle(event)` for events that do not come from the pointer
//!
//! Every accepted event retargets the animators at the current stage time,
//! so a retrigger mid-flight starts from wherever the items are right now.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animate::{Pose, SceneAnimator, TopperAnimator};
use crate::camera::CameraRig;
use crate::interaction::{
    ClickRecognizer, InteractionMachine, PickTarget, SceneEvent, SceneMode, SceneState,
};
use crate::scene::{Scene, SceneConfig};

/// Longest frame step accepted by `tick`, seconds
const MAX_TICK: f32 = 0.25;

pub struct Stage {
    scene: Scene,
    machine: InteractionMachine,
    animator: SceneAnimator,
    clicks: ClickRecognizer,
    camera: CameraRig,
    /// Scene time in seconds
    clock: f64,
    rng: StdRng,
}

impl Stage {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic layout and jitter.
    pub fn seeded(config: SceneConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: SceneConfig, mut rng: StdRng) -> Self {
        let scene = Scene::build(config, &mut rng);
        let machine = InteractionMachine::new(scene.config().toggle_policy, scene.selectable_ids().cloned());
        let animator = SceneAnimator::new(&scene, &machine);
        Self {
            scene,
            machine,
            animator,
            clicks: ClickRecognizer::default(),
            camera: CameraRig::default(),
            clock: 0.0,
            rng,
        }
    }

    /// Advance the clock. Negative or non-finite steps are ignored; long
    /// stalls are capped so a resumed window does not skip whole transitions.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(MAX_TICK);
        self.clock += f64::from(dt);
        self.camera.advance(dt, self.machine.state());
    }

    /// Apply an event now. Returns `true` if the state changed.
    pub fn handle(&mut self, event: SceneEvent) -> bool {
        if !self.machine.handle(event) {
            return false;
        }
        self.animator.sync(&self.scene, &self.machine, self.clock, &mut self.rng);
        true
    }

    /// What a click at `ndc` would land on, against the current poses.
    pub fn pick(&self, ndc: [f32; 2], aspect: f32) -> PickTarget {
        let poses = self.poses();
        let tree = (self.mode() == SceneMode::Tree).then(|| self.scene.decoration_cone());
        self.camera
            .pick(self.scene.items().iter().zip(poses), tree, ndc, aspect)
    }

    /// Feed one primary click. `screen` is in pixels (for double-click
    /// travel), `ndc` in normalized device coordinates (for picking).
    ///
    /// Returns the events the click produced, in the order they were
    /// applied, whether or not they changed anything.
    pub fn click(&mut self, screen: [f32; 2], ndc: [f32; 2], aspect: f32) -> Vec<SceneEvent> {
        let target = self.pick(ndc, aspect);
        let gesture = self.clicks.click(screen[0], screen[1], self.clock, target);
        let events = gesture.events();
        if !events.is_empty() {
            log::debug!("{:?} -> {:?}", gesture, events);
        }
        for event in &events {
            self.handle(event.clone());
        }
        events
    }

    /// Mouse wheel zoom, honored only in tree mode.
    pub fn zoom(&mut self, factor: f32) -> bool {
        self.camera.zoom(factor, self.machine.state())
    }

    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.clicks.reset();
        self.camera.orbit(d_azimuth, d_elevation);
    }

    /// Poses of all items at the current time, in scene order.
    pub fn poses(&self) -> Vec<Pose> {
        self.animator.poses(&self.scene, self.clock)
    }

    pub fn now(&self) -> f64 {
        self.clock
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn state(&self) -> &SceneState {
        self.machine.state()
    }

    pub fn mode(&self) -> SceneMode {
        self.machine.mode()
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn topper(&self) -> &TopperAnimator {
        self.animator.topper()
    }

    pub fn animator(&self) -> &SceneAnimator {
        &self.animator
    }

    pub fn is_settled(&self) -> bool {
        self.animator.is_settled(self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ItemId;

    fn stage() -> Stage {
        Stage::seeded(SceneConfig::default().with_decoration_count(8), 3)
    }

    fn run(stage: &mut Stage, seconds: f32) {
        let steps = (seconds * 60.0).ceil() as usize;
        for _ in 0..steps {
            stage.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn tick_ignores_bad_steps_and_caps_stalls() {
        let mut s = stage();
        s.tick(-1.0);
        s.tick(f32::NAN);
        assert_eq!(s.now(), 0.0);
        s.tick(10.0);
        assert_eq!(s.now(), f64::from(MAX_TICK));
    }

    #[test]
    fn explode_then_settle_in_galaxy() {
        let mut s = stage();
        assert!(s.handle(SceneEvent::ExplodeRequested));
        assert!(!s.is_settled());
        run(&mut s, 3.0);
        assert!(s.is_settled());
        let base: Vec<_> = (0..s.scene().len())
            .map(|i| s.animator().item(i).unwrap().base_pose(s.now()))
            .collect();
        for (item, pose) in s.scene().items().iter().zip(base) {
            assert!(pose.position.distance(item.galaxy.position) < 1e-4);
        }
    }

    #[test]
    fn rejected_event_does_not_retarget() {
        let mut s = stage();
        assert!(!s.handle(SceneEvent::CollapseRequested));
        assert!(!s.handle(SceneEvent::ItemSelected(ItemId::from("photo-0"))));
        assert!(s.is_settled());
    }

    #[test]
    fn double_click_on_tree_explodes() {
        // Bare tree, so the click can only land on the cone silhouette.
        let cfg = SceneConfig::default()
            .with_photos(Vec::<String>::new())
            .with_decoration_count(0);
        let mut s = Stage::seeded(cfg, 3);
        let center = [0.0, -0.1];
        assert_eq!(s.pick(center, 1.0), PickTarget::TreeBody);
        assert!(s.click([400.0, 300.0], center, 1.0).is_empty());
        s.tick(0.1);
        assert_eq!(s.click([402.0, 301.0], center, 1.0), vec![SceneEvent::ExplodeRequested]);
        assert_eq!(s.mode(), SceneMode::Galaxy);
    }

    #[test]
    fn double_click_on_photo_keeps_focus_in_galaxy() {
        let mut s = stage();
        s.handle(SceneEvent::ExplodeRequested);
        run(&mut s, 3.0);
        assert!(s.handle(SceneEvent::ItemSelected(ItemId::from("photo-5"))));
        run(&mut s, 3.0);

        // The focused photo sits dead ahead of the camera.
        let center = s.camera().project(s.scene().config().animation.focus_position, 1.0).unwrap().ndc;
        let target = PickTarget::Item(ItemId::from("photo-5"));
        assert_eq!(s.pick(center, 1.0), target);

        let first = s.click([400.0, 300.0], center, 1.0);
        assert_eq!(first, vec![SceneEvent::ItemSelected(ItemId::from("photo-5"))]);
        assert_eq!(s.state().focused, None);
        // Second click in the same frame, so nothing has moved yet.
        let second = s.click([401.0, 300.0], center, 1.0);
        assert_eq!(
            second,
            vec![SceneEvent::ItemSelected(ItemId::from("photo-5")), SceneEvent::ExplodeRequested]
        );
        assert_eq!(s.mode(), SceneMode::Galaxy);
        assert_eq!(s.state().focused, Some(ItemId::from("photo-5")));
    }

    #[test]
    fn keeps_animating_after_days_of_uptime() {
        let mut s = stage();
        s.clock = 530_000.0;
        run(&mut s, 10.0);
        assert!(s.now() > 530_009.9, "clock stalled at {}", s.now());

        assert!(s.handle(SceneEvent::ExplodeRequested));
        run(&mut s, 1.0);
        assert!(!s.is_settled());
        run(&mut s, 2.0);
        assert!(s.is_settled());
        for (i, item) in s.scene().items().iter().enumerate() {
            let base = s.animator().item(i).unwrap().base_pose(s.now());
            assert_eq!(base.position, item.galaxy.position);
        }
    }

    #[test]
    fn zoom_is_gated_by_mode() {
        let mut s = stage();
        assert!(s.zoom(0.8));
        s.handle(SceneEvent::ExplodeRequested);
        assert!(!s.zoom(0.8));
    }
}
