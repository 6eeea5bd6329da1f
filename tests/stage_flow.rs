//! End-to-end flows through `Stage`: explode, focus, refocus, collapse,
//! with poses checked along the way.

use galaxy_tree::animate::Pose;
use galaxy_tree::interaction::{SceneEvent, SceneMode, TogglePolicy};
use galaxy_tree::math::Vec3;
use galaxy_tree::scene::{ItemId, SceneConfig};
use galaxy_tree::Stage;

const FRAME: f32 = 1.0 / 60.0;

fn stage(config: SceneConfig) -> Stage {
    Stage::seeded(config.with_decoration_count(12), 2024)
}

fn run(stage: &mut Stage, seconds: f32) {
    for _ in 0..(seconds / FRAME).ceil() as usize {
        stage.tick(FRAME);
    }
}

fn pose_of(stage: &Stage, id: &str) -> Pose {
    let index = stage
        .scene()
        .items()
        .iter()
        .position(|it| it.id.as_str() == id)
        .expect("item exists");
    stage.poses()[index]
}

/// Expected bob offset at the current stage time for a given phase.
fn bob(stage: &Stage, phase: f32) -> f32 {
    let anim = &stage.scene().config().animation;
    let angle = stage.now() * f64::from(anim.bob_frequency) + f64::from(phase);
    anim.bob_amplitude * angle.sin() as f32
}

fn max_jump(before: &[Pose], after: &[Pose]) -> f32 {
    before
        .iter()
        .zip(after)
        .map(|(a, b)| a.max_abs_diff(b))
        .fold(0.0, f32::max)
}

#[test]
fn full_cycle_explode_focus_refocus_collapse() {
    let mut s = stage(SceneConfig::default());
    let focus = s.scene().config().animation.focus_position;
    let focus_scale = s.scene().config().animation.focus_scale;

    assert!(s.handle(SceneEvent::ExplodeRequested));
    run(&mut s, 3.0);
    assert_eq!(s.mode(), SceneMode::Galaxy);

    assert!(s.handle(SceneEvent::ItemSelected(ItemId::from("photo-3"))));
    run(&mut s, 3.0);
    let p3 = pose_of(&s, "photo-3");
    assert!(p3.position.distance(focus) < 1e-4, "photo-3 at {:?}", p3.position);
    assert!((p3.scale - focus_scale).abs() < 1e-5);

    // Straight to another photo; the first one goes home.
    assert!(s.handle(SceneEvent::ItemSelected(ItemId::from("photo-7"))));
    assert_eq!(s.state().focused, Some(ItemId::from("photo-7")));
    run(&mut s, 3.0);
    assert!(pose_of(&s, "photo-7").position.distance(focus) < 1e-4);
    let home = s.scene().get(&ItemId::from("photo-3")).unwrap().galaxy;
    let p3 = pose_of(&s, "photo-3");
    assert!((p3.position.x - home.position.x).abs() < 1e-4);
    assert!((p3.position.z - home.position.z).abs() < 1e-4);
    let dy = p3.position.y - home.position.y;
    let expected = bob(&s, home.position.x);
    assert!((dy - expected).abs() < 1e-4, "photo-3 bob {} vs {}", dy, expected);
    assert!(p3.rotation.max_abs_diff(home.rotation) < 1e-5);
    assert_eq!(p3.scale, s.scene().config().animation.rest_scale);

    assert!(s.handle(SceneEvent::CollapseRequested));
    assert_eq!(s.state().focused, None);
    run(&mut s, 3.0);
    for (item, pose) in s.scene().items().iter().zip(s.poses()) {
        assert!(
            pose.position.distance(item.tree.position) < 1e-4,
            "{} did not return to the tree",
            item.id
        );
        assert!(pose.rotation.max_abs_diff(item.tree.rotation) < 1e-4);
        assert!((pose.scale - 1.0).abs() < 1e-5);
    }
}

#[test]
fn retrigger_mid_flight_is_continuous() {
    let mut s = stage(SceneConfig::default());
    s.handle(SceneEvent::ExplodeRequested);
    run(&mut s, 0.8);

    let before = s.poses();
    assert!(s.handle(SceneEvent::CollapseRequested));
    let after = s.poses();
    assert!(max_jump(&before, &after) < 1e-4, "jump = {}", max_jump(&before, &after));

    // And again, the other way, a few frames later.
    run(&mut s, 0.1);
    let before = s.poses();
    assert!(s.handle(SceneEvent::ExplodeRequested));
    assert!(max_jump(&before, &s.poses()) < 1e-4);
}

#[test]
fn focus_while_bobbing_is_continuous() {
    let mut s = stage(SceneConfig::default());
    s.handle(SceneEvent::ExplodeRequested);
    run(&mut s, 3.0);

    let before = s.poses();
    s.handle(SceneEvent::ItemSelected(ItemId::from("photo-1")));
    assert!(max_jump(&before, &s.poses()) < 1e-4);
}

#[test]
fn unfocused_items_bob_around_their_galaxy_pose() {
    let mut s = stage(SceneConfig::default());
    s.handle(SceneEvent::ExplodeRequested);
    run(&mut s, 3.0);

    for (item, pose) in s.scene().items().iter().zip(s.poses()) {
        let g = item.galaxy.position;
        let expected = bob(&s, g.x);
        assert!((pose.position.x - g.x).abs() < 1e-4);
        assert!(
            (pose.position.y - g.y - expected).abs() < 1e-3,
            "{}: bob {} vs {}",
            item.id,
            pose.position.y - g.y,
            expected
        );
    }
}

#[test]
fn bob_leaves_no_residue_after_focus() {
    let mut s = stage(SceneConfig::default());
    let focus = s.scene().config().animation.focus_position;
    s.handle(SceneEvent::ExplodeRequested);
    run(&mut s, 3.0);
    s.handle(SceneEvent::ItemSelected(ItemId::from("photo-0")));

    // Sample across several bob periods: the focused photo stays put.
    run(&mut s, 3.0);
    for _ in 0..5 {
        assert!(pose_of(&s, "photo-0").position.distance(focus) < 1e-4);
        run(&mut s, 1.3);
    }
}

#[test]
fn explode_twice_is_a_no_op() {
    let mut s = stage(SceneConfig::default());
    assert!(s.handle(SceneEvent::ExplodeRequested));
    run(&mut s, 3.0);
    s.handle(SceneEvent::ItemSelected(ItemId::from("photo-2")));
    run(&mut s, 3.0);

    assert!(!s.handle(SceneEvent::ExplodeRequested));
    assert_eq!(s.mode(), SceneMode::Galaxy);
    assert_eq!(s.state().focused, Some(ItemId::from("photo-2")));
    assert!(s.is_settled());
}

#[test]
fn unknown_and_decoration_ids_do_nothing() {
    let mut s = stage(SceneConfig::default());
    s.handle(SceneEvent::ExplodeRequested);
    assert!(!s.handle(SceneEvent::ItemSelected(ItemId::from("photo-999"))));
    assert!(!s.handle(SceneEvent::ItemSelected(ItemId::from("deco-0"))));
    assert_eq!(s.state().focused, None);
}

#[test]
fn single_toggle_policy_flips_on_any_double_click() {
    let mut s = stage(SceneConfig::default().with_toggle_policy(TogglePolicy::SingleToggle));
    assert!(s.handle(SceneEvent::ExplodeRequested));
    assert!(s.handle(SceneEvent::ExplodeRequested));
    assert_eq!(s.mode(), SceneMode::Tree);
    assert!(s.handle(SceneEvent::CollapseRequested));
    assert_eq!(s.mode(), SceneMode::Galaxy);
}

#[test]
fn star_leaves_and_returns_with_the_tree() {
    let mut s = stage(SceneConfig::default());
    let apex = s.topper().apex();
    s.handle(SceneEvent::ExplodeRequested);
    run(&mut s, 3.0);
    assert_eq!(s.topper().scale(s.now()), 0.0);

    s.handle(SceneEvent::CollapseRequested);
    run(&mut s, 3.0);
    assert_eq!(s.topper().scale(s.now()), 1.0);
    assert!(s.topper().position(s.now()).distance(apex) < 1e-5);
}

#[test]
fn empty_scene_still_runs() {
    let cfg = SceneConfig::default().with_photos(Vec::<String>::new());
    let mut s = Stage::seeded(cfg.with_decoration_count(0), 1);
    assert!(s.handle(SceneEvent::ExplodeRequested));
    run(&mut s, 2.5);
    assert!(s.poses().is_empty());
    assert_eq!(s.topper().position(s.now()), Vec3::new(0.0, 10.0, 0.0));
}
