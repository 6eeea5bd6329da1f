//! Orbit camera rig: mode-gated controls, projection, and click picking.
//!
//! The rig orbits `target` at (`azimuth`, `elevation`, `distance`). What the
//! user may do with it depends on the scene state:
//! - auto-rotate only around an idle tree (tree mode, nothing focused)
//! - zoom only in tree mode
//! - no panning, ever
//! - elevation clamped so the tree is never seen straight from above or below
//!
//! While a photo is focused the rig swings back to its home heading, so the
//! fixed focus position really is in front of the lens.
//!
//! Projection is `glam`'s right-handed look-at and perspective pair; NDC `y`
//! points up. Picking compares clicks in aspect-corrected NDC.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use crate::animate::Pose;
use crate::interaction::{PickTarget, SceneState};
use crate::math::{Mat4, Vec3};
use crate::scene::{Cone, ItemKind, SceneItem};

/// Radians per second of auto-rotation (one orbit every two minutes)
const AUTO_ROTATE_SPEED: f32 = TAU / 120.0;
/// Lowest and highest elevation, from the polar range [π/3, π/1.8]
const MIN_ELEVATION: f32 = FRAC_PI_2 - std::f32::consts::PI / 1.8;
const MAX_ELEVATION: f32 = FRAC_PI_2 - FRAC_PI_3;
const MIN_DISTANCE: f32 = 6.0;
const MAX_DISTANCE: f32 = 30.0;
/// How quickly the heading returns home while focused (1/s)
const HOMING_RATE: f32 = 4.0;
const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 200.0;
/// Half the size of a photo frame, world units at scale 1
const PICK_HALF_EXTENT: f32 = 0.7;

/// Camera orbit parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Horizontal orbit angle in radians (0 = looking down -Z from +Z)
    pub azimuth: f32,
    /// Vertical orbit angle in radians (positive = looking down)
    pub elevation: f32,
    /// Distance from the camera to the target point
    pub distance: f32,
    pub target: Vec3,
    /// Vertical field of view, radians
    pub fov_y: f32,
}

impl Default for CameraRig {
    /// Camera at (0, 2, 14) looking at the origin, 45° FOV.
    fn default() -> Self {
        Self {
            azimuth: 0.0,
            elevation: (2.0f32).atan2(14.0),
            distance: (2.0f32 * 2.0 + 14.0 * 14.0).sqrt(),
            target: Vec3::ZERO,
            fov_y: 45f32.to_radians(),
        }
    }
}

/// A world point on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub ndc: [f32; 2],
    /// Distance along the view axis
    pub depth: f32,
    /// NDC-y units per world unit at this depth
    pub scale: f32,
}

impl CameraRig {
    pub fn eye(&self) -> Vec3 {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        self.target + Vec3::new(sa * ce, se, ca * ce) * self.distance
    }

    /// Per-frame update: auto-rotation and focus homing.
    pub fn advance(&mut self, dt: f32, state: &SceneState) {
        if dt <= 0.0 {
            return;
        }
        if state.auto_rotate() {
            self.azimuth += AUTO_ROTATE_SPEED * dt;
        }
        if state.focused.is_some() {
            let home = (self.azimuth / TAU).round() * TAU;
            self.azimuth += (home - self.azimuth) * (1.0 - (-HOMING_RATE * dt).exp());
        }
    }

    /// User drag. Always allowed; elevation is clamped.
    pub fn orbit(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth += d_azimuth;
        self.elevation = (self.elevation + d_elevation).clamp(MIN_ELEVATION, MAX_ELEVATION);
    }

    /// Scale the orbit distance. Ignored (returns `false`) outside tree mode.
    pub fn zoom(&mut self, factor: f32, state: &SceneState) -> bool {
        if !state.zoom_enabled() || !factor.is_finite() || factor <= 0.0 {
            return false;
        }
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
        true
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(self.fov_y, aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Project a world point; `None` when it is behind the near plane.
    pub fn project(&self, p: Vec3, aspect: f32) -> Option<Projected> {
        let view = self.view().transform_point3(p);
        let depth = -view.z;
        if depth < NEAR_PLANE {
            return None;
        }
        let proj = self.projection(aspect);
        let clip = proj * view.extend(1.0);
        Some(Projected {
            ndc: [clip.x / clip.w, clip.y / clip.w],
            depth,
            scale: proj.y_axis.y / depth,
        })
    }

    /// Resolve what a click at `click_ndc` lands on.
    ///
    /// The front-most item whose projected footprint contains the click
    /// wins: a photo yields `Item`, an ornament counts as part of the tree.
    /// With no item hit, `tree` (pass it only in tree mode) is tested
    /// against the projected cone silhouette.
    pub fn pick<'a, I>(&self, items: I, tree: Option<Cone>, click_ndc: [f32; 2], aspect: f32) -> PickTarget
    where
        I: IntoIterator<Item = (&'a SceneItem, Pose)>,
    {
        let aspect = if aspect > 0.0 { aspect } else { 1.0 };
        let mut best: Option<(&SceneItem, f32)> = None;

        for (item, pose) in items {
            let Some(proj) = self.project(pose.position, aspect) else {
                continue;
            };
            let dx = (proj.ndc[0] - click_ndc[0]) * aspect;
            let dy = proj.ndc[1] - click_ndc[1];
            let r = PICK_HALF_EXTENT * pose.scale * proj.scale;
            if dx * dx + dy * dy <= r * r && best.map_or(true, |(_, d)| proj.depth < d) {
                best = Some((item, proj.depth));
            }
        }

        match best {
            Some((item, _)) => match item.kind {
                ItemKind::Photo(_) => PickTarget::Item(item.id.clone()),
                ItemKind::Decoration(_) => PickTarget::TreeBody,
            },
            None if tree.map_or(false, |cone| self.hits_cone(cone, click_ndc, aspect)) => PickTarget::TreeBody,
            None => PickTarget::Background,
        }
    }

    fn hits_cone(&self, cone: Cone, click: [f32; 2], aspect: f32) -> bool {
        let right = (self.target - self.eye()).cross(Vec3::Y).normalize_or_zero();
        let half = cone.height * 0.5;
        let base = Vec3::new(0.0, -half, 0.0);
        let corners = [
            Vec3::new(0.0, half, 0.0),
            base - right * cone.base_radius,
            base + right * cone.base_radius,
        ];
        let mut pts = [[0.0f32; 2]; 3];
        for (dst, c) in pts.iter_mut().zip(corners) {
            match self.project(c, aspect) {
                Some(p) => *dst = [p.ndc[0] * aspect, p.ndc[1]],
                None => return false,
            }
        }
        point_in_triangle([click[0] * aspect, click[1]], pts)
    }
}

fn point_in_triangle(p: [f32; 2], t: [[f32; 2]; 3]) -> bool {
    let edge = |a: [f32; 2], b: [f32; 2]| (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0]);
    let d0 = edge(t[0], t[1]);
    let d1 = edge(t[1], t[2]);
    let d2 = edge(t[2], t[0]);
    let has_neg = d0 < 0.0 || d1 < 0.0 || d2 < 0.0;
    let has_pos = d0 > 0.0 || d1 > 0.0 || d2 > 0.0;
    !(has_neg && has_pos)
}
