//! Tree and galaxy placements.
//!
//! Pure functions: each takes a count, a shape and (where needed) a random
//! source, and returns one [`Placement`] per item. They are called exactly
//! once per item kind when a scene is built; nothing here is stateful.
//!
//! - **Spiral tree**: item `i` of `N` sits at height `t = i/N`, angle
//!   `t · turns · 2π`, radius shrinking linearly to the apex.
//! - **Volumetric tree**: random height, random angle, radius scaled by
//!   `sqrt(u)` so each height slice is filled uniformly per unit area.
//! - **Galaxy**: uniform by volume inside a sphere; `acos(2v - 1)` for the
//!   polar angle (no pole clustering), `cbrt(u)` for the radius (no centre
//!   clustering).
//!
//! Every tree point lies inside the cone described by [`Cone`], centred
//! vertically on the origin. Zero radius or height yields degenerate but
//! finite layouts.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use crate::math::{non_negative, radial_distance, Euler, Vec3};
use crate::scene::config::TreeVariant;

/// A resting position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub position: Vec3,
    pub rotation: Euler,
}

/// Upright cone with its base at `-height/2` and apex at `+height/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub base_radius: f32,
    pub height: f32,
}

impl Cone {
    /// Negative or non-finite dimensions collapse to zero.
    pub fn new(base_radius: f32, height: f32) -> Self {
        Self {
            base_radius: non_negative(base_radius),
            height: non_negative(height),
        }
    }

    /// Allowed distance from the axis at height `y`.
    ///
    /// A flat cone (`height == 0`) is a disk of `base_radius`.
    pub fn radius_at(&self, y: f32) -> f32 {
        if self.height <= 0.0 {
            return self.base_radius;
        }
        let ratio = ((self.height * 0.5 - y) / self.height).clamp(0.0, 1.0);
        self.base_radius * ratio
    }

    /// Containment test with an absolute tolerance for rounding.
    pub fn contains(&self, p: Vec3, eps: f32) -> bool {
        let half = self.height * 0.5;
        p.y >= -half - eps && p.y <= half + eps && radial_distance(p) <= self.radius_at(p.y) + eps
    }
}

// ── Tree ──

/// Conical spiral from the base (`i = 0`) toward the apex.
///
/// Rotation is `(0, -angle, 0)` so each item's face follows the spiral.
///
/// Consecutive items are `turns / count` turns apart. When that is a whole
/// number (12 photos on 12 turns, the default) every item lands on the same
/// meridian and the spiral reads as a vertical line of photos; pick a
/// fractional ratio for an even spread.
pub fn spiral_tree(count: usize, cone: Cone, turns: f32) -> Vec<Placement> {
    let turns = non_negative(turns);
    let inv_n = if count > 0 { 1.0 / count as f32 } else { 0.0 };

    (0..count)
        .map(|i| {
            let t = i as f32 * inv_n;
            let angle = t * turns * TAU;
            let radius = cone.base_radius * (1.0 - t);
            let y = t * cone.height - cone.height * 0.5;
            Placement {
                position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                rotation: Euler::new(0.0, -angle, 0.0),
            }
        })
        .collect()
}

/// Random fill of the cone volume.
pub fn volumetric_tree<R: Rng + ?Sized>(count: usize, cone: Cone, rng: &mut R) -> Vec<Placement> {
    (0..count)
        .map(|_| {
            let h = rng.gen::<f32>() * cone.height;
            let ratio = if cone.height > 0.0 {
                (cone.height - h) / cone.height
            } else {
                1.0
            };
            let radius = ratio * cone.base_radius * rng.gen::<f32>().sqrt();
            let angle = rng.gen::<f32>() * TAU;
            Placement {
                position: Vec3::new(angle.cos() * radius, h - cone.height * 0.5, angle.sin() * radius),
                rotation: Euler::new(rng.gen::<f32>() * TAU, rng.gen::<f32>() * TAU, rng.gen::<f32>() * TAU),
            }
        })
        .collect()
}

/// Dispatch on the configured variant.
pub fn tree_placements<R: Rng + ?Sized>(
    variant: TreeVariant,
    count: usize,
    cone: Cone,
    turns: f32,
    rng: &mut R,
) -> Vec<Placement> {
    match variant {
        TreeVariant::Spiral => spiral_tree(count, cone, turns),
        TreeVariant::Volumetric => volumetric_tree(count, cone, rng),
    }
}

// ── Galaxy ──

/// Uniform random point inside a sphere of `radius` around the origin.
pub fn galaxy_point<R: Rng + ?Sized>(radius: f32, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = non_negative(radius) * rng.gen::<f32>().cbrt();
    let sin_phi = phi.sin();
    Vec3::new(
        r * sin_phi * theta.cos(),
        r * sin_phi * theta.sin(),
        r * phi.cos(),
    )
}

/// Resting orientation in galaxy mode: tumbled about X and Y, no roll.
pub fn galaxy_rotation<R: Rng + ?Sized>(rng: &mut R) -> Euler {
    Euler::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, 0.0)
}

pub fn galaxy_placements<R: Rng + ?Sized>(count: usize, radius: f32, rng: &mut R) -> Vec<Placement> {
    (0..count)
        .map(|_| Placement {
            position: galaxy_point(radius, rng),
            rotation: galaxy_rotation(rng),
        })
        .collect()
}
