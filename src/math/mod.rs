//! Scene math: vectors, Euler angles and easing.
//!
//! Vectors, quaternions and matrices come from `glam`. This module adds the
//! few things the scene needs on top: scalar helpers, an unwrapped Euler
//! triple that interpolates angle by angle, and the easing curves.
//!
//! ## FMA
//! `lerp` is written as `fma(t, b - a, a)`: one rounding step instead of two,
//! which keeps a finished tween exactly on its target at `t = 1`.

pub mod easing;

pub use easing::Easing;
pub use glam::{EulerRot, Mat4, Quat, Vec3};

/// Fused Multiply-Add: a * b + c
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

/// Clamp a scene parameter to a finite, non-negative value.
///
/// NaN and negative inputs become `0.0`; `+inf` also becomes `0.0` because an
/// infinite radius cannot be sampled.
#[inline]
pub fn non_negative(x: f32) -> f32 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Distance from the vertical (Y) axis.
#[inline]
pub fn radial_distance(p: Vec3) -> f32 {
    fma(p.x, p.x, p.z * p.z).sqrt()
}

// ── Euler ──

/// XYZ Euler angles in radians.
///
/// Angles are never wrapped. Interpolating from `0` to `-12π` really spins
/// six times; that is what the tree spiral asks for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const IDENTITY: Euler = Euler::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, to: Euler, t: f32) -> Euler {
        Euler::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t), lerp(self.z, to.z, t))
    }

    /// Orientation for rendering, X then Y then Z intrinsic
    /// (`Rx · Ry · Rz`). Whole turns are lost here, which is fine once the
    /// angles have been interpolated.
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.x, self.y, self.z)
    }

    /// Largest per-axis difference, for approximate comparisons.
    pub fn max_abs_diff(self, other: Euler) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}
