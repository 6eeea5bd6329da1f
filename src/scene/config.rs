//! Scene construction parameters.
//!
//! Static inputs to the layout generator and the animators, supplied once
//! when a scene is built. Consumers call [`SceneConfig::sanitized`] before
//! reading any field: negative or non-finite sizes become zero, the shape
//! split is clamped into [0, 1], and every correction is logged.

use crate::interaction::TogglePolicy;
use crate::math::{non_negative, Easing, Vec3};
use crate::scene::item::ColorTag;

/// How the tree cone is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeVariant {
    /// Conical spiral, bottom to top, radius shrinking linearly.
    #[default]
    Spiral,
    /// Uniform-per-area random fill of the cone volume.
    Volumetric,
}

/// Duration and curve of one animated property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenTiming {
    /// Seconds; `0.0` snaps on the first frame after the start delay
    pub duration: f32,
    pub easing: Easing,
}

impl TweenTiming {
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Per-property timings for one item kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTimings {
    pub position: TweenTiming,
    pub rotation: TweenTiming,
    pub scale: TweenTiming,
}

/// Transition animator parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub photo: PoseTimings,
    pub decoration: PoseTimings,
    /// Upper bound (exclusive) of the per-item start delay, seconds
    pub max_jitter: f32,
    /// Where a focused photo comes to rest, in front of the home camera
    pub focus_position: Vec3,
    pub focus_scale: f32,
    pub rest_scale: f32,
    /// Peak vertical displacement of the galaxy idle bob
    pub bob_amplitude: f32,
    /// Angular frequency of the bob (rad/s)
    pub bob_frequency: f32,
    /// Seconds for the bob to fade in or out
    pub bob_fade: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            photo: PoseTimings {
                position: TweenTiming::new(1.5, Easing::QuartInOut),
                rotation: TweenTiming::new(1.5, Easing::QuartInOut),
                scale: TweenTiming::new(1.0, Easing::QuartOut),
            },
            decoration: PoseTimings {
                position: TweenTiming::new(1.5, Easing::CubicOut),
                rotation: TweenTiming::new(1.5, Easing::CubicInOut),
                scale: TweenTiming::new(1.0, Easing::CubicOut),
            },
            max_jitter: 0.3,
            focus_position: Vec3::new(0.0, 0.0, 4.0),
            focus_scale: 1.5,
            rest_scale: 1.0,
            bob_amplitude: 0.12,
            bob_frequency: 1.0,
            bob_fade: 0.6,
        }
    }
}

const DEFAULT_PHOTO_IDS: [u32; 12] = [
    1015, 1018, 1025, 1036, 1040, 1050, 1060, 1070, 1080, 110, 120, 130,
];

/// Configuration for building a scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Image handles (URL or path); one photo per entry
    pub photo_refs: Vec<String>,
    pub decoration_count: usize,
    pub tree_height: f32,
    /// Base radius of the photo cone
    pub tree_radius: f32,
    /// Decorations use a cone this much wider than photos
    pub decoration_radius_scale: f32,
    pub photo_galaxy_radius: f32,
    pub decoration_galaxy_radius: f32,
    /// Full turns of the spiral from base to apex. With a whole number of
    /// turns per item the items line up on one meridian (see
    /// [`crate::scene::layout::spiral_tree`])
    pub spiral_turns: f32,
    pub photo_tree_variant: TreeVariant,
    pub decoration_tree_variant: TreeVariant,
    pub palette: Vec<ColorTag>,
    /// Probability that a decoration is a sphere rather than a polyhedron
    pub sphere_probability: f32,
    pub toggle_policy: TogglePolicy,
    pub animation: AnimationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            photo_refs: DEFAULT_PHOTO_IDS
                .iter()
                .map(|id| format!("https://picsum.photos/id/{}/300/300", id))
                .collect(),
            decoration_count: 40,
            tree_height: 12.0,
            tree_radius: 3.5,
            decoration_radius_scale: 1.2,
            photo_galaxy_radius: 10.0,
            decoration_galaxy_radius: 15.0,
            spiral_turns: 12.0,
            photo_tree_variant: TreeVariant::Spiral,
            decoration_tree_variant: TreeVariant::Spiral,
            palette: ColorTag::ALL.to_vec(),
            sphere_probability: 0.5,
            toggle_policy: TogglePolicy::default(),
            animation: AnimationConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_photos<I, S>(mut self, refs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photo_refs = refs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_decoration_count(mut self, count: usize) -> Self {
        self.decoration_count = count;
        self
    }

    pub fn with_tree(mut self, height: f32, radius: f32) -> Self {
        self.tree_height = height;
        self.tree_radius = radius;
        self
    }

    pub fn with_galaxy_radii(mut self, photos: f32, decorations: f32) -> Self {
        self.photo_galaxy_radius = photos;
        self.decoration_galaxy_radius = decorations;
        self
    }

    pub fn with_tree_variants(mut self, photos: TreeVariant, decorations: TreeVariant) -> Self {
        self.photo_tree_variant = photos;
        self.decoration_tree_variant = decorations;
        self
    }

    pub fn with_toggle_policy(mut self, policy: TogglePolicy) -> Self {
        self.toggle_policy = policy;
        self
    }

    pub fn with_animation(mut self, animation: AnimationConfig) -> Self {
        self.animation = animation;
        self
    }

    /// Photo cone base radius after sanitising.
    pub fn photo_cone_radius(&self) -> f32 {
        self.tree_radius
    }

    pub fn decoration_cone_radius(&self) -> f32 {
        self.tree_radius * self.decoration_radius_scale
    }

    /// Clamp every parameter into its valid range, logging each correction.
    pub fn sanitized(mut self) -> Self {
        self.tree_height = clamp_logged("tree_height", self.tree_height);
        self.tree_radius = clamp_logged("tree_radius", self.tree_radius);
        self.decoration_radius_scale =
            clamp_logged("decoration_radius_scale", self.decoration_radius_scale);
        self.photo_galaxy_radius = clamp_logged("photo_galaxy_radius", self.photo_galaxy_radius);
        self.decoration_galaxy_radius =
            clamp_logged("decoration_galaxy_radius", self.decoration_galaxy_radius);
        self.spiral_turns = clamp_logged("spiral_turns", self.spiral_turns);

        if !self.sphere_probability.is_finite() {
            log::warn!("sphere_probability {} is not finite, using 0.5", self.sphere_probability);
            self.sphere_probability = 0.5;
        } else if !(0.0..=1.0).contains(&self.sphere_probability) {
            let clamped = self.sphere_probability.clamp(0.0, 1.0);
            log::warn!("sphere_probability {} clamped to {}", self.sphere_probability, clamped);
            self.sphere_probability = clamped;
        }

        if self.palette.is_empty() {
            log::warn!("empty palette, falling back to the default colors");
            self.palette = ColorTag::ALL.to_vec();
        }

        self.animation = self.animation.sanitized();
        self
    }
}

impl AnimationConfig {
    fn sanitized(mut self) -> Self {
        for (kind, t) in [("photo", &mut self.photo), ("decoration", &mut self.decoration)] {
            t.position.duration = clamp_logged(&format!("{kind}.position"), t.position.duration);
            t.rotation.duration = clamp_logged(&format!("{kind}.rotation"), t.rotation.duration);
            t.scale.duration = clamp_logged(&format!("{kind}.scale"), t.scale.duration);
        }
        self.max_jitter = clamp_logged("max_jitter", self.max_jitter);
        self.rest_scale = clamp_logged("rest_scale", self.rest_scale);
        self.bob_amplitude = clamp_logged("bob_amplitude", self.bob_amplitude);
        self.bob_frequency = clamp_logged("bob_frequency", self.bob_frequency);
        self.bob_fade = clamp_logged("bob_fade", self.bob_fade);

        // Focus must read as "larger than resting".
        if !(self.focus_scale.is_finite() && self.focus_scale > self.rest_scale) {
            let fixed = if self.rest_scale > 0.0 { self.rest_scale * 1.5 } else { 1.0 };
            log::warn!(
                "focus_scale {} must exceed rest_scale {}, using {}",
                self.focus_scale,
                self.rest_scale,
                fixed
            );
            self.focus_scale = fixed;
        }
        let p = self.focus_position;
        if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            log::warn!("focus_position {:?} is not finite, using the default", p);
            self.focus_position = AnimationConfig::default().focus_position;
        }
        self
    }
}

fn clamp_logged(name: &str, value: f32) -> f32 {
    let clamped = non_negative(value);
    if clamped != value {
        log::warn!("{} = {} is out of range, clamped to {}", name, value, clamped);
    }
    clamped
}
