//! Scene items: photos and ornaments.
//!
//! One record per photo or ornament, carrying both resting placements.
//! Records are built once by [`crate::scene::Scene::build`] and never
//! regenerated, so the tree and the galaxy keep the same shape for the
//! lifetime of the scene.

use std::fmt;

use crate::interaction::SceneMode;
use crate::scene::layout::Placement;

// ── ItemId ──

/// Stable identity of a scene item: `"<kind>-<index>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(kind: &str, index: usize) -> Self {
        Self(format!("{}-{}", kind, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Decoration attributes ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    /// Octahedron-style faceted ornament
    Polyhedron,
}

/// Ornament colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Red,
    Gold,
    Silver,
    Green,
}

impl ColorTag {
    pub const ALL: [ColorTag; 4] = [ColorTag::Red, ColorTag::Gold, ColorTag::Silver, ColorTag::Green];

    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorTag::Red => [0xff, 0x00, 0x00],
            ColorTag::Gold => [0xd4, 0xaf, 0x37],
            ColorTag::Silver => [0xc0, 0xc0, 0xc0],
            ColorTag::Green => [0x00, 0xff, 0x00],
        }
    }
}

// ── Item kinds ──

#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    /// URL or path of the picture; opaque to the core
    pub image_ref: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub shape: ShapeKind,
    pub color: ColorTag,
}

impl Decoration {
    /// Ornaments glow on the tree and dim once scattered.
    pub fn emissive_intensity(&self, mode: SceneMode) -> f32 {
        match mode {
            SceneMode::Tree => 0.2,
            SceneMode::Galaxy => 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Photo(Photo),
    Decoration(Decoration),
}

impl ItemKind {
    /// Prefix used in generated ids.
    pub fn prefix(&self) -> &'static str {
        match self {
            ItemKind::Photo(_) => "photo",
            ItemKind::Decoration(_) => "deco",
        }
    }
}

// ── SceneItem ──

#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub id: ItemId,
    pub kind: ItemKind,
    /// Resting placement in the tree
    pub tree: Placement,
    /// Resting placement in the galaxy
    pub galaxy: Placement,
}

impl SceneItem {
    pub fn is_photo(&self) -> bool {
        matches!(self.kind, ItemKind::Photo(_))
    }

    /// Only photos respond to clicks.
    pub fn is_selectable(&self) -> bool {
        self.is_photo()
    }

    pub fn resting(&self, mode: SceneMode) -> Placement {
        match mode {
            SceneMode::Tree => self.tree,
            SceneMode::Galaxy => self.galaxy,
        }
    }
}
