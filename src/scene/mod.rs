//! Scene construction.
//!
//! `Scene::build` runs the layout generator once per item kind and freezes
//! the result into [`SceneItem`] records. The random source is injected so
//! tests can pin it; the viewer seeds from entropy.

pub mod config;
pub mod item;
pub mod layout;

use std::collections::HashMap;

use rand::Rng;

pub use config::{AnimationConfig, PoseTimings, SceneConfig, TreeVariant, TweenTiming};
pub use item::{ColorTag, Decoration, ItemId, ItemKind, Photo, SceneItem, ShapeKind};
pub use layout::{Cone, Placement};

/// The immutable item set of one mounted scene.
#[derive(Debug, Clone)]
pub struct Scene {
    config: SceneConfig,
    items: Vec<SceneItem>,
    index: HashMap<ItemId, usize>,
}

impl Scene {
    /// Build photos first, then decorations. The config is sanitised here.
    pub fn build<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Self {
        let config = config.sanitized();
        let mut items = Vec::with_capacity(config.photo_refs.len() + config.decoration_count);

        let photo_cone = Cone::new(config.photo_cone_radius(), config.tree_height);
        let photo_tree = layout::tree_placements(
            config.photo_tree_variant,
            config.photo_refs.len(),
            photo_cone,
            config.spiral_turns,
            rng,
        );
        let photo_galaxy = layout::galaxy_placements(config.photo_refs.len(), config.photo_galaxy_radius, rng);
        let photos = config.photo_refs.iter().zip(photo_tree).zip(photo_galaxy);
        for (i, ((image_ref, tree), galaxy)) in photos.enumerate() {
            let kind = ItemKind::Photo(Photo { image_ref: image_ref.clone() });
            items.push(SceneItem {
                id: ItemId::new(kind.prefix(), i),
                kind,
                tree,
                galaxy,
            });
        }

        let deco_cone = Cone::new(config.decoration_cone_radius(), config.tree_height);
        let deco_tree = layout::tree_placements(
            config.decoration_tree_variant,
            config.decoration_count,
            deco_cone,
            config.spiral_turns,
            rng,
        );
        let deco_galaxy = layout::galaxy_placements(config.decoration_count, config.decoration_galaxy_radius, rng);
        for (i, (tree, galaxy)) in deco_tree.into_iter().zip(deco_galaxy).enumerate() {
            let shape = if rng.gen::<f32>() < config.sphere_probability {
                ShapeKind::Sphere
            } else {
                ShapeKind::Polyhedron
            };
            let color = config.palette[rng.gen_range(0..config.palette.len())];
            let kind = ItemKind::Decoration(Decoration { shape, color });
            items.push(SceneItem {
                id: ItemId::new(kind.prefix(), i),
                kind,
                tree,
                galaxy,
            });
        }

        let index = items.iter().enumerate().map(|(i, it)| (it.id.clone(), i)).collect();

        log::info!(
            "scene built: {} photos ({:?}), {} decorations ({:?})",
            config.photo_refs.len(),
            config.photo_tree_variant,
            config.decoration_count,
            config.decoration_tree_variant,
        );

        Self { config, items, index }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn get(&self, id: &ItemId) -> Option<&SceneItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ids that `ItemSelected` may focus.
    pub fn selectable_ids(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.items.iter().filter(|it| it.is_selectable()).map(|it| &it.id)
    }

    pub fn photo_cone(&self) -> Cone {
        Cone::new(self.config.photo_cone_radius(), self.config.tree_height)
    }

    pub fn decoration_cone(&self) -> Cone {
        Cone::new(self.config.decoration_cone_radius(), self.config.tree_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builds_one_item_per_input() {
        let mut rng = StdRng::seed_from_u64(42);
        let scene = Scene::build(SceneConfig::default(), &mut rng);
        assert_eq!(scene.len(), 52);
        assert_eq!(scene.selectable_ids().count(), 12);
        assert_eq!(scene.items()[0].id.as_str(), "photo-0");
        assert_eq!(scene.items()[12].id.as_str(), "deco-0");
        assert!(scene.get(&ItemId::from("deco-39")).is_some());
        assert!(scene.get(&ItemId::from("deco-40")).is_none());
    }

    #[test]
    fn ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(1);
        let scene = Scene::build(SceneConfig::default().with_decoration_count(200), &mut rng);
        let mut ids: Vec<_> = scene.items().iter().map(|it| it.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), scene.len());
    }

    #[test]
    fn empty_scene_is_fine() {
        let mut rng = StdRng::seed_from_u64(0);
        let cfg = SceneConfig::default()
            .with_photos(Vec::<String>::new())
            .with_decoration_count(0);
        let scene = Scene::build(cfg, &mut rng);
        assert!(scene.is_empty());
        assert_eq!(scene.selectable_ids().count(), 0);
    }

    #[test]
    fn placements_respect_their_shapes() {
        let mut rng = StdRng::seed_from_u64(9);
        let cfg = SceneConfig::default()
            .with_tree_variants(TreeVariant::Volumetric, TreeVariant::Spiral)
            .with_decoration_count(120);
        let scene = Scene::build(cfg, &mut rng);
        let (pc, dc) = (scene.photo_cone(), scene.decoration_cone());
        for item in scene.items() {
            let (cone, galaxy_r) = match item.kind {
                ItemKind::Photo(_) => (pc, scene.config().photo_galaxy_radius),
                ItemKind::Decoration(_) => (dc, scene.config().decoration_galaxy_radius),
            };
            assert!(cone.contains(item.tree.position, 1e-3), "{} outside cone", item.id);
            assert!(item.galaxy.position.length() <= galaxy_r + 1e-3, "{} outside galaxy", item.id);
        }
    }

    #[test]
    fn shape_split_follows_probability() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut cfg = SceneConfig::default().with_decoration_count(50);
        cfg.sphere_probability = 1.0;
        let scene = Scene::build(cfg, &mut rng);
        assert!(scene.items().iter().all(|it| match &it.kind {
            ItemKind::Decoration(d) => d.shape == ShapeKind::Sphere,
            ItemKind::Photo(_) => true,
        }));
    }

    #[test]
    fn same_seed_same_scene() {
        let a = Scene::build(SceneConfig::default(), &mut StdRng::seed_from_u64(77));
        let b = Scene::build(SceneConfig::default(), &mut StdRng::seed_from_u64(77));
        assert_eq!(a.items(), b.items());
    }
}
