//! `GalaxyApp` — the egui viewer around a [`Stage`].
//!
//! This module declares the app state and the per-frame `update`.
//! Drawing is split across the sibling sub-modules:
//!
//! - `viewport` — the 3-D scene, pointer input
//! - `overlay`  — title, mode label and hints

pub mod overlay;
pub mod viewport;

use std::collections::HashMap;

use eframe::egui;

use galaxy_tree::photo::PhotoLoader;
use galaxy_tree::scene::{ItemKind, SceneConfig};
use galaxy_tree::Stage;

// ─── Application state ───────────────────────────────────────────────────────

pub struct GalaxyApp {
    pub stage: Stage,
    pub loader: PhotoLoader,
    /// Uploaded photo textures, keyed by image ref
    pub textures: HashMap<String, egui::TextureHandle>,
    pub show_help: bool,
}

impl GalaxyApp {
    pub fn new(config: SceneConfig) -> Self {
        let stage = Stage::new(config);
        let mut loader = PhotoLoader::new();
        for item in stage.scene().items() {
            if let ItemKind::Photo(photo) = &item.kind {
                loader.request(&photo.image_ref);
            }
        }
        log::info!(
            "galaxy tree ready: {} items, {} photos loading",
            stage.scene().len(),
            loader.pending_count()
        );
        Self {
            stage,
            loader,
            textures: HashMap::new(),
            show_help: true,
        }
    }

    /// Upload any photos that finished decoding since the last frame.
    fn upload_photos(&mut self, ctx: &egui::Context) {
        for image_ref in self.loader.poll() {
            let Some(data) = self.loader.take(&image_ref) else {
                continue;
            };
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [data.width as usize, data.height as usize],
                &data.rgba,
            );
            let handle = ctx.load_texture(image_ref.clone(), image, egui::TextureOptions::LINEAR);
            self.textures.insert(image_ref, handle);
        }
    }
}

impl eframe::App for GalaxyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.upload_photos(ctx);

        let dt = ctx.input(|i| i.stable_dt);
        self.stage.tick(dt);

        if ctx.input(|i| i.key_pressed(egui::Key::H)) {
            self.show_help = !self.show_help;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(viewport::BACKGROUND))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_viewport(ui, rect);
                self.draw_overlay(ui, rect);
            });

        // Bob and auto-rotate never stop.
        ctx.request_repaint();
    }
}
